//! Differential tests against SQLite.
//!
//! Every statement split out of a script must be accepted by SQLite as exactly
//! one statement, and SQLite's read-only verdict must agree with the
//! identified type. Statements are executed in order, so later statements see
//! the schema created by earlier ones.

use rusqlite::Connection;
use sql_statement_identifier::{StatementType, parse};

/// Execute every statement of `sql` and return the identified types.
fn execute_script(sql: &str) -> Vec<StatementType> {
    let conn = Connection::open_in_memory().unwrap();
    let query = parse(sql, true).unwrap();

    let mut types = Vec::new();
    for statement in &query.body {
        let text = statement.text(sql);
        let statement_type = statement.identified_type();

        let mut prepared = conn
            .prepare(text)
            .unwrap_or_else(|error| panic!("SQLite rejected {text:?}: {error}"));
        assert_eq!(
            prepared.readonly(),
            statement_type == StatementType::Select,
            "Read-only mismatch for {text:?}"
        );

        if statement_type == StatementType::Select {
            let mut rows = prepared.query([]).unwrap();
            while rows.next().unwrap().is_some() {}
        } else {
            prepared.execute([]).unwrap();
        }
        types.push(statement_type);
    }
    types
}

#[test]
fn test_schema_and_data_script() {
    let sql = "
        CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
        CREATE TABLE posts (id INTEGER PRIMARY KEY, user_id INTEGER, body TEXT);
        INSERT INTO users (id, name) VALUES (1, 'Alice'), (2, 'Bob; Jr.');
        INSERT INTO posts (id, user_id, body) VALUES (1, 1, '/* not a comment */');
        UPDATE users SET name = 'Carol' WHERE id = 2;
        SELECT u.name, p.body FROM users u JOIN posts p ON p.user_id = u.id;
        DELETE FROM posts WHERE user_id = 1;
        DROP TABLE posts;
    ";
    assert_eq!(
        execute_script(sql),
        [
            StatementType::CreateTable,
            StatementType::CreateTable,
            StatementType::Insert,
            StatementType::Insert,
            StatementType::Update,
            StatementType::Select,
            StatementType::Delete,
            StatementType::DropTable,
        ]
    );
}

#[test]
fn test_comments_and_quoting() {
    let sql = "-- leading comment; with a semicolon
        create table \"odd;name\" (a TEXT); /* between; statements */
        insert into \"odd;name\" values ('it''s; fine'); -- trailing
        select a from \"odd;name\" where a like '%;%'";
    assert_eq!(
        execute_script(sql),
        [
            StatementType::CreateTable,
            StatementType::Insert,
            StatementType::Select,
        ]
    );
}

#[test]
fn test_unterminated_last_statement() {
    let sql = "CREATE TABLE t (a INTEGER); SELECT count(*) FROM t -- no terminator";
    assert_eq!(
        execute_script(sql),
        [StatementType::CreateTable, StatementType::Select]
    );
}
