//! Structural properties of parsed queries.
//!
//! Statements must reconstruct the source text they span, appear in source
//! order without overlapping, and parsing must be deterministic.

use sql_statement_identifier::{Query, Statement, TokenKind, parse};

const SCRIPTS: &[&str] = &[
    "SELECT * FROM Persons",
    "CREATE TABLE Persons (PersonID int, Name varchar(255));",
    "  DROP TABLE Foo;  DROP DATABASE Bar;\n",
    "-- header\nINSERT INTO t VALUES ('x;y');\n/* c */ UPDATE t SET a = 1 WHERE b = 'é';",
    "truncate t; select 1 -- trailing comment",
    "CREATE;DROP;",
];

fn statement_source<'a>(statement: &Statement, input: &'a str) -> &'a str {
    let first = statement.tokens.first().expect("statement without tokens");
    let last = statement.tokens.last().expect("statement without tokens");
    &input[first.start..=last.end]
}

#[test]
fn test_tokens_reconstruct_statement_text() {
    for input in SCRIPTS {
        let query = parse(input, true).unwrap();
        for statement in &query.body {
            let concatenated: String = statement.tokens.iter().map(|t| t.value.as_str()).collect();
            assert_eq!(concatenated, statement_source(statement, input));
            assert_eq!(concatenated, statement.text(input));
            for token in &statement.tokens {
                assert_eq!(token.value, &input[token.span()]);
            }
        }
    }
}

#[test]
fn test_parsing_is_idempotent() {
    for input in SCRIPTS {
        let first: Query = parse(input, true).unwrap();
        let second: Query = parse(input, true).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_statements_are_ordered_and_disjoint() {
    for input in SCRIPTS {
        let query = parse(input, true).unwrap();
        for pair in query.body.windows(2) {
            assert!(pair[0].start <= pair[0].end);
            assert!(pair[0].end < pair[1].start, "{input:?}");
        }
    }
}

#[test]
fn test_gaps_between_statements_are_blank_tokens() {
    for input in SCRIPTS {
        let query = parse(input, true).unwrap();
        assert!(query.tokens.iter().all(|t| t.kind.is_blank()));

        let mut all: Vec<_> = query
            .tokens
            .iter()
            .chain(query.body.iter().flat_map(|s| &s.tokens))
            .collect();
        all.sort_by_key(|t| t.start);
        let rebuilt: String = all.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(&rebuilt, input);
    }
}

#[test]
fn test_query_span_and_termination() {
    for input in SCRIPTS {
        let query = parse(input, true).unwrap();
        assert_eq!(query.start, 0);
        assert_eq!(query.end, input.len() - 1);
        for statement in &query.body {
            let last = statement.tokens.last().unwrap();
            assert_eq!(statement.terminated, last.kind == TokenKind::Semicolon);
            assert!(statement.end <= query.end);
        }
    }
}
