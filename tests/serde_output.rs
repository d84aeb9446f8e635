//! Serialized shape of parsed queries.

#![cfg(feature = "serde")]

use serde_json::json;
use sql_statement_identifier::{Query, TokenKind, parse};

#[test]
fn test_statement_serialization() {
    let query = parse("DROP TABLE Foo;", true).unwrap();
    let value = serde_json::to_value(&query).unwrap();

    assert_eq!(value["start"], json!(0));
    assert_eq!(value["end"], json!(14));
    assert_eq!(value["tokens"], json!([]));

    let statement = &value["body"][0];
    assert_eq!(statement["type"], json!("DROP_TABLE"));
    assert_eq!(statement["start"], json!(0));
    assert_eq!(statement["end"], json!(14));
    assert_eq!(statement["terminated"], json!(true));
    assert_eq!(
        statement["tokens"][0],
        json!({ "type": "keyword", "value": "DROP", "start": 0, "end": 3 })
    );
    assert_eq!(statement["tokens"][1]["type"], json!("whitespace"));
    assert_eq!(statement["tokens"][5]["type"], json!("semicolon"));
}

#[test]
fn test_unresolved_type_serializes_as_null() {
    let query = parse("CREATE", true).unwrap();
    let value = serde_json::to_value(&query).unwrap();
    assert_eq!(value["body"][0]["type"], json!(null));
}

#[test]
fn test_query_deserializes_back() {
    let input = "-- c\nCREATE DATABASE Profile; SELECT 1";
    let query = parse(input, true).unwrap();
    let text = serde_json::to_string(&query).unwrap();
    let decoded: Query = serde_json::from_str(&text).unwrap();
    assert_eq!(decoded, query);
    assert_eq!(decoded.tokens[0].kind, TokenKind::CommentInline);
}
