//! Statements and the top-level query produced by the parser.

use alloc::vec::Vec;
use core::fmt::{self, Display};
use core::str::FromStr;

use crate::token::Token;

/// The kind of a recognized statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum StatementType {
    /// `SELECT ...`
    Select,
    /// `INSERT ...`
    Insert,
    /// `UPDATE ...`
    Update,
    /// `DELETE ...`
    Delete,
    /// `CREATE TABLE ...`
    CreateTable,
    /// `CREATE DATABASE ...`
    CreateDatabase,
    /// `DROP TABLE ...`
    DropTable,
    /// `DROP DATABASE ...`
    DropDatabase,
    /// `TRUNCATE ...`
    Truncate,
    /// A statement accepted by the non-strict fallback.
    Unknown,
    /// A statement that ended before its kind could be resolved, e.g. `CREATE;`.
    ///
    /// Never assigned by a recognition step; it only stands in for an
    /// unresolved [`Statement::statement_type`].
    Incomplete,
}

impl StatementType {
    /// All statement types, in declaration order.
    pub const ALL: [StatementType; 11] = [
        StatementType::Select,
        StatementType::Insert,
        StatementType::Update,
        StatementType::Delete,
        StatementType::CreateTable,
        StatementType::CreateDatabase,
        StatementType::DropTable,
        StatementType::DropDatabase,
        StatementType::Truncate,
        StatementType::Unknown,
        StatementType::Incomplete,
    ];

    /// The canonical name of the statement type, e.g. `CREATE_TABLE`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StatementType::Select => "SELECT",
            StatementType::Insert => "INSERT",
            StatementType::Update => "UPDATE",
            StatementType::Delete => "DELETE",
            StatementType::CreateTable => "CREATE_TABLE",
            StatementType::CreateDatabase => "CREATE_DATABASE",
            StatementType::DropTable => "DROP_TABLE",
            StatementType::DropDatabase => "DROP_DATABASE",
            StatementType::Truncate => "TRUNCATE",
            StatementType::Unknown => "UNKNOWN",
            StatementType::Incomplete => "INCOMPLETE",
        }
    }
}

impl Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a statement type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Unknown statement type name")]
pub struct ParseStatementTypeError;

impl FromStr for StatementType {
    type Err = ParseStatementTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatementType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s))
            .ok_or(ParseStatementTypeError)
    }
}

/// A single statement recognized in the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Statement {
    /// The resolved kind, or `None` if the statement ended before resolution.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub statement_type: Option<StatementType>,
    /// Offset of the first byte of the statement.
    pub start: usize,
    /// Offset of the last byte of the statement (inclusive).
    pub end: usize,
    /// Whether the statement was closed by a semicolon.
    pub terminated: bool,
    /// Every token fed to the statement, blanks included, in source order.
    pub tokens: Vec<Token>,
}

impl Statement {
    /// The resolved kind, with [`StatementType::Incomplete`] for unresolved statements.
    #[must_use]
    pub fn identified_type(&self) -> StatementType {
        self.statement_type.unwrap_or(StatementType::Incomplete)
    }

    /// The source text covered by the statement.
    ///
    /// `input` must be the text the statement was parsed from.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..=self.end]
    }
}

/// The result of parsing a whole input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Query {
    /// Always zero.
    pub start: usize,
    /// Offset of the last byte of the input, zero for empty input.
    pub end: usize,
    /// The recognized statements, in source order.
    pub body: Vec<Statement>,
    /// Blank tokens found outside any statement.
    pub tokens: Vec<Token>,
}

impl Query {
    /// Create an empty query spanning an input of `len` bytes.
    #[must_use]
    pub fn spanning(len: usize) -> Self {
        Self {
            start: 0,
            end: len.saturating_sub(1),
            body: Vec::new(),
            tokens: Vec::new(),
        }
    }

    /// The identified type of every statement, in source order.
    pub fn statement_types(&self) -> impl Iterator<Item = StatementType> + '_ {
        self.body.iter().map(Statement::identified_type)
    }

    /// The source text of every statement, in source order.
    ///
    /// `input` must be the text the query was parsed from.
    pub fn statement_texts<'a>(&self, input: &'a str) -> impl Iterator<Item = &'a str> {
        self.body.iter().map(move |statement| statement.text(input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names_round_trip_through_from_str() {
        for ty in StatementType::ALL {
            assert_eq!(ty.as_str().parse::<StatementType>(), Ok(ty));
        }
        assert_eq!("create_table".parse::<StatementType>(), Ok(StatementType::CreateTable));
        assert_eq!(
            "CREATE TABLE".parse::<StatementType>(),
            Err(ParseStatementTypeError)
        );
    }

    #[test]
    fn test_unresolved_statement_is_incomplete() {
        let statement = Statement::default();
        assert_eq!(statement.identified_type(), StatementType::Incomplete);
    }

    #[test]
    fn test_empty_query_span() {
        let query = Query::spanning(0);
        assert_eq!((query.start, query.end), (0, 0));
        let query = Query::spanning(10);
        assert_eq!(query.end, 9);
    }

    #[test]
    fn test_statement_text() {
        let input = "  SELECT 1;  ";
        let statement = Statement {
            statement_type: Some(StatementType::Select),
            start: 2,
            end: 10,
            terminated: true,
            tokens: Vec::new(),
        };
        assert_eq!(statement.text(input), "SELECT 1;");
    }
}
