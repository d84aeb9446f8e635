#![doc = include_str!("../README.md")]
#![no_std]
#![deny(clippy::mod_module_files)]

extern crate alloc;
#[cfg(feature = "testing")]
extern crate std;

pub mod errors;
pub(crate) mod machine;
pub mod parser;
pub mod statement;
pub(crate) mod steps;
#[cfg(feature = "testing")]
pub mod testing;
pub mod token;
pub mod tokenizer;

use alloc::vec::Vec;

pub use errors::Error;
pub use machine::Pattern;
pub use parser::{ParseOptions, Parser};
pub use statement::{ParseStatementTypeError, Query, Statement, StatementType};
pub use token::{Token, TokenKind};
pub use tokenizer::{Cursor, SqlTokenizer, Tokenizer};

/// Split `input` into statements and classify each of them.
///
/// In strict mode every statement must open with one of the supported
/// keywords and its classifying prefix must be well formed. With `strict`
/// off, statements opening with an unknown token are reported as
/// [`StatementType::Unknown`] and mismatches are tolerated.
///
/// # Errors
///
/// Returns the first [`Error`] found; the whole parse is aborted.
///
/// # Examples
///
/// ```
/// use sql_statement_identifier::{StatementType, parse};
///
/// let query = parse("CREATE DATABASE Profile;", true).unwrap();
/// assert_eq!(query.body.len(), 1);
/// assert_eq!(query.body[0].statement_type, Some(StatementType::CreateDatabase));
/// assert!(query.body[0].terminated);
/// ```
pub fn parse(input: &str, strict: bool) -> Result<Query, Error> {
    Parser::new(input).strict(strict).parse()
}

/// Classify every statement of `input` in strict mode.
///
/// # Errors
///
/// Fails whenever [`parse`] fails in strict mode.
///
/// # Examples
///
/// ```
/// use sql_statement_identifier::{StatementType, identify};
///
/// let types = identify("DROP TABLE Foo; DROP DATABASE Bar;").unwrap();
/// assert_eq!(types, [StatementType::DropTable, StatementType::DropDatabase]);
/// ```
pub fn identify(input: &str) -> Result<Vec<StatementType>, Error> {
    Parser::new(input).identify()
}

/// Split `input` into the source text of its statements, in strict mode.
///
/// Blank text between statements is dropped; each slice starts at the
/// statement's first keyword and ends at its semicolon, or at the end of the
/// input for a trailing statement without one.
///
/// # Errors
///
/// Fails whenever [`parse`] fails in strict mode.
///
/// # Examples
///
/// ```
/// use sql_statement_identifier::split;
///
/// let statements = split("SELECT 1;\n-- done\nDELETE FROM t").unwrap();
/// assert_eq!(statements, ["SELECT 1;", "DELETE FROM t"]);
/// ```
pub fn split(input: &str) -> Result<Vec<&str>, Error> {
    let query = Parser::new(input).parse()?;
    Ok(query.statement_texts(input).collect())
}
