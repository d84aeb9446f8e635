//! Property-checking helpers shared by the fuzz harnesses and regression tests.
//!
//! This module is gated behind the `testing` feature.
//!
//! # Provided helpers
//!
//! - [`FuzzScript`]: an `arbitrary`-generated SQL script with a known identification
//! - [`test_script_identification`]: render a [`FuzzScript`] and check what gets identified
//! - [`test_parse_invariants`]: check structural invariants of the parse of any input

use alloc::string::String;
use alloc::vec::Vec;
use arbitrary::Arbitrary;

use crate::statement::{Query, StatementType};
use crate::{identify, parse};

/// A statement kind that [`FuzzStatement`] can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum FuzzKind {
    /// `SELECT`
    Select,
    /// `INSERT`
    Insert,
    /// `UPDATE`
    Update,
    /// `DELETE`
    Delete,
    /// `CREATE TABLE`
    CreateTable,
    /// `CREATE DATABASE`
    CreateDatabase,
    /// `DROP TABLE`
    DropTable,
    /// `DROP DATABASE`
    DropDatabase,
    /// `TRUNCATE`
    Truncate,
}

impl FuzzKind {
    fn prefix(self) -> &'static str {
        match self {
            FuzzKind::Select => "SELECT",
            FuzzKind::Insert => "INSERT",
            FuzzKind::Update => "UPDATE",
            FuzzKind::Delete => "DELETE",
            FuzzKind::CreateTable => "CREATE TABLE",
            FuzzKind::CreateDatabase => "CREATE DATABASE",
            FuzzKind::DropTable => "DROP TABLE",
            FuzzKind::DropDatabase => "DROP DATABASE",
            FuzzKind::Truncate => "TRUNCATE",
        }
    }

    /// The type the statement must be identified as.
    #[must_use]
    pub fn expected(self) -> StatementType {
        match self {
            FuzzKind::Select => StatementType::Select,
            FuzzKind::Insert => StatementType::Insert,
            FuzzKind::Update => StatementType::Update,
            FuzzKind::Delete => StatementType::Delete,
            FuzzKind::CreateTable => StatementType::CreateTable,
            FuzzKind::CreateDatabase => StatementType::CreateDatabase,
            FuzzKind::DropTable => StatementType::DropTable,
            FuzzKind::DropDatabase => StatementType::DropDatabase,
            FuzzKind::Truncate => StatementType::Truncate,
        }
    }
}

/// Blank text placed before a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum FuzzBlank {
    /// Nothing.
    None,
    /// A single space.
    Space,
    /// Line breaks and indentation.
    Newline,
    /// A `--` comment on its own line.
    InlineComment,
    /// A `/* */` comment containing a semicolon.
    BlockComment,
}

impl FuzzBlank {
    fn text(self) -> &'static str {
        match self {
            FuzzBlank::None => "",
            FuzzBlank::Space => " ",
            FuzzBlank::Newline => "\n\n    ",
            FuzzBlank::InlineComment => "-- next; statement\n",
            FuzzBlank::BlockComment => "/* next; statement */ ",
        }
    }
}

/// A word of a statement body, after its classifying prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
pub enum FuzzWord {
    /// A plain identifier.
    Identifier,
    /// `*`
    Star,
    /// A number literal.
    Number,
    /// A string literal containing a semicolon.
    String,
    /// A quoted identifier.
    QuotedIdentifier,
    /// A keyword that would open a statement elsewhere.
    Keyword,
    /// A parenthesized list.
    Parenthesized,
    /// An inline comment.
    Comment,
}

impl FuzzWord {
    fn text(self) -> &'static str {
        match self {
            FuzzWord::Identifier => "Persons",
            FuzzWord::Star => "*",
            FuzzWord::Number => "42",
            FuzzWord::String => "'a;b'",
            FuzzWord::QuotedIdentifier => "\"Per;sons\"",
            FuzzWord::Keyword => "SELECT",
            FuzzWord::Parenthesized => "(id, name)",
            FuzzWord::Comment => "-- trailing;\n",
        }
    }
}

/// One statement of a [`FuzzScript`].
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub struct FuzzStatement {
    /// The statement kind.
    pub kind: FuzzKind,
    /// Render the classifying prefix in lower case.
    pub lowercase: bool,
    /// Blank text before the statement.
    pub leading: FuzzBlank,
    /// Words following the classifying prefix.
    pub body: Vec<FuzzWord>,
    /// Close the statement with a semicolon. Ignored for all but the last
    /// statement, which would otherwise swallow its successor.
    pub terminated: bool,
}

/// A generated SQL script whose identification is known in advance.
#[derive(Debug, Clone, PartialEq, Eq, Arbitrary)]
pub struct FuzzScript {
    /// The statements, in source order.
    pub statements: Vec<FuzzStatement>,
    /// Blank text after the last statement.
    pub trailing: FuzzBlank,
}

impl FuzzScript {
    /// Render the script as SQL text.
    #[must_use]
    pub fn render(&self) -> String {
        let mut sql = String::new();
        let last = self.statements.len().saturating_sub(1);
        for (i, statement) in self.statements.iter().enumerate() {
            sql.push_str(statement.leading.text());
            if statement.lowercase {
                sql.push_str(&statement.kind.prefix().to_ascii_lowercase());
            } else {
                sql.push_str(statement.kind.prefix());
            }
            for word in &statement.body {
                sql.push(' ');
                sql.push_str(word.text());
            }
            if statement.terminated || i < last {
                sql.push(';');
            }
        }
        sql.push_str(self.trailing.text());
        sql
    }

    /// The types the rendered script must be identified as.
    #[must_use]
    pub fn expected(&self) -> Vec<StatementType> {
        self.statements
            .iter()
            .map(|statement| statement.kind.expected())
            .collect()
    }
}

/// Render `script`, identify it in strict mode and compare with its expected types.
///
/// # Panics
///
/// Panics if identification fails or disagrees, or if any parse invariant is broken.
pub fn test_script_identification(script: &FuzzScript) {
    let sql = script.render();
    let identified = identify(&sql)
        .unwrap_or_else(|error| panic!("Failed to identify {sql:?}: {error}"));
    assert_eq!(identified, script.expected(), "SQL: {sql:?}");
    test_parse_invariants(&sql);
}

/// Check the structural invariants of parsing `input`, in both modes.
///
/// Inputs that fail to parse are accepted; only successful parses are checked.
///
/// # Panics
///
/// Panics if any invariant is broken.
pub fn test_parse_invariants(input: &str) {
    for strict in [true, false] {
        let Ok(query) = parse(input, strict) else {
            continue;
        };

        let again = parse(input, strict).expect("Second parse of the same input failed");
        assert_eq!(query, again, "Parsing is not deterministic for {input:?}");

        assert_tokens_cover_input(&query, input);
        assert_statements_ordered(&query, input);
    }
}

/// Every byte of the input belongs to exactly one token, and each token's
/// value is the source text it spans.
fn assert_tokens_cover_input(query: &Query, input: &str) {
    let mut tokens: Vec<_> = query
        .tokens
        .iter()
        .chain(query.body.iter().flat_map(|statement| &statement.tokens))
        .collect();
    tokens.sort_by_key(|token| token.start);

    let mut next = 0;
    for token in tokens {
        assert_eq!(token.start, next, "Gap or overlap at {next} in {input:?}");
        assert_eq!(token.value, &input[token.span()], "Token value mismatch");
        next = token.end + 1;
    }
    assert_eq!(next, input.len(), "Tokens do not reach the end of {input:?}");
}

/// Statements are non-overlapping, in source order, and each one is exactly
/// the concatenation of its tokens.
fn assert_statements_ordered(query: &Query, input: &str) {
    for pair in query.body.windows(2) {
        assert!(
            pair[0].end < pair[1].start,
            "Statements overlap in {input:?}"
        );
    }

    for statement in &query.body {
        let (Some(first), Some(last)) = (statement.tokens.first(), statement.tokens.last()) else {
            panic!("Empty statement in {input:?}");
        };
        assert!(!first.is_blank(), "Statement opened by a blank token");
        assert_eq!(statement.start, first.start);
        assert_eq!(statement.end, last.end);

        let concatenated: String = statement
            .tokens
            .iter()
            .map(|token| token.value.as_str())
            .collect();
        assert_eq!(concatenated, statement.text(input));
        assert_eq!(
            statement.terminated,
            last.kind == crate::TokenKind::Semicolon,
            "Termination flag disagrees with the last token"
        );
    }
}
