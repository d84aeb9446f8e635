//! Top-level driver splitting an input into statements.
//!
//! The driver pulls tokens one at a time from a [`Tokenizer`]. Blank tokens
//! between statements are kept on the [`Query`] itself; the first other token
//! selects a statement kind and every following token is fed to that kind's
//! step machine until a semicolon closes the statement.

use alloc::vec::Vec;

use crate::errors::Error;
use crate::machine::StepMachine;
use crate::statement::{Query, StatementType};
use crate::steps::StatementKind;
use crate::tokenizer::{Cursor, SqlTokenizer, Tokenizer};

/// Options controlling how strictly statements are validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseOptions {
    /// Reject tokens not matching the current recognition step, and statements
    /// opening with an unknown token.
    ///
    /// When off, mismatches are tolerated and statements opening with an
    /// unknown token are classified as [`StatementType::Unknown`].
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Parser over a single input.
///
/// # Examples
///
/// ```
/// use sql_statement_identifier::{Parser, StatementType};
///
/// let query = Parser::new("FOO BAR; SELECT 1").strict(false).parse().unwrap();
/// let types: Vec<_> = query.statement_types().collect();
/// assert_eq!(types, [StatementType::Unknown, StatementType::Select]);
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'a, T = SqlTokenizer> {
    input: &'a str,
    options: ParseOptions,
    tokenizer: T,
}

impl<'a> Parser<'a> {
    /// Create a strict parser using the default [`SqlTokenizer`].
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            options: ParseOptions::default(),
            tokenizer: SqlTokenizer,
        }
    }
}

impl<'a, T: Tokenizer> Parser<'a, T> {
    /// Enable or disable strict validation.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.options.strict = strict;
        self
    }

    /// Replace all options at once.
    #[must_use]
    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    /// Use a different tokenizer.
    #[must_use]
    pub fn with_tokenizer<U: Tokenizer>(self, tokenizer: U) -> Parser<'a, U> {
        Parser {
            input: self.input,
            options: self.options,
            tokenizer,
        }
    }

    /// The options the parser runs with.
    #[must_use]
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Split the input into statements and classify each of them.
    ///
    /// A trailing statement without a terminating semicolon is still returned,
    /// closed at the end of the input.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error`] raised while dispatching or recognizing a
    /// statement; no partial result is returned.
    pub fn parse(&self) -> Result<Query, Error> {
        let mut query = Query::spanning(self.input.len());
        let mut cursor = Cursor::new(self.input);
        let mut machine: Option<StepMachine> = None;

        while !cursor.is_at_end() {
            let token = self.tokenizer.scan_token(&cursor);
            cursor.advance_past(&token);

            let mut active = match machine.take() {
                Some(active) => active,
                None if token.is_blank() => {
                    query.tokens.push(token);
                    continue;
                }
                None => {
                    let kind = StatementKind::dispatch(&token, self.options.strict)?;
                    tracing::debug!(?kind, position = token.start, "statement opened");
                    StepMachine::new(self.options.strict, kind.steps())
                }
            };

            let end = token.end;
            active.add_token(token)?;

            if active.statement().terminated {
                let mut statement = active.into_statement();
                statement.end = end;
                tracing::debug!(
                    statement_type = ?statement.statement_type,
                    start = statement.start,
                    end,
                    "statement closed"
                );
                query.body.push(statement);
            } else {
                machine = Some(active);
            }
        }

        if let Some(unterminated) = machine {
            let mut statement = unterminated.into_statement();
            statement.end = query.end;
            tracing::debug!(
                statement_type = ?statement.statement_type,
                start = statement.start,
                "closing statement at end of input"
            );
            query.body.push(statement);
        }

        Ok(query)
    }

    /// Classify every statement of the input, in source order.
    ///
    /// Statements that ended before their type resolved are reported as
    /// [`StatementType::Incomplete`].
    ///
    /// # Errors
    ///
    /// Fails whenever [`Parser::parse`] fails.
    pub fn identify(&self) -> Result<Vec<StatementType>, Error> {
        Ok(self.parse()?.statement_types().collect())
    }
}
