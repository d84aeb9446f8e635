//! Generic step machine that recognizes a single statement.
//!
//! A machine walks an ordered list of [`Step`]s. Each step validates one
//! classifying token, applies its [`Transition`] to the statement under
//! construction and decides whether to move on to the next step. Once the
//! statement type is resolved, the rest of the statement is opaque and tokens
//! are only collected until a semicolon closes it.
//!
//! ```text
//! token ─┬─ statement terminated? ──► AlreadyTerminatedStatement
//!        ├─ semicolon ──────────────► terminated = true
//!        ├─ whitespace ─────────────► remembered as predecessor
//!        ├─ type resolved ──────────► absorbed
//!        └─ step: pre-advance ─► require-before ─► validate ─► transition ─► post-advance
//! ```

use core::fmt::{self, Display};

use crate::errors::Error;
use crate::statement::{Statement, StatementType};
use crate::token::{Token, TokenKind};

/// A `(kind, value)` pattern accepted by a step.
///
/// Values are compared case-insensitively; a pattern without a value accepts
/// any token of its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pattern {
    /// Required token kind.
    pub kind: TokenKind,
    /// Required token value, if any.
    pub value: Option<&'static str>,
}

impl Pattern {
    /// A pattern matching the given keyword.
    #[must_use]
    pub const fn keyword(value: &'static str) -> Self {
        Self {
            kind: TokenKind::Keyword,
            value: Some(value),
        }
    }

    /// Whether the token matches this pattern.
    #[must_use]
    pub fn matches(&self, token: &Token) -> bool {
        token.kind == self.kind
            && self
                .value
                .is_none_or(|value| value.eq_ignore_ascii_case(&token.value))
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "(type=\"{}\" value=\"{value}\")", self.kind),
            None => write!(f, "(type=\"{}\")", self.kind),
        }
    }
}

/// What a step does to the statement once it accepted a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Transition {
    /// Record the token start as the statement start.
    Start,
    /// Record the statement start and resolve its type.
    StartAs(StatementType),
    /// Resolve the type from the object keyword following `CREATE` or `DROP`.
    Object(ObjectPrefix),
}

/// Leading keyword of a two-step statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObjectPrefix {
    Create,
    Drop,
}

impl ObjectPrefix {
    fn resolve(self, object: &str) -> StatementType {
        let table = object.eq_ignore_ascii_case("TABLE");
        let database = object.eq_ignore_ascii_case("DATABASE");
        match (self, table, database) {
            (ObjectPrefix::Create, true, _) => StatementType::CreateTable,
            (ObjectPrefix::Create, _, true) => StatementType::CreateDatabase,
            (ObjectPrefix::Drop, true, _) => StatementType::DropTable,
            (ObjectPrefix::Drop, _, true) => StatementType::DropDatabase,
            // Only reachable when a mismatch was tolerated in non-strict mode.
            _ => StatementType::Unknown,
        }
    }
}

impl Transition {
    fn apply(self, statement: &mut Statement, token: &Token) {
        match self {
            Transition::Start => statement.start = token.start,
            Transition::StartAs(statement_type) => {
                statement.start = token.start;
                statement.statement_type = Some(statement_type);
            }
            Transition::Object(prefix) => {
                statement.statement_type = Some(prefix.resolve(&token.value));
            }
        }
    }
}

/// When a step hands over to the next one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Advance {
    Never,
    Always,
}

impl Advance {
    fn holds(self, _token: &Token) -> bool {
        matches!(self, Advance::Always)
    }
}

/// One stage of a statement kind's recognition sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Step {
    /// Accepted patterns; `None` accepts any token.
    pub(crate) validation: Option<&'static [Pattern]>,
    /// Token kinds of which one must immediately precede the token.
    pub(crate) require_before: Option<&'static [TokenKind]>,
    pub(crate) transition: Transition,
    /// Checked before the token is processed; moves to the next step first.
    pub(crate) pre_advance: Advance,
    /// Checked after the token is processed.
    pub(crate) post_advance: Advance,
}

impl Step {
    /// A step that accepts `patterns`, then hands over to the next step.
    pub(crate) const fn accepting(patterns: &'static [Pattern], transition: Transition) -> Self {
        Self {
            validation: Some(patterns),
            require_before: None,
            transition,
            pre_advance: Advance::Never,
            post_advance: Advance::Always,
        }
    }

    /// A step that accepts any token.
    pub(crate) const fn any(transition: Transition) -> Self {
        Self {
            validation: None,
            require_before: None,
            transition,
            pre_advance: Advance::Never,
            post_advance: Advance::Always,
        }
    }

    /// Require one of `kinds` as the immediate predecessor.
    pub(crate) const fn after(mut self, kinds: &'static [TokenKind]) -> Self {
        self.require_before = Some(kinds);
        self
    }

    fn accepts(&self, token: &Token) -> bool {
        self.validation
            .is_none_or(|patterns| patterns.iter().any(|pattern| pattern.matches(token)))
    }
}

/// Drives a step table over the tokens of one statement.
#[derive(Debug, Clone)]
pub(crate) struct StepMachine {
    strict: bool,
    steps: &'static [Step],
    current: usize,
    previous: Option<TokenKind>,
    statement: Statement,
}

impl StepMachine {
    pub(crate) fn new(strict: bool, steps: &'static [Step]) -> Self {
        Self {
            strict,
            steps,
            current: 0,
            previous: None,
            statement: Statement::default(),
        }
    }

    /// The statement built so far.
    pub(crate) fn statement(&self) -> &Statement {
        &self.statement
    }

    /// Consume the machine and return its statement.
    pub(crate) fn into_statement(self) -> Statement {
        self.statement
    }

    /// Feed the next token of the statement.
    pub(crate) fn add_token(&mut self, token: Token) -> Result<(), Error> {
        if self.statement.terminated {
            return Err(Error::AlreadyTerminatedStatement {
                position: token.start,
            });
        }

        tracing::trace!(
            kind = %token.kind,
            value = %token.value,
            step = self.current,
            "statement token"
        );
        let result = self.process(&token);
        self.statement.tokens.push(token);
        result
    }

    fn process(&mut self, token: &Token) -> Result<(), Error> {
        match token.kind {
            TokenKind::Semicolon => {
                self.statement.terminated = true;
                return Ok(());
            }
            TokenKind::Whitespace => {
                self.previous = Some(token.kind);
                return Ok(());
            }
            _ => {}
        }

        if self.statement.statement_type.is_some() {
            self.previous = Some(token.kind);
            return Ok(());
        }

        if self
            .steps
            .get(self.current)
            .is_some_and(|step| step.pre_advance.holds(token))
        {
            self.current += 1;
        }
        let Some(step) = self.steps.get(self.current).copied() else {
            // Every step consumed without resolving a type: nothing left to check.
            self.previous = Some(token.kind);
            return Ok(());
        };

        if let Some(required) = step.require_before {
            if !self.previous.is_some_and(|kind| required.contains(&kind)) {
                return Err(Error::MissingRequiredPredecessor {
                    step: self.current,
                    required: required.to_vec(),
                    value: token.value.clone(),
                    position: token.start,
                });
            }
        }

        if !step.accepts(token) {
            if self.strict {
                return Err(Error::UnexpectedToken {
                    step: self.current,
                    expected: step.validation.map(<[Pattern]>::to_vec).unwrap_or_default(),
                    found_kind: token.kind,
                    found_value: token.value.clone(),
                    position: token.start,
                });
            }
            tracing::trace!(value = %token.value, step = self.current, "tolerating unexpected token");
        }

        step.transition.apply(&mut self.statement, token);

        if step.post_advance.holds(token) {
            self.current += 1;
        }
        self.previous = Some(token.kind);
        Ok(())
    }
}
