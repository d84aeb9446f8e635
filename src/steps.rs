//! Per-kind step tables and the dispatch rule that picks one.
//!
//! Only the prefix that resolves a statement's type is described; everything
//! after it is opaque to the step machine. Supporting a new statement kind
//! means adding a [`StatementKind`] variant, its leading keyword and its table.

use crate::errors::Error;
use crate::machine::{ObjectPrefix, Pattern, Step, Transition};
use crate::statement::StatementType;
use crate::token::{Token, TokenKind};

const SELECT_KEYWORD: &[Pattern] = &[Pattern::keyword("SELECT")];
const INSERT_KEYWORD: &[Pattern] = &[Pattern::keyword("INSERT")];
const UPDATE_KEYWORD: &[Pattern] = &[Pattern::keyword("UPDATE")];
const DELETE_KEYWORD: &[Pattern] = &[Pattern::keyword("DELETE")];
const TRUNCATE_KEYWORD: &[Pattern] = &[Pattern::keyword("TRUNCATE")];
const CREATE_KEYWORD: &[Pattern] = &[Pattern::keyword("CREATE")];
const DROP_KEYWORD: &[Pattern] = &[Pattern::keyword("DROP")];
const OBJECTS: &[Pattern] = &[Pattern::keyword("TABLE"), Pattern::keyword("DATABASE")];
const AFTER_WHITESPACE: &[TokenKind] = &[TokenKind::Whitespace];

const SELECT: &[Step] = &[Step::accepting(
    SELECT_KEYWORD,
    Transition::StartAs(StatementType::Select),
)];

const INSERT: &[Step] = &[Step::accepting(
    INSERT_KEYWORD,
    Transition::StartAs(StatementType::Insert),
)];

const UPDATE: &[Step] = &[Step::accepting(
    UPDATE_KEYWORD,
    Transition::StartAs(StatementType::Update),
)];

const DELETE: &[Step] = &[Step::accepting(
    DELETE_KEYWORD,
    Transition::StartAs(StatementType::Delete),
)];

const TRUNCATE: &[Step] = &[Step::accepting(
    TRUNCATE_KEYWORD,
    Transition::StartAs(StatementType::Truncate),
)];

const CREATE: &[Step] = &[
    Step::accepting(CREATE_KEYWORD, Transition::Start),
    Step::accepting(OBJECTS, Transition::Object(ObjectPrefix::Create)).after(AFTER_WHITESPACE),
];

const DROP: &[Step] = &[
    Step::accepting(DROP_KEYWORD, Transition::Start),
    Step::accepting(OBJECTS, Transition::Object(ObjectPrefix::Drop)).after(AFTER_WHITESPACE),
];

const UNKNOWN: &[Step] = &[Step::any(Transition::StartAs(StatementType::Unknown))];

/// The statement kinds a leading token can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    Truncate,
    /// Non-strict fallback for statements opening with an unknown token.
    Unknown,
}

impl StatementKind {
    /// Leading keywords of the keyword-selected kinds.
    const BY_KEYWORD: [(&'static str, StatementKind); 7] = [
        ("SELECT", StatementKind::Select),
        ("CREATE", StatementKind::Create),
        ("DROP", StatementKind::Drop),
        ("INSERT", StatementKind::Insert),
        ("UPDATE", StatementKind::Update),
        ("DELETE", StatementKind::Delete),
        ("TRUNCATE", StatementKind::Truncate),
    ];

    /// Select the kind of the statement opened by `token`.
    ///
    /// The [`StatementKind::Unknown`] fallback is only available when `strict`
    /// is off, and only for [`TokenKind::Unknown`] tokens.
    pub(crate) fn dispatch(token: &Token, strict: bool) -> Result<Self, Error> {
        if token.kind == TokenKind::Keyword {
            if let Some((_, kind)) = Self::BY_KEYWORD
                .iter()
                .find(|(keyword, _)| keyword.eq_ignore_ascii_case(&token.value))
            {
                return Ok(*kind);
            }
        }

        if !strict && token.kind == TokenKind::Unknown {
            return Ok(StatementKind::Unknown);
        }

        Err(Error::UnrecognizedLeadingToken {
            value: token.value.clone(),
            position: token.start,
        })
    }

    /// The step table recognizing this kind.
    pub(crate) fn steps(self) -> &'static [Step] {
        match self {
            StatementKind::Select => SELECT,
            StatementKind::Insert => INSERT,
            StatementKind::Update => UPDATE,
            StatementKind::Delete => DELETE,
            StatementKind::Create => CREATE,
            StatementKind::Drop => DROP,
            StatementKind::Truncate => TRUNCATE,
            StatementKind::Unknown => UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(kind: TokenKind, value: &str) -> Token {
        Token::new(kind, value, 0, value.len() - 1)
    }

    #[test]
    fn test_dispatch_by_keyword() {
        for (keyword, expected) in StatementKind::BY_KEYWORD {
            let lower = keyword.to_ascii_lowercase();
            assert_eq!(
                StatementKind::dispatch(&token(TokenKind::Keyword, &lower), true),
                Ok(expected)
            );
        }
    }

    #[test]
    fn test_object_keywords_do_not_open_statements() {
        for strict in [true, false] {
            let error = StatementKind::dispatch(&token(TokenKind::Keyword, "TABLE"), strict);
            assert_eq!(
                error,
                Err(Error::UnrecognizedLeadingToken {
                    value: "TABLE".into(),
                    position: 0,
                })
            );
        }
    }

    #[test]
    fn test_unknown_fallback_requires_non_strict() {
        let foo = token(TokenKind::Unknown, "FOO");
        assert!(StatementKind::dispatch(&foo, true).is_err());
        assert_eq!(
            StatementKind::dispatch(&foo, false),
            Ok(StatementKind::Unknown)
        );
    }

    #[test]
    fn test_strings_never_open_statements() {
        let string = token(TokenKind::String, "'x'");
        assert!(StatementKind::dispatch(&string, false).is_err());
    }

    #[test]
    fn test_table_shapes() {
        assert_eq!(StatementKind::Select.steps().len(), 1);
        assert_eq!(StatementKind::Unknown.steps().len(), 1);
        for kind in [StatementKind::Create, StatementKind::Drop] {
            let steps = kind.steps();
            assert_eq!(steps.len(), 2);
            assert_eq!(steps[0].require_before, None);
            assert_eq!(steps[1].require_before, Some(AFTER_WHITESPACE));
            assert_eq!(steps[1].validation, Some(OBJECTS));
        }
    }
}
