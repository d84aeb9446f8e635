//! Character-level tokenizer.
//!
//! The statement machines only rely on the [`Tokenizer`] contract: given a
//! cursor, produce exactly one token that consumes at least one byte and is
//! classified into one of the [`TokenKind`]s. Lexical ambiguity is never an
//! error; anything unrecognized comes out as [`TokenKind::Unknown`].

use crate::token::{Token, TokenKind};

/// Keywords that can open or classify a statement.
const KEYWORDS: &[&str] = &[
    "SELECT", "INSERT", "UPDATE", "DELETE", "CREATE", "DROP", "TRUNCATE", "TABLE", "DATABASE",
];

/// Scan state: the source text and the offset of the next unread byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the beginning of the input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// The full source text.
    #[must_use]
    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Offset of the next unread byte.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The unread remainder of the input.
    #[must_use]
    pub fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Whether the whole input has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Move the cursor just past the given token.
    pub(crate) fn advance_past(&mut self, token: &Token) {
        debug_assert!(token.end >= self.position, "token must consume input");
        self.position = token.end + 1;
    }
}

/// Produces one token at a time from a cursor position.
pub trait Tokenizer {
    /// Scan the token starting at the cursor position.
    ///
    /// Implementations must consume at least one byte, must end the token on a
    /// UTF-8 character boundary, and must never fail. The cursor is never at
    /// the end of the input when this is called.
    ///
    /// # Panics
    ///
    /// Implementations may panic when the cursor is at the end of the input.
    fn scan_token(&self, cursor: &Cursor<'_>) -> Token;
}

/// The default tokenizer for SQL scripts.
///
/// Quoted strings and comments are single tokens, so semicolons inside them
/// do not terminate a statement. Words outside the keyword set and any stray
/// character are reported as [`TokenKind::Unknown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SqlTokenizer;

impl Tokenizer for SqlTokenizer {
    /// # Panics
    ///
    /// Panics when the cursor is at the end of the input.
    fn scan_token(&self, cursor: &Cursor<'_>) -> Token {
        assert!(!cursor.is_at_end(), "no token left at position {}", cursor.position());
        let rest = cursor.rest();
        let (kind, len) = classify(rest);
        debug_assert!(len > 0, "tokens must consume input");

        let start = cursor.position();
        Token::new(kind, &rest[..len], start, start + len - 1)
    }
}

/// Classify the token at the head of `rest` and return its kind and byte length.
fn classify(rest: &str) -> (TokenKind, usize) {
    let bytes = rest.as_bytes();
    let first = bytes[0];

    match first {
        b';' => (TokenKind::Semicolon, 1),
        b'-' if bytes.get(1) == Some(&b'-') => (TokenKind::CommentInline, inline_comment_len(rest)),
        b'/' if bytes.get(1) == Some(&b'*') => (TokenKind::CommentBlock, block_comment_len(rest)),
        b'\'' | b'"' | b'`' => (TokenKind::String, quoted_len(rest, char::from(first))),
        _ if rest.starts_with(is_word_char) => {
            let len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
            let word = &rest[..len];
            let kind = if KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(word)) {
                TokenKind::Keyword
            } else {
                TokenKind::Unknown
            };
            (kind, len)
        }
        _ => {
            let whitespace_len = rest
                .char_indices()
                .find(|(_, c)| !c.is_whitespace())
                .map_or(rest.len(), |(i, _)| i);
            if whitespace_len > 0 {
                return (TokenKind::Whitespace, whitespace_len);
            }
            // Any other single character, multi-byte ones included.
            let len = rest.chars().next().map_or(1, char::len_utf8);
            (TokenKind::Unknown, len)
        }
    }
}

/// Length of a `--` comment, excluding the line break that ends it.
fn inline_comment_len(rest: &str) -> usize {
    rest.find('\n').unwrap_or(rest.len())
}

/// Length of a `/* */` comment; unterminated comments run to the end of input.
fn block_comment_len(rest: &str) -> usize {
    rest[2..].find("*/").map_or(rest.len(), |i| i + 4)
}

/// Length of a quoted string, honoring doubled quotes as escapes.
///
/// Unterminated strings run to the end of input.
fn quoted_len(rest: &str, quote: char) -> usize {
    let mut chars = rest.char_indices().skip(1).peekable();
    while let Some((i, c)) = chars.next() {
        if c != quote {
            continue;
        }
        if chars.peek().is_some_and(|&(_, next)| next == quote) {
            chars.next();
            continue;
        }
        return i + c.len_utf8();
    }
    rest.len()
}

/// Check if a character can be part of a word (keyword, identifier or number).
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
