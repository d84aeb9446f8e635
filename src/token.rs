//! Lexical tokens exchanged between the tokenizer and the statement machines.

use alloc::string::String;
use core::fmt::{self, Display};
use core::ops::Range;

/// A token produced by a [`Tokenizer`](crate::Tokenizer).
///
/// Offsets are byte offsets into the source text and both ends are inclusive,
/// so a one-byte token has `start == end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// The lexical category of the token.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: TokenKind,
    /// The literal source text of the token.
    pub value: String,
    /// Offset of the first byte of the token.
    pub start: usize,
    /// Offset of the last byte of the token.
    pub end: usize,
}

impl Token {
    /// Create a new token.
    #[must_use]
    pub fn new(kind: TokenKind, value: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
        }
    }

    /// Half-open byte range of the token, suitable for slicing the source.
    #[must_use]
    pub fn span(&self) -> Range<usize> {
        self.start..self.end + 1
    }

    /// Whether the token is whitespace or a comment.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.kind.is_blank()
    }
}

/// The lexical categories a tokenizer can assign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TokenKind {
    /// One of the statement-classifying keywords.
    Keyword,
    /// A run of whitespace.
    Whitespace,
    /// A `--` comment running to the end of the line.
    CommentInline,
    /// A `/* ... */` comment.
    CommentBlock,
    /// A quoted string or quoted identifier.
    String,
    /// The statement terminator.
    Semicolon,
    /// Anything else: identifiers, numbers, operators, punctuation.
    Unknown,
}

impl TokenKind {
    /// Whether tokens of this kind are skipped between statements.
    #[must_use]
    pub fn is_blank(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::CommentInline | TokenKind::CommentBlock
        )
    }

    /// The name of the kind as used in error messages and serialized output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Whitespace => "whitespace",
            TokenKind::CommentInline => "comment-inline",
            TokenKind::CommentBlock => "comment-block",
            TokenKind::String => "string",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Unknown => "unknown",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type=\"{}\" value=\"{}\"", self.kind, self.value)
    }
}
