//! Token model for the query language.
//!
//! A scanned query is an ordered sequence of [`Token`]s. Each token is tagged
//! by kind and carries the [`Range`] of source text it was scanned from;
//! tokens built by the transformer rather than the scanner carry
//! [`Range::SYNTHETIC`] until the printer places them into text.

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` interval of byte offsets into a query string.
///
/// Offsets are signed so that [`Range::SYNTHETIC`] can mark tokens that were
/// constructed programmatically and are not yet placed into any text. Ranges
/// produced by the scanner are non-negative, lie on character boundaries, and
/// satisfy `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    /// Byte offset of the first character of the token.
    pub start: isize,
    /// Byte offset one past the last character of the token.
    pub end: isize,
}

impl Range {
    /// The sentinel range of a synthetically constructed token.
    pub const SYNTHETIC: Self = Self { start: -1, end: -1 };

    /// Creates a range from scanner byte offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start as isize,
            end: end as isize,
        }
    }

    /// Returns true if this token was constructed rather than scanned.
    pub fn is_synthetic(&self) -> bool {
        self.start < 0 || self.end < 0
    }
}

/// A text payload: a standalone literal, a filter field, or a filter value.
///
/// For filter values scanned from quoted text, `value` holds the unquoted
/// payload and `quoted` is set; the printer re-derives canonical quoting, so
/// a single-quoted source value renders back double-quoted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Literal {
    /// Source range of the literal, including any surrounding quotes.
    pub range: Range,
    /// The literal text (the unquoted payload for quoted values).
    pub value: String,
    /// Whether the text was written quoted in the source.
    pub quoted: bool,
}

impl Literal {
    /// Creates an unquoted literal covering `range`.
    pub fn new(value: impl Into<String>, range: Range) -> Self {
        Self {
            range,
            value: value.into(),
            quoted: false,
        }
    }

    /// Creates a quoted literal whose `value` is the unquoted payload.
    pub fn quoted(value: impl Into<String>, range: Range) -> Self {
        Self {
            range,
            value: value.into(),
            quoted: true,
        }
    }

    /// Creates an unquoted literal not placed into any text.
    pub fn synthetic(value: impl Into<String>) -> Self {
        Self::new(value, Range::SYNTHETIC)
    }
}

/// A `field:value` clause, optionally negated (`-field:value`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    /// Source range of the whole clause, including any leading `-`.
    pub range: Range,
    /// The field name, without the leading `-` of a negated clause.
    pub field: Literal,
    /// The value, if one was written after the `:`.
    pub value: Option<Literal>,
    /// Whether the clause was written with a leading negation marker.
    pub negated: bool,
}

/// The closed set of boolean operator keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordKind {
    /// Conjunction (`and`).
    And,
    /// Disjunction (`or`).
    Or,
    /// Negation (`not`).
    Not,
}

impl KeywordKind {
    /// Resolves a word to an operator keyword, case-insensitively.
    pub fn from_word(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("and") {
            Some(Self::And)
        } else if word.eq_ignore_ascii_case("or") {
            Some(Self::Or)
        } else if word.eq_ignore_ascii_case("not") {
            Some(Self::Not)
        } else {
            None
        }
    }
}

/// One lexical unit of a scanned query.
///
/// The enum is closed and matched exhaustively throughout the crate, so every
/// consumer must handle every kind. Serialized form is a discriminated union
/// tagged by `type`, the shape host applications consume as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Token {
    /// A run of one or more whitespace characters.
    Whitespace {
        /// Source range of the run.
        range: Range,
    },

    /// A single `(`.
    OpeningParen {
        /// Source range of the character.
        range: Range,
    },

    /// A single `)`.
    ClosingParen {
        /// Source range of the character.
        range: Range,
    },

    /// A reserved boolean operator word.
    Keyword {
        /// Source range of the word.
        range: Range,
        /// The word as written (case preserved).
        value: String,
        /// Which operator the word spells.
        kind: KeywordKind,
    },

    /// A `//` comment running to the end of its line.
    Comment {
        /// Source range of the comment.
        range: Range,
        /// The comment text, including the leading `//`.
        value: String,
    },

    /// Free search text.
    Pattern {
        /// Source range of the text.
        range: Range,
        /// The pattern text as written.
        value: String,
    },

    /// A standalone literal.
    Literal(Literal),

    /// A `field:value` clause.
    Filter(Filter),
}

impl Token {
    /// Returns the source range of the token.
    pub fn range(&self) -> Range {
        match self {
            Self::Whitespace { range }
            | Self::OpeningParen { range }
            | Self::ClosingParen { range }
            | Self::Keyword { range, .. }
            | Self::Comment { range, .. }
            | Self::Pattern { range, .. } => *range,
            Self::Literal(literal) => literal.range,
            Self::Filter(filter) => filter.range,
        }
    }
}
