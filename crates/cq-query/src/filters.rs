//! Well-known filter fields.
//!
//! Scanning places no restriction on filter field names: any `field:` prefix
//! produces a [`Filter`](crate::Filter) token. This module exists so
//! that callers can refer to the recognized fields without string literals,
//! and so user-facing surfaces can resolve the short aliases (`r:`, `f:`,
//! `l:`) to their canonical spellings.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The closed set of well-known filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Restricts results to after a point in time (`after:`).
    After,
    /// Controls whether archived repositories are included (`archived:`).
    Archived,
    /// Matches the commit or diff author (`author:`).
    Author,
    /// Restricts results to before a point in time (`before:`).
    Before,
    /// Toggles case-sensitive matching (`case:`).
    Case,
    /// Carries an explicit search pattern (`content:`).
    Content,
    /// Names the search context scoping the query (`context:`).
    Context,
    /// Caps the number of results (`count:`).
    Count,
    /// Restricts matches to file paths (`file:`).
    File,
    /// Controls whether repository forks are included (`fork:`).
    Fork,
    /// Restricts matches to a language (`lang:`).
    Lang,
    /// Matches commit message text (`message:`).
    Message,
    /// Selects how the pattern is interpreted (`patterntype:`).
    Patterntype,
    /// Restricts matches to repositories (`repo:`).
    Repo,
    /// Selects the revisions to search (`rev:`).
    Rev,
    /// Bounds the search duration (`timeout:`).
    Timeout,
    /// Selects the kind of result to return (`type:`).
    Type,
    /// Restricts matches by repository visibility (`visibility:`).
    Visibility,
}

impl FilterType {
    /// Canonical lowercase spelling of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::After => "after",
            Self::Archived => "archived",
            Self::Author => "author",
            Self::Before => "before",
            Self::Case => "case",
            Self::Content => "content",
            Self::Context => "context",
            Self::Count => "count",
            Self::File => "file",
            Self::Fork => "fork",
            Self::Lang => "lang",
            Self::Message => "message",
            Self::Patterntype => "patterntype",
            Self::Repo => "repo",
            Self::Rev => "rev",
            Self::Timeout => "timeout",
            Self::Type => "type",
            Self::Visibility => "visibility",
        }
    }

    /// Resolves a field name to a known filter, honoring aliases.
    ///
    /// Matching is case-insensitive. Returns `None` for fields the query
    /// language does not recognize.
    pub fn resolve(field: &str) -> Option<Self> {
        let lower = field.to_lowercase();
        Some(match lower.as_str() {
            "after" | "since" => Self::After,
            "archived" => Self::Archived,
            "author" => Self::Author,
            "before" | "until" => Self::Before,
            "case" => Self::Case,
            "content" => Self::Content,
            "context" => Self::Context,
            "count" => Self::Count,
            "f" | "file" => Self::File,
            "fork" => Self::Fork,
            "l" | "lang" | "language" => Self::Lang,
            "m" | "msg" | "message" => Self::Message,
            "patterntype" => Self::Patterntype,
            "r" | "repo" => Self::Repo,
            "rev" | "revision" => Self::Rev,
            "timeout" => Self::Timeout,
            "type" => Self::Type,
            "visibility" => Self::Visibility,
            _ => return None,
        })
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
