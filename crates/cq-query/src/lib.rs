//! Query language core for cq code search.
//!
//! This crate is the textual query layer: it scans raw query strings into
//! typed tokens, renders tokens back into canonical text, and performs
//! structural edits on queries without ever producing syntactically invalid
//! output. It executes no searches and does no I/O; hosts hand it a query
//! string and get back a string, a token sequence, or a verdict.
//!
//! The language:
//!
//! - **Patterns**: `openFile` - free text to search for
//! - **Filters**: `repo:cortex lang:rust` - scope the search; `-repo:vendor` negates
//! - **Keywords**: `and`, `or`, `not` - boolean operators (case-insensitive)
//! - **Grouping**: `(a or b)` - precedence control
//! - **Comments**: `// note` - carried through, ignored by backends
//!
//! # Example
//!
//! ```
//! use cq_query::{append_context_filter, filter_exists, update_filters};
//!
//! let query = update_filters("server repo:cortex", "repo", "edge", false).unwrap();
//! assert_eq!(query, "server repo:edge");
//! assert!(filter_exists(&query, "repo"));
//!
//! let scoped = append_context_filter(&query, Some("global"));
//! assert_eq!(scoped, "context:global server repo:edge");
//! ```

#![warn(missing_docs)]

mod error;
mod filters;
mod printer;
mod scanner;
mod token;
mod transformer;
mod validate;

pub use error::{InvariantError, ScanError};
pub use filters::FilterType;
pub use printer::render;
pub use scanner::scan;
pub use token::{Filter, KeywordKind, Literal, Range, Token};
pub use transformer::{append_context_filter, omit_filter, update_filters};
pub use validate::filter_exists;
