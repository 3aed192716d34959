//! Canonical rendering of token sequences.
//!
//! [`render`] is the inverse of scanning for well-formed queries and the
//! single source of truth for canonical query text: transformer operations
//! route their output through it rather than splicing strings. It is total,
//! and synthetic tokens print the same way scanned ones do.

use crate::token::{Filter, Token};

/// Renders a token sequence as canonical query text.
///
/// Rendering normalizes rather than byte-reproduces the source: whitespace
/// runs collapse to a single space, and quoted filter values are re-quoted
/// as double-quoted JSON strings regardless of their original quoting.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Whitespace { .. } => out.push(' '),
            Token::OpeningParen { .. } => out.push('('),
            Token::ClosingParen { .. } => out.push(')'),
            Token::Filter(filter) => render_filter(&mut out, filter),
            Token::Keyword { value, .. }
            | Token::Comment { value, .. }
            | Token::Pattern { value, .. } => out.push_str(value),
            Token::Literal(literal) => out.push_str(&literal.value),
        }
    }
    out
}

/// Renders a single filter clause as `field:value`.
///
/// The value is omitted entirely when the filter has none, and a negated
/// clause keeps its leading `-` so that re-scanning the output yields an
/// equivalent filter.
fn render_filter(out: &mut String, filter: &Filter) {
    if filter.negated {
        out.push('-');
    }
    out.push_str(&filter.field.value);
    out.push(':');
    if let Some(value) = &filter.value {
        if value.quoted {
            out.push_str(&quote(&value.value));
        } else {
            out.push_str(&value.value);
        }
    }
}

/// Double-quotes a value with JSON escaping.
fn quote(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
