//! Structural query edits.
//!
//! Each operation is a pure function from query text to query text, composed
//! from the scanner, printer, and validator. The operations deliberately
//! differ in how they treat malformed input: [`append_context_filter`] is
//! best-effort and never fails, while [`omit_filter`] and [`update_filters`]
//! demand sound inputs and report an [`InvariantError`] for caller bugs.

use crate::{
    error::InvariantError,
    filters::FilterType,
    printer::render,
    scanner::scan,
    token::{Filter, Literal, Range, Token},
    validate::filter_exists,
};

/// Prepends `context:<spec>` to a query that does not already scope one.
///
/// Returns `query` unchanged, byte for byte, when `context_spec` is `None`
/// or empty or when a `context:` filter is already present. The new filter
/// is prepended by plain text concatenation, not through the printer, so
/// the rest of the query is preserved exactly as written. Never fails.
pub fn append_context_filter(query: &str, context_spec: Option<&str>) -> String {
    let context = FilterType::Context;
    match context_spec {
        Some(spec) if !spec.is_empty() && !filter_exists(query, context.as_str()) => {
            format!("{context}:{spec} {query}")
        }
        _ => query.to_string(),
    }
}

/// Removes a filter's text range from the query it was scanned from.
///
/// When the removed filter was the first token of the query, the character
/// that follows it (the separating space) is removed as well, so no leading
/// space is left behind.
///
/// `filter` must originate from scanning this exact `query`. The
/// precondition is enforced defensively: a range that does not address
/// `query` (synthetic, inverted, out of bounds, or off a character
/// boundary) is rejected as [`InvariantError::ForeignRange`] instead of
/// splicing garbage.
pub fn omit_filter(query: &str, filter: &Filter) -> Result<String, InvariantError> {
    let foreign = || InvariantError::ForeignRange {
        start: filter.range.start,
        end: filter.range.end,
        len: query.len(),
    };
    let Range { start, end } = filter.range;
    if start < 0 || end < start {
        return Err(foreign());
    }
    let (start, end) = (start as usize, end as usize);
    if end > query.len() || !query.is_char_boundary(start) || !query.is_char_boundary(end) {
        return Err(foreign());
    }

    let spliced = format!("{}{}", &query[..start], &query[end..]);
    if start == 0 {
        // Drop the separator now stranded at the front.
        let mut chars = spliced.chars();
        chars.next();
        return Ok(chars.as_str().to_string());
    }
    Ok(spliced)
}

/// Sets the value of every `field` filter in the query, or appends one.
///
/// Every existing filter whose field text, lowercased, equals `field` is
/// replaced with an identical synthetic copy carrying the new value, which
/// enforces at most one effective value for the field. When none match, a
/// separating whitespace and the new filter are appended at the end. The
/// result is rendered through the printer.
///
/// The caller's `field` is compared verbatim against the lowercased token
/// field and must itself already be lowercase; a mixed-case argument never
/// matches and appends instead.
///
/// `query` must already be known to scan. A failure here signals a bug in
/// the caller, reported as [`InvariantError::UnscannableQuery`] rather than
/// as a user-facing syntax error.
pub fn update_filters(
    query: &str,
    field: &str,
    value: &str,
    negated: bool,
) -> Result<String, InvariantError> {
    let mut tokens = scan(query).map_err(InvariantError::UnscannableQuery)?;
    let replacement = Filter {
        range: Range::SYNTHETIC,
        field: Literal::synthetic(field),
        value: Some(Literal::synthetic(value)),
        negated,
    };

    let mut replaced = false;
    for token in &mut tokens {
        if let Token::Filter(existing) = token {
            if existing.field.value.to_lowercase() == field {
                *token = Token::Filter(replacement.clone());
                replaced = true;
            }
        }
    }
    if !replaced {
        tokens.push(Token::Whitespace {
            range: Range::SYNTHETIC,
        });
        tokens.push(Token::Filter(replacement));
    }
    Ok(render(&tokens))
}
