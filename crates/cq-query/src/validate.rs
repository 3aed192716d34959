//! Structural checks over query strings.

use crate::{scanner::scan, token::Token};

/// Reports whether a filter with the given field exists in `query`.
///
/// Field comparison is case-insensitive; negation does not matter here, so
/// `-repo:foo` counts as an existing `repo` filter.
///
/// A query that fails to scan reports `false` rather than surfacing the
/// error. This asymmetry with [`update_filters`](crate::update_filters) is
/// intentional: this is a best-effort check (e.g. "should a default context
/// be injected?"), and callers that need strict validity must call
/// [`scan`] themselves first.
pub fn filter_exists(query: &str, field: &str) -> bool {
    let Ok(tokens) = scan(query) else {
        return false;
    };
    tokens.iter().any(|token| match token {
        Token::Filter(filter) => filter.field.value.eq_ignore_ascii_case(field),
        _ => false,
    })
}
