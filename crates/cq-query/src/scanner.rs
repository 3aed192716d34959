//! Query scanner (lexer).
//!
//! Converts a query string into an ordered sequence of [`Token`]s whose
//! ranges tile the input exactly: contiguous, non-overlapping, covering every
//! byte. Scanning is a single left-to-right pass with no backtracking across
//! token boundaries; a token, once emitted, is never revisited.
//!
//! Structural problems such as unbalanced parentheses are not scan errors
//! (balance is a property for downstream consumers); only lexical
//! malformations are: an unterminated quoted value, or a filter with an
//! empty field name.

use crate::{
    error::ScanError,
    token::{Filter, KeywordKind, Literal, Range, Token},
};

/// Characters that terminate a field, value, keyword, or pattern run.
///
/// Parentheses are tokenized greedily as their own single-character tokens,
/// so they end any surrounding run.
fn is_break_char(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

/// Single-pass scanning automaton over a query string.
struct Scanner<'a> {
    /// The full query text.
    input: &'a str,
    /// Current byte position.
    position: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner positioned at the start of `input`.
    fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Returns the unscanned remainder of the input.
    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Returns the next character without consuming it.
    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes one character.
    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Consumes characters while `keep` holds, returning the consumed slice.
    fn eat_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let start = self.position;
        while let Some(c) = self.peek() {
            if !keep(c) {
                break;
            }
            self.position += c.len_utf8();
        }
        &self.input[start..self.position]
    }

    /// Scans the entire input.
    fn scan_all(mut self) -> Result<Vec<Token>, ScanError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Scans the next token, or `None` at end of input.
    fn next_token(&mut self) -> Result<Option<Token>, ScanError> {
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let start = self.position;
        match c {
            c if c.is_whitespace() => {
                self.eat_while(char::is_whitespace);
                Ok(Some(Token::Whitespace {
                    range: Range::new(start, self.position),
                }))
            }
            '(' => {
                self.bump();
                Ok(Some(Token::OpeningParen {
                    range: Range::new(start, self.position),
                }))
            }
            ')' => {
                self.bump();
                Ok(Some(Token::ClosingParen {
                    range: Range::new(start, self.position),
                }))
            }
            _ if self.rest().starts_with("//") => Ok(Some(self.scan_comment())),
            _ => self.scan_clause().map(Some),
        }
    }

    /// Scans a `//` comment running up to (not including) the end of line.
    fn scan_comment(&mut self) -> Token {
        let start = self.position;
        let value = self.eat_while(|c| c != '\n').to_string();
        Token::Comment {
            range: Range::new(start, self.position),
            value,
        }
    }

    /// Scans a filter, keyword, or pattern starting at the current position.
    ///
    /// Filter recognition wins whenever a `field:` prefix is present. The
    /// remaining word run becomes a keyword when it spells one and a pattern
    /// otherwise, with a leading `-` staying part of the pattern text.
    fn scan_clause(&mut self) -> Result<Token, ScanError> {
        if let Some(filter) = self.scan_filter()? {
            return Ok(Token::Filter(filter));
        }

        let start = self.position;
        let word = self.eat_while(|c| !is_break_char(c)).to_string();
        let range = Range::new(start, self.position);
        match KeywordKind::from_word(&word) {
            Some(kind) => Ok(Token::Keyword {
                range,
                value: word,
                kind,
            }),
            None => Ok(Token::Pattern { range, value: word }),
        }
    }

    /// Attempts to scan a filter clause at the current position.
    ///
    /// Looks ahead for a `field:` prefix before consuming anything, so that
    /// `Ok(None)` leaves the position untouched and the caller can scan the
    /// run as a keyword or pattern instead. An empty field name in front of
    /// a `:` is malformed filter syntax and fails the whole scan.
    fn scan_filter(&mut self) -> Result<Option<Filter>, ScanError> {
        let start = self.position;
        let rest = self.rest();
        let negated = rest.starts_with('-');
        let body = if negated { &rest[1..] } else { rest };

        // The field run extends to the first colon; any break character
        // before one means this run is not a filter.
        let mut field_len = None;
        for (offset, c) in body.char_indices() {
            if c == ':' {
                field_len = Some(offset);
                break;
            }
            if is_break_char(c) {
                break;
            }
        }
        let Some(field_len) = field_len else {
            return Ok(None);
        };
        if field_len == 0 {
            return Err(ScanError::new("missing filter field before ':'", start));
        }

        // Committed: consume the negation marker, field, colon, and value.
        if negated {
            self.bump();
        }
        let field_start = self.position;
        self.position += field_len;
        let field = Literal::new(
            &self.input[field_start..self.position],
            Range::new(field_start, self.position),
        );
        self.bump(); // the ':'
        let value = self.scan_value()?;

        Ok(Some(Filter {
            range: Range::new(start, self.position),
            field,
            value,
            negated,
        }))
    }

    /// Scans the value portion of a filter, if one is present.
    fn scan_value(&mut self) -> Result<Option<Literal>, ScanError> {
        match self.peek() {
            None => Ok(None),
            Some(c) if is_break_char(c) => Ok(None),
            Some(quote @ ('"' | '\'')) => self.scan_quoted_value(quote).map(Some),
            Some(_) => Ok(Some(self.scan_raw_value())),
        }
    }

    /// Scans a quoted value, resolving escapes into the unquoted payload.
    ///
    /// Only the quote character itself and the backslash are escapable;
    /// any other backslash sequence stays in the payload verbatim.
    fn scan_quoted_value(&mut self, quote: char) -> Result<Literal, ScanError> {
        let start = self.position;
        self.bump(); // opening quote
        let mut payload = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => {
                    return Ok(Literal::quoted(payload, Range::new(start, self.position)));
                }
                Some('\\') => match self.peek() {
                    Some(c) if c == quote || c == '\\' => {
                        self.bump();
                        payload.push(c);
                    }
                    _ => payload.push('\\'),
                },
                Some(c) => payload.push(c),
                None => return Err(ScanError::new("unterminated quoted value", start)),
            }
        }
    }

    /// Scans an unquoted value: a raw run ending at whitespace or an
    /// unescaped parenthesis, with backslash escaping the following
    /// character (both kept verbatim).
    fn scan_raw_value(&mut self) -> Literal {
        let start = self.position;
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.bump();
                self.bump();
                continue;
            }
            if is_break_char(c) {
                break;
            }
            self.bump();
        }
        Literal::new(
            &self.input[start..self.position],
            Range::new(start, self.position),
        )
    }
}

/// Scans a query string into tokens.
///
/// Returns the full token sequence or the first lexical failure; no partial
/// sequence is produced on failure. The ranges of a successful scan tile the
/// input exactly, so rendering the tokens in order reproduces an equivalent
/// query.
pub fn scan(query: &str) -> Result<Vec<Token>, ScanError> {
    Scanner::new(query).scan_all()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Asserts that the scanned ranges are contiguous and cover the input.
    fn assert_tiles(query: &str) {
        let tokens = scan(query).unwrap();
        let mut position = 0;
        for token in &tokens {
            let range = token.range();
            assert_eq!(range.start, position as isize, "gap in {query:?}");
            assert!(range.end >= range.start);
            position = range.end as usize;
        }
        assert_eq!(position, query.len(), "uncovered tail in {query:?}");
    }

    fn filter(query: &str) -> Filter {
        let tokens = scan(query).unwrap();
        assert_eq!(tokens.len(), 1, "expected a single token for {query:?}");
        match tokens.into_iter().next().unwrap() {
            Token::Filter(filter) => filter,
            other => panic!("expected filter for {query:?}, got {other:?}"),
        }
    }

    #[test]
    fn empty_input() {
        assert_eq!(scan("").unwrap(), vec![]);
    }

    #[test]
    fn whitespace_merges_into_one_token() {
        let tokens = scan(" \t ").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Whitespace {
                range: Range::new(0, 3)
            }]
        );
    }

    #[test]
    fn single_pattern() {
        let tokens = scan("main").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Pattern {
                range: Range::new(0, 4),
                value: "main".into(),
            }]
        );
    }

    #[test]
    fn patterns_separated_by_whitespace() {
        let tokens = scan("foo  bar").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Pattern {
                    range: Range::new(0, 3),
                    value: "foo".into(),
                },
                Token::Whitespace {
                    range: Range::new(3, 5),
                },
                Token::Pattern {
                    range: Range::new(5, 8),
                    value: "bar".into(),
                },
            ]
        );
    }

    #[test]
    fn parens_are_single_character_tokens() {
        let tokens = scan("(a)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::OpeningParen {
                    range: Range::new(0, 1),
                },
                Token::Pattern {
                    range: Range::new(1, 2),
                    value: "a".into(),
                },
                Token::ClosingParen {
                    range: Range::new(2, 3),
                },
            ]
        );
    }

    #[test]
    fn parens_terminate_a_pattern_run() {
        let tokens = scan("foo(bar").unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "foo"));
        assert!(matches!(&tokens[1], Token::OpeningParen { .. }));
        assert!(matches!(&tokens[2], Token::Pattern { value, .. } if value == "bar"));
    }

    #[test]
    fn keywords_are_case_insensitive_and_preserve_spelling() {
        let tokens = scan("a OR b and c NoT d").unwrap();
        let keywords: Vec<_> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Keyword { value, kind, .. } => Some((value.as_str(), *kind)),
                _ => None,
            })
            .collect();
        assert_eq!(
            keywords,
            vec![
                ("OR", KeywordKind::Or),
                ("and", KeywordKind::And),
                ("NoT", KeywordKind::Not),
            ]
        );
    }

    #[test]
    fn keyword_spelled_into_a_longer_word_is_a_pattern() {
        let tokens = scan("order").unwrap();
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "order"));
    }

    #[test]
    fn simple_filter() {
        let f = filter("repo:foo");
        assert_eq!(f.range, Range::new(0, 8));
        assert_eq!(f.field, Literal::new("repo", Range::new(0, 4)));
        assert_eq!(f.value, Some(Literal::new("foo", Range::new(5, 8))));
        assert!(!f.negated);
    }

    #[test]
    fn negated_filter_excludes_marker_from_field() {
        let f = filter("-repo:foo");
        assert!(f.negated);
        assert_eq!(f.range, Range::new(0, 9));
        assert_eq!(f.field.value, "repo");
        assert_eq!(f.field.range, Range::new(1, 5));
    }

    #[test]
    fn filter_without_value() {
        let f = filter("repo:");
        assert_eq!(f.value, None);
        assert_eq!(f.range, Range::new(0, 5));

        let tokens = scan("repo: foo").unwrap();
        assert!(matches!(&tokens[0], Token::Filter(f) if f.value.is_none()));
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn filter_value_may_contain_colons() {
        let f = filter("repo:github.com/a:b");
        assert_eq!(f.field.value, "repo");
        assert_eq!(f.value.unwrap().value, "github.com/a:b");
    }

    #[test]
    fn filter_is_preferred_over_keyword() {
        let f = filter("or:foo");
        assert_eq!(f.field.value, "or");
    }

    #[test]
    fn dash_without_filter_stays_in_the_pattern() {
        let tokens = scan("-deprecated -").unwrap();
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "-deprecated"));
        assert!(matches!(&tokens[2], Token::Pattern { value, .. } if value == "-"));
    }

    #[test]
    fn quoted_value_strips_quotes_and_resolves_escapes() {
        let f = filter(r#"repo:"a \"b\" c""#);
        let value = f.value.unwrap();
        assert!(value.quoted);
        assert_eq!(value.value, r#"a "b" c"#);
    }

    #[test]
    fn single_quoted_value_is_marked_quoted() {
        let f = filter("content:'hello world'");
        let value = f.value.unwrap();
        assert!(value.quoted);
        assert_eq!(value.value, "hello world");
    }

    #[test]
    fn non_quote_escapes_stay_in_the_payload() {
        let f = filter(r#"content:"a\nb""#);
        assert_eq!(f.value.unwrap().value, r"a\nb");
    }

    #[test]
    fn raw_value_keeps_escaped_parens() {
        let f = filter(r"content:foo\(bar\)");
        let value = f.value.unwrap();
        assert!(!value.quoted);
        assert_eq!(value.value, r"foo\(bar\)");
    }

    #[test]
    fn raw_value_stops_at_unescaped_paren() {
        let tokens = scan("repo:foo(bar").unwrap();
        assert!(matches!(
            &tokens[0],
            Token::Filter(f) if f.value.as_ref().unwrap().value == "foo"
        ));
        assert!(matches!(&tokens[1], Token::OpeningParen { .. }));
    }

    #[test]
    fn unterminated_quote_fails_at_the_opening_quote() {
        let err = scan("a repo:\"foo").unwrap_err();
        assert_eq!(err.position, 7);
        assert!(err.message.contains("unterminated"));
    }

    #[test]
    fn empty_field_is_a_scan_error() {
        let err = scan(":foo").unwrap_err();
        assert_eq!(err.position, 0);
        assert!(err.message.contains("filter field"));

        let err = scan("a -:foo").unwrap_err();
        assert_eq!(err.position, 2);
    }

    #[test]
    fn unbalanced_parens_are_not_a_scan_error() {
        assert!(scan("(foo").is_ok());
        assert!(scan("foo)").is_ok());
        assert!(scan(")(").is_ok());
    }

    #[test]
    fn comment_runs_to_end_of_line() {
        let tokens = scan("// note\nfoo").unwrap();
        assert_eq!(
            tokens[0],
            Token::Comment {
                range: Range::new(0, 7),
                value: "// note".into(),
            }
        );
        assert!(matches!(&tokens[1], Token::Whitespace { .. }));
        assert!(matches!(&tokens[2], Token::Pattern { value, .. } if value == "foo"));
    }

    #[test]
    fn comment_at_end_of_input() {
        let tokens = scan("foo //done").unwrap();
        assert!(matches!(&tokens[2], Token::Comment { value, .. } if value == "//done"));
    }

    #[test]
    fn multibyte_input_scans_on_character_boundaries() {
        let tokens = scan("héllo wörld").unwrap();
        assert!(matches!(&tokens[0], Token::Pattern { value, .. } if value == "héllo"));
        assert!(matches!(&tokens[2], Token::Pattern { value, .. } if value == "wörld"));
        assert_tiles("héllo wörld");
    }

    #[test]
    fn ranges_tile_the_input() {
        for query in [
            "",
            "   ",
            "foo bar",
            "repo:foo file:bar.rs error",
            "(a or b) -repo:test",
            "repo:\"quoted value\" pattern",
            "// comment\nrepo:x",
            "repo: f:x -lang:rust",
            "a\tb\nc",
        ] {
            assert_tiles(query);
        }
    }

    #[test]
    fn mixed_query_token_kinds() {
        let tokens = scan("context:global (repo:a or repo:b) -file:test todo").unwrap();
        let kinds: Vec<&str> = tokens
            .iter()
            .map(|t| match t {
                Token::Whitespace { .. } => "ws",
                Token::OpeningParen { .. } => "(",
                Token::ClosingParen { .. } => ")",
                Token::Keyword { .. } => "kw",
                Token::Comment { .. } => "comment",
                Token::Pattern { .. } => "pattern",
                Token::Literal(_) => "literal",
                Token::Filter(_) => "filter",
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "filter", "ws", "(", "filter", "ws", "kw", "ws", "filter", ")", "ws", "filter",
                "ws", "pattern",
            ]
        );
    }
}
