use crate::error::{Error, Result};
use crate::indent;
use crate::options::ParseOptions;

// ── LineKind ──────────────────────────────────────────────────────────────

/// What a line introduces, decided once from its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Key starts with an upper-case letter: `Button:`
    Widget,
    /// Anything else: `text: 'OK'`, `style:`, `_private: 1`
    Attribute,
}

impl LineKind {
    pub fn of(key: &str) -> Self {
        match key.chars().next() {
            Some(c) if c.is_uppercase() => Self::Widget,
            _ => Self::Attribute,
        }
    }
}

// ── SourceLine ────────────────────────────────────────────────────────────

/// One non-blank line, split into indentation, key, and value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'s> {
    /// 1-based line number in the original text, blank lines included.
    pub number: usize,
    /// Raw count of leading spaces.
    pub indent: usize,
    /// Nesting level after normalization; the root line is depth 0.
    pub depth: usize,
    pub kind: LineKind,
    pub key: &'s str,
    /// Value with surrounding spaces and quotes removed; empty for `key:`.
    pub value: &'s str,
    /// The line as written, for diagnostics.
    pub text: &'s str,
}

// ── Scanner ───────────────────────────────────────────────────────────────

/// Split `src` into decomposed, depth-annotated lines.
///
/// Empty and whitespace-only lines are dropped before anything else looks
/// at the input, so they never turn into blank attributes.
pub fn scan<'s>(src: &'s str, options: &ParseOptions) -> Result<Vec<SourceLine<'s>>> {
    let mut lines = src
        .lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .map(|(idx, text)| decompose(idx + 1, text))
        .collect::<Result<Vec<_>>>()?;
    indent::normalize(&mut lines, options.indent)?;
    Ok(lines)
}

/// Decompose a single line. `depth` is left at zero for [`indent::normalize`].
pub fn decompose(number: usize, text: &str) -> Result<SourceLine<'_>> {
    let body = text.trim_start_matches(' ');
    let indent = text.len() - body.len();

    if body.starts_with('\t') {
        return Err(Error::syntax(number, text, "tabs are not allowed in indentation"));
    }

    let key_len = body
        .char_indices()
        .find(|&(i, c)| !is_key_char(c, i == 0))
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    if key_len == 0 {
        return Err(Error::syntax(number, text, "expected a key"));
    }
    let key = &body[..key_len];

    let Some(rest) = body[key_len..].strip_prefix(':') else {
        return Err(Error::syntax(number, text, format!("expected ':' after {key:?}")));
    };

    if let Some(bad) = rest.chars().find(|&c| !is_value_char(c)) {
        return Err(Error::syntax(number, text, format!("unexpected character {bad:?} in value")));
    }

    let value = rest.trim_matches(' ').trim_matches('"').trim_matches('\'');

    Ok(SourceLine { number, indent, depth: 0, kind: LineKind::of(key), key, value, text })
}

/// `[A-Za-z_?]` first, `[A-Za-z0-9_?]` after.
fn is_key_char(c: char, first: bool) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '?' || (!first && c.is_ascii_digit())
}

/// Deliberately conservative: enough for words, numbers, quoted sentences,
/// URLs, and `key=value&...` strings.
fn is_value_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '_' | '-' | '?' | ' ' | '\'' | '"' | '=' | '.' | ':' | '/' | '&')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> SourceLine<'_> {
        decompose(1, text).unwrap()
    }

    fn reason(text: &str) -> String {
        match decompose(7, text).unwrap_err() {
            Error::Syntax { line, reason, .. } => {
                assert_eq!(line, 7);
                reason
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
    }

    #[test]
    fn widget_line() {
        let l = line("Box:");
        assert_eq!((l.indent, l.key, l.value, l.kind), (0, "Box", "", LineKind::Widget));
    }

    #[test]
    fn attribute_line_with_quoted_value() {
        let l = line("        text: 'Password is \"password\"'  ");
        assert_eq!(l.indent, 8);
        assert_eq!(l.kind, LineKind::Attribute);
        assert_eq!(l.key, "text");
        assert_eq!(l.value, "Password is \"password\"");
    }

    #[test]
    fn double_quotes_are_stripped_before_single() {
        assert_eq!(line("text: \"it's\"").value, "it's");
        assert_eq!(line("text: '\"hi\" there'").value, "\"hi\" there");
    }

    #[test]
    fn url_and_query_values() {
        let l = line("url: https://example.org/a?b=1&c=2.5");
        assert_eq!(l.value, "https://example.org/a?b=1&c=2.5");
    }

    #[test]
    fn underscore_and_question_keys_are_attributes() {
        assert_eq!(line("_hidden: 1").kind, LineKind::Attribute);
        assert_eq!(line("?maybe: 1").kind, LineKind::Attribute);
        assert_eq!(line("padding_left2: 1").key, "padding_left2");
    }

    #[test]
    fn no_space_needed_after_colon() {
        assert_eq!(line("id:box1").value, "box1");
    }

    #[test]
    fn err_missing_colon() {
        assert!(reason("Box").contains("expected ':'"));
        assert!(reason("text 'x'").contains("expected ':'"));
    }

    #[test]
    fn err_key_starting_with_digit() {
        assert_eq!(reason("1box: x"), "expected a key");
    }

    #[test]
    fn err_tab_indentation() {
        assert_eq!(reason("\tBox:"), "tabs are not allowed in indentation");
    }

    #[test]
    fn err_value_outside_character_class() {
        assert!(reason("color: #ff0000").contains("'#'"));
    }

    #[test]
    fn scan_drops_blank_lines_and_keeps_numbers() {
        let src = "\nBox:\n   \n    id: box1\n";
        let lines = scan(src, &ParseOptions::default()).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].number, lines[0].depth), (2, 0));
        assert_eq!((lines[1].number, lines[1].depth), (4, 1));
    }

    #[test]
    fn scan_tolerates_crlf() {
        let lines = scan("Box:\r\n    id: a\r\n", &ParseOptions::default()).unwrap();
        assert_eq!(lines[1].value, "a");
    }
}
