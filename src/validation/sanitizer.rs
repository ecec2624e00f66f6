//! Free-text sanitization.
//!
//! Sanitization is a fixed sequence of passes. Markup is removed with
//! `regex` replacements, which run in time linear in the input. Unsafe
//! characters, `javascript:` and inline event handlers are then removed in
//! a single streaming pass that re-checks the tail of its output, so text
//! joined by a removal is caught too. The whole pipeline stays linear even
//! on adversarial megabyte-sized input.

use crate::domain::FieldInput;
use once_cell::sync::Lazy;
use regex::Regex;

/// Default maximum length, in characters.
pub const DEFAULT_MAX_LENGTH: usize = 200;

static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("Failed to compile script regex")
});

static STYLE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<style\b[^>]*>.*?</style\s*>").expect("Failed to compile style regex")
});

static HTML_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("Failed to compile HTML tag regex"));

const JS_SCHEME: &str = "javascript:";

/// Sanitize a raw field. Non-text input yields an empty string.
pub fn sanitize(input: &FieldInput, max_length: usize) -> String {
    match input {
        FieldInput::Text(text) => sanitize_str(text, max_length),
        FieldInput::Other => String::new(),
    }
}

/// Sanitize a string.
///
/// Passes, in order:
/// 1. drop `<script>` and `<style>` elements with their content
/// 2. drop any remaining tags
/// 3. drop `<`, `>`, `"` and `'`, the `javascript:` scheme and inline
///    event handlers (`onclick=` and friends), until none is left
/// 4. trim, then truncate to `max_length` characters
pub fn sanitize_str(input: &str, max_length: usize) -> String {
    let text = SCRIPT_RE.replace_all(input, "");
    let text = STYLE_RE.replace_all(&text, "");
    let text = HTML_TAG_RE.replace_all(&text, "");

    let text = strip_active_content(&text);

    text.trim().chars().take(max_length).collect()
}

/// Per-character state of the output buffer, valid for the prefix ending
/// at that character.
#[derive(Clone, Copy, Default)]
struct Mark {
    /// Start of the word run ending here
    word_start: Option<usize>,
    /// Leftmost `on` in that run followed by at least one word character
    on_start: Option<usize>,
    /// Start of an `on\w+\s*` suffix ending here; a following `=` removes it
    handler_start: Option<usize>,
}

/// Drop unsafe characters, `javascript:` and `on\w+\s*=` in one pass.
///
/// A match is removed as soon as its last character is pushed, and a
/// truncated buffer is a prefix of a clean one, so the output never
/// contains a match even when a removal joins its neighbours into one.
fn strip_active_content(text: &str) -> String {
    let scheme: Vec<char> = JS_SCHEME.chars().collect();
    let mut out: Vec<char> = Vec::with_capacity(text.len());
    let mut marks: Vec<Mark> = Vec::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '<' | '>' | '"' | '\'') {
            continue;
        }

        if c == '=' {
            if let Some(start) = marks.last().and_then(|m| m.handler_start) {
                out.truncate(start);
                marks.truncate(start);
                continue;
            }
        }

        let i = out.len();
        let prev = marks.last().copied().unwrap_or_default();
        out.push(c);

        if c == ':' && out.len() >= scheme.len() {
            let tail = &out[out.len() - scheme.len()..];
            if tail.iter().zip(&scheme).all(|(a, b)| a.eq_ignore_ascii_case(b)) {
                let start = out.len() - scheme.len();
                out.truncate(start);
                marks.truncate(start);
                continue;
            }
        }

        let mark = if is_word(c) {
            let word_start = prev.word_start.unwrap_or(i);
            let on_start = prev.on_start.or_else(|| {
                (i >= word_start + 2
                    && out[i - 2].eq_ignore_ascii_case(&'o')
                    && out[i - 1].eq_ignore_ascii_case(&'n'))
                .then(|| i - 2)
            });
            Mark {
                word_start: Some(word_start),
                on_start,
                handler_start: on_start,
            }
        } else if c.is_whitespace() {
            Mark {
                handler_start: prev.handler_start,
                ..Mark::default()
            }
        } else {
            Mark::default()
        };
        marks.push(mark);
    }

    out.into_iter().collect()
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
