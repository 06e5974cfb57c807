//! Brace-depth routine isolation shared by the registration and defaults
//! extractors.
//!
//! A lazy regex over the whole file stops at the first `}` it sees, which cuts
//! a routine short as soon as it contains an `if` or a loop. Instead the
//! opener regex only locates the routine header (ending at its `{`) and the
//! body is found by counting braces from there. Braces inside string/char
//! literals and comments do not count.

use regex::{Captures, Regex};

/// Body of the first routine whose header matches `opener`.
///
/// `opener` must end with the opening `{` of the body. The returned slice
/// excludes the outer braces. `None` when the header is missing or its braces
/// never balance.
pub fn extract_body<'c>(content: &'c str, opener: &Regex) -> Option<&'c str> {
    let header = opener.find(content)?;
    let start = header.end();
    let end = matching_brace(content.as_bytes(), start)?;
    Some(&content[start..end])
}

/// Run `pattern` over the body located by `opener`, mapping each match through
/// `map`. An absent body gives an empty result.
pub fn scan_body<T>(
    content: &str,
    opener: &Regex,
    pattern: &Regex,
    mut map: impl FnMut(&Captures<'_>) -> Option<T>,
) -> Vec<T> {
    match extract_body(content, opener) {
        Some(body) => pattern.captures_iter(body).filter_map(|c| map(&c)).collect(),
        None => Vec::new(),
    }
}

/// Index of the `}` closing a block whose `{` sits just before `start`.
fn matching_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let len = bytes.len();
    let mut depth = 1usize;
    let mut i = start;

    while i < len {
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            b'"' | b'\'' => {
                // Skip string literals
                let quote = bytes[i];
                i += 1;
                while i < len && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1; // Skip escaped character
                    }
                    i += 1;
                }
            }
            b'/' if i + 1 < len && bytes[i + 1] == b'/' => {
                while i < len && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if i + 1 < len && bytes[i + 1] == b'*' => {
                i += 2;
                while i + 1 < len && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                    i += 1;
                }
                i += 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}
