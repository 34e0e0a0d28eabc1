//! Placeholder name normalization
//!
//! Turns the source text of a value (`ex?.Message?.Length`, `_text`,
//! `this.GetType().FullName`) into the PascalCase identifier used as its
//! message template placeholder (`ExMessageLength`, `Text`,
//! `GetTypeFullName`).

use crate::error::NormalizeError;

/// Normalize `raw` into a PascalCase placeholder name.
///
/// Surrounding whitespace, leading `{`, `@` and `_`, and trailing `}` are
/// trimmed first. The first letter and every letter following `.` or `@`
/// is uppercased. Member separators, `?`, `@`, every `this.`/`This.`,
/// and bracketed or parenthesized groups are dropped.
///
/// # Errors
///
/// Returns [`NormalizeError::Empty`] when nothing is left after trimming,
/// or when every remaining character is dropped.
///
/// # Example
///
/// ```
/// use logfix::normalize;
///
/// assert_eq!(normalize("ex?.Message?.Length").unwrap(), "ExMessageLength");
/// assert_eq!(normalize("@int").unwrap(), "Int");
/// ```
pub fn normalize(raw: &str) -> Result<String, NormalizeError> {
    let trimmed = raw
        .trim()
        .trim_start_matches('{')
        .trim_start_matches('@')
        .trim_start_matches('_')
        .trim_end_matches('}')
        .trim();

    if trimmed.is_empty() {
        return Err(NormalizeError::Empty {
            input: raw.to_string(),
        });
    }

    let mut name = String::with_capacity(trimmed.len());
    let mut upper_next = true;
    let mut pos = 0;

    while let Some(c) = trimmed[pos..].chars().next() {
        let rest = &trimmed[pos..];

        if rest.starts_with("this.") || rest.starts_with("This.") {
            pos += "this.".len();
            upper_next = true;
            continue;
        }

        match c {
            '(' | '[' => {
                pos += skip_group(rest);
            }
            '.' | '@' => {
                pos += 1;
                upper_next = true;
            }
            '?' => pos += 1,
            _ => {
                if upper_next && c.is_alphabetic() {
                    name.extend(c.to_uppercase());
                } else {
                    name.push(c);
                }
                upper_next = false;
                pos += c.len_utf8();
            }
        }
    }

    if name.is_empty() {
        return Err(NormalizeError::Empty {
            input: raw.to_string(),
        });
    }
    Ok(name)
}

/// Byte length of the balanced `(...)` or `[...]` group at the start of
/// `text`, or the rest of the text when the group never closes.
fn skip_group(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    i += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' => quote = Some(b),
                b'(' | b'[' => depth += 1,
                b')' | b']' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return i + 1;
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    bytes.len()
}
