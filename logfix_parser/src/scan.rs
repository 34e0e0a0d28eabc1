//! Byte-level scanners for string literals and interpolation holes
//!
//! Shared by the lexer (to find where a string ends) and the parser (to
//! split an interpolated string into text runs and holes).

use std::ops::Range;

/// Failure while scanning a string body
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanError {
    /// No closing quote before end of input (or end of line for regular strings)
    Unterminated { at: usize },
    /// A hole with no expression, or one that never closes
    InvalidHole { start: usize, end: usize },
}

/// One interpolation hole: `{expression,alignment:format}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HoleRange {
    /// Offset of the opening `{` up to just past the closing `}`
    pub whole: Range<usize>,
    pub expression: Range<usize>,
    /// Includes the leading `,`
    pub alignment: Option<Range<usize>>,
    /// Includes the leading `:`
    pub format: Option<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum InterpolatedPart {
    Text(Range<usize>),
    Hole(HoleRange),
}

/// Scan a regular or verbatim string body starting just after the opening
/// quote. Returns the offset just past the closing quote.
pub(crate) fn scan_string(bytes: &[u8], start: usize, verbatim: bool) -> Result<usize, ScanError> {
    let mut pos = start;
    while pos < bytes.len() {
        let offset = if verbatim {
            memchr::memchr(b'"', &bytes[pos..])
        } else {
            memchr::memchr3(b'\\', b'"', b'\n', &bytes[pos..])
        };
        let Some(offset) = offset else {
            break;
        };
        pos += offset;
        match bytes[pos] {
            b'\\' => pos += 2,
            b'\n' => return Err(ScanError::Unterminated { at: pos }),
            _ if verbatim && bytes.get(pos + 1) == Some(&b'"') => pos += 2,
            _ => return Ok(pos + 1),
        }
    }
    Err(ScanError::Unterminated { at: bytes.len() })
}

/// Scan an interpolated string body starting just after `$"` (or `$@"`).
///
/// Text runs keep their raw bytes, doubled braces and escapes included.
/// Returns the offset just past the closing quote.
pub(crate) fn scan_interpolated(
    bytes: &[u8],
    start: usize,
    verbatim: bool,
    parts: &mut Vec<InterpolatedPart>,
) -> Result<usize, ScanError> {
    let mut pos = start;
    let mut text_start = start;

    while pos < bytes.len() {
        let next = bytes.get(pos + 1).copied();
        match bytes[pos] {
            b'\\' if !verbatim => pos += 2,
            b'\n' if !verbatim => return Err(ScanError::Unterminated { at: pos }),
            b'"' if verbatim && next == Some(b'"') => pos += 2,
            b'"' => {
                push_text(parts, text_start, pos);
                return Ok(pos + 1);
            }
            b'{' | b'}' if next == Some(bytes[pos]) => pos += 2,
            b'{' => {
                push_text(parts, text_start, pos);
                let hole = scan_hole(bytes, pos)?;
                pos = hole.whole.end;
                text_start = pos;
                parts.push(InterpolatedPart::Hole(hole));
            }
            _ => pos += 1,
        }
    }

    Err(ScanError::Unterminated { at: bytes.len() })
}

fn push_text(parts: &mut Vec<InterpolatedPart>, start: usize, end: usize) {
    if end > start {
        parts.push(InterpolatedPart::Text(start..end));
    }
}

/// Scan one hole starting at its opening `{`.
fn scan_hole(bytes: &[u8], open: usize) -> Result<HoleRange, ScanError> {
    let expression_start = open + 1;
    let mut pos = expression_start;
    let mut depth = 0usize;
    let mut expression_end = None;
    let mut alignment_start = None;

    while pos < bytes.len() {
        let next = bytes.get(pos + 1).copied();
        match bytes[pos] {
            b'"' => pos = skip_nested_string(bytes, pos + 1, false, false)?,
            b'@' if next == Some(b'"') => pos = skip_nested_string(bytes, pos + 2, true, false)?,
            b'$' if next == Some(b'"') => pos = skip_nested_string(bytes, pos + 2, false, true)?,
            b'$' | b'@'
                if matches!(next, Some(b'@') | Some(b'$'))
                    && bytes.get(pos + 2) == Some(&b'"') =>
            {
                pos = skip_nested_string(bytes, pos + 3, true, true)?
            }
            b'\'' => pos = skip_char_literal(bytes, pos + 1),
            b'(' | b'[' | b'{' => {
                depth += 1;
                pos += 1;
            }
            b')' | b']' => {
                depth = depth.saturating_sub(1);
                pos += 1;
            }
            b'}' if depth > 0 => {
                depth -= 1;
                pos += 1;
            }
            b'}' => {
                let expression_end = expression_end.unwrap_or(pos);
                return finish_hole(
                    bytes,
                    open,
                    expression_start..expression_end,
                    alignment_start.map(|s| s..pos),
                    None,
                    pos + 1,
                );
            }
            b',' if depth == 0 && alignment_start.is_none() => {
                expression_end = Some(pos);
                alignment_start = Some(pos);
                pos += 1;
            }
            b':' if depth == 0 && next == Some(b':') => pos += 2,
            b':' if depth == 0 => {
                let expression_end = expression_end.unwrap_or(pos);
                let alignment = alignment_start.map(|s| s..pos);
                let Some(close) = memchr::memchr(b'}', &bytes[pos..]).map(|o| pos + o) else {
                    break;
                };
                return finish_hole(
                    bytes,
                    open,
                    expression_start..expression_end,
                    alignment,
                    Some(pos..close),
                    close + 1,
                );
            }
            _ => pos += 1,
        }
    }

    Err(ScanError::InvalidHole {
        start: open,
        end: bytes.len(),
    })
}

fn finish_hole(
    bytes: &[u8],
    open: usize,
    expression: Range<usize>,
    alignment: Option<Range<usize>>,
    format: Option<Range<usize>>,
    end: usize,
) -> Result<HoleRange, ScanError> {
    if bytes[expression.clone()].iter().all(u8::is_ascii_whitespace) {
        return Err(ScanError::InvalidHole { start: open, end });
    }
    Ok(HoleRange {
        whole: open..end,
        expression,
        alignment,
        format,
    })
}

fn skip_nested_string(
    bytes: &[u8],
    start: usize,
    verbatim: bool,
    interpolated: bool,
) -> Result<usize, ScanError> {
    if interpolated {
        scan_interpolated(bytes, start, verbatim, &mut Vec::new())
    } else {
        scan_string(bytes, start, verbatim)
    }
}

fn skip_char_literal(bytes: &[u8], start: usize) -> usize {
    let mut pos = start;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'\'' => return pos + 1,
            _ => pos += 1,
        }
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpolated(source: &str) -> (usize, Vec<InterpolatedPart>) {
        let mut parts = Vec::new();
        let end = scan_interpolated(source.as_bytes(), 2, false, &mut parts).unwrap();
        (end, parts)
    }

    #[test]
    fn test_scan_regular_string_with_escapes() {
        let source = r#""a\"b\r\n" + x"#;
        assert_eq!(scan_string(source.as_bytes(), 1, false), Ok(10));
    }

    #[test]
    fn test_scan_verbatim_string_with_doubled_quotes() {
        let source = r#"@"a""b\" x"#;
        assert_eq!(scan_string(source.as_bytes(), 2, true), Ok(8));
    }

    #[test]
    fn test_regular_string_stops_at_newline() {
        let source = "\"abc\ndef\"";
        assert_eq!(
            scan_string(source.as_bytes(), 1, false),
            Err(ScanError::Unterminated { at: 4 })
        );
    }

    #[test]
    fn test_interpolated_text_and_holes() {
        let source = r#"$"Value: {ex.Message} - {{raw}}""#;
        let (end, parts) = interpolated(source);

        assert_eq!(end, source.len());
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], InterpolatedPart::Text(2..9));
        let InterpolatedPart::Hole(hole) = &parts[1] else {
            panic!("expected hole, got {:?}", parts[1]);
        };
        assert_eq!(&source[hole.expression.clone()], "ex.Message");
        assert_eq!(&source[hole.whole.clone()], "{ex.Message}");
        assert_eq!(parts[2], InterpolatedPart::Text(21..31));
    }

    #[test]
    fn test_hole_with_nested_string_and_format() {
        let source = r#"$"{1f.ToString("D2"),5:X4}""#;
        let (_, parts) = interpolated(source);

        let InterpolatedPart::Hole(hole) = &parts[0] else {
            panic!("expected hole");
        };
        assert_eq!(&source[hole.expression.clone()], r#"1f.ToString("D2")"#);
        assert_eq!(&source[hole.alignment.clone().unwrap()], ",5");
        assert_eq!(&source[hole.format.clone().unwrap()], ":X4");
    }

    #[test]
    fn test_hole_with_call_arguments_keeps_commas() {
        let source = r#"$"{Math.Max(a, b)}""#;
        let (_, parts) = interpolated(source);

        let InterpolatedPart::Hole(hole) = &parts[0] else {
            panic!("expected hole");
        };
        assert_eq!(&source[hole.expression.clone()], "Math.Max(a, b)");
        assert!(hole.alignment.is_none());
    }

    #[test]
    fn test_empty_hole_is_invalid() {
        let mut parts = Vec::new();
        let result = scan_interpolated(br#"$"{ }""#, 2, false, &mut parts);
        assert!(matches!(result, Err(ScanError::InvalidHole { .. })));
    }
}
