//! Layout-preserving text reconstruction.
//!
//! Turns the horizontal position of each OCR line into leading spaces so that
//! code and tabular text pulled out of a screenshot keeps its indentation.
//!
//! The column estimate assumes every glyph on a line has the same width and
//! that column 0 starts at pixel 0 of the image:
//!
//! ```text
//! avg_char_width = (x1 - x0) / non_space_chars
//! leading_spaces = floor(x0 / avg_char_width)
//! ```
//!
//! This suits monospaced source code and is not corrected
//! for proportional fonts or skewed boxes.

use crate::recognition::{Line, RecognitionResult};

/// Rebuild the text of a recognition result with layout indentation.
///
/// Lines are emitted in traversal order (block, paragraph, line). Every line
/// contributes exactly one `\n`-terminated segment, so an empty result yields
/// an empty string.
///
/// # Examples
///
/// ```
/// use ocr_indent::geometry::BoundingBox;
/// use ocr_indent::layout::reconstruct;
/// use ocr_indent::recognition::{Block, Line, Paragraph, RecognitionResult};
///
/// let result = RecognitionResult {
///     blocks: vec![Block {
///         paragraphs: vec![Paragraph {
///             lines: vec![Line::new("abc", BoundingBox::new(10.0, 0.0, 40.0, 10.0))],
///         }],
///     }],
/// };
/// assert_eq!(reconstruct(&result), " abc\n");
/// assert_eq!(reconstruct(&RecognitionResult::default()), "");
/// ```
pub fn reconstruct(result: &RecognitionResult) -> String {
    let mut out = String::new();
    for line in result.lines() {
        push_indented_line(&mut out, line);
    }
    out
}

/// Indent a single line and terminate it with `\n`.
pub fn indent_line(line: &Line) -> String {
    let mut out = String::new();
    push_indented_line(&mut out, line);
    out
}

fn push_indented_line(out: &mut String, line: &Line) {
    let text = strip_trailing_newline(&line.text);
    let avg = average_char_width(line.bbox.width(), count_non_space(text));
    let spaces = leading_spaces(line.bbox.x0, avg);

    out.reserve(spaces + text.len() + 1);
    out.extend(std::iter::repeat(' ').take(spaces));
    out.push_str(text);
    out.push('\n');
}

/// Remove one trailing `\n`, if present. Further newlines are kept.
///
/// ```
/// use ocr_indent::layout::strip_trailing_newline;
///
/// assert_eq!(strip_trailing_newline("hi\n"), "hi");
/// assert_eq!(strip_trailing_newline("hi\n\n"), "hi\n");
/// assert_eq!(strip_trailing_newline("hi"), "hi");
/// ```
pub fn strip_trailing_newline(text: &str) -> &str {
    text.strip_suffix('\n').unwrap_or(text)
}

/// Number of characters that are not whitespace.
pub fn count_non_space(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

/// Average glyph width of a line, or 0 for lines with no visible characters.
pub fn average_char_width(box_width: f64, non_space_chars: usize) -> f64 {
    if non_space_chars > 0 {
        box_width / non_space_chars as f64
    } else {
        0.0
    }
}

/// Estimated column of a line's left edge.
///
/// Zero whenever the character width is not positive (blank lines and
/// degenerate boxes) or the left edge lies left of the image origin.
pub fn leading_spaces(x0: f64, avg_char_width: f64) -> usize {
    if avg_char_width > 0.0 {
        // NaN and negative quotients both saturate to 0
        (x0 / avg_char_width).floor().max(0.0) as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;
    use crate::recognition::{Block, Paragraph};

    fn single(text: &str, x0: f64, x1: f64) -> RecognitionResult {
        RecognitionResult {
            blocks: vec![Block {
                paragraphs: vec![Paragraph {
                    lines: vec![Line::new(text, BoundingBox::new(x0, 0.0, x1, 10.0))],
                }],
            }],
        }
    }

    #[test]
    fn test_empty_result() {
        assert_eq!(reconstruct(&RecognitionResult::default()), "");
    }

    #[test]
    fn test_basic_indentation() {
        // 3 visible chars over 30px -> 10px each, x0=10 -> 1 column
        assert_eq!(reconstruct(&single("abc", 10.0, 40.0)), " abc\n");
    }

    #[test]
    fn test_whitespace_only_line_keeps_text() {
        assert_eq!(reconstruct(&single("  ", 100.0, 140.0)), "  \n");
    }

    #[test]
    fn test_empty_line() {
        assert_eq!(reconstruct(&single("", 100.0, 140.0)), "\n");
    }

    #[test]
    fn test_single_trailing_newline_stripped() {
        let out = reconstruct(&single("hi\n", 0.0, 20.0));
        assert_eq!(out, "hi\n");
        assert_eq!(out.matches('\n').count(), 1);
    }

    #[test]
    fn test_only_one_newline_stripped() {
        // second newline survives as part of the text
        assert_eq!(reconstruct(&single("hi\n\n", 0.0, 20.0)), "hi\n\n");
    }

    #[test]
    fn test_interior_spaces_not_counted() {
        // "a b" has 2 visible chars over 20px -> 10px, x0=40 -> 4 columns
        assert_eq!(reconstruct(&single("a b", 40.0, 60.0)), "    a b\n");
    }

    #[test]
    fn test_tabs_are_whitespace() {
        assert_eq!(count_non_space("\tx\ty "), 2);
    }

    #[test]
    fn test_floor_not_round() {
        // 2 chars over 20px -> 10px, x0=19 -> 1.9 -> 1
        assert_eq!(reconstruct(&single("ab", 19.0, 39.0)), " ab\n");
    }

    #[test]
    fn test_zero_width_box() {
        assert_eq!(reconstruct(&single("abc", 50.0, 50.0)), "abc\n");
    }

    #[test]
    fn test_inverted_box() {
        assert_eq!(reconstruct(&single("abc", 50.0, 20.0)), "abc\n");
    }

    #[test]
    fn test_negative_left_edge_clamped() {
        assert_eq!(leading_spaces(-25.0, 10.0), 0);
    }

    #[test]
    fn test_unicode_counts_chars_not_bytes() {
        // 2 chars (4 bytes each) over 20px -> 10px, x0=30 -> 3 columns
        assert_eq!(count_non_space("😀😀"), 2);
        assert_eq!(reconstruct(&single("😀😀", 30.0, 50.0)), "   😀😀\n");
    }

    #[test]
    fn test_average_char_width() {
        assert_eq!(average_char_width(30.0, 3), 10.0);
        assert_eq!(average_char_width(30.0, 0), 0.0);
        assert_eq!(average_char_width(-30.0, 3), -10.0);
    }

    #[test]
    fn test_indent_line_matches_reconstruct() {
        let line = Line::new("x = 1\n", BoundingBox::new(24.0, 0.0, 54.0, 10.0));
        assert_eq!(indent_line(&line), "  x = 1\n");
    }

    #[test]
    fn test_code_snippet() {
        let lines = vec![
            Line::new("def f(x):\n", BoundingBox::new(0.0, 0.0, 80.0, 12.0)),
            Line::new("return x\n", BoundingBox::new(40.0, 14.0, 110.0, 26.0)),
        ];
        let result = RecognitionResult {
            blocks: vec![Block {
                paragraphs: vec![Paragraph { lines }],
            }],
        };
        // first line: 8 chars/80px -> 10px, x0=0; second: 7 chars/70px -> 10px, x0=40
        assert_eq!(reconstruct(&result), "def f(x):\n    return x\n");
    }
}
