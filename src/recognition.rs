//! Structured OCR output.
//!
//! An OCR engine returns a strict three-level tree: blocks contain paragraphs,
//! paragraphs contain lines, and each line carries its recognized text and the
//! pixel rectangle it occupies in the source image.
//!
//! The JSON form matches what engines emit:
//!
//! ```text
//! { "blocks": [ { "paragraphs": [ { "lines": [ { "text": "...", "bbox": { "x0", "x1", "y0", "y1" } } ] } ] } ] }
//! ```
//!
//! Any extra fields (confidence, word lists, baselines) are ignored.

use crate::error::Result;
use crate::geometry::BoundingBox;
use serde::{Deserialize, Serialize};

/// A single recognized line of text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Recognized text. May end with one trailing `\n`.
    pub text: String,
    /// Where the line sits in the source image.
    pub bbox: BoundingBox,
}

impl Line {
    /// Create a line from text and bounding box.
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// An ordered run of lines.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Lines in engine order
    pub lines: Vec<Line>,
}

/// An ordered run of paragraphs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    /// Paragraphs in engine order
    pub paragraphs: Vec<Paragraph>,
}

/// Output of one recognition call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecognitionResult {
    /// Blocks in engine order
    pub blocks: Vec<Block>,
}

impl RecognitionResult {
    /// Parse a recognition result from its JSON form.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_indent::recognition::RecognitionResult;
    ///
    /// let json = r#"{"blocks":[{"paragraphs":[{"lines":[
    ///     {"text":"fn main() {\n","bbox":{"x0":0,"x1":110,"y0":0,"y1":12}}
    /// ]}]}]}"#;
    /// let result = RecognitionResult::from_json(json)?;
    /// assert_eq!(result.line_count(), 1);
    /// # Ok::<(), ocr_indent::Error>(())
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize to the JSON form accepted by [`RecognitionResult::from_json`].
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// All lines in traversal order: block, then paragraph, then line.
    ///
    /// The order is exactly the nesting order of the tree; lines are never
    /// reordered by position.
    pub fn lines(&self) -> impl Iterator<Item = &Line> + '_ {
        self.blocks
            .iter()
            .flat_map(|block| block.paragraphs.iter())
            .flat_map(|paragraph| paragraph.lines.iter())
    }

    /// Total number of lines across all blocks and paragraphs.
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// True when the result holds no lines at all.
    pub fn is_empty(&self) -> bool {
        self.lines().next().is_none()
    }

    /// Recognized text without any layout reconstruction.
    ///
    /// Each line contributes its text (one trailing newline removed) followed
    /// by a single `\n`.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in self.lines() {
            out.push_str(crate::layout::strip_trailing_newline(&line.text));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> Line {
        Line::new(text, BoundingBox::new(0.0, 0.0, 10.0, 10.0))
    }

    fn sample() -> RecognitionResult {
        RecognitionResult {
            blocks: vec![
                Block {
                    paragraphs: vec![
                        Paragraph {
                            lines: vec![line("a\n"), line("b\n")],
                        },
                        Paragraph {
                            lines: vec![line("c\n")],
                        },
                    ],
                },
                Block {
                    paragraphs: vec![Paragraph {
                        lines: vec![line("d")],
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_lines_follow_nesting_order() {
        let sample = sample();
        let texts: Vec<&str> = sample.lines().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a\n", "b\n", "c\n", "d"]);
    }

    #[test]
    fn test_line_count_and_empty() {
        assert_eq!(sample().line_count(), 4);
        assert!(!sample().is_empty());
        assert!(RecognitionResult::default().is_empty());

        let hollow = RecognitionResult {
            blocks: vec![Block {
                paragraphs: vec![Paragraph::default()],
            }],
        };
        assert!(hollow.is_empty());
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(sample().text(), "a\nb\nc\nd\n");
    }

    #[test]
    fn test_extra_engine_fields_ignored() {
        let json = r#"{
            "text": "hello\n",
            "confidence": 91.5,
            "blocks": [{
                "bbox": {"x0": 0, "x1": 50, "y0": 0, "y1": 10},
                "paragraphs": [{
                    "lines": [{
                        "text": "hello\n",
                        "confidence": 91.5,
                        "words": [],
                        "bbox": {"x0": 0, "x1": 50, "y0": 0, "y1": 10}
                    }]
                }]
            }]
        }"#;
        let result = RecognitionResult::from_json(json).unwrap();
        assert_eq!(result.line_count(), 1);
        assert_eq!(result.lines().next().unwrap().text, "hello\n");
    }

    #[test]
    fn test_json_roundtrip_keeps_tree() {
        let original = sample();
        let parsed = RecognitionResult::from_json(&original.to_json().unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_missing_bbox_is_rejected() {
        let json = r#"{"blocks":[{"paragraphs":[{"lines":[{"text":"x"}]}]}]}"#;
        assert!(RecognitionResult::from_json(json).is_err());
    }
}
