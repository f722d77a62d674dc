//! Output converters for recognition results.
//!
//! This module turns a [`RecognitionResult`] into the text that ends up in the
//! input buffer:
//! - **Indented text**: leading spaces follow each line's position in the image
//! - **Plain text**: the engine's text as-is
//!
//! # Examples
//!
//! ```
//! use ocr_indent::converters::converter_for;
//! use ocr_indent::options::Options;
//! use ocr_indent::recognition::RecognitionResult;
//!
//! let options = Options::default();
//! let converter = converter_for(&options);
//! assert_eq!(converter.name(), "indented");
//! assert_eq!(converter.convert(&RecognitionResult::default()), "");
//! ```

use crate::layout;
use crate::options::Options;
use crate::recognition::RecognitionResult;

/// Trait for turning a recognition result into output text.
pub trait OutputConverter: Send + Sync {
    /// Convert a recognition result to text.
    fn convert(&self, result: &RecognitionResult) -> String;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

/// Reconstructs indentation from line bounding boxes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndentedTextConverter;

impl IndentedTextConverter {
    /// Create a new indented-text converter.
    pub fn new() -> Self {
        Self
    }
}

impl OutputConverter for IndentedTextConverter {
    fn convert(&self, result: &RecognitionResult) -> String {
        layout::reconstruct(result)
    }

    fn name(&self) -> &'static str {
        "indented"
    }
}

/// Emits recognized lines without added indentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextConverter;

impl PlainTextConverter {
    /// Create a new plain-text converter.
    pub fn new() -> Self {
        Self
    }
}

impl OutputConverter for PlainTextConverter {
    fn convert(&self, result: &RecognitionResult) -> String {
        result.text()
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}

/// Pick the converter matching the `formatOutput` setting.
pub fn converter_for(options: &Options) -> Box<dyn OutputConverter> {
    if options.format_output {
        Box::new(IndentedTextConverter::new())
    } else {
        Box::new(PlainTextConverter::new())
    }
}
