//! Layout reconstruction for OCR output.
//!
//! - Leading-space indentation estimated from line bounding boxes

pub mod indentation;

// Re-export main functions
pub use indentation::{
    average_char_width, count_non_space, indent_line, leading_spaces, reconstruct,
    strip_trailing_newline,
};
