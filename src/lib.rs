//! # OCR Indent
//!
//! Screenshot-to-text with layout: recognize an image with an OCR engine and
//! rebuild the text so each line's leading spaces follow where it sat in the
//! image. Code and tables pulled out of a screenshot keep their indentation.
//!
//! ## Core Features
//!
//! - **Layout Reconstruction**: bounding-box positions mapped to leading spaces
//! - **Tesseract Engine**: TSV output parsed into the block/paragraph/line tree
//! - **Shared Engine**: started lazily, one initialization in flight at a time
//! - **Image Intake**: file select, clipboard paste and drop, sniffed by signature
//! - **Persistent Settings**: output formatting, input toggles and languages
//!
//! ## Architecture
//!
//! ```text
//! ImageInput → OcrEngine → RecognitionResult → OutputConverter → TextBuffer
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use ocr_indent::engine::Progress;
//! use ocr_indent::intake::ImageInput;
//! use ocr_indent::session::{ImageToText, TextBuffer};
//! use ocr_indent::storage::{default_settings_path, SettingsStore};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let options = SettingsStore::open(default_settings_path())?.load_options();
//! let session = ImageToText::with_tesseract(options);
//!
//! let mut buffer = TextBuffer::new();
//! let image = ImageInput::from_path("screenshot.png")?;
//! session.handle(&image, &mut buffer, &mut |p: Progress| eprintln!("{}", p.label()))?;
//! print!("{}", buffer.value());
//! # Ok(())
//! # }
//! ```
//!
//! Reconstruction alone needs no engine:
//!
//! ```
//! use ocr_indent::layout::reconstruct;
//! use ocr_indent::recognition::RecognitionResult;
//!
//! let json = r#"{"blocks":[{"paragraphs":[{"lines":[
//!     {"text":"if ok:\n","bbox":{"x0":0,"x1":50,"y0":0,"y1":10}},
//!     {"text":"run()\n","bbox":{"x0":40,"x1":90,"y0":12,"y1":22}}
//! ]}]}]}"#;
//! let result = RecognitionResult::from_json(json)?;
//! assert_eq!(reconstruct(&result), "if ok:\n    run()\n");
//! # Ok::<(), ocr_indent::Error>(())
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// OCR output model
pub mod geometry;
pub mod recognition;

// Layout reconstruction
pub mod layout;

// Output converters
pub mod converters;

// Configuration and settings
pub mod config;
pub mod options;
pub mod storage;

// OCR engine integration
pub mod engine;

// Image intake and the end-to-end flow
pub mod intake;
pub mod session;

// Re-exports
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use layout::reconstruct;
pub use options::{OptionKey, Options};
pub use recognition::{Block, Line, Paragraph, RecognitionResult};
pub use session::{ImageToText, TextBuffer};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
