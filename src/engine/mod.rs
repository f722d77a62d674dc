//! OCR engine integration.
//!
//! The recognition algorithm lives outside this crate. This module defines the
//! seam an engine plugs into ([`OcrEngine`]), the shared lazily-started engine
//! instance ([`EngineHolder`]), progress reporting, and a Tesseract-backed
//! implementation.

pub mod holder;
pub mod progress;
pub mod tesseract;

pub use holder::EngineHolder;
pub use progress::{Progress, STATUS_RECOGNIZING};
pub use tesseract::TesseractEngine;

use crate::error::Result;
use crate::intake::ImageInput;
use crate::recognition::RecognitionResult;

/// An OCR engine that turns an image into structured lines.
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in `image`.
    ///
    /// `progress` receives updates as recognition advances; engines that
    /// cannot measure progress report at least the start and the end.
    fn recognize(
        &self,
        image: &ImageInput,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<RecognitionResult>;

    /// Release engine resources. Called once when the engine is torn down.
    fn terminate(&self) {}
}
