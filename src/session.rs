//! Image-to-text flow: take an image in, recognize it, append the text.
//!
//! ```text
//! ImageInput (file select / paste / drop)
//!     ↓  gated by Options
//! EngineHolder ── lazily starts the engine once
//!     ↓
//! OcrEngine::recognize → RecognitionResult
//!     ↓
//! OutputConverter (indented or plain)
//!     ↓
//! TextBuffer::append
//! ```

use crate::config::EngineConfig;
use crate::converters::converter_for;
use crate::engine::{EngineHolder, OcrEngine, Progress, TesseractEngine};
use crate::error::{Error, Result};
use crate::intake::{ImageInput, ImageSource};
use crate::options::Options;
use std::sync::Arc;

/// Text being composed, with a cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    value: String,
    cursor: usize,
}

impl TextBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a buffer holding `text`, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let value = text.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// Current contents.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Cursor position as a byte offset into [`TextBuffer::value`].
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Append text and move the cursor to the end.
    pub fn append(&mut self, text: &str) {
        self.value.push_str(text);
        self.cursor = self.value.len();
    }
}

/// Builds an engine from the current options.
pub type EngineFactory<E> = Box<dyn Fn(&Options) -> Result<E> + Send + Sync>;

/// Runs images through OCR and into a text buffer.
pub struct ImageToText<E> {
    options: Options,
    holder: EngineHolder<E>,
    factory: EngineFactory<E>,
}

impl ImageToText<TesseractEngine> {
    /// Session backed by the Tesseract executable found on `PATH`.
    pub fn with_tesseract(options: Options) -> Self {
        Self::new(options, |options| {
            TesseractEngine::initialize(EngineConfig::from_options(options))
        })
    }
}

impl<E: OcrEngine> ImageToText<E> {
    /// Create a session. The engine is not started until the first image.
    pub fn new<F>(options: Options, factory: F) -> Self
    where
        F: Fn(&Options) -> Result<E> + Send + Sync + 'static,
    {
        Self {
            options,
            holder: EngineHolder::new(),
            factory: Box::new(factory),
        }
    }

    /// Active options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Whether images from `source` are accepted under the current options.
    pub fn accepts(&self, source: ImageSource) -> bool {
        match source {
            ImageSource::Paste => self.options.enable_direct_pasting,
            ImageSource::FileSelect => self.options.show_upload_button,
            ImageSource::Drop => true,
        }
    }

    /// The shared engine, started on first use.
    pub fn engine(&self) -> Result<Arc<E>> {
        self.holder.get_or_init(|| (self.factory)(&self.options))
    }

    /// Recognize `input` and return the converted text.
    pub fn recognize_text(
        &self,
        input: &ImageInput,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<String> {
        if !self.accepts(input.source) {
            return Err(Error::SourceDisabled(input.source));
        }

        let engine = self.engine()?;
        let mut report = |update: Progress| {
            log::debug!("OCR progress: {}", update.label());
            progress(update);
        };
        let result = engine.recognize(input, &mut report)?;

        let converter = converter_for(&self.options);
        log::debug!(
            "Converting {} lines with {} converter",
            result.line_count(),
            converter.name()
        );
        Ok(converter.convert(&result))
    }

    /// Recognize `input` and append the text to `buffer`.
    ///
    /// Returns the appended text. On error the buffer is left unchanged.
    pub fn handle(
        &self,
        input: &ImageInput,
        buffer: &mut TextBuffer,
        progress: &mut dyn FnMut(Progress),
    ) -> Result<String> {
        match self.recognize_text(input, progress) {
            Ok(text) => {
                buffer.append(&text);
                Ok(text)
            },
            Err(e) => {
                log::error!("Failed to extract text from {} image: {}", input.source, e);
                Err(e)
            },
        }
    }

    /// Tear down the engine. Returns false when none was running.
    pub fn shutdown(&self) -> bool {
        self.holder.terminate()
    }
}
