//! Configuration for the OCR engine.

use crate::options::{Options, DEFAULT_LANGUAGE};

/// Default name of the Tesseract executable.
pub const DEFAULT_TESSERACT: &str = "tesseract";

/// OCR engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Recognition languages, in Tesseract naming.
    pub languages: Vec<String>,

    /// Keep runs of spaces between words instead of collapsing them.
    pub preserve_interword_spaces: bool,

    /// Engine executable, looked up on `PATH` when not absolute.
    pub executable: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            languages: vec![DEFAULT_LANGUAGE.to_string()],
            preserve_interword_spaces: true,
            executable: DEFAULT_TESSERACT.to_string(),
        }
    }

    /// Configuration carrying the languages chosen in the settings.
    pub fn from_options(options: &Options) -> Self {
        Self::new().with_languages(options.languages.clone())
    }

    /// Set recognition languages.
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    /// Keep interword spacing.
    pub fn with_preserve_interword_spaces(mut self, enable: bool) -> Self {
        self.preserve_interword_spaces = enable;
        self
    }

    /// Set the engine executable.
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Languages joined with `+` for Tesseract's `-l` flag.
    pub fn language_spec(&self) -> String {
        self.languages.join("+")
    }
}
