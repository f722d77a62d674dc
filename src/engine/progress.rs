//! Engine progress reporting.

/// Status string reported while the engine is recognizing.
pub const STATUS_RECOGNIZING: &str = "recognizing text";

/// A progress update from the OCR engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Engine phase, e.g. `"recognizing text"`
    pub status: String,
    /// Completion in `0.0..=1.0`
    pub progress: f32,
}

impl Progress {
    /// Create a progress update. `progress` is clamped to `0.0..=1.0`.
    pub fn new(status: impl Into<String>, progress: f32) -> Self {
        Self {
            status: status.into(),
            progress: if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) },
        }
    }

    /// Completion as a rounded whole percentage.
    pub fn percent(&self) -> u8 {
        (self.progress * 100.0).round() as u8
    }

    /// Whether the engine reports completion.
    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    /// Human-readable progress text.
    ///
    /// ```
    /// use ocr_indent::engine::Progress;
    ///
    /// assert_eq!(Progress::new("recognizing text", 0.426).label(), "43% - recognizing text");
    /// assert_eq!(Progress::new("recognizing text", 1.0).label(), "Finished");
    /// ```
    pub fn label(&self) -> String {
        if self.is_finished() {
            "Finished".to_string()
        } else {
            format!("{}% - {}", self.percent(), self.status)
        }
    }
}
