//! User-facing behaviour toggles.
//!
//! Options are persisted by name (see [`crate::storage::SettingsStore`]); the
//! names are the camelCase keys listed in [`OptionKey`]. Any key missing from
//! storage takes its default value.

use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    /// Tesseract traineddata names: `eng`, `chi_sim`, `deu_latf`, ...
    static ref RE_LANGUAGE: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").unwrap();
}

/// Default recognition language.
pub const DEFAULT_LANGUAGE: &str = "eng";

/// Behaviour settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Re-indent recognized text to follow the image layout.
    pub format_output: bool,
    /// Accept images from the upload button (file select).
    pub show_upload_button: bool,
    /// Accept images pasted from the clipboard.
    pub enable_direct_pasting: bool,
    /// Hand images to a hosted OCR service instead of the local engine.
    ///
    /// Stored for compatibility; no hosted service is wired up.
    #[serde(rename = "useThirdPartyOCR")]
    pub use_third_party_ocr: bool,
    /// Recognition languages, in Tesseract naming.
    pub languages: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            format_output: true,
            show_upload_button: true,
            enable_direct_pasting: true,
            use_third_party_ocr: false,
            languages: vec![DEFAULT_LANGUAGE.to_string()],
        }
    }
}

/// Names under which options are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionKey {
    /// `formatOutput`
    FormatOutput,
    /// `showUploadButton`
    ShowUploadButton,
    /// `enableDirectPasting`
    EnableDirectPasting,
    /// `useThirdPartyOCR`
    UseThirdPartyOcr,
    /// `languages`
    Languages,
}

impl OptionKey {
    /// Every option key, in settings-page order.
    pub const ALL: [OptionKey; 5] = [
        OptionKey::FormatOutput,
        OptionKey::ShowUploadButton,
        OptionKey::EnableDirectPasting,
        OptionKey::UseThirdPartyOcr,
        OptionKey::Languages,
    ];

    /// Storage name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKey::FormatOutput => "formatOutput",
            OptionKey::ShowUploadButton => "showUploadButton",
            OptionKey::EnableDirectPasting => "enableDirectPasting",
            OptionKey::UseThirdPartyOcr => "useThirdPartyOCR",
            OptionKey::Languages => "languages",
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        OptionKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::UnknownOption(s.to_string()))
    }
}

impl Options {
    /// Current value of an option in its stored JSON form.
    pub fn get(&self, key: OptionKey) -> Value {
        match key {
            OptionKey::FormatOutput => Value::Bool(self.format_output),
            OptionKey::ShowUploadButton => Value::Bool(self.show_upload_button),
            OptionKey::EnableDirectPasting => Value::Bool(self.enable_direct_pasting),
            OptionKey::UseThirdPartyOcr => Value::Bool(self.use_third_party_ocr),
            OptionKey::Languages => Value::from(self.languages.clone()),
        }
    }

    /// Set an option from its stored JSON form.
    ///
    /// On error the option keeps its previous value.
    pub fn apply_value(&mut self, key: OptionKey, value: &Value) -> Result<()> {
        match key {
            OptionKey::Languages => {
                let items = value.as_array().ok_or_else(|| invalid(key, "expected an array"))?;
                let mut languages = Vec::with_capacity(items.len());
                for item in items {
                    let name = item
                        .as_str()
                        .ok_or_else(|| invalid(key, "expected language names"))?;
                    languages.push(name.to_string());
                }
                self.languages = validate_languages(languages)?;
            },
            _ => {
                let flag = value.as_bool().ok_or_else(|| invalid(key, "expected a boolean"))?;
                if let Some(slot) = self.flag_mut(key) {
                    *slot = flag;
                }
            },
        }
        Ok(())
    }

    /// Set an option from user-typed text, as the settings command line does.
    ///
    /// Booleans accept `true/false`, `1/0`, `on/off` and `yes/no`.
    /// Languages accept `eng+deu` or `eng,deu`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ocr_indent::options::{OptionKey, Options};
    ///
    /// let mut options = Options::default();
    /// options.set(OptionKey::FormatOutput, "off")?;
    /// options.set(OptionKey::Languages, "eng+deu")?;
    /// assert!(!options.format_output);
    /// assert_eq!(options.language_spec(), "eng+deu");
    /// # Ok::<(), ocr_indent::Error>(())
    /// ```
    pub fn set(&mut self, key: OptionKey, raw: &str) -> Result<()> {
        match key {
            OptionKey::Languages => {
                let languages = raw
                    .split(['+', ','])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                self.languages = validate_languages(languages)?;
            },
            _ => {
                let flag = parse_flag(raw).ok_or_else(|| invalid(key, "expected a boolean"))?;
                if let Some(slot) = self.flag_mut(key) {
                    *slot = flag;
                }
            },
        }
        Ok(())
    }

    /// Languages joined with `+`, the form Tesseract's `-l` flag takes.
    pub fn language_spec(&self) -> String {
        self.languages.join("+")
    }

    fn flag_mut(&mut self, key: OptionKey) -> Option<&mut bool> {
        match key {
            OptionKey::FormatOutput => Some(&mut self.format_output),
            OptionKey::ShowUploadButton => Some(&mut self.show_upload_button),
            OptionKey::EnableDirectPasting => Some(&mut self.enable_direct_pasting),
            OptionKey::UseThirdPartyOcr => Some(&mut self.use_third_party_ocr),
            OptionKey::Languages => None,
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

fn validate_languages(languages: Vec<String>) -> Result<Vec<String>> {
    if languages.is_empty() {
        return Err(invalid(OptionKey::Languages, "at least one language is required"));
    }
    if let Some(bad) = languages.iter().find(|l| !RE_LANGUAGE.is_match(l)) {
        return Err(invalid(OptionKey::Languages, &format!("'{}' is not a language name", bad)));
    }
    Ok(languages)
}

fn invalid(key: OptionKey, reason: &str) -> Error {
    Error::InvalidOptionValue {
        key: key.as_str().to_string(),
        reason: reason.to_string(),
    }
}
