//! Registry entry shapes, as they appear in the JSON data file.

use serde::{Deserialize, Serialize};

/// One value type (feed, message, blob, ...) and its formats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub name: String,
    pub code: u8,
    pub formats: Vec<Format>,
}

/// One concrete encoding of a type.
///
/// `sigil` and `suffix` together decide the text form. A format with neither
/// has no text form and only exists on the binary side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Format {
    #[serde(rename = "format")]
    pub name: String,
    pub code: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigil: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
    /// Expected payload length in bytes, when the format pins one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_length: Option<usize>,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>, code: u8, formats: Vec<Format>) -> Self {
        Self {
            name: name.into(),
            code,
            formats,
        }
    }
}

impl Format {
    pub fn new(name: impl Into<String>, code: u8) -> Self {
        Self {
            name: name.into(),
            code,
            sigil: None,
            suffix: None,
            data_length: None,
        }
    }

    pub fn with_sigil(mut self, sigil: char) -> Self {
        self.sigil = Some(sigil);
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    pub fn with_data_length(mut self, len: usize) -> Self {
        self.data_length = Some(len);
        self
    }

    /// Whether the format can be rendered as text at all.
    pub fn has_text_form(&self) -> bool {
        self.sigil.is_some() || self.suffix.is_some()
    }
}
