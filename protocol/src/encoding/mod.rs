//! # Typed Value Encoding
//!
//! A [`TypedValue`] is raw bytes plus the registry `(type, format)` they
//! belong to. It has two wire forms:
//!
//! - **text**: `sigil + base64(data) + suffix`, e.g. `@AbC…=.ed25519`
//! - **binary**: `[type_code, format_code] || data`
//!
//! Both directions go through a [`Registry`], so nothing here hardcodes a
//! sigil, a suffix or a code.

pub mod binary;
pub mod text;

pub use binary::{decode_binary, encode_binary};
pub use text::{decode_text, encode_text};

use crate::crypto::KeyError;
use crate::registry::{FormatRef, Registry, RegistryError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("{type_name}/{format} has no text form (no sigil and no suffix)")]
    NoTextForm { type_name: String, format: String },

    #[error("{type_name}/{format} carries {expected} bytes, got {got}")]
    DataLength {
        type_name: String,
        format: String,
        expected: usize,
        got: usize,
    },

    #[error("expected a {expected} value, got {got}")]
    UnexpectedType { expected: String, got: String },

    #[error("binary value too short: {0} bytes, need at least 2")]
    Truncated(usize),

    #[error("invalid base64 body: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Bytes tagged with the registry type and format they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedValue {
    pub type_name: String,
    pub format: String,
    pub data: Vec<u8>,
}

impl TypedValue {
    pub fn new(type_name: impl Into<String>, format: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            type_name: type_name.into(),
            format: format.into(),
            data,
        }
    }

    /// Resolve this value's `(type, format)` against `registry`.
    pub fn resolve<'r>(&self, registry: &'r Registry) -> Result<FormatRef<'r>, RegistryError> {
        registry.resolve(&self.type_name, &self.format)
    }

    fn from_parts(format: FormatRef<'_>, data: Vec<u8>) -> Self {
        Self::new(format.type_name(), format.format_name(), data)
    }
}

/// Reject payloads whose length disagrees with the format's `data_length`.
fn check_length(format: FormatRef<'_>, data: &[u8]) -> Result<(), CodecError> {
    match format.format.data_length {
        Some(expected) if expected != data.len() => Err(CodecError::DataLength {
            type_name: format.type_name().to_string(),
            format: format.format_name().to_string(),
            expected,
            got: data.len(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_uses_names() {
        let registry = Registry::builtin().unwrap();
        let value = TypedValue::new("blob", "classic", vec![0; 32]);
        assert_eq!(value.resolve(&registry).unwrap().codes(), (2, 0));
        let bogus = TypedValue::new("blob", "modern", vec![]);
        assert!(bogus.resolve(&registry).is_err());
    }

    #[test]
    fn length_check_only_applies_when_pinned() {
        let registry = Registry::builtin().unwrap();
        let feed = registry.resolve("feed", "classic").unwrap();
        assert!(check_length(feed, &[0; 32]).is_ok());
        assert!(matches!(
            check_length(feed, &[0; 31]),
            Err(CodecError::DataLength {
                expected: 32,
                got: 31,
                ..
            })
        ));
        let boxed = registry.resolve("encrypted", "box2").unwrap();
        assert!(check_length(boxed, &[0; 7]).is_ok());
    }
}
