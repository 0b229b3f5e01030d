//! Text form: `sigil + base64(data) + suffix`.
//!
//! Decoding reads the leading character first. If it is a registered sigil,
//! the format is picked among that sigil's formats by the longest suffix the
//! text ends with. Otherwise, or if no sigil format matches, the text is
//! matched against sigil-less formats, again by longest suffix, so `.box2`
//! wins over `.box`.

use crate::encoding::{check_length, CodecError, TypedValue};
use crate::registry::{FormatRef, Lookup, Registry, RegistryError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

pub fn encode_text(registry: &Registry, value: &TypedValue) -> Result<String, CodecError> {
    let format = value.resolve(registry)?;
    if !format.format.has_text_form() {
        return Err(CodecError::NoTextForm {
            type_name: value.type_name.clone(),
            format: value.format.clone(),
        });
    }
    check_length(format, &value.data)?;

    let mut out = String::new();
    if let Some(sigil) = format.format.sigil {
        out.push(sigil);
    }
    out.push_str(&BASE64.encode(&value.data));
    if let Some(suffix) = &format.format.suffix {
        out.push_str(suffix);
    }
    Ok(out)
}

pub fn decode_text(registry: &Registry, text: &str) -> Result<TypedValue, CodecError> {
    let (format, body) = match classify_sigil_prefixed(registry, text) {
        Some(Ok(found)) => found,
        // Sigils can be base64 characters too. Retry as sigil-less text and
        // report the sigil miss if that fails as well.
        Some(Err(sigil_miss)) => classify_sigilless(registry, text).map_err(|_| sigil_miss)?,
        None => classify_sigilless(registry, text)?,
    };

    let data = BASE64.decode(body)?;
    check_length(format, &data)?;
    Ok(TypedValue::new(format.type_name(), format.format_name(), data))
}

/// `None` when the text does not start with a registered sigil.
fn classify_sigil_prefixed<'r, 't>(
    registry: &'r Registry,
    text: &'t str,
) -> Option<Result<(FormatRef<'r>, &'t str), RegistryError>> {
    let sigil = text.chars().next()?;
    registry.classify_by_sigil(sigil).ok()?;
    let rest = &text[sigil.len_utf8()..];
    let suffix = longest_suffix(registry.formats_with_sigil(sigil), rest);
    Some(
        registry
            .classify_by_sigil_and_suffix(sigil, suffix)
            .map(|format| (format, strip(rest, suffix))),
    )
}

fn classify_sigilless<'r, 't>(
    registry: &'r Registry,
    text: &'t str,
) -> Result<(FormatRef<'r>, &'t str), RegistryError> {
    let suffix = longest_suffix(registry.sigilless_suffixed(), text).ok_or_else(|| {
        RegistryError::NotFound(Lookup::Suffix(trailing_segment(text).to_string()))
    })?;
    let format = registry.classify_by_suffix(suffix)?;
    Ok((format, strip(text, Some(suffix))))
}

/// The longest suffix among `candidates` that `text` ends with.
fn longest_suffix<'r>(
    candidates: impl Iterator<Item = FormatRef<'r>>,
    text: &str,
) -> Option<&'r str> {
    candidates
        .filter_map(|r| r.format.suffix.as_deref())
        .filter(|suffix| text.ends_with(suffix))
        .max_by_key(|suffix| suffix.len())
}

fn strip<'t>(text: &'t str, suffix: Option<&str>) -> &'t str {
    suffix
        .and_then(|s| text.strip_suffix(s))
        .unwrap_or(text)
}

/// Best-effort guess at the suffix for error reporting.
fn trailing_segment(text: &str) -> &str {
    text.rfind('.').map_or("", |i| &text[i..])
}
