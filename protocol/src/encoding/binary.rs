//! Binary form: one byte of type code, one byte of format code, then data.

use crate::encoding::{check_length, CodecError, TypedValue};
use crate::registry::Registry;

pub fn encode_binary(registry: &Registry, value: &TypedValue) -> Result<Vec<u8>, CodecError> {
    let format = value.resolve(registry)?;
    check_length(format, &value.data)?;
    let (type_code, format_code) = format.codes();

    let mut out = Vec::with_capacity(2 + value.data.len());
    out.push(type_code);
    out.push(format_code);
    out.extend_from_slice(&value.data);
    Ok(out)
}

pub fn decode_binary(registry: &Registry, bytes: &[u8]) -> Result<TypedValue, CodecError> {
    let [type_code, format_code, data @ ..] = bytes else {
        return Err(CodecError::Truncated(bytes.len()));
    };
    let format = registry.by_code(*type_code, *format_code)?;
    check_length(format, data)?;
    Ok(TypedValue::from_parts(format, data.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Lookup, RegistryError};

    fn registry() -> Registry {
        Registry::builtin().unwrap()
    }

    #[test]
    fn feed_id_layout() {
        let value = TypedValue::new("feed", "classic", vec![0xAA; 32]);
        let bytes = encode_binary(&registry(), &value).unwrap();
        assert_eq!(&bytes[..2], &[0, 0]);
        assert_eq!(&bytes[2..], &[0xAA; 32]);
        assert_eq!(decode_binary(&registry(), &bytes).unwrap(), value);
    }

    #[test]
    fn formats_without_text_form_still_encode() {
        let value = TypedValue::new("generic", "any-bytes", b"\x00\x01".to_vec());
        let bytes = encode_binary(&registry(), &value).unwrap();
        assert_eq!(bytes, vec![6, 3, 0, 1]);
        assert_eq!(decode_binary(&registry(), &bytes).unwrap(), value);
    }

    #[test]
    fn empty_payload_is_allowed() {
        let value = TypedValue::new("generic", "nil", vec![]);
        let bytes = encode_binary(&registry(), &value).unwrap();
        assert_eq!(bytes, vec![6, 2]);
        assert_eq!(decode_binary(&registry(), &bytes).unwrap(), value);
    }

    #[test]
    fn truncated_input() {
        assert!(matches!(
            decode_binary(&registry(), &[0]),
            Err(CodecError::Truncated(1))
        ));
        assert!(matches!(
            decode_binary(&registry(), &[]),
            Err(CodecError::Truncated(0))
        ));
    }

    #[test]
    fn unknown_code_is_not_found() {
        assert!(matches!(
            decode_binary(&registry(), &[42, 0]),
            Err(CodecError::Registry(RegistryError::NotFound(Lookup::Code {
                type_code: 42,
                format_code: 0
            })))
        ));
    }

    #[test]
    fn pinned_length_enforced_on_decode() {
        let mut bytes = vec![2, 0];
        bytes.extend_from_slice(&[0; 31]);
        assert!(matches!(
            decode_binary(&registry(), &bytes),
            Err(CodecError::DataLength { .. })
        ));
    }
}
