//! Rendering derived keys through the registry.
//!
//! A public key is a `feed/classic` value, a signature is a
//! `signature/msg-ed25519` value. Sigils and suffixes come from whatever
//! registry the caller hands in.

use crate::config::{CLASSIC_FORMAT, ED25519_CURVE, FEED_TYPE};
use crate::crypto::{Keypair, PublicKey, Signature};
use crate::encoding::{decode_text, encode_text, CodecError, TypedValue};
use crate::registry::Registry;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

const SIGNATURE_TYPE: &str = "signature";
const SIGNATURE_FORMAT: &str = "msg-ed25519";

/// A keypair in the `ssb-keys` JSON shape.
///
/// ```text
/// { "curve": "ed25519",
///   "public":  "<base64 pk>.ed25519",
///   "private": "<base64 seed||pk>.ed25519",
///   "id":      "@<base64 pk>.ed25519" }
/// ```
///
/// `private` is secret. `Debug` hides it; serializing does not.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedKeys {
    pub curve: String,
    pub public: String,
    pub private: String,
    pub id: String,
}

impl fmt::Debug for ExportedKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedKeys")
            .field("curve", &self.curve)
            .field("public", &self.public)
            .field("private", &"<redacted>")
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for ExportedKeys {
    fn drop(&mut self) {
        self.private.zeroize();
    }
}

impl PublicKey {
    pub fn to_typed_value(&self) -> TypedValue {
        TypedValue::new(FEED_TYPE, CLASSIC_FORMAT, self.as_bytes().to_vec())
    }

    /// Text feed id, e.g. `@<base64>.ed25519`.
    pub fn to_feed_id(&self, registry: &Registry) -> Result<String, CodecError> {
        encode_text(registry, &self.to_typed_value())
    }

    /// Parse a text feed id back into a public key.
    pub fn from_feed_id(registry: &Registry, text: &str) -> Result<Self, CodecError> {
        let value = decode_text(registry, text)?;
        if value.type_name != FEED_TYPE || value.format != CLASSIC_FORMAT {
            return Err(CodecError::UnexpectedType {
                expected: format!("{FEED_TYPE}/{CLASSIC_FORMAT}"),
                got: format!("{}/{}", value.type_name, value.format),
            });
        }
        Ok(PublicKey::try_from_slice(&value.data)?)
    }
}

impl Signature {
    pub fn to_typed_value(&self) -> TypedValue {
        TypedValue::new(SIGNATURE_TYPE, SIGNATURE_FORMAT, self.as_bytes().to_vec())
    }
}

impl Keypair {
    pub fn feed_id(&self, registry: &Registry) -> Result<String, CodecError> {
        self.public_key().to_feed_id(registry)
    }

    /// Export the keypair, private half included. The one sanctioned way
    /// secret key material leaves this crate.
    pub fn export(&self, registry: &Registry) -> Result<ExportedKeys, CodecError> {
        let id = self.feed_id(registry)?;
        let feed = self.public_key().to_typed_value().resolve(registry)?;
        let suffix = feed.format.suffix.as_deref().unwrap_or_default();
        let public = match feed.format.sigil {
            Some(sigil) => id.strip_prefix(sigil).unwrap_or(&id).to_string(),
            None => id.clone(),
        };

        let secret = Zeroizing::new(self.keypair_bytes());
        let encoded = Zeroizing::new(BASE64.encode(secret.as_slice()));
        let mut private = String::with_capacity(encoded.len() + suffix.len());
        private.push_str(&encoded);
        private.push_str(suffix);

        Ok(ExportedKeys {
            curve: ED25519_CURVE.to_string(),
            public,
            private,
            id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{Format, TypeEntry};

    fn registry() -> Registry {
        Registry::builtin().unwrap()
    }

    #[test]
    fn feed_id_shape() {
        let kp = Keypair::from_seed(&[1u8; 32]);
        let id = kp.feed_id(&registry()).unwrap();
        assert_eq!(id, format!("@{}.ed25519", kp.public_key().to_base64()));
    }

    #[test]
    fn feed_id_roundtrip() {
        let registry = registry();
        let pk = Keypair::from_seed(&[2u8; 32]).public_key();
        let id = pk.to_feed_id(&registry).unwrap();
        assert_eq!(PublicKey::from_feed_id(&registry, &id).unwrap(), pk);
    }

    #[test]
    fn from_feed_id_rejects_other_types() {
        let registry = registry();
        let msg = encode_text(&registry, &TypedValue::new("message", "classic", vec![0; 32]))
            .unwrap();
        assert!(matches!(
            PublicKey::from_feed_id(&registry, &msg),
            Err(CodecError::UnexpectedType { .. })
        ));
    }

    #[test]
    fn export_matches_ssb_keys_shape() {
        let seed = [3u8; 32];
        let kp = Keypair::from_seed(&seed);
        let exported = kp.export(&registry()).unwrap();
        assert_eq!(exported.curve, "ed25519");
        assert_eq!(exported.id, format!("@{}", exported.public));
        assert!(exported.public.ends_with(".ed25519"));

        let private_b64 = exported.private.strip_suffix(".ed25519").unwrap();
        let private = BASE64.decode(private_b64).unwrap();
        assert_eq!(private.len(), 64);
        assert_eq!(&private[..32], &seed);
        assert_eq!(&private[32..], kp.public_key().as_bytes());
    }

    #[test]
    fn export_without_suffix_is_bare_base64() {
        let registry = Registry::load(vec![TypeEntry::new(
            "feed",
            0,
            vec![Format::new("classic", 0).with_sigil('@')],
        )])
        .unwrap();
        let seed = [8u8; 32];
        let kp = Keypair::from_seed(&seed);
        let exported = kp.export(&registry).unwrap();
        assert_eq!(BASE64.decode(&exported.private).unwrap(), kp.keypair_bytes());
        assert_eq!(exported.id, format!("@{}", exported.public));
    }

    #[test]
    fn export_serializes_to_json() {
        let exported = Keypair::from_seed(&[4u8; 32]).export(&registry()).unwrap();
        let json = serde_json::to_value(&exported).unwrap();
        assert_eq!(json["curve"], "ed25519");
        assert!(json["id"].as_str().unwrap().starts_with('@'));
        let back: ExportedKeys = serde_json::from_value(json).unwrap();
        assert_eq!(back, exported);
    }

    #[test]
    fn export_debug_hides_private() {
        let exported = Keypair::from_seed(&[5u8; 32]).export(&registry()).unwrap();
        let debug = format!("{exported:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(&exported.private));
    }

    #[test]
    fn export_fails_without_feed_type() {
        let registry = Registry::load(vec![TypeEntry::new(
            "blob",
            0,
            vec![Format::new("classic", 0).with_sigil('&')],
        )])
        .unwrap();
        assert!(Keypair::from_seed(&[6u8; 32]).export(&registry).is_err());
    }

    #[test]
    fn signature_renders_with_suffix_only() {
        let registry = registry();
        let kp = Keypair::from_seed(&[7u8; 32]);
        let sig = kp.sign(b"hello");
        let text = encode_text(&registry, &sig.to_typed_value()).unwrap();
        assert!(text.ends_with(".sig.ed25519"));
        let decoded = decode_text(&registry, &text).unwrap();
        assert_eq!(decoded.data, sig.as_bytes());
    }
}
