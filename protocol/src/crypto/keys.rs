//! # Signature Keys
//!
//! Ed25519 keypairs generated deterministically from 32-byte seeds.
//!
//! Every identity in a derived hierarchy is one of these. The keypair never
//! stores the seed it came from separately: in Ed25519 the 32-byte secret key
//! *is* the seed, so re-deriving the seed re-derives the keypair bit for bit.
//!
//! ## Security considerations
//!
//! - Secret keys are zeroized on drop (ed25519-dalek's `zeroize` feature).
//! - `Debug` prints the public half only.
//! - Key bytes are never logged.

use crate::config::{PUBLIC_KEY_LENGTH, SEED_LENGTH, SIGNATURE_LENGTH};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised by key derivation and key handling.
///
/// Variants carry lengths and algorithm names only, never key material.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("invalid {what}: expected {expected} bytes, got {got}")]
    InvalidInput {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{0} is not valid hex")]
    InvalidHex(&'static str),

    #[error("unsupported signature algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    #[error("invalid public key bytes: not a valid Ed25519 point")]
    InvalidPublicKey,
}

/// Signature algorithms a seed can be turned into.
///
/// Only Ed25519 today. Unknown names are an error, never a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    Ed25519,
}

impl SignatureAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureAlgorithm::Ed25519 => "ed25519",
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("ed25519") {
            Ok(SignatureAlgorithm::Ed25519)
        } else {
            Err(KeyError::UnsupportedAlgorithm(s.to_string()))
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Turns a seed into a keypair for a named algorithm.
///
/// This is the seam where the signature primitive plugs into the derivation
/// engine. Implementations must be deterministic: the same `(algorithm, seed)`
/// yields the same keypair on every call and every platform.
pub trait KeypairGenerator {
    fn generate(&self, algorithm: &str, seed: &[u8; SEED_LENGTH]) -> Result<Keypair, KeyError>;
}

/// The production generator, backed by ed25519-dalek.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ed25519Generator;

impl KeypairGenerator for Ed25519Generator {
    fn generate(&self, algorithm: &str, seed: &[u8; SEED_LENGTH]) -> Result<Keypair, KeyError> {
        match algorithm.parse::<SignatureAlgorithm>()? {
            SignatureAlgorithm::Ed25519 => Ok(Keypair::from_seed(seed)),
        }
    }
}

/// A derived identity keypair wrapping an Ed25519 signing key.
///
/// `Keypair` intentionally does NOT implement `Serialize`. Getting private
/// bytes out is an explicit act: see [`Keypair::export`].
pub struct Keypair {
    signing_key: SigningKey,
}

/// The public half of a derived identity.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

/// An Ed25519 signature. Stored as `Vec<u8>` for serde, always 64 bytes
/// when produced by [`Keypair::sign`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    bytes: Vec<u8>,
}

impl Keypair {
    /// Constructs a keypair deterministically from a 32-byte seed.
    pub fn from_seed(seed: &[u8; SEED_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    pub fn algorithm(&self) -> SignatureAlgorithm {
        SignatureAlgorithm::Ed25519
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature {
            bytes: self.signing_key.sign(message).to_bytes().to_vec(),
        }
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        self.public_key().verify(message, signature)
    }

    /// The 64-byte `seed || public key` form used by key-bundle exports.
    ///
    /// **Secret material.** Only the export path should call this.
    pub(crate) fn keypair_bytes(&self) -> [u8; 64] {
        self.signing_key.to_keypair_bytes()
    }
}

impl Clone for Keypair {
    fn clone(&self) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&self.signing_key.to_bytes()),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair(pub={})", self.public_key().to_base64())
    }
}

impl PartialEq for Keypair {
    /// Compared by public key; secret bytes are never compared directly.
    fn eq(&self, other: &Self) -> bool {
        self.public_key() == other.public_key()
    }
}

impl Eq for Keypair {}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

impl PublicKey {
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Try to create a `PublicKey` from a byte slice, checking both length
    /// and that the bytes decode to a curve point.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidInput {
                what: "public key",
                expected: PUBLIC_KEY_LENGTH,
                got: slice.len(),
            })?;
        VerifyingKey::from_bytes(&bytes).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let Some(sig) = signature.to_dalek_signature() else {
            return false;
        };
        verifying_key.verify(message, &sig).is_ok()
    }

    /// Standard (padded) base64, the body of a text-encoded feed id.
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.bytes)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bytes.hash(state);
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn to_dalek_signature(&self) -> Option<DalekSignature> {
        let arr: [u8; SIGNATURE_LENGTH] = self.bytes.as_slice().try_into().ok()?;
        Some(DalekSignature::from_bytes(&arr))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = hex::encode(&self.bytes);
        if hex_str.len() >= 128 {
            write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[120..])
        } else {
            write!(f, "Signature({})", hex_str)
        }
    }
}
