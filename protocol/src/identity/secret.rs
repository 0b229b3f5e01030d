//! Root secrets and the seeds derived from them.
//!
//! Both types hold 32 bytes of key material, wipe it on drop, and refuse to
//! print it through `Debug`. Neither implements `Serialize`.

use crate::config::{ROOT_SECRET_LENGTH, SEED_LENGTH};
use crate::crypto::KeyError;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The single high-entropy value an entire identity hierarchy grows from.
///
/// Back this up once; every derived keypair can be recomputed from it plus
/// the purpose label.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RootSecret {
    bytes: [u8; ROOT_SECRET_LENGTH],
}

impl RootSecret {
    /// Draw a fresh root secret from the OS CSPRNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; ROOT_SECRET_LENGTH];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    pub fn from_bytes(bytes: [u8; ROOT_SECRET_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Accepts exactly [`ROOT_SECRET_LENGTH`] bytes and nothing else.
    pub fn from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        if slice.len() != ROOT_SECRET_LENGTH {
            return Err(KeyError::InvalidInput {
                what: "root secret",
                expected: ROOT_SECRET_LENGTH,
                got: slice.len(),
            });
        }
        let mut bytes = [0u8; ROOT_SECRET_LENGTH];
        bytes.copy_from_slice(slice);
        Ok(Self { bytes })
    }

    /// Restore from a hex backup (64 hex characters).
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let mut decoded =
            hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidHex("root secret"))?;
        let secret = Self::from_slice(&decoded);
        decoded.zeroize();
        secret
    }

    /// Hex form for writing a backup. Treat the returned string as secret.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ROOT_SECRET_LENGTH] {
        &self.bytes
    }
}

impl fmt::Debug for RootSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RootSecret(<redacted>)")
    }
}

/// A purpose-scoped seed, the output of keyed derivation.
///
/// Recomputed on demand from the root secret; never stored on its own.
/// Equality is constant-time.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedSeed {
    bytes: [u8; SEED_LENGTH],
}

impl DerivedSeed {
    pub fn from_bytes(bytes: [u8; SEED_LENGTH]) -> Self {
        Self { bytes }
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self, KeyError> {
        let bytes: [u8; SEED_LENGTH] = slice.try_into().map_err(|_| KeyError::InvalidInput {
            what: "seed",
            expected: SEED_LENGTH,
            got: slice.len(),
        })?;
        Ok(Self { bytes })
    }

    pub fn as_bytes(&self) -> &[u8; SEED_LENGTH] {
        &self.bytes
    }
}

impl PartialEq for DerivedSeed {
    fn eq(&self, other: &Self) -> bool {
        self.bytes[..].ct_eq(&other.bytes[..]).into()
    }
}

impl Eq for DerivedSeed {}

impl fmt::Debug for DerivedSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedSeed(<redacted>)")
    }
}
