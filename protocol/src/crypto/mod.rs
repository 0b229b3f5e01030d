//! # Cryptographic Primitives
//!
//! Thin, type-safe wrappers over audited implementations. Nothing in here is
//! novel cryptography:
//!
//! - **Ed25519** (`ed25519-dalek`) turns a 32-byte seed into a keypair.
//! - **HMAC-SHA256** (`hmac` + `sha2`) is the default keyed PRF for seed
//!   derivation; **BLAKE3** keyed mode is the alternative.
//!
//! Both sit behind traits ([`KeypairGenerator`], [`KeyedDerivation`]) so the
//! derivation engine can be driven by test doubles.

pub mod kdf;
pub mod keys;

pub use kdf::{Blake3Kdf, HmacSha256Kdf, KeyedDerivation};
pub use keys::{
    Ed25519Generator, KeyError, Keypair, KeypairGenerator, PublicKey, Signature,
    SignatureAlgorithm,
};
