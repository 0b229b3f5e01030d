//! # Identity Module
//!
//! Deterministic identity hierarchies. A caller holds one [`RootSecret`] and
//! asks for keypairs by [`PurposeLabel`]; the same pair always yields the
//! same keypair, so only the root secret ever needs backing up.
//!
//! The stack is layered:
//!
//! 1. **Secret**: the root secret and the seeds derived from it.
//! 2. **Purpose**: labels naming which seed is wanted (`metafeed`,
//!    `subfeed-1`, ...).
//! 3. **Derive**: the engine: keyed PRF to seed, seed to keypair.
//! 4. **Export**: feed ids and `ssb-keys`-style bundles rendered through
//!    the type-tag registry.

pub mod derive;
pub mod export;
pub mod purpose;
pub mod secret;

pub use derive::{derive_seed, generate_keypair, DerivedIdentity, Deriver};
pub use export::ExportedKeys;
pub use purpose::PurposeLabel;
pub use secret::{DerivedSeed, RootSecret};
