// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # seedtree Core Library
//!
//! One backed-up secret, a whole tree of identities, and a registry that
//! says how every derived key and identifier is written down.
//!
//! ## Architecture
//!
//! - **crypto**: Ed25519 keys and keyed PRFs behind narrow traits.
//! - **identity**: root secrets, purpose labels, and the derivation engine
//!   that maps `(root secret, label)` to a keypair.
//! - **registry**: the validated type-tag table: numeric codes, sigils and
//!   suffixes for every kind of typed binary value.
//! - **encoding**: text (`sigil + base64 + suffix`) and binary
//!   (`type, format, data`) forms of typed values.
//! - **config**: frozen constants and the built-in registry data.
//!
//! ## Example
//!
//! ```
//! use seedtree::identity::{Deriver, PurposeLabel, RootSecret};
//! use seedtree::registry::Registry;
//!
//! let registry = Registry::builtin().unwrap();
//! let root = RootSecret::from_hex(
//!     "4e2ce5ca70cd12cc0cee0a5285b61fbc3b5f4042287858e613f9a8bf98a70d39",
//! )
//! .unwrap();
//!
//! let meta = Deriver::new()
//!     .derive(&root, &PurposeLabel::metafeed(), "ed25519")
//!     .unwrap();
//! let id = meta.keypair.feed_id(&registry).unwrap();
//! assert!(id.starts_with('@') && id.ends_with(".ed25519"));
//! ```

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod identity;
pub mod registry;
