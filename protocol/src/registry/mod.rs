//! # Type-Tag Registry
//!
//! Maps every kind of typed binary value (feed ids, message ids, blob ids,
//! signatures, encrypted boxes, ...) to:
//!
//! - a dense numeric `(type code, format code)` pair for the binary wire,
//! - an optional one-character **sigil** prefix for text forms,
//! - an optional **suffix** for text forms.
//!
//! ```text
//! @<base64>.ed25519      feed/classic        sigil '@', suffix ".ed25519"
//! %<base64>.sha256       message/classic     sigil '%', suffix ".sha256"
//! <base64>.sig.ed25519   signature/msg-ed25519  suffix only
//! ```
//!
//! A registry only exists once the whole table has been validated (see
//! [`validate`]). After that it is immutable.

pub mod entry;
pub mod table;
pub mod validate;

pub use entry::{Format, TypeEntry};
pub use table::{FormatRef, Lookup, Registry, RegistryError};
pub use validate::{InvalidRegistry, Violation};
