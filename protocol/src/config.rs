//! # Constants & Built-in Configuration
//!
//! Every magic string in the derivation scheme lives here. Changing any of
//! these after identities have been derived in the wild means every existing
//! hierarchy derives to different keys, so treat them as frozen.

// ---------------------------------------------------------------------------
// Derivation Parameters
// ---------------------------------------------------------------------------

/// Domain-separation tag bound into every seed derivation.
pub const DOMAIN_TAG: &str = "ssb-meta-feed";

/// Prefix shared by the conventional purpose labels.
pub const LABEL_PREFIX: &str = "ssb-meta-feed-seed-v1:";

/// Purpose-label tail for the root ("meta") identity.
pub const METAFEED_PURPOSE: &str = "metafeed";

/// Purpose-label tail for numbered sub-identities (`subfeed-1`, `subfeed-2`, ...).
pub const SUBFEED_PURPOSE: &str = "subfeed";

/// Root secrets are exactly this many bytes. Anything else is rejected.
pub const ROOT_SECRET_LENGTH: usize = 32;

/// Derived seed length. Matches the Ed25519 secret key length.
pub const SEED_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Signature Parameters
// ---------------------------------------------------------------------------

/// Algorithm id used when the caller does not name one.
pub const DEFAULT_ALGORITHM: &str = "ed25519";

/// Curve name written into exported key bundles.
pub const ED25519_CURVE: &str = "ed25519";

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Registry type name under which public keys are filed.
pub const FEED_TYPE: &str = "feed";

/// Format name of plain Ed25519 feed ids.
pub const CLASSIC_FORMAT: &str = "classic";

/// The default type-tag table, compiled into the binary.
///
/// Loaded and validated through [`crate::registry::Registry::builtin`]; never
/// consulted without going through validation first.
pub const BUILTIN_REGISTRY_JSON: &str = include_str!("../data/bfe.json");
