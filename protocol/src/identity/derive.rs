//! # Hierarchical Derivation
//!
//! One root secret, any number of purpose-scoped keypairs:
//!
//! ```text
//! root_secret ──┬─ PRF(tag, "…:metafeed")  -> seed -> ed25519 keypair
//!               ├─ PRF(tag, "…:subfeed-1") -> seed -> ed25519 keypair
//!               └─ PRF(tag, "…:subfeed-n") -> seed -> ed25519 keypair
//! ```
//!
//! Every step is a pure function. Nothing here keeps state between calls,
//! and nothing here logs secret or seed bytes.
//!
//! ## Usage
//!
//! ```
//! use seedtree::identity::{Deriver, PurposeLabel, RootSecret};
//!
//! let root = RootSecret::generate();
//! let deriver = Deriver::new();
//! let meta = deriver.derive(&root, &PurposeLabel::metafeed(), "ed25519").unwrap();
//! let again = deriver.derive(&root, &PurposeLabel::metafeed(), "ed25519").unwrap();
//! assert_eq!(meta.keypair.public_key(), again.keypair.public_key());
//! ```

use crate::config::DOMAIN_TAG;
use crate::crypto::{
    Ed25519Generator, HmacSha256Kdf, KeyError, KeyedDerivation, Keypair, KeypairGenerator,
};
use crate::identity::purpose::PurposeLabel;
use crate::identity::secret::{DerivedSeed, RootSecret};

/// Derive a purpose-scoped seed with the default HMAC-SHA256 construction.
///
/// Fails with [`KeyError::InvalidInput`] unless `root_secret` is exactly
/// [`ROOT_SECRET_LENGTH`](crate::config::ROOT_SECRET_LENGTH) bytes.
pub fn derive_seed(
    domain_tag: &[u8],
    root_secret: &[u8],
    purpose_label: &[u8],
) -> Result<DerivedSeed, KeyError> {
    let root = RootSecret::from_slice(root_secret)?;
    Ok(seed_with(&HmacSha256Kdf, domain_tag, &root, purpose_label))
}

/// Generate a keypair from a seed with the default Ed25519 generator.
///
/// Fails with [`KeyError::UnsupportedAlgorithm`] for anything but `ed25519`.
pub fn generate_keypair(algorithm_id: &str, seed: &DerivedSeed) -> Result<Keypair, KeyError> {
    Ed25519Generator.generate(algorithm_id, seed.as_bytes())
}

fn seed_with<K: KeyedDerivation>(
    kdf: &K,
    domain_tag: &[u8],
    root: &RootSecret,
    label: &[u8],
) -> DerivedSeed {
    DerivedSeed::from_bytes(kdf.derive(domain_tag, root.as_bytes(), label))
}

/// A keypair together with the label it was derived for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedIdentity {
    pub label: PurposeLabel,
    pub keypair: Keypair,
}

/// The derivation engine: a keyed PRF, a keypair generator, and the
/// domain tag that separates this hierarchy from any other use of the same
/// root secret.
///
/// Both collaborators are injected so tests can substitute doubles.
#[derive(Debug, Clone)]
pub struct Deriver<K = HmacSha256Kdf, G = Ed25519Generator> {
    kdf: K,
    generator: G,
    domain_tag: Vec<u8>,
}

impl Deriver {
    /// HMAC-SHA256 seeds, Ed25519 keys, the `ssb-meta-feed` domain tag.
    pub fn new() -> Self {
        Self::with_parts(HmacSha256Kdf, Ed25519Generator, DOMAIN_TAG)
    }
}

impl Default for Deriver {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: KeyedDerivation, G: KeypairGenerator> Deriver<K, G> {
    pub fn with_parts(kdf: K, generator: G, domain_tag: impl Into<Vec<u8>>) -> Self {
        Self {
            kdf,
            generator,
            domain_tag: domain_tag.into(),
        }
    }

    pub fn domain_tag(&self) -> &[u8] {
        &self.domain_tag
    }

    pub fn derive_seed(&self, root: &RootSecret, label: &PurposeLabel) -> DerivedSeed {
        seed_with(&self.kdf, &self.domain_tag, root, label.as_bytes())
    }

    /// Same as [`derive_seed`](Self::derive_seed) but for raw root-secret
    /// bytes, which must be exactly 32 long.
    pub fn derive_seed_from_slice(
        &self,
        root_secret: &[u8],
        label: &PurposeLabel,
    ) -> Result<DerivedSeed, KeyError> {
        let root = RootSecret::from_slice(root_secret)?;
        Ok(self.derive_seed(&root, label))
    }

    pub fn generate_keypair(
        &self,
        algorithm_id: &str,
        seed: &DerivedSeed,
    ) -> Result<Keypair, KeyError> {
        self.generator.generate(algorithm_id, seed.as_bytes())
    }

    /// Seed then keypair for one label.
    pub fn derive(
        &self,
        root: &RootSecret,
        label: &PurposeLabel,
        algorithm_id: &str,
    ) -> Result<DerivedIdentity, KeyError> {
        let seed = self.derive_seed(root, label);
        let keypair = self.generate_keypair(algorithm_id, &seed)?;
        tracing::debug!(
            label = %label,
            algorithm = algorithm_id,
            public_key = %keypair.public_key(),
            "derived identity"
        );
        Ok(DerivedIdentity {
            label: label.clone(),
            keypair,
        })
    }

    /// Derive one identity per label, in order. Stops at the first failure.
    pub fn derive_many<'a>(
        &self,
        root: &RootSecret,
        labels: impl IntoIterator<Item = &'a PurposeLabel>,
        algorithm_id: &str,
    ) -> Result<Vec<DerivedIdentity>, KeyError> {
        labels
            .into_iter()
            .map(|label| self.derive(root, label, algorithm_id))
            .collect()
    }
}
