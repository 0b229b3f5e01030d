//! Purpose labels: which derived seed the caller is asking for.

use crate::config::{LABEL_PREFIX, METAFEED_PURPOSE, SUBFEED_PURPOSE};
use std::fmt;

/// Caller-chosen byte string scoping a derivation to one identity.
///
/// Distinct identities need distinct labels. Reusing a label with the same
/// root secret always returns the same seed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PurposeLabel(Vec<u8>);

impl PurposeLabel {
    pub fn new(label: impl Into<Vec<u8>>) -> Self {
        Self(label.into())
    }

    /// `ssb-meta-feed-seed-v1:metafeed`, the root of the hierarchy.
    pub fn metafeed() -> Self {
        Self::new(format!("{LABEL_PREFIX}{METAFEED_PURPOSE}"))
    }

    /// `ssb-meta-feed-seed-v1:subfeed-<n>`.
    pub fn subfeed(n: u32) -> Self {
        Self::new(format!("{LABEL_PREFIX}{SUBFEED_PURPOSE}-{n}"))
    }

    /// The first `count` subfeed labels, `subfeed-1` through `subfeed-<count>`.
    pub fn subfeeds(count: u32) -> impl Iterator<Item = PurposeLabel> {
        (1..=count).map(Self::subfeed)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for PurposeLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for PurposeLabel {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&[u8]> for PurposeLabel {
    fn from(b: &[u8]) -> Self {
        Self::new(b)
    }
}

impl AsRef<[u8]> for PurposeLabel {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for PurposeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}

impl fmt::Debug for PurposeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PurposeLabel({:?})", String::from_utf8_lossy(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conventional_labels() {
        assert_eq!(
            PurposeLabel::metafeed().to_string(),
            "ssb-meta-feed-seed-v1:metafeed"
        );
        assert_eq!(
            PurposeLabel::subfeed(1).to_string(),
            "ssb-meta-feed-seed-v1:subfeed-1"
        );
    }

    #[test]
    fn subfeeds_enumerate_from_one() {
        let labels: Vec<String> = PurposeLabel::subfeeds(3).map(|l| l.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "ssb-meta-feed-seed-v1:subfeed-1",
                "ssb-meta-feed-seed-v1:subfeed-2",
                "ssb-meta-feed-seed-v1:subfeed-3",
            ]
        );
        assert_eq!(PurposeLabel::subfeeds(0).count(), 0);
    }

    #[test]
    fn conversions_agree() {
        let a = PurposeLabel::from("x:y");
        let b = PurposeLabel::from(String::from("x:y"));
        let c = PurposeLabel::from(&b"x:y"[..]);
        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_bytes(), b"x:y");
    }
}
