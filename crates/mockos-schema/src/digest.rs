//! Package digest.
//!
//! BLAKE3 over the package's semantic fields, truncated to 128 bits. The digest
//! detects accidental corruption and mismatched fields; it is not a signature.

/// Length of a package digest in bytes.
pub const DIGEST_LEN: usize = 16;

/// Fixed-length fingerprint over a package's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageDigest([u8; DIGEST_LEN]);

impl PackageDigest {
    /// Compute the digest of a package's fields.
    ///
    /// The hash input is the concatenation, in order, of `version`, `cookie`,
    /// `padding`, a single `1`/`0` byte for `incompatible`, and
    /// `activation_fail_message`. Text fields are taken as raw bytes, so a
    /// digest can be computed before they are known to be UTF-8. Empty fields
    /// are valid.
    pub fn compute(
        version: &[u8],
        cookie: &[u8],
        padding: &[u8],
        incompatible: bool,
        activation_fail_message: &[u8],
    ) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(version);
        hasher.update(cookie);
        hasher.update(padding);
        hasher.update(&[u8::from(incompatible)]);
        hasher.update(activation_fail_message);

        let full = hasher.finalize();
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&full.as_bytes()[..DIGEST_LEN]);
        Self(out)
    }

    /// Build a digest from raw bytes, or `None` if the length is wrong.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; DIGEST_LEN]>::try_from(bytes).ok().map(Self)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Byte-for-byte comparison against a stored digest of any length.
    pub fn matches(&self, stored: &[u8]) -> bool {
        self.0.as_slice() == stored
    }

    /// Lowercase hex rendering.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for PackageDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for PackageDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PackageDigest {
        PackageDigest::compute(b"1.2.3", b"cookiestring", b"padding", false, b"")
    }

    #[test]
    fn digest_is_deterministic() {
        assert_eq!(sample(), sample());
    }

    #[test]
    fn digest_is_truncated_blake3_of_concatenation() {
        let mut joined = Vec::new();
        joined.extend_from_slice(b"1.2.3");
        joined.extend_from_slice(b"cookiestring");
        joined.extend_from_slice(b"padding");
        joined.push(0);

        let full = blake3::hash(&joined);
        assert_eq!(sample().as_bytes(), &full.as_bytes()[..DIGEST_LEN]);
    }

    #[test]
    fn every_field_changes_the_digest() {
        let base = sample();
        let variants = [
            PackageDigest::compute(b"1.2.4", b"cookiestring", b"padding", false, b""),
            PackageDigest::compute(b"1.2.3", b"cookiestrinG", b"padding", false, b""),
            PackageDigest::compute(b"1.2.3", b"cookiestring", b"paddinh", false, b""),
            PackageDigest::compute(b"1.2.3", b"cookiestring", b"padding", true, b""),
            PackageDigest::compute(b"1.2.3", b"cookiestring", b"padding", false, b"x"),
        ];
        for variant in variants {
            assert_ne!(base, variant);
        }
    }

    #[test]
    fn empty_fields_are_valid_input() {
        let digest = PackageDigest::compute(b"", b"", &[], false, b"");
        assert_eq!(digest.as_bytes().len(), DIGEST_LEN);
        assert_ne!(digest, PackageDigest::compute(b"", b"", &[], true, b""));
    }

    #[test]
    fn non_utf8_text_is_valid_input() {
        let digest = PackageDigest::compute(&[0xFF, 0x80], b"cookiestring", &[], false, &[0xC3]);
        let flipped = PackageDigest::compute(&[0xFF, 0x81], b"cookiestring", &[], false, &[0xC3]);
        assert_ne!(digest, flipped);
    }

    #[test]
    fn matches_rejects_length_mismatch() {
        let digest = sample();
        assert!(digest.matches(digest.as_bytes()));
        assert!(!digest.matches(&digest.as_bytes()[..DIGEST_LEN - 1]));

        let mut longer = digest.as_bytes().to_vec();
        longer.push(0);
        assert!(!digest.matches(&longer));
    }

    #[test]
    fn from_slice_round_trips_and_checks_length() {
        let digest = sample();
        assert_eq!(PackageDigest::from_slice(digest.as_bytes()), Some(digest));
        assert_eq!(PackageDigest::from_slice(&[0u8; 4]), None);
    }

    #[test]
    fn display_is_lowercase_hex() {
        let rendered = sample().to_string();
        assert_eq!(rendered.len(), DIGEST_LEN * 2);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
