//! Tree fingerprints

use std::fmt;

/// BLAKE3 output over a tree's values and shape
///
/// Displays as lowercase hex; `Debug` shows only the short prefix.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Digest([u8; 32]);

impl Digest {
    /// Hash the concatenation of `parts` without copying them together
    pub fn digest_many(parts: &[&[u8]]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for part in parts {
            hasher.update(part);
        }
        Digest(*hasher.finalize().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 7 hex characters
    pub fn short(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(7);
        hex
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.short())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_many_ignores_part_boundaries() {
        let whole = Digest::digest_many(&[b"helloworld".as_slice()]);
        let split = Digest::digest_many(&[b"hello".as_slice(), b"world".as_slice()]);
        assert_eq!(whole, split);
        assert_eq!(whole.as_bytes(), blake3::hash(b"helloworld").as_bytes());
        assert_ne!(whole, Digest::digest_many(&[b"hello".as_slice()]));
    }

    #[test]
    fn test_digest_text_forms() {
        let d = Digest::digest_many(&[b"test".as_slice()]);
        assert_eq!(d.to_hex().len(), 64);
        assert_eq!(d.to_string(), d.to_hex());
        assert_eq!(d.short(), &d.to_hex()[..7]);
        assert_eq!(format!("{d:?}"), format!("Digest({})", d.short()));
    }
}
