//! Account, token, pool and facet identities.

use core::fmt;

use sha3::{Digest, Keccak256};

/// A 20-byte identity shared by every addressable thing in the system:
/// token contracts, user accounts, pools, facets and diamonds.
///
/// The all-zero value is the null sentinel ([`Address::ZERO`]).  The
/// derived ordering is a lexicographic byte comparison, which gives the
/// total order used to canonicalise token pairs.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::Address;
///
/// let a = Address::from_low_u64(1);
/// let b = Address::from_low_u64(2);
/// assert!(a < b);
/// assert!(Address::ZERO.is_zero());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The null sentinel.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the underlying 20-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 20] {
        self.0
    }

    /// Builds an address whose last eight bytes are `value` (big-endian).
    ///
    /// Handy for fixtures and well-known system accounts.
    #[must_use]
    pub const fn from_low_u64(value: u64) -> Self {
        let be = value.to_be_bytes();
        let mut bytes = [0u8; 20];
        let mut i = 0;
        while i < 8 {
            bytes[12 + i] = be[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns `true` for the null sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Derives a deterministic address from a domain tag and a list of
    /// byte strings: the last 20 bytes of
    /// `keccak256(tag || len(part) || part || ...)`.
    ///
    /// Used for CREATE2-style pool identities and well-known diamond
    /// and facet addresses.
    #[must_use]
    pub fn derive(tag: &[u8], parts: &[&[u8]]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update(tag);
        for part in parts {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part);
        }
        let digest = hasher.finalize();
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(digest.get(12..32).unwrap_or(&[0u8; 20]));
        Self(bytes)
    }

    /// Lower-case hex rendering with a `0x` prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for byte in self.0 {
            out.push_str(&format!("{byte:02x}"));
        }
        out
    }

    /// Parses a 40-digit hex string, with or without a `0x` prefix.
    ///
    /// Returns `None` on bad length or non-hex characters.
    #[must_use]
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 40 {
            return None;
        }
        let mut bytes = [0u8; 20];
        for (slot, chunk) in bytes.iter_mut().zip(digits.as_bytes().chunks(2)) {
            let pair = core::str::from_utf8(chunk).ok()?;
            *slot = u8::from_str_radix(pair, 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.0)))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        let digits = raw.strip_prefix("0x").unwrap_or(&raw);
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(serde::de::Error::custom)?;
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_null_sentinel() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_low_u64(1).is_zero());
        assert_eq!(Address::default(), Address::ZERO);
    }

    #[test]
    fn from_low_u64_places_big_endian_tail() {
        let addr = Address::from_low_u64(0x0102);
        let bytes = addr.as_bytes();
        assert_eq!(bytes[18], 0x01);
        assert_eq!(bytes[19], 0x02);
        assert!(bytes[..18].iter().all(|b| *b == 0));
    }

    #[test]
    fn ordering_is_bytewise() {
        let lo = Address::from_bytes([0u8; 20]);
        let mut hi_bytes = [0u8; 20];
        hi_bytes[0] = 1;
        let hi = Address::from_bytes(hi_bytes);
        assert!(lo < hi);
        assert!(Address::from_low_u64(u64::MAX) < hi);
    }

    #[test]
    fn derive_is_deterministic_and_separated() {
        let a = Address::derive(b"pair", &[b"x", b"y"]);
        let b = Address::derive(b"pair", &[b"x", b"y"]);
        let c = Address::derive(b"pair", &[b"xy"]);
        let d = Address::derive(b"facet", &[b"x", b"y"]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert!(!a.is_zero());
    }

    #[test]
    fn hex_round_trip() {
        let addr = Address::derive(b"t", &[b"1"]);
        let text = addr.to_hex();
        assert_eq!(text.len(), 42);
        assert_eq!(Address::parse_hex(&text), Some(addr));
        assert_eq!(Address::parse_hex("0x1234"), None);
        assert_eq!(
            Address::parse_hex("zz00000000000000000000000000000000000000"),
            None
        );
    }

    #[test]
    fn display_and_debug() {
        let addr = Address::from_low_u64(255);
        assert!(addr.to_string().ends_with("ff"));
        assert!(format!("{addr:?}").starts_with("Address(0x"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_hex_strings() {
        let addr = Address::from_low_u64(10);
        let Ok(json) = serde_json::to_string(&addr) else {
            panic!("serialize");
        };
        assert_eq!(json, "\"0x000000000000000000000000000000000000000a\"");
        let Ok(back) = serde_json::from_str::<Address>(&json) else {
            panic!("deserialize");
        };
        assert_eq!(back, addr);
    }
}
