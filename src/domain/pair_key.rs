//! Canonical, order-independent pool key.

use super::Address;
use crate::error::DexError;

/// An unordered pair of distinct, non-null tokens stored in canonical
/// order (`token0 < token1` by byte comparison).
///
/// Building the key from `(a, b)` or `(b, a)` yields the same value, which
/// is what guarantees one pool per pair in the registry.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Address, PairKey};
///
/// let a = Address::from_low_u64(1);
/// let b = Address::from_low_u64(2);
///
/// let key = PairKey::new(b, a).expect("distinct tokens");
/// assert_eq!(key.token0(), a);
/// assert_eq!(key.token1(), b);
/// assert_eq!(key, PairKey::new(a, b).expect("distinct tokens"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    token0: Address,
    token1: Address,
}

impl PairKey {
    /// Creates a canonically-ordered key.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalTokens`] if both tokens are the same.
    /// - [`DexError::ZeroAddress`] if either token is the null address.
    pub fn new(token_a: Address, token_b: Address) -> Result<Self, DexError> {
        if token_a == token_b {
            return Err(DexError::IdenticalTokens);
        }
        let (token0, token1) = sort_tokens(token_a, token_b);
        if token0.is_zero() {
            return Err(DexError::ZeroAddress);
        }
        Ok(Self { token0, token1 })
    }

    /// Lower token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Higher token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Returns `true` if `token` is one side of the pair.
    #[must_use]
    pub fn contains(&self, token: Address) -> bool {
        self.token0 == token || self.token1 == token
    }

    /// Returns the counterpart of `token`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidPath`] if `token` is not in the pair.
    pub fn other(&self, token: Address) -> Result<Address, DexError> {
        if token == self.token0 {
            Ok(self.token1)
        } else if token == self.token1 {
            Ok(self.token0)
        } else {
            Err(DexError::InvalidPath)
        }
    }
}

/// Orders two tokens by byte comparison.
///
/// Does not validate; see [`PairKey::new`] for that.
#[must_use]
pub fn sort_tokens(token_a: Address, token_b: Address) -> (Address, Address) {
    if token_a < token_b {
        (token_a, token_b)
    } else {
        (token_b, token_a)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    #[test]
    fn preserves_sorted_input() {
        let Ok(key) = PairKey::new(addr(1), addr(2)) else {
            panic!("expected Ok");
        };
        assert_eq!(key.token0(), addr(1));
        assert_eq!(key.token1(), addr(2));
    }

    #[test]
    fn sorts_reversed_input() {
        let (Ok(k1), Ok(k2)) = (PairKey::new(addr(9), addr(3)), PairKey::new(addr(3), addr(9)))
        else {
            panic!("expected Ok");
        };
        assert_eq!(k1, k2);
        assert_eq!(k1.token0(), addr(3));
    }

    #[test]
    fn rejects_identical() {
        assert_eq!(
            PairKey::new(addr(4), addr(4)),
            Err(DexError::IdenticalTokens)
        );
        assert_eq!(
            PairKey::new(Address::ZERO, Address::ZERO),
            Err(DexError::IdenticalTokens)
        );
    }

    #[test]
    fn rejects_zero_on_either_side() {
        assert_eq!(
            PairKey::new(Address::ZERO, addr(1)),
            Err(DexError::ZeroAddress)
        );
        assert_eq!(
            PairKey::new(addr(1), Address::ZERO),
            Err(DexError::ZeroAddress)
        );
    }

    #[test]
    fn other_and_contains() {
        let Ok(key) = PairKey::new(addr(1), addr(2)) else {
            panic!("expected Ok");
        };
        assert!(key.contains(addr(1)));
        assert!(!key.contains(addr(3)));
        assert_eq!(key.other(addr(1)), Ok(addr(2)));
        assert_eq!(key.other(addr(2)), Ok(addr(1)));
        assert_eq!(key.other(addr(3)), Err(DexError::InvalidPath));
    }

    #[test]
    fn sort_tokens_is_symmetric() {
        assert_eq!(sort_tokens(addr(5), addr(2)), (addr(2), addr(5)));
        assert_eq!(sort_tokens(addr(2), addr(5)), (addr(2), addr(5)));
    }
}
