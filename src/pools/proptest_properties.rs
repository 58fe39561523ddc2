//! Property-based tests using `proptest` for pool invariants.
//!
//! 1. **Product monotonicity**: `reserve0·reserve1` never decreases over
//!    a sequence of swaps in either direction.
//! 2. **Mint/burn conservation**: depositing then redeeming the minted
//!    shares never returns more than was deposited.
//! 3. **Quote agreement**: the stateless quote equals what the pool
//!    actually pays, hop by hop.
//! 4. **Exact-out coverage**: the quoted input always buys at least the
//!    requested output.
//! 5. **Canonical keys**: a pair key does not depend on argument order.

use proptest::prelude::*;

use super::pair::Pair;
use super::quote::{Hop, amount_in, amount_out, amounts_out};
use crate::config::PoolParams;
use crate::domain::{Address, Amount, BasisPoints, PairKey};
use crate::math::product;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn tok(n: u64) -> Address {
    Address::from_low_u64(n)
}

fn make_pair(a: u64, b: u64, fee: u32) -> Pair {
    let Ok(key) = PairKey::new(tok(a), tok(b)) else {
        panic!("valid key");
    };
    let Ok(params) = PoolParams::new(BasisPoints::new(fee), BasisPoints::ZERO) else {
        panic!("valid params");
    };
    Pair::new(Address::from_low_u64(1_000 + a * 10 + b), key, params, tok(a), 0)
}

fn seeded(a: u64, b: u64, fee: u32, r0: u128, r1: u128) -> Pair {
    let mut pair = make_pair(a, b, fee);
    let Ok(_) = pair.mint(Amount::new(r0), Amount::new(r1), 1, false) else {
        panic!("seed deposit of {r0}/{r1}");
    };
    pair
}

fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..1_000_000_000_000_000_000_000_000
}

fn fee_strategy() -> impl Strategy<Value = u32> {
    0u32..1_000
}

// ---------------------------------------------------------------------------
// Property 1: Product monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_non_decreasing_over_swaps(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in fee_strategy(),
        legs in prop::collection::vec((any::<bool>(), 1u128..=100), 1..12),
    ) {
        let mut pair = seeded(1, 2, fee, r0, r1);
        let mut k = product(r0, r1);

        for (t, (zero_for_one, per_mille)) in (2u64..).zip(legs) {
            let reserves = pair.reserves();
            let (token_in, reserve_in) = if zero_for_one {
                (tok(1), reserves.reserve0)
            } else {
                (tok(2), reserves.reserve1)
            };
            let amount = Amount::new((reserve_in.get() / 1_000 * per_mille).max(1));
            if pair.swap_exact_in(amount, token_in, Amount::ZERO, t).is_err() {
                continue;
            }
            let reserves = pair.reserves();
            let k_after = product(reserves.reserve0.get(), reserves.reserve1.get());
            prop_assert!(k_after >= k, "product shrank: {} -> {}", k, k_after);
            k = k_after;
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: Mint/burn conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_mint_then_burn_never_returns_more(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        d0 in 1u128..1_000_000_000_000_000_000,
        d1 in 1u128..1_000_000_000_000_000_000,
    ) {
        let mut pair = seeded(1, 2, 30, r0, r1);
        let balance0 = Amount::new(r0 + d0);
        let balance1 = Amount::new(r1 + d1);
        let Ok(minted) = pair.mint(balance0, balance1, 2, false) else {
            return Ok(());
        };

        let reserves = pair.reserves();
        let Ok(out) = pair.burn(minted.liquidity, reserves.reserve0, reserves.reserve1, 3, false)
        else {
            return Ok(());
        };
        prop_assert!(out.amount0.get() <= d0, "returned {} of {} token0", out.amount0, d0);
        prop_assert!(out.amount1.get() <= d1, "returned {} of {} token1", out.amount1, d1);
        prop_assert_eq!(pair.total_supply().get(), minted_supply(r0, r1));
    }
}

fn minted_supply(r0: u128, r1: u128) -> u128 {
    seeded(1, 2, 30, r0, r1).total_supply().get()
}

// ---------------------------------------------------------------------------
// Property 3: Quote agreement
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_quote_matches_execution(
        r0 in reserve_strategy(),
        r1 in reserve_strategy(),
        fee in fee_strategy(),
        amount in 1u128..1_000_000_000_000_000_000,
    ) {
        let mut pair = seeded(1, 2, fee, r0, r1);
        let Ok(quoted) = amount_out(
            Amount::new(amount),
            Amount::new(r0),
            Amount::new(r1),
            BasisPoints::new(fee),
        ) else {
            return Ok(());
        };
        let executed = pair.swap_exact_in(Amount::new(amount), tok(1), Amount::ZERO, 2);
        if quoted.is_zero() {
            prop_assert!(executed.is_err());
        } else {
            prop_assert_eq!(executed, Ok(quoted));
        }
    }

    #[test]
    fn prop_chained_quote_matches_two_hops(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        rc in reserve_strategy(),
        amount in 1_000u128..1_000_000_000_000_000_000,
    ) {
        // A(1) -> B(2) -> C(3)
        let mut first = seeded(1, 2, 30, ra, rb);
        let mut second = seeded(2, 3, 5, rb, rc);
        let hops = [
            Hop {
                reserve_in: Amount::new(ra),
                reserve_out: Amount::new(rb),
                fee: BasisPoints::new(30),
            },
            Hop {
                reserve_in: Amount::new(rb),
                reserve_out: Amount::new(rc),
                fee: BasisPoints::new(5),
            },
        ];
        let Ok(quoted) = amounts_out(Amount::new(amount), &hops) else {
            return Ok(());
        };
        let Ok(mid) = first.swap_exact_in(Amount::new(amount), tok(1), Amount::ZERO, 2) else {
            return Ok(());
        };
        let Ok(last) = second.swap_exact_in(mid, tok(2), Amount::ZERO, 2) else {
            return Ok(());
        };
        prop_assert_eq!(quoted, vec![Amount::new(amount), mid, last]);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Exact-out coverage
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_amount_in_buys_requested_output(
        r_in in reserve_strategy(),
        r_out in reserve_strategy(),
        fee in fee_strategy(),
        per_mille in 1u128..900,
    ) {
        let wanted = Amount::new((r_out / 1_000 * per_mille).max(1));
        let fee = BasisPoints::new(fee);
        let Ok(needed) = amount_in(wanted, Amount::new(r_in), Amount::new(r_out), fee) else {
            return Ok(());
        };
        let Ok(got) = amount_out(needed, Amount::new(r_in), Amount::new(r_out), fee) else {
            return Ok(());
        };
        prop_assert!(got >= wanted, "paid {} for {} < {}", needed, got, wanted);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Canonical keys
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_pair_key_is_order_independent(a in any::<[u8; 20]>(), b in any::<[u8; 20]>()) {
        let (a, b) = (Address::from_bytes(a), Address::from_bytes(b));
        match (PairKey::new(a, b), PairKey::new(b, a)) {
            (Ok(ab), Ok(ba)) => {
                prop_assert_eq!(ab, ba);
                prop_assert!(ab.token0() < ab.token1());
            }
            (Err(x), Err(y)) => prop_assert_eq!(x, y),
            (x, y) => prop_assert!(false, "asymmetric result: {:?} vs {:?}", x, y),
        }
    }
}
