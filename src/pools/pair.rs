//! Constant-product pair state (Uniswap V2 style).
//!
//! A [`Pair`] holds the reserves, liquidity supply and price oracle of one
//! registered pool.  It never moves tokens itself: callers transfer funds
//! into the pool first, then report the pool's resulting token balances,
//! and the pair works out what was deposited or paid in by comparing
//! those balances with its cached reserves.
//!
//! # Invariant
//!
//! Every swap must keep the fee-adjusted product
//! `(balance0·10⁴ − in0·fee)·(balance1·10⁴ − in1·fee)` at or above
//! `reserve0·reserve1·10⁸`.  On top of that the raw product
//! `reserve0·reserve1` is asserted non-decreasing after every settled
//! swap; a violation is an arithmetic bug, never a user error.
//!
//! # Protocol fee
//!
//! When enabled, the protocol's share of swap fees is minted lazily as
//! liquidity on the next mint or burn, proportional to the growth of
//! `√(reserve0·reserve1)` since the last liquidity event:
//!
//! ```text
//! shares = supply·(√k − √k_last)·p / (√k·(10⁴ − p) + √k_last·p)
//! ```
//!
//! where `p` is the pool's protocol fee in basis points.

use ethereum_types::U256;

use super::quote;
use crate::config::PoolParams;
use crate::domain::{Address, Amount, BPS_DENOMINATOR, Liquidity, PairKey, Rounding};
use crate::error::{DexError, Result};
use crate::math::{
    CheckedArithmetic, MAX_RESERVE, accumulate, mul_div, narrow, product, q112_ratio, sqrt, wide,
};

/// Shares locked forever by the first deposit.
pub const MINIMUM_LIQUIDITY: Liquidity = Liquidity::new(1_000);

/// Cached reserves and the timestamp of their last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reserves {
    /// Reserve of `token0`.
    pub reserve0: Amount,
    /// Reserve of `token1`.
    pub reserve1: Amount,
    /// Timestamp of the last reserve update.
    pub last_update: u64,
}

/// Full snapshot of one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairInfo {
    /// Pool identity; also the liquidity share token.
    pub address: Address,
    /// Lower token of the canonical pair.
    pub token0: Address,
    /// Upper token of the canonical pair.
    pub token1: Address,
    /// Cached reserves.
    pub reserves: Reserves,
    /// UQ112.112 time-weighted sum of `reserve1 / reserve0`.
    pub price0_cumulative: U256,
    /// UQ112.112 time-weighted sum of `reserve0 / reserve1`.
    pub price1_cumulative: U256,
    /// Reserve product at the last liquidity event, zero while the
    /// protocol fee is off.
    pub k_last: U256,
    /// Outstanding liquidity shares, the locked minimum included.
    pub total_supply: Liquidity,
    /// Swap and protocol fees.
    pub params: PoolParams,
    /// Per-pool administrator.
    pub admin: Address,
}

/// Result of [`Pair::mint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintOutcome {
    /// Shares owed to the depositor.
    pub liquidity: Liquidity,
    /// Shares locked away by a first deposit.
    pub locked: Liquidity,
    /// Shares owed to the protocol fee recipient.
    pub protocol_fee: Liquidity,
    /// Token0 deposited.
    pub amount0: Amount,
    /// Token1 deposited.
    pub amount1: Amount,
}

/// Result of [`Pair::burn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnOutcome {
    /// Token0 owed to the withdrawer.
    pub amount0: Amount,
    /// Token1 owed to the withdrawer.
    pub amount1: Amount,
    /// Shares owed to the protocol fee recipient.
    pub protocol_fee: Liquidity,
}

/// Result of [`Pair::settle_swap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SwapOutcome {
    /// Token0 paid in.
    pub amount0_in: Amount,
    /// Token1 paid in.
    pub amount1_in: Amount,
    /// Token0 paid out.
    pub amount0_out: Amount,
    /// Token1 paid out.
    pub amount1_out: Amount,
}

/// One constant-product pool.
///
/// # Example
///
/// ```rust
/// use hydra_dex::config::PoolParams;
/// use hydra_dex::domain::{Address, Amount, PairKey};
/// use hydra_dex::pools::Pair;
///
/// let (a, b) = (Address::from_low_u64(1), Address::from_low_u64(2));
/// let key = PairKey::new(a, b).expect("distinct tokens");
/// let mut pair = Pair::new(Address::from_low_u64(99), key, PoolParams::default(), a, 0);
///
/// let minted = pair
///     .mint(Amount::new(1_000_000), Amount::new(1_000_000), 1, false)
///     .expect("first deposit");
/// assert_eq!(minted.liquidity.get(), 1_000_000 - 1_000);
///
/// let out = pair
///     .swap_exact_in(Amount::new(10_000), a, Amount::ZERO, 2)
///     .expect("swap");
/// assert!(out.get() > 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    address: Address,
    key: PairKey,
    reserve0: Amount,
    reserve1: Amount,
    last_update: u64,
    price0_cumulative: U256,
    price1_cumulative: U256,
    k_last: U256,
    total_supply: Liquidity,
    params: PoolParams,
    admin: Address,
    locked: bool,
}

impl Pair {
    /// A freshly created, empty pool.
    #[must_use]
    pub fn new(
        address: Address,
        key: PairKey,
        params: PoolParams,
        admin: Address,
        now: u64,
    ) -> Self {
        Self {
            address,
            key,
            reserve0: Amount::ZERO,
            reserve1: Amount::ZERO,
            last_update: now,
            price0_cumulative: U256::zero(),
            price1_cumulative: U256::zero(),
            k_last: U256::zero(),
            total_supply: Liquidity::ZERO,
            params,
            admin,
            locked: false,
        }
    }

    /// Pool identity.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Canonical token pair.
    #[must_use]
    pub const fn key(&self) -> PairKey {
        self.key
    }

    /// Lower token.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.key.token0()
    }

    /// Upper token.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.key.token1()
    }

    /// Cached reserves.
    #[must_use]
    pub const fn reserves(&self) -> Reserves {
        Reserves {
            reserve0: self.reserve0,
            reserve1: self.reserve1,
            last_update: self.last_update,
        }
    }

    /// `(reserve_in, reserve_out)` for a trade selling `token_in`.
    ///
    /// # Errors
    ///
    /// [`DexError::InvalidPath`] if `token_in` is not in the pair.
    pub fn oriented_reserves(&self, token_in: Address) -> Result<(Amount, Amount)> {
        if token_in == self.token0() {
            Ok((self.reserve0, self.reserve1))
        } else if token_in == self.token1() {
            Ok((self.reserve1, self.reserve0))
        } else {
            Err(DexError::InvalidPath)
        }
    }

    /// Outstanding liquidity shares.
    #[must_use]
    pub const fn total_supply(&self) -> Liquidity {
        self.total_supply
    }

    /// Swap and protocol fees.
    #[must_use]
    pub const fn params(&self) -> PoolParams {
        self.params
    }

    /// Per-pool administrator.
    #[must_use]
    pub const fn admin(&self) -> Address {
        self.admin
    }

    /// Full snapshot.
    #[must_use]
    pub fn info(&self) -> PairInfo {
        PairInfo {
            address: self.address,
            token0: self.token0(),
            token1: self.token1(),
            reserves: self.reserves(),
            price0_cumulative: self.price0_cumulative,
            price1_cumulative: self.price1_cumulative,
            k_last: self.k_last,
            total_supply: self.total_supply,
            params: self.params,
            admin: self.admin,
        }
    }

    pub(crate) fn set_admin(&mut self, admin: Address) {
        self.admin = admin;
    }

    pub(crate) fn params_mut(&mut self) -> &mut PoolParams {
        &mut self.params
    }

    pub(crate) fn lock_flag(&mut self) -> &mut bool {
        &mut self.locked
    }

    /// Credits shares for whatever was deposited since the last update.
    ///
    /// `balance0`/`balance1` are the pool's token balances after the
    /// depositor's transfer.  `fee_on` enables protocol-fee accrual.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientLiquidityMinted`] if the deposit is worth
    ///   zero shares, or a first deposit does not exceed the locked
    ///   minimum.
    /// - [`DexError::Underflow`] if a balance is below its reserve.
    /// - [`DexError::Overflow`] if a balance exceeds 2¹¹²−1.
    pub fn mint(
        &mut self,
        balance0: Amount,
        balance1: Amount,
        now: u64,
        fee_on: bool,
    ) -> Result<MintOutcome> {
        let amount0 = balance0.safe_sub(&self.reserve0)?;
        let amount1 = balance1.safe_sub(&self.reserve1)?;
        check_reserve_bounds(balance0, balance1)?;

        let protocol_fee = self.accrue_protocol_fee(fee_on)?;
        let supply = self.total_supply;
        let (liquidity, locked) = if supply.is_zero() {
            let root = narrow(sqrt(product(amount0.get(), amount1.get())), "root of deposit")?;
            match root.checked_sub(MINIMUM_LIQUIDITY.get()) {
                Some(shares) if shares > 0 => (Liquidity::new(shares), MINIMUM_LIQUIDITY),
                _ => return Err(DexError::InsufficientLiquidityMinted),
            }
        } else {
            let by0 = mul_div(amount0.get(), supply.get(), self.reserve0.get(), Rounding::Down)?;
            let by1 = mul_div(amount1.get(), supply.get(), self.reserve1.get(), Rounding::Down)?;
            (Liquidity::new(by0.min(by1)), Liquidity::ZERO)
        };
        if liquidity.is_zero() {
            return Err(DexError::InsufficientLiquidityMinted);
        }

        self.total_supply = supply.safe_add(&locked)?.safe_add(&liquidity)?;
        self.update(balance0, balance1, now)?;
        if fee_on {
            self.k_last = product(self.reserve0.get(), self.reserve1.get());
        }
        Ok(MintOutcome {
            liquidity,
            locked,
            protocol_fee,
            amount0,
            amount1,
        })
    }

    /// Redeems `liquidity` shares against the pool's current balances.
    ///
    /// The caller burns the shares and pays out the returned amounts.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientLiquidityBurned`] if either side rounds
    ///   to zero.
    /// - [`DexError::Underflow`] if `liquidity` exceeds the supply.
    pub fn burn(
        &mut self,
        liquidity: Liquidity,
        balance0: Amount,
        balance1: Amount,
        now: u64,
        fee_on: bool,
    ) -> Result<BurnOutcome> {
        check_reserve_bounds(balance0, balance1)?;
        let protocol_fee = self.accrue_protocol_fee(fee_on)?;
        let supply = self.total_supply;
        if supply.is_zero() {
            return Err(DexError::InsufficientLiquidityBurned);
        }
        let amount0 = Amount::new(mul_div(
            liquidity.get(),
            balance0.get(),
            supply.get(),
            Rounding::Down,
        )?);
        let amount1 = Amount::new(mul_div(
            liquidity.get(),
            balance1.get(),
            supply.get(),
            Rounding::Down,
        )?);
        if amount0.is_zero() || amount1.is_zero() {
            return Err(DexError::InsufficientLiquidityBurned);
        }

        self.total_supply = supply.safe_sub(&liquidity)?;
        self.update(balance0.safe_sub(&amount0)?, balance1.safe_sub(&amount1)?, now)?;
        if fee_on {
            self.k_last = product(self.reserve0.get(), self.reserve1.get());
        }
        Ok(BurnOutcome {
            amount0,
            amount1,
            protocol_fee,
        })
    }

    /// Validates a low-level swap request before any token moves.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientOutputAmount`] if both outputs are zero.
    /// - [`DexError::InsufficientLiquidity`] if an output reaches its
    ///   reserve.
    /// - [`DexError::InvalidPayload`] if `to` is one of the pool tokens.
    pub fn check_swap(&self, amount0_out: Amount, amount1_out: Amount, to: Address) -> Result<()> {
        self.check_outputs(amount0_out, amount1_out)?;
        if to == self.token0() || to == self.token1() {
            return Err(DexError::InvalidPayload("swap recipient is a pool token"));
        }
        Ok(())
    }

    fn check_outputs(&self, amount0_out: Amount, amount1_out: Amount) -> Result<()> {
        if amount0_out.is_zero() && amount1_out.is_zero() {
            return Err(DexError::InsufficientOutputAmount);
        }
        if amount0_out >= self.reserve0 || amount1_out >= self.reserve1 {
            return Err(DexError::InsufficientLiquidity);
        }
        Ok(())
    }

    /// Completes a swap once the outputs left the pool.
    ///
    /// `balance0`/`balance1` are the pool's balances after the optimistic
    /// payout; whatever exceeds `reserve − out` counts as input.
    ///
    /// # Errors
    ///
    /// - Any [`Pair::check_swap`] amount error.
    /// - [`DexError::InsufficientInputAmount`] if nothing was paid in.
    /// - [`DexError::ConstantProduct`] if the fee-adjusted product shrank.
    /// - [`DexError::InvariantViolation`] if the raw product shrank.
    pub fn settle_swap(
        &mut self,
        amount0_out: Amount,
        amount1_out: Amount,
        balance0: Amount,
        balance1: Amount,
        now: u64,
    ) -> Result<SwapOutcome> {
        self.check_outputs(amount0_out, amount1_out)?;
        check_reserve_bounds(balance0, balance1)?;

        let amount0_in = paid_in(balance0, self.reserve0, amount0_out);
        let amount1_in = paid_in(balance1, self.reserve1, amount1_out);
        if amount0_in.is_zero() && amount1_in.is_zero() {
            return Err(DexError::InsufficientInputAmount);
        }

        let scale = U256::from(BPS_DENOMINATOR);
        let fee = U256::from(self.params.swap_fee().get());
        let adjusted0 = wide(balance0.get()) * scale - wide(amount0_in.get()) * fee;
        let adjusted1 = wide(balance1.get()) * scale - wide(amount1_in.get()) * fee;
        let k_before = product(self.reserve0.get(), self.reserve1.get());
        if adjusted0 * adjusted1 < k_before * scale * scale {
            return Err(DexError::ConstantProduct);
        }

        self.update(balance0, balance1, now)?;
        if product(self.reserve0.get(), self.reserve1.get()) < k_before {
            return Err(DexError::InvariantViolation("reserve product decreased"));
        }
        Ok(SwapOutcome {
            amount0_in,
            amount1_in,
            amount0_out,
            amount1_out,
        })
    }

    /// Sells exactly `amount_in` of `token_in` against the reserves alone.
    ///
    /// This is the pool-only view of a swap, without a ledger: the input
    /// is assumed paid and the output assumed delivered.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidPath`] if `token_in` is not in the pair.
    /// - [`DexError::InsufficientOutputAmount`] below `min_out`.
    /// - Any [`quote::amount_out`] or [`Pair::settle_swap`] error.
    pub fn swap_exact_in(
        &mut self,
        amount_in: Amount,
        token_in: Address,
        min_out: Amount,
        now: u64,
    ) -> Result<Amount> {
        let (reserve_in, reserve_out) = self.oriented_reserves(token_in)?;
        let amount_out =
            quote::amount_out(amount_in, reserve_in, reserve_out, self.params.swap_fee())?;
        if amount_out < min_out {
            return Err(DexError::InsufficientOutputAmount);
        }
        if token_in == self.token0() {
            let balance0 = self.reserve0.safe_add(&amount_in)?;
            let balance1 = self.reserve1.safe_sub(&amount_out)?;
            self.settle_swap(Amount::ZERO, amount_out, balance0, balance1, now)?;
        } else {
            let balance0 = self.reserve0.safe_sub(&amount_out)?;
            let balance1 = self.reserve1.safe_add(&amount_in)?;
            self.settle_swap(amount_out, Amount::ZERO, balance0, balance1, now)?;
        }
        Ok(amount_out)
    }

    /// Excess of `balance0`/`balance1` over the reserves.
    #[must_use]
    pub fn excess(&self, balance0: Amount, balance1: Amount) -> (Amount, Amount) {
        (
            balance0.saturating_sub(&self.reserve0),
            balance1.saturating_sub(&self.reserve1),
        )
    }

    /// Forces the reserves to match the pool's balances.
    ///
    /// # Errors
    ///
    /// [`DexError::Overflow`] if a balance exceeds 2¹¹²−1.
    pub fn sync(&mut self, balance0: Amount, balance1: Amount, now: u64) -> Result<()> {
        check_reserve_bounds(balance0, balance1)?;
        self.update(balance0, balance1, now)
    }

    // Accumulate the price of the interval that just ended, then adopt
    // the new reserves.
    fn update(&mut self, balance0: Amount, balance1: Amount, now: u64) -> Result<()> {
        check_reserve_bounds(balance0, balance1)?;
        let elapsed = now.saturating_sub(self.last_update);
        if elapsed > 0 && !self.reserve0.is_zero() && !self.reserve1.is_zero() {
            let (r0, r1) = (self.reserve0.get(), self.reserve1.get());
            self.price0_cumulative =
                accumulate(self.price0_cumulative, q112_ratio(r1, r0), elapsed);
            self.price1_cumulative =
                accumulate(self.price1_cumulative, q112_ratio(r0, r1), elapsed);
        }
        self.reserve0 = balance0;
        self.reserve1 = balance1;
        self.last_update = self.last_update.max(now);
        Ok(())
    }

    fn accrue_protocol_fee(&mut self, fee_on: bool) -> Result<Liquidity> {
        if !fee_on {
            self.k_last = U256::zero();
            return Ok(Liquidity::ZERO);
        }
        if self.k_last.is_zero() {
            return Ok(Liquidity::ZERO);
        }
        let root_k = sqrt(product(self.reserve0.get(), self.reserve1.get()));
        let root_k_last = sqrt(self.k_last);
        if root_k <= root_k_last {
            return Ok(Liquidity::ZERO);
        }

        let share = U256::from(self.params.protocol_fee().get());
        let rest = U256::from(self.params.protocol_fee().complement());
        let numerator = wide(self.total_supply.get()) * (root_k - root_k_last) * share;
        let denominator = root_k * rest + root_k_last * share;
        if denominator.is_zero() {
            return Ok(Liquidity::ZERO);
        }
        let minted = Liquidity::new(narrow(numerator / denominator, "protocol fee shares")?);
        if !minted.is_zero() {
            self.total_supply = self.total_supply.safe_add(&minted)?;
        }
        Ok(minted)
    }
}

fn paid_in(balance: Amount, reserve: Amount, out: Amount) -> Amount {
    balance.saturating_sub(&reserve.saturating_sub(&out))
}

fn check_reserve_bounds(balance0: Amount, balance1: Amount) -> Result<()> {
    if balance0.get() > MAX_RESERVE || balance1.get() > MAX_RESERVE {
        return Err(DexError::Overflow("reserve exceeds 112 bits"));
    }
    Ok(())
}
