//! Fixed-point helpers
//!
//! Every ratio in the market uses an 18-decimal scale: `WAD` (`1e18`)
//! represents 1.0. Products are formed exactly and divided once, so the
//! truncation order of each formula is preserved.

use anchor_lang::prelude::*;
use num_bigint::BigUint;

use super::AmmError;

/// 1.0 in 18-decimal fixed point
pub const WAD: u128 = 1_000_000_000_000_000_000;

/// `WAD * WAD`, the divisor of a price computed from two scaled factors
pub const WAD_SQUARED: u128 = WAD * WAD;

/// Computes `floor(f0 * f1 * ... * fn / divisor)` without intermediate
/// overflow and narrows the result to `u64`.
pub fn mul_div(factors: &[u128], divisor: u128) -> Result<u64> {
    require!(divisor > 0, AmmError::DivisionByZero);

    let product = factors
        .iter()
        .fold(BigUint::from(1u8), |acc, factor| acc * BigUint::from(*factor));
    let quotient = product / BigUint::from(divisor);

    u64::try_from(&quotient).map_err(|_| error!(AmmError::Overflow))
}

/// Claim units backed by `collateral`: `collateral * 1e18 / claim_value`.
pub fn claims_for_collateral(collateral: u64, claim_value: u128) -> Result<u64> {
    mul_div(&[collateral as u128, WAD], claim_value)
}

/// Collateral owed for `claims`: `claims * claim_value / 1e18`.
pub fn collateral_for_claims(claims: u64, claim_value: u128) -> Result<u64> {
    mul_div(&[claims as u128, claim_value], WAD)
}
