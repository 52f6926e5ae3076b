//! # Trapezoidal Probability Curve
//!
//! This module prices YES/NO claims from the market's own reserves.
//!
//! ## Implied probability
//!
//! Claims the market does not hold are "sold" into circulation. The implied
//! probability of an outcome is its share of everything sold:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │   sold(X)  = supply - reserve(X)                             │
//! │   P(X)     = sold(X) * 1e18 / (sold(YES) + sold(NO))         │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Buying X from the market moves claims out of `reserve(X)`, so `P(X)`
//! rises; selling X back lowers it.
//!
//! ## Price of a trade
//!
//! A trade of `amount` claims is priced at the average of the probability
//! before and after the trade, scaled by the claim value:
//!
//! ```text
//! 1. P_before = P(X) on current reserves
//! 2. P_after  = P(X) with reserve(X) -/+ amount
//! 3. P_avg    = (P_before + P_after) / 2
//! 4. price    = claim_value * P_avg * amount / (1e18 * 1e18)
//! ```
//!
//! The trapezoid is the pricing rule itself, not an approximation of an
//! integral computed elsewhere.
//!
//! ## Reference value
//!
//! The same trade valued at the lower end of the trapezoid,
//! `min(P_before, P_after)`, is the reference. A buy and the sell that
//! undoes it share both endpoints, so they have the same price and the
//! same reference; the spread `price - reference` is what the market
//! collects on the way in and pays back on the way out.

use anchor_lang::prelude::*;

use super::math::{mul_div, WAD, WAD_SQUARED};
use super::Reserves;
use crate::state::Outcome;

/// Errors specific to pricing and reserve snapshots
///
/// Offset keeps these codes clear of the program-level `MarketError`.
#[error_code(offset = 6100)]
pub enum AmmError {
    #[msg("Arithmetic overflow")]
    Overflow,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Trade exceeds the market's claim reserve")]
    InsufficientLiquidity,
    #[msg("Cannot sell more claims than are in circulation")]
    InsufficientClaims,
    #[msg("No claims are in circulation; probability is undefined")]
    NoClaimsInCirculation,
    #[msg("Claim ledgers disagree with the market's reserves")]
    LedgerInconsistent,
}

/// Direction of a trade, from the trader's point of view
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TradeSide {
    /// Trader receives claims from the market's reserve
    Buy,
    /// Trader returns claims into the market's reserve
    Sell,
}

/// Result of pricing one trade against a reserve snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quote {
    /// Collateral paid by a buyer or received by a seller
    pub price: u64,
    /// The trade valued at the lower of the two probabilities
    pub reference: u64,
    pub probability_before: u128,
    pub probability_after: u128,
}

impl Quote {
    /// `price - reference`; the average never falls below the lower end.
    pub fn spread(&self) -> u64 {
        self.price.saturating_sub(self.reference)
    }
}

/// Trapezoidal probability curve for binary markets
pub struct TrapezoidCurve;

impl TrapezoidCurve {
    /// Share of `total_sold` held in circulation as claims of one side,
    /// scaled by 1e18.
    ///
    /// Fails with `NoClaimsInCirculation` when nothing has been sold.
    pub fn probability(sold: u128, total_sold: u128) -> Result<u128> {
        require!(total_sold > 0, AmmError::NoClaimsInCirculation);

        let scaled = sold.checked_mul(WAD).ok_or(AmmError::Overflow)?;
        Ok(scaled / total_sold)
    }

    /// Implied probability of `outcome` on the given reserves
    pub fn implied_probability(reserves: &Reserves, outcome: Outcome) -> Result<u128> {
        Self::probability(reserves.sold(outcome) as u128, reserves.total_sold())
    }

    /// Prices a trade of `amount` claims of `outcome`.
    ///
    /// # Arguments
    /// * `reserves` - Snapshot of both reserves and the claim supply
    /// * `claim_value` - Collateral per claim, scaled by 1e18
    /// * `outcome` - Claim being traded
    /// * `amount` - Claims moved between trader and market
    /// * `side` - Buy takes claims out of the reserve, sell puts them back
    ///
    /// # Example
    /// ```ignore
    /// // supply 1e9, both reserves 1e8, claim value 1.0
    /// // buying 1e7 YES moves P(YES) from 0.5 to ~0.5028
    /// let quote = TrapezoidCurve::quote(&reserves, WAD, Outcome::Yes, 10_000_000, TradeSide::Buy)?;
    /// // quote.price == 5_013_812, quote.reference == 5_000_000
    /// ```
    pub fn quote(
        reserves: &Reserves,
        claim_value: u128,
        outcome: Outcome,
        amount: u64,
        side: TradeSide,
    ) -> Result<Quote> {
        let reserve_same = reserves.of(outcome);

        // Step 1: a buyer can only take what the market holds
        if side == TradeSide::Buy {
            require!(amount <= reserve_same, AmmError::InsufficientLiquidity);
        }

        // Step 2: circulation before the trade
        let sold_same_before = reserves.sold(outcome) as u128;
        let total_sold_before = reserves.total_sold();

        // Step 3
        let probability_before = Self::probability(sold_same_before, total_sold_before)?;

        // Step 4: simulate the reserve after the trade
        let amount_wide = amount as u128;
        let (sold_same_after, total_sold_after) = match side {
            TradeSide::Buy => (
                sold_same_before + amount_wide,
                total_sold_before + amount_wide,
            ),
            TradeSide::Sell => {
                require!(
                    amount_wide <= sold_same_before,
                    AmmError::InsufficientClaims
                );
                (
                    sold_same_before - amount_wide,
                    total_sold_before - amount_wide,
                )
            }
        };

        // Step 5
        let probability_after = Self::probability(sold_same_after, total_sold_after)?;

        // Step 6: trapezoidal average
        let probability_avg = (probability_before + probability_after) / 2;

        // Step 7
        let probability_low = probability_before.min(probability_after);
        let price = mul_div(&[claim_value, probability_avg, amount_wide], WAD_SQUARED)?;
        let reference = mul_div(&[claim_value, probability_low, amount_wide], WAD_SQUARED)?;

        Ok(Quote {
            price,
            reference,
            probability_before,
            probability_after,
        })
    }

    /// Collateral cost of buying, or proceeds of selling, `amount` claims
    pub fn price_for(
        reserves: &Reserves,
        claim_value: u128,
        outcome: Outcome,
        amount: u64,
        is_selling: bool,
    ) -> Result<u64> {
        let side = if is_selling { TradeSide::Sell } else { TradeSide::Buy };
        Ok(Self::quote(reserves, claim_value, outcome, amount, side)?.price)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// supply 1e9, reserves 1e8 / 1e8: 9e8 of each side sold
    fn balanced() -> Reserves {
        Reserves::new(100_000_000, 100_000_000, 1_000_000_000, 1_000_000_000).unwrap()
    }

    #[test]
    fn test_probability() {
        assert_eq!(TrapezoidCurve::probability(9, 18).unwrap(), WAD / 2);
        assert_eq!(TrapezoidCurve::probability(0, 18).unwrap(), 0);
        assert_eq!(TrapezoidCurve::probability(18, 18).unwrap(), WAD);
        assert_eq!(
            TrapezoidCurve::probability(10, 19).unwrap(),
            526_315_789_473_684_210
        );
    }

    #[test]
    fn test_probability_undefined_without_circulation() {
        assert_eq!(
            TrapezoidCurve::probability(0, 0).unwrap_err(),
            AmmError::NoClaimsInCirculation.into()
        );
    }

    #[test]
    fn test_balanced_market_implies_even_odds() {
        let reserves = balanced();
        let yes = TrapezoidCurve::implied_probability(&reserves, Outcome::Yes).unwrap();
        let no = TrapezoidCurve::implied_probability(&reserves, Outcome::No).unwrap();
        assert_eq!(yes, WAD / 2);
        assert_eq!(yes, no);
    }

    #[test]
    fn test_buy_quote_exact() {
        let quote = TrapezoidCurve::quote(
            &balanced(),
            WAD,
            Outcome::Yes,
            10_000_000,
            TradeSide::Buy,
        )
        .unwrap();

        // 910 / 1810 sold after the trade
        assert_eq!(quote.probability_before, 500_000_000_000_000_000);
        assert_eq!(quote.probability_after, 502_762_430_939_226_519);
        assert_eq!(quote.price, 5_013_812);
        assert_eq!(quote.reference, 5_000_000);
        assert_eq!(quote.spread(), 13_812);
    }

    #[test]
    fn test_sell_quote_mirrors_buy() {
        // State right after buying 1e7 YES from the balanced market
        let reserves =
            Reserves::new(90_000_000, 100_000_000, 1_000_000_000, 1_000_000_000).unwrap();
        let quote =
            TrapezoidCurve::quote(&reserves, WAD, Outcome::Yes, 10_000_000, TradeSide::Sell)
                .unwrap();

        assert_eq!(quote.probability_before, 502_762_430_939_226_519);
        assert_eq!(quote.probability_after, 500_000_000_000_000_000);
        assert_eq!(quote.price, 5_013_812);
        assert_eq!(quote.reference, 5_000_000);
        assert_eq!(quote.spread(), 13_812);
    }

    #[test]
    fn test_undoing_sell_matches_buy_exactly() {
        let before = Reserves::new(140_000_000, 60_000_000, 1_000_000_000, 1_000_000_000).unwrap();
        let buy = TrapezoidCurve::quote(&before, WAD / 3, Outcome::No, 37_000_001, TradeSide::Buy)
            .unwrap();

        let after = Reserves::new(140_000_000, 22_999_999, 1_000_000_000, 1_000_000_000).unwrap();
        let sell = TrapezoidCurve::quote(&after, WAD / 3, Outcome::No, 37_000_001, TradeSide::Sell)
            .unwrap();

        assert_eq!(buy.probability_before, sell.probability_after);
        assert_eq!(buy.probability_after, sell.probability_before);
        assert_eq!(buy.price, sell.price);
        assert_eq!(buy.reference, sell.reference);
        assert!(buy.reference <= buy.price);
    }

    #[test]
    fn test_buy_cannot_exceed_reserve() {
        let err = TrapezoidCurve::price_for(&balanced(), WAD, Outcome::No, 100_000_001, false)
            .unwrap_err();
        assert_eq!(err, AmmError::InsufficientLiquidity.into());

        // The whole reserve is still purchasable
        assert!(TrapezoidCurve::price_for(&balanced(), WAD, Outcome::No, 100_000_000, false).is_ok());
    }

    #[test]
    fn test_sell_cannot_exceed_circulation() {
        let err = TrapezoidCurve::price_for(&balanced(), WAD, Outcome::Yes, 900_000_001, true)
            .unwrap_err();
        assert_eq!(err, AmmError::InsufficientClaims.into());
    }

    #[test]
    fn test_rejects_market_with_nothing_sold() {
        let untouched = Reserves::new(500, 500, 500, 500).unwrap();
        let err = TrapezoidCurve::price_for(&untouched, WAD, Outcome::Yes, 10, false).unwrap_err();
        assert_eq!(err, AmmError::NoClaimsInCirculation.into());
    }

    #[test]
    fn test_selling_everything_in_circulation_is_rejected() {
        // Only YES circulates; selling all of it leaves nothing sold
        let reserves = Reserves::new(0, 1_000, 1_000, 1_000).unwrap();
        let err = TrapezoidCurve::price_for(&reserves, WAD, Outcome::Yes, 1_000, true).unwrap_err();
        assert_eq!(err, AmmError::NoClaimsInCirculation.into());
    }

    #[test]
    fn test_price_scales_with_claim_value() {
        let reserves = balanced();
        let full = TrapezoidCurve::price_for(&reserves, WAD, Outcome::Yes, 10_000_000, false).unwrap();
        let half =
            TrapezoidCurve::price_for(&reserves, WAD / 2, Outcome::Yes, 10_000_000, false).unwrap();
        assert_eq!(half, full / 2);
    }

    #[test]
    fn test_buying_raises_price_of_next_trade() {
        let before = balanced();
        let first = TrapezoidCurve::price_for(&before, WAD, Outcome::Yes, 10_000_000, false).unwrap();

        let after = Reserves::new(90_000_000, 100_000_000, 1_000_000_000, 1_000_000_000).unwrap();
        let second = TrapezoidCurve::price_for(&after, WAD, Outcome::Yes, 10_000_000, false).unwrap();

        assert!(second > first);
    }

    #[test]
    fn test_zero_amount_is_free() {
        let quote = TrapezoidCurve::quote(&balanced(), WAD, Outcome::Yes, 0, TradeSide::Buy).unwrap();
        assert_eq!(quote.price, 0);
        assert_eq!(quote.reference, 0);
    }
}
