//! Settlement
//!
//! After the oracle reports, the owner withdraws the value of the market's
//! own winning reserve plus the accumulated trading revenue, and every
//! other holder redeems winning claims pro-rata against what is left.
//!
//! The reserve's share is set aside whether or not the owner has settled
//! yet, so payouts do not depend on who goes first.

use anchor_lang::prelude::*;

use crate::amm::{collateral_for_claims, mul_div, AmmError};
use crate::errors::MarketError;
use crate::state::{Market, Outcome};

/// Staged `resolve_and_withdraw`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub winner: Outcome,
    /// Whole winning reserve, burned from the market's account
    pub burned: u64,
    /// Collateral released for the burned reserve
    pub redeemed: u64,
    /// `redeemed + lp_trading_revenue`, sent to the owner
    pub payout: u64,
}

/// Staged holder redemption
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Redemption {
    pub winner: Outcome,
    pub burned: u64,
    pub payout: u64,
}

impl Market {
    /// Collateral owed to `reserve` winning claims held by the market
    fn reserve_value(&self, reserve: u64) -> Result<u64> {
        Ok(collateral_for_claims(reserve, self.initial_claim_value)?.min(self.collateral_balance))
    }

    /// `redeemed = min(reserve * claim_value / 1e18, collateral_balance)`
    ///
    /// Takes raw reserve balances: once redemptions start burning only the
    /// winning claim, the two supplies no longer match.
    pub fn plan_resolution(
        &self,
        caller: &Pubkey,
        yes_reserve: u64,
        no_reserve: u64,
    ) -> Result<Resolution> {
        self.require_owner(caller)?;
        let winner = self.require_reported()?;

        let burned = match winner {
            Outcome::Yes => yes_reserve,
            Outcome::No => no_reserve,
        };
        let redeemed = self.reserve_value(burned)?;
        let payout = redeemed
            .checked_add(self.lp_trading_revenue)
            .ok_or(MarketError::MathOverflow)?;

        Ok(Resolution {
            winner,
            burned,
            redeemed,
            payout,
        })
    }

    pub fn commit_resolution(&mut self, resolution: &Resolution) -> Result<()> {
        self.collateral_balance = self
            .collateral_balance
            .checked_sub(resolution.redeemed)
            .ok_or(MarketError::InsufficientCollateral)?;
        self.lp_trading_revenue = 0;
        Ok(())
    }

    /// ```text
    /// pool   = collateral_balance - reserve_value(winning_reserve)
    /// payout = balance * pool / (winning_supply - winning_reserve)
    /// ```
    pub fn plan_redemption(
        &self,
        holder_balance: u64,
        winning_supply: u64,
        winning_reserve: u64,
    ) -> Result<Redemption> {
        let winner = self.require_reported()?;
        require!(holder_balance > 0, MarketError::NoWinningClaims);

        let circulating = winning_supply
            .checked_sub(winning_reserve)
            .ok_or(AmmError::LedgerInconsistent)?;
        require!(holder_balance <= circulating, AmmError::LedgerInconsistent);

        let pool = self
            .collateral_balance
            .checked_sub(self.reserve_value(winning_reserve)?)
            .ok_or(MarketError::InsufficientCollateral)?;
        let payout = mul_div(
            &[holder_balance as u128, pool as u128],
            circulating as u128,
        )?;

        Ok(Redemption {
            winner,
            burned: holder_balance,
            payout,
        })
    }

    pub fn commit_redemption(&mut self, redemption: &Redemption) -> Result<()> {
        self.collateral_balance = self
            .collateral_balance
            .checked_sub(redemption.payout)
            .ok_or(MarketError::InsufficientCollateral)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::WAD;
    use crate::state::testing::{open_market, ClaimBook};

    /// Balanced market where a trader bought 1e7 YES, then YES was reported
    fn reported_after_trade() -> (Market, ClaimBook) {
        let (mut market, mut book) = open_market(1_000_000_000, WAD, 50, 10);
        let plan = market
            .plan_buy(&book.reserves(), Outcome::Yes, 10_000_000, u64::MAX)
            .unwrap();
        book.trade(&plan);
        market.commit_trade(&plan).unwrap();

        let oracle = market.oracle;
        market.report(&oracle, Outcome::Yes).unwrap();
        (market, book)
    }

    #[test]
    fn test_resolution_requires_report() {
        let (market, book) = open_market(10, WAD, 50, 10);
        let owner = market.owner;
        assert_eq!(
            market.plan_resolution(&owner, book.yes_reserve, book.no_reserve).unwrap_err(),
            MarketError::NotYetReported.into()
        );
    }

    #[test]
    fn test_resolution_is_owner_only() {
        let (market, book) = reported_after_trade();
        assert_eq!(
            market
                .plan_resolution(&market.oracle, book.yes_reserve, book.no_reserve)
                .unwrap_err(),
            MarketError::Unauthorized.into()
        );
    }

    #[test]
    fn test_resolution_pays_reserve_and_revenue() {
        let (mut market, mut book) = reported_after_trade();
        let owner = market.owner;
        let balance_before = market.collateral_balance;

        let resolution = market.plan_resolution(&owner, book.yes_reserve, book.no_reserve).unwrap();
        book.resolve(&resolution);
        market.commit_resolution(&resolution).unwrap();

        assert_eq!(resolution.burned, 90_000_000);
        assert_eq!(resolution.redeemed, 90_000_000);
        assert_eq!(resolution.payout, 90_013_812);
        assert!(resolution.redeemed <= balance_before);
        assert_eq!(market.collateral_balance, 915_000_000);
        assert_eq!(market.lp_trading_revenue, 0);
        assert_eq!(book.yes_reserve, 0);
        book.assert_consistent(&market);
    }

    #[test]
    fn test_redeemed_is_capped_by_collateral() {
        let (mut market, book) = reported_after_trade();
        let owner = market.owner;
        market.collateral_balance = 5;

        let resolution = market.plan_resolution(&owner, book.yes_reserve, book.no_reserve).unwrap();

        assert_eq!(resolution.redeemed, 5);
        assert_eq!(resolution.payout, 5 + market.lp_trading_revenue);
    }

    #[test]
    fn test_second_resolution_finds_nothing() {
        let (mut market, mut book) = reported_after_trade();
        let owner = market.owner;

        let first = market.plan_resolution(&owner, book.yes_reserve, book.no_reserve).unwrap();
        book.resolve(&first);
        market.commit_resolution(&first).unwrap();

        let second = market.plan_resolution(&owner, book.yes_reserve, book.no_reserve).unwrap();
        assert_eq!(second.burned, 0);
        assert_eq!(second.redeemed, 0);
        assert_eq!(second.payout, 0);
    }

    #[test]
    fn test_losing_reserve_is_not_redeemed() {
        let (mut market, book) = open_market(1_000_000_000, WAD, 70, 10);
        let owner = market.owner;
        let oracle = market.oracle;
        market.report(&oracle, Outcome::No).unwrap();

        let resolution = market.plan_resolution(&owner, book.yes_reserve, book.no_reserve).unwrap();
        assert_eq!(resolution.winner, Outcome::No);
        assert_eq!(resolution.burned, 60_000_000);
        assert_eq!(resolution.redeemed, 60_000_000);
    }

    #[test]
    fn test_full_settlement_drains_vault_exactly() {
        let (mut market, mut book) = reported_after_trade();
        let owner = market.owner;

        let resolution = market.plan_resolution(&owner, book.yes_reserve, book.no_reserve).unwrap();
        book.resolve(&resolution);
        market.commit_resolution(&resolution).unwrap();

        let creator = market
            .plan_redemption(book.creator_yes, book.yes_supply, book.yes_reserve)
            .unwrap();
        book.redeem_creator(&creator);
        market.commit_redemption(&creator).unwrap();
        assert_eq!(creator.payout, 904_945_054);

        let trader = market
            .plan_redemption(book.trader_yes, book.yes_supply, book.yes_reserve)
            .unwrap();
        book.redeem_trader(&trader);
        market.commit_redemption(&trader).unwrap();
        assert_eq!(trader.payout, 10_054_946);

        assert_eq!(market.collateral_balance, 0);
        assert_eq!(book.vault, 0);
        assert_eq!(book.yes_supply, 0);
        assert_ne!(book.yes_supply, book.no_supply);
        book.assert_consistent(&market);
    }

    #[test]
    fn test_holders_before_owner_get_the_same_payouts() {
        let (mut market, mut book) = reported_after_trade();
        let owner = market.owner;

        let creator = market
            .plan_redemption(book.creator_yes, book.yes_supply, book.yes_reserve)
            .unwrap();
        book.redeem_creator(&creator);
        market.commit_redemption(&creator).unwrap();
        assert_eq!(creator.payout, 904_945_054);
        assert_eq!(market.collateral_balance, 100_054_946);

        let trader = market
            .plan_redemption(book.trader_yes, book.yes_supply, book.yes_reserve)
            .unwrap();
        book.redeem_trader(&trader);
        market.commit_redemption(&trader).unwrap();
        assert_eq!(trader.payout, 10_054_946);

        // The reserve's value was left in place for the owner
        let resolution = market
            .plan_resolution(&owner, book.yes_reserve, book.no_reserve)
            .unwrap();
        book.resolve(&resolution);
        market.commit_resolution(&resolution).unwrap();
        assert_eq!(resolution.redeemed, 90_000_000);
        assert_eq!(resolution.payout, 90_013_812);

        assert_eq!(market.collateral_balance, 0);
        assert_eq!(book.vault, 0);
        assert_eq!(book.yes_supply, 0);
        book.assert_consistent(&market);
    }

    #[test]
    fn test_interleaved_settlement_drains_vault_exactly() {
        let (mut market, mut book) = reported_after_trade();
        let owner = market.owner;

        let trader = market
            .plan_redemption(book.trader_yes, book.yes_supply, book.yes_reserve)
            .unwrap();
        book.redeem_trader(&trader);
        market.commit_redemption(&trader).unwrap();

        let resolution = market
            .plan_resolution(&owner, book.yes_reserve, book.no_reserve)
            .unwrap();
        book.resolve(&resolution);
        market.commit_resolution(&resolution).unwrap();

        let creator = market
            .plan_redemption(book.creator_yes, book.yes_supply, book.yes_reserve)
            .unwrap();
        book.redeem_creator(&creator);
        market.commit_redemption(&creator).unwrap();

        assert_eq!(trader.payout, 10_054_945);
        assert_eq!(resolution.payout, 90_013_812);
        assert_eq!(creator.payout, 904_945_055);
        assert_eq!(book.vault, 0);
        book.assert_consistent(&market);
    }

    #[test]
    fn test_redemption_rules() {
        let (market, book) = open_market(10, WAD, 50, 10);
        assert_eq!(
            market.plan_redemption(5, book.yes_supply, book.yes_reserve).unwrap_err(),
            MarketError::NotYetReported.into()
        );

        let (market, book) = reported_after_trade();
        assert_eq!(
            market.plan_redemption(0, book.yes_supply, book.yes_reserve).unwrap_err(),
            MarketError::NoWinningClaims.into()
        );
        assert_eq!(
            market
                .plan_redemption(book.yes_supply, book.yes_supply, book.yes_reserve)
                .unwrap_err(),
            AmmError::LedgerInconsistent.into()
        );
    }
}
