//! Reserve Accounting
//!
//! Keeps `collateral_balance`, `lp_trading_revenue` and the two claim
//! reserves consistent with each other.
//!
//! Every operation is split in two:
//! - `plan_*` checks identity, phase and balances against an immutable
//!   snapshot and returns the exact deltas,
//! - `commit_*` applies those deltas to the account once every token
//!   transfer of the instruction has succeeded.
//!
//! Nothing is written to the `Market` if a plan fails or a transfer is
//! rejected.

use anchor_lang::prelude::*;

use crate::amm::{claims_for_collateral, Reserves, TradeSide, TrapezoidCurve};
use crate::errors::MarketError;
use crate::state::{Market, Outcome};

const PERCENT_SQUARED: u128 = 10_000;

/// Claims minted to the creator at construction and the share of them
/// moved back into the market's reserves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitialPosition {
    /// `funding * 1e18 / claim_value`, minted on both sides
    pub claim_amount: u64,
    pub yes_locked: u64,
    pub no_locked: u64,
}

impl InitialPosition {
    /// Validates creation parameters and splits the initial claims:
    ///
    /// ```text
    /// yes_locked = N * p         * lock * 2 / 10000
    /// no_locked  = N * (100 - p) * lock * 2 / 10000
    /// ```
    pub fn compute(
        funding: u64,
        claim_value: u128,
        yes_probability: u8,
        percentage_locked: u8,
    ) -> Result<Self> {
        require!(funding > 0, MarketError::InvalidFunding);
        require!(claim_value > 0, MarketError::InvalidClaimValue);
        require!(
            (1..=99).contains(&yes_probability),
            MarketError::InvalidProbability
        );
        require!(
            (1..=99).contains(&percentage_locked),
            MarketError::InvalidLockPercentage
        );

        let claim_amount = claims_for_collateral(funding, claim_value)?;
        require!(claim_amount > 0, MarketError::InvalidClaimValue);

        let yes_locked = Self::locked(claim_amount, yes_probability, percentage_locked)?;
        let no_locked = Self::locked(claim_amount, 100 - yes_probability, percentage_locked)?;

        // The creator cannot hand over more claims than were minted to it
        require!(
            yes_locked <= claim_amount && no_locked <= claim_amount,
            MarketError::ClaimTransferFailed
        );

        Ok(Self {
            claim_amount,
            yes_locked,
            no_locked,
        })
    }

    fn locked(claim_amount: u64, probability: u8, percentage_locked: u8) -> Result<u64> {
        let locked = (claim_amount as u128)
            .checked_mul(probability as u128)
            .and_then(|v| v.checked_mul(percentage_locked as u128))
            .and_then(|v| v.checked_mul(2))
            .ok_or(MarketError::MathOverflow)?
            / PERCENT_SQUARED;

        u64::try_from(locked).map_err(|_| error!(MarketError::MathOverflow))
    }

    /// Reserves held by the market right after construction
    pub fn reserves(&self) -> Result<Reserves> {
        Reserves::new(
            self.yes_locked,
            self.no_locked,
            self.claim_amount,
            self.claim_amount,
        )
    }
}

/// Deltas of one liquidity change; `claims` applies to both sides equally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiquidityChange {
    pub collateral: u64,
    pub claims: u64,
}

/// Staged buy or sell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradePlan {
    pub outcome: Outcome,
    pub side: TradeSide,
    /// Claims moved between trader and reserve
    pub claims: u64,
    /// Cost paid by a buyer, or proceeds paid to a seller
    pub collateral: u64,
    /// Part of `collateral` added to, or taken from, `collateral_balance`
    pub balance_change: u64,
    /// Part of `collateral` added to, or taken from, `lp_trading_revenue`
    pub revenue_change: u64,
}

impl Market {
    /// `add_liquidity`: mints `amount * 1e18 / claim_value` of both claims
    /// into the reserves.
    pub fn plan_add_liquidity(&self, caller: &Pubkey, amount: u64) -> Result<LiquidityChange> {
        self.require_owner(caller)?;
        self.require_open()?;
        require!(amount > 0, MarketError::ZeroAmount);

        let claims = claims_for_collateral(amount, self.initial_claim_value)?;
        require!(
            self.collateral_balance.checked_add(amount).is_some(),
            MarketError::MathOverflow
        );

        Ok(LiquidityChange {
            collateral: amount,
            claims,
        })
    }

    /// `remove_liquidity`: burns the matching claims from both reserves.
    pub fn plan_remove_liquidity(
        &self,
        caller: &Pubkey,
        amount: u64,
        reserves: &Reserves,
    ) -> Result<LiquidityChange> {
        self.require_owner(caller)?;
        self.require_open()?;
        require!(amount > 0, MarketError::ZeroAmount);

        let claims = claims_for_collateral(amount, self.initial_claim_value)?;
        require!(
            reserves.of(Outcome::Yes) >= claims,
            MarketError::InsufficientYesReserve
        );
        require!(
            reserves.of(Outcome::No) >= claims,
            MarketError::InsufficientNoReserve
        );
        require!(
            self.collateral_balance >= amount,
            MarketError::InsufficientCollateral
        );

        Ok(LiquidityChange {
            collateral: amount,
            claims,
        })
    }

    pub fn commit_add_liquidity(&mut self, change: &LiquidityChange) -> Result<()> {
        self.collateral_balance = self
            .collateral_balance
            .checked_add(change.collateral)
            .ok_or(MarketError::MathOverflow)?;
        Ok(())
    }

    pub fn commit_remove_liquidity(&mut self, change: &LiquidityChange) -> Result<()> {
        self.collateral_balance = self
            .collateral_balance
            .checked_sub(change.collateral)
            .ok_or(MarketError::InsufficientCollateral)?;
        Ok(())
    }

    /// Buys `amount` claims of `outcome` for at most `max_cost` collateral.
    pub fn plan_buy(
        &self,
        reserves: &Reserves,
        outcome: Outcome,
        amount: u64,
        max_cost: u64,
    ) -> Result<TradePlan> {
        self.require_open()?;
        require!(amount > 0, MarketError::ZeroAmount);

        let quote = TrapezoidCurve::quote(
            reserves,
            self.initial_claim_value,
            outcome,
            amount,
            TradeSide::Buy,
        )?;
        require!(quote.price <= max_cost, MarketError::SlippageExceeded);

        // Reference backs the claims; the spread is revenue
        let plan = TradePlan {
            outcome,
            side: TradeSide::Buy,
            claims: amount,
            collateral: quote.price,
            balance_change: quote.reference,
            revenue_change: quote.spread(),
        };
        require!(
            self.collateral_balance
                .checked_add(plan.balance_change)
                .is_some()
                && self
                    .lp_trading_revenue
                    .checked_add(plan.revenue_change)
                    .is_some(),
            MarketError::MathOverflow
        );

        Ok(plan)
    }

    /// Sells `amount` claims of `outcome` for at least `min_proceeds`.
    pub fn plan_sell(
        &self,
        reserves: &Reserves,
        outcome: Outcome,
        amount: u64,
        min_proceeds: u64,
    ) -> Result<TradePlan> {
        self.require_open()?;
        require!(amount > 0, MarketError::ZeroAmount);

        let quote = TrapezoidCurve::quote(
            reserves,
            self.initial_claim_value,
            outcome,
            amount,
            TradeSide::Sell,
        )?;
        require!(quote.price >= min_proceeds, MarketError::SlippageExceeded);

        // The spread is paid back out of revenue first; whatever revenue
        // cannot cover comes out of the backing together with the reference
        let revenue_change = quote.spread().min(self.lp_trading_revenue);
        let balance_change = quote.price - revenue_change;
        require!(
            self.collateral_balance >= balance_change,
            MarketError::InsufficientCollateral
        );

        Ok(TradePlan {
            outcome,
            side: TradeSide::Sell,
            claims: amount,
            collateral: quote.price,
            balance_change,
            revenue_change,
        })
    }

    /// Books a trade. `balance_change + revenue_change == collateral`, so
    /// the two counters move by exactly what the vault moves.
    pub fn commit_trade(&mut self, plan: &TradePlan) -> Result<()> {
        let (balance, revenue) = match plan.side {
            TradeSide::Buy => (
                self.collateral_balance.checked_add(plan.balance_change),
                self.lp_trading_revenue.checked_add(plan.revenue_change),
            ),
            TradeSide::Sell => (
                self.collateral_balance.checked_sub(plan.balance_change),
                self.lp_trading_revenue.checked_sub(plan.revenue_change),
            ),
        };
        self.collateral_balance = balance.ok_or(MarketError::MathOverflow)?;
        self.lp_trading_revenue = revenue.ok_or(MarketError::MathOverflow)?;

        Ok(())
    }
}
