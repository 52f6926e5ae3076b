//! Read-only Views
//!
//! Prices and market state, returned through return data. Nothing here
//! writes to an account, so these can be simulated freely in any phase.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount};

use crate::amm::{Reserves, TrapezoidCurve};
use crate::errors::MarketError;
use crate::state::{Market, Outcome};

/// Point-in-time view of a market
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MarketSnapshot {
    pub market_id: u64,
    pub question: String,
    pub owner: Pubkey,
    pub oracle: Pubkey,
    pub initial_claim_value: u128,
    pub yes_reserve: u64,
    pub no_reserve: u64,
    pub yes_supply: u64,
    pub no_supply: u64,
    /// Implied P(YES) scaled by 1e18; `None` while no claims circulate
    /// or once settlement has made the supplies diverge
    pub yes_probability: Option<u128>,
    pub collateral_balance: u64,
    pub lp_trading_revenue: u64,
    pub reported: bool,
    pub winning_claim: Option<Pubkey>,
}

impl MarketSnapshot {
    pub fn capture(
        market: &Market,
        yes_reserve: u64,
        no_reserve: u64,
        yes_supply: u64,
        no_supply: u64,
    ) -> Self {
        let yes_probability = Reserves::new(yes_reserve, no_reserve, yes_supply, no_supply)
            .and_then(|reserves| TrapezoidCurve::implied_probability(&reserves, Outcome::Yes))
            .ok();

        Self {
            market_id: market.id,
            question: market.question.clone(),
            owner: market.owner,
            oracle: market.oracle,
            initial_claim_value: market.initial_claim_value,
            yes_reserve,
            no_reserve,
            yes_supply,
            no_supply,
            yes_probability,
            collateral_balance: market.collateral_balance,
            lp_trading_revenue: market.lp_trading_revenue,
            reported: market.is_reported(),
            winning_claim: market.winning_claim(),
        }
    }
}

/// Accounts for read-only views
#[derive(Accounts)]
pub struct ViewMarket<'info> {
    #[account(
        seeds = [Market::SEED, market.id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        constraint = yes_mint.key() == market.yes_mint @ MarketError::InvalidClaimMint,
    )]
    pub yes_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        constraint = no_mint.key() == market.no_mint @ MarketError::InvalidClaimMint,
    )]
    pub no_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        associated_token::mint = yes_mint,
        associated_token::authority = market,
    )]
    pub yes_reserve: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        associated_token::mint = no_mint,
        associated_token::authority = market,
    )]
    pub no_reserve: Box<InterfaceAccount<'info, TokenAccount>>,
}

impl<'info> ViewMarket<'info> {
    fn reserves(&self) -> Result<Reserves> {
        Reserves::new(
            self.yes_reserve.amount,
            self.no_reserve.amount,
            self.yes_mint.supply,
            self.no_mint.supply,
        )
    }

    pub fn get_buy_price(&self, outcome: Outcome, amount: u64) -> Result<u64> {
        TrapezoidCurve::price_for(
            &self.reserves()?,
            self.market.initial_claim_value,
            outcome,
            amount,
            false,
        )
    }

    pub fn get_sell_price(&self, outcome: Outcome, amount: u64) -> Result<u64> {
        TrapezoidCurve::price_for(
            &self.reserves()?,
            self.market.initial_claim_value,
            outcome,
            amount,
            true,
        )
    }

    pub fn market_state(&self) -> Result<MarketSnapshot> {
        Ok(MarketSnapshot::capture(
            &self.market,
            self.yes_reserve.amount,
            self.no_reserve.amount,
            self.yes_mint.supply,
            self.no_mint.supply,
        ))
    }
}
