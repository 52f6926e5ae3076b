//! # Binary Market: YES/NO Prediction Markets
//!
//! A prediction market on Solana where the market itself is the liquidity
//! provider for two claims, YES and NO.
//!
//! ## Overview
//!
//! Each market holds collateral in a vault and keeps a reserve of both
//! claims. Claims the market does not hold are in circulation, and their
//! split gives the implied probability of each outcome.
//!
//! ## How it works
//! - The creator funds the market and locks part of the minted claims
//!   into the reserves.
//! - Traders buy and sell claims at a trapezoidal average of the implied
//!   probability before and after the trade.
//! - A single oracle reports the winner once; the owner then withdraws
//!   its winning reserve and trading revenue, and holders redeem.
//!

use anchor_lang::prelude::*;

pub mod amm;
pub mod errors;
pub mod instructions;
pub mod state;

pub use amm::*;
pub use instructions::*;
pub use state::Outcome;

// Replace with your deployed program ID
declare_id!("8NeEkxgPMV5AnZ8o5ksjPhqsHwkWXdvGCGyHmEt6tJTn");

/// Main Binary Market program
#[program]
pub mod binary_market {
    use super::*;

    /// Initialize the deployment with its collateral mint (upgrade authority only)
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        ctx.accounts.initialize(&ctx.bumps)
    }

    /// Hand over the admin role or switch the collateral mint (admin only)
    pub fn update_config(
        ctx: Context<UpdateConfig>,
        new_admin: Option<Pubkey>,
        new_collateral_mint: Option<Pubkey>,
    ) -> Result<()> {
        ctx.accounts.update_config(new_admin, new_collateral_mint)
    }

    /// Create, fund and seed the reserves of a new market
    pub fn create_market(ctx: Context<CreateMarket>, params: CreateMarketParams) -> Result<()> {
        ctx.accounts.create_market(params, &ctx.bumps)
    }

    /// Deposit collateral and mint both claims into the reserves (owner only)
    pub fn add_liquidity(ctx: Context<UpdateLiquidity>, amount: u64) -> Result<()> {
        ctx.accounts.add_liquidity(amount)
    }

    /// Burn both claims from the reserves and withdraw collateral (owner only)
    pub fn remove_liquidity(ctx: Context<UpdateLiquidity>, amount: u64) -> Result<()> {
        ctx.accounts.remove_liquidity(amount)
    }

    /// Buy claims of one outcome from the market
    pub fn buy(ctx: Context<Trade>, outcome: Outcome, amount: u64, max_cost: u64) -> Result<u64> {
        ctx.accounts.buy(outcome, amount, max_cost)
    }

    /// Sell claims of one outcome back to the market
    pub fn sell(
        ctx: Context<Trade>,
        outcome: Outcome,
        amount: u64,
        min_proceeds: u64,
    ) -> Result<u64> {
        ctx.accounts.sell(outcome, amount, min_proceeds)
    }

    /// Cost of buying `amount` claims, without trading
    pub fn get_buy_price(ctx: Context<ViewMarket>, outcome: Outcome, amount: u64) -> Result<u64> {
        ctx.accounts.get_buy_price(outcome, amount)
    }

    /// Proceeds of selling `amount` claims, without trading
    pub fn get_sell_price(ctx: Context<ViewMarket>, outcome: Outcome, amount: u64) -> Result<u64> {
        ctx.accounts.get_sell_price(outcome, amount)
    }

    /// Full market state, including the implied YES probability
    pub fn market_state(ctx: Context<ViewMarket>) -> Result<MarketSnapshot> {
        ctx.accounts.market_state()
    }

    /// Report the winning outcome (oracle only, once)
    pub fn report(ctx: Context<Report>, outcome: Outcome) -> Result<()> {
        ctx.accounts.report(outcome)
    }

    /// Withdraw the winning reserve's value and trading revenue (owner only)
    pub fn resolve_and_withdraw(ctx: Context<ResolveAndWithdraw>) -> Result<u64> {
        ctx.accounts.resolve_and_withdraw()
    }

    /// Redeem winning claims for collateral
    pub fn redeem(ctx: Context<Redeem>) -> Result<u64> {
        ctx.accounts.redeem()
    }
}
