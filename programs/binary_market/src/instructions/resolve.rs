//! Owner Settlement
//!
//! Once the outcome is reported, the owner burns the market's own winning
//! reserve and withdraws its value together with all trading revenue.
//!
//! ```text
//! redeemed = min(reserve * claim_value / 1e18, collateral_balance)
//! payout   = redeemed + lp_trading_revenue
//! ```
//!
//! A second call finds an empty reserve and zero revenue and pays nothing.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn, transfer_checked, Burn, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::MarketError;
use crate::state::{Market, Outcome};

/// Event emitted when the owner settles
#[event]
pub struct MarketResolved {
    pub market_id: u64,
    pub caller: Pubkey,
    pub winner: Outcome,
    pub reserve_burned: u64,
    pub total_paid: u64,
}

/// Accounts for owner settlement
#[derive(Accounts)]
pub struct ResolveAndWithdraw<'info> {
    /// Market owner
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market.id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// YES claim mint
    #[account(
        mut,
        constraint = yes_mint.key() == market.yes_mint @ MarketError::InvalidClaimMint,
    )]
    pub yes_mint: Box<InterfaceAccount<'info, Mint>>,

    /// NO claim mint
    #[account(
        mut,
        constraint = no_mint.key() == market.no_mint @ MarketError::InvalidClaimMint,
    )]
    pub no_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Collateral mint
    #[account(
        constraint = collateral_mint.key() == market.collateral_mint,
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Owner's collateral account
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = owner,
    )]
    pub owner_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's collateral vault
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's YES reserve
    #[account(
        mut,
        associated_token::mint = yes_mint,
        associated_token::authority = market,
    )]
    pub yes_reserve: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's NO reserve
    #[account(
        mut,
        associated_token::mint = no_mint,
        associated_token::authority = market,
    )]
    pub no_reserve: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ResolveAndWithdraw<'info> {
    /// Returns the collateral released for the burned reserve
    pub fn resolve_and_withdraw(&mut self) -> Result<u64> {
        let resolution = self.market.plan_resolution(
            &self.owner.key(),
            self.yes_reserve.amount,
            self.no_reserve.amount,
        )?;

        let market_seeds = &[
            Market::SEED,
            &self.market.id.to_le_bytes(),
            &[self.market.bump],
        ];
        let market_signer = &[&market_seeds[..]];

        // Burn the winning reserve
        let (mint, reserve) = match resolution.winner {
            Outcome::Yes => (&self.yes_mint, &self.yes_reserve),
            Outcome::No => (&self.no_mint, &self.no_reserve),
        };

        burn(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                Burn {
                    mint: mint.to_account_info(),
                    from: reserve.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                market_signer,
            ),
            resolution.burned,
        )
        .map_err(|_| error!(MarketError::ClaimTransferFailed))?;

        // Pay the owner
        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.owner_collateral.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                market_signer,
            ),
            resolution.payout,
            self.collateral_mint.decimals,
        )
        .map_err(|_| error!(MarketError::CollateralTransferFailed))?;

        self.market.commit_resolution(&resolution)?;

        msg!(
            "Market {} settled: burned {} {:?} claims, paid {} to owner",
            self.market.id,
            resolution.burned,
            resolution.winner,
            resolution.payout
        );

        emit!(MarketResolved {
            market_id: self.market.id,
            caller: self.owner.key(),
            winner: resolution.winner,
            reserve_burned: resolution.burned,
            total_paid: resolution.payout,
        });

        Ok(resolution.redeemed)
    }
}
