//! Claim Redemption
//!
//! After the outcome is reported, holders of the winning claim redeem
//! them for their proportional share of the market's collateral.
//!
//! ## Redemption Calculation
//!
//! ```text
//! pool   = collateral_balance - value of the market's winning reserve
//! payout = holder_claims * pool / (winning_supply - winning_reserve)
//! ```
//!
//! For example:
//! - Holder has 100 YES claims
//! - Total YES supply: 1100 claims, 100 of them in the market's reserve
//! - Collateral balance: 5100 USDC, claim value 1 USDC
//! - If YES wins: holder receives 100 * 5000 / 1000 = 500 USDC
//!
//! Trading revenue is not part of the pool; it belongs to the owner.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn, transfer_checked, Burn, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::MarketError;
use crate::state::Market;

/// Event emitted when winning claims are redeemed
#[event]
pub struct ClaimsRedeemed {
    pub market_id: u64,
    pub holder: Pubkey,
    pub claims_burned: u64,
    pub collateral_received: u64,
}

/// Accounts for redemption
#[derive(Accounts)]
pub struct Redeem<'info> {
    /// Holder redeeming their claims
    #[account(mut)]
    pub holder: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market.id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// Mint of the reported winner; checked in the handler
    #[account(mut)]
    pub winning_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Collateral mint
    #[account(
        constraint = collateral_mint.key() == market.collateral_mint,
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Market's own winning reserve, valued out of the pool
    #[account(
        associated_token::mint = winning_mint,
        associated_token::authority = market,
    )]
    pub winning_reserve: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Holder's winning claims
    #[account(
        mut,
        associated_token::mint = winning_mint,
        associated_token::authority = holder,
    )]
    pub holder_claims: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Holder's collateral account
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = holder,
    )]
    pub holder_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's collateral vault
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> Redeem<'info> {
    /// Redeem the holder's whole winning balance; returns the payout
    pub fn redeem(&mut self) -> Result<u64> {
        let winner = self.market.require_reported()?;
        require!(
            self.winning_mint.key() == self.market.claim_mint(winner),
            MarketError::InvalidClaimMint
        );

        let redemption = self.market.plan_redemption(
            self.holder_claims.amount,
            self.winning_mint.supply,
            self.winning_reserve.amount,
        )?;

        // Burn the holder's winning claims
        burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: self.winning_mint.to_account_info(),
                    from: self.holder_claims.to_account_info(),
                    authority: self.holder.to_account_info(),
                },
            ),
            redemption.burned,
        )
        .map_err(|_| error!(MarketError::ClaimTransferFailed))?;

        // Transfer collateral to holder
        let market_seeds = &[
            Market::SEED,
            &self.market.id.to_le_bytes(),
            &[self.market.bump],
        ];
        let market_signer = &[&market_seeds[..]];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.holder_collateral.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                market_signer,
            ),
            redemption.payout,
            self.collateral_mint.decimals,
        )
        .map_err(|_| error!(MarketError::CollateralTransferFailed))?;

        self.market.commit_redemption(&redemption)?;

        msg!(
            "Redeemed {} claims for {} on market {}",
            redemption.burned,
            redemption.payout,
            self.market.id
        );

        emit!(ClaimsRedeemed {
            market_id: self.market.id,
            holder: self.holder.key(),
            claims_burned: redemption.burned,
            collateral_received: redemption.payout,
        });

        Ok(redemption.payout)
    }
}
