//! Liquidity Management
//!
//! The owner deepens or thins the market by moving collateral in or out of
//! the vault. Both claims are minted into, or burned from, the reserves in
//! equal amounts, so the implied probability does not move.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn, mint_to, transfer_checked, Burn, Mint, MintTo, TokenAccount, TokenInterface,
    TransferChecked,
};

use crate::amm::Reserves;
use crate::errors::MarketError;
use crate::state::Market;

/// Event emitted when liquidity is added
#[event]
pub struct LiquidityAdded {
    pub market_id: u64,
    pub owner: Pubkey,
    pub collateral_in: u64,
    pub claims_minted: u64,
}

/// Event emitted when liquidity is removed
#[event]
pub struct LiquidityRemoved {
    pub market_id: u64,
    pub owner: Pubkey,
    pub collateral_out: u64,
    pub claims_burned: u64,
}

/// Accounts for adding or removing liquidity
#[derive(Accounts)]
pub struct UpdateLiquidity<'info> {
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

impl<'info> UpdateLiquidity<'info> {
    fn reserves(&self) -> Result<Reserves> {
        Reserves::new(
            self.yes_reserve.amount,
            self.no_reserve.amount,
            self.yes_mint.supply,
            self.no_mint.supply,
        )
    }

    /// Deposit `amount` collateral and mint matching claims on both sides
    pub fn add_liquidity(&mut self, amount: u64) -> Result<()> {
        let change = self.market.plan_add_liquidity(&self.owner.key(), amount)?;

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.owner_collateral.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.owner.to_account_info(),
                },
            ),
            change.collateral,
            self.collateral_mint.decimals,
        )
        .map_err(|_| error!(MarketError::CollateralTransferFailed))?;

        let market_seeds = &[
            Market::SEED,
            &self.market.id.to_le_bytes(),
            &[self.market.bump],
        ];
        let market_signer = &[&market_seeds[..]];

        for (mint, reserve) in [
            (&self.yes_mint, &self.yes_reserve),
            (&self.no_mint, &self.no_reserve),
        ] {
            mint_to(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    MintTo {
                        mint: mint.to_account_info(),
                        to: reserve.to_account_info(),
                        authority: self.market.to_account_info(),
                    },
                    market_signer,
                ),
                change.claims,
            )
            .map_err(|_| error!(MarketError::ClaimTransferFailed))?;
        }

        self.market.commit_add_liquidity(&change)?;

        msg!(
            "Liquidity added to market {}: {} collateral, {} claims per side",
            self.market.id,
            change.collateral,
            change.claims
        );

        emit!(LiquidityAdded {
            market_id: self.market.id,
            owner: self.owner.key(),
            collateral_in: change.collateral,
            claims_minted: change.claims,
        });

        Ok(())
    }

    /// Burn matching claims on both sides and withdraw `amount` collateral
    pub fn remove_liquidity(&mut self, amount: u64) -> Result<()> {
        let reserves = self.reserves()?;
        let change = self
            .market
            .plan_remove_liquidity(&self.owner.key(), amount, &reserves)?;

        let market_seeds = &[
            Market::SEED,
            &self.market.id.to_le_bytes(),
            &[self.market.bump],
        ];
        let market_signer = &[&market_seeds[..]];

        for (mint, reserve) in [
            (&self.yes_mint, &self.yes_reserve),
            (&self.no_mint, &self.no_reserve),
        ] {
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
                change.claims,
            )
            .map_err(|_| error!(MarketError::ClaimTransferFailed))?;
        }

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
            change.collateral,
            self.collateral_mint.decimals,
        )
        .map_err(|_| error!(MarketError::CollateralTransferFailed))?;

        self.market.commit_remove_liquidity(&change)?;

        msg!(
            "Liquidity removed from market {}: {} collateral, {} claims per side",
            self.market.id,
            change.collateral,
            change.claims
        );

        emit!(LiquidityRemoved {
            market_id: self.market.id,
            owner: self.owner.key(),
            collateral_out: change.collateral,
            claims_burned: change.claims,
        });

        Ok(())
    }
}
