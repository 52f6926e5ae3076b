//! Claim Trading
//!
//! Handles buying and selling of YES/NO claims against the market's
//! reserves, priced by the trapezoidal curve.
//!
//! Claims move between the trader and the reserve; nothing is minted or
//! burned, so the two claim supplies stay equal.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{transfer_checked, Mint, TokenAccount, TokenInterface, TransferChecked},
};

use crate::amm::Reserves;
use crate::errors::MarketError;
use crate::state::{Market, Outcome};

/// Event emitted when claims are bought
#[event]
pub struct ClaimsBought {
    pub market_id: u64,
    pub buyer: Pubkey,
    pub outcome: Outcome,
    pub claims_out: u64,
    pub collateral_in: u64,
    pub revenue_change: u64,
}

/// Event emitted when claims are sold
#[event]
pub struct ClaimsSold {
    pub market_id: u64,
    pub seller: Pubkey,
    pub outcome: Outcome,
    pub claims_in: u64,
    pub collateral_out: u64,
    pub revenue_change: u64,
}

/// Accounts for trading operations
#[derive(Accounts)]
pub struct Trade<'info> {
    /// Trader
    #[account(mut)]
    pub trader: Signer<'info>,

    /// Market being traded on
    #[account(
        mut,
        seeds = [Market::SEED, market.id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// YES claim mint
    #[account(
        constraint = yes_mint.key() == market.yes_mint @ MarketError::InvalidClaimMint,
    )]
    pub yes_mint: Box<InterfaceAccount<'info, Mint>>,

    /// NO claim mint
    #[account(
        constraint = no_mint.key() == market.no_mint @ MarketError::InvalidClaimMint,
    )]
    pub no_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Collateral mint
    #[account(
        constraint = collateral_mint.key() == market.collateral_mint,
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Trader's collateral account
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = trader,
    )]
    pub trader_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Trader's YES token account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = yes_mint,
        associated_token::authority = trader,
    )]
    pub trader_yes: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Trader's NO token account
    #[account(
        init_if_needed,
        payer = trader,
        associated_token::mint = no_mint,
        associated_token::authority = trader,
    )]
    pub trader_no: Box<InterfaceAccount<'info, TokenAccount>>,

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
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Trade<'info> {
    fn reserves(&self) -> Result<Reserves> {
        Reserves::new(
            self.yes_reserve.amount,
            self.no_reserve.amount,
            self.yes_mint.supply,
            self.no_mint.supply,
        )
    }

    /// Buy `amount` claims of `outcome`; returns the cost paid
    pub fn buy(&mut self, outcome: Outcome, amount: u64, max_cost: u64) -> Result<u64> {
        let reserves = self.reserves()?;
        let plan = self.market.plan_buy(&reserves, outcome, amount, max_cost)?;

        // Collateral in
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.trader_collateral.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            plan.collateral,
            self.collateral_mint.decimals,
        )
        .map_err(|_| error!(MarketError::CollateralTransferFailed))?;

        // Claims out of the reserve
        let market_seeds = &[
            Market::SEED,
            &self.market.id.to_le_bytes(),
            &[self.market.bump],
        ];
        let market_signer = &[&market_seeds[..]];

        let (mint, reserve, destination) = match outcome {
            Outcome::Yes => (&self.yes_mint, &self.yes_reserve, &self.trader_yes),
            Outcome::No => (&self.no_mint, &self.no_reserve, &self.trader_no),
        };

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: reserve.to_account_info(),
                    mint: mint.to_account_info(),
                    to: destination.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                market_signer,
            ),
            plan.claims,
            mint.decimals,
        )
        .map_err(|_| error!(MarketError::ClaimTransferFailed))?;

        self.market.commit_trade(&plan)?;

        msg!(
            "Bought {} {:?} claims for {} (revenue {})",
            plan.claims,
            outcome,
            plan.collateral,
            plan.revenue_change
        );

        emit!(ClaimsBought {
            market_id: self.market.id,
            buyer: self.trader.key(),
            outcome,
            claims_out: plan.claims,
            collateral_in: plan.collateral,
            revenue_change: plan.revenue_change,
        });

        Ok(plan.collateral)
    }

    /// Sell `amount` claims of `outcome`; returns the proceeds received
    pub fn sell(&mut self, outcome: Outcome, amount: u64, min_proceeds: u64) -> Result<u64> {
        let reserves = self.reserves()?;
        let plan = self
            .market
            .plan_sell(&reserves, outcome, amount, min_proceeds)?;

        // Claims back into the reserve
        let (mint, reserve, source) = match outcome {
            Outcome::Yes => (&self.yes_mint, &self.yes_reserve, &self.trader_yes),
            Outcome::No => (&self.no_mint, &self.no_reserve, &self.trader_no),
        };

        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: source.to_account_info(),
                    mint: mint.to_account_info(),
                    to: reserve.to_account_info(),
                    authority: self.trader.to_account_info(),
                },
            ),
            plan.claims,
            mint.decimals,
        )
        .map_err(|_| error!(MarketError::ClaimTransferFailed))?;

        // Collateral out
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
                    to: self.trader_collateral.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                market_signer,
            ),
            plan.collateral,
            self.collateral_mint.decimals,
        )
        .map_err(|_| error!(MarketError::CollateralTransferFailed))?;

        self.market.commit_trade(&plan)?;

        msg!(
            "Sold {} {:?} claims for {} (revenue spent {})",
            plan.claims,
            outcome,
            plan.collateral,
            plan.revenue_change
        );

        emit!(ClaimsSold {
            market_id: self.market.id,
            seller: self.trader.key(),
            outcome,
            claims_in: plan.claims,
            collateral_out: plan.collateral,
            revenue_change: plan.revenue_change,
        });

        Ok(plan.collateral)
    }
}
