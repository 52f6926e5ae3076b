//! Market Creation
//!
//! Anyone can create a market by:
//! 1. Defining a yes/no question and the oracle that will answer it
//! 2. Funding the collateral vault
//! 3. Choosing how the locked share of the minted claims is split
//!
//! The creator receives `funding * 1e18 / claim_value` of both claims and
//! immediately moves part of them into the market's reserves:
//!
//! ```text
//! yes_locked = N * p         * lock * 2 / 10000
//! no_locked  = N * (100 - p) * lock * 2 / 10000
//! ```
//!
//! Mints, vault and reserve accounts are all created in this one
//! instruction, so a market never exists half-built.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::errors::MarketError;
use crate::state::{Config, InitialPosition, Market, Phase};

/// Event emitted when a new market is created
#[event]
pub struct MarketCreated {
    pub market_id: u64,
    pub owner: Pubkey,
    pub oracle: Pubkey,
    pub question: String,
    pub funding: u64,
    pub claim_amount: u64,
    pub yes_locked: u64,
    pub no_locked: u64,
}

/// Creation parameters
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct CreateMarketParams {
    /// Collateral moved from the creator into the vault
    pub funding: u64,
    pub oracle: Pubkey,
    pub question: String,
    /// Collateral per claim, scaled by 1e18
    pub initial_claim_value: u128,
    /// 1..=99
    pub initial_yes_probability: u8,
    /// 1..=99
    pub percentage_locked: u8,
}

impl CreateMarketParams {
    /// Runs every creation check and returns the initial claim split.
    pub fn validate(&self) -> Result<InitialPosition> {
        let position = InitialPosition::compute(
            self.funding,
            self.initial_claim_value,
            self.initial_yes_probability,
            self.percentage_locked,
        )?;
        require!(
            self.question.len() <= Market::MAX_QUESTION_LEN,
            MarketError::QuestionTooLong
        );
        Ok(position)
    }
}

/// Accounts for creating a new prediction market
#[derive(Accounts)]
pub struct CreateMarket<'info> {
    /// Market creator (pays for accounts, becomes the owner)
    #[account(mut)]
    pub creator: Signer<'info>,

    /// Global configuration
    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Box<Account<'info, Config>>,

    /// The new market account
    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [Market::SEED, config.market_count.to_le_bytes().as_ref()],
        bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// YES claim mint, authority is the market
    #[account(
        init,
        payer = creator,
        mint::decimals = collateral_mint.decimals,
        mint::authority = market,
        seeds = [Market::YES_MINT_SEED, market.key().as_ref()],
        bump,
    )]
    pub yes_mint: Box<InterfaceAccount<'info, Mint>>,

    /// NO claim mint, authority is the market
    #[account(
        init,
        payer = creator,
        mint::decimals = collateral_mint.decimals,
        mint::authority = market,
        seeds = [Market::NO_MINT_SEED, market.key().as_ref()],
        bump,
    )]
    pub no_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Collateral token mint
    #[account(
        constraint = collateral_mint.key() == config.collateral_mint
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Creator's collateral token account
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = creator,
    )]
    pub creator_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's collateral vault
    #[account(
        init,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's YES reserve
    #[account(
        init,
        payer = creator,
        associated_token::mint = yes_mint,
        associated_token::authority = market,
    )]
    pub yes_reserve: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Market's NO reserve
    #[account(
        init,
        payer = creator,
        associated_token::mint = no_mint,
        associated_token::authority = market,
    )]
    pub no_reserve: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator's YES token account
    #[account(
        init,
        payer = creator,
        associated_token::mint = yes_mint,
        associated_token::authority = creator,
    )]
    pub creator_yes: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Creator's NO token account
    #[account(
        init,
        payer = creator,
        associated_token::mint = no_mint,
        associated_token::authority = creator,
    )]
    pub creator_no: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Token program
    pub token_program: Interface<'info, TokenInterface>,
    /// Associated token program
    pub associated_token_program: Program<'info, AssociatedToken>,
    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    pub fn create_market(
        &mut self,
        params: CreateMarketParams,
        bumps: &CreateMarketBumps,
    ) -> Result<()> {
        let position = params.validate()?;
        let market_id = self.config.market_count;
        let clock = Clock::get()?;

        // Transfer funding to vault
        transfer_checked(
            CpiContext::new(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.creator_collateral.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.vault.to_account_info(),
                    authority: self.creator.to_account_info(),
                },
            ),
            params.funding,
            self.collateral_mint.decimals,
        )
        .map_err(|_| error!(MarketError::CollateralTransferFailed))?;

        // Mint both claims to the creator
        let market_seeds = &[Market::SEED, &market_id.to_le_bytes(), &[bumps.market]];
        let market_signer = &[&market_seeds[..]];

        for (mint, destination) in [
            (&self.yes_mint, &self.creator_yes),
            (&self.no_mint, &self.creator_no),
        ] {
            mint_to(
                CpiContext::new_with_signer(
                    self.token_program.to_account_info(),
                    MintTo {
                        mint: mint.to_account_info(),
                        to: destination.to_account_info(),
                        authority: self.market.to_account_info(),
                    },
                    market_signer,
                ),
                position.claim_amount,
            )
            .map_err(|_| error!(MarketError::ClaimTransferFailed))?;
        }

        // Lock part of them into the reserves
        for (mint, source, reserve, locked) in [
            (&self.yes_mint, &self.creator_yes, &self.yes_reserve, position.yes_locked),
            (&self.no_mint, &self.creator_no, &self.no_reserve, position.no_locked),
        ] {
            transfer_checked(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: source.to_account_info(),
                        mint: mint.to_account_info(),
                        to: reserve.to_account_info(),
                        authority: self.creator.to_account_info(),
                    },
                ),
                locked,
                mint.decimals,
            )
            .map_err(|_| error!(MarketError::ClaimTransferFailed))?;
        }

        self.market.set_inner(Market {
            id: market_id,
            owner: self.creator.key(),
            oracle: params.oracle,
            question: params.question.clone(),
            initial_claim_value: params.initial_claim_value,
            initial_yes_probability: params.initial_yes_probability,
            percentage_locked: params.percentage_locked,
            collateral_mint: self.collateral_mint.key(),
            yes_mint: self.yes_mint.key(),
            no_mint: self.no_mint.key(),
            collateral_balance: params.funding,
            lp_trading_revenue: 0,
            phase: Phase::Open,
            created_at: clock.unix_timestamp,
            bump: bumps.market,
        });

        self.config.next_market_id()?;

        msg!("Market {} created by {}", market_id, self.creator.key());
        msg!(
            "Claims minted: {}, locked YES: {}, locked NO: {}",
            position.claim_amount,
            position.yes_locked,
            position.no_locked
        );

        emit!(MarketCreated {
            market_id,
            owner: self.creator.key(),
            oracle: params.oracle,
            question: params.question,
            funding: params.funding,
            claim_amount: position.claim_amount,
            yes_locked: position.yes_locked,
            no_locked: position.no_locked,
        });

        Ok(())
    }
}
