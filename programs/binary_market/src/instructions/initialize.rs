//! Deployment Initialization
//!
//! Creates the global configuration. Called once per deployment, and only
//! by the program's upgrade authority.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::Mint;

use crate::errors::MarketError;
use crate::program::BinaryMarket;
use crate::state::Config;

/// Accounts required for initialization
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Upgrade authority of this program (becomes the admin)
    #[account(mut)]
    pub admin: Signer<'info>,

    #[account(
        constraint = program.programdata_address()? == Some(program_data.key()),
    )]
    pub program: Program<'info, BinaryMarket>,

    #[account(
        constraint = program_data.upgrade_authority_address == Some(admin.key())
            @ MarketError::Unauthorized,
    )]
    pub program_data: Account<'info, ProgramData>,

    /// Global configuration account (created)
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [Config::SEED],
        bump,
    )]
    pub config: Account<'info, Config>,

    /// Collateral token mint (e.g., USDC)
    pub collateral_mint: InterfaceAccount<'info, Mint>,

    /// System program
    pub system_program: Program<'info, System>,
}

impl<'info> Initialize<'info> {
    pub fn initialize(&mut self, bumps: &InitializeBumps) -> Result<()> {
        self.config.set_inner(Config {
            admin: self.admin.key(),
            collateral_mint: self.collateral_mint.key(),
            market_count: 0,
            bump: bumps.config,
        });

        msg!("Binary market initialized");
        msg!("Admin: {}", self.admin.key());
        msg!("Collateral mint: {}", self.collateral_mint.key());

        Ok(())
    }
}
