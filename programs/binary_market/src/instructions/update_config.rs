//! Configuration Updates
//!
//! The admin can hand over the admin role or switch the collateral mint
//! used by markets created from now on.

use anchor_lang::prelude::*;

use crate::state::Config;

/// Event emitted when the configuration changes
#[event]
pub struct ConfigUpdated {
    pub admin: Pubkey,
    pub collateral_mint: Pubkey,
}

/// Accounts for updating the configuration
#[derive(Accounts)]
pub struct UpdateConfig<'info> {
    /// Current admin; checked in the handler
    pub admin: Signer<'info>,

    #[account(
        mut,
        seeds = [Config::SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,
}

impl<'info> UpdateConfig<'info> {
    pub fn update_config(
        &mut self,
        new_admin: Option<Pubkey>,
        new_collateral_mint: Option<Pubkey>,
    ) -> Result<()> {
        self.config
            .apply_update(&self.admin.key(), new_admin, new_collateral_mint)?;

        msg!("Config updated");
        msg!("Admin: {}", self.config.admin);
        msg!("Collateral mint: {}", self.config.collateral_mint);

        emit!(ConfigUpdated {
            admin: self.config.admin,
            collateral_mint: self.config.collateral_mint,
        });

        Ok(())
    }
}
