//! Deployment Configuration
//!
//! Settings shared by every market created by this program.

use anchor_lang::prelude::*;

use crate::errors::MarketError;

/// Global configuration account (singleton PDA)
///
/// Seeds: ["config"]
#[account]
#[derive(InitSpace)]
pub struct Config {
    /// Upgrade authority at `initialize`; may rotate itself and the mint
    pub admin: Pubkey,

    /// Collateral token mint used by every market (e.g., USDC)
    pub collateral_mint: Pubkey,

    /// Total markets created (used as incrementing ID)
    pub market_count: u64,

    /// PDA bump seed
    pub bump: u8,
}

impl Config {
    pub const SEED: &'static [u8] = b"config";

    pub fn require_admin(&self, signer: &Pubkey) -> Result<()> {
        require!(*signer == self.admin, MarketError::Unauthorized);
        Ok(())
    }

    /// Applies the fields that are set. Markets already created keep the
    /// collateral mint they were created with.
    pub fn apply_update(
        &mut self,
        signer: &Pubkey,
        new_admin: Option<Pubkey>,
        new_collateral_mint: Option<Pubkey>,
    ) -> Result<()> {
        self.require_admin(signer)?;

        if let Some(admin) = new_admin {
            self.admin = admin;
        }
        if let Some(mint) = new_collateral_mint {
            self.collateral_mint = mint;
        }
        Ok(())
    }

    /// Reserves the next market id
    pub fn next_market_id(&mut self) -> Result<u64> {
        let id = self.market_count;
        self.market_count = id
            .checked_add(1)
            .ok_or(MarketError::MathOverflow)?;
        Ok(id)
    }
}
