//! Outcome Reporting
//!
//! The market's oracle binds the winning claim exactly once. After that
//! trading and liquidity changes are closed and only settlement remains.

use anchor_lang::prelude::*;

use crate::state::{Market, Outcome};

/// Event emitted when the oracle reports
#[event]
pub struct ReportIssued {
    pub market_id: u64,
    pub reporter: Pubkey,
    pub outcome: Outcome,
    pub winning_claim: Pubkey,
}

/// Accounts for reporting
#[derive(Accounts)]
pub struct Report<'info> {
    /// Must be the market's oracle
    pub reporter: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market.id.to_le_bytes().as_ref()],
        bump = market.bump,
    )]
    pub market: Account<'info, Market>,
}

impl<'info> Report<'info> {
    pub fn report(&mut self, outcome: Outcome) -> Result<()> {
        let winning_claim = self.market.report(&self.reporter.key(), outcome)?;

        msg!("Market {} reported: {:?}", self.market.id, outcome);

        emit!(ReportIssued {
            market_id: self.market.id,
            reporter: self.reporter.key(),
            outcome,
            winning_claim,
        });

        Ok(())
    }
}
