//! Binary Market State
//!
//! Each market is a single yes/no question backed by one collateral vault
//! and two claim mints whose authority is the market PDA.

use anchor_lang::prelude::*;

use crate::errors::MarketError;

/// Individual prediction market account
///
/// Seeds: ["market", id.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct Market {
    /// Sequence number taken from `Config::market_count`
    pub id: u64,

    /// Liquidity provider; may add/remove liquidity and resolve
    pub owner: Pubkey,

    /// Only identity allowed to report the outcome
    pub oracle: Pubkey,

    /// The prediction question
    /// Example: "Will ETH flip BTC by market cap in 2025?"
    #[max_len(256)]
    pub question: String,

    /// Collateral per claim unit, scaled by 1e18
    pub initial_claim_value: u128,

    /// Creation-time parameters, only used to split the initial claims
    pub initial_yes_probability: u8,
    pub percentage_locked: u8,

    pub collateral_mint: Pubkey,
    pub yes_mint: Pubkey,
    pub no_mint: Pubkey,

    /// Collateral backing the claims, excluding trading revenue
    pub collateral_balance: u64,

    /// Margin earned by the market on trades, paid to the owner at resolution
    pub lp_trading_revenue: u64,

    /// Lifecycle phase; carries the winner once reported
    pub phase: Phase,

    /// Unix timestamp when market was created
    pub created_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";
    pub const YES_MINT_SEED: &'static [u8] = b"yes_mint";
    pub const NO_MINT_SEED: &'static [u8] = b"no_mint";
    pub const MAX_QUESTION_LEN: usize = 256;

    pub fn is_reported(&self) -> bool {
        matches!(self.phase, Phase::Reported { .. })
    }

    pub fn winning_outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Open => None,
            Phase::Reported { winner } => Some(winner),
        }
    }

    /// Claim mint of the reported winner
    pub fn winning_claim(&self) -> Option<Pubkey> {
        self.winning_outcome().map(|winner| self.claim_mint(winner))
    }

    pub fn claim_mint(&self, outcome: Outcome) -> Pubkey {
        match outcome {
            Outcome::Yes => self.yes_mint,
            Outcome::No => self.no_mint,
        }
    }

    pub fn require_owner(&self, caller: &Pubkey) -> Result<()> {
        require!(*caller == self.owner, MarketError::Unauthorized);
        Ok(())
    }

    pub fn require_oracle(&self, caller: &Pubkey) -> Result<()> {
        require!(*caller == self.oracle, MarketError::UnauthorizedReporter);
        Ok(())
    }

    pub fn require_open(&self) -> Result<()> {
        require!(!self.is_reported(), MarketError::AlreadyReported);
        Ok(())
    }

    /// Returns the winner, failing while the market is still open
    pub fn require_reported(&self) -> Result<Outcome> {
        self.winning_outcome()
            .ok_or_else(|| error!(MarketError::NotYetReported))
    }

    /// One-shot `Open -> Reported` transition.
    ///
    /// The caller's identity is checked before the phase, so a non-oracle
    /// signer always sees `UnauthorizedReporter`. Returns the winning mint.
    pub fn report(&mut self, reporter: &Pubkey, outcome: Outcome) -> Result<Pubkey> {
        self.require_oracle(reporter)?;
        self.require_open()?;

        self.phase = Phase::Reported { winner: outcome };
        Ok(self.claim_mint(outcome))
    }
}

/// Market lifecycle phase
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum Phase {
    /// Trading and liquidity changes allowed
    #[default]
    Open,
    /// Oracle has bound the winning claim; only settlement remains
    Reported { winner: Outcome },
}

/// Prediction outcome
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum Outcome {
    Yes,
    No,
}
