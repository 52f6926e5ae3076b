//! Point-in-time view of the claim ledgers as seen by the market.

use anchor_lang::prelude::*;

use super::AmmError;
use crate::state::Outcome;

/// Market-held reserves of both claims and their shared total supply.
///
/// Built from the reserve token accounts and the two mints at the start of
/// an instruction. Construction fails if the ledgers disagree on supply or
/// if a reserve exceeds the supply, so every consumer can rely on
/// `reserve <= supply`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reserves {
    yes: u64,
    no: u64,
    supply: u64,
}

impl Reserves {
    pub fn new(yes_reserve: u64, no_reserve: u64, yes_supply: u64, no_supply: u64) -> Result<Self> {
        require!(yes_supply == no_supply, AmmError::LedgerInconsistent);
        require!(
            yes_reserve <= yes_supply && no_reserve <= no_supply,
            AmmError::LedgerInconsistent
        );

        Ok(Self {
            yes: yes_reserve,
            no: no_reserve,
            supply: yes_supply,
        })
    }

    /// Total supply shared by both claims
    pub fn supply(&self) -> u64 {
        self.supply
    }

    /// Reserve of the claim backing `outcome`
    pub fn of(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Yes => self.yes,
            Outcome::No => self.no,
        }
    }

    /// Claims of `outcome` circulating outside the market
    pub fn sold(&self, outcome: Outcome) -> u64 {
        self.supply - self.of(outcome)
    }

    /// Claims of both kinds circulating outside the market
    pub fn total_sold(&self) -> u128 {
        self.sold(Outcome::Yes) as u128 + self.sold(Outcome::No) as u128
    }
}
