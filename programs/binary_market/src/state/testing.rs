//! In-memory claim ledgers for unit tests.
//!
//! `ClaimBook` plays the role of the two claim mints, the reserve accounts,
//! the creator's and one trader's token accounts, and the collateral vault,
//! so the staged `plan_*`/`commit_*` pairs can be driven end to end without
//! a validator.

use anchor_lang::prelude::*;

use crate::amm::{Reserves, TradeSide, WAD};
use crate::state::{
    InitialPosition, LiquidityChange, Market, Outcome, Phase, Redemption, Resolution, TradePlan,
};

pub fn sample_market() -> Market {
    Market {
        id: 0,
        owner: Pubkey::new_unique(),
        oracle: Pubkey::new_unique(),
        question: "Will it rain tomorrow?".to_string(),
        initial_claim_value: WAD,
        initial_yes_probability: 50,
        percentage_locked: 10,
        collateral_mint: Pubkey::new_unique(),
        yes_mint: Pubkey::new_unique(),
        no_mint: Pubkey::new_unique(),
        collateral_balance: 0,
        lp_trading_revenue: 0,
        phase: Phase::Open,
        created_at: 1_700_000_000,
        bump: 255,
    }
}

/// Freshly constructed market and the ledgers `create_market` leaves behind
pub fn open_market(
    funding: u64,
    claim_value: u128,
    yes_probability: u8,
    percentage_locked: u8,
) -> (Market, ClaimBook) {
    let position =
        InitialPosition::compute(funding, claim_value, yes_probability, percentage_locked)
            .unwrap();

    let mut market = sample_market();
    market.initial_claim_value = claim_value;
    market.initial_yes_probability = yes_probability;
    market.percentage_locked = percentage_locked;
    market.collateral_balance = funding;

    let book = ClaimBook {
        yes_supply: position.claim_amount,
        no_supply: position.claim_amount,
        yes_reserve: position.yes_locked,
        no_reserve: position.no_locked,
        creator_yes: position.claim_amount - position.yes_locked,
        creator_no: position.claim_amount - position.no_locked,
        trader_yes: 0,
        trader_no: 0,
        vault: funding,
    };

    (market, book)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimBook {
    pub yes_supply: u64,
    pub no_supply: u64,
    pub yes_reserve: u64,
    pub no_reserve: u64,
    pub creator_yes: u64,
    pub creator_no: u64,
    pub trader_yes: u64,
    pub trader_no: u64,
    pub vault: u64,
}

impl ClaimBook {
    pub fn reserves(&self) -> Reserves {
        Reserves::new(
            self.yes_reserve,
            self.no_reserve,
            self.yes_supply,
            self.no_supply,
        )
        .unwrap()
    }

    pub fn add_liquidity(&mut self, change: &LiquidityChange) {
        self.vault += change.collateral;
        self.yes_supply += change.claims;
        self.no_supply += change.claims;
        self.yes_reserve += change.claims;
        self.no_reserve += change.claims;
    }

    pub fn remove_liquidity(&mut self, change: &LiquidityChange) {
        self.vault -= change.collateral;
        self.yes_supply -= change.claims;
        self.no_supply -= change.claims;
        self.yes_reserve -= change.claims;
        self.no_reserve -= change.claims;
    }

    pub fn trade(&mut self, plan: &TradePlan) {
        let (reserve, holding) = match plan.outcome {
            Outcome::Yes => (&mut self.yes_reserve, &mut self.trader_yes),
            Outcome::No => (&mut self.no_reserve, &mut self.trader_no),
        };
        match plan.side {
            TradeSide::Buy => {
                *reserve -= plan.claims;
                *holding += plan.claims;
                self.vault += plan.collateral;
            }
            TradeSide::Sell => {
                *reserve += plan.claims;
                *holding -= plan.claims;
                self.vault -= plan.collateral;
            }
        }
    }

    pub fn resolve(&mut self, resolution: &Resolution) {
        match resolution.winner {
            Outcome::Yes => {
                self.yes_reserve -= resolution.burned;
                self.yes_supply -= resolution.burned;
            }
            Outcome::No => {
                self.no_reserve -= resolution.burned;
                self.no_supply -= resolution.burned;
            }
        }
        self.vault -= resolution.payout;
    }

    pub fn redeem_creator(&mut self, redemption: &Redemption) {
        match redemption.winner {
            Outcome::Yes => self.creator_yes -= redemption.burned,
            Outcome::No => self.creator_no -= redemption.burned,
        }
        self.burn_redeemed(redemption);
    }

    pub fn redeem_trader(&mut self, redemption: &Redemption) {
        match redemption.winner {
            Outcome::Yes => self.trader_yes -= redemption.burned,
            Outcome::No => self.trader_no -= redemption.burned,
        }
        self.burn_redeemed(redemption);
    }

    fn burn_redeemed(&mut self, redemption: &Redemption) {
        match redemption.winner {
            Outcome::Yes => self.yes_supply -= redemption.burned,
            Outcome::No => self.no_supply -= redemption.burned,
        }
        self.vault -= redemption.payout;
    }

    /// Ledger invariants that must hold after every committed operation
    pub fn assert_consistent(&self, market: &Market) {
        if !market.is_reported() {
            assert_eq!(self.yes_supply, self.no_supply, "claim supplies diverged");
        }
        assert!(self.yes_reserve <= self.yes_supply);
        assert!(self.no_reserve <= self.no_supply);
        assert_eq!(
            self.yes_supply,
            self.yes_reserve + self.creator_yes + self.trader_yes
        );
        assert_eq!(
            self.no_supply,
            self.no_reserve + self.creator_no + self.trader_no
        );
        assert_eq!(
            self.vault as u128,
            market.collateral_balance as u128 + market.lp_trading_revenue as u128,
            "vault does not match collateral balance plus revenue"
        );
    }
}
