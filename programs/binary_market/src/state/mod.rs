//! State structures for the binary prediction market
//!
//! - `config` / `market` - on-chain accounts
//! - `accounting` - staged liquidity and trade bookkeeping
//! - `settlement` - post-report withdrawal and redemption

pub mod accounting;
pub mod config;
pub mod market;
pub mod settlement;

#[cfg(test)]
pub mod testing;

pub use accounting::*;
pub use config::*;
pub use market::*;
pub use settlement::*;
