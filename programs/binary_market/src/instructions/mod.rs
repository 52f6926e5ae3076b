//! Instruction handlers for the binary prediction market
//!
//! Each instruction represents an action users can take:
//! - `initialize` - Set up the deployment (once, upgrade authority only)
//! - `update_config` - Rotate the admin or collateral mint (admin only)
//! - `create_market` - Create and fund a new market (permissionless)
//! - `liquidity` - Add/remove liquidity (owner only)
//! - `trade` - Buy/sell claims
//! - `view` - Prices and market state, read-only
//! - `report` - Bind the winning claim (oracle only)
//! - `resolve` - Withdraw the winning reserve and revenue (owner only)
//! - `redeem` - Claim winnings after the report

pub mod create_market;
pub mod initialize;
pub mod liquidity;
pub mod redeem;
pub mod report;
pub mod resolve;
pub mod trade;
pub mod update_config;
pub mod view;

pub use create_market::*;
pub use initialize::*;
pub use liquidity::*;
pub use redeem::*;
pub use report::*;
pub use resolve::*;
pub use trade::*;
pub use update_config::*;
pub use view::*;
