//! # Automated Market Maker (AMM) Module
//!
//! Prices YES/NO claims from the market's own reserves.
//!
//! ```text
//!   ┌──────────────────────────────────────────┐
//!   │  supply ─┬─ reserve(YES) ── held by AMM   │
//!   │          └─ sold(YES)    ── circulating   │
//!   │                                            │
//!   │  P(YES) = sold(YES) / (sold(YES)+sold(NO)) │
//!   └──────────────────────────────────────────┘
//! ```
//!
//! - `reserves` - validated snapshot of both claim ledgers
//! - `bonding_curve` - trapezoidal pricing over the implied probability
//! - `math` - 18-decimal fixed point with exact wide products

pub mod bonding_curve;
pub mod math;
pub mod reserves;

pub use bonding_curve::*;
pub use math::*;
pub use reserves::*;
