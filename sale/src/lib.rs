//! Gemfield Silver Sale Module
//!
//! Tiered box sale converting native coin into silver (and occasionally
//! gold). Three box tiers with stepwise-rising prices over a 20 day sale
//! window, per-tier hard caps and a single-transaction throttle that
//! stops any one call from draining a tier's supply.

pub mod error;
pub mod sale;

pub use error::{Result, SaleError};
pub use sale::SilverSale;

/// Enables the silver / gold sale
pub const FEATURE_SALE_ENABLED: u32 = 0x0000_0001;

/// Box tier display names
pub const BOX_NAMES: [&str; 3] = ["Silver Box", "Rotund Silver Box", "Goldish Silver Box"];

/// Box prices at the start of the sale (wei)
pub const INITIAL_PRICES: [u128; 3] = [
    96_000_000_000_000_000,
    320_000_000_000_000_000,
    760_000_000_000_000_000,
];

/// Box prices from the end of the sale on (wei)
pub const FINAL_PRICES: [u128; 3] = [
    120_000_000_000_000_000,
    400_000_000_000_000_000,
    950_000_000_000_000_000,
];

/// Hard cap: cumulative boxes sellable per tier
pub const HARD_CAPS: [u32; 3] = [500, 300, 150];

/// Guaranteed minimum silver per box
pub const SILVER_MIN: [u32; 3] = [20, 70, 150];

/// Upper bound of the random silver roll per box
pub const SILVER_MAX: [u32; 3] = [30, 90, 200];

/// Silver bounds for a goldish box that also carries gold
pub const SILVER_MIN_GOLD: u32 = 100;
pub const SILVER_MAX_GOLD: u32 = 133;

/// Chance (percent) that a goldish box carries one gold
pub const GOLD_CHANCE_PERCENT: u32 = 42;

/// The tier whose boxes may carry gold
pub const GOLDISH_TIER: u32 = 2;

/// Maximum quantity per (tier, quantity) pair
pub const MAX_QTY: u32 = 0xFFFF;

/// Sale length in days; the price steps once per day
pub const SALE_DURATION_DAYS: u64 = 20;

/// Seconds per day
pub const DAY: u64 = 86_400;

/// Fraction of every charge routed to the chest address (1/20)
pub const CHEST_DIVISOR: u128 = 20;
