//! Gemfield Pricing Module
//!
//! Implements the stepwise-linear value interpolation shared by the Dutch
//! auction (falling price) and the silver box sale (rising price). All
//! arithmetic is exact integer arithmetic — the same value must be
//! reproducible by any independent implementation evaluating the same
//! schedule at the same instant.

pub mod error;
pub mod schedule;

pub use error::{PricingError, Result};
pub use schedule::{linear_stepwise, PriceSchedule};
