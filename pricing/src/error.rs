//! Pricing error types

use thiserror::Error;

/// Schedule configuration and evaluation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("invalid schedule: t1 ({t1}) must be after t0 ({t0})")]
    EmptyInterval { t0: u64, t1: u64 },

    #[error("invalid schedule: step must be positive")]
    ZeroStep,

    #[error("value overflow while interpolating")]
    ValueOverflow,
}

pub type Result<T> = std::result::Result<T, PricingError>;
