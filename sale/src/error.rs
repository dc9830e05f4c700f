//! Silver sale error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SaleError {
    #[error("sale is not enabled")]
    SaleDisabled,

    #[error("invalid box type: {0}")]
    InvalidBoxType(u32),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    #[error("box type and quantity arrays must be non-empty and of equal length")]
    LengthMismatch,

    #[error("duplicate box type in bulk request: {0}")]
    DuplicateBoxType(u32),

    #[error("cap exceeded for box type {box_type}: {sold} sold, requested {requested}, cap {cap}")]
    CapExceeded {
        box_type: u32,
        sold: u32,
        requested: u32,
        cap: u32,
    },

    #[error("insufficient payment: required {required}, offered {offered}")]
    InsufficientPayment { required: u128, offered: u128 },

    #[error(transparent)]
    Pricing(#[from] pricing::PricingError),

    #[error(transparent)]
    Ledger(#[from] gem_core::LedgerError),
}

pub type Result<T> = std::result::Result<T, SaleError>;
