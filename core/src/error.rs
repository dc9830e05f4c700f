//! Ledger error types

use thiserror::Error;

/// Errors raised by the collaborator ledgers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance { requested: u128, available: u128 },

    #[error("permission denied for {address}: missing role bit {role:#010x}")]
    PermissionDenied { address: String, role: u32 },

    #[error("feature disabled: {feature:#010x}")]
    FeatureDisabled { feature: u32 },

    #[error("unknown asset: {0}")]
    UnknownAsset(u32),

    #[error("asset {id} is not owned by {address}")]
    NotOwner { id: u32, address: String },

    #[error("asset already exists: {0}")]
    DuplicateAsset(u32),

    #[error("supply overflow")]
    SupplyOverflow,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
