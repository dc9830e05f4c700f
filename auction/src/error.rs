//! Auction error types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuctionError {
    #[error("adding listings is disabled")]
    AddDisabled,

    #[error("collection {0} is not allow-listed for auctioning")]
    CollectionNotAllowed(String),

    #[error("invalid listing payload: {0}")]
    InvalidPayload(String),

    #[error("asset {0} is not listed")]
    NotListed(u32),

    #[error("asset {0} is already listed")]
    AlreadyListed(u32),

    #[error("insufficient payment: price {price}, offered {offered}")]
    InsufficientPayment { price: u128, offered: u128 },

    #[error("{0} may not cancel this listing")]
    CancelDenied(String),

    #[error(transparent)]
    Pricing(#[from] pricing::PricingError),

    #[error(transparent)]
    Codec(#[from] packed_codec::CodecError),

    #[error(transparent)]
    Ledger(#[from] gem_core::LedgerError),
}

pub type Result<T> = std::result::Result<T, AuctionError>;
