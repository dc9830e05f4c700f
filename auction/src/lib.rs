//! Gemfield Dutch Auction Module
//!
//! Assets are listed by moving them into the registry's custody together
//! with a packed parameter payload; the price then falls (or rises)
//! stepwise from `start_price` to `end_price` between `t0` and `t1`.
//! Buying settles payment against the native coin ledger and releases the
//! asset to the buyer; cancelling returns it to the seller.

pub mod error;
pub mod listing;
pub mod registry;

pub use error::{AuctionError, Result};
pub use listing::{Listing, ListingParams};
pub use registry::DutchAuction;

/// Adding new listings is allowed
pub const FEATURE_ADD: u32 = 0x0000_0001;

/// Auction managers may cancel any listing
pub const ROLE_AUCTION_MANAGER: u32 = 0x0000_0001;
