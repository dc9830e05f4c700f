//! Packed word codec
//!
//! Several independently-addressable integer fields packed into one
//! 256-bit word, most-significant field first. Layouts are declarative
//! tables consumed by a single generic encode / decode pair, so each wire
//! format is documented in exactly one place and the round-trip law is
//! mechanically testable.

use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer carrying packed fields
    pub struct U256(4);
}

pub mod error;
pub mod layout;

pub use error::{CodecError, Result};
pub use layout::{FieldDef, Layout, AUCTION_SUMMARY, GWEI, TRANSFER_PAYLOAD};
