//! Listing records and transfer payloads

use gem_core::Address;
use packed_codec::{Result as CodecResult, TRANSFER_PAYLOAD, U256};
use pricing::PriceSchedule;
use serde::{Deserialize, Serialize};

/// Auction parameters carried by a listing transfer payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingParams {
    pub asset_id: u32,
    pub t0: u32,
    pub t1: u32,
    pub start_price: u128,
    pub end_price: u128,
}

impl ListingParams {
    /// Decode a 256-bit transfer payload. Total — validating the
    /// extracted values is the registry's job.
    pub fn from_word(word: U256) -> Self {
        let fields = TRANSFER_PAYLOAD.decode(word);
        Self {
            asset_id: fields[0] as u32,
            t0: fields[1] as u32,
            t1: fields[2] as u32,
            start_price: fields[3],
            end_price: fields[4],
        }
    }

    /// Encode into a 256-bit transfer payload
    pub fn to_word(&self) -> CodecResult<U256> {
        TRANSFER_PAYLOAD.encode(&[
            self.asset_id as u128,
            self.t0 as u128,
            self.t1 as u128,
            self.start_price,
            self.end_price,
        ])
    }
}

/// An ACTIVE listing: the asset is in registry custody and for sale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub asset_id: u32,
    pub collection: Address,
    pub seller: Address,
    pub t0: u32,
    pub t1: u32,
    pub start_price: u128,
    pub end_price: u128,
}

impl Listing {
    /// Sale price at `t`: the stepwise ramp clamped to `start_price`
    /// before `t0` and to `end_price` from `t1` on. `step` is the
    /// registry's price update granularity.
    pub fn price_at(&self, t: u64, step: u64) -> pricing::Result<u128> {
        PriceSchedule::new(
            self.t0 as u64,
            self.start_price,
            self.t1 as u64,
            self.end_price,
            step,
        )?
        .value_at(t)
    }
}
