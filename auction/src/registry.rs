//! Dutch auction registry
//!
//! Owns the set of ACTIVE listings and the per-asset state machine:
//! `NONE -> ACTIVE` when an asset arrives with a valid payload,
//! `ACTIVE -> SOLD` on buy, `ACTIVE -> CANCELLED` on cancel. Terminal
//! transitions remove the record and release the asset, so absence from
//! the map is the NONE state. The registry's custody address owns every
//! listed asset while its listing is ACTIVE.

use std::collections::{BTreeMap, HashSet};

use gem_core::{AccessControl, Address, AssetLedger, CurrencyLedger};
use log::info;
use packed_codec::{AUCTION_SUMMARY, U256};
use serde::{Deserialize, Serialize};

use crate::error::{AuctionError, Result};
use crate::listing::{Listing, ListingParams};
use crate::{FEATURE_ADD, ROLE_AUCTION_MANAGER};

/// Default price update granularity (seconds)
const DEFAULT_PRICE_STEP: u64 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DutchAuction {
    /// custody address listed assets are held under
    address: Address,
    /// collections allowed to list
    allowed: HashSet<Address>,
    /// ACTIVE listings by asset id
    listings: BTreeMap<u32, Listing>,
    /// price update granularity in seconds
    price_step: u64,
    pub access: AccessControl,
}

impl DutchAuction {
    pub fn new(address: &str) -> Self {
        Self::with_price_step(address, DEFAULT_PRICE_STEP)
    }

    pub fn with_price_step(address: &str, price_step: u64) -> Self {
        Self {
            address: address.to_string(),
            allowed: HashSet::new(),
            listings: BTreeMap::new(),
            price_step: price_step.max(1),
            access: AccessControl::new(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Allow or disallow a collection to be listed here
    pub fn set_allowed(&mut self, collection: &str, allowed: bool) {
        if allowed {
            self.allowed.insert(collection.to_string());
        } else {
            self.allowed.remove(collection);
        }
    }

    pub fn is_allowed(&self, collection: &str) -> bool {
        self.allowed.contains(collection)
    }

    pub fn listing(&self, asset_id: u32) -> Option<&Listing> {
        self.listings.get(&asset_id)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Validate a raw transfer payload into listing parameters for
    /// `asset_id`. Decoding itself never fails; the extracted values are
    /// checked here.
    pub fn validate_payload(&self, asset_id: u32, word: U256) -> Result<ListingParams> {
        let params = ListingParams::from_word(word);
        if params.asset_id != asset_id {
            return Err(AuctionError::InvalidPayload(format!(
                "payload is for asset {}, transfer carries asset {}",
                params.asset_id, asset_id
            )));
        }
        if params.t1 <= params.t0 {
            return Err(AuctionError::InvalidPayload(format!(
                "t1 ({}) must be after t0 ({})",
                params.t1, params.t0
            )));
        }
        Ok(params)
    }

    /// Activate a validated listing. The asset must already be in the
    /// registry's custody.
    pub fn register_listing(
        &mut self,
        collection: &str,
        seller: &str,
        params: ListingParams,
    ) -> Result<()> {
        if self.listings.contains_key(&params.asset_id) {
            return Err(AuctionError::AlreadyListed(params.asset_id));
        }
        self.listings.insert(
            params.asset_id,
            Listing {
                asset_id: params.asset_id,
                collection: collection.to_string(),
                seller: seller.to_string(),
                t0: params.t0,
                t1: params.t1,
                start_price: params.start_price,
                end_price: params.end_price,
            },
        );
        info!(
            "listed asset {}: {} -> {} wei over [{}, {}]",
            params.asset_id, params.start_price, params.end_price, params.t0, params.t1
        );
        Ok(())
    }

    /// An asset arrives from `from` carrying packed auction parameters:
    /// validate, take custody, activate. Any precondition failure rejects
    /// the incoming transfer as a whole.
    pub fn receive_asset(
        &mut self,
        assets: &mut AssetLedger,
        from: &str,
        asset_id: u32,
        payload: U256,
    ) -> Result<()> {
        if !self.access.has_feature(FEATURE_ADD) {
            return Err(AuctionError::AddDisabled);
        }
        if !self.allowed.contains(assets.collection()) {
            return Err(AuctionError::CollectionNotAllowed(
                assets.collection().to_string(),
            ));
        }
        let params = self.validate_payload(asset_id, payload)?;
        if self.listings.contains_key(&asset_id) {
            return Err(AuctionError::AlreadyListed(asset_id));
        }

        // custody transfer is the last fallible step before activation
        let custody = self.address.clone();
        assets.transfer(from, &custody, asset_id)?;
        let collection = assets.collection().to_string();
        self.register_listing(&collection, from, params)
    }

    /// Current sale price of a listed asset — bit-exact with what `buy`
    /// charges at the same instant.
    pub fn current_price(&self, asset_id: u32, now: u64) -> Result<u128> {
        let listing = self
            .listings
            .get(&asset_id)
            .ok_or(AuctionError::NotListed(asset_id))?;
        Ok(listing.price_at(now, self.price_step)?)
    }

    /// Buy a listed asset: charge the current price, refund the excess,
    /// pay the seller and release the asset to the buyer. Returns the
    /// price actually charged.
    pub fn buy(
        &mut self,
        assets: &mut AssetLedger,
        funds: &mut CurrencyLedger,
        buyer: &str,
        asset_id: u32,
        payment: u128,
        now: u64,
    ) -> Result<u128> {
        let listing = self
            .listings
            .get(&asset_id)
            .ok_or(AuctionError::NotListed(asset_id))?;
        let price = listing.price_at(now, self.price_step)?;
        if payment < price {
            return Err(AuctionError::InsufficientPayment {
                price,
                offered: payment,
            });
        }
        // custody invariant must hold before any value moves
        if assets.owner_of(asset_id)? != &self.address {
            return Err(AuctionError::NotListed(asset_id));
        }
        let seller = listing.seller.clone();

        // validation complete — settle
        funds.withdraw(buyer, payment)?;
        funds.deposit(&seller, price);
        if payment > price {
            funds.deposit(buyer, payment - price);
        }
        let custody = self.address.clone();
        assets.transfer(&custody, buyer, asset_id)?;
        self.listings.remove(&asset_id);

        info!("sold asset {} to {} for {} wei", asset_id, buyer, price);
        Ok(price)
    }

    /// Cancel an ACTIVE listing and return the asset to its seller.
    /// Callable by the seller or by a holder of the manager role.
    pub fn cancel(&mut self, assets: &mut AssetLedger, caller: &str, asset_id: u32) -> Result<()> {
        let listing = self
            .listings
            .get(&asset_id)
            .ok_or(AuctionError::NotListed(asset_id))?;
        if caller != listing.seller && !self.access.has_role(caller, ROLE_AUCTION_MANAGER) {
            return Err(AuctionError::CancelDenied(caller.to_string()));
        }
        let seller = listing.seller.clone();
        let custody = self.address.clone();
        assets.transfer(&custody, &seller, asset_id)?;
        self.listings.remove(&asset_id);

        info!("cancelled listing for asset {}, returned to {}", asset_id, seller);
        Ok(())
    }

    /// All ACTIVE listings of `owner`, each annotated with its packed
    /// auction parameters: `asset_id << 160 | summary word` with the
    /// current price as the Gwei hint. Ordered by asset id.
    pub fn listings_of(&self, owner: &str, now: u64) -> Result<Vec<U256>> {
        let mut collection = Vec::new();
        for (id, listing) in &self.listings {
            if listing.seller != owner {
                continue;
            }
            let current = listing.price_at(now, self.price_step)?;
            let summary = AUCTION_SUMMARY.encode(&[
                listing.t0 as u128,
                listing.t1 as u128,
                listing.start_price,
                listing.end_price,
                current,
            ])?;
            collection.push((U256::from(*id) << 160) | summary);
        }
        Ok(collection)
    }
}
