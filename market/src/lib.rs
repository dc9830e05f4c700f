//! Gemfield Market
//!
//! The single serializing aggregate over the whole game economy: gem
//! ownership, silver / gold / native coin ledgers, the Dutch auction
//! registry and the silver box sale. Every mutating operation holds the
//! write lock for its full duration, so there is at most one writer and a
//! failed operation has no observable effect; reads take snapshots of the
//! latest committed state and never block each other.
//!
//! Operations come in two flavours: `*_at` takes an explicit unix
//! timestamp (deterministic replay), the plain form evaluates at the
//! current wall clock.

use gem_core::constants::ROLE_TOKEN_CREATOR;
use gem_core::{AssetLedger, CurrencyLedger, LedgerError};
use auction::{AuctionError, DutchAuction};
use packed_codec::U256;
use parking_lot::{Mutex, RwLock};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use silver_sale::{SaleError, SilverSale};
use thiserror::Error;

/// Well-known module addresses within the economy
pub mod addresses {
    pub const AUCTION: &str = "auction";
    pub const SALE: &str = "silver-sale";
    pub const GEM_COLLECTION: &str = "gem";
}

#[derive(Error, Debug)]
pub enum MarketError {
    #[error(transparent)]
    Auction(#[from] AuctionError),

    #[error(transparent)]
    Sale(#[from] SaleError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

pub type Result<T> = std::result::Result<T, MarketError>;

/// The committed state of the whole economy
#[derive(Debug, Clone, Serialize)]
struct EconomyState {
    gems: AssetLedger,
    native: CurrencyLedger,
    silver: CurrencyLedger,
    gold: CurrencyLedger,
    auction: DutchAuction,
    sale: SilverSale,
}

pub struct Economy {
    state: RwLock<EconomyState>,
    rng: Mutex<ChaCha20Rng>,
}

impl Economy {
    /// Wire up a fresh economy: allow-list the gem collection for
    /// auctioning, enable listing and selling, grant the sale its
    /// minting roles.
    pub fn new(chest: &str, beneficiary: &str, sale_offset: u64) -> Self {
        Self::with_seed(chest, beneficiary, sale_offset, rand::random::<u64>())
    }

    /// Deterministic construction for replay verification: the gold
    /// bonus stream is fixed by `seed`.
    pub fn with_seed(chest: &str, beneficiary: &str, sale_offset: u64, seed: u64) -> Self {
        Self::build(
            chest,
            beneficiary,
            sale_offset,
            ChaCha20Rng::seed_from_u64(seed),
        )
    }

    fn build(chest: &str, beneficiary: &str, sale_offset: u64, rng: ChaCha20Rng) -> Self {
        let gems = AssetLedger::new(addresses::GEM_COLLECTION);
        let native = CurrencyLedger::new("ETH");
        let mut silver = CurrencyLedger::new("SLV");
        let mut gold = CurrencyLedger::new("GLD");

        let mut auction = DutchAuction::new(addresses::AUCTION);
        auction.set_allowed(addresses::GEM_COLLECTION, true);
        auction.access.update_features(auction::FEATURE_ADD);

        let mut sale = SilverSale::new(addresses::SALE, sale_offset, chest, beneficiary);
        sale.access.update_features(silver_sale::FEATURE_SALE_ENABLED);
        silver.access.update_role(addresses::SALE, ROLE_TOKEN_CREATOR);
        gold.access.update_role(addresses::SALE, ROLE_TOKEN_CREATOR);

        log::info!(
            "economy initialized: chest {}, beneficiary {}, sale offset {}",
            chest,
            beneficiary,
            sale_offset
        );
        Self {
            state: RwLock::new(EconomyState {
                gems,
                native,
                silver,
                gold,
                auction,
                sale,
            }),
            rng: Mutex::new(rng),
        }
    }

    // ---- faucet / setup ----

    /// Credit native coin to an address (value arriving from outside)
    pub fn fund(&self, address: &str, amount: u128) {
        self.state.write().native.deposit(address, amount);
    }

    /// Create a gem for `owner`
    pub fn mint_gem(&self, owner: &str, asset_id: u32) -> Result<()> {
        Ok(self.state.write().gems.mint(owner, asset_id)?)
    }

    // ---- auction operations ----

    /// List a gem: the owner transfers it into auction custody together
    /// with the packed auction parameters.
    pub fn list_gem(&self, owner: &str, asset_id: u32, payload: U256) -> Result<()> {
        let state = &mut *self.state.write();
        Ok(state
            .auction
            .receive_asset(&mut state.gems, owner, asset_id, payload)?)
    }

    pub fn buy_gem(&self, buyer: &str, asset_id: u32, payment: u128) -> Result<u128> {
        self.buy_gem_at(buyer, asset_id, payment, current_timestamp())
    }

    pub fn buy_gem_at(
        &self,
        buyer: &str,
        asset_id: u32,
        payment: u128,
        now: u64,
    ) -> Result<u128> {
        let state = &mut *self.state.write();
        Ok(state.auction.buy(
            &mut state.gems,
            &mut state.native,
            buyer,
            asset_id,
            payment,
            now,
        )?)
    }

    pub fn cancel_listing(&self, caller: &str, asset_id: u32) -> Result<()> {
        let state = &mut *self.state.write();
        Ok(state.auction.cancel(&mut state.gems, caller, asset_id)?)
    }

    pub fn gem_price(&self, asset_id: u32) -> Result<u128> {
        self.gem_price_at(asset_id, current_timestamp())
    }

    pub fn gem_price_at(&self, asset_id: u32, now: u64) -> Result<u128> {
        Ok(self.state.read().auction.current_price(asset_id, now)?)
    }

    /// Packed auction parameters for every ACTIVE listing of `owner`
    pub fn listings_of(&self, owner: &str) -> Result<Vec<U256>> {
        self.listings_of_at(owner, current_timestamp())
    }

    pub fn listings_of_at(&self, owner: &str, now: u64) -> Result<Vec<U256>> {
        Ok(self.state.read().auction.listings_of(owner, now)?)
    }

    // ---- box sale operations ----

    pub fn box_price(&self, box_type: u32) -> Result<u128> {
        self.box_price_at(box_type, current_timestamp())
    }

    pub fn box_price_at(&self, box_type: u32, now: u64) -> Result<u128> {
        Ok(self.state.read().sale.box_price(box_type, now)?)
    }

    pub fn bulk_price(&self, box_types: &[u32], quantities: &[u32]) -> Result<u128> {
        self.bulk_price_at(box_types, quantities, current_timestamp())
    }

    pub fn bulk_price_at(
        &self,
        box_types: &[u32],
        quantities: &[u32],
        now: u64,
    ) -> Result<u128> {
        Ok(self
            .state
            .read()
            .sale
            .bulk_price(box_types, quantities, now)?)
    }

    pub fn buy_boxes(
        &self,
        buyer: &str,
        box_type: u32,
        quantity: u32,
        payment: u128,
    ) -> Result<u128> {
        self.buy_boxes_at(buyer, box_type, quantity, payment, current_timestamp())
    }

    pub fn buy_boxes_at(
        &self,
        buyer: &str,
        box_type: u32,
        quantity: u32,
        payment: u128,
        now: u64,
    ) -> Result<u128> {
        let state = &mut *self.state.write();
        let mut rng = self.rng.lock();
        Ok(state.sale.buy(
            &mut state.silver,
            &mut state.gold,
            &mut state.native,
            &mut *rng,
            buyer,
            box_type,
            quantity,
            payment,
            now,
        )?)
    }

    pub fn bulk_buy_boxes(
        &self,
        buyer: &str,
        box_types: &[u32],
        quantities: &[u32],
        payment: u128,
    ) -> Result<u128> {
        self.bulk_buy_boxes_at(buyer, box_types, quantities, payment, current_timestamp())
    }

    pub fn bulk_buy_boxes_at(
        &self,
        buyer: &str,
        box_types: &[u32],
        quantities: &[u32],
        payment: u128,
        now: u64,
    ) -> Result<u128> {
        let state = &mut *self.state.write();
        let mut rng = self.rng.lock();
        Ok(state.sale.bulk_buy(
            &mut state.silver,
            &mut state.gold,
            &mut state.native,
            &mut *rng,
            buyer,
            box_types,
            quantities,
            payment,
            now,
        )?)
    }

    // ---- query surface ----

    pub fn boxes_sold(&self, box_type: u32) -> Result<u32> {
        Ok(self.state.read().sale.boxes_sold(box_type)?)
    }

    pub fn gem_owner(&self, asset_id: u32) -> Result<String> {
        Ok(self.state.read().gems.owner_of(asset_id)?.clone())
    }

    pub fn gems_of(&self, owner: &str) -> Vec<u32> {
        self.state.read().gems.tokens_of(owner)
    }

    pub fn native_balance(&self, address: &str) -> u128 {
        self.state.read().native.balance_of(address)
    }

    pub fn silver_balance(&self, address: &str) -> u128 {
        self.state.read().silver.balance_of(address)
    }

    pub fn gold_balance(&self, address: &str) -> u128 {
        self.state.read().gold.balance_of(address)
    }

    /// JSON snapshot of the committed state, for external tooling
    pub fn snapshot_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.state.read())
    }
}

fn current_timestamp() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
