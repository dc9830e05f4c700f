//! The box sale state machine
//!
//! Per-tier sold counters with the admission throttle, the rising price
//! schedule and the buy / bulk-buy settlement flow. Every operation
//! validates completely before touching any state, so a failed call has
//! no observable effect.

use gem_core::constants::ROLE_TOKEN_CREATOR;
use gem_core::{AccessControl, Address, CurrencyLedger, LedgerError};
use log::info;
use pricing::PriceSchedule;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SaleError};
use crate::{
    BOX_NAMES, CHEST_DIVISOR, DAY, FEATURE_SALE_ENABLED, FINAL_PRICES, GOLDISH_TIER,
    GOLD_CHANCE_PERCENT, HARD_CAPS, INITIAL_PRICES, MAX_QTY, SALE_DURATION_DAYS, SILVER_MAX,
    SILVER_MAX_GOLD, SILVER_MIN, SILVER_MIN_GOLD,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SilverSale {
    /// the sale's own address — granted minting roles on the currencies
    address: Address,
    /// sale start; the price rises for `SALE_DURATION_DAYS` from here
    offset: u64,
    /// receives 1/20 of every charge
    chest: Address,
    /// receives the remainder of every charge
    beneficiary: Address,
    boxes_sold: [u32; 3],
    pub access: AccessControl,
}

impl SilverSale {
    pub fn new(address: &str, offset: u64, chest: &str, beneficiary: &str) -> Self {
        Self {
            address: address.to_string(),
            offset,
            chest: chest.to_string(),
            beneficiary: beneficiary.to_string(),
            boxes_sold: [0; 3],
            access: AccessControl::new(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn chest(&self) -> &str {
        &self.chest
    }

    pub fn beneficiary(&self) -> &str {
        &self.beneficiary
    }

    /// Cumulative boxes sold for a tier
    pub fn boxes_sold(&self, box_type: u32) -> Result<u32> {
        Ok(self.boxes_sold[Self::tier_index(box_type)?])
    }

    fn tier_index(box_type: u32) -> Result<usize> {
        if (box_type as usize) < BOX_NAMES.len() {
            Ok(box_type as usize)
        } else {
            Err(SaleError::InvalidBoxType(box_type))
        }
    }

    fn check_quantity(quantity: u32) -> Result<()> {
        if quantity == 0 || quantity > MAX_QTY {
            return Err(SaleError::InvalidQuantity(quantity));
        }
        Ok(())
    }

    /// Admission control: a call may never push the counter past the hard
    /// cap, and below the 90% line it may not buy more than 10% of the
    /// cap in one go. The throttle is waived for a purchase that lands
    /// the tier in its final 10%, so the last tranche — or the whole cap
    /// from zero — goes in one call.
    fn admit(&self, i: usize, quantity: u32) -> Result<()> {
        let cap = HARD_CAPS[i];
        let sold = self.boxes_sold[i];
        let after = sold + quantity;
        let tranche = cap / 10;
        let threshold = cap - tranche;

        if after > cap || (after < threshold && quantity > tranche) {
            return Err(SaleError::CapExceeded {
                box_type: i as u32,
                sold,
                requested: quantity,
                cap,
            });
        }
        Ok(())
    }

    /// The sale must hold the creator role on silver, and on gold for the
    /// tier whose boxes can carry gold.
    fn check_minting_roles(
        &self,
        silver: &CurrencyLedger,
        gold: &CurrencyLedger,
        i: usize,
    ) -> Result<()> {
        if !silver.access.has_role(&self.address, ROLE_TOKEN_CREATOR) {
            return Err(LedgerError::PermissionDenied {
                address: self.address.clone(),
                role: ROLE_TOKEN_CREATOR,
            }
            .into());
        }
        if i as u32 == GOLDISH_TIER && !gold.access.has_role(&self.address, ROLE_TOKEN_CREATOR) {
            return Err(LedgerError::PermissionDenied {
                address: self.address.clone(),
                role: ROLE_TOKEN_CREATOR,
            }
            .into());
        }
        Ok(())
    }

    /// Current box price for a tier: `initial` before the sale starts,
    /// rising once per day, `final` from day 20 on.
    pub fn box_price(&self, box_type: u32, now: u64) -> Result<u128> {
        let i = Self::tier_index(box_type)?;
        let schedule = PriceSchedule::new(
            self.offset,
            INITIAL_PRICES[i],
            self.offset + SALE_DURATION_DAYS * DAY,
            FINAL_PRICES[i],
            DAY,
        )?;
        Ok(schedule.value_at(now)?)
    }

    /// Total price of a bulk request; validates the request shape and
    /// every (tier, quantity) pair.
    pub fn bulk_price(&self, box_types: &[u32], quantities: &[u32], now: u64) -> Result<u128> {
        Self::check_bulk_shape(box_types, quantities)?;
        let mut total: u128 = 0;
        for (&box_type, &quantity) in box_types.iter().zip(quantities) {
            Self::check_quantity(quantity)?;
            total += self.box_price(box_type, now)? * quantity as u128;
        }
        Ok(total)
    }

    fn check_bulk_shape(box_types: &[u32], quantities: &[u32]) -> Result<()> {
        if box_types.is_empty() || box_types.len() != quantities.len() {
            return Err(SaleError::LengthMismatch);
        }
        for (n, &box_type) in box_types.iter().enumerate() {
            if box_types[..n].contains(&box_type) {
                return Err(SaleError::DuplicateBoxType(box_type));
            }
        }
        Ok(())
    }

    /// Buy `quantity` boxes of one tier. Charges the current price,
    /// refunds the excess, routes 1/20 of the charge to the chest and the
    /// rest to the beneficiary, mints the box contents to the buyer.
    /// Returns the amount charged.
    #[allow(clippy::too_many_arguments)]
    pub fn buy<R: Rng>(
        &mut self,
        silver: &mut CurrencyLedger,
        gold: &mut CurrencyLedger,
        native: &mut CurrencyLedger,
        rng: &mut R,
        buyer: &str,
        box_type: u32,
        quantity: u32,
        payment: u128,
        now: u64,
    ) -> Result<u128> {
        if !self.access.has_feature(FEATURE_SALE_ENABLED) {
            return Err(SaleError::SaleDisabled);
        }
        let i = Self::tier_index(box_type)?;
        Self::check_quantity(quantity)?;
        self.admit(i, quantity)?;
        self.check_minting_roles(silver, gold, i)?;

        let total = self.box_price(box_type, now)? * quantity as u128;
        if payment < total {
            return Err(SaleError::InsufficientPayment {
                required: total,
                offered: payment,
            });
        }

        // validation complete — settle and mint
        native.withdraw(buyer, payment)?;
        self.settle(native, buyer, total, payment);
        self.mint_boxes(silver, gold, rng, buyer, i, quantity)?;
        self.boxes_sold[i] += quantity;

        info!(
            "sold {} x {} to {} for {} wei",
            quantity, BOX_NAMES[i], buyer, total
        );
        Ok(total)
    }

    /// Buy boxes of several tiers in one atomic call. Each pair obeys the
    /// single-buy rules independently; if any pair fails, nothing is
    /// applied.
    #[allow(clippy::too_many_arguments)]
    pub fn bulk_buy<R: Rng>(
        &mut self,
        silver: &mut CurrencyLedger,
        gold: &mut CurrencyLedger,
        native: &mut CurrencyLedger,
        rng: &mut R,
        buyer: &str,
        box_types: &[u32],
        quantities: &[u32],
        payment: u128,
        now: u64,
    ) -> Result<u128> {
        if !self.access.has_feature(FEATURE_SALE_ENABLED) {
            return Err(SaleError::SaleDisabled);
        }
        Self::check_bulk_shape(box_types, quantities)?;

        // validate every pair before touching any state
        let mut total: u128 = 0;
        for (&box_type, &quantity) in box_types.iter().zip(quantities) {
            let i = Self::tier_index(box_type)?;
            Self::check_quantity(quantity)?;
            self.admit(i, quantity)?;
            self.check_minting_roles(silver, gold, i)?;
            total += self.box_price(box_type, now)? * quantity as u128;
        }
        if payment < total {
            return Err(SaleError::InsufficientPayment {
                required: total,
                offered: payment,
            });
        }

        native.withdraw(buyer, payment)?;
        self.settle(native, buyer, total, payment);
        for (&box_type, &quantity) in box_types.iter().zip(quantities) {
            let i = box_type as usize;
            self.mint_boxes(silver, gold, rng, buyer, i, quantity)?;
            self.boxes_sold[i] += quantity;
        }

        info!(
            "bulk sold {:?} x {:?} to {} for {} wei",
            quantities, box_types, buyer, total
        );
        Ok(total)
    }

    /// Split the charge between chest and beneficiary and refund the
    /// excess. The payment was already withdrawn, so nothing here can
    /// fail.
    fn settle(&self, native: &mut CurrencyLedger, buyer: &str, total: u128, payment: u128) {
        let chest_cut = total / CHEST_DIVISOR;
        native.deposit(&self.chest, chest_cut);
        native.deposit(&self.beneficiary, total - chest_cut);
        if payment > total {
            native.deposit(buyer, payment - total);
        }
    }

    /// Mint the contents of `quantity` boxes of one tier to the buyer.
    /// Roles were pre-checked, so minting cannot fail partway.
    fn mint_boxes<R: Rng>(
        &self,
        silver: &mut CurrencyLedger,
        gold: &mut CurrencyLedger,
        rng: &mut R,
        buyer: &str,
        i: usize,
        quantity: u32,
    ) -> Result<()> {
        for _ in 0..quantity {
            if i as u32 == GOLDISH_TIER && rng.random_ratio(GOLD_CHANCE_PERCENT, 100) {
                gold.mint(&self.address, buyer, 1)?;
                let roll = rng.random_range(SILVER_MIN_GOLD..=SILVER_MAX_GOLD);
                silver.mint(&self.address, buyer, roll as u128)?;
            } else {
                let roll = rng.random_range(SILVER_MIN[i]..=SILVER_MAX[i]);
                silver.mint(&self.address, buyer, roll as u128)?;
            }
        }
        Ok(())
    }
}
