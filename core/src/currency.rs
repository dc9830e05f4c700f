//! Fungible currency ledger
//!
//! One instance per currency (silver, gold, the native coin). Minting and
//! burning are gated by the creator / destroyer roles, plain transfers by
//! the transfers feature. `deposit` / `withdraw` are the settlement
//! primitives the market operations use to move attached-value payments;
//! they carry no permission gate of their own.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::access::AccessControl;
use crate::constants::{FEATURE_TRANSFERS, ROLE_TOKEN_CREATOR, ROLE_TOKEN_DESTROYER};
use crate::error::{LedgerError, Result};
use crate::Address;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyLedger {
    symbol: String,
    balances: HashMap<Address, u128>,
    total_supply: u128,
    pub access: AccessControl,
}

impl CurrencyLedger {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            balances: HashMap::new(),
            total_supply: 0,
            access: AccessControl::new(),
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn balance_of(&self, address: &str) -> u128 {
        self.balances.get(address).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Create `amount` new units for `to`; `minter` must hold the token
    /// creator role.
    pub fn mint(&mut self, minter: &str, to: &str, amount: u128) -> Result<()> {
        if !self.access.has_role(minter, ROLE_TOKEN_CREATOR) {
            return Err(LedgerError::PermissionDenied {
                address: minter.to_string(),
                role: ROLE_TOKEN_CREATOR,
            });
        }
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;

        *self.balances.entry(to.to_string()).or_default() += amount;
        self.total_supply = supply;
        log::debug!("{}: minted {} to {}", self.symbol, amount, to);
        Ok(())
    }

    /// Destroy `amount` units held by `from`; `destroyer` must hold the
    /// token destroyer role.
    pub fn burn(&mut self, destroyer: &str, from: &str, amount: u128) -> Result<()> {
        if !self.access.has_role(destroyer, ROLE_TOKEN_DESTROYER) {
            return Err(LedgerError::PermissionDenied {
                address: destroyer.to_string(),
                role: ROLE_TOKEN_DESTROYER,
            });
        }
        self.debit(from, amount)?;
        self.total_supply -= amount;
        log::debug!("{}: burned {} from {}", self.symbol, amount, from);
        Ok(())
    }

    /// Move `amount` from one holder to another. Requires the transfers
    /// feature to be enabled on this currency.
    pub fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<()> {
        if !self.access.has_feature(FEATURE_TRANSFERS) {
            return Err(LedgerError::FeatureDisabled {
                feature: FEATURE_TRANSFERS,
            });
        }
        self.debit(from, amount)?;
        *self.balances.entry(to.to_string()).or_default() += amount;
        Ok(())
    }

    /// Settlement primitive: value arriving from outside the ledger.
    /// Saturates instead of wrapping so a hostile amount cannot corrupt
    /// neighbouring balances.
    pub fn deposit(&mut self, to: &str, amount: u128) {
        let balance = self.balances.entry(to.to_string()).or_default();
        *balance = balance.saturating_add(amount);
        self.total_supply = self.total_supply.saturating_add(amount);
    }

    /// Settlement primitive: value leaving the ledger (e.g. a payment
    /// attached to a call). Fails without effect if `from` holds less
    /// than `amount`.
    pub fn withdraw(&mut self, from: &str, amount: u128) -> Result<()> {
        self.debit(from, amount)?;
        self.total_supply -= amount;
        Ok(())
    }

    fn debit(&mut self, from: &str, amount: u128) -> Result<()> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(LedgerError::InsufficientBalance {
                requested: amount,
                available,
            });
        }
        if let Some(balance) = self.balances.get_mut(from) {
            *balance -= amount;
        }
        Ok(())
    }
}
