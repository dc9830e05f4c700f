//! Gemfield Core Module
//!
//! Shared collaborator ledgers consumed by the market components:
//! - Feature / role access control bitmasks
//! - Fungible currency ledgers (silver, gold, the native coin)
//! - Non-fungible gem ownership ledger
//!
//! These are deliberately narrow: token attribute encoding, allowances and
//! the mining subsystem live with their own contracts and are not modeled
//! here.

pub mod access;
pub mod assets;
pub mod currency;
pub mod error;

pub use access::AccessControl;
pub use assets::AssetLedger;
pub use currency::CurrencyLedger;
pub use error::{LedgerError, Result};

/// Address of an account, contract or module within the game economy
pub type Address = String;

/// Shared feature and role bits
pub mod constants {
    /// Enables fungible token transfers
    pub const FEATURE_TRANSFERS: u32 = 0x0000_0001;

    /// Token creator is responsible for creating tokens
    pub const ROLE_TOKEN_CREATOR: u32 = 0x0000_0001;

    /// Token destroyer is responsible for destroying tokens
    pub const ROLE_TOKEN_DESTROYER: u32 = 0x0000_0002;
}

#[cfg(test)]
mod tests {
    use super::constants::*;

    #[test]
    fn test_creator_and_destroyer_are_distinct() {
        assert_ne!(ROLE_TOKEN_CREATOR, ROLE_TOKEN_DESTROYER);
    }
}
