//! Non-fungible gem ownership ledger
//!
//! Tracks only ownership per token id — attribute encoding lives with the
//! token contract collaborator and stays outside the market core.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{LedgerError, Result};
use crate::Address;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetLedger {
    collection: Address,
    owners: BTreeMap<u32, Address>,
}

impl AssetLedger {
    pub fn new(collection: &str) -> Self {
        Self {
            collection: collection.to_string(),
            owners: BTreeMap::new(),
        }
    }

    /// Identifier of the collection this ledger tracks
    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn exists(&self, id: u32) -> bool {
        self.owners.contains_key(&id)
    }

    pub fn owner_of(&self, id: u32) -> Result<&Address> {
        self.owners.get(&id).ok_or(LedgerError::UnknownAsset(id))
    }

    /// Create a new asset with a unique id
    pub fn mint(&mut self, owner: &str, id: u32) -> Result<()> {
        if self.owners.contains_key(&id) {
            return Err(LedgerError::DuplicateAsset(id));
        }
        self.owners.insert(id, owner.to_string());
        log::debug!("{}: minted asset {} to {}", self.collection, id, owner);
        Ok(())
    }

    /// Move ownership of `id` from `from` to `to`
    pub fn transfer(&mut self, from: &str, to: &str, id: u32) -> Result<()> {
        let owner = self.owners.get_mut(&id).ok_or(LedgerError::UnknownAsset(id))?;
        if owner != from {
            return Err(LedgerError::NotOwner {
                id,
                address: from.to_string(),
            });
        }
        *owner = to.to_string();
        Ok(())
    }

    /// All asset ids held by `owner`, in ascending order
    pub fn tokens_of(&self, owner: &str) -> Vec<u32> {
        self.owners
            .iter()
            .filter(|(_, holder)| holder.as_str() == owner)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mint_and_ownership() {
        let mut gems = AssetLedger::new("gem");
        gems.mint("alice", 1).unwrap();
        gems.mint("alice", 7).unwrap();
        gems.mint("bob", 3).unwrap();

        assert_eq!(gems.owner_of(1).unwrap(), "alice");
        assert_eq!(gems.tokens_of("alice"), vec![1, 7]);
        assert_eq!(gems.len(), 3);

        // ids are unique
        assert_eq!(gems.mint("bob", 1), Err(LedgerError::DuplicateAsset(1)));
    }

    #[test]
    fn test_transfer_checks_owner() {
        let mut gems = AssetLedger::new("gem");
        gems.mint("alice", 1).unwrap();

        assert_eq!(
            gems.transfer("bob", "carol", 1),
            Err(LedgerError::NotOwner {
                id: 1,
                address: "bob".to_string()
            })
        );
        assert_eq!(gems.transfer("bob", "carol", 2), Err(LedgerError::UnknownAsset(2)));

        gems.transfer("alice", "bob", 1).unwrap();
        assert_eq!(gems.owner_of(1).unwrap(), "bob");
    }
}
