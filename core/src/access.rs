//! Feature and role access control
//!
//! Features are global on/off switches packed into a u32 bitmask; roles are
//! granted per address. Bits are independent and their meaning is owned by
//! the component holding the `AccessControl` instance.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccessControl {
    features: u32,
    roles: HashMap<String, u32>,
}

impl AccessControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the enabled feature set
    pub fn update_features(&mut self, mask: u32) {
        self.features = mask;
    }

    pub fn has_feature(&self, bit: u32) -> bool {
        self.features & bit == bit
    }

    /// Replace the role set of an address; a zero mask revokes all roles
    pub fn update_role(&mut self, address: &str, mask: u32) {
        if mask == 0 {
            self.roles.remove(address);
        } else {
            self.roles.insert(address.to_string(), mask);
        }
    }

    pub fn has_role(&self, address: &str, bit: u32) -> bool {
        self.roles
            .get(address)
            .map(|mask| mask & bit == bit)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_features_toggle() {
        let mut access = AccessControl::new();
        assert!(!access.has_feature(0x1));

        access.update_features(0x1 | 0x4);
        assert!(access.has_feature(0x1));
        assert!(access.has_feature(0x4));
        assert!(!access.has_feature(0x2));

        // update replaces the whole mask
        access.update_features(0);
        assert!(!access.has_feature(0x1));
    }

    #[test]
    fn test_roles_per_address() {
        let mut access = AccessControl::new();
        access.update_role("alice", 0x3);

        assert!(access.has_role("alice", 0x1));
        assert!(access.has_role("alice", 0x2));
        assert!(access.has_role("alice", 0x3));
        assert!(!access.has_role("alice", 0x4));
        assert!(!access.has_role("bob", 0x1));

        // zero mask revokes
        access.update_role("alice", 0);
        assert!(!access.has_role("alice", 0x1));
    }
}
