//! Core Types for the Ledger
//!
//! Shared identifiers and the entry point table used by the dispatcher.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::abi;

/// Type alias for account addresses (32 bytes)
pub type Address = [u8; 32];

/// Type alias for 32-byte log topics
pub type Topic = [u8; 32];

/// Entry points exposed by the ledger contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum EntryPoint {
    /// Mint the total supply to the deployer
    Init,
    /// Query the balance of an address
    BalanceOf,
    /// Move value from the caller to a recipient
    Transfer,
    /// Query the minted supply
    TotalSupply,
}

impl EntryPoint {
    /// All entry points, in dispatch order
    pub const ALL: [EntryPoint; 4] = [
        EntryPoint::Init,
        EntryPoint::BalanceOf,
        EntryPoint::Transfer,
        EntryPoint::TotalSupply,
    ];

    /// Exported function name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::BalanceOf => "balanceOf",
            Self::Transfer => "transfer",
            Self::TotalSupply => "totalSupply",
        }
    }

    /// Resolve an exported function name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|ep| ep.name() == name)
    }

    /// Exact number of arguments the entry point accepts
    pub fn argument_count(&self) -> usize {
        match self {
            Self::Init => abi::INIT_ARGS,
            Self::BalanceOf => abi::BALANCE_OF_ARGS,
            Self::Transfer => abi::TRANSFER_ARGS,
            Self::TotalSupply => abi::TOTAL_SUPPLY_ARGS,
        }
    }

    /// True if the entry point never writes storage
    pub fn is_readonly(&self) -> bool {
        matches!(self, Self::BalanceOf | Self::TotalSupply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_lookup() {
        for ep in EntryPoint::ALL {
            assert_eq!(EntryPoint::from_name(ep.name()), Some(ep));
        }
        assert_eq!(EntryPoint::from_name("transferToken"), None);
        assert_eq!(EntryPoint::from_name(""), None);
    }

    #[test]
    fn test_argument_counts() {
        assert_eq!(EntryPoint::Init.argument_count(), 1);
        assert_eq!(EntryPoint::BalanceOf.argument_count(), 1);
        assert_eq!(EntryPoint::Transfer.argument_count(), 2);
        assert_eq!(EntryPoint::TotalSupply.argument_count(), 0);
    }

    #[test]
    fn test_readonly() {
        assert!(EntryPoint::BalanceOf.is_readonly());
        assert!(!EntryPoint::Transfer.is_readonly());
    }
}
