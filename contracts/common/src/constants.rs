//! Ledger Constants
//!
//! Fixed storage keys, argument layouts and event identifiers shared by the
//! ledger contract, its dispatcher and the in-memory host.
//!
//! # Features
//!
//! - `std` (default) - link against `std`; disable for WASM builds
//! - `mock` - compile the in-memory [`MockHost`](crate::mock_host::MockHost)
//!
//! ```toml
//! # For tests against the in-memory host:
//! ledger-common = { path = "...", features = ["mock"] }
//! ```

/// Token Metadata
pub mod token {
    /// Token name
    pub const NAME: &str = "Ledger Token";
    /// Token symbol
    pub const SYMBOL: &str = "LDG";
}

/// Address layout
pub mod address {
    /// Length of an account address in bytes
    pub const LENGTH: usize = 32;

    /// Length of a log topic in bytes
    pub const TOPIC_LENGTH: usize = 32;
}

/// Contract-level storage keys
///
/// Account balances live under the raw 32-byte address. Every key in this
/// module has a different length, so it can never alias an account.
pub mod storage {
    /// Total supply minted by `init`
    pub const TOTAL_SUPPLY_KEY: &[u8] = b"ledger.totalSupply";

    /// Set once `init` has completed
    pub const INITIALIZED_KEY: &[u8] = b"ledger.initialized";

    /// Value stored under [`INITIALIZED_KEY`]
    pub const INITIALIZED_FLAG: &[u8] = &[0x01];
}

/// Entry point argument counts
pub mod abi {
    /// `init(total_supply)`
    pub const INIT_ARGS: usize = 1;
    /// `balanceOf(address)`
    pub const BALANCE_OF_ARGS: usize = 1;
    /// `transfer(recipient, amount)`
    pub const TRANSFER_ARGS: usize = 2;
    /// `totalSupply()`
    pub const TOTAL_SUPPLY_ARGS: usize = 0;

    /// Position of the recipient in `transfer`
    pub const TRANSFER_RECIPIENT_INDEX: usize = 0;
    /// Position of the amount in `transfer`
    pub const TRANSFER_AMOUNT_INDEX: usize = 1;

    /// Widest argument accepted by 64-bit decoding
    pub const I64_ARG_MAX_BYTES: usize = 8;
}

/// Event identifiers, hashed into the first log topic
pub mod events {
    /// Identifier of the mint performed by `init`
    pub const INITIALIZED: &str = "event.initialized";
    /// Identifier of a balance transfer
    pub const TRANSFER: &str = "event.transfer";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_keys_never_alias_accounts() {
        assert_ne!(storage::TOTAL_SUPPLY_KEY.len(), address::LENGTH);
        assert_ne!(storage::INITIALIZED_KEY.len(), address::LENGTH);
        assert_ne!(storage::TOTAL_SUPPLY_KEY, storage::INITIALIZED_KEY);
    }

    #[test]
    fn test_event_identifiers_distinct() {
        assert_ne!(events::INITIALIZED, events::TRANSFER);
    }
}
