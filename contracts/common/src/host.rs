//! Host Boundary
//!
//! The VM host owns identity, argument decoding, persistent storage and the
//! result/error surface. The ledger only sees it through [`LedgerHost`], so
//! the same contract code runs against the real host bindings or against the
//! in-memory [`MockHost`](crate::mock_host::MockHost).
//!
//! Implementors provide the raw byte-level primitives; the big-integer and
//! address helpers are provided methods built on top of them.

use crate::big_int::Amount;
use crate::constants::{abi, address};
use crate::errors::{LedgerError, LedgerResult};
use crate::types::{Address, Topic};
use crate::Vec;

/// Primitives the VM host exposes to a running contract
pub trait LedgerHost {
    // ============ Identity & Arguments ============

    /// Address of the account that invoked the contract
    fn caller(&self) -> Address;

    /// Number of arguments supplied with the invocation
    fn argument_count(&self) -> usize;

    /// Raw bytes of the argument at `index`
    fn argument_bytes(&self, index: usize) -> LedgerResult<Vec<u8>>;

    // ============ Storage ============

    /// Value stored under `key`; empty if the key is absent
    fn storage_load(&self, key: &[u8]) -> Vec<u8>;

    /// Store `value` under `key`; an empty value clears the key
    fn storage_store(&mut self, key: &[u8], value: &[u8]);

    // ============ Result / Error Surface ============

    /// Append a return value
    fn finish(&mut self, data: &[u8]);

    /// Append a log entry
    fn write_log(&mut self, topics: &[Topic], data: &[u8]);

    /// Abort the invocation; the host discards its writes
    fn signal_error(&mut self, message: &[u8]);

    // ============ Provided ============

    /// Fail unless exactly `expected` arguments were supplied
    fn check_argument_count(&self, expected: usize) -> LedgerResult<()> {
        let actual = self.argument_count();
        if actual != expected {
            return Err(LedgerError::ArgumentCount { expected, actual });
        }
        Ok(())
    }

    /// Decode a 32-byte address argument
    fn argument_address(&self, index: usize) -> LedgerResult<Address> {
        let bytes = self.argument_bytes(index)?;
        if bytes.len() != address::LENGTH {
            return Err(LedgerError::InvalidArgument {
                index,
                reason: "address must be 32 bytes",
            });
        }
        let mut addr = [0u8; 32];
        addr.copy_from_slice(&bytes);
        Ok(addr)
    }

    /// Decode an unsigned big-endian big integer argument
    fn argument_big_int(&self, index: usize) -> LedgerResult<Amount> {
        Ok(Amount::from_bytes_be(&self.argument_bytes(index)?))
    }

    /// Decode a signed big-endian argument of at most 8 bytes
    fn argument_i64(&self, index: usize) -> LedgerResult<i64> {
        let bytes = self.argument_bytes(index)?;
        if bytes.len() > abi::I64_ARG_MAX_BYTES {
            return Err(LedgerError::InvalidArgument {
                index,
                reason: "i64 argument longer than 8 bytes",
            });
        }
        // sign-extend from the most significant supplied byte
        let fill = match bytes.first() {
            Some(b) if b & 0x80 != 0 => 0xFF,
            _ => 0x00,
        };
        let mut buf = [fill; 8];
        buf[8 - bytes.len()..].copy_from_slice(&bytes);
        Ok(i64::from_be_bytes(buf))
    }

    /// Load a big integer; an absent key yields zero
    fn storage_load_big_int(&self, key: &[u8]) -> Amount {
        Amount::from_bytes_be(&self.storage_load(key))
    }

    /// Store a big integer in canonical form
    fn storage_store_big_int(&mut self, key: &[u8], value: &Amount) {
        self.storage_store(key, &value.to_bytes_be());
    }

    /// Return a big integer in canonical form
    fn finish_big_int(&mut self, value: &Amount) {
        self.finish(&value.to_bytes_be());
    }
}
