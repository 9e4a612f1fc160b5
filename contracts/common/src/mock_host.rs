//! In-Memory Host
//!
//! A [`LedgerHost`] backed by a `BTreeMap`, used by unit tests and the
//! scenario runner. It reproduces the host behaviour the ledger relies on:
//!
//! - absent keys load as empty bytes, empty stores clear the key
//! - a failed invocation rolls back its storage writes and logs
//!
//! [`MockHost::without_rollback`] disables the rollback so tests can check
//! that the contract never writes before validation has passed.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::big_int::Amount;
use crate::constants::address;
use crate::errors::{LedgerError, LedgerResult};
use crate::events::{EventLog, LedgerEvent};
use crate::host::LedgerHost;
use crate::types::{Address, Topic};

/// One `write_log` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct LogEntry {
    pub topics: Vec<Topic>,
    pub data: Vec<u8>,
}

/// Persisted part of the host, as exported by [`MockHost::export_state`]
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
struct HostState {
    storage: BTreeMap<Vec<u8>, Vec<u8>>,
    logs: Vec<LogEntry>,
}

/// In-memory host with per-invocation rollback
#[derive(Debug, Clone)]
pub struct MockHost {
    state: HostState,
    rollback: bool,
    // per-invocation context
    caller: Address,
    arguments: Vec<Vec<u8>>,
    output: Vec<Vec<u8>>,
    pending_logs: Vec<LogEntry>,
    error_message: Option<Vec<u8>>,
    writes: usize,
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHost {
    /// Host that rolls back failed invocations
    pub fn new() -> Self {
        Self {
            state: HostState::default(),
            rollback: true,
            caller: [0u8; 32],
            arguments: Vec::new(),
            output: Vec::new(),
            pending_logs: Vec::new(),
            error_message: None,
            writes: 0,
        }
    }

    /// Host whose writes are final even when the invocation fails
    pub fn without_rollback() -> Self {
        Self {
            rollback: false,
            ..Self::new()
        }
    }

    /// Run one invocation as `caller` with `arguments`
    ///
    /// Returns the values passed to `finish` on success. On failure the
    /// storage and logs written by this invocation are discarded (unless
    /// rollback is disabled) and the error is returned.
    pub fn call<F>(
        &mut self,
        caller: Address,
        arguments: Vec<Vec<u8>>,
        entry: F,
    ) -> LedgerResult<Vec<Vec<u8>>>
    where
        F: FnOnce(&mut MockHost) -> LedgerResult<()>,
    {
        self.caller = caller;
        self.arguments = arguments;
        self.output.clear();
        self.pending_logs.clear();
        self.error_message = None;
        self.writes = 0;

        let snapshot = if self.rollback {
            Some(self.state.storage.clone())
        } else {
            None
        };

        match entry(self) {
            Ok(()) => {
                let pending = std::mem::take(&mut self.pending_logs);
                self.state.logs.extend(pending);
                Ok(std::mem::take(&mut self.output))
            }
            Err(err) => {
                if let Some(storage) = snapshot {
                    self.state.storage = storage;
                    self.pending_logs.clear();
                } else {
                    let pending = std::mem::take(&mut self.pending_logs);
                    self.state.logs.extend(pending);
                }
                self.output.clear();
                Err(err)
            }
        }
    }

    /// Message passed to `signal_error` by the last invocation
    pub fn last_error(&self) -> Option<&[u8]> {
        self.error_message.as_deref()
    }

    /// Number of storage writes made by the last invocation
    pub fn storage_writes(&self) -> usize {
        self.writes
    }

    /// Committed log entries, oldest first
    pub fn logs(&self) -> &[LogEntry] {
        &self.state.logs
    }

    /// Committed logs decoded as ledger events
    pub fn events(&self) -> EventLog {
        let mut log = EventLog::new();
        for entry in &self.state.logs {
            if let Some(event) = LedgerEvent::from_log(&entry.topics, &entry.data) {
                log.emit(event);
            }
        }
        log
    }

    /// Raw storage entry
    pub fn storage_get(&self, key: &[u8]) -> Option<&[u8]> {
        self.state.storage.get(key).map(Vec::as_slice)
    }

    /// Every stored account balance (keys of address length)
    pub fn account_balances(&self) -> impl Iterator<Item = (Address, Amount)> + '_ {
        self.state
            .storage
            .iter()
            .filter(|(key, _)| key.len() == address::LENGTH)
            .map(|(key, value)| {
                let mut addr = [0u8; 32];
                addr.copy_from_slice(key);
                (addr, Amount::from_bytes_be(value))
            })
    }

    /// Sum of every stored account balance
    pub fn sum_of_balances(&self) -> Amount {
        self.account_balances()
            .fold(Amount::zero(), |acc, (_, balance)| acc + balance)
    }

    /// Borsh snapshot of storage and committed logs
    pub fn export_state(&self) -> Vec<u8> {
        borsh::to_vec(&self.state).unwrap_or_default()
    }

    /// Replace storage and logs with a snapshot from [`export_state`](Self::export_state)
    pub fn import_state(&mut self, bytes: &[u8]) -> Option<()> {
        self.state = borsh::from_slice(bytes).ok()?;
        Some(())
    }
}

impl LedgerHost for MockHost {
    fn caller(&self) -> Address {
        self.caller
    }

    fn argument_count(&self) -> usize {
        self.arguments.len()
    }

    fn argument_bytes(&self, index: usize) -> LedgerResult<Vec<u8>> {
        self.arguments
            .get(index)
            .cloned()
            .ok_or(LedgerError::InvalidArgument {
                index,
                reason: "argument index out of range",
            })
    }

    fn storage_load(&self, key: &[u8]) -> Vec<u8> {
        self.state.storage.get(key).cloned().unwrap_or_default()
    }

    fn storage_store(&mut self, key: &[u8], value: &[u8]) {
        self.writes += 1;
        if value.is_empty() {
            self.state.storage.remove(key);
        } else {
            self.state.storage.insert(key.to_vec(), value.to_vec());
        }
    }

    fn finish(&mut self, data: &[u8]) {
        self.output.push(data.to_vec());
    }

    fn write_log(&mut self, topics: &[Topic], data: &[u8]) {
        self.pending_logs.push(LogEntry {
            topics: topics.to_vec(),
            data: data.to_vec(),
        });
    }

    fn signal_error(&mut self, message: &[u8]) {
        self.error_message = Some(message.to_vec());
    }
}
