//! Ledger Events
//!
//! Events are written to the host log during execution and can be indexed
//! off-chain. Each event becomes one log entry:
//!
//! - topic 0: SHA-256 of the event identifier
//! - topics 1..: the addresses involved
//! - data: canonical big-endian amount

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::big_int::Amount;
use crate::constants::events as ids;
use crate::types::{Address, Topic};
use crate::Vec;

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum LedgerEventType {
    Initialized = 0x01,
    Transfer = 0x40,
}

impl LedgerEventType {
    /// Identifier hashed into the first topic
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::Initialized => ids::INITIALIZED,
            Self::Transfer => ids::TRANSFER,
        }
    }

    /// First log topic for this event type
    pub fn topic(&self) -> Topic {
        let mut hasher = Sha256::new();
        hasher.update(self.identifier().as_bytes());
        let result = hasher.finalize();
        let mut topic = [0u8; 32];
        topic.copy_from_slice(&result);
        topic
    }

    /// Reverse lookup from the first topic
    pub fn from_topic(topic: &Topic) -> Option<Self> {
        [Self::Initialized, Self::Transfer]
            .into_iter()
            .find(|t| &t.topic() == topic)
    }
}

/// Events emitted by the ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Emitted once, when `init` mints the supply
    Initialized {
        owner: Address,
        total_supply: Amount,
    },

    /// Emitted on every successful transfer
    Transfer {
        from: Address,
        to: Address,
        amount: Amount,
    },
}

impl LedgerEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> LedgerEventType {
        match self {
            Self::Initialized { .. } => LedgerEventType::Initialized,
            Self::Transfer { .. } => LedgerEventType::Transfer,
        }
    }

    /// Log topics, starting with the event type topic
    pub fn topics(&self) -> Vec<Topic> {
        let mut topics = Vec::with_capacity(3);
        topics.push(self.event_type().topic());
        match self {
            Self::Initialized { owner, .. } => topics.push(*owner),
            Self::Transfer { from, to, .. } => {
                topics.push(*from);
                topics.push(*to);
            }
        }
        topics
    }

    /// Log data
    pub fn data(&self) -> Vec<u8> {
        match self {
            Self::Initialized { total_supply, .. } => total_supply.to_bytes_be(),
            Self::Transfer { amount, .. } => amount.to_bytes_be(),
        }
    }

    /// Rebuild an event from a raw log entry
    pub fn from_log(topics: &[Topic], data: &[u8]) -> Option<Self> {
        let (first, rest) = topics.split_first()?;
        match (LedgerEventType::from_topic(first)?, rest) {
            (LedgerEventType::Initialized, [owner]) => Some(Self::Initialized {
                owner: *owner,
                total_supply: Amount::from_bytes_be(data),
            }),
            (LedgerEventType::Transfer, [from, to]) => Some(Self::Transfer {
                from: *from,
                to: *to,
                amount: Amount::from_bytes_be(data),
            }),
            _ => None,
        }
    }
}

/// Ledger events recovered from a host log, oldest first
///
/// Entries whose first topic is not a ledger event type are not recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    events: Vec<LedgerEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `event` after everything already in the log
    pub fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Events of one type, in log order
    pub fn filter_by_type(&self, event_type: LedgerEventType) -> Vec<&LedgerEvent> {
        self.events
            .iter()
            .filter(|event| event.event_type() == event_type)
            .collect()
    }

    /// Number of recorded events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
