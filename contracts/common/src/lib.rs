//! Ledger Common Library
//!
//! Shared types, constants and the host boundary for the ledger contract.
//!
//! ## Execution Model
//!
//! The contract runs inside a deterministic, gas-metered VM host:
//! - **Host primitives**: identity, arguments, storage and results come
//!   from the [`LedgerHost`] trait, never from globals
//! - **Big integers**: host handles are modelled as the owned [`Amount`]
//! - **Atomicity**: a failed invocation is rolled back by the host, and
//!   the contract validates before it writes so it stays correct without it
//!
//! This crate is `no_std` compatible for WASM compilation when built
//! without the default `std` feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// Re-export Vec for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;
#[cfg(feature = "std")]
pub use std::vec::Vec;

pub mod constants;
pub mod errors;
pub mod types;
pub mod big_int;
pub mod events;
pub mod host;

#[cfg(feature = "mock")]
pub mod mock_host;

// Re-exports for convenience
pub use big_int::Amount;
pub use errors::*;
pub use events::*;
pub use host::LedgerHost;
pub use types::*;

#[cfg(feature = "mock")]
pub use mock_host::{LogEntry, MockHost};
