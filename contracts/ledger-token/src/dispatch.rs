//! Entry Point Dispatch
//!
//! Routes an exported function name to the matching [`TokenLedger`] entry
//! point and reports failures to the host.
//!
//! ## Functions
//!
//! - **init** `(total_supply)`: mint the supply to the deployer
//! - **balanceOf** `(address)`: query a balance
//! - **transfer** `(recipient, amount)`: move value from the caller
//! - **totalSupply** `()`: query the minted supply

use ledger_common::{
    errors::{LedgerError, LedgerResult},
    host::LedgerHost,
    types::EntryPoint,
};

use crate::TokenLedger;

/// Run the entry point exported as `function`
///
/// On failure the error code is passed to
/// [`LedgerHost::signal_error`], which aborts the invocation, and the error
/// is also returned to the caller.
pub fn dispatch<H: LedgerHost + ?Sized>(host: &mut H, function: &str) -> LedgerResult<()> {
    let result = match EntryPoint::from_name(function) {
        Some(entry) => invoke(host, entry),
        None => Err(LedgerError::UnknownFunction),
    };

    if let Err(err) = &result {
        host.signal_error(err.code().as_bytes());
    }
    result
}

/// Run a resolved entry point without signalling errors
pub fn invoke<H: LedgerHost + ?Sized>(host: &mut H, entry: EntryPoint) -> LedgerResult<()> {
    let mut ledger = TokenLedger::new(host);
    match entry {
        EntryPoint::Init => ledger.init(),
        EntryPoint::BalanceOf => ledger.balance_of(),
        EntryPoint::Transfer => ledger.transfer(),
        EntryPoint::TotalSupply => ledger.total_supply(),
    }
}
