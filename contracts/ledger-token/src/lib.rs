//! Ledger Token Contract
//!
//! Fungible token ledger for a deterministic VM host. The supply is minted
//! once to the deployer by `init`; afterwards balances only move through
//! `transfer`, so the sum of all balances never changes.
//!
//! ## Storage Layout
//!
//! - `<32-byte address>` → balance (canonical big-endian, absent = zero)
//! - `ledger.totalSupply` → amount minted by `init`
//! - `ledger.initialized` → `0x01` once minted
//!
//! ## Atomicity
//!
//! Every entry point validates its arguments and balances before the first
//! storage write. A host that rolls back failed invocations and a host whose
//! writes are final observe the same state after an error.
//!
//! The `wasm32` contract module is built with the default `std` feature.
//! Without `std` the ledger is a `no_std` library only; a binary linking it
//! must supply its own panic handler and global allocator.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod dispatch;

#[cfg(feature = "runner")]
pub mod scenario;

#[cfg(target_arch = "wasm32")]
mod wasm;


use ledger_common::{
    constants::{abi, storage},
    errors::{LedgerError, LedgerResult},
    events::LedgerEvent,
    host::LedgerHost,
    types::Address,
    Amount,
};

// ============ Key Derivation ============

/// Storage key of an account balance
///
/// The address is used as-is. Contract-level keys in
/// [`constants::storage`](ledger_common::constants::storage) have other
/// lengths, so they share the key space without colliding.
pub fn balance_key(address: &Address) -> &[u8] {
    address
}

// ============ Ledger ============

/// Ledger entry points bound to one host invocation
pub struct TokenLedger<'a, H: LedgerHost + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: LedgerHost + ?Sized> TokenLedger<'a, H> {
    /// Bind the ledger to the current invocation
    pub fn new(host: &'a mut H) -> Self {
        Self { host }
    }

    // ============ Entry Points ============

    /// `init(total_supply)`: mint the whole supply to the caller
    ///
    /// Fails with `AlreadyInitialized` if a supply was minted before.
    pub fn init(&mut self) -> LedgerResult<()> {
        self.host.check_argument_count(abi::INIT_ARGS)?;

        if self.is_initialized() {
            return Err(LedgerError::AlreadyInitialized);
        }

        let owner = self.host.caller();
        let total_supply = self.host.argument_big_int(0)?;

        self.store_balance(&owner, &total_supply);
        self.host
            .storage_store_big_int(storage::TOTAL_SUPPLY_KEY, &total_supply);
        self.host
            .storage_store(storage::INITIALIZED_KEY, storage::INITIALIZED_FLAG);

        self.emit(&LedgerEvent::Initialized { owner, total_supply });
        Ok(())
    }

    /// `balanceOf(address)`: return the balance held by `address`
    pub fn balance_of(&mut self) -> LedgerResult<()> {
        self.host.check_argument_count(abi::BALANCE_OF_ARGS)?;

        let subject = self.host.argument_address(0)?;
        let balance = self.balance(&subject);

        self.host.finish_big_int(&balance);
        Ok(())
    }

    /// `transfer(recipient, amount)`: move `amount` from the caller
    pub fn transfer(&mut self) -> LedgerResult<()> {
        self.host.check_argument_count(abi::TRANSFER_ARGS)?;

        // sender is always the verified caller
        let sender = self.host.caller();
        let recipient = self.host.argument_address(abi::TRANSFER_RECIPIENT_INDEX)?;
        let amount = self.host.argument_big_int(abi::TRANSFER_AMOUNT_INDEX)?;

        self.perform_transfer(&sender, &recipient, &amount)
    }

    /// `totalSupply()`: return the amount minted by `init`
    pub fn total_supply(&mut self) -> LedgerResult<()> {
        self.host.check_argument_count(abi::TOTAL_SUPPLY_ARGS)?;

        let supply = self.supply();
        self.host.finish_big_int(&supply);
        Ok(())
    }

    // ============ Reads ============

    /// Balance stored for `address` (zero if never credited)
    pub fn balance(&self, address: &Address) -> Amount {
        self.host.storage_load_big_int(balance_key(address))
    }

    /// Minted supply (zero before `init`)
    pub fn supply(&self) -> Amount {
        self.host.storage_load_big_int(storage::TOTAL_SUPPLY_KEY)
    }

    /// True once `init` has succeeded
    pub fn is_initialized(&self) -> bool {
        !self.host.storage_load(storage::INITIALIZED_KEY).is_empty()
    }

    // ============ Internals ============

    fn perform_transfer(
        &mut self,
        sender: &Address,
        recipient: &Address,
        amount: &Amount,
    ) -> LedgerResult<()> {
        let sender_balance = self.balance(sender);

        // magnitude comparison, before any write
        if amount > &sender_balance {
            return Err(LedgerError::InsufficientBalance {
                available: sender_balance,
                requested: amount.clone(),
            });
        }
        let remaining = sender_balance
            .checked_sub(amount)
            .ok_or(LedgerError::Underflow)?;

        // a self-transfer or a zero amount leaves every balance as it is
        if !amount.is_zero() && sender != recipient {
            self.store_balance(sender, &remaining);

            // read after the debit so the two writes compose
            let mut recipient_balance = self.balance(recipient);
            recipient_balance += amount;
            self.store_balance(recipient, &recipient_balance);
        }

        self.emit(&LedgerEvent::Transfer {
            from: *sender,
            to: *recipient,
            amount: amount.clone(),
        });
        Ok(())
    }

    fn store_balance(&mut self, address: &Address, balance: &Amount) {
        self.host.storage_store_big_int(balance_key(address), balance);
    }

    fn emit(&mut self, event: &LedgerEvent) {
        self.host.write_log(&event.topics(), &event.data());
    }
}

// ============ Tests ============

#[cfg(test)]
mod tests {
    use super::*;
    use ledger_common::MockHost;

    const ALICE: Address = [1u8; 32];
    const BOB: Address = [2u8; 32];

    fn amount(value: u64) -> Vec<u8> {
        Amount::from(value).to_bytes_be()
    }

    fn minted(supply: u64) -> MockHost {
        let mut host = MockHost::new();
        host.call(ALICE, vec![amount(supply)], |h| TokenLedger::new(h).init())
            .unwrap();
        host
    }

    fn balance(host: &mut MockHost, who: Address) -> Amount {
        TokenLedger::new(host).balance(&who)
    }

    #[test]
    fn test_init_mints_to_caller() {
        let mut host = minted(1000);

        assert_eq!(balance(&mut host, ALICE), Amount::from(1000u64));
        assert_eq!(TokenLedger::new(&mut host).supply(), Amount::from(1000u64));
        assert!(TokenLedger::new(&mut host).is_initialized());
    }

    #[test]
    fn test_init_wrong_argument_count() {
        let mut host = MockHost::without_rollback();

        let result = host.call(ALICE, vec![], |h| TokenLedger::new(h).init());
        assert_eq!(
            result,
            Err(LedgerError::ArgumentCount { expected: 1, actual: 0 })
        );

        let result = host.call(ALICE, vec![amount(1), amount(2)], |h| {
            TokenLedger::new(h).init()
        });
        assert!(matches!(result, Err(LedgerError::ArgumentCount { .. })));
        assert_eq!(host.storage_writes(), 0);
        assert!(!TokenLedger::new(&mut host).is_initialized());
    }

    #[test]
    fn test_double_init_rejected() {
        let mut host = minted(1000);

        let result = host.call(BOB, vec![amount(5000)], |h| TokenLedger::new(h).init());

        assert_eq!(result, Err(LedgerError::AlreadyInitialized));
        assert_eq!(host.storage_writes(), 0);
        assert_eq!(balance(&mut host, ALICE), Amount::from(1000u64));
        assert_eq!(balance(&mut host, BOB), Amount::zero());
        assert_eq!(TokenLedger::new(&mut host).supply(), Amount::from(1000u64));
    }

    #[test]
    fn test_init_zero_supply_still_guards() {
        let mut host = minted(0);

        let result = host.call(ALICE, vec![amount(10)], |h| TokenLedger::new(h).init());
        assert_eq!(result, Err(LedgerError::AlreadyInitialized));
    }

    #[test]
    fn test_balance_of_returns_canonical_bytes() {
        let mut host = minted(1000);

        let output = host
            .call(BOB, vec![ALICE.to_vec()], |h| TokenLedger::new(h).balance_of())
            .unwrap();
        assert_eq!(output, vec![vec![0x03, 0xE8]]);
        assert_eq!(host.storage_writes(), 0);
    }

    #[test]
    fn test_balance_of_missing_key_is_zero() {
        let mut host = minted(1000);
        let carol = [3u8; 32];

        let output = host
            .call(BOB, vec![carol.to_vec()], |h| TokenLedger::new(h).balance_of())
            .unwrap();
        assert_eq!(output, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_balance_of_rejects_short_address() {
        let mut host = minted(1000);

        let result = host.call(BOB, vec![vec![1u8; 20]], |h| TokenLedger::new(h).balance_of());
        assert!(matches!(
            result,
            Err(LedgerError::InvalidArgument { index: 0, .. })
        ));

        let result = host.call(BOB, vec![], |h| TokenLedger::new(h).balance_of());
        assert_eq!(
            result,
            Err(LedgerError::ArgumentCount { expected: 1, actual: 0 })
        );
    }

    #[test]
    fn test_transfer_moves_value() {
        let mut host = minted(1000);

        host.call(ALICE, vec![BOB.to_vec(), amount(400)], |h| {
            TokenLedger::new(h).transfer()
        })
        .unwrap();

        assert_eq!(balance(&mut host, ALICE), Amount::from(600u64));
        assert_eq!(balance(&mut host, BOB), Amount::from(400u64));
    }

    #[test]
    fn test_transfer_insufficient_balance_writes_nothing() {
        let mut host = minted(1000);
        let mut strict = MockHost::without_rollback();
        strict.import_state(&host.export_state()).unwrap();

        for h in [&mut host, &mut strict] {
            let result = h.call(ALICE, vec![BOB.to_vec(), amount(1001)], |h| {
                TokenLedger::new(h).transfer()
            });

            assert_eq!(
                result,
                Err(LedgerError::InsufficientBalance {
                    available: Amount::from(1000u64),
                    requested: Amount::from(1001u64),
                })
            );
            assert_eq!(h.storage_writes(), 0);
            assert_eq!(balance(h, ALICE), Amount::from(1000u64));
            assert_eq!(balance(h, BOB), Amount::zero());
        }
    }

    #[test]
    fn test_transfer_wrong_argument_count() {
        let mut host = minted(1000);

        let result = host.call(ALICE, vec![BOB.to_vec()], |h| TokenLedger::new(h).transfer());

        assert_eq!(
            result,
            Err(LedgerError::ArgumentCount { expected: 2, actual: 1 })
        );
        assert_eq!(host.storage_writes(), 0);
        assert_eq!(balance(&mut host, ALICE), Amount::from(1000u64));
    }

    #[test]
    fn test_self_transfer_is_noop() {
        let mut host = minted(1000);

        host.call(ALICE, vec![ALICE.to_vec(), amount(400)], |h| {
            TokenLedger::new(h).transfer()
        })
        .unwrap();

        assert_eq!(balance(&mut host, ALICE), Amount::from(1000u64));
        assert_eq!(host.storage_writes(), 0);
    }

    #[test]
    fn test_self_transfer_over_balance_fails() {
        let mut host = minted(1000);

        let result = host.call(ALICE, vec![ALICE.to_vec(), amount(1001)], |h| {
            TokenLedger::new(h).transfer()
        });
        assert!(matches!(result, Err(LedgerError::InsufficientBalance { .. })));
    }

    #[test]
    fn test_zero_transfer_from_empty_account() {
        let mut host = minted(1000);
        let carol = [3u8; 32];

        host.call(carol, vec![BOB.to_vec(), amount(0)], |h| {
            TokenLedger::new(h).transfer()
        })
        .unwrap();

        assert_eq!(balance(&mut host, carol), Amount::zero());
        assert_eq!(balance(&mut host, BOB), Amount::zero());
        assert_eq!(host.storage_writes(), 0);
    }

    #[test]
    fn test_transfer_emptying_account_clears_key() {
        let mut host = minted(1000);

        host.call(ALICE, vec![BOB.to_vec(), amount(1000)], |h| {
            TokenLedger::new(h).transfer()
        })
        .unwrap();

        assert!(host.storage_get(balance_key(&ALICE)).is_none());
        assert_eq!(balance(&mut host, BOB), Amount::from(1000u64));
    }

    #[test]
    fn test_total_supply_query() {
        let mut host = minted(1000);

        let output = host
            .call(BOB, vec![], |h| TokenLedger::new(h).total_supply())
            .unwrap();
        assert_eq!(output, vec![vec![0x03, 0xE8]]);

        let result = host.call(BOB, vec![vec![1]], |h| TokenLedger::new(h).total_supply());
        assert!(matches!(result, Err(LedgerError::ArgumentCount { .. })));
    }

    #[test]
    fn test_total_supply_before_init_is_zero() {
        let mut host = MockHost::new();

        let output = host
            .call(BOB, vec![], |h| TokenLedger::new(h).total_supply())
            .unwrap();
        assert_eq!(output, vec![Vec::<u8>::new()]);
    }

    #[test]
    fn test_balance_key_is_address() {
        assert_eq!(balance_key(&ALICE), &ALICE[..]);
    }
}
