//! WASM Host Bindings
//!
//! Imports the VM's environment functions and exports one symbol per entry
//! point. Scratch buffers live on the stack or heap of a single call; no
//! state is kept between invocations.

use ledger_common::{constants::address, host::LedgerHost, types::{Address, Topic}, Vec};

use crate::dispatch::dispatch;

#[allow(non_snake_case)]
extern "C" {
    fn getCaller(resultOffset: *mut u8);
    fn getNumArguments() -> i32;
    fn getArgumentLength(id: i32) -> i32;
    fn getArgument(id: i32, argOffset: *mut u8) -> i32;
    fn storageLoadLength(keyOffset: *const u8, keyLength: i32) -> i32;
    fn storageLoad(keyOffset: *const u8, keyLength: i32, dataOffset: *mut u8) -> i32;
    fn storageStore(keyOffset: *const u8, keyLength: i32, dataOffset: *const u8, dataLength: i32) -> i32;
    fn finish(dataOffset: *const u8, length: i32);
    fn writeLog(dataOffset: *const u8, length: i32, topicPtr: *const u8, numTopics: i32);
    fn signalError(messageOffset: *const u8, messageLength: i32) -> !;
}

/// The VM environment of the running invocation
struct VmHost;

impl LedgerHost for VmHost {
    fn caller(&self) -> Address {
        let mut addr = [0u8; 32];
        unsafe { getCaller(addr.as_mut_ptr()) };
        addr
    }

    fn argument_count(&self) -> usize {
        unsafe { getNumArguments() }.max(0) as usize
    }

    fn argument_bytes(&self, index: usize) -> ledger_common::LedgerResult<Vec<u8>> {
        if index >= self.argument_count() {
            return Err(ledger_common::LedgerError::InvalidArgument {
                index,
                reason: "argument index out of range",
            });
        }
        let id = index as i32;
        let len = unsafe { getArgumentLength(id) }.max(0) as usize;
        let mut buf = Vec::with_capacity(len);
        buf.resize(len, 0u8);
        if len > 0 {
            unsafe { getArgument(id, buf.as_mut_ptr()) };
        }
        Ok(buf)
    }

    fn storage_load(&self, key: &[u8]) -> Vec<u8> {
        let len = unsafe { storageLoadLength(key.as_ptr(), key.len() as i32) }.max(0) as usize;
        let mut buf = Vec::with_capacity(len);
        buf.resize(len, 0u8);
        if len > 0 {
            unsafe { storageLoad(key.as_ptr(), key.len() as i32, buf.as_mut_ptr()) };
        }
        buf
    }

    fn storage_store(&mut self, key: &[u8], value: &[u8]) {
        unsafe {
            storageStore(key.as_ptr(), key.len() as i32, value.as_ptr(), value.len() as i32);
        }
    }

    fn finish(&mut self, data: &[u8]) {
        unsafe { finish(data.as_ptr(), data.len() as i32) }
    }

    fn write_log(&mut self, topics: &[Topic], data: &[u8]) {
        let mut raw = Vec::with_capacity(topics.len() * address::TOPIC_LENGTH);
        for topic in topics {
            raw.extend_from_slice(topic);
        }
        unsafe {
            writeLog(data.as_ptr(), data.len() as i32, raw.as_ptr(), topics.len() as i32);
        }
    }

    fn signal_error(&mut self, message: &[u8]) {
        unsafe { signalError(message.as_ptr(), message.len() as i32) }
    }
}

fn run(function: &str) {
    // failures are already reported through signal_error
    let _ = dispatch(&mut VmHost, function);
}

#[no_mangle]
pub extern "C" fn init() {
    run("init");
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn balanceOf() {
    run("balanceOf");
}

#[no_mangle]
pub extern "C" fn transfer() {
    run("transfer");
}

#[no_mangle]
#[allow(non_snake_case)]
pub extern "C" fn totalSupply() {
    run("totalSupply");
}
