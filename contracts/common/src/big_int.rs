//! Arbitrary-Precision Amounts
//!
//! The host exposes big integers as opaque handles. Inside the contract they
//! are modelled as the owned [`Amount`] value: non-negative, unbounded, and
//! compared by magnitude.
//!
//! ## Encoding
//!
//! The canonical byte form is minimal big-endian: no leading zero bytes, and
//! zero encodes as the empty slice. This is the form persisted in storage
//! and emitted as a return value, so an absent storage key decodes to zero.

use core::fmt;
use core::ops::{Add, AddAssign};

use num_bigint::BigUint;
use num_traits::{CheckedSub, Zero};
use serde::{Deserialize, Serialize};

use crate::Vec;

/// Non-negative arbitrary-precision integer
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(BigUint);

impl Amount {
    /// The zero amount
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// Check for zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Decode big-endian bytes. Leading zeros are accepted; empty is zero.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self(BigUint::from_bytes_be(bytes))
    }

    /// Canonical minimal big-endian encoding (empty for zero)
    pub fn to_bytes_be(&self) -> Vec<u8> {
        if self.is_zero() {
            return Vec::new();
        }
        self.0.to_bytes_be()
    }

    /// Subtract, or `None` if `other > self`
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_sub(&other.0).map(Self)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(BigUint::from(value))
    }
}

impl Add<&Amount> for &Amount {
    type Output = Amount;

    fn add(self, other: &Amount) -> Amount {
        Amount(&self.0 + &other.0)
    }
}

impl Add for Amount {
    type Output = Amount;

    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, other: &Amount) {
        self.0 += &other.0;
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
