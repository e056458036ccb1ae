//! Role-typed integers.
//!
//! All three types share the same representation and the same text form:
//! decimal on output, decimal or `0x`-prefixed hex on input. That matches the
//! artifact files written by signing tooling, which store uint256 values as
//! decimal strings.

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use num_traits::{Num, Zero};
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::{TypesError, WORD_BYTES};

macro_rules! integer_newtype {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, SerializeDisplay, DeserializeFromStr,
        )]
        pub struct $name(BigUint);

        impl $name {
            /// Wrap an arbitrary-precision integer.
            pub fn new(value: BigUint) -> Self {
                Self(value)
            }

            /// Build from a machine integer.
            pub fn from_u64(value: u64) -> Self {
                Self(BigUint::from(value))
            }

            /// Interpret big-endian bytes as an unsigned integer.
            pub fn from_be_bytes(bytes: &[u8]) -> Self {
                Self(BigUint::from_bytes_be(bytes))
            }

            /// Fixed-width 32-byte big-endian encoding.
            ///
            /// Returns `None` if the value does not fit in 256 bits.
            pub fn to_be_bytes32(&self) -> Option<[u8; WORD_BYTES]> {
                to_be_bytes32(&self.0)
            }

            pub fn as_biguint(&self) -> &BigUint {
                &self.0
            }

            pub fn into_biguint(self) -> BigUint {
                self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }
        }

        impl From<BigUint> for $name {
            fn from(value: BigUint) -> Self {
                Self(value)
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self::from_u64(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = TypesError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_integer(s).map(Self)
            }
        }
    };
}

integer_newtype!(
    /// An exponent-side integer: private key, nonce, polynomial coefficient,
    /// share value or signature `s`.
    Scalar
);

integer_newtype!(
    /// A group-side integer `G^x mod P`: public key or commitment `r`.
    GroupElement
);

integer_newtype!(
    /// A Fiat-Shamir challenge `h`, already reduced mod `P`.
    Challenge
);

/// Left-pad a big-endian encoding to exactly 32 bytes.
pub fn to_be_bytes32(value: &BigUint) -> Option<[u8; WORD_BYTES]> {
    let bytes = value.to_bytes_be();
    if bytes.len() > WORD_BYTES {
        return None;
    }
    let mut out = [0u8; WORD_BYTES];
    out[WORD_BYTES - bytes.len()..].copy_from_slice(&bytes);
    Some(out)
}

/// Parse a decimal or `0x`-prefixed hex integer.
pub fn parse_integer(s: &str) -> Result<BigUint, TypesError> {
    let trimmed = s.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        Some(hex_digits) => BigUint::from_str_radix(hex_digits, 16),
        None => BigUint::from_str_radix(trimmed, 10),
    };
    parsed.map_err(|_| TypesError::InvalidInteger(s.to_string()))
}
