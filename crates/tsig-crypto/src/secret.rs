//! Scoped private scalars.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use zeroize::Zeroizing;

use tsig_types::{Scalar, WORD_BYTES};

/// A private key, nonce, or polynomial coefficient.
///
/// Not `Clone`, redacted in `Debug`, never serialised. The value is cleared
/// when dropped; `num-bigint` offers no in-place wipe, so limbs are released
/// rather than overwritten.
pub struct SecretScalar(BigUint);

impl SecretScalar {
    pub fn new(value: BigUint) -> Self {
        Self(value)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(BigUint::from(value))
    }

    /// Borrow the secret value for arithmetic.
    pub fn expose(&self) -> &BigUint {
        &self.0
    }

    /// Fixed-width big-endian encoding, wiped on drop.
    ///
    /// Returns `None` if the value does not fit in 256 bits.
    pub fn to_be_bytes32(&self) -> Option<Zeroizing<[u8; WORD_BYTES]>> {
        let raw = Zeroizing::new(self.0.to_bytes_be());
        if raw.len() > WORD_BYTES {
            return None;
        }
        let mut out = Zeroizing::new([0u8; WORD_BYTES]);
        out[WORD_BYTES - raw.len()..].copy_from_slice(&raw);
        Some(out)
    }
}

impl From<Scalar> for SecretScalar {
    fn from(value: Scalar) -> Self {
        Self(value.into_biguint())
    }
}

impl Drop for SecretScalar {
    fn drop(&mut self) {
        self.0.set_zero();
    }
}

impl fmt::Debug for SecretScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretScalar(<redacted>)")
    }
}
