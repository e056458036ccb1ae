//! The 32-byte message digest (bytes32 on the verifier side).

use std::fmt;
use std::str::FromStr;

use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::{TypesError, WORD_BYTES};

/// Keccak-256 of a message's bytes.
///
/// Text form is lowercase hex with a `0x` prefix; parsing also accepts bare
/// hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub struct MessageDigest([u8; WORD_BYTES]);

impl MessageDigest {
    pub const fn from_bytes(bytes: [u8; WORD_BYTES]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; WORD_BYTES] {
        &self.0
    }

    pub fn to_bytes(self) -> [u8; WORD_BYTES] {
        self.0
    }

    /// `0x`-prefixed lowercase hex.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; WORD_BYTES]> for MessageDigest {
    fn from(bytes: [u8; WORD_BYTES]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for MessageDigest {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for MessageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for MessageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageDigest({})", self.to_hex())
    }
}

impl FromStr for MessageDigest {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(digits)?;
        let bytes: [u8; WORD_BYTES] =
            decoded
                .as_slice()
                .try_into()
                .map_err(|_| TypesError::InvalidDigestLength {
                    expected: WORD_BYTES,
                    actual: decoded.len(),
                })?;
        Ok(Self(bytes))
    }
}
