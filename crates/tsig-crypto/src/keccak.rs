//! Keccak-256 digest and the Fiat-Shamir challenge.
//!
//! This is the original Keccak padding used by the EVM (`keccak256`), not
//! NIST SHA3-256. The challenge framing is a wire contract with the external
//! verifier:
//!
//! ```text
//! digest = keccak256(message)
//! h      = keccak256(r as 32-byte big-endian || digest) mod P
//! ```
//!
//! No separators, no length prefixes.

use num_bigint::BigUint;
use sha3::{Digest, Keccak256};

use tsig_types::{Challenge, GroupElement, MessageDigest, WORD_BYTES};

use crate::field::GroupParams;
use crate::{CryptoError, Result};

/// Raw Keccak-256.
pub fn keccak256(data: &[u8]) -> [u8; WORD_BYTES] {
    let mut out = [0u8; WORD_BYTES];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Keccak-256 of the concatenation of `parts`.
pub fn keccak256_concat(parts: &[&[u8]]) -> [u8; WORD_BYTES] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    let mut out = [0u8; WORD_BYTES];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// Digest of a message's bytes (bytes32 on the verifier side).
pub fn message_digest(message: impl AsRef<[u8]>) -> MessageDigest {
    MessageDigest::from_bytes(keccak256(message.as_ref()))
}

/// Compute `(h, digest)` for a commitment `r` and a message.
///
/// # Errors
///
/// [`CryptoError::Range`] unless `0 < r < P`.
pub fn challenge(
    params: &GroupParams,
    r: &GroupElement,
    message: impl AsRef<[u8]>,
) -> Result<(Challenge, MessageDigest)> {
    params.check_group_element(r.as_biguint(), "commitment r")?;
    let digest = message_digest(message);
    let h = challenge_from_digest(params, r, &digest)?;
    Ok((h, digest))
}

/// Compute `h` when only the digest is at hand, as an on-chain verifier does.
pub fn challenge_from_digest(
    params: &GroupParams,
    r: &GroupElement,
    digest: &MessageDigest,
) -> Result<Challenge> {
    params.check_group_element(r.as_biguint(), "commitment r")?;
    let r_bytes = r.to_be_bytes32().ok_or(CryptoError::Range {
        what: "commitment r",
        bound: "r < 2^256",
    })?;
    let h = keccak256_concat(&[&r_bytes, digest.as_bytes()]);
    Ok(Challenge::new(BigUint::from_bytes_be(&h) % params.p()))
}
