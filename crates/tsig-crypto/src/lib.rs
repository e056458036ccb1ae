//! # tsig-crypto
//!
//! Cryptographic core for Keccak-challenged Schnorr signatures over the
//! multiplicative group of a 256-bit prime field, plus Shamir secret sharing
//! over the same field.
//!
//! Every operation takes an explicit [`field::GroupParams`]; there is no
//! global modulus. Signers, dealers and verifiers interoperate only if they
//! hold identical parameters, and nothing at this layer can detect a mismatch.
//!
//! ## Modules
//!
//! - [`field`] — Group parameters, modular arithmetic, range checks, sampling
//! - [`keccak`] — Keccak-256 message digest and Fiat-Shamir challenge
//! - [`schnorr`] — Key generation, signing, verification
//! - [`shamir`] — Polynomial sharing and Lagrange reconstruction at zero
//! - [`secret`] — Scoped private scalar wrapper

pub mod field;
pub mod keccak;
pub mod schnorr;
pub mod secret;
pub mod shamir;

pub use field::GroupParams;
pub use schnorr::{KeyPair, NonceMode};
pub use secret::SecretScalar;

/// Error types for cryptographic operations.
///
/// All variants are local validation failures. Retrying with the same input
/// cannot succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    /// A scalar or group element is outside its required interval.
    #[error("{what} out of range: require {bound}")]
    Range {
        /// Which value failed.
        what: &'static str,
        /// The violated interval.
        bound: &'static str,
    },

    /// Invalid `(n, t)` sharing parameters.
    #[error("invalid sharing parameters n={n}, t={t}: {reason}")]
    Parameter {
        /// Number of shares requested.
        n: usize,
        /// Threshold requested.
        t: usize,
        /// Which constraint failed.
        reason: &'static str,
    },

    /// Fewer shares than the required threshold.
    #[error("insufficient shares: need at least {required}, got {available}")]
    InsufficientShares {
        /// Shares required.
        required: usize,
        /// Shares supplied.
        available: usize,
    },

    /// No shares were supplied.
    #[error("no shares provided")]
    EmptyInput,

    /// A share has a zero x-coordinate or repeats another share's.
    #[error("share x-coordinates must be distinct and non-zero (offending x = {x})")]
    DuplicateOrZeroCoordinate {
        /// The offending coordinate.
        x: u32,
    },

    /// Modular inverse of zero.
    #[error("modular inverse of zero")]
    Division,

    /// Group parameters rejected at construction.
    #[error("invalid group parameters: {0}")]
    InvalidParams(String),

    /// The random source failed or could not produce an in-range value.
    #[error("randomness source failure: {0}")]
    Randomness(String),
}

pub type Result<T> = std::result::Result<T, CryptoError>;
