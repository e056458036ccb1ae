//! # tsig-threshold
//!
//! Threshold signing on top of `tsig-crypto`.
//!
//! A [`Dealer`] who knows the whole secret splits it into `n` shares. Any
//! quorum of at least `t` shares can be handed to a [`ThresholdSigner`],
//! which interpolates the secret, signs, and drops it before returning. The
//! result is an ordinary Schnorr signature that verifies under the group
//! public key.
//!
//! This is not a DKG: the dealer and the signer each hold the full secret
//! for the duration of one call.
//!
//! ## Modules
//!
//! - [`quorum`] — `t`-of-`n` configuration and share-set checks
//! - [`dealer`] — share distribution from a known or fresh secret
//! - [`signer`] — reconstruction, signing and artifact assembly

pub mod dealer;
pub mod quorum;
pub mod signer;

pub use dealer::{Dealer, Dealing};
pub use quorum::QuorumConfig;
pub use signer::{pubkey_from_secret, ThresholdSignature, ThresholdSigner};

use tsig_crypto::CryptoError;

/// Error types for threshold signing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThresholdError {
    /// A sharing, reconstruction or signing step failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// The quorum configuration or the presented share set is invalid.
    #[error("quorum error: {0}")]
    Quorum(String),
}

/// Convenience result type for threshold operations.
pub type Result<T> = std::result::Result<T, ThresholdError>;
