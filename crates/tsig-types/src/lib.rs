//! # tsig-types
//!
//! Plain data shared across the tsig workspace.
//!
//! Every integer that crosses a crate boundary carries its semantic role in
//! its type: a [`Scalar`] is never accepted where a [`GroupElement`] or a
//! [`Challenge`] is expected, even though all three wrap the same
//! arbitrary-precision integer. Range checks are not performed here; valid
//! ranges depend on the group parameters held by `tsig-crypto`.
//!
//! ## Modules
//!
//! - [`integer`] — `Scalar`, `GroupElement`, `Challenge` newtypes
//! - [`digest`] — the fixed 32-byte `MessageDigest`
//! - [`share`] — Shamir `Share` and Schnorr `Signature` records
//! - [`artifact`] — the persisted signature record consumed by verifier tooling
//! - [`envelope`] — `TSIGv1` replay-protection message envelope

pub mod artifact;
pub mod digest;
pub mod envelope;
pub mod integer;
pub mod share;

pub use artifact::SignatureArtifact;
pub use digest::MessageDigest;
pub use envelope::SigningContext;
pub use integer::{Challenge, GroupElement, Scalar};
pub use share::{Share, Signature};

/// Width in bytes of every fixed-size integer encoding (uint256).
pub const WORD_BYTES: usize = 32;

/// Error types for parsing and encoding shared data.
#[derive(Debug, thiserror::Error)]
pub enum TypesError {
    /// An integer string was neither decimal nor `0x`-prefixed hex.
    #[error("invalid integer: {0:?}")]
    InvalidInteger(String),

    /// A hex string could not be decoded.
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// A digest did not decode to exactly 32 bytes.
    #[error("digest must be {expected} bytes, got {actual}")]
    InvalidDigestLength {
        /// Required length.
        expected: usize,
        /// Decoded length.
        actual: usize,
    },

    /// A message did not follow the `TSIGv1` envelope layout.
    #[error("invalid signing envelope: {0}")]
    InvalidEnvelope(String),

    /// JSON encoding or decoding failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for shared data operations.
pub type Result<T> = std::result::Result<T, TypesError>;
