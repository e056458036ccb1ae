//! Threshold signing from a quorum of shares.
//!
//! The reconstructed private key is held in a [`SecretScalar`] local to
//! [`ThresholdSigner::threshold_sign_with_rng`]. It is never returned, logged
//! or stored, and is released when that call returns.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use tsig_crypto::keccak::message_digest;
use tsig_crypto::schnorr::{self, NonceMode};
use tsig_crypto::shamir::reconstruct_secret;
use tsig_crypto::{GroupParams, SecretScalar};
use tsig_types::{GroupElement, MessageDigest, Share, Signature, SignatureArtifact};

use crate::quorum::QuorumConfig;
use crate::Result;

/// A signature plus the digest the verifier checks it against.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThresholdSignature {
    pub signature: Signature,
    pub digest: MessageDigest,
}

/// Signs on behalf of a shared key.
#[derive(Clone, Debug, Default)]
pub struct ThresholdSigner {
    params: GroupParams,
}

impl ThresholdSigner {
    pub fn new(params: GroupParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GroupParams {
        &self.params
    }

    /// Reconstruct the key from `shares` and sign `message`.
    ///
    /// `require_t` is checked against the share count before interpolation.
    pub fn threshold_sign(
        &self,
        shares: &[Share],
        message: impl AsRef<[u8]>,
        mode: NonceMode,
        require_t: Option<usize>,
    ) -> Result<ThresholdSignature> {
        self.threshold_sign_with_rng(shares, message, mode, require_t, &mut OsRng)
    }

    /// As [`threshold_sign`](Self::threshold_sign), drawing the nonce from `rng`.
    ///
    /// # Errors
    ///
    /// - `InsufficientShares`, `EmptyInput` or `DuplicateOrZeroCoordinate`
    ///   from reconstruction
    /// - `Range` if the interpolated key is `0` (a share set from different
    ///   dealings, or below threshold, can land there)
    /// - `Randomness` if the nonce cannot be drawn
    pub fn threshold_sign_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        shares: &[Share],
        message: impl AsRef<[u8]>,
        mode: NonceMode,
        require_t: Option<usize>,
        rng: &mut R,
    ) -> Result<ThresholdSignature> {
        let message = message.as_ref();
        let secret = reconstruct_secret(&self.params, shares, require_t)?;
        self.params.check_private_key(secret.expose())?;

        let signature = schnorr::sign_with_rng(&self.params, &secret, message, mode, rng)?;
        drop(secret);

        tracing::info!(shares = shares.len(), "threshold signature produced");
        Ok(ThresholdSignature {
            signature,
            digest: message_digest(message),
        })
    }

    /// Check `shares` against `quorum`, then sign with its threshold enforced.
    pub fn sign_for_quorum(
        &self,
        quorum: &QuorumConfig,
        shares: &[Share],
        message: impl AsRef<[u8]>,
        mode: NonceMode,
    ) -> Result<ThresholdSignature> {
        quorum.check_shares(shares)?;
        self.threshold_sign(shares, message, mode, Some(quorum.threshold))
    }

    pub fn pubkey_from_secret(&self, secret: &SecretScalar) -> Result<GroupElement> {
        pubkey_from_secret(&self.params, secret)
    }

    pub fn verify(
        &self,
        public_key: &GroupElement,
        message: impl AsRef<[u8]>,
        signature: &ThresholdSignature,
    ) -> bool {
        let message = message.as_ref();
        message_digest(message) == signature.digest
            && schnorr::verify(&self.params, public_key, message, &signature.signature)
    }

    /// Package a signature for an external verifier.
    pub fn artifact(
        &self,
        message: impl Into<String>,
        public_key: GroupElement,
        signature: ThresholdSignature,
    ) -> SignatureArtifact {
        SignatureArtifact::new(message, public_key, signature.signature, signature.digest)
    }
}

/// `G^secret mod P`, with the key-generation range check `0 < secret < P`.
pub fn pubkey_from_secret(params: &GroupParams, secret: &SecretScalar) -> Result<GroupElement> {
    params.check_private_key(secret.expose())?;
    Ok(GroupElement::new(params.pow_g(secret.expose())))
}
