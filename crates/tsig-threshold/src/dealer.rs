//! Trusted-dealer share distribution.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};

use tsig_crypto::schnorr::{generate_keypair_with_rng, KeyPair};
use tsig_crypto::shamir::generate_shares_with_rng;
use tsig_crypto::{GroupParams, SecretScalar};
use tsig_types::{GroupElement, Share};

use crate::quorum::QuorumConfig;
use crate::Result;

/// Output of one dealing: one share per participant plus the group key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dealing {
    pub shares: Vec<Share>,
    pub public_key: GroupElement,
}

/// Splits secrets for a fixed quorum under fixed group parameters.
#[derive(Clone, Debug)]
pub struct Dealer {
    params: GroupParams,
    quorum: QuorumConfig,
}

impl Dealer {
    pub fn new(params: GroupParams, quorum: QuorumConfig) -> Self {
        Self { params, quorum }
    }

    pub fn params(&self) -> &GroupParams {
        &self.params
    }

    pub fn quorum(&self) -> &QuorumConfig {
        &self.quorum
    }

    /// Split a known secret.
    pub fn deal(&self, secret: &SecretScalar) -> Result<Dealing> {
        self.deal_with_rng(secret, &mut OsRng)
    }

    pub fn deal_with_rng<R: RngCore + CryptoRng + ?Sized>(
        &self,
        secret: &SecretScalar,
        rng: &mut R,
    ) -> Result<Dealing> {
        let keypair = KeyPair::from_secret(&self.params, SecretScalar::new(secret.expose().clone()))?;
        self.split(keypair, rng)
    }

    /// Generate a fresh keypair and split its private key.
    ///
    /// The private key is dropped once the shares exist; only the shares and
    /// the public key leave this call.
    pub fn deal_fresh(&self) -> Result<Dealing> {
        self.deal_fresh_with_rng(&mut OsRng)
    }

    pub fn deal_fresh_with_rng<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> Result<Dealing> {
        let keypair = generate_keypair_with_rng(&self.params, rng)?;
        self.split(keypair, rng)
    }

    fn split<R: RngCore + CryptoRng + ?Sized>(&self, keypair: KeyPair, rng: &mut R) -> Result<Dealing> {
        let (secret, public_key) = keypair.into_parts();
        let shares = generate_shares_with_rng(
            &self.params,
            &secret,
            self.quorum.total,
            self.quorum.threshold,
            rng,
        )?;

        tracing::info!(
            threshold = self.quorum.threshold,
            total = self.quorum.total,
            "dealt shares"
        );
        Ok(Dealing { shares, public_key })
    }
}
