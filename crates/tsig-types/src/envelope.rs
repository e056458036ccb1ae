//! `TSIGv1` message envelope.
//!
//! A bare memo signed once is valid forever and on every chain. Wrapping it
//! binds the signature to a chain, a verifier contract, a random nonce and an
//! expiry:
//!
//! ```text
//! TSIGv1|chain=<id>|verifier=<address>|memo=<memo>|nonce=<16 hex>|exp=<unix secs>
//! ```
//!
//! The memo may itself contain `|`; parsing anchors the fixed fields from both
//! ends.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{Result, TypesError};

/// Prefix identifying an already-wrapped message.
pub const ENVELOPE_PREFIX: &str = "TSIGv1|";

/// Default validity window for a wrapped message (15 minutes).
pub const DEFAULT_TTL_SECS: u64 = 15 * 60;

/// Placeholder verifier address when none is configured.
pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Random bytes in the envelope nonce.
const NONCE_BYTES: usize = 8;

/// Parsed fields of a `TSIGv1` envelope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigningContext {
    pub chain_id: u64,
    pub verifier: String,
    pub memo: String,
    /// Hex-encoded random nonce.
    pub nonce: String,
    /// Unix timestamp (seconds) after which the message is stale.
    pub expires_at: u64,
}

impl SigningContext {
    /// Create a context with a fresh random nonce.
    ///
    /// # Arguments
    ///
    /// * `chain_id` - Target chain identifier
    /// * `verifier` - Verifier contract address
    /// * `memo` - The human-readable payload
    /// * `now` - Current Unix timestamp in seconds
    /// * `ttl_secs` - Validity window
    pub fn new(
        chain_id: u64,
        verifier: impl Into<String>,
        memo: impl Into<String>,
        now: u64,
        ttl_secs: u64,
    ) -> Self {
        let mut nonce = [0u8; NONCE_BYTES];
        OsRng.fill_bytes(&mut nonce);
        Self {
            chain_id,
            verifier: verifier.into(),
            memo: memo.into(),
            nonce: hex::encode(nonce),
            expires_at: now.saturating_add(ttl_secs),
        }
    }

    /// Render the envelope as the message text to sign.
    pub fn to_message(&self) -> String {
        format!(
            "{ENVELOPE_PREFIX}chain={}|verifier={}|memo={}|nonce={}|exp={}",
            self.chain_id, self.verifier, self.memo, self.nonce, self.expires_at
        )
    }

    /// Parse a rendered envelope.
    pub fn parse(message: &str) -> Result<Self> {
        let body = message
            .strip_prefix(ENVELOPE_PREFIX)
            .ok_or_else(|| TypesError::InvalidEnvelope("missing TSIGv1 prefix".to_string()))?;

        let mut tail = body.rsplitn(3, '|');
        let exp = field(tail.next(), "exp")?;
        let nonce = field(tail.next(), "nonce")?;
        let head = tail
            .next()
            .ok_or_else(|| TypesError::InvalidEnvelope("truncated envelope".to_string()))?;

        let mut front = head.splitn(3, '|');
        let chain = field(front.next(), "chain")?;
        let verifier = field(front.next(), "verifier")?;
        let memo = field(front.next(), "memo")?;

        Ok(Self {
            chain_id: chain
                .parse()
                .map_err(|_| TypesError::InvalidEnvelope(format!("bad chain id {chain:?}")))?,
            verifier: verifier.to_string(),
            memo: memo.to_string(),
            nonce: nonce.to_string(),
            expires_at: exp
                .parse()
                .map_err(|_| TypesError::InvalidEnvelope(format!("bad expiry {exp:?}")))?,
        })
    }

    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

/// Wrap `message` in a fresh envelope unless it already is one.
pub fn wrap_message(message: &str, chain_id: u64, verifier: &str, now: u64, ttl_secs: u64) -> String {
    if is_wrapped(message) {
        return message.to_string();
    }
    SigningContext::new(chain_id, verifier, message, now, ttl_secs).to_message()
}

pub fn is_wrapped(message: &str) -> bool {
    message.starts_with(ENVELOPE_PREFIX)
}

fn field<'a>(part: Option<&'a str>, key: &str) -> Result<&'a str> {
    part.and_then(|p| p.strip_prefix(key))
        .and_then(|p| p.strip_prefix('='))
        .ok_or_else(|| TypesError::InvalidEnvelope(format!("missing field {key}")))
}
