//! `t`-of-`n` quorum configuration.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use tsig_types::Share;

use crate::{Result, ThresholdError};

/// Threshold and participant count for one dealing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuorumConfig {
    /// Signing threshold (t in t-of-n).
    pub threshold: usize,
    /// Number of participants, indexed `1..=total`.
    pub total: usize,
}

impl QuorumConfig {
    /// Create a validated configuration.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Minimum shares required to sign
    /// * `total` - Number of shares dealt
    pub fn new(threshold: usize, total: usize) -> Result<Self> {
        if threshold == 0 || threshold > total {
            return Err(ThresholdError::Quorum(format!(
                "invalid threshold {threshold} for {total} participants"
            )));
        }
        if u32::try_from(total).is_err() {
            return Err(ThresholdError::Quorum(format!(
                "{total} participants exceed the u32 index space"
            )));
        }
        Ok(Self { threshold, total })
    }

    pub fn has_quorum(&self, count: usize) -> bool {
        count >= self.threshold
    }

    /// Check that `shares` come from distinct known participants and reach
    /// the threshold.
    pub fn check_shares(&self, shares: &[Share]) -> Result<()> {
        let mut seen = HashSet::with_capacity(shares.len());
        for share in shares {
            if share.x == 0 || share.x as usize > self.total {
                return Err(ThresholdError::Quorum(format!(
                    "share index {} outside 1..={}",
                    share.x, self.total
                )));
            }
            if !seen.insert(share.x) {
                return Err(ThresholdError::Quorum(format!(
                    "duplicate share index {}",
                    share.x
                )));
            }
        }
        if !self.has_quorum(shares.len()) {
            return Err(ThresholdError::Quorum(format!(
                "{} shares below threshold {}",
                shares.len(),
                self.threshold
            )));
        }
        Ok(())
    }
}
