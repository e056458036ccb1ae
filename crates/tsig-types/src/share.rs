//! Share and signature records.

use serde::{Deserialize, Serialize};

use crate::{GroupElement, Scalar};

/// One point `(x, f(x))` on a dealer's secret polynomial.
///
/// `x` is the participant index, starting at 1. A valid set of shares has
/// pairwise distinct, non-zero `x` values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    pub x: u32,
    pub y: Scalar,
}

impl Share {
    pub fn new(x: u32, y: Scalar) -> Self {
        Self { x, y }
    }
}

/// A Schnorr signature `(r, s)` with `r = G^k mod P` and
/// `s = k + h * priv mod (P - 1)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub r: GroupElement,
    pub s: Scalar,
}

impl Signature {
    pub fn new(r: GroupElement, s: Scalar) -> Self {
        Self { r, s }
    }
}
