//! Group parameters and arithmetic modulo `P`.
//!
//! Exponent arithmetic happens modulo the group order `P - 1`, element
//! arithmetic modulo `P`. The two moduli are easy to mix up, so both are
//! exposed as named accessors rather than recomputed at call sites.
//!
//! No side-channel hardening: `modpow` is `num-bigint`'s variable-time
//! implementation.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use tsig_types::integer::parse_integer;
use tsig_types::WORD_BYTES;

use crate::{CryptoError, Result};

/// Offset of the standard modulus below 2^256: `P = 2^256 - 36113`.
pub const STANDARD_P_OFFSET: u32 = 36_113;

/// Standard generator.
pub const STANDARD_G: u32 = 5;

/// Rejection-sampling attempts before giving up on the random source.
pub const MAX_SAMPLING_ATTEMPTS: usize = 128;

/// Field modulus `P` and generator `G`.
///
/// Deserialises from `{ p = "...", g = "..." }` with decimal or `0x` hex
/// strings; deserialisation runs the same validation as [`GroupParams::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGroupParams", into = "RawGroupParams")]
pub struct GroupParams {
    p: BigUint,
    g: BigUint,
    order: BigUint,
}

#[derive(Serialize, Deserialize)]
struct RawGroupParams {
    p: String,
    g: String,
}

impl TryFrom<RawGroupParams> for GroupParams {
    type Error = CryptoError;

    fn try_from(raw: RawGroupParams) -> Result<Self> {
        let p = parse_integer(&raw.p).map_err(|e| CryptoError::InvalidParams(e.to_string()))?;
        let g = parse_integer(&raw.g).map_err(|e| CryptoError::InvalidParams(e.to_string()))?;
        Self::new(p, g)
    }
}

impl From<GroupParams> for RawGroupParams {
    fn from(params: GroupParams) -> Self {
        Self {
            p: format!("{:#x}", params.p),
            g: params.g.to_string(),
        }
    }
}

impl Default for GroupParams {
    fn default() -> Self {
        Self::standard()
    }
}

impl GroupParams {
    /// Validate and build a parameter set.
    ///
    /// Checks that `P > 3`, that `P` fits in 256 bits (group elements are
    /// encoded as 32 bytes in the challenge), that `1 < G < P`, and that
    /// `G^(P-1) ≡ 1 (mod P)`. The last check is a Fermat test with base `G`;
    /// it rejects most composite moduli but is not a primality proof.
    pub fn new(p: BigUint, g: BigUint) -> Result<Self> {
        if p <= BigUint::from(3u8) {
            return Err(CryptoError::InvalidParams(
                "modulus must exceed 3".to_string(),
            ));
        }
        if p.bits() > (WORD_BYTES as u64) * 8 {
            return Err(CryptoError::InvalidParams(format!(
                "modulus has {} bits, at most 256 allowed",
                p.bits()
            )));
        }
        if g <= BigUint::one() || g >= p {
            return Err(CryptoError::InvalidParams(
                "generator must satisfy 1 < g < p".to_string(),
            ));
        }
        let order = &p - 1u8;
        if !g.modpow(&order, &p).is_one() {
            return Err(CryptoError::InvalidParams(
                "modulus fails the Fermat test for the generator".to_string(),
            ));
        }
        Ok(Self { p, g, order })
    }

    /// The workspace-wide parameters: `P = 2^256 - 36113`, `G = 5`.
    ///
    /// `P` is a safe prime (`(P-1)/2` is prime) and 5 is a quadratic
    /// non-residue mod `P`, so `G` generates the full group of order `P - 1`.
    pub fn standard() -> Self {
        let p = (BigUint::one() << 256u32) - STANDARD_P_OFFSET;
        let order = &p - 1u8;
        Self {
            p,
            g: BigUint::from(STANDARD_G),
            order,
        }
    }

    /// The field modulus `P`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The generator `G`.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// The exponent group order `P - 1`.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// `base^exponent mod P`.
    pub fn modpow(&self, base: &BigUint, exponent: &BigUint) -> BigUint {
        base.modpow(exponent, &self.p)
    }

    /// `G^exponent mod P`.
    pub fn pow_g(&self, exponent: &BigUint) -> BigUint {
        self.g.modpow(exponent, &self.p)
    }

    /// `x^(P-2) mod P`, the inverse of `x` when `P` is prime.
    ///
    /// # Errors
    ///
    /// [`CryptoError::Division`] if `x ≡ 0 (mod P)`.
    pub fn modinv(&self, x: &BigUint) -> Result<BigUint> {
        let reduced = x % &self.p;
        if reduced.is_zero() {
            return Err(CryptoError::Division);
        }
        Ok(reduced.modpow(&(&self.p - 2u8), &self.p))
    }

    pub fn mul_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    pub fn add_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.p
    }

    /// `(a - b) mod P` for arbitrary non-negative `a`, `b`.
    pub fn sub_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a % &self.p + &self.p - b % &self.p) % &self.p
    }

    /// `-a mod P`.
    pub fn neg_mod(&self, a: &BigUint) -> BigUint {
        self.sub_mod(&BigUint::zero(), a)
    }

    /// `0 < v < P`: valid public key, commitment `r`, or private key.
    pub fn is_group_element(&self, v: &BigUint) -> bool {
        !v.is_zero() && v < &self.p
    }

    /// `0 < s < P - 1`: valid signature scalar.
    pub fn is_signature_scalar(&self, s: &BigUint) -> bool {
        !s.is_zero() && s < &self.order
    }

    pub fn check_group_element(&self, v: &BigUint, what: &'static str) -> Result<()> {
        if self.is_group_element(v) {
            Ok(())
        } else {
            Err(CryptoError::Range {
                what,
                bound: "0 < v < P",
            })
        }
    }

    pub fn check_private_key(&self, v: &BigUint) -> Result<()> {
        self.check_group_element(v, "private key")
    }

    /// Uniform sample from `[1, P - 2]`: private keys and nonces.
    pub fn random_exponent<R: RngCore + CryptoRng + ?Sized>(&self, rng: &mut R) -> Result<BigUint> {
        random_in_range(rng, &BigUint::one(), &self.order)
    }

    /// Uniform sample from `[1, P - 1]`: polynomial coefficients.
    pub fn random_nonzero_element<R: RngCore + CryptoRng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<BigUint> {
        random_in_range(rng, &BigUint::one(), &self.p)
    }
}

/// Uniform sample from `[low, high)` by rejection sampling.
///
/// # Errors
///
/// [`CryptoError::Randomness`] if the source fails, or if
/// [`MAX_SAMPLING_ATTEMPTS`] consecutive draws all land outside the range.
pub fn random_in_range<R: RngCore + CryptoRng + ?Sized>(
    rng: &mut R,
    low: &BigUint,
    high: &BigUint,
) -> Result<BigUint> {
    if high <= low {
        return Err(CryptoError::Randomness("empty sampling range".to_string()));
    }
    let span = high - low;
    let bits = span.bits();
    let byte_len = bits.div_ceil(8) as usize;
    let excess_bits = (byte_len as u64) * 8 - bits;
    let mut buf = Zeroizing::new(vec![0u8; byte_len]);

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        rng.try_fill_bytes(&mut buf)
            .map_err(|e| CryptoError::Randomness(e.to_string()))?;
        if let Some(first) = buf.first_mut() {
            *first &= 0xff >> excess_bits;
        }
        let candidate = BigUint::from_bytes_be(&buf);
        if candidate < span {
            return Ok(candidate + low);
        }
    }

    Err(CryptoError::Randomness(format!(
        "no in-range sample after {MAX_SAMPLING_ATTEMPTS} attempts"
    )))
}
