//! Shamir secret sharing over the prime field of a [`GroupParams`].
//!
//! A dealer holding `secret` draws `t - 1` random coefficients in `[1, P-1]`
//! and hands participant `x` the point `(x, f(x))` where
//!
//! ```text
//! f(x) = secret + a1*x + ... + a_{t-1}*x^{t-1}  (mod P)
//! ```
//!
//! Any `t` points fix `f`, and `f(0)` is recovered by Lagrange interpolation.
//! There are no commitments to the shares: a participant cannot tell a
//! corrupted share from a valid one.

use std::collections::HashSet;
use std::fmt;

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};

use tsig_types::{Scalar, Share};

use crate::field::GroupParams;
use crate::secret::SecretScalar;
use crate::{CryptoError, Result};

/// A dealer's secret polynomial. `coefficients[0]` is the shared secret.
pub struct Polynomial {
    coefficients: Vec<BigUint>,
}

impl Polynomial {
    /// Random polynomial of the given degree with `f(0) = secret`.
    pub fn random<R: RngCore + CryptoRng + ?Sized>(
        params: &GroupParams,
        secret: &SecretScalar,
        degree: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(secret.expose().clone());
        for _ in 0..degree {
            coefficients.push(params.random_nonzero_element(rng)?);
        }
        Ok(Self { coefficients })
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    pub fn evaluate(&self, params: &GroupParams, x: &BigUint) -> BigUint {
        evaluate_polynomial(params, &self.coefficients, x)
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        for c in &mut self.coefficients {
            c.set_zero();
        }
    }
}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("degree", &self.degree())
            .finish_non_exhaustive()
    }
}

/// Horner evaluation of `c0 + c1*x + ... + cn*x^n mod P`.
pub fn evaluate_polynomial(params: &GroupParams, coefficients: &[BigUint], x: &BigUint) -> BigUint {
    coefficients
        .iter()
        .rev()
        .fold(BigUint::zero(), |acc, c| {
            params.add_mod(&params.mul_mod(&acc, x), c)
        })
}

/// Split `secret` into `n` shares with threshold `t`, using the OS random source.
pub fn generate_shares(
    params: &GroupParams,
    secret: &SecretScalar,
    n: usize,
    t: usize,
) -> Result<Vec<Share>> {
    generate_shares_with_rng(params, secret, n, t, &mut OsRng)
}

/// Split `secret` into `n` shares at `x = 1..=n` with threshold `t`.
///
/// # Errors
///
/// - [`CryptoError::Parameter`] unless `1 <= t <= n`, and `n` fits both a
///   `u32` coordinate and the field (`n < P`)
/// - [`CryptoError::Range`] unless `0 < secret < P`
/// - [`CryptoError::Randomness`] if coefficients cannot be drawn
pub fn generate_shares_with_rng<R: RngCore + CryptoRng + ?Sized>(
    params: &GroupParams,
    secret: &SecretScalar,
    n: usize,
    t: usize,
    rng: &mut R,
) -> Result<Vec<Share>> {
    let parameter = |reason| CryptoError::Parameter { n, t, reason };

    if t == 0 {
        return Err(parameter("threshold must be at least 1"));
    }
    if t > n {
        return Err(parameter("threshold exceeds share count"));
    }
    let count = u32::try_from(n).map_err(|_| parameter("share count exceeds u32 coordinates"))?;
    if &BigUint::from(count) >= params.p() {
        return Err(parameter("share count must be below the field modulus"));
    }
    params.check_group_element(secret.expose(), "secret")?;

    let polynomial = Polynomial::random(params, secret, t - 1, rng)?;
    let shares = (1..=count)
        .map(|x| {
            let y = polynomial.evaluate(params, &BigUint::from(x));
            Share::new(x, Scalar::new(y))
        })
        .collect();

    tracing::debug!(n, t, "generated shares");
    Ok(shares)
}

/// Recover `f(0)` from a set of shares.
///
/// Checks run in order: `require_t` against the share count, then an empty
/// list, then coordinates (each `x mod P` non-zero and distinct).
///
/// Any valid subset of at least the dealing threshold yields the same value.
/// A smaller subset yields an unrelated field element without any error.
///
/// # Errors
///
/// [`CryptoError::InsufficientShares`], [`CryptoError::EmptyInput`],
/// [`CryptoError::DuplicateOrZeroCoordinate`].
pub fn reconstruct_secret(
    params: &GroupParams,
    shares: &[Share],
    require_t: Option<usize>,
) -> Result<SecretScalar> {
    if let Some(required) = require_t {
        if shares.len() < required {
            return Err(CryptoError::InsufficientShares {
                required,
                available: shares.len(),
            });
        }
    }
    if shares.is_empty() {
        return Err(CryptoError::EmptyInput);
    }
    check_coordinates(params, shares)?;

    let coordinates: Vec<u32> = shares.iter().map(|s| s.x).collect();
    let mut acc = BigUint::zero();
    for share in shares {
        let lambda = lagrange_coefficient_at_zero(params, share.x, &coordinates)?;
        let term = params.mul_mod(share.y.as_biguint(), &lambda);
        acc = params.add_mod(&acc, &term);
    }

    tracing::debug!(shares = shares.len(), "reconstructed secret");
    Ok(SecretScalar::new(acc))
}

/// `L_i(0) = Π_{j≠i} (-x_j) / (x_i - x_j) mod P`.
///
/// `coordinates` is the full interpolation set and may include `x_i`; it
/// must not contain other values congruent to `x_i`.
///
/// # Errors
///
/// [`CryptoError::Division`] if a denominator vanishes mod `P`.
pub fn lagrange_coefficient_at_zero(
    params: &GroupParams,
    x_i: u32,
    coordinates: &[u32],
) -> Result<BigUint> {
    let xi = BigUint::from(x_i);
    let (numerator, denominator) = coordinates.iter().filter(|&&x_j| x_j != x_i).fold(
        (BigUint::one(), BigUint::one()),
        |(num, den), &x_j| {
            let xj = BigUint::from(x_j);
            (
                params.mul_mod(&num, &params.neg_mod(&xj)),
                params.mul_mod(&den, &params.sub_mod(&xi, &xj)),
            )
        },
    );
    Ok(params.mul_mod(&numerator, &params.modinv(&denominator)?))
}

fn check_coordinates(params: &GroupParams, shares: &[Share]) -> Result<()> {
    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        let reduced = BigUint::from(share.x) % params.p();
        if reduced.is_zero() || !seen.insert(reduced) {
            return Err(CryptoError::DuplicateOrZeroCoordinate { x: share.x });
        }
    }
    Ok(())
}
