//! Schnorr signatures in the multiplicative group mod `P`.
//!
//! ```text
//! keygen:  priv ∈ [1, P-2],  pub = G^priv mod P
//! sign:    r = G^k mod P,  h = keccak256(r || keccak256(m)) mod P,
//!          s = (k + h * priv) mod (P - 1)
//! verify:  G^s ≡ r * pub^h (mod P)
//! ```
//!
//! Reusing `k` for two different messages under one key reveals the key.
//! Nothing here tracks nonce usage across calls; use [`NonceMode::Random`]
//! for anything that leaves a test.

use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};

use tsig_types::{GroupElement, MessageDigest, Scalar, Signature};

use crate::field::GroupParams;
use crate::keccak::{challenge_from_digest, message_digest};
use crate::secret::SecretScalar;
use crate::Result;

/// How the per-signature nonce `k` is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NonceMode {
    /// `k` drawn uniformly from `[1, P-2]` by a CSPRNG.
    #[default]
    Random,
    /// `k = (keccak256(priv || digest) mod (P-2)) + 1`.
    ///
    /// Reproducible, but not RFC 6979: the nonce is a bare hash of the key
    /// and digest. Only compiled with the `deterministic-nonce` feature or
    /// in tests.
    #[cfg(any(test, feature = "deterministic-nonce"))]
    Deterministic,
}

/// A private scalar and its public key.
#[derive(Debug)]
pub struct KeyPair {
    secret: SecretScalar,
    public: GroupElement,
}

impl KeyPair {
    /// Derive the public key for a known private scalar.
    ///
    /// # Errors
    ///
    /// [`CryptoError::Range`] unless `0 < secret < P`.
    pub fn from_secret(params: &GroupParams, secret: SecretScalar) -> Result<Self> {
        params.check_private_key(secret.expose())?;
        let public = GroupElement::new(params.pow_g(secret.expose()));
        Ok(Self { secret, public })
    }

    pub fn secret(&self) -> &SecretScalar {
        &self.secret
    }

    pub fn public(&self) -> &GroupElement {
        &self.public
    }

    /// Split into parts, e.g. to hand the secret to a dealer.
    pub fn into_parts(self) -> (SecretScalar, GroupElement) {
        (self.secret, self.public)
    }
}

/// Generate a keypair from the OS random source.
pub fn generate_keypair(params: &GroupParams) -> Result<KeyPair> {
    generate_keypair_with_rng(params, &mut OsRng)
}

/// Generate a keypair from a caller-supplied CSPRNG.
///
/// # Errors
///
/// [`CryptoError::Randomness`] if the source fails.
pub fn generate_keypair_with_rng<R: RngCore + CryptoRng + ?Sized>(
    params: &GroupParams,
    rng: &mut R,
) -> Result<KeyPair> {
    let secret = SecretScalar::new(params.random_exponent(rng)?);
    KeyPair::from_secret(params, secret)
}

/// Sign `message`, drawing random nonces from the OS.
pub fn sign(
    params: &GroupParams,
    secret: &SecretScalar,
    message: impl AsRef<[u8]>,
    mode: NonceMode,
) -> Result<Signature> {
    sign_with_rng(params, secret, message, mode, &mut OsRng)
}

/// Sign `message` with a caller-supplied CSPRNG for the nonce.
///
/// The RNG is untouched in deterministic mode.
///
/// # Errors
///
/// - [`CryptoError::Range`] unless `0 < secret < P`
/// - [`CryptoError::Randomness`] if the nonce cannot be drawn
pub fn sign_with_rng<R: RngCore + CryptoRng + ?Sized>(
    params: &GroupParams,
    secret: &SecretScalar,
    message: impl AsRef<[u8]>,
    mode: NonceMode,
    rng: &mut R,
) -> Result<Signature> {
    params.check_private_key(secret.expose())?;
    let digest = message_digest(message);

    let k = match mode {
        NonceMode::Random => SecretScalar::new(params.random_exponent(rng)?),
        #[cfg(any(test, feature = "deterministic-nonce"))]
        NonceMode::Deterministic => {
            tracing::warn!("signing with a deterministic nonce");
            deterministic_nonce(params, secret, &digest)?
        }
    };

    let r = GroupElement::new(params.pow_g(k.expose()));
    let h = challenge_from_digest(params, &r, &digest)?;
    let s = (k.expose() + h.as_biguint() * secret.expose()) % params.order();

    Ok(Signature::new(r, Scalar::new(s)))
}

/// Verify a signature over `message`.
///
/// Total over its inputs: out-of-range `pub`, `r` or `s` yield `false`.
pub fn verify(
    params: &GroupParams,
    public: &GroupElement,
    message: impl AsRef<[u8]>,
    signature: &Signature,
) -> bool {
    verify_digest(params, public, &message_digest(message), signature)
}

/// Verify against a precomputed message digest.
pub fn verify_digest(
    params: &GroupParams,
    public: &GroupElement,
    digest: &MessageDigest,
    signature: &Signature,
) -> bool {
    if !params.is_group_element(public.as_biguint()) {
        tracing::debug!("verify: public key out of range");
        return false;
    }
    if !params.is_group_element(signature.r.as_biguint()) {
        tracing::debug!("verify: r out of range");
        return false;
    }
    if !params.is_signature_scalar(signature.s.as_biguint()) {
        tracing::debug!("verify: s out of range");
        return false;
    }

    let Ok(h) = challenge_from_digest(params, &signature.r, digest) else {
        return false;
    };

    let left = params.pow_g(signature.s.as_biguint());
    let right = params.mul_mod(
        signature.r.as_biguint(),
        &params.modpow(public.as_biguint(), h.as_biguint()),
    );
    left == right
}

#[cfg(any(test, feature = "deterministic-nonce"))]
fn deterministic_nonce(
    params: &GroupParams,
    secret: &SecretScalar,
    digest: &MessageDigest,
) -> Result<SecretScalar> {
    use crate::keccak::keccak256_concat;
    use crate::CryptoError;
    use num_bigint::BigUint;

    let key_bytes = secret.to_be_bytes32().ok_or(CryptoError::Range {
        what: "private key",
        bound: "priv < 2^256",
    })?;
    let seed = zeroize::Zeroizing::new(keccak256_concat(&[&key_bytes[..], digest.as_bytes()]));
    let modulus = params.p() - 2u8;
    let k = BigUint::from_bytes_be(&seed[..]) % modulus + 1u8;
    Ok(SecretScalar::new(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::test_rng::FailingRng;
    use crate::CryptoError;
    use num_bigint::BigUint;
    use num_traits::{One, Zero};

    const MSG: &str = "Authorize multisig action";

    fn small() -> GroupParams {
        GroupParams::new(BigUint::from(1019u32), BigUint::from(2u32)).expect("small params")
    }

    #[test]
    fn test_keypair_in_range() {
        let params = GroupParams::standard();
        let kp = generate_keypair(&params).expect("keypair");
        assert!(params.is_group_element(kp.secret().expose()));
        assert!(kp.secret().expose() < params.order());
        assert_eq!(kp.public().as_biguint(), &params.pow_g(kp.secret().expose()));
    }

    #[test]
    fn test_keypair_rng_failure() {
        let params = GroupParams::standard();
        assert!(matches!(
            generate_keypair_with_rng(&params, &mut FailingRng),
            Err(CryptoError::Randomness(_))
        ));
    }

    #[test]
    fn test_roundtrip_random() {
        let params = GroupParams::standard();
        let kp = generate_keypair(&params).expect("keypair");
        let sig = sign(&params, kp.secret(), "hello", NonceMode::Random).expect("sign");
        assert!(verify(&params, kp.public(), "hello", &sig));
    }

    #[test]
    fn test_deterministic_known_answer() {
        let params = GroupParams::standard();
        let kp = KeyPair::from_secret(&params, SecretScalar::from_u64(123_456_789)).expect("kp");
        assert_eq!(
            kp.public().to_string(),
            "49397004950451351918447875711230945766824647812479211449561017345771555428784"
        );

        let sig = sign(&params, kp.secret(), MSG, NonceMode::Deterministic).expect("sign");
        assert_eq!(
            sig.r.to_string(),
            "12324054177510628669524051695672523924808128168992135656784613648847424047326"
        );
        assert_eq!(
            sig.s.to_string(),
            "64569538363897786321863778931864608086522766003283168270270805974196264431637"
        );
        assert!(verify(&params, kp.public(), MSG, &sig));
    }

    #[test]
    fn test_deterministic_repeatable_and_rng_free() {
        let params = GroupParams::standard();
        let kp = generate_keypair(&params).expect("keypair");
        let a = sign(&params, kp.secret(), "repeatable", NonceMode::Deterministic).expect("a");
        let b = sign_with_rng(
            &params,
            kp.secret(),
            "repeatable",
            NonceMode::Deterministic,
            &mut FailingRng,
        )
        .expect("b");
        assert_eq!(a, b);
        assert!(verify(&params, kp.public(), "repeatable", &a));
    }

    #[test]
    fn test_random_signatures_differ() {
        let params = GroupParams::standard();
        let kp = generate_keypair(&params).expect("keypair");
        let a = sign(&params, kp.secret(), "random", NonceMode::Random).expect("a");
        let b = sign(&params, kp.secret(), "random", NonceMode::Random).expect("b");
        assert_ne!(a, b);
        assert!(verify(&params, kp.public(), "random", &a));
        assert!(verify(&params, kp.public(), "random", &b));
    }

    #[test]
    fn test_random_mode_propagates_rng_failure() {
        let params = GroupParams::standard();
        let kp = generate_keypair(&params).expect("keypair");
        let result = sign_with_rng(&params, kp.secret(), "m", NonceMode::Random, &mut FailingRng);
        assert!(matches!(result, Err(CryptoError::Randomness(_))));
    }

    #[test]
    fn test_tampering_detected() {
        let params = GroupParams::standard();
        let kp = generate_keypair(&params).expect("keypair");
        let other = generate_keypair(&params).expect("other");
        let sig = sign(&params, kp.secret(), "A", NonceMode::Deterministic).expect("sign");

        assert!(!verify(&params, kp.public(), "B", &sig));
        assert!(!verify(&params, other.public(), "A", &sig));

        let bumped_r = Signature::new(
            GroupElement::new(params.mul_mod(sig.r.as_biguint(), params.g())),
            sig.s.clone(),
        );
        assert!(!verify(&params, kp.public(), "A", &bumped_r));

        let bumped_s = Signature::new(
            sig.r.clone(),
            Scalar::new((sig.s.as_biguint() + 1u8) % params.order()),
        );
        assert!(!verify(&params, kp.public(), "A", &bumped_s));
    }

    #[test]
    fn test_out_of_range_inputs_return_false() {
        let params = GroupParams::standard();
        let kp = generate_keypair(&params).expect("keypair");
        let sig = sign(&params, kp.secret(), "msg", NonceMode::Deterministic).expect("sign");
        let p = params.p().clone();

        let zero_r = Signature::new(GroupElement::from_u64(0), sig.s.clone());
        assert!(!verify(&params, kp.public(), "msg", &zero_r));

        let zero_s = Signature::new(sig.r.clone(), Scalar::from_u64(0));
        assert!(!verify(&params, kp.public(), "msg", &zero_s));

        let order_s = Signature::new(sig.r.clone(), Scalar::new(&p - 1u8));
        assert!(!verify(&params, kp.public(), "msg", &order_s));

        let p_r = Signature::new(GroupElement::new(p.clone()), sig.s.clone());
        assert!(!verify(&params, kp.public(), "msg", &p_r));

        assert!(!verify(&params, &GroupElement::new(p), "msg", &sig));
        assert!(!verify(&params, &GroupElement::from_u64(0), "msg", &sig));
    }

    #[test]
    fn test_sign_rejects_out_of_range_key() {
        let params = GroupParams::standard();
        for bad in [BigUint::zero(), params.p().clone()] {
            let result = sign(&params, &SecretScalar::new(bad), "m", NonceMode::Random);
            assert!(matches!(result, Err(CryptoError::Range { .. })));
        }
    }

    #[test]
    fn test_independent_parameter_sets() {
        let small = small();
        let kp = KeyPair::from_secret(&small, SecretScalar::from_u64(77)).expect("kp");
        assert_eq!(kp.public(), &GroupElement::from_u64(553));

        let sig = sign(&small, kp.secret(), "small group", NonceMode::Deterministic).expect("sign");
        assert_eq!(sig.r, GroupElement::from_u64(1002));
        assert_eq!(sig.s, Scalar::from_u64(515));
        assert!(verify(&small, kp.public(), "small group", &sig));

        // The same numbers mean nothing under the standard parameters.
        assert!(!verify(&GroupParams::standard(), kp.public(), "small group", &sig));
    }

    #[test]
    fn test_verify_digest_matches_message_path() {
        let params = GroupParams::standard();
        let kp = generate_keypair(&params).expect("keypair");
        let sig = sign(&params, kp.secret(), MSG, NonceMode::Random).expect("sign");
        let digest = message_digest(MSG);
        assert!(verify_digest(&params, kp.public(), &digest, &sig));
    }

    #[test]
    fn test_deterministic_nonce_never_zero() {
        let params = small();
        for secret in 1u64..50 {
            let secret = SecretScalar::from_u64(secret);
            let k = deterministic_nonce(&params, &secret, &message_digest("k")).expect("k");
            assert!(!k.expose().is_zero());
            assert!(k.expose() <= &(params.p() - 2u8));
            assert!(!params.pow_g(k.expose()).is_one());
        }
    }
}
