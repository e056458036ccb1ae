//! Integration test: signed artifact handed to an external verifier.
//!
//! 1. Wrap a memo in a `TSIGv1` envelope bound to a chain and contract
//! 2. Threshold-sign the wrapped message
//! 3. Persist the artifact as JSON and read it back
//! 4. Verify from the artifact alone, the way a contract does: recompute the
//!    challenge from `(r, msg_hash)` without the message text
//! 5. Tamper with stored fields and confirm rejection

use tsig_crypto::keccak::{challenge_from_digest, message_digest};
use tsig_crypto::schnorr::{self, NonceMode};
use tsig_crypto::GroupParams;
use tsig_threshold::{Dealer, QuorumConfig, ThresholdSigner};
use tsig_types::envelope::{self, DEFAULT_TTL_SECS, ZERO_ADDRESS};
use tsig_types::{GroupElement, MessageDigest, Scalar, SignatureArtifact, SigningContext};

const NOW: u64 = 1_700_000_000;
const CHAIN_ID: u64 = 11_155_111;

fn signed_artifact() -> (GroupParams, SignatureArtifact) {
    let params = GroupParams::standard();
    let quorum = QuorumConfig::new(2, 3).expect("quorum");
    let dealing = Dealer::new(params.clone(), quorum).deal_fresh().expect("deal");

    let message = envelope::wrap_message(
        "pay 5 to treasury",
        CHAIN_ID,
        ZERO_ADDRESS,
        NOW,
        DEFAULT_TTL_SECS,
    );
    let signer = ThresholdSigner::new(params.clone());
    let sig = signer
        .sign_for_quorum(&quorum, &dealing.shares[1..], &message, NonceMode::Random)
        .expect("sign");

    let artifact = signer
        .artifact(message, dealing.public_key, sig)
        .with_chain(CHAIN_ID, ZERO_ADDRESS);
    (params, artifact)
}

/// What an on-chain verifier sees: four integers, no message text.
fn contract_verify(
    params: &GroupParams,
    public: &GroupElement,
    r: &GroupElement,
    s: &Scalar,
    digest: &MessageDigest,
) -> bool {
    let Ok(h) = challenge_from_digest(params, r, digest) else {
        return false;
    };
    params.is_group_element(public.as_biguint())
        && params.is_signature_scalar(s.as_biguint())
        && params.pow_g(s.as_biguint())
            == params.mul_mod(r.as_biguint(), &params.modpow(public.as_biguint(), h.as_biguint()))
}

#[test]
fn artifact_round_trip_and_contract_verification() {
    let (params, artifact) = signed_artifact();

    let json = artifact.to_json_pretty().expect("encode");
    let stored = SignatureArtifact::from_json(&json).expect("decode");
    assert_eq!(stored, artifact);
    assert_eq!(stored.chain_id, Some(CHAIN_ID));

    assert_eq!(message_digest(&stored.message), stored.msg_hash);

    let (public, r, s, digest) = stored.verifier_inputs();
    assert!(contract_verify(&params, public, r, s, digest));
    assert!(schnorr::verify_digest(&params, public, digest, &stored.signature()));
    assert!(schnorr::verify(&params, public, &stored.message, &stored.signature()));
}

#[test]
fn envelope_binds_chain_and_expiry() {
    let (_, artifact) = signed_artifact();

    let context = SigningContext::parse(&artifact.message).expect("envelope");
    assert_eq!(context.chain_id, CHAIN_ID);
    assert_eq!(context.verifier, ZERO_ADDRESS);
    assert_eq!(context.memo, "pay 5 to treasury");
    assert!(!context.is_expired(NOW + DEFAULT_TTL_SECS - 1));
    assert!(context.is_expired(NOW + DEFAULT_TTL_SECS));

    // Re-wrapping an envelope leaves it, and so its digest, untouched.
    let rewrapped = envelope::wrap_message(&artifact.message, 1, "0xdead", NOW, 60);
    assert_eq!(message_digest(&rewrapped), artifact.msg_hash);
}

#[test]
fn hex_encoded_integers_accepted() {
    let (params, artifact) = signed_artifact();
    let mut value = serde_json::to_value(&artifact).expect("encode");
    value["r"] = format!("{:#x}", artifact.r.as_biguint()).into();
    value["s"] = format!("{:#x}", artifact.s.as_biguint()).into();

    let parsed: SignatureArtifact = serde_json::from_value(value).expect("decode hex");
    assert_eq!(parsed.r, artifact.r);
    assert_eq!(parsed.s, artifact.s);
    let (public, r, s, digest) = parsed.verifier_inputs();
    assert!(contract_verify(&params, public, r, s, digest));
}

#[test]
fn tampered_artifacts_rejected() {
    let (params, artifact) = signed_artifact();

    let mut wrong_message = artifact.clone();
    wrong_message.message.push('!');
    assert!(!schnorr::verify(
        &params,
        &wrong_message.pub_key,
        &wrong_message.message,
        &wrong_message.signature()
    ));

    let mut wrong_digest = artifact.clone();
    wrong_digest.msg_hash = message_digest("other");
    let (public, r, s, digest) = wrong_digest.verifier_inputs();
    assert!(!contract_verify(&params, public, r, s, digest));

    let mut wrong_s = artifact.clone();
    wrong_s.s = Scalar::new((artifact.s.as_biguint() + 1u8) % params.order());
    let (public, r, s, digest) = wrong_s.verifier_inputs();
    assert!(!contract_verify(&params, public, r, s, digest));

    let mut wrong_key = artifact.clone();
    wrong_key.pub_key = GroupElement::new(params.pow_g(&2u32.into()));
    assert!(!schnorr::verify(
        &params,
        &wrong_key.pub_key,
        &wrong_key.message,
        &wrong_key.signature()
    ));

    let mut zero_r = artifact;
    zero_r.r = GroupElement::from_u64(0);
    let (public, r, s, digest) = zero_r.verifier_inputs();
    assert!(!contract_verify(&params, public, r, s, digest));
}
