//! Known-answer vector generation and checking.
//!
//! Every vector is reproducible: signatures use deterministic nonces, and the
//! threshold vector depends only on the dealt secret, not on the random shares.

use std::collections::BTreeMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use tsig_crypto::keccak::{challenge, keccak256, message_digest};
use tsig_crypto::schnorr::{self, KeyPair, NonceMode};
use tsig_crypto::{GroupParams, SecretScalar};
use tsig_threshold::{Dealer, QuorumConfig, ThresholdSigner};
use tsig_types::{GroupElement, SigningContext};

pub const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Serialize, Deserialize)]
pub struct TestVectors {
    pub version: String,
    pub generated_by: String,
    pub vectors: BTreeMap<String, TestVector>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestVector {
    pub description: String,
    pub inputs: BTreeMap<String, String>,
    pub outputs: BTreeMap<String, String>,
}

impl TestVector {
    fn new<const I: usize, const O: usize>(
        description: impl Into<String>,
        inputs: [(&str, String); I],
        outputs: [(&str, String); O],
    ) -> Self {
        Self {
            description: description.into(),
            inputs: inputs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            outputs: outputs.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

/// Outcome of comparing a stored vector with its regeneration.
#[derive(Debug, PartialEq, Eq)]
pub enum Check {
    Pass,
    Mismatch,
    Missing,
}

fn keccak_vectors() -> BTreeMap<String, TestVector> {
    let mut vectors = BTreeMap::new();

    for (name, data) in [("keccak256_empty", ""), ("keccak256_abc", "abc")] {
        vectors.insert(
            name.to_string(),
            TestVector::new(
                format!("keccak256({data:?})"),
                [("data", data.to_string())],
                [("hash", hex::encode(keccak256(data.as_bytes())))],
            ),
        );
    }

    vectors
}

fn challenge_vectors(params: &GroupParams) -> anyhow::Result<BTreeMap<String, TestVector>> {
    let mut vectors = BTreeMap::new();

    let message = "Authorize multisig action";
    let r: GroupElement =
        "12324054177510628669524051695672523924808128168992135656784613648847424047326".parse()?;
    let (h, digest) = challenge(params, &r, message)?;
    vectors.insert(
        "challenge_multisig".to_string(),
        TestVector::new(
            "h = keccak256(r as uint256 || keccak256(message)) mod P",
            [("r", r.to_string()), ("message", message.to_string())],
            [("h", h.to_string()), ("digest", digest.to_hex())],
        ),
    );

    Ok(vectors)
}

fn schnorr_vector(
    params: &GroupParams,
    description: &str,
    secret: u64,
    message: &str,
) -> anyhow::Result<TestVector> {
    let keypair = KeyPair::from_secret(params, SecretScalar::from_u64(secret))?;
    let signature = schnorr::sign(params, keypair.secret(), message, NonceMode::Deterministic)?;
    anyhow::ensure!(
        schnorr::verify(params, keypair.public(), message, &signature),
        "generated signature for {description} does not verify"
    );

    Ok(TestVector::new(
        description,
        [
            ("p", params.p().to_string()),
            ("g", params.g().to_string()),
            ("priv", secret.to_string()),
            ("message", message.to_string()),
        ],
        [
            ("pub", keypair.public().to_string()),
            ("r", signature.r.to_string()),
            ("s", signature.s.to_string()),
            ("digest", message_digest(message).to_hex()),
        ],
    ))
}

fn signing_vectors(extra: Option<&GroupParams>) -> anyhow::Result<BTreeMap<String, TestVector>> {
    let standard = GroupParams::standard();
    let small = GroupParams::new(1019u32.into(), 2u32.into())?;

    let mut vectors = BTreeMap::from([
        (
            "schnorr_deterministic_multisig".to_string(),
            schnorr_vector(
                &standard,
                "deterministic sign, priv=123456789",
                123_456_789,
                "Authorize multisig action",
            )?,
        ),
        (
            "schnorr_deterministic_priv1_empty".to_string(),
            schnorr_vector(&standard, "deterministic sign, priv=1, empty message", 1, "")?,
        ),
        (
            "schnorr_deterministic_priv42_hello".to_string(),
            schnorr_vector(&standard, "deterministic sign, priv=42", 42, "hello")?,
        ),
    ]);

    for secret in [77u64, 78, 100] {
        vectors.insert(
            format!("schnorr_small_group_{secret}"),
            schnorr_vector(&small, "p=1019, g=2", secret, "small group")?,
        );
    }

    if let Some(params) = extra {
        vectors.insert(
            "schnorr_configured_params".to_string(),
            schnorr_vector(params, "configured parameter set, priv=42", 42, "hello")?,
        );
    }

    Ok(vectors)
}

fn threshold_vectors(params: &GroupParams) -> anyhow::Result<BTreeMap<String, TestVector>> {
    let secret = 123_456_789u64;
    let message = "Authorize multisig action";
    let quorum = QuorumConfig::new(3, 5)?;

    let dealing = Dealer::new(params.clone(), quorum).deal(&SecretScalar::from_u64(secret))?;
    let signer = ThresholdSigner::new(params.clone());
    let sig = signer.sign_for_quorum(&quorum, &dealing.shares[2..], message, NonceMode::Deterministic)?;
    anyhow::ensure!(
        signer.verify(&dealing.public_key, message, &sig),
        "threshold signature does not verify"
    );

    Ok(BTreeMap::from([(
        "threshold_3_of_5".to_string(),
        TestVector::new(
            "3-of-5 dealing of priv=123456789, signed by shares 3..=5",
            [
                ("priv", secret.to_string()),
                ("n", quorum.total.to_string()),
                ("t", quorum.threshold.to_string()),
                ("message", message.to_string()),
            ],
            [
                ("pub", dealing.public_key.to_string()),
                ("r", sig.signature.r.to_string()),
                ("s", sig.signature.s.to_string()),
                ("digest", sig.digest.to_hex()),
            ],
        ),
    )]))
}

fn envelope_vectors() -> BTreeMap<String, TestVector> {
    let context = SigningContext {
        chain_id: 11_155_111,
        verifier: tsig_types::envelope::ZERO_ADDRESS.to_string(),
        memo: "Authorize multisig action".to_string(),
        nonce: "00112233aabbccdd".to_string(),
        expires_at: 1_700_000_900,
    };
    let message = context.to_message();

    BTreeMap::from([(
        "envelope_tsigv1".to_string(),
        TestVector::new(
            "TSIGv1 envelope rendering with a fixed nonce",
            [
                ("chain_id", context.chain_id.to_string()),
                ("verifier", context.verifier.clone()),
                ("memo", context.memo.clone()),
                ("nonce", context.nonce.clone()),
                ("expires_at", context.expires_at.to_string()),
            ],
            [
                ("message", message.clone()),
                ("digest", message_digest(&message).to_hex()),
            ],
        ),
    )])
}

/// Build the full vector set.
pub fn generate_all(extra: Option<&GroupParams>) -> anyhow::Result<TestVectors> {
    let standard = GroupParams::standard();

    let mut vectors = keccak_vectors();
    vectors.extend(challenge_vectors(&standard)?);
    vectors.extend(signing_vectors(extra)?);
    vectors.extend(threshold_vectors(&standard).context("threshold vectors")?);
    vectors.extend(envelope_vectors());

    tracing::debug!(count = vectors.len(), "generated vectors");
    Ok(TestVectors {
        version: FORMAT_VERSION.to_string(),
        generated_by: env!("CARGO_PKG_NAME").to_string(),
        vectors,
    })
}

/// Compare every stored vector's outputs with a regeneration.
pub fn check_vectors(
    stored: &TestVectors,
    regenerated: &TestVectors,
) -> BTreeMap<String, Check> {
    stored
        .vectors
        .iter()
        .map(|(name, expected)| {
            let check = match regenerated.vectors.get(name) {
                Some(actual) if actual.outputs == expected.outputs => Check::Pass,
                Some(actual) => {
                    tracing::error!(
                        vector = %name,
                        expected = ?expected.outputs,
                        actual = ?actual.outputs,
                        "vector mismatch"
                    );
                    Check::Mismatch
                }
                None => {
                    tracing::error!(vector = %name, "vector missing from regeneration");
                    Check::Missing
                }
            };
            (name.clone(), check)
        })
        .collect()
}
