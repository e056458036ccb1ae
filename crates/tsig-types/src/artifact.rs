//! Persisted signature record.
//!
//! Signing tooling writes one of these per signature so that a verifier (an
//! on-chain contract call, a gas estimate, an audit script) can be fed the
//! exact `(pub, r, s, msg_hash)` tuple later. Integers are stored as decimal
//! strings and the digest as `0x` hex, e.g.
//!
//! ```json
//! {
//!   "message": "TSIGv1|chain=11155111|...",
//!   "chain_id": 11155111,
//!   "contract_address": "0x0000000000000000000000000000000000000000",
//!   "pub": "4939700495...",
//!   "r": "1232405417...",
//!   "s": "6456953836...",
//!   "msg_hash": "0x14d4...dc4b"
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{GroupElement, MessageDigest, Result, Scalar, Signature};

/// A signature together with everything an external verifier needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureArtifact {
    /// The exact signed message text.
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract_address: Option<String>,
    /// Group public key `G^priv mod P`.
    #[serde(rename = "pub")]
    pub pub_key: GroupElement,
    pub r: GroupElement,
    pub s: Scalar,
    /// Keccak-256 of `message`.
    pub msg_hash: MessageDigest,
}

impl SignatureArtifact {
    /// Create an artifact with no chain binding.
    pub fn new(
        message: impl Into<String>,
        pub_key: GroupElement,
        signature: Signature,
        msg_hash: MessageDigest,
    ) -> Self {
        Self {
            message: message.into(),
            chain_id: None,
            contract_address: None,
            pub_key,
            r: signature.r,
            s: signature.s,
            msg_hash,
        }
    }

    /// Record the chain and verifier contract the signature targets.
    pub fn with_chain(mut self, chain_id: u64, contract_address: impl Into<String>) -> Self {
        self.chain_id = Some(chain_id);
        self.contract_address = Some(contract_address.into());
        self
    }

    pub fn signature(&self) -> Signature {
        Signature::new(self.r.clone(), self.s.clone())
    }

    /// The `(pub, r, s, msg_hash)` tuple in verifier argument order.
    pub fn verifier_inputs(&self) -> (&GroupElement, &GroupElement, &Scalar, &MessageDigest) {
        (&self.pub_key, &self.r, &self.s, &self.msg_hash)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SignatureArtifact {
        let digest: MessageDigest =
            "0x14d419619c34e1bb222ac6fba4c3dc33741d3a9b99e2d51f325abee824eddc4b"
                .parse()
                .expect("digest");
        SignatureArtifact::new(
            "Authorize multisig action",
            GroupElement::from_u64(11),
            Signature::new(GroupElement::from_u64(22), Scalar::from_u64(33)),
            digest,
        )
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["pub"], "11");
        assert_eq!(json["r"], "22");
        assert_eq!(json["s"], "33");
        assert_eq!(
            json["msg_hash"],
            "0x14d419619c34e1bb222ac6fba4c3dc33741d3a9b99e2d51f325abee824eddc4b"
        );
        assert!(json.get("chain_id").is_none());
    }

    #[test]
    fn test_json_roundtrip_with_chain() {
        let artifact = sample().with_chain(11_155_111, "0x0000000000000000000000000000000000000000");
        let json = artifact.to_json_pretty().expect("serialize");
        let back = SignatureArtifact::from_json(&json).expect("parse");
        assert_eq!(back, artifact);
        assert_eq!(back.chain_id, Some(11_155_111));
    }

    #[test]
    fn test_accepts_hex_integers_and_bare_digest() {
        let json = r#"{
            "message": "m",
            "pub": "0x0b",
            "r": "22",
            "s": "0x21",
            "msg_hash": "14d419619c34e1bb222ac6fba4c3dc33741d3a9b99e2d51f325abee824eddc4b"
        }"#;
        let artifact = SignatureArtifact::from_json(json).expect("parse");
        assert_eq!(artifact.pub_key, GroupElement::from_u64(11));
        assert_eq!(artifact.s, Scalar::from_u64(33));
        assert_eq!(artifact.signature().r, GroupElement::from_u64(22));
    }

    #[test]
    fn test_short_digest_rejected() {
        let json = r#"{"message":"m","pub":"1","r":"1","s":"1","msg_hash":"0xabcd"}"#;
        assert!(SignatureArtifact::from_json(json).is_err());
    }
}
