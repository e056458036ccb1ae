//! Test vector generator for the tsig workspace.
//!
//! Writes known-answer vectors for Keccak-256, the Fiat-Shamir challenge,
//! deterministic Schnorr signing, threshold signing and the `TSIGv1`
//! envelope. External verifiers check their implementation against this file.
//!
//! Usage:
//!   tsig-testvec              # Generate the fixture
//!   tsig-testvec --verify     # Check the fixture against a regeneration
//!
//! Configuration is read from the TOML file named by `TSIG_CONFIG`, if set.

mod config;
mod vectors;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use tracing::{error, info, warn};

use crate::config::TestvecConfig;
use crate::vectors::{check_vectors, generate_all, Check, TestVectors};

fn main() -> anyhow::Result<ExitCode> {
    let config = TestvecConfig::load().context("loading configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level.parse()?),
        )
        .init();

    let path = config.fixture_path.as_path();
    let generated = generate_all(config.params.as_ref())?;

    if std::env::args().any(|a| a == "--verify") {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let stored: TestVectors = serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?;
                return Ok(report(&stored, &generated));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "no stored vectors, generating");
            }
            Err(e) => return Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    write_fixture(path, &generated)?;
    info!(count = generated.vectors.len(), path = %path.display(), "wrote test vectors");
    Ok(report(&generated, &generate_all(config.params.as_ref())?))
}

fn write_fixture(path: &Path, vectors: &TestVectors) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(vectors)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn report(stored: &TestVectors, regenerated: &TestVectors) -> ExitCode {
    let checks = check_vectors(stored, regenerated);
    let failed = checks.values().filter(|c| **c != Check::Pass).count();
    if failed == 0 {
        info!(count = checks.len(), "all test vectors verified");
        ExitCode::SUCCESS
    } else {
        error!(failed, total = checks.len(), "test vector verification failed");
        ExitCode::FAILURE
    }
}
