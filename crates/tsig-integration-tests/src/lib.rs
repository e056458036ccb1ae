//! Integration test crate for the tsig workspace.
//!
//! This crate has no library code. Its tests run the full path from a
//! trusted dealer through a quorum of shares to a signature, a persisted
//! artifact and an independent verifier.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p tsig-integration-tests
//! ```
