//! Integration test crate for mint vouchers.
//!
//! This crate has no library code. It only contains integration tests that
//! run vouchers from issuance through verification and consumption across
//! the workspace crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p mintpass-integration-tests
//! ```
