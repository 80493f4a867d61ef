//! Integration test crate for Veilpad.
//!
//! This crate has no library code. It only contains integration tests
//! that exercise end-to-end flows across the types and store crates.
//!
//! Run all integration tests:
//! ```sh
//! cargo test -p veilpad-integration-tests
//! ```
