//! Integration tests for the WalkWay order engine.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p walkway-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart → order → history, persistence round-trips
//! - `notification_fanout` - Multi-channel dispatch independence
//!
//! Everything runs against in-process stores (`MemoryStore` or a temp-dir
//! `JsonFileStore`); no external services are required.

#![cfg_attr(not(test), forbid(unsafe_code))]
