//! WalkWay Core - Shared types library.
//!
//! This crate provides common types used across all WalkWay order engine
//! components:
//! - `engine` - Cart/wishlist ledgers, order lifecycle, local persistence
//! - `notify` - Multi-channel admin notification fan-out
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no persistence, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product/order IDs, money, emails, and
//!   statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
