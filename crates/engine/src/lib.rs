//! WalkWay Engine - cart/wishlist state, order lifecycle, local persistence.
//!
//! This crate is the state-and-persistence layer behind the storefront UI:
//! it owns the cart and wishlist ledgers, converts a cart snapshot plus
//! checkout input into an immutable order appended to order history, and
//! keeps the durable admin notification log.
//!
//! Everything here is synchronous and single-flow: operations run on
//! discrete UI events, and every mutation is a full read-modify-write of one
//! store key. The async notification fan-out lives in `walkway-notify` and
//! is fired by the caller *after* an order is confirmed here.
//!
//! # Modules
//!
//! - [`store`] - Durable local key-value store adapter
//! - [`cart`] - Cart ledger (quantity-merging line items)
//! - [`wishlist`] - Wishlist ledger (no quantities)
//! - [`order`] - Checkout and order history
//! - [`notifications`] - Admin notification ring buffer
//! - [`account`] - Persisted login flag and password-reset tokens

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod cart;
pub mod notifications;
pub mod order;
pub mod store;
pub mod wishlist;

pub use account::{AccountState, UserProfile};
pub use cart::{CartEvent, CartLedger, LineItem, ProductInput};
pub use notifications::{AdminNotification, NotificationKind, NotificationLog};
pub use order::{Checkout, CustomerDraft, CustomerInfo, Order, OrderError};
pub use store::{JsonFileStore, MemoryStore, Store, StoreAdapter, StoreError};
pub use wishlist::{WishlistEvent, WishlistItem, WishlistLedger};
