//! Core types for the WalkWay order engine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod money;
pub mod status;

pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId};
pub use money::Money;
pub use status::{OrderStatus, PaymentMethod};
