//! Persisted account surface.
//!
//! The engine does not authenticate anyone; it only owns the persisted keys
//! the rest of the site reads: the logged-in flag and profile, and
//! password-reset tokens with a 24-hour expiry. Password checks, if any,
//! happen elsewhere.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use walkway_core::Email;

use crate::store::{Store, StoreError, keys};

/// Hours before a password-reset token expires.
const RESET_TOKEN_TTL_HOURS: i64 = 24;

/// Length of a generated reset token.
const RESET_TOKEN_LENGTH: usize = 32;

/// A user's stored profile.
///
/// Wire field names (`firstName`, `joinedAt`, ...) match the persisted
/// `logged-in-user` value the header script reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone: String,
    pub joined_at: DateTime<Utc>,
}

impl UserProfile {
    /// "First Last", as notification templates render it.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Stored payload for one password-reset token.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResetTokenRecord {
    email: Email,
    expires_at: DateTime<Utc>,
}

/// Login state and reset tokens over the store.
#[derive(Debug, Clone)]
pub struct AccountState {
    store: Store,
}

impl AccountState {
    /// Create account state over the given store.
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Persist the logged-in flag and profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    #[instrument(skip(self, user), fields(email = %user.email))]
    pub fn log_in(&self, user: &UserProfile) -> Result<(), StoreError> {
        self.store.set(keys::LOGGED_IN_FLAG, &true)?;
        self.store.set(keys::LOGGED_IN_USER, user)
    }

    /// Clear the logged-in flag and profile.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn log_out(&self) -> Result<(), StoreError> {
        self.store.remove(keys::LOGGED_IN_FLAG)?;
        self.store.remove(keys::LOGGED_IN_USER)
    }

    /// The logged-in user's profile, if the flag is set.
    #[must_use]
    pub fn current_user(&self) -> Option<UserProfile> {
        if self.store.get(keys::LOGGED_IN_FLAG) != Some(true) {
            return None;
        }
        self.store.get(keys::LOGGED_IN_USER)
    }

    /// Issue a password-reset token for `email`, valid for 24 hours.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if persisting fails.
    pub fn issue_reset_token(&self, email: &Email) -> Result<String, StoreError> {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(RESET_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let record = ResetTokenRecord {
            email: email.clone(),
            expires_at: Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS),
        };
        self.store.set(&keys::reset_token(&token), &record)?;
        Ok(token)
    }

    /// Redeem a reset token, consuming it.
    ///
    /// Returns the email the token was issued for, or `None` for unknown or
    /// expired tokens. Expired tokens are removed on sight.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if removing the consumed token fails.
    pub fn redeem_reset_token(&self, token: &str) -> Result<Option<Email>, StoreError> {
        let key = keys::reset_token(token);
        let Some(record) = self.store.get::<ResetTokenRecord>(&key) else {
            return Ok(None);
        };

        self.store.remove(&key)?;
        if record.expires_at < Utc::now() {
            return Ok(None);
        }
        Ok(Some(record.email))
    }
}
