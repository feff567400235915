//! Notification channel configuration loaded from environment variables.
//!
//! Every channel is optional. A variable that is missing, empty, or still
//! holding a placeholder value (`YOUR_WEBHOOK_URL` and friends) leaves that
//! channel unconfigured; the channel then reports `not_configured` at send
//! time instead of attempting a network call.
//!
//! # Environment Variables
//!
//! - `WALKWAY_ADMIN_WHATSAPP` - Admin WhatsApp number, digits with country
//!   code (e.g. `917681886061`)
//! - `WALKWAY_DISCORD_WEBHOOK_URL` - Discord incoming-webhook URL
//! - `WALKWAY_TELEGRAM_BOT_TOKEN` - Telegram bot token
//! - `WALKWAY_TELEGRAM_CHAT_ID` - Telegram chat to message
//! - `WALKWAY_GOOGLE_FORM_URL` - Google Form `formResponse` URL
//! - `WALKWAY_GOOGLE_FORM_ORDER_ENTRY` / `_NAME_ENTRY` / `_EMAIL_ENTRY` /
//!   `_TOTAL_ENTRY` - `entry.NNN` field ids of the form
//! - `WALKWAY_SMTP_HOST` / `WALKWAY_SMTP_PORT` / `WALKWAY_SMTP_USERNAME` /
//!   `WALKWAY_SMTP_PASSWORD` - SMTP relay credentials
//! - `WALKWAY_EMAIL_FROM` - From address for outgoing mail
//! - `WALKWAY_ADMIN_EMAIL` - Where order alerts are sent

use secrecy::SecretString;

/// Blocklist of common placeholder patterns (case-insensitive).
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your_",
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Whether a configuration value is a stand-in rather than a real setting.
#[must_use]
pub fn is_placeholder(value: &str) -> bool {
    let lower = value.to_lowercase();
    PLACEHOLDER_PATTERNS
        .iter()
        .any(|pattern| lower.contains(pattern))
}

/// WhatsApp deep-link channel settings.
#[derive(Debug, Clone)]
pub struct WhatsAppConfig {
    /// Admin phone number, digits with country code.
    pub admin_phone: String,
    /// Pause before handing the deep link to the opener, in milliseconds.
    /// Gives the alert a moment on screen first.
    pub open_delay_ms: u64,
}

/// Discord webhook channel settings.
#[derive(Debug, Clone)]
pub struct DiscordConfig {
    pub webhook_url: String,
}

/// Telegram bot channel settings.
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: SecretString,
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Google Form channel settings.
#[derive(Debug, Clone)]
pub struct GoogleFormConfig {
    /// The form's `formResponse` URL.
    pub form_url: String,
    /// `entry.NNN` id receiving the order id.
    pub order_id_entry: String,
    /// `entry.NNN` id receiving the customer name.
    pub name_entry: String,
    /// `entry.NNN` id receiving the customer email.
    pub email_entry: String,
    /// `entry.NNN` id receiving the order total.
    pub total_entry: String,
}

/// SMTP email channel settings.
#[derive(Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: SecretString,
    pub from_address: String,
    pub admin_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field("smtp_password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("admin_address", &self.admin_address)
            .finish()
    }
}

/// Configuration for the whole channel set.
#[derive(Debug, Clone, Default)]
pub struct NotifyConfig {
    pub whatsapp: Option<WhatsAppConfig>,
    pub discord: Option<DiscordConfig>,
    pub telegram: Option<TelegramConfig>,
    pub google_form: Option<GoogleFormConfig>,
    pub email: Option<EmailConfig>,
}

impl NotifyConfig {
    /// Default pause before opening a WhatsApp deep link.
    pub const DEFAULT_OPEN_DELAY_MS: u64 = 1_000;

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` if present. Channels
    /// with missing or placeholder settings come back `None`.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let whatsapp = configured_env("WALKWAY_ADMIN_WHATSAPP").map(|admin_phone| WhatsAppConfig {
            admin_phone,
            open_delay_ms: Self::DEFAULT_OPEN_DELAY_MS,
        });

        let discord =
            configured_env("WALKWAY_DISCORD_WEBHOOK_URL").map(|webhook_url| DiscordConfig {
                webhook_url,
            });

        let telegram = configured_env("WALKWAY_TELEGRAM_BOT_TOKEN")
            .zip(configured_env("WALKWAY_TELEGRAM_CHAT_ID"))
            .map(|(token, chat_id)| TelegramConfig {
                bot_token: SecretString::from(token),
                chat_id,
            });

        let google_form = configured_env("WALKWAY_GOOGLE_FORM_URL").and_then(|form_url| {
            Some(GoogleFormConfig {
                form_url,
                order_id_entry: configured_env("WALKWAY_GOOGLE_FORM_ORDER_ENTRY")?,
                name_entry: configured_env("WALKWAY_GOOGLE_FORM_NAME_ENTRY")?,
                email_entry: configured_env("WALKWAY_GOOGLE_FORM_EMAIL_ENTRY")?,
                total_entry: configured_env("WALKWAY_GOOGLE_FORM_TOTAL_ENTRY")?,
            })
        });

        let email = configured_env("WALKWAY_SMTP_HOST").and_then(|smtp_host| {
            Some(EmailConfig {
                smtp_host,
                smtp_port: configured_env("WALKWAY_SMTP_PORT")
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587),
                smtp_username: configured_env("WALKWAY_SMTP_USERNAME")?,
                smtp_password: SecretString::from(configured_env("WALKWAY_SMTP_PASSWORD")?),
                from_address: configured_env("WALKWAY_EMAIL_FROM")?,
                admin_address: configured_env("WALKWAY_ADMIN_EMAIL")?,
            })
        });

        Self {
            whatsapp,
            discord,
            telegram,
            google_form,
            email,
        }
    }
}

/// Read an environment variable, treating empty and placeholder values as
/// unset.
fn configured_env(key: &str) -> Option<String> {
    let value = std::env::var(key).ok()?;
    let trimmed = value.trim();
    if trimmed.is_empty() || is_placeholder(trimmed) {
        return None;
    }
    Some(trimmed.to_owned())
}
