//! SMTP email channel.
//!
//! For an order, two mails go out: a confirmation to the customer and an
//! alert to the admin. For a registration, a welcome mail to the new user.
//! Bodies are plain text; there is no HTML view layer to share templates
//! with.

use futures::future::BoxFuture;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use tracing::{debug, warn};

use super::{ChannelError, ChannelResult, NotificationChannel, into_result};
use crate::config::EmailConfig;
use crate::event::{NotifyEvent, items_list};

use walkway_engine::{Order, UserProfile};

struct Mailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    admin_address: String,
}

/// Sends transactional mail over an SMTP relay.
pub struct EmailChannel {
    mailer: Option<Mailer>,
}

impl EmailChannel {
    /// Build the channel. An unconfigured or unreachable relay setup leaves
    /// the channel in the `not_configured` state rather than failing.
    #[must_use]
    pub fn new(config: Option<EmailConfig>) -> Self {
        let mailer = config.and_then(|config| {
            let relay = match AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(
                &config.smtp_host,
            ) {
                Ok(relay) => relay,
                Err(e) => {
                    warn!(error = %e, "invalid SMTP relay config, email channel disabled");
                    return None;
                }
            };

            let credentials = Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.expose_secret().to_owned(),
            );

            Some(Mailer {
                transport: relay
                    .port(config.smtp_port)
                    .credentials(credentials)
                    .build(),
                from_address: config.from_address,
                admin_address: config.admin_address,
            })
        });

        Self { mailer }
    }

    async fn deliver(&self, mailer: &Mailer, event: &NotifyEvent) -> Result<(), ChannelError> {
        match event {
            NotifyEvent::NewOrder(order) => {
                let confirmation = build_message(
                    &mailer.from_address,
                    order.customer.email.as_str(),
                    &format!("Order Confirmation - {}", order.order_id),
                    &customer_confirmation_body(order),
                )?;
                mailer.transport.send(confirmation).await.map_err(other)?;

                let alert = build_message(
                    &mailer.from_address,
                    &mailer.admin_address,
                    &format!("New Order Alert - {}", order.order_id),
                    &admin_alert_body(order),
                )?;
                mailer.transport.send(alert).await.map_err(other)?;
            }
            NotifyEvent::NewRegistration(user) => {
                let welcome = build_message(
                    &mailer.from_address,
                    user.email.as_str(),
                    "Welcome to WalkWay!",
                    &welcome_body(user),
                )?;
                mailer.transport.send(welcome).await.map_err(other)?;
            }
        }
        debug!("notification email delivered");
        Ok(())
    }
}

impl NotificationChannel for EmailChannel {
    fn name(&self) -> &'static str {
        "email"
    }

    fn send<'a>(&'a self, event: &'a NotifyEvent) -> BoxFuture<'a, ChannelResult> {
        Box::pin(async move {
            let Some(mailer) = self.mailer.as_ref() else {
                return ChannelResult::not_configured(self.name());
            };
            into_result(self.name(), self.deliver(mailer, event).await)
        })
    }
}

fn other(e: impl std::fmt::Display) -> ChannelError {
    ChannelError::Other(e.to_string())
}

fn build_message(
    from: &str,
    to: &str,
    subject: &str,
    body: &str,
) -> Result<Message, ChannelError> {
    let from: Mailbox = from.parse().map_err(other)?;
    let to: Mailbox = to.parse().map_err(other)?;
    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .body(body.to_owned())
        .map_err(other)
}

fn customer_confirmation_body(order: &Order) -> String {
    format!(
        "Hi {},\n\n\
         Thank you for your order! It has been confirmed.\n\n\
         Order ID: {}\n\
         Order Date: {}\n\
         Payment Method: {}\n\n\
         Items:\n{}\n\n\
         Subtotal: {}\n\
         Shipping: {}\n\
         Total: {}\n\n\
         Delivery Address:\n{}\n\n\
         We will reach you at {} if anything comes up.\n\n\
         - WalkWay",
        order.customer.name,
        order.order_id,
        order.placed_at.format("%d/%m/%Y"),
        order.payment_method,
        items_list(&order.items),
        order.subtotal,
        order.shipping_fee,
        order.total,
        order.customer.address_line(),
        order.customer.phone,
    )
}

fn admin_alert_body(order: &Order) -> String {
    format!(
        "New order received.\n\n\
         Order ID: {}\n\
         Order Date: {}\n\
         Customer: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Payment Method: {}\n\n\
         Items:\n{}\n\n\
         Total: {}\n\n\
         Delivery Address:\n{}",
        order.order_id,
        order.placed_at.format("%d/%m/%Y"),
        order.customer.name,
        order.customer.email,
        order.customer.phone,
        order.payment_method,
        items_list(&order.items),
        order.total,
        order.customer.address_line(),
    )
}

fn welcome_body(user: &UserProfile) -> String {
    format!(
        "Hi {},\n\n\
         Welcome to WalkWay! Your account is ready.\n\n\
         Joined: {}\n\n\
         Happy shopping,\n\
         - WalkWay",
        user.full_name(),
        user.joined_at.format("%d/%m/%Y"),
    )
}
