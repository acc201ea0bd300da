//! Reservation notification dispatch.
//!
//! A [`Notifier`] turns one validated reservation into two independent
//! emails and sends them concurrently. Neither failure affects the other,
//! and no failure ever reaches the caller as an `Err`.

use crate::error::EmailError;
use crate::message::{EmailBody, Mailbox, OutboundEmail};
use crate::providers::EmailProvider;
use crate::render;
use std::fmt;
use std::sync::Arc;
use supperclub_core::ValidReservation;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// How the body of one email kind is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyStrategy {
    /// Provider-hosted template with this id.
    Template(u64),
    /// Subject, HTML and text rendered locally.
    Inline,
}

impl BodyStrategy {
    /// Template when an id is configured, inline otherwise.
    #[must_use]
    pub const fn from_template_id(template_id: Option<u64>) -> Self {
        match template_id {
            Some(id) => Self::Template(id),
            None => Self::Inline,
        }
    }
}

impl fmt::Display for BodyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(id) => write!(f, "template #{id}"),
            Self::Inline => f.write_str("inline"),
        }
    }
}

/// Startup-time notification settings.
#[derive(Clone, Debug)]
pub struct NotifierConfig {
    /// From address on every email
    pub sender: Mailbox,
    /// Body strategy for the staff-facing request
    pub restaurant_request: BodyStrategy,
    /// Body strategy for the customer acknowledgement
    pub customer_confirmation: BodyStrategy,
}

/// The two emails sent per reservation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    /// Sent to the restaurant recipient list.
    RestaurantRequest,
    /// Sent to the customer.
    CustomerConfirmation,
}

impl NotificationKind {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RestaurantRequest => "restaurant_request",
            Self::CustomerConfirmation => "customer_confirmation",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one send.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// The provider accepted the message.
    Sent {
        /// Provider message id, if one was returned
        message_id: Option<String>,
    },
    /// Nothing to send (no recipients). Counts as success.
    Skipped {
        /// Why the send was skipped
        reason: String,
    },
    /// The send failed.
    Failed {
        /// What went wrong
        error: EmailError,
    },
}

impl SendOutcome {
    /// `true` for sent and skipped.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }

    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Sent { .. } => "sent",
            Self::Skipped { .. } => "skipped",
            Self::Failed { .. } => "failed",
        }
    }
}

/// Outcomes of both emails for one reservation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationReport {
    /// Staff-facing request
    pub restaurant_request: SendOutcome,
    /// Customer acknowledgement
    pub customer_confirmation: SendOutcome,
}

impl NotificationReport {
    /// Both outcomes count as success.
    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.restaurant_request.is_success() && self.customer_confirmation.is_success()
    }
}

/// Sends that have been started and can be awaited.
///
/// Dropping this value does not cancel the sends; they finish in the
/// background.
#[derive(Debug)]
pub struct PendingNotifications {
    restaurant_request: JoinHandle<SendOutcome>,
    customer_confirmation: JoinHandle<SendOutcome>,
}

impl PendingNotifications {
    /// Wait for both sends.
    pub async fn wait(self) -> NotificationReport {
        let (restaurant_request, customer_confirmation) =
            tokio::join!(self.restaurant_request, self.customer_confirmation);

        NotificationReport {
            restaurant_request: flatten_join(NotificationKind::RestaurantRequest, restaurant_request),
            customer_confirmation: flatten_join(
                NotificationKind::CustomerConfirmation,
                customer_confirmation,
            ),
        }
    }
}

fn flatten_join(
    kind: NotificationKind,
    joined: Result<SendOutcome, tokio::task::JoinError>,
) -> SendOutcome {
    joined.unwrap_or_else(|e| {
        error!(kind = %kind, error = %e, "Email task did not complete");
        SendOutcome::Failed {
            error: EmailError::TaskFailed(e.to_string()),
        }
    })
}

/// Formats and sends reservation notifications.
#[derive(Clone)]
pub struct Notifier {
    provider: Arc<dyn EmailProvider>,
    config: Arc<NotifierConfig>,
}

impl Notifier {
    /// Create a notifier and log its configuration.
    #[must_use]
    pub fn new(provider: Arc<dyn EmailProvider>, config: NotifierConfig) -> Self {
        info!(
            provider = provider.name(),
            sender = %config.sender,
            restaurant_request = %config.restaurant_request,
            customer_confirmation = %config.customer_confirmation,
            "Email notifications configured"
        );

        Self {
            provider,
            config: Arc::new(config),
        }
    }

    /// Provider name in use.
    #[must_use]
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Build the email of one kind, or `None` if it has nowhere to go.
    #[must_use]
    pub fn compose(
        &self,
        kind: NotificationKind,
        reservation: &ValidReservation,
        restaurant_recipients: &[String],
    ) -> Option<OutboundEmail> {
        match kind {
            NotificationKind::RestaurantRequest => {
                if restaurant_recipients.is_empty() {
                    return None;
                }

                Some(OutboundEmail {
                    sender: self.config.sender.clone(),
                    to: restaurant_recipients.iter().map(Mailbox::new).collect(),
                    reply_to: Some(Mailbox::named(
                        reservation.email.clone(),
                        reservation.customer_name.clone(),
                    )),
                    body: body_for(self.config.restaurant_request, kind, reservation),
                })
            }
            NotificationKind::CustomerConfirmation => Some(OutboundEmail {
                sender: self.config.sender.clone(),
                to: vec![Mailbox::named(
                    reservation.email.clone(),
                    reservation.customer_name.clone(),
                )],
                reply_to: None,
                body: body_for(self.config.customer_confirmation, kind, reservation),
            }),
        }
    }

    /// Send one email kind and report the outcome.
    pub async fn send(
        &self,
        kind: NotificationKind,
        reservation: &ValidReservation,
        restaurant_recipients: &[String],
    ) -> SendOutcome {
        let Some(email) = self.compose(kind, reservation, restaurant_recipients) else {
            warn!(
                kind = %kind,
                "No restaurant recipients configured, skipping restaurant notification"
            );
            let outcome = SendOutcome::Skipped {
                reason: "no recipients".to_string(),
            };
            record(kind, &outcome);
            return outcome;
        };

        info!(
            kind = %kind,
            provider = self.provider.name(),
            to = %email.recipient_list(),
            body = %email.body.describe(),
            "Sending email"
        );

        let outcome = match self.provider.send(&email).await {
            Ok(receipt) => {
                info!(
                    kind = %kind,
                    message_id = receipt.message_id.as_deref().unwrap_or("-"),
                    "Email sent"
                );
                SendOutcome::Sent {
                    message_id: receipt.message_id,
                }
            }
            Err(e) => {
                match &e {
                    EmailError::Provider { status, body } => error!(
                        kind = %kind,
                        status = status,
                        response = %body,
                        "Email provider rejected message"
                    ),
                    other => error!(kind = %kind, error = %other, "Email send failed"),
                }
                SendOutcome::Failed { error: e }
            }
        };

        record(kind, &outcome);
        outcome
    }

    /// Start both sends on the runtime and return a handle to their outcomes.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn dispatch(
        &self,
        reservation: ValidReservation,
        restaurant_recipients: Vec<String>,
    ) -> PendingNotifications {
        let reservation = Arc::new(reservation);
        let recipients: Arc<[String]> = restaurant_recipients.into();

        let spawn = |kind: NotificationKind| {
            let notifier = self.clone();
            let reservation = Arc::clone(&reservation);
            let recipients = Arc::clone(&recipients);
            tokio::spawn(async move { notifier.send(kind, &reservation, &recipients).await })
        };

        PendingNotifications {
            restaurant_request: spawn(NotificationKind::RestaurantRequest),
            customer_confirmation: spawn(NotificationKind::CustomerConfirmation),
        }
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("provider", &self.provider.name())
            .field("config", &self.config)
            .finish()
    }
}

fn body_for(
    strategy: BodyStrategy,
    kind: NotificationKind,
    reservation: &ValidReservation,
) -> EmailBody {
    match (strategy, kind) {
        (BodyStrategy::Template(template_id), _) => EmailBody::Templated {
            template_id,
            params: render::template_params(reservation),
        },
        (BodyStrategy::Inline, NotificationKind::RestaurantRequest) => {
            render::restaurant_request_inline(reservation)
        }
        (BodyStrategy::Inline, NotificationKind::CustomerConfirmation) => {
            render::customer_confirmation_inline(reservation)
        }
    }
}

fn record(kind: NotificationKind, outcome: &SendOutcome) {
    metrics::counter!(
        "supperclub_notifications_total",
        "kind" => kind.as_str(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)] // Test code
mod tests {
    use super::*;
    use crate::mocks::MockEmailProvider;
    use crate::providers::UnconfiguredEmailProvider;
    use chrono::NaiveDate;
    use std::time::Duration;
    use supperclub_core::MealType;

    fn reservation() -> ValidReservation {
        ValidReservation {
            party_size: 2,
            meal_type: MealType::Dinner,
            date: NaiveDate::from_ymd_opt(2999, 1, 1).unwrap(),
            time: "19:00".to_string(),
            email: "a.b@x.com".to_string(),
            phone: "555".to_string(),
            customer_name: "A B".to_string(),
            special_requests: None,
        }
    }

    fn config(strategy: BodyStrategy) -> NotifierConfig {
        NotifierConfig {
            sender: Mailbox::named("reservations@example.com", "Supper Club"),
            restaurant_request: strategy,
            customer_confirmation: strategy,
        }
    }

    #[tokio::test]
    async fn test_dispatch_sends_both_emails() {
        let provider = MockEmailProvider::new();
        let notifier = Notifier::new(Arc::new(provider.clone()), config(BodyStrategy::Inline));

        let report = notifier
            .dispatch(reservation(), vec!["host@example.com".to_string()])
            .wait()
            .await;

        assert!(report.all_succeeded());
        assert_eq!(provider.sent_count(), 2);

        let to_restaurant = provider.sent_to("host@example.com");
        assert_eq!(to_restaurant.len(), 1);
        assert_eq!(
            to_restaurant[0].reply_to.as_ref().map(|m| m.email.as_str()),
            Some("a.b@x.com")
        );

        let to_customer = provider.sent_to("a.b@x.com");
        assert_eq!(to_customer.len(), 1);
        assert_eq!(to_customer[0].to[0].name.as_deref(), Some("A B"));
    }

    #[tokio::test]
    async fn test_empty_recipients_skip_restaurant_email() {
        let provider = MockEmailProvider::new();
        let notifier = Notifier::new(Arc::new(provider.clone()), config(BodyStrategy::Inline));

        let report = notifier.dispatch(reservation(), Vec::new()).wait().await;

        assert!(matches!(
            report.restaurant_request,
            SendOutcome::Skipped { .. }
        ));
        assert!(report.restaurant_request.is_success());
        assert!(matches!(report.customer_confirmation, SendOutcome::Sent { .. }));
        assert_eq!(provider.sent_count(), 1);
    }

    #[tokio::test]
    async fn test_failures_are_independent() {
        let provider = MockEmailProvider::new().failing_for("host@example.com");
        let notifier = Notifier::new(Arc::new(provider.clone()), config(BodyStrategy::Inline));

        let report = notifier
            .dispatch(reservation(), vec!["host@example.com".to_string()])
            .wait()
            .await;

        assert!(matches!(report.restaurant_request, SendOutcome::Failed { .. }));
        assert!(matches!(report.customer_confirmation, SendOutcome::Sent { .. }));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_reports_failure() {
        let notifier = Notifier::new(
            Arc::new(UnconfiguredEmailProvider::new()),
            config(BodyStrategy::Inline),
        );

        let outcome = notifier
            .send(NotificationKind::CustomerConfirmation, &reservation(), &[])
            .await;

        assert_eq!(
            outcome,
            SendOutcome::Failed {
                error: EmailError::MissingApiKey
            }
        );
    }

    #[tokio::test]
    async fn test_template_strategy_uses_params() {
        let provider = MockEmailProvider::new();
        let notifier = Notifier::new(
            Arc::new(provider.clone()),
            NotifierConfig {
                restaurant_request: BodyStrategy::Template(11),
                ..config(BodyStrategy::Inline)
            },
        );

        notifier
            .dispatch(reservation(), vec!["host@example.com".to_string()])
            .wait()
            .await;

        let sent = provider.sent_to("host@example.com");
        let EmailBody::Templated {
            template_id,
            params,
        } = &sent[0].body
        else {
            panic!("expected templated body");
        };
        assert_eq!(*template_id, 11);
        assert_eq!(params["guests"], "2 guests");

        let sent = provider.sent_to("a.b@x.com");
        assert!(matches!(sent[0].body, EmailBody::Inline { .. }));
    }

    #[tokio::test]
    async fn test_sends_continue_after_wait_is_abandoned() {
        let provider = MockEmailProvider::new().with_delay(Duration::from_millis(100));
        let notifier = Notifier::new(Arc::new(provider.clone()), config(BodyStrategy::Inline));

        let pending = notifier.dispatch(reservation(), vec!["host@example.com".to_string()]);
        let waited = tokio::time::timeout(Duration::from_millis(10), pending.wait()).await;
        assert!(waited.is_err());

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(provider.sent_count(), 2);
    }

    #[test]
    fn test_body_strategy_from_template_id() {
        assert_eq!(BodyStrategy::from_template_id(Some(3)), BodyStrategy::Template(3));
        assert_eq!(BodyStrategy::from_template_id(None), BodyStrategy::Inline);
        assert_eq!(BodyStrategy::Template(3).to_string(), "template #3");
    }
}
