//! Candidate notification — shortlist policy plus the outbound mail transport.

pub mod smtp;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::Config;

pub use smtp::SmtpNotifier;

/// Candidates scoring at or above this are invited to interview.
pub const SHORTLIST_THRESHOLD: f64 = 80.0;

pub const SHORTLIST_SUBJECT: &str = "Interview Invitation";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Could not build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError>;
}

/// Used when no SMTP relay is configured: logs the message instead of sending it.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<(), NotifyError> {
        info!(
            recipient,
            subject,
            body_len = body.len(),
            "SMTP not configured, notification logged only"
        );
        Ok(())
    }
}

pub fn build_notifier(config: &Config) -> anyhow::Result<Arc<dyn Notifier>> {
    match &config.smtp {
        Some(smtp) => {
            info!("Notifier: SMTP relay {}:{}", smtp.host, smtp.port);
            Ok(Arc::new(SmtpNotifier::new(smtp)?))
        }
        None => {
            info!("Notifier: SMTP_HOST not set, notifications will be logged");
            Ok(Arc::new(LogNotifier))
        }
    }
}

/// What happened to the candidate notification for one screening.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "recipient", rename_all = "snake_case")]
pub enum NotificationOutcome {
    Sent(String),
    Failed(String),
    BelowThreshold,
    NoContact,
}

impl NotificationOutcome {
    pub fn message(&self) -> String {
        match self {
            NotificationOutcome::Sent(to) => format!("Email sent to {to}."),
            NotificationOutcome::Failed(to) => format!("Failed to send email to {to}."),
            NotificationOutcome::BelowThreshold => {
                "Match score below threshold. No email sent.".to_string()
            }
            NotificationOutcome::NoContact => "No email address found in CV.".to_string(),
        }
    }
}

pub fn is_shortlisted(score: f64) -> bool {
    score >= SHORTLIST_THRESHOLD
}

pub fn shortlist_body(score: f64) -> String {
    format!(
        "Dear Candidate,\n\n\
         We are pleased to inform you that your application for the position has been \
         shortlisted based on a match score of {score:.2}%.\n\n\
         Please let us know your availability for the interview.\n\n\
         Best regards,\n\
         Recruitment Team"
    )
}

/// Invites the candidate when shortlisted. A failed send is logged and
/// reported in the outcome; it never fails the caller.
pub async fn notify_if_shortlisted(
    notifier: &dyn Notifier,
    contact: Option<&str>,
    score: f64,
) -> NotificationOutcome {
    let Some(recipient) = contact else {
        return NotificationOutcome::NoContact;
    };
    if !is_shortlisted(score) {
        return NotificationOutcome::BelowThreshold;
    }

    match notifier
        .send(recipient, SHORTLIST_SUBJECT, &shortlist_body(score))
        .await
    {
        Ok(()) => {
            info!("Interview invitation sent to {recipient}");
            NotificationOutcome::Sent(recipient.to_string())
        }
        Err(e) => {
            warn!("Failed to send interview invitation to {recipient}: {e}");
            NotificationOutcome::Failed(recipient.to_string())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(is_shortlisted(80.0));
        assert!(is_shortlisted(100.0));
        assert!(!is_shortlisted(79.99));
    }

    #[test]
    fn test_body_formats_score_two_decimals() {
        let body = shortlist_body(84.0);
        assert!(body.contains("match score of 84.00%"));
        assert!(body.starts_with("Dear Candidate,"));
        assert!(body.ends_with("Recruitment Team"));
    }

    #[tokio::test]
    async fn test_sends_when_shortlisted() {
        let notifier = RecordingNotifier::default();
        let outcome = notify_if_shortlisted(&notifier, Some("a@b.com"), 88.0).await;
        assert_eq!(outcome, NotificationOutcome::Sent("a@b.com".into()));
        assert_eq!(outcome.message(), "Email sent to a@b.com.");

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "a@b.com");
        assert_eq!(sent[0].1, "Interview Invitation");
    }

    #[tokio::test]
    async fn test_skips_below_threshold() {
        let notifier = RecordingNotifier::default();
        let outcome = notify_if_shortlisted(&notifier, Some("a@b.com"), 8.0).await;
        assert_eq!(outcome, NotificationOutcome::BelowThreshold);
        assert_eq!(outcome.message(), "Match score below threshold. No email sent.");
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_no_contact_wins_over_score() {
        let notifier = RecordingNotifier::default();
        let outcome = notify_if_shortlisted(&notifier, None, 100.0).await;
        assert_eq!(outcome, NotificationOutcome::NoContact);
        assert_eq!(outcome.message(), "No email address found in CV.");
    }

    #[tokio::test]
    async fn test_send_failure_is_reported_not_fatal() {
        let notifier = RecordingNotifier {
            fail: true,
            ..Default::default()
        };
        let outcome = notify_if_shortlisted(&notifier, Some("a@b.com"), 90.0).await;
        assert_eq!(outcome, NotificationOutcome::Failed("a@b.com".into()));
        assert_eq!(outcome.message(), "Failed to send email to a@b.com.");
    }

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        assert!(LogNotifier.send("a@b.com", "s", "b").await.is_ok());
    }
}
