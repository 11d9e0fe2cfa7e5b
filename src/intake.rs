use crate::booking::{self, RawFormValues, ValidationError};
use crate::webhook::{SubmissionError, WebhookClient, NETWORK_FAILURE_MESSAGE};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Default,
    Destructive,
}

/// A toast for the page: `notify(title, description, variant)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success() -> Self {
        Self {
            title: "Success!".to_string(),
            description: "Your booking request has been submitted successfully.".to_string(),
            variant: Variant::Default,
        }
    }

    pub fn failure(err: &SubmissionError) -> Self {
        Self {
            title: "Error".to_string(),
            description: err.to_string(),
            variant: Variant::Destructive,
        }
    }

    pub fn fallback() -> Self {
        Self {
            title: "Error".to_string(),
            description: NETWORK_FAILURE_MESSAGE.to_string(),
            variant: Variant::Destructive,
        }
    }

    pub fn busy() -> Self {
        Self {
            title: "Please wait".to_string(),
            description: "Your booking request is still being submitted.".to_string(),
            variant: Variant::Destructive,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// Nothing was sent; errors go next to the fields.
    Invalid(ValidationError),
    Busy,
    Sent(Notification),
    Failed(SubmissionError, Notification),
}

/// Owns the single in-flight flag and runs validate then submit.
pub struct IntakeDesk {
    webhook: WebhookClient,
    submitting: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn claim(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight(flag))
    }
}

// released on every path, including a dropped future
impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl IntakeDesk {
    pub fn new(webhook: WebhookClient) -> Self {
        Self {
            webhook,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub async fn submit(&self, raw: RawFormValues) -> Outcome {
        let request = match booking::validate(&raw) {
            Ok(request) => request,
            Err(errors) => return Outcome::Invalid(errors),
        };

        let Some(_guard) = InFlight::claim(&self.submitting) else {
            debug!("Rejecting submission, another one is in flight");
            return Outcome::Busy;
        };

        match self.webhook.submit(&request).await {
            Ok(()) => {
                info!("Booking request from {} submitted", request.name);
                Outcome::Sent(Notification::success())
            }
            Err(err) => {
                let notification = Notification::failure(&err);
                Outcome::Failed(err, notification)
            }
        }
    }
}
