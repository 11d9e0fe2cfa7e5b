use crate::booking::BookingRequest;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, error, info};

pub const NETWORK_FAILURE_MESSAGE: &str = "Failed to submit the form. Please try again.";

/// Body sent to the webhook. Every key is always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    pub name: String,
    pub business_name: String,
    pub business_link: String,
    pub email: String,
    pub phone_number: String,
    pub industry: String,
    pub target_audience: String,
    pub key_message: String,
    pub visual_references: String,
    pub timestamp: String,
}

impl WebhookPayload {
    pub fn new(request: &BookingRequest, submitted_at: DateTime<Utc>) -> Self {
        let or_empty = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            name: request.name.clone(),
            business_name: request.business_name.clone(),
            business_link: request.business_link.clone(),
            email: or_empty(&request.email),
            phone_number: or_empty(&request.phone_number),
            industry: request.industry.clone(),
            target_audience: or_empty(&request.target_audience),
            key_message: or_empty(&request.key_message),
            visual_references: or_empty(&request.visual_references),
            // 2024-05-01T12:00:00.000Z
            timestamp: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("Failed to submit form: {}", .status.as_u16())]
    Status { status: StatusCode, body: String },
    #[error("{}", NETWORK_FAILURE_MESSAGE)]
    Network(#[source] reqwest::Error),
}

impl SubmissionError {
    pub fn is_network_failure(&self) -> bool {
        matches!(self, SubmissionError::Network(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SubmissionError::Status { status, .. } => Some(*status),
            SubmissionError::Network(_) => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            SubmissionError::Status { body, .. } => Some(body),
            SubmissionError::Network(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    endpoint: Url,
}

impl WebhookClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    /// Posts the booking once. Any 2xx is success and the body is ignored.
    pub async fn submit(&self, request: &BookingRequest) -> Result<(), SubmissionError> {
        let payload = WebhookPayload::new(request, Utc::now());
        debug!("Posting booking payload: {:?}", payload);

        // .json() sets Content-Type: application/json
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("Form submission error: {}", e);
                SubmissionError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Server error: {} {}", status.as_u16(), body);
            return Err(SubmissionError::Status { status, body });
        }

        info!(
            "Booking for {} forwarded to webhook ({})",
            payload.business_name,
            status.as_u16()
        );
        Ok(())
    }
}
