pub mod api;
pub mod booking;
pub mod config;
pub mod form;
pub mod intake;
pub mod webhook;

pub use booking::{validate, BookingRequest, Field, FieldErrors, RawFormValues, ValidationError};
pub use intake::{IntakeDesk, Notification, Outcome, Variant};
pub use webhook::{SubmissionError, WebhookClient, WebhookPayload};
