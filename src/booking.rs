use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;
use validator::ValidateEmail;

pub const NAME_REQUIRED: &str = "Name is required";
pub const BUSINESS_NAME_REQUIRED: &str = "Business name is required";
pub const BUSINESS_LINK_REQUIRED: &str = "Business website is required";
pub const INDUSTRY_REQUIRED: &str = "Industry is required";
pub const INVALID_EMAIL: &str = "Please enter a valid email";
pub const CONTACT_REQUIRED: &str = "Please provide at least an email or phone number";

/// The form exactly as the page posts it. Missing keys are empty strings,
/// so `RawFormValues::default()` doubles as the reset state of the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFormValues {
    #[serde(deserialize_with = "empty_if_null")]
    pub name: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub business_name: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub business_link: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub email: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub phone_number: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub industry: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub target_audience: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub key_message: String,
    #[serde(deserialize_with = "empty_if_null")]
    pub visual_references: String,
}

// `null` is how some clients send a blank field
fn empty_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    BusinessName,
    BusinessLink,
    Email,
    PhoneNumber,
    Industry,
    TargetAudience,
    KeyMessage,
    VisualReferences,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::BusinessName,
        Field::BusinessLink,
        Field::Email,
        Field::PhoneNumber,
        Field::Industry,
        Field::TargetAudience,
        Field::KeyMessage,
        Field::VisualReferences,
    ];

    /// Key used on the wire and in field error maps.
    pub fn wire_name(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::BusinessName => "businessName",
            Field::BusinessLink => "businessLink",
            Field::Email => "email",
            Field::PhoneNumber => "phoneNumber",
            Field::Industry => "industry",
            Field::TargetAudience => "targetAudience",
            Field::KeyMessage => "keyMessage",
            Field::VisualReferences => "visualReferences",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

pub type FieldErrors = BTreeMap<Field, String>;

/// One message per offending field. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("booking form has {} invalid field(s)", .errors.len())]
pub struct ValidationError {
    pub errors: FieldErrors,
}

impl ValidationError {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }
}

/// A booking that passed validation. Empty optional fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub name: String,
    pub business_name: String,
    pub business_link: String,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub industry: String,
    pub target_audience: Option<String>,
    pub key_message: Option<String>,
    pub visual_references: Option<String>,
}

/// Syntax check plus a dotted domain ending in an alphabetic TLD of two or
/// more letters, so `jo@localhost` and `jo@[127.0.0.1]` are refused.
fn is_valid_email(value: &str) -> bool {
    if !value.validate_email() {
        return false;
    }
    let Some((_, domain)) = value.rsplit_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((host, tld)) => {
            !host.is_empty() && tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic())
        }
        None => false,
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn validate(input: &RawFormValues) -> Result<BookingRequest, ValidationError> {
    let mut errors = FieldErrors::new();

    let required = [
        (Field::Name, &input.name, NAME_REQUIRED),
        (Field::BusinessName, &input.business_name, BUSINESS_NAME_REQUIRED),
        (Field::BusinessLink, &input.business_link, BUSINESS_LINK_REQUIRED),
        (Field::Industry, &input.industry, INDUSTRY_REQUIRED),
    ];
    for (field, value, message) in required {
        if value.is_empty() {
            errors.insert(field, message.to_string());
        }
    }

    if !input.email.is_empty() && !is_valid_email(&input.email) {
        errors.insert(Field::Email, INVALID_EMAIL.to_string());
    }

    // cross-field rule goes last and lands on the email field
    if input.email.is_empty() && input.phone_number.is_empty() {
        errors.insert(Field::Email, CONTACT_REQUIRED.to_string());
    }

    if !errors.is_empty() {
        debug!("Booking form rejected: {:?}", errors);
        return Err(ValidationError { errors });
    }

    Ok(BookingRequest {
        name: input.name.clone(),
        business_name: input.business_name.clone(),
        business_link: input.business_link.clone(),
        email: non_empty(&input.email),
        phone_number: non_empty(&input.phone_number),
        industry: input.industry.clone(),
        target_audience: non_empty(&input.target_audience),
        key_message: non_empty(&input.key_message),
        visual_references: non_empty(&input.visual_references),
    })
}
