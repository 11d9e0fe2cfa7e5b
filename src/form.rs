//! Static description of the booking page, enough for a client to render it.

use crate::booking::Field;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Textarea,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldLayout {
    pub field: Field,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub kind: InputKind,
    /// Marked with `*` on the page. Email and phone are covered by the contact hint instead.
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLayout {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub fields: Vec<FieldLayout>,
    pub contact_hint: &'static str,
    pub submit_label: &'static str,
    pub submitting_label: &'static str,
}

impl FormLayout {
    pub fn field(&self, field: Field) -> Option<&FieldLayout> {
        self.fields.iter().find(|layout| layout.field == field)
    }
}

fn describe(field: Field) -> FieldLayout {
    let (label, placeholder, kind, required) = match field {
        Field::Name => ("Name *", "Your full name", InputKind::Text, true),
        Field::BusinessName => ("Business Name *", "Your business name", InputKind::Text, true),
        Field::BusinessLink => (
            "Business Website *",
            "yourbusiness.com",
            InputKind::Text,
            true,
        ),
        Field::Email => ("Email Address", "your@email.com", InputKind::Email, false),
        Field::PhoneNumber => ("Phone Number", "+1 (555) 000-0000", InputKind::Tel, false),
        Field::Industry => (
            "Industry *",
            "e.g., Technology, Healthcare, Finance",
            InputKind::Text,
            true,
        ),
        Field::TargetAudience => (
            "Current Target Audience (Optional)",
            "Describe your target audience...",
            InputKind::Textarea,
            false,
        ),
        Field::KeyMessage => (
            "Key Message to Communicate (Optional)",
            "What message do you want to convey?",
            InputKind::Textarea,
            false,
        ),
        Field::VisualReferences => (
            "Visual References/Examples (Optional)",
            "Paste links to visual references or examples...",
            InputKind::Textarea,
            false,
        ),
    };
    FieldLayout {
        field,
        label,
        placeholder,
        kind,
        required,
    }
}

pub fn layout() -> FormLayout {
    FormLayout {
        title: "Book Your Campaign",
        subtitle: "Fill out the form below to get started",
        fields: Field::ALL.into_iter().map(describe).collect(),
        contact_hint: "* At least one contact method (email or phone) is required",
        submit_label: "Submit Booking Request",
        submitting_label: "Submitting...",
    }
}
