//! Field-level validation for JSON request bodies.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use url::Url;

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

/// One failed check on a named request field. Serialized into the 400
/// envelope's `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Request bodies checked after deserialization, before the handler runs.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

/// Loose shape check: something@something.tld, no whitespace, at most
/// 254 bytes.
pub fn is_valid_email(value: &str) -> bool {
    let regex = EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
    value.len() <= 254 && regex.is_match(value)
}

/// Accepts absolute http(s) URLs only.
pub fn is_valid_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

pub fn require_non_empty(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
}

pub fn require_min_chars(errors: &mut Vec<FieldError>, field: &'static str, value: &str, min: usize) {
    if value.chars().count() < min {
        errors.push(FieldError::new(
            field,
            format!("must be at least {min} characters"),
        ));
    }
}

pub fn require_max_chars(errors: &mut Vec<FieldError>, field: &'static str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.push(FieldError::new(
            field,
            format!("must be at most {max} characters"),
        ));
    }
}
