//! Typed request bodies for the JSON API.
//!
//! Every body is deserialized into one of these structs and then run
//! through [`Validate`], by the `ValidatedJson` extractor on most
//! routes and by the setup handler itself once the setup key has been
//! judged. Wire field names are camelCase.

use serde::Deserialize;
use serde_json::Value;

use crate::types::validate::{
    FieldError, Validate, is_valid_email, is_valid_http_url, require_max_chars, require_min_chars,
    require_non_empty,
};

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "username", &self.username);
        require_non_empty(&mut errors, "password", &self.password);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Checked against the configured shared secret in the handler, so a
    /// missing key fails with 403 rather than 400.
    #[serde(default)]
    pub setup_key: String,
}

impl Validate for SetupRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "username", &self.username);
        require_non_empty(&mut errors, "password", &self.password);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Body of `PUT /api/admin/content/{key}`. The section key comes from
/// the path; a `key` field in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionBody {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub content: Option<String>,
    pub cta_label: Option<String>,
    pub cta_url: Option<String>,
    pub metadata: Option<Value>,
}

impl Validate for SectionBody {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            require_max_chars(&mut errors, "title", title, 300);
        }
        if let Some(subtitle) = &self.subtitle {
            require_max_chars(&mut errors, "subtitle", subtitle, 500);
        }
        if let Some(content) = &self.content {
            require_max_chars(&mut errors, "content", content, 20_000);
        }
        if let Some(label) = &self.cta_label {
            require_max_chars(&mut errors, "ctaLabel", label, 120);
        }
        if let Some(url) = &self.cta_url {
            require_max_chars(&mut errors, "ctaUrl", url, 2_048);
            // Admin forms submit "" for an unset link; only reject a
            // value that claims to be a URL and isn't.
            if !url.is_empty() && !is_valid_http_url(url) {
                errors.push(FieldError::new("ctaUrl", "must be an absolute http(s) URL"));
            }
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialCreate {
    #[serde(default)]
    pub quote: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub company: String,
    #[serde(default = "default_true")]
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: i64,
}

impl Validate for TestimonialCreate {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_non_empty(&mut errors, "quote", &self.quote);
        require_non_empty(&mut errors, "name", &self.name);
        require_non_empty(&mut errors, "role", &self.role);
        require_non_empty(&mut errors, "company", &self.company);
        require_max_chars(&mut errors, "quote", &self.quote, 2_000);
        require_max_chars(&mut errors, "name", &self.name, 200);
        require_max_chars(&mut errors, "role", &self.role, 200);
        require_max_chars(&mut errors, "company", &self.company, 200);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Partial update: `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialPatch {
    pub quote: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub is_featured: Option<bool>,
    pub display_order: Option<i64>,
}

impl Validate for TestimonialPatch {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(quote) = &self.quote {
            require_non_empty(&mut errors, "quote", quote);
            require_max_chars(&mut errors, "quote", quote, 2_000);
        }
        if let Some(name) = &self.name {
            require_non_empty(&mut errors, "name", name);
            require_max_chars(&mut errors, "name", name, 200);
        }
        if let Some(role) = &self.role {
            require_non_empty(&mut errors, "role", role);
            require_max_chars(&mut errors, "role", role, 200);
        }
        if let Some(company) = &self.company {
            require_non_empty(&mut errors, "company", company);
            require_max_chars(&mut errors, "company", company, 200);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactInfoBody {
    pub headline: Option<String>,
    pub description: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub support_email: Option<String>,
    pub address: Option<String>,
    pub office_hours: Option<String>,
}

impl Validate for ContactInfoBody {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if let Some(headline) = &self.headline {
            require_max_chars(&mut errors, "headline", headline, 300);
        }
        if let Some(description) = &self.description {
            require_max_chars(&mut errors, "description", description, 2_000);
        }
        if let Some(phone) = &self.phone {
            require_max_chars(&mut errors, "phone", phone, 300);
        }
        if let Some(email) = &self.email {
            if !email.is_empty() && !is_valid_email(email) {
                errors.push(FieldError::new("email", "must be a valid email address"));
            }
        }
        if let Some(support_email) = &self.support_email {
            if !support_email.is_empty() && !is_valid_email(support_email) {
                errors.push(FieldError::new(
                    "supportEmail",
                    "must be a valid email address",
                ));
            }
        }
        if let Some(address) = &self.address {
            require_max_chars(&mut errors, "address", address, 300);
        }
        if let Some(office_hours) = &self.office_hours {
            require_max_chars(&mut errors, "officeHours", office_hours, 300);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

/// Public contact form payload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub company: Option<String>,
    pub service_interest: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl Validate for ContactForm {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        require_min_chars(&mut errors, "name", &self.name, 2);
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }
        require_min_chars(&mut errors, "message", &self.message, 10);
        if let Some(company) = &self.company {
            require_max_chars(&mut errors, "company", company, 200);
        }
        if let Some(interest) = &self.service_interest {
            require_max_chars(&mut errors, "serviceInterest", interest, 200);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
