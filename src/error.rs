use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

// =========================================================
// Authentication
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Email and password are required")]
    MissingCredentials,
}

// =========================================================
// HTTP
// =========================================================

pub const NETWORK_ERROR_MESSAGE: &str = "network error";

/// Normalised failure of one REST call.
///
/// `status == 0` means no response was received.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
pub struct HttpError {
    pub status: u16,
    pub message: String,
}

impl HttpError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn network() -> Self {
        Self::new(0, NETWORK_ERROR_MESSAGE)
    }

    /// Message used when a failed response carries no readable reason.
    pub fn fallback(status: u16) -> Self {
        Self::new(status, format!("Request failed with status {}", status))
    }

    pub fn is_network(&self) -> bool {
        self.status == 0
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

// =========================================================
// Resources
// =========================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResourceError {
    #[error(transparent)]
    Http(#[from] HttpError),
    #[error("unexpected {resource} payload: {detail}")]
    Schema {
        resource: &'static str,
        detail: String,
    },
    #[error("page {requested} is outside 1..={total_pages}")]
    PageOutOfRange { requested: u32, total_pages: u32 },
    #[error("{resource} cannot be filtered by `{key}`")]
    UnknownFilter { resource: &'static str, key: String },
    #[error("{resource} cannot be sorted by `{field}`")]
    UnsortableField {
        resource: &'static str,
        field: String,
    },
    #[error("{resource} has no active flag")]
    NotToggleable { resource: &'static str },
}

impl ResourceError {
    /// HTTP status when the failure came from the backend.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResourceError::Http(e) => Some(e.status),
            _ => None,
        }
    }
}

// =========================================================
// Validation
// =========================================================

/// Field-level validation failures keyed by form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

/// Outcome of submitting a dialog form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("please correct the highlighted fields")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Remote(#[from] ResourceError),
    #[error(transparent)]
    Upload(#[from] UploadError),
}

// =========================================================
// Uploads
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("image upload is not available")]
    Unsupported,
    #[error("`{0}` is not an image")]
    NotAnImage(String),
    #[error("upload failed: {0}")]
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_errors_use_status_zero() {
        let err = HttpError::network();
        assert!(err.is_network());
        assert_eq!(err.to_string(), NETWORK_ERROR_MESSAGE);
    }

    #[test]
    fn field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "required");
        errors.insert("name", "too long");
        assert_eq!(errors.get("name"), Some("required"));
        assert_eq!(errors.to_string(), "name: required");
        assert!(errors.into_result().is_err());
    }
}
