//! Client records.
//!
//! # Invariants
//! - `email` matches the simple `local@domain` pattern.
//! - `name` is never blank.
//! - A client owns its projects; deleting it removes them.

use super::validation::{validate_email, validate_required, ValidationError};
use super::ClientId;
use serde::{Deserialize, Serialize};

/// Persisted client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Client {
    /// Overwrites the fields set in `patch`, leaving the rest untouched.
    pub fn apply(&mut self, patch: &ClientPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_client_fields(&self.name, &self.email)
    }
}

/// Input for creating a client; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewClient {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_client_fields(&self.name, &self.email)
    }
}

/// Partial update for a client. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ClientPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

fn validate_client_fields(name: &str, email: &str) -> Result<(), ValidationError> {
    validate_required("name", name)?;
    validate_email(email)
}

#[cfg(test)]
mod tests {
    use super::{Client, ClientPatch, NewClient};
    use crate::model::validation::ValidationError;

    #[test]
    fn apply_only_overwrites_supplied_fields() {
        let mut client = Client {
            id: 1,
            name: "Acme".to_string(),
            email: "a@acme.com".to_string(),
            phone: "555-0100".to_string(),
        };
        client.apply(&ClientPatch {
            phone: Some("555-0199".to_string()),
            ..ClientPatch::default()
        });

        assert_eq!(client.name, "Acme");
        assert_eq!(client.email, "a@acme.com");
        assert_eq!(client.phone, "555-0199");
    }

    #[test]
    fn new_client_requires_valid_email() {
        let err = NewClient::new("Acme", "not-an-email", "").validate().unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail("not-an-email".to_string()));
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ClientPatch::default().is_empty());
        assert!(!ClientPatch {
            name: Some("x".to_string()),
            ..ClientPatch::default()
        }
        .is_empty());
    }
}
