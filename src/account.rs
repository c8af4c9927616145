//! Account wire types
//!
//! These mirror the JSON shapes exchanged with the account endpoint. The
//! backend assigns `id` on creation; an account without an id has not been
//! persisted yet.

use serde::{Deserialize, Serialize};

/// A persisted account record as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Server-assigned identifier; empty until the account is persisted
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub mobileno: String,
}

impl Account {
    /// Whether this record has been assigned an id by the backend
    pub fn is_persisted(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Draft for a not-yet-persisted account, collected by the add form.
///
/// `confirm_password` only exists during the add flow and is never sent to
/// the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccountDraft {
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    pub mobileno: String,
}

impl AccountDraft {
    /// Reset all fields, returning the draft to its initial state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Body of a DELETE request: `{"id": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_never_serializes_confirm_password() {
        let draft = AccountDraft {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "Secr3t!pw".to_string(),
            confirm_password: "Secr3t!pw".to_string(),
            mobileno: "1234567890".to_string(),
        };

        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("confirm_password").is_none());
        assert!(json.get("confirmPassword").is_none());
        assert_eq!(json["firstname"], "Ada");
        assert_eq!(json["mobileno"], "1234567890");
    }

    #[test]
    fn test_account_without_id_is_not_persisted() {
        let account: Account = serde_json::from_str(r#"{"firstname":"Ada"}"#).unwrap();
        assert!(!account.is_persisted());
        assert_eq!(account.firstname, "Ada");
        assert!(account.lastname.is_empty());
    }

    #[test]
    fn test_delete_request_shape() {
        let body = DeleteRequest {
            id: "42".to_string(),
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"id":"42"}"#);
    }
}
