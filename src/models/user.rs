//! Persisted user record.
//!
//! Only the document shape lives here; storing and querying users belongs
//! to whatever persistence layer hosts the application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from [`UserRecord::validate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    #[error("user field `{0}` is required")]
    MissingField(&'static str),

    #[error("invalid email address `{0}`")]
    InvalidEmail(String),
}

/// A user as stored in the document database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Identifier issued by the authentication provider.
    pub identity_id: String,
    pub email: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Avatar URL.
    pub photo: String,
    #[serde(default = "default_plan_id")]
    pub plan_id: u32,
    #[serde(default = "default_credit_balance")]
    pub credit_balance: u32,
}

fn default_plan_id() -> u32 {
    1
}

fn default_credit_balance() -> u32 {
    10
}

impl UserRecord {
    /// A new user on the default plan with the starting credit balance.
    pub fn new(
        identity_id: impl Into<String>,
        email: impl Into<String>,
        username: impl Into<String>,
        photo: impl Into<String>,
    ) -> Self {
        Self {
            identity_id: identity_id.into(),
            email: email.into(),
            username: username.into(),
            first_name: None,
            last_name: None,
            photo: photo.into(),
            plan_id: default_plan_id(),
            credit_balance: default_credit_balance(),
        }
    }

    pub fn validate(&self) -> Result<(), UserError> {
        let required = [
            ("identityId", &self.identity_id),
            ("email", &self.email),
            ("username", &self.username),
            ("photo", &self.photo),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.trim().is_empty()) {
            return Err(UserError::MissingField(*field));
        }
        if !self.email.contains('@') {
            return Err(UserError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// Whether the balance covers a charge of `cost` credits.
    pub fn can_afford(&self, cost: u32) -> bool {
        self.credit_balance >= cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserRecord {
        UserRecord::new("user_2abc", "ada@example.com", "ada", "https://img.example/ada.png")
    }

    #[test]
    fn new_user_gets_defaults() {
        let user = user();
        assert_eq!(user.plan_id, 1);
        assert_eq!(user.credit_balance, 10);
        assert!(user.validate().is_ok());
    }

    #[test]
    fn deserialize_applies_defaults() {
        let json = r#"{
            "identityId": "user_1",
            "email": "a@b.c",
            "username": "a",
            "photo": "p.png"
        }"#;
        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert_eq!(user.plan_id, 1);
        assert_eq!(user.credit_balance, 10);
        assert!(user.first_name.is_none());
    }

    #[test]
    fn serialize_uses_camel_case_and_skips_missing_names() {
        let value = serde_json::to_value(user()).unwrap();
        assert_eq!(value["identityId"], "user_2abc");
        assert_eq!(value["creditBalance"], 10);
        assert!(value.get("firstName").is_none());
    }

    #[test]
    fn validate_reports_first_missing_field() {
        let mut user = user();
        user.username = " ".to_string();
        user.photo.clear();
        assert_eq!(user.validate(), Err(UserError::MissingField("username")));
    }

    #[test]
    fn validate_rejects_malformed_email() {
        let mut user = user();
        user.email = "not-an-email".to_string();
        assert!(matches!(user.validate(), Err(UserError::InvalidEmail(_))));
    }

    #[test]
    fn can_afford_compares_balance() {
        let mut user = user();
        assert!(user.can_afford(10));
        user.credit_balance = 0;
        assert!(!user.can_afford(1));
        assert!(user.can_afford(0));
    }
}
