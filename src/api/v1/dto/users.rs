/*
 * Responsibility
 * - Users request/response DTOs with validate() for shape checks
 * - UserResponse::for_caller applies the field-read decisions: a denied
 *   field is omitted from the JSON, never an error
 */
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{UserRecord, UserState};
use crate::policy::{self, AuthContext, UserField};

const PASSWORD_MIN_CHARS: usize = 8;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub state: Option<UserState>,
    pub is_admin: Option<bool>,
}

// Hand-written for the same reason as UserRecord: the plaintext must not
// end up in logs via {:?}.
impl fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("state", &self.state)
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

impl CreateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err("email must be a valid address");
        }
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            return Err("password must be at least 8 characters");
        }
        Ok(())
    }
}

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub state: Option<UserState>,
    pub is_admin: Option<bool>,
}

impl fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("state", &self.state)
            .field("is_admin", &self.is_admin)
            .finish()
    }
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if let Some(name) = &self.name
            && name.trim().is_empty()
        {
            return Err("name cannot be empty");
        }
        if let Some(email) = &self.email
            && (email.trim().is_empty() || !email.contains('@'))
        {
            return Err("email must be a valid address");
        }
        if let Some(password) = &self.password
            && password.chars().count() < PASSWORD_MIN_CHARS
        {
            return Err("password must be at least 8 characters");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub state: UserState,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    // Presence only; there is no code path that serializes the hash.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_is_set: Option<bool>,
}

impl UserResponse {
    /// Serialize `record` as seen by `ctx`: restricted fields appear only
    /// when the read decision allows.
    pub fn for_caller(record: UserRecord, ctx: &AuthContext) -> Self {
        let email = policy::can_read_field(UserField::Email, ctx, &record)
            .then(|| record.email.clone());
        let password_is_set = policy::can_read_field(UserField::Password, ctx, &record)
            .then(|| record.password_is_set());

        Self {
            id: record.id,
            name: record.name,
            state: record.state,
            is_admin: record.is_admin,
            created_at: record.created_at,
            email,
            password_is_set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: Uuid, is_admin: bool) -> UserRecord {
        UserRecord {
            id,
            name: "n".into(),
            email: "n@example.com".into(),
            state: UserState::Active,
            is_admin,
            password_hash: "$argon2id$stub".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn own_record_shows_email_but_not_password_state() {
        let id = Uuid::from_u128(7);
        let ctx = AuthContext::authenticated(record(id, false));
        let body =
            serde_json::to_value(UserResponse::for_caller(record(id, false), &ctx)).unwrap();
        assert_eq!(body["email"], "n@example.com");
        assert!(body.get("password_is_set").is_none());
    }

    #[test]
    fn strangers_record_omits_email_entirely() {
        let ctx = AuthContext::authenticated(record(Uuid::from_u128(1), false));
        let body = serde_json::to_value(UserResponse::for_caller(
            record(Uuid::from_u128(2), false),
            &ctx,
        ))
        .unwrap();
        assert!(body.get("email").is_none());
        assert!(body.get("password_is_set").is_none());
        // Unrestricted fields are still there.
        assert!(body.get("name").is_some());
        assert!(body.get("state").is_some());
    }

    #[test]
    fn admin_sees_email_and_password_presence() {
        let ctx = AuthContext::authenticated(record(Uuid::from_u128(1), true));
        let body = serde_json::to_value(UserResponse::for_caller(
            record(Uuid::from_u128(2), false),
            &ctx,
        ))
        .unwrap();
        assert_eq!(body["email"], "n@example.com");
        assert_eq!(body["password_is_set"], true);
        // The hash itself never appears anywhere in the body.
        assert!(!body.to_string().contains("argon2"));
    }

    #[test]
    fn create_request_validation() {
        let ok = CreateUserRequest {
            name: "alice".into(),
            email: "alice@example.com".into(),
            password: "longenough".into(),
            state: None,
            is_admin: None,
        };
        assert!(ok.validate().is_ok());

        let bad_email = CreateUserRequest {
            email: "not-an-address".into(),
            ..parts()
        };
        assert!(bad_email.validate().is_err());

        let short_password = CreateUserRequest {
            password: "short".into(),
            ..parts()
        };
        assert!(short_password.validate().is_err());
    }

    fn parts() -> CreateUserRequest {
        CreateUserRequest {
            name: "alice".into(),
            email: "alice@example.com".into(),
            password: "longenough".into(),
            state: None,
            is_admin: None,
        }
    }

    #[test]
    fn request_debug_never_prints_the_password() {
        let create = parts();
        let out = format!("{create:?}");
        assert!(out.contains("<redacted>"));
        assert!(!out.contains("longenough"));

        let update = UpdateUserRequest {
            name: None,
            email: None,
            password: Some("hunter2!".into()),
            state: None,
            is_admin: None,
        };
        let out = format!("{update:?}");
        assert!(out.contains("<redacted>"));
        assert!(!out.contains("hunter2!"));
    }

    #[test]
    fn update_request_rejects_empty_present_fields() {
        let req = UpdateUserRequest {
            name: Some("  ".into()),
            email: None,
            password: None,
            state: None,
            is_admin: None,
        };
        assert!(req.validate().is_err());

        let all_absent = UpdateUserRequest {
            name: None,
            email: None,
            password: None,
            state: None,
            is_admin: None,
        };
        assert!(all_absent.validate().is_ok());
    }
}
