/*
 * Responsibility
 * - User entity as stored in the users table
 * - state enum (active/deactivated) shared between SQL and JSON
 * - password_hash is carried here but never serialized; only its presence
 *   is ever reported (see policy + dto layers)
 */
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserState {
    Active,
    Deactivated,
}

#[derive(Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub state: UserState,
    pub is_admin: bool,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserRecord {
    /// Whether a credential is set. This boolean is the only thing any
    /// caller may ever learn about the password.
    pub fn password_is_set(&self) -> bool {
        !self.password_hash.is_empty()
    }
}

// Hand-written so the hash can't end up in logs via {:?}.
impl fmt::Debug for UserRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRecord")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("email", &self.email)
            .field("state", &self.state)
            .field("is_admin", &self.is_admin)
            .field("password_hash", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hash: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            name: "alice".into(),
            email: "alice@example.com".into(),
            state: UserState::Active,
            is_admin: false,
            password_hash: hash.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn password_presence_is_a_bool_only() {
        assert!(record("$argon2id$v=19$...").password_is_set());
        assert!(!record("").password_is_set());
    }

    #[test]
    fn debug_never_prints_the_hash() {
        let out = format!("{:?}", record("$argon2id$v=19$secret"));
        assert!(out.contains("<redacted>"));
        assert!(!out.contains("secret"));
    }

    #[test]
    fn state_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserState::Deactivated).unwrap(),
            "\"deactivated\""
        );
        let back: UserState = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(back, UserState::Active);
    }
}
