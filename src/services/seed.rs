/*
 * Responsibility
 * - First-startup seeding: ensure exactly one admin record exists
 * - Idempotent across restarts and racing instances: check first, and
 *   treat a unique-violation on the insert as "someone else seeded it"
 *
 * Credential validation (non-empty ADMIN_EMAIL / ADMIN_PASSWORD) happens
 * in Config::from_env; by the time this runs the values are known good.
 */
use anyhow::Result;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{UserRecord, UserState};
use crate::repos::{error::RepoError, user_repo};
use crate::services::password;

/// What a seed run concluded.
#[derive(Debug, PartialEq, Eq)]
enum SeedOutcome {
    AlreadyPresent,
    Created(Uuid),
    EmailTaken,
}

/// Pure decision over the insert result: a unique-violation means the run
/// lost a seeding race, or the configured email already belongs to an
/// existing record. Either way the store holds the email exactly once and
/// the run succeeds without writing.
fn insert_outcome(insert: Result<UserRecord, RepoError>) -> Result<SeedOutcome, RepoError> {
    match insert {
        Ok(user) => Ok(SeedOutcome::Created(user.id)),
        Err(RepoError::UniqueViolation) => Ok(SeedOutcome::EmailTaken),
        Err(e) => Err(e),
    }
}

pub async fn ensure_admin(db: &PgPool, admin_email: &str, admin_password: &str) -> Result<()> {
    let outcome = if user_repo::admin_exists(db).await? {
        SeedOutcome::AlreadyPresent
    } else {
        let password_hash = password::hash(admin_password)?;

        insert_outcome(
            user_repo::create(
                db,
                "admin",
                admin_email,
                UserState::Active,
                true,
                &password_hash,
            )
            .await,
        )?
    };

    match outcome {
        SeedOutcome::AlreadyPresent => {
            tracing::debug!("admin record already present, skipping seed");
        }
        SeedOutcome::Created(user_id) => {
            tracing::info!(%user_id, "seeded initial admin record");
        }
        SeedOutcome::EmailTaken => {
            tracing::warn!(email = %admin_email, "admin email already taken, seed skipped");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn admin(id: Uuid) -> UserRecord {
        UserRecord {
            id,
            name: "admin".into(),
            email: "admin@example.com".into(),
            state: UserState::Active,
            is_admin: true,
            password_hash: "$argon2id$stub".into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn successful_insert_reports_the_new_record() {
        let id = Uuid::from_u128(9);
        assert_eq!(
            insert_outcome(Ok(admin(id))).unwrap(),
            SeedOutcome::Created(id)
        );
    }

    #[test]
    fn lost_race_is_suppressed_not_an_error() {
        assert_eq!(
            insert_outcome(Err(RepoError::UniqueViolation)).unwrap(),
            SeedOutcome::EmailTaken
        );
    }

    #[test]
    fn other_repo_errors_still_abort_startup() {
        let out = insert_outcome(Err(RepoError::Db(sqlx::Error::RowNotFound)));
        assert!(matches!(out, Err(RepoError::Db(_))));
    }
}
