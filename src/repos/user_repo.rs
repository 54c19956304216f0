/*
 * Responsibility
 * - SQLx operations for the users table, over a PgPool
 * - list() takes the ListFilter decided by the policy engine and turns it
 *   into SQL here; the engine itself never sees SQL
 * - DB errors come back as RepoError (23505 -> UniqueViolation)
 */
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{UserRecord, UserState};
use crate::policy::ListFilter;
use crate::repos::error::RepoError;

pub async fn list(db: &PgPool, filter: ListFilter) -> Result<Vec<UserRecord>, RepoError> {
    let sql = match filter {
        ListFilter::All => {
            r#"
            SELECT id, name, email, state, is_admin, password_hash, created_at
            FROM users
            ORDER BY created_at DESC
            "#
        }
        ListFilter::ActiveOnly => {
            r#"
            SELECT id, name, email, state, is_admin, password_hash, created_at
            FROM users
            WHERE state <> 'deactivated'
            ORDER BY created_at DESC
            "#
        }
    };

    let rows = sqlx::query_as::<_, UserRecord>(sql).fetch_all(db).await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, user_id: Uuid) -> Result<Option<UserRecord>, RepoError> {
    let row = sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT id, name, email, state, is_admin, password_hash, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<UserRecord>, RepoError> {
    let row = sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT id, name, email, state, is_admin, password_hash, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn admin_exists(db: &PgPool) -> Result<bool, RepoError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE is_admin)")
        .fetch_one(db)
        .await?;

    Ok(exists)
}

pub async fn create(
    db: &PgPool,
    name: &str,
    email: &str,
    state: UserState,
    is_admin: bool,
    password_hash: &str,
) -> Result<UserRecord, RepoError> {
    let row = sqlx::query_as::<_, UserRecord>(
        r#"
        INSERT INTO users (id, name, email, state, is_admin, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, name, email, state, is_admin, password_hash, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(email)
    .bind(state)
    .bind(is_admin)
    .bind(password_hash)
    .fetch_one(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    user_id: Uuid,
    name: Option<&str>,
    email: Option<&str>,
    state: Option<UserState>,
    is_admin: Option<bool>,
    password_hash: Option<&str>,
) -> Result<Option<UserRecord>, RepoError> {
    // All columns are NOT NULL, so COALESCE($n, col) means "absent = keep".
    let row = sqlx::query_as::<_, UserRecord>(
        r#"
        UPDATE users
        SET
            name = COALESCE($2, name),
            email = COALESCE($3, email),
            state = COALESCE($4, state),
            is_admin = COALESCE($5, is_admin),
            password_hash = COALESCE($6, password_hash)
        WHERE id = $1
        RETURNING id, name, email, state, is_admin, password_hash, created_at
        "#,
    )
    .bind(user_id)
    .bind(name)
    .bind(email)
    .bind(state)
    .bind(is_admin)
    .bind(password_hash)
    .fetch_optional(db)
    .await
    .map_err(RepoError::from_sqlx)?;

    Ok(row)
}

pub async fn delete(db: &PgPool, user_id: Uuid) -> Result<bool, RepoError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}
