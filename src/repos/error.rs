/**
 * Responsibility
 * - What a repo failure means to the layers above
 * - Unique-index violations (Postgres 23505) are a distinct case: the
 *   serving layer must answer 409, not 500, and the seeder must treat
 *   them as "already seeded"
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("db error")]
    Db(#[from] sqlx::Error),
    #[error("unique violation")]
    UniqueViolation,
}

impl RepoError {
    /// For statements that can trip the unique email index (create/update).
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(dbe) = &e
            && dbe.code().as_deref() == Some("23505")
        {
            return RepoError::UniqueViolation;
        }
        RepoError::Db(e)
    }
}
