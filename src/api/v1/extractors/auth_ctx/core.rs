use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::policy::AuthContext;
use crate::state::AppState;

/// Extractor giving handlers the AuthContext the middleware resolved.
/// The middleware inserts a context for every request (anonymous included),
/// so a missing extension means the auth layer is not wired up at all.
pub struct CallerContext(pub AuthContext);

impl FromRequestParts<AppState> for CallerContext
where
    AppState: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(CallerContext)
            .ok_or(AppError::Internal)
    }
}
