//! Credential verification → AuthContext in request extensions.
//!
//! Identity is the email, the secret is the password, carried per request as
//! `Authorization: Basic base64(email:password)`.
//!
//! - No Authorization header: the request proceeds with the anonymous
//!   context. Anonymous is a valid (maximally restricted) identity; the
//!   policy engine decides what it can see.
//! - A header that is present but does not verify is 401.
//! - Deactivated accounts cannot authenticate.

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};

use crate::domain::UserState;
use crate::error::AppError;
use crate::policy::AuthContext;
use crate::repos::user_repo;
use crate::services::password;
use crate::state::AppState;

/// Attach credential resolution to `/api/v1/*`.
///
/// Example:
/// ```ignore
/// let v1 = middleware::auth::access::apply(api::v1::routes(), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8: from_fn can't take a State extractor, so pass state explicitly
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = match req.headers().get(header::AUTHORIZATION) {
        None => AuthContext::anonymous(),
        Some(value) => {
            let value = value.to_str().map_err(|_| AppError::Unauthorized)?;
            let (email, secret) = parse_basic(value).ok_or(AppError::Unauthorized)?;

            let user = user_repo::find_by_email(&state.db, &email)
                .await?
                .ok_or(AppError::Unauthorized)?;

            if user.state == UserState::Deactivated {
                tracing::warn!(user_id = %user.id, "deactivated account attempted login");
                return Err(AppError::Unauthorized);
            }

            if !password::verify(&secret, &user.password_hash) {
                return Err(AppError::Unauthorized);
            }

            AuthContext::authenticated(user)
        }
    };

    // middleware → extractor handoff
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// `Basic base64(email:password)` → (email, password).
/// None for any malformed shape; the caller turns that into 401.
fn parse_basic(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (email, secret) = decoded.split_once(':')?;
    if email.is_empty() {
        return None;
    }
    Some((email.to_string(), secret.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(payload: &str) -> String {
        format!("Basic {}", BASE64.encode(payload))
    }

    #[test]
    fn parses_well_formed_credentials() {
        let (email, secret) = parse_basic(&basic("a@example.com:s3cret")).unwrap();
        assert_eq!(email, "a@example.com");
        assert_eq!(secret, "s3cret");
    }

    #[test]
    fn password_may_contain_colons() {
        let (_, secret) = parse_basic(&basic("a@example.com:p:a:s:s")).unwrap();
        assert_eq!(secret, "p:a:s:s");
    }

    #[test]
    fn rejects_malformed_headers() {
        assert!(parse_basic("Bearer abc").is_none());
        assert!(parse_basic("Basic not-base64!!!").is_none());
        assert!(parse_basic(&basic("no-colon-here")).is_none());
        assert!(parse_basic(&basic(":empty-identity")).is_none());
    }
}
