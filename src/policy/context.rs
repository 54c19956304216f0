/*
 * Responsibility
 * - The caller identity the policy engine evaluates against
 * - Built once per request by the auth middleware, immutable after that
 * - Anonymous is a valid context, not an error (it is simply the most
 *   restrictive identity)
 */
use crate::domain::UserRecord;

#[derive(Debug, Clone)]
pub struct AuthContext {
    caller: Option<UserRecord>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { caller: None }
    }

    pub fn authenticated(caller: UserRecord) -> Self {
        Self {
            caller: Some(caller),
        }
    }

    pub fn caller(&self) -> Option<&UserRecord> {
        self.caller.as_ref()
    }

    /// True iff a caller is present and flagged as admin.
    pub fn is_admin(&self) -> bool {
        self.caller.as_ref().is_some_and(|c| c.is_admin)
    }
}
