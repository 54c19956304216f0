/*
 * Responsibility
 * - The four access rules, as total functions: no panics, no errors,
 *   a definite decision for every input
 * - Restricted fields live in a rule table (one read predicate + one
 *   update predicate per field) so tests can be table-driven
 *
 * Rules:
 * 1. Non-admins never see deactivated records (list-level, via ListFilter)
 * 2. email is readable/updatable by self or admin
 * 3. password presence is readable by admin only; the hash/value is not a
 *    readable field under any decision
 * 4. password is updatable by self or admin
 */
use crate::domain::{UserRecord, UserState};

use super::context::AuthContext;

/// Closed set of user fields a decision can be asked about. Fields outside
/// this enum do not exist, so "unknown field" is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Id,
    Name,
    Email,
    State,
    IsAdmin,
    Password,
}

/// Record-level restriction applied to list queries (and to point reads,
/// which must not leak records the caller could not have listed).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFilter {
    All,
    ActiveOnly,
}

impl ListFilter {
    pub fn matches(&self, record: &UserRecord) -> bool {
        match self {
            ListFilter::All => true,
            ListFilter::ActiveOnly => record.state != UserState::Deactivated,
        }
    }
}

type FieldPredicate = fn(&AuthContext, &UserRecord) -> bool;

struct FieldRule {
    field: UserField,
    read: FieldPredicate,
    update: FieldPredicate,
}

fn admin_only(ctx: &AuthContext, _target: &UserRecord) -> bool {
    ctx.is_admin()
}

// Identity is compared by id, never by email: the decision must stay
// correct across email changes.
fn admin_or_self(ctx: &AuthContext, target: &UserRecord) -> bool {
    ctx.is_admin() || ctx.caller().is_some_and(|c| c.id == target.id)
}

// A read allowed on Password exposes password_is_set() only; serialization
// of the hash itself has no code path.
const RULES: &[FieldRule] = &[
    FieldRule {
        field: UserField::Email,
        read: admin_or_self,
        update: admin_or_self,
    },
    FieldRule {
        field: UserField::Password,
        read: admin_only,
        update: admin_or_self,
    },
];

fn rule_for(field: UserField) -> Option<&'static FieldRule> {
    RULES.iter().find(|r| r.field == field)
}

/// Restriction to apply before a list query runs. Admins see everything;
/// everyone else (anonymous included) sees active records only.
pub fn list_read_filter(ctx: &AuthContext) -> ListFilter {
    if ctx.is_admin() {
        ListFilter::All
    } else {
        ListFilter::ActiveOnly
    }
}

/// Whether `ctx` may read `field` of `target`. Fields without a rule are
/// unrestricted: readable by anyone who already passed the list filter.
pub fn can_read_field(field: UserField, ctx: &AuthContext, target: &UserRecord) -> bool {
    match rule_for(field) {
        Some(rule) => (rule.read)(ctx, target),
        None => true,
    }
}

/// Whether `ctx` may write `field` of `target`. Fields without a rule are
/// left to the serving layer's default write policy.
pub fn can_update_field(field: UserField, ctx: &AuthContext, target: &UserRecord) -> bool {
    match rule_for(field) {
        Some(rule) => (rule.update)(ctx, target),
        None => true,
    }
}
