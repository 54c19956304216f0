/*!
 * Access policy engine
 *
 * Responsibility:
 * - Decide, per request, which records and which fields a caller may
 *   read or write
 * - Pure functions over (context, target, field); no I/O, no state
 *
 * Public API:
 * - AuthContext
 * - ListFilter, UserField
 * - list_read_filter, can_read_field, can_update_field
 */

mod context;
mod engine;

pub use context::AuthContext;
pub use engine::{ListFilter, UserField, can_read_field, can_update_field, list_read_filter};
