/*!
 * Caller context extractor
 *
 * Responsibility:
 * - Hand the per-request AuthContext (resolved by the auth middleware) to
 *   handlers; the axum plumbing stays confined to core
 *
 * Public API:
 * - CallerContext
 */

mod core;

pub use core::CallerContext;
