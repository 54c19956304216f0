/*
 * Responsibility
 * - Public interface of the middleware stack (re-exports)
 */
pub mod auth;
pub mod cors;
pub mod http;
