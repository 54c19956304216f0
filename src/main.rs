/*
 * Responsibility
 * - tokio runtime entry point
 * - Calls app::run() (no logic lives here)
 */
use anyhow::Result;

mod api;
mod app;
mod config;
mod domain;
mod error;
mod middleware;
mod policy;
mod repos;
mod services;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
