//! Vacation-rental booking service: nightly pricing and calendar availability.

pub mod availability;
pub mod cache;
pub mod config;
pub mod error;
pub mod holidays;
pub mod pricing;
pub mod routes;
pub mod stay;

use std::sync::Arc;

use sqlx::PgPool;

use crate::cache::AppCache;
use crate::config::Config;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
    pub config: Arc<Config>,
}
