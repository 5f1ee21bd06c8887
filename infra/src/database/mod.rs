//! MySQL connection pool and repository implementations.

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

use ss_shared::config::database::DatabaseConfig;

use crate::InfrastructureError;

pub mod verification_request_repository;
pub use verification_request_repository::MySqlVerificationRequestRepository;

/// Create a MySQL connection pool from the database configuration
pub async fn create_pool(config: &DatabaseConfig) -> Result<MySqlPool, InfrastructureError> {
    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout))
        .connect(&config.url)
        .await?;

    info!(
        max_connections = config.max_connections,
        "MySQL connection pool created"
    );

    Ok(pool)
}
