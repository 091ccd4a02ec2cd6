use crate::config::get_config;
use crate::error::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};

pub async fn create_pool() -> Result<PgPool> {
    let config = get_config();
    let pool = PgPoolOptions::new()
        .max_connections(48)
        .acquire_timeout(std::time::Duration::from_millis(config.search.timeout_ms))
        .connect(&config.database_url)
        .await?;
    Ok(pool)
}
