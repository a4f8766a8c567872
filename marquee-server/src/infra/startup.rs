use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing::info;

use marquee_core::MIGRATOR;
use marquee_core::catalog::{InMemoryCatalog, PostgresCatalog};
use marquee_core::providers::TmdbProvider;
use marquee_core::users::{
    InMemoryUserRepository, PasswordHasher, PostgresUserRepository,
    UserService,
};

use crate::infra::{
    app_state::AppState,
    config::{Config, DatabaseConfig},
};

/// Connect to PostgreSQL and bring the schema up to date.
pub async fn connect_database(database: &DatabaseConfig) -> Result<PgPool> {
    let url = database
        .url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    let pool = PgPoolOptions::new()
        .max_connections(database.max_connections)
        .connect(url)
        .await
        .context("failed to connect to database")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("failed to apply database migrations")?;
    info!("database migrations applied");

    Ok(pool)
}

/// Build the application state, backed by PostgreSQL when a database URL is
/// configured and by in-memory stores otherwise.
pub async fn build_state(config: Config) -> Result<AppState> {
    let hasher = Arc::new(
        PasswordHasher::new(config.auth.password_pepper.as_bytes())
            .context("failed to initialise password hasher")?,
    );
    let metadata =
        TmdbProvider::new(config.tmdb.api_key.clone(), &config.tmdb.base_url)
            .context("failed to build TMDB client")?;

    if config.database.url.is_some() {
        let pool = connect_database(&config.database).await?;
        let catalog = Arc::new(PostgresCatalog::new(pool.clone()));
        let users = UserService::new(
            Arc::new(PostgresUserRepository::new(pool)),
            hasher,
        );
        info!("using PostgreSQL storage");
        Ok(AppState::new(config, catalog, users, metadata))
    } else {
        let catalog = Arc::new(InMemoryCatalog::new());
        let users =
            UserService::new(Arc::new(InMemoryUserRepository::new()), hasher);
        info!("using in-memory storage");
        Ok(AppState::new(config, catalog, users, metadata))
    }
}
