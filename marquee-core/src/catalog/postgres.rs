use async_trait::async_trait;
use marquee_model::{
    CatalogEntry, CatalogId, CatalogSort, CompoundKey, NewCatalogEntry,
};
use sqlx::PgPool;
use tracing::{debug, error, info};

use super::{CatalogPort, CatalogRepository, Result};
use crate::error::CatalogError;

const SELECT_COLUMNS: &str = "SELECT id, director, title, year, genre, duration, rating, watch_count, deleted FROM movies";

/// PostgreSQL-backed implementation of the catalog store.
#[derive(Clone, Debug)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn order_clause(sort: CatalogSort) -> String {
    let mut clauses = Vec::new();
    if sort.by_rating {
        clauses.push("rating DESC");
    }
    if sort.by_watch_count {
        clauses.push("watch_count DESC");
    }
    clauses.push("id ASC");
    format!(" ORDER BY {}", clauses.join(", "))
}

#[async_trait]
impl CatalogPort for PostgresCatalog {
    async fn find_by_compound_key(
        &self,
        key: &CompoundKey,
    ) -> Result<CatalogEntry> {
        let row = sqlx::query_as::<_, CatalogEntry>(&format!(
            "{SELECT_COLUMNS} WHERE director = $1 AND title = $2 AND year = $3"
        ))
        .bind(&key.director)
        .bind(&key.title)
        .bind(key.year)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) if !row.deleted => Ok(row),
            Some(_) => {
                info!(movie = %key, "movie has been deleted");
                Err(CatalogError::NotFound(format!("{key} has been deleted")))
            }
            None => Err(CatalogError::NotFound(key.to_string())),
        }
    }

    async fn find_by_id(&self, id: CatalogId) -> Result<CatalogEntry> {
        let row = sqlx::query_as::<_, CatalogEntry>(&format!(
            "{SELECT_COLUMNS} WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        match row {
            Some(row) if !row.deleted => Ok(row),
            Some(_) => Err(CatalogError::NotFound(format!(
                "id {id} has been deleted"
            ))),
            None => Err(CatalogError::NotFound(format!("id {id}"))),
        }
    }

    async fn increment_watch_count(&self, id: CatalogId) -> Result<()> {
        let result = sqlx::query(
            "UPDATE movies SET watch_count = watch_count + 1 WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::NotFound(format!("id {id}")));
        }
        debug!(catalog_id = %id, "watch count incremented");
        Ok(())
    }

    async fn get_duration(&self, id: CatalogId) -> Result<i32> {
        sqlx::query_scalar::<_, i32>(
            "SELECT duration FROM movies WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?
        .ok_or_else(|| CatalogError::NotFound(format!("id {id}")))
    }
}

#[async_trait]
impl CatalogRepository for PostgresCatalog {
    async fn create(&self, movie: NewCatalogEntry) -> Result<CatalogEntry> {
        let movie = movie.validated()?;
        let key = movie.key();

        let entry = sqlx::query_as::<_, CatalogEntry>(
            r#"
            INSERT INTO movies (director, title, year, genre, duration, rating)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, director, title, year, genre, duration, rating, watch_count, deleted
            "#,
        )
        .bind(&movie.director)
        .bind(&movie.title)
        .bind(movie.year)
        .bind(&movie.genre)
        .bind(movie.duration)
        .bind(movie.rating)
        .fetch_one(self.pool())
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error()
                && db_err.is_unique_violation()
            {
                return CatalogError::Duplicate(key.to_string());
            }
            error!(error = %e, "failed to create movie");
            CatalogError::from(e)
        })?;

        info!(catalog_id = %entry.id, movie = %key, "movie created");
        Ok(entry)
    }

    async fn soft_delete(&self, id: CatalogId) -> Result<()> {
        let deleted = sqlx::query_scalar::<_, bool>(
            "SELECT deleted FROM movies WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        match deleted {
            None => Err(CatalogError::NotFound(format!("id {id}"))),
            Some(true) => {
                Err(CatalogError::AlreadyDeleted(format!("id {id}")))
            }
            Some(false) => {
                sqlx::query("UPDATE movies SET deleted = TRUE WHERE id = $1")
                    .bind(id)
                    .execute(self.pool())
                    .await?;
                info!(catalog_id = %id, "movie marked as deleted");
                Ok(())
            }
        }
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("TRUNCATE TABLE movies RESTART IDENTITY")
            .execute(self.pool())
            .await?;
        info!("catalog cleared");
        Ok(())
    }

    async fn list(&self, sort: CatalogSort) -> Result<Vec<CatalogEntry>> {
        let query = format!(
            "{SELECT_COLUMNS} WHERE deleted = FALSE{}",
            order_clause(sort)
        );
        debug!(%query, "listing catalog");
        let rows = sqlx::query_as::<_, CatalogEntry>(&query)
            .fetch_all(self.pool())
            .await?;
        Ok(rows)
    }

    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1 FROM movies LIMIT 1")
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
