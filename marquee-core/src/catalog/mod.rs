//! Catalog store ports and backends.
//!
//! [`CatalogPort`] is the narrow surface the watchlist depends on. The full
//! CRUD surface used by the catalog routes lives on [`CatalogRepository`].

mod memory;
#[cfg(feature = "database")]
mod postgres;

pub use memory::InMemoryCatalog;
#[cfg(feature = "database")]
pub use postgres::PostgresCatalog;

use async_trait::async_trait;
use marquee_model::{
    CatalogEntry, CatalogId, CatalogSort, CompoundKey, NewCatalogEntry,
};
use rand::Rng;
use tracing::info;

use crate::error::CatalogError;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Lookups and watch-count updates needed by the watchlist engine.
///
/// Soft-deleted records are reported as `NotFound`.
#[async_trait]
pub trait CatalogPort: Send + Sync + std::fmt::Debug {
    async fn find_by_compound_key(
        &self,
        key: &CompoundKey,
    ) -> Result<CatalogEntry>;

    async fn find_by_id(&self, id: CatalogId) -> Result<CatalogEntry>;

    async fn increment_watch_count(&self, id: CatalogId) -> Result<()>;

    /// Runtime in minutes.
    async fn get_duration(&self, id: CatalogId) -> Result<i32>;
}

#[async_trait]
pub trait CatalogRepository: CatalogPort {
    /// Insert a new record. Fails with `Duplicate` when the compound key is
    /// taken, including by a soft-deleted record.
    async fn create(&self, movie: NewCatalogEntry) -> Result<CatalogEntry>;

    async fn soft_delete(&self, id: CatalogId) -> Result<()>;

    /// Drop every record and restart id assignment.
    async fn clear(&self) -> Result<()>;

    /// All records that are not soft-deleted.
    async fn list(&self, sort: CatalogSort) -> Result<Vec<CatalogEntry>>;

    async fn health_check(&self) -> Result<()>;
}

/// Pick a uniformly random entry from the active catalog.
pub async fn random_entry(
    repository: &dyn CatalogRepository,
) -> Result<CatalogEntry> {
    let mut entries = repository.list(CatalogSort::default()).await?;
    if entries.is_empty() {
        info!("cannot pick a random movie from an empty catalog");
        return Err(CatalogError::EmptyCatalog);
    }

    let index = rand::rng().random_range(0..entries.len());
    info!(index, total = entries.len(), "random movie selected");
    Ok(entries.swap_remove(index))
}
