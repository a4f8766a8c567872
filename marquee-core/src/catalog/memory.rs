use std::collections::BTreeMap;

use async_trait::async_trait;
use marquee_model::{
    CatalogEntry, CatalogId, CatalogSort, CompoundKey, NewCatalogEntry,
};
use parking_lot::RwLock;
use tracing::info;

use super::{CatalogPort, CatalogRepository, Result};
use crate::error::CatalogError;

/// Process-local catalog used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    table: RwLock<CatalogTable>,
}

#[derive(Debug, Default)]
struct CatalogTable {
    rows: BTreeMap<CatalogId, CatalogEntry>,
    last_id: i64,
}

impl CatalogTable {
    fn active(&self, id: CatalogId) -> Result<&CatalogEntry> {
        self.rows
            .get(&id)
            .filter(|row| !row.deleted)
            .ok_or_else(|| CatalogError::NotFound(format!("id {id}")))
    }
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogPort for InMemoryCatalog {
    async fn find_by_compound_key(
        &self,
        key: &CompoundKey,
    ) -> Result<CatalogEntry> {
        let table = self.table.read();
        table
            .rows
            .values()
            .find(|row| row.matches(key) && !row.deleted)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))
    }

    async fn find_by_id(&self, id: CatalogId) -> Result<CatalogEntry> {
        self.table.read().active(id).cloned()
    }

    async fn increment_watch_count(&self, id: CatalogId) -> Result<()> {
        let mut table = self.table.write();
        table.active(id)?;
        if let Some(row) = table.rows.get_mut(&id) {
            row.watch_count += 1;
        }
        Ok(())
    }

    async fn get_duration(&self, id: CatalogId) -> Result<i32> {
        self.table.read().active(id).map(|row| row.duration)
    }
}

#[async_trait]
impl CatalogRepository for InMemoryCatalog {
    async fn create(&self, movie: NewCatalogEntry) -> Result<CatalogEntry> {
        let movie = movie.validated()?;
        let key = movie.key();

        let mut table = self.table.write();
        if table.rows.values().any(|row| row.matches(&key)) {
            return Err(CatalogError::Duplicate(key.to_string()));
        }

        table.last_id += 1;
        let entry = CatalogEntry {
            id: CatalogId(table.last_id),
            director: movie.director,
            title: movie.title,
            year: movie.year,
            genre: movie.genre,
            duration: movie.duration,
            rating: movie.rating,
            watch_count: 0,
            deleted: false,
        };
        table.rows.insert(entry.id, entry.clone());
        info!(catalog_id = %entry.id, movie = %key, "movie created");
        Ok(entry)
    }

    async fn soft_delete(&self, id: CatalogId) -> Result<()> {
        let mut table = self.table.write();
        let row = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| CatalogError::NotFound(format!("id {id}")))?;
        if row.deleted {
            return Err(CatalogError::AlreadyDeleted(format!("id {id}")));
        }
        row.deleted = true;
        info!(catalog_id = %id, "movie marked as deleted");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let mut table = self.table.write();
        *table = CatalogTable::default();
        info!("catalog cleared");
        Ok(())
    }

    async fn list(&self, sort: CatalogSort) -> Result<Vec<CatalogEntry>> {
        let mut rows: Vec<CatalogEntry> = self
            .table
            .read()
            .rows
            .values()
            .filter(|row| !row.deleted)
            .cloned()
            .collect();
        rows.sort_by(|a, b| sort.compare(a, b));
        Ok(rows)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
