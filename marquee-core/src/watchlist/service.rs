use std::sync::Arc;

use marquee_model::{
    CatalogEntry, CatalogId, CompoundKey, CurrentFilm, WatchlistItem,
    WatchlistSummary,
};
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::queue::{Watchlist, WatchlistEntry};
use crate::catalog::{CatalogPort, CatalogRepository};
use crate::error::{CatalogError, Result, WatchlistError};

/// Process-wide watchlist shared by every request.
///
/// Mutations hold the write guard for the whole call, including the catalog
/// lookups they need, so at most one mutation is in flight and readers never
/// observe a partially shifted sequence.
#[derive(Debug)]
pub struct WatchlistService {
    pub(super) state: RwLock<Watchlist>,
    pub(super) catalog: Arc<dyn CatalogPort>,
}

/// An entry taken off the watchlist and the order left behind, captured
/// under the same guard.
#[derive(Debug, Clone)]
pub struct Removal {
    pub removed: WatchlistEntry,
    pub remaining: Vec<WatchlistItem>,
}

/// A catalog miss for an id the watchlist already holds is a dangling
/// reference rather than a plain lookup failure.
pub(super) fn dangling_or(id: CatalogId, err: CatalogError) -> WatchlistError {
    match err {
        CatalogError::NotFound(_) => WatchlistError::DanglingReference(id),
        other => WatchlistError::Catalog(other),
    }
}

impl WatchlistService {
    pub fn new(catalog: Arc<dyn CatalogPort>) -> Self {
        Self {
            state: RwLock::new(Watchlist::new()),
            catalog,
        }
    }

    /// Resolve `key` in the catalog and append it to the watchlist.
    pub async fn add(&self, key: CompoundKey) -> Result<WatchlistItem> {
        let mut watchlist = self.state.write().await;

        let movie = self.catalog.find_by_compound_key(&key).await?;
        let film_number = watchlist.push(WatchlistEntry {
            catalog_id: movie.id,
            key: movie.key(),
        })?;

        info!(
            catalog_id = %movie.id,
            film_number = film_number.get(),
            movie = %key,
            "added to watchlist"
        );
        Ok(WatchlistItem {
            film_number,
            catalog_id: movie.id,
            key: movie.key(),
            is_current: watchlist.cursor() == Some(film_number.to_index()),
        })
    }

    pub async fn remove_by_compound_key(
        &self,
        key: &CompoundKey,
    ) -> Result<Removal> {
        let mut watchlist = self.state.write().await;
        let removed = watchlist.remove_by_key(key)?;
        info!(catalog_id = %removed.catalog_id, movie = %key, "removed from watchlist");
        Ok(Removal {
            removed,
            remaining: watchlist.items().collect(),
        })
    }

    pub async fn remove_by_film_number(
        &self,
        film_number: usize,
    ) -> Result<Removal> {
        let mut watchlist = self.state.write().await;
        let removed = watchlist.remove_by_film_number(film_number)?;
        info!(
            catalog_id = %removed.catalog_id,
            film_number,
            "removed from watchlist"
        );
        Ok(Removal {
            removed,
            remaining: watchlist.items().collect(),
        })
    }

    /// Empty the watchlist. Returns how many entries were dropped.
    pub async fn clear(&self) -> usize {
        let mut watchlist = self.state.write().await;
        let dropped = watchlist.len();
        watchlist.clear();
        info!(dropped, "watchlist cleared");
        dropped
    }

    /// Empty the catalog and then the watchlist under one write guard, so
    /// no request can resolve a queued entry against a reassigned id. The
    /// watchlist is left untouched when the catalog fails to clear.
    pub async fn clear_with_catalog(
        &self,
        catalog: &dyn CatalogRepository,
    ) -> Result<usize> {
        let mut watchlist = self.state.write().await;
        catalog.clear().await?;
        let dropped = watchlist.len();
        watchlist.clear();
        info!(dropped, "catalog and watchlist cleared");
        Ok(dropped)
    }

    pub async fn contains(&self, key: &CompoundKey) -> bool {
        self.state.read().await.contains(key)
    }

    /// Snapshot of the watchlist in order. Empty when nothing is queued.
    pub async fn get_all(&self) -> Vec<WatchlistItem> {
        self.state.read().await.items().collect()
    }

    pub async fn get_by_film_number(
        &self,
        film_number: usize,
    ) -> Result<CatalogEntry> {
        let watchlist = self.state.read().await;
        let catalog_id = watchlist.get(film_number)?.catalog_id;
        self.resolve(catalog_id).await
    }

    /// The film under the cursor.
    pub async fn current(&self) -> Result<CurrentFilm> {
        let watchlist = self.state.read().await;
        let (film_number, entry) = watchlist.current()?;
        let movie = self.resolve(entry.catalog_id).await?;
        Ok(CurrentFilm { film_number, movie })
    }

    /// Entry count and combined runtime. Entries the catalog can no longer
    /// resolve are left out of the total.
    pub async fn length_and_total_duration(&self) -> Result<WatchlistSummary> {
        let watchlist = self.state.read().await;

        let mut total_duration = 0i64;
        for entry in watchlist.entries() {
            match self.catalog.get_duration(entry.catalog_id).await {
                Ok(minutes) => total_duration += i64::from(minutes),
                Err(CatalogError::NotFound(_)) => {
                    warn!(
                        catalog_id = %entry.catalog_id,
                        movie = %entry.key,
                        "watchlist entry no longer resolves; excluded from total duration"
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(WatchlistSummary {
            length: watchlist.len(),
            total_duration,
        })
    }

    pub async fn move_to_beginning(
        &self,
        key: &CompoundKey,
    ) -> Result<Vec<WatchlistItem>> {
        let mut watchlist = self.state.write().await;
        watchlist.move_to_beginning(key)?;
        info!(movie = %key, "moved to beginning of watchlist");
        Ok(watchlist.items().collect())
    }

    pub async fn move_to_end(
        &self,
        key: &CompoundKey,
    ) -> Result<Vec<WatchlistItem>> {
        let mut watchlist = self.state.write().await;
        watchlist.move_to_end(key)?;
        info!(movie = %key, "moved to end of watchlist");
        Ok(watchlist.items().collect())
    }

    pub async fn move_to_film_number(
        &self,
        key: &CompoundKey,
        target_film_number: usize,
    ) -> Result<Vec<WatchlistItem>> {
        let mut watchlist = self.state.write().await;
        watchlist.move_to_film_number(key, target_film_number)?;
        info!(movie = %key, target_film_number, "moved within watchlist");
        Ok(watchlist.items().collect())
    }

    pub async fn swap(
        &self,
        first: usize,
        second: usize,
    ) -> Result<Vec<WatchlistItem>> {
        let mut watchlist = self.state.write().await;
        watchlist.swap(first, second)?;
        info!(first, second, "swapped watchlist entries");
        Ok(watchlist.items().collect())
    }

    pub(super) async fn resolve(
        &self,
        catalog_id: CatalogId,
    ) -> Result<CatalogEntry> {
        self.catalog.find_by_id(catalog_id).await.map_err(|err| {
            let err = dangling_or(catalog_id, err);
            if matches!(err, WatchlistError::DanglingReference(_)) {
                warn!(%catalog_id, "watchlist entry references a missing catalog record");
            }
            err
        })
    }
}
