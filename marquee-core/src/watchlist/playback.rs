//! Cursor-driven playback over the watchlist.
//!
//! Playing a film bumps its watch count in the catalog. The cursor has two
//! states: unset on an empty watchlist, otherwise positioned on a valid
//! index. Every operation here fails with `EmptyWatchlist` in the first.

use marquee_model::{CatalogEntry, CatalogId, CurrentFilm, FilmNumber, PlaybackReport};
use tracing::{info, warn};

use super::service::{WatchlistService, dangling_or};
use crate::error::{Result, WatchlistError};

impl WatchlistService {
    /// Move the cursor back to the first film.
    pub async fn rewind(&self) -> Result<()> {
        let mut watchlist = self.state.write().await;
        watchlist.rewind()?;
        info!("watchlist rewound");
        Ok(())
    }

    pub async fn go_to_film_number(
        &self,
        film_number: usize,
    ) -> Result<FilmNumber> {
        let mut watchlist = self.state.write().await;
        let position = watchlist.go_to(film_number)?;
        info!(film_number = position.get(), "cursor moved");
        Ok(position)
    }

    /// Play the film under the cursor. The cursor stays where it is.
    pub async fn play_current(&self) -> Result<CurrentFilm> {
        let watchlist = self.state.write().await;
        let (film_number, entry) = watchlist.current()?;
        let catalog_id = entry.catalog_id;

        let movie = self.play(catalog_id).await.inspect_err(|err| {
            if let WatchlistError::DanglingReference(id) = err {
                warn!(catalog_id = %id, "cannot play current film: catalog record is gone");
            }
        })?;

        info!(catalog_id = %catalog_id, film_number = film_number.get(), "played current film");
        Ok(CurrentFilm { film_number, movie })
    }

    /// Play every film from the cursor to the end and leave the cursor on
    /// the last one.
    pub async fn play_rest(&self) -> Result<PlaybackReport> {
        let mut watchlist = self.state.write().await;
        let queue = watchlist.remaining()?;

        let report = self.play_sequence(&queue).await?;
        watchlist.seek_last();

        info!(
            played = report.played.len(),
            dangling = report.dangling.len(),
            "played rest of watchlist"
        );
        Ok(report)
    }

    /// Play the whole watchlist from the first film. The cursor only moves
    /// once every entry has been played or skipped as dangling.
    pub async fn play_all(&self) -> Result<PlaybackReport> {
        let mut watchlist = self.state.write().await;
        let queue = watchlist.all_ids()?;

        let report = self.play_sequence(&queue).await?;
        watchlist.seek_last();

        info!(
            played = report.played.len(),
            dangling = report.dangling.len(),
            "played entire watchlist"
        );
        Ok(report)
    }

    /// Play each id in order. Dangling entries are recorded and skipped;
    /// any other store failure aborts the run.
    async fn play_sequence(&self, queue: &[CatalogId]) -> Result<PlaybackReport> {
        let mut report = PlaybackReport::default();
        for &catalog_id in queue {
            match self.play(catalog_id).await {
                Ok(movie) => report.played.push(movie),
                Err(WatchlistError::DanglingReference(id)) => {
                    warn!(catalog_id = %id, "skipping watchlist entry whose catalog record is gone");
                    report.dangling.push(id);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(report)
    }

    /// Resolve one entry and bump its watch count. Returns the record as it
    /// stands after the increment.
    async fn play(&self, catalog_id: CatalogId) -> Result<CatalogEntry> {
        let mut movie = self
            .catalog
            .find_by_id(catalog_id)
            .await
            .map_err(|err| dangling_or(catalog_id, err))?;
        self.catalog
            .increment_watch_count(catalog_id)
            .await
            .map_err(|err| dangling_or(catalog_id, err))?;
        movie.watch_count += 1;
        Ok(movie)
    }
}
