use marquee_model::{CatalogId, CompoundKey, FilmNumber, WatchlistItem};

use crate::error::{Result, WatchlistError};

/// One slot of the watchlist: a reference to a catalog record.
///
/// The compound key is kept alongside the id so membership checks never need
/// the catalog store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub catalog_id: CatalogId,
    pub key: CompoundKey,
}

/// Ordered watchlist with a playback cursor.
///
/// The cursor is `Some` exactly when the list is non-empty and always points
/// at a valid index. Structural changes track the cursor by the identity of
/// the entry it points at and recompute the index afterwards.
///
/// Every fallible method validates its arguments before touching the
/// sequence, so an `Err` leaves the watchlist unchanged.
#[derive(Debug, Clone, Default)]
pub struct Watchlist {
    entries: Vec<WatchlistEntry>,
    cursor: Option<usize>,
}

impl Watchlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Zero-based index of the current entry.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn entries(&self) -> &[WatchlistEntry] {
        &self.entries
    }

    pub fn contains(&self, key: &CompoundKey) -> bool {
        self.position_of(key).is_some()
    }

    fn position_of(&self, key: &CompoundKey) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.key == key)
    }

    fn require_key(&self, key: &CompoundKey) -> Result<usize> {
        self.position_of(key)
            .ok_or_else(|| WatchlistError::NotFound(key.to_string()))
    }

    /// Translate a 1-indexed film number into an index.
    pub fn index_of(&self, film_number: usize) -> Result<usize> {
        if film_number == 0 || film_number > self.entries.len() {
            return Err(WatchlistError::OutOfRange {
                film_number,
                length: self.entries.len(),
            });
        }
        Ok(film_number - 1)
    }

    fn require_positioned(&self) -> Result<usize> {
        self.cursor.ok_or(WatchlistError::EmptyWatchlist)
    }

    /// Read-only view of the sequence in order.
    pub fn items(&self) -> impl Iterator<Item = WatchlistItem> + '_ {
        self.entries.iter().enumerate().map(|(index, entry)| WatchlistItem {
            film_number: FilmNumber::from_index(index),
            catalog_id: entry.catalog_id,
            key: entry.key.clone(),
            is_current: self.cursor == Some(index),
        })
    }

    pub fn get(&self, film_number: usize) -> Result<&WatchlistEntry> {
        let index = self.index_of(film_number)?;
        Ok(&self.entries[index])
    }

    /// Entry under the cursor with its film number.
    pub fn current(&self) -> Result<(FilmNumber, &WatchlistEntry)> {
        let index = self.require_positioned()?;
        Ok((FilmNumber::from_index(index), &self.entries[index]))
    }

    /// Append an entry. The cursor moves to it only if the list was empty.
    pub fn push(&mut self, entry: WatchlistEntry) -> Result<FilmNumber> {
        if self.contains(&entry.key) {
            return Err(WatchlistError::AlreadyInWatchlist(
                entry.key.to_string(),
            ));
        }
        self.entries.push(entry);
        if self.cursor.is_none() {
            self.cursor = Some(0);
        }
        Ok(FilmNumber::from_index(self.entries.len() - 1))
    }

    pub fn remove_by_key(
        &mut self,
        key: &CompoundKey,
    ) -> Result<WatchlistEntry> {
        let index = self.require_key(key)?;
        Ok(self.remove_at(index))
    }

    pub fn remove_by_film_number(
        &mut self,
        film_number: usize,
    ) -> Result<WatchlistEntry> {
        let index = self.index_of(film_number)?;
        Ok(self.remove_at(index))
    }

    fn remove_at(&mut self, index: usize) -> WatchlistEntry {
        let removed = self.entries.remove(index);
        let len = self.entries.len();
        self.cursor = match self.cursor {
            _ if len == 0 => None,
            Some(cursor) if index < cursor => Some(cursor - 1),
            // The current entry was removed: stay on the same index, which
            // now holds the following entry, or fall back to the new tail.
            Some(cursor) if index == cursor => Some(cursor.min(len - 1)),
            other => other,
        };
        removed
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    pub fn move_to_beginning(&mut self, key: &CompoundKey) -> Result<()> {
        let from = self.require_key(key)?;
        self.relocate(from, 0);
        Ok(())
    }

    pub fn move_to_end(&mut self, key: &CompoundKey) -> Result<()> {
        let from = self.require_key(key)?;
        let last = self.entries.len() - 1;
        self.relocate(from, last);
        Ok(())
    }

    /// Remove the entry and reinsert it at `target_film_number`, shifting
    /// the entries in between by one.
    pub fn move_to_film_number(
        &mut self,
        key: &CompoundKey,
        target_film_number: usize,
    ) -> Result<()> {
        let from = self.require_key(key)?;
        let to = self.index_of(target_film_number)?;
        self.relocate(from, to);
        Ok(())
    }

    pub fn swap(&mut self, first: usize, second: usize) -> Result<()> {
        let a = self.index_of(first)?;
        let b = self.index_of(second)?;
        if a == b {
            return Ok(());
        }
        self.restructure(|entries| entries.swap(a, b));
        Ok(())
    }

    fn relocate(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }
        self.restructure(|entries| {
            let entry = entries.remove(from);
            entries.insert(to, entry);
        });
    }

    /// Apply a permutation and re-point the cursor at the entry it tracked.
    fn restructure(&mut self, permute: impl FnOnce(&mut Vec<WatchlistEntry>)) {
        let tracked = self.cursor.map(|index| self.entries[index].catalog_id);
        permute(&mut self.entries);
        if let Some(id) = tracked {
            self.cursor = self
                .entries
                .iter()
                .position(|entry| entry.catalog_id == id);
        }
    }

    pub fn rewind(&mut self) -> Result<()> {
        self.require_positioned()?;
        self.cursor = Some(0);
        Ok(())
    }

    pub fn go_to(&mut self, film_number: usize) -> Result<FilmNumber> {
        self.require_positioned()?;
        let index = self.index_of(film_number)?;
        self.cursor = Some(index);
        Ok(FilmNumber::from_index(index))
    }

    /// Catalog ids from the cursor to the end of the list, in order.
    pub fn remaining(&self) -> Result<Vec<CatalogId>> {
        let start = self.require_positioned()?;
        Ok(self.entries[start..]
            .iter()
            .map(|entry| entry.catalog_id)
            .collect())
    }

    /// Every catalog id in order. Leaves the cursor alone.
    pub fn all_ids(&self) -> Result<Vec<CatalogId>> {
        self.require_positioned()?;
        Ok(self.entries.iter().map(|entry| entry.catalog_id).collect())
    }

    /// Park the cursor on the last entry.
    pub fn seek_last(&mut self) {
        self.cursor = self.entries.len().checked_sub(1);
    }
}
