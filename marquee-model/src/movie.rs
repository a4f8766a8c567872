use crate::error::{ModelError, Result};
use crate::ids::CatalogId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// `(director, title, year)` identity of a movie.
///
/// Unique across the catalog and across the watchlist.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompoundKey {
    pub director: String,
    pub title: String,
    pub year: i32,
}

impl CompoundKey {
    pub fn new(
        director: impl Into<String>,
        title: impl Into<String>,
        year: i32,
    ) -> Result<Self> {
        let director = normalize_text("director", director.into())?;
        let title = normalize_text("title", title.into())?;
        validate_year(year)?;
        Ok(Self {
            director,
            title,
            year,
        })
    }
}

impl std::fmt::Display for CompoundKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} ({})", self.director, self.title, self.year)
    }
}

/// A movie record as stored in the catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CatalogEntry {
    pub id: CatalogId,
    pub director: String,
    pub title: String,
    pub year: i32,
    pub genre: String,
    /// Runtime in minutes.
    pub duration: i32,
    pub rating: f64,
    pub watch_count: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deleted: bool,
}

impl CatalogEntry {
    pub fn key(&self) -> CompoundKey {
        CompoundKey {
            director: self.director.clone(),
            title: self.title.clone(),
            year: self.year,
        }
    }

    pub fn matches(&self, key: &CompoundKey) -> bool {
        self.director == key.director
            && self.title == key.title
            && self.year == key.year
    }
}

/// Payload for inserting a movie into the catalog.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NewCatalogEntry {
    pub director: String,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub duration: i32,
    pub rating: f64,
}

impl NewCatalogEntry {
    /// Check field constraints and return the normalized record.
    pub fn validated(self) -> Result<Self> {
        let director = normalize_text("director", self.director)?;
        let title = normalize_text("title", self.title)?;
        let genre = normalize_text("genre", self.genre)?;
        validate_year(self.year)?;

        if self.duration <= 0 {
            return Err(ModelError::invalid(
                "duration",
                format!("must be a positive number of minutes, got {}", self.duration),
            ));
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ModelError::invalid(
                "rating",
                format!(
                    "must be between {MIN_RATING:.1} and {MAX_RATING:.1}, got {}",
                    self.rating
                ),
            ));
        }

        Ok(Self {
            director,
            title,
            year: self.year,
            genre,
            duration: self.duration,
            rating: self.rating,
        })
    }

    pub fn key(&self) -> CompoundKey {
        CompoundKey {
            director: self.director.clone(),
            title: self.title.clone(),
            year: self.year,
        }
    }
}

/// Ordering applied when listing the catalog. Both orders are descending;
/// rating takes precedence when both are requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogSort {
    #[cfg_attr(feature = "serde", serde(default))]
    pub by_rating: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub by_watch_count: bool,
}

impl CatalogSort {
    pub fn leaderboard() -> Self {
        Self {
            by_rating: false,
            by_watch_count: true,
        }
    }

    pub fn compare(
        &self,
        a: &CatalogEntry,
        b: &CatalogEntry,
    ) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        let mut ordering = Ordering::Equal;
        if self.by_rating {
            ordering = ordering.then_with(|| b.rating.total_cmp(&a.rating));
        }
        if self.by_watch_count {
            ordering = ordering.then_with(|| b.watch_count.cmp(&a.watch_count));
        }
        ordering.then_with(|| a.id.cmp(&b.id))
    }
}

fn normalize_text(field: &'static str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ModelError::invalid(field, "must not be empty"));
    }
    Ok(trimmed.to_string())
}

fn validate_year(year: i32) -> Result<()> {
    if year < 0 {
        return Err(ModelError::invalid(
            "year",
            format!("must be a positive integer, got {year}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> NewCatalogEntry {
        NewCatalogEntry {
            director: "  Agnès Varda ".into(),
            title: "Cléo from 5 to 7".into(),
            year: 1962,
            genre: "Drama".into(),
            duration: 90,
            rating: 7.8,
        }
    }

    fn entry(id: i64, rating: f64, watch_count: i64) -> CatalogEntry {
        CatalogEntry {
            id: CatalogId(id),
            director: "d".into(),
            title: format!("t{id}"),
            year: 2000,
            genre: "g".into(),
            duration: 100,
            rating,
            watch_count,
            deleted: false,
        }
    }

    #[test]
    fn validated_trims_text_fields() {
        let movie = draft().validated().unwrap();
        assert_eq!(movie.director, "Agnès Varda");
    }

    #[test]
    fn rejects_non_positive_duration() {
        let mut movie = draft();
        movie.duration = 0;
        let err = movie.validated().unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidField {
                field: "duration",
                ..
            }
        ));
    }

    #[test]
    fn rejects_rating_outside_scale() {
        for rating in [-0.1, 10.5] {
            let mut movie = draft();
            movie.rating = rating;
            assert!(movie.validated().is_err(), "rating {rating} accepted");
        }
        let mut movie = draft();
        movie.rating = 10.0;
        assert!(movie.validated().is_ok());
    }

    #[test]
    fn compound_key_rejects_blank_director() {
        assert!(CompoundKey::new("   ", "Title", 2001).is_err());
        assert!(CompoundKey::new("Director", "Title", -1).is_err());
    }

    #[test]
    fn sort_orders_by_rating_then_watch_count() {
        let mut entries =
            vec![entry(1, 7.0, 3), entry(2, 9.0, 1), entry(3, 7.0, 8)];
        let sort = CatalogSort {
            by_rating: true,
            by_watch_count: true,
        };
        entries.sort_by(|a, b| sort.compare(a, b));
        let ids: Vec<i64> = entries.iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn unsorted_listing_keeps_id_order() {
        let mut entries = vec![entry(3, 1.0, 0), entry(1, 9.0, 5)];
        entries.sort_by(|a, b| CatalogSort::default().compare(a, b));
        assert_eq!(entries[0].id, CatalogId(1));
    }
}
