use crate::error::ModelError;

/// Identifier assigned to a movie record by the catalog store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
pub struct CatalogId(pub i64);

impl CatalogId {
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CatalogId {
    fn from(value: i64) -> Self {
        CatalogId(value)
    }
}

impl std::fmt::Display for CatalogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 1-indexed position of an entry in the watchlist.
///
/// Film numbers are derived from position only; `FilmNumber::from_index(i)`
/// is always `i + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FilmNumber(usize);

impl FilmNumber {
    pub fn new(value: usize) -> Result<Self, ModelError> {
        if value == 0 {
            return Err(ModelError::InvalidFilmNumber(value));
        }
        Ok(FilmNumber(value))
    }

    pub fn from_index(index: usize) -> Self {
        FilmNumber(index + 1)
    }

    pub fn get(&self) -> usize {
        self.0
    }

    pub fn to_index(&self) -> usize {
        self.0 - 1
    }
}

impl std::fmt::Display for FilmNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn film_number_rejects_zero() {
        assert_eq!(FilmNumber::new(0), Err(ModelError::InvalidFilmNumber(0)));
    }

    #[test]
    fn film_number_translates_to_zero_based_index() {
        let film = FilmNumber::new(3).unwrap();
        assert_eq!(film.to_index(), 2);
        assert_eq!(FilmNumber::from_index(film.to_index()), film);
    }
}
