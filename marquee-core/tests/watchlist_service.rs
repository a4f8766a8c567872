use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use marquee_core::catalog::{CatalogPort, CatalogRepository, InMemoryCatalog};
use marquee_core::model::{
    CatalogEntry, CatalogId, CatalogSort, CompoundKey, NewCatalogEntry,
};
use marquee_core::watchlist::WatchlistService;
use marquee_core::{CatalogError, WatchlistError};

fn movie(director: &str, title: &str, year: i32, duration: i32) -> NewCatalogEntry {
    NewCatalogEntry {
        director: director.into(),
        title: title.into(),
        year,
        genre: "Drama".into(),
        duration,
        rating: 8.0,
    }
}

fn key(director: &str, title: &str, year: i32) -> CompoundKey {
    CompoundKey::new(director, title, year).unwrap()
}

struct Fixture {
    catalog: Arc<InMemoryCatalog>,
    service: WatchlistService,
}

async fn fixture() -> Fixture {
    let catalog = Arc::new(InMemoryCatalog::new());
    for (director, title, year, duration) in [
        ("A", "T1", 2000, 100),
        ("B", "T2", 2001, 110),
        ("X", "x", 1990, 95),
        ("Y", "y", 1991, 105),
        ("Z", "z", 1992, 120),
    ] {
        catalog
            .create(movie(director, title, year, duration))
            .await
            .unwrap();
    }
    let service = WatchlistService::new(catalog.clone());
    Fixture { catalog, service }
}

async fn xyz(service: &WatchlistService) {
    for k in [key("X", "x", 1990), key("Y", "y", 1991), key("Z", "z", 1992)] {
        service.add(k).await.unwrap();
    }
}

async fn directors(service: &WatchlistService) -> Vec<String> {
    service
        .get_all()
        .await
        .into_iter()
        .map(|item| item.key.director)
        .collect()
}

#[tokio::test]
async fn add_two_movies_lists_them_in_order_with_cursor_on_first() {
    let Fixture { service, .. } = fixture().await;

    service.add(key("A", "T1", 2000)).await.unwrap();
    service.add(key("B", "T2", 2001)).await.unwrap();

    let items = service.get_all().await;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].key, key("A", "T1", 2000));
    assert_eq!(items[0].film_number.get(), 1);
    assert_eq!(items[1].key, key("B", "T2", 2001));
    assert_eq!(items[1].film_number.get(), 2);
    assert!(items[0].is_current);
    assert!(!items[1].is_current);
    assert!(service.contains(&key("B", "T2", 2001)).await);
    assert!(!service.contains(&key("X", "x", 1990)).await);
}

#[tokio::test]
async fn add_rejects_unknown_and_duplicate_movies() {
    let Fixture { catalog, service } = fixture().await;

    let missing = service.add(key("Nobody", "Nothing", 1900)).await.unwrap_err();
    assert!(missing.is_not_found());
    assert!(matches!(
        missing,
        WatchlistError::Catalog(CatalogError::NotFound(_))
    ));

    service.add(key("A", "T1", 2000)).await.unwrap();
    let duplicate = service.add(key("A", "T1", 2000)).await.unwrap_err();
    assert!(matches!(duplicate, WatchlistError::AlreadyInWatchlist(_)));
    assert_eq!(service.get_all().await.len(), 1);

    let deleted = catalog.find_by_compound_key(&key("B", "T2", 2001)).await.unwrap();
    catalog.soft_delete(deleted.id).await.unwrap();
    assert!(service.add(key("B", "T2", 2001)).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn removing_an_earlier_film_keeps_the_cursor_on_the_same_movie() {
    let Fixture { service, .. } = fixture().await;
    xyz(&service).await;
    service.go_to_film_number(2).await.unwrap();

    let removal = service.remove_by_film_number(1).await.unwrap();

    assert_eq!(removal.removed.key, key("X", "x", 1990));
    assert_eq!(removal.remaining.len(), 2);
    assert!(removal.remaining[0].is_current);
    assert_eq!(directors(&service).await, vec!["Y", "Z"]);
    let current = service.current().await.unwrap();
    assert_eq!(current.film_number.get(), 1);
    assert_eq!(current.movie.director, "Y");
}

#[tokio::test]
async fn remove_by_compound_key_reports_missing_entries() {
    let Fixture { service, .. } = fixture().await;
    xyz(&service).await;

    let err = service
        .remove_by_compound_key(&key("A", "T1", 2000))
        .await
        .unwrap_err();
    assert!(matches!(err, WatchlistError::NotFound(_)));

    let removal = service
        .remove_by_compound_key(&key("Z", "z", 1992))
        .await
        .unwrap();
    assert_eq!(removal.removed.key, key("Z", "z", 1992));
    let remaining: Vec<_> = removal
        .remaining
        .iter()
        .map(|item| item.key.director.as_str())
        .collect();
    assert_eq!(remaining, vec!["X", "Y"]);
    assert_eq!(directors(&service).await, vec!["X", "Y"]);
}

#[tokio::test]
async fn swap_first_and_last_reverses_three_films() {
    let Fixture { service, .. } = fixture().await;
    xyz(&service).await;

    let order = service.swap(1, 3).await.unwrap();

    let order: Vec<_> = order.into_iter().map(|item| item.key.director).collect();
    assert_eq!(order, vec!["Z", "Y", "X"]);
}

#[tokio::test]
async fn move_to_film_number_out_of_range_leaves_order_unchanged() {
    let Fixture { service, .. } = fixture().await;
    xyz(&service).await;

    let err = service
        .move_to_film_number(&key("X", "x", 1990), 4)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WatchlistError::OutOfRange {
            film_number: 4,
            length: 3
        }
    ));
    assert_eq!(directors(&service).await, vec!["X", "Y", "Z"]);
}

#[tokio::test]
async fn move_to_beginning_and_end_track_the_cursor() {
    let Fixture { service, .. } = fixture().await;
    xyz(&service).await;
    service.go_to_film_number(2).await.unwrap();

    service.move_to_end(&key("Y", "y", 1991)).await.unwrap();
    assert_eq!(directors(&service).await, vec!["X", "Z", "Y"]);
    assert_eq!(service.current().await.unwrap().film_number.get(), 3);

    service.move_to_beginning(&key("Y", "y", 1991)).await.unwrap();
    assert_eq!(directors(&service).await, vec!["Y", "X", "Z"]);
    assert_eq!(service.current().await.unwrap().film_number.get(), 1);
}

#[tokio::test]
async fn summary_sums_durations_and_skips_deleted_movies() {
    let Fixture { catalog, service } = fixture().await;
    xyz(&service).await;

    let summary = service.length_and_total_duration().await.unwrap();
    assert_eq!(summary.length, 3);
    assert_eq!(summary.total_duration, 95 + 105 + 120);

    let y = catalog.find_by_compound_key(&key("Y", "y", 1991)).await.unwrap();
    catalog.soft_delete(y.id).await.unwrap();

    let summary = service.length_and_total_duration().await.unwrap();
    assert_eq!(summary.length, 3);
    assert_eq!(summary.total_duration, 95 + 120);
}

#[tokio::test]
async fn get_by_film_number_resolves_catalog_record() {
    let Fixture { catalog, service } = fixture().await;
    xyz(&service).await;

    let movie = service.get_by_film_number(3).await.unwrap();
    assert_eq!(movie.title, "z");
    assert_eq!(movie.duration, 120);

    assert!(matches!(
        service.get_by_film_number(0).await,
        Err(WatchlistError::OutOfRange { .. })
    ));

    catalog.soft_delete(movie.id).await.unwrap();
    assert!(matches!(
        service.get_by_film_number(3).await,
        Err(WatchlistError::DanglingReference(id)) if id == movie.id
    ));
}

#[tokio::test]
async fn play_all_counts_every_film_once() {
    let Fixture { catalog, service } = fixture().await;
    xyz(&service).await;

    service.play_all().await.unwrap();

    for k in [key("X", "x", 1990), key("Y", "y", 1991), key("Z", "z", 1992)] {
        let movie = catalog.find_by_compound_key(&k).await.unwrap();
        assert_eq!(movie.watch_count, 1, "{k}");
    }
    assert_eq!(service.current().await.unwrap().film_number.get(), 3);
}

#[tokio::test]
async fn clear_resets_everything() {
    let Fixture { service, .. } = fixture().await;
    xyz(&service).await;

    assert_eq!(service.clear().await, 3);
    assert!(service.get_all().await.is_empty());
    assert!(matches!(
        service.current().await,
        Err(WatchlistError::EmptyWatchlist)
    ));
    assert_eq!(service.length_and_total_duration().await.unwrap().length, 0);
}

#[tokio::test]
async fn concurrent_adds_never_duplicate_an_entry() {
    let Fixture { service, .. } = fixture().await;
    let service = Arc::new(service);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.add(key("A", "T1", 2000)).await
        }));
    }

    let mut successes = 0;
    for handle in futures::future::join_all(handles).await {
        if handle.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 1);
    let items = service.get_all().await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].catalog_id, CatalogId(1));
}

/// Catalog that can be switched into failing writes and key lookups with a
/// database error while id lookups keep working.
#[derive(Debug, Default)]
struct FlakyCatalog {
    inner: InMemoryCatalog,
    failing: AtomicBool,
}

impl FlakyCatalog {
    fn outage(&self) -> CatalogError {
        CatalogError::Database("connection reset".into())
    }

    fn is_failing(&self) -> bool {
        self.failing.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogPort for FlakyCatalog {
    async fn find_by_compound_key(
        &self,
        key: &CompoundKey,
    ) -> Result<CatalogEntry, CatalogError> {
        if self.is_failing() {
            return Err(self.outage());
        }
        self.inner.find_by_compound_key(key).await
    }

    async fn find_by_id(&self, id: CatalogId) -> Result<CatalogEntry, CatalogError> {
        self.inner.find_by_id(id).await
    }

    async fn increment_watch_count(&self, id: CatalogId) -> Result<(), CatalogError> {
        if self.is_failing() {
            return Err(self.outage());
        }
        self.inner.increment_watch_count(id).await
    }

    async fn get_duration(&self, id: CatalogId) -> Result<i32, CatalogError> {
        self.inner.get_duration(id).await
    }
}

async fn flaky_xyz() -> (Arc<FlakyCatalog>, WatchlistService) {
    let catalog = Arc::new(FlakyCatalog::default());
    for (director, title, year) in [("X", "x", 1990), ("Y", "y", 1991), ("Z", "z", 1992)] {
        catalog
            .inner
            .create(movie(director, title, year, 100))
            .await
            .unwrap();
    }
    let service = WatchlistService::new(catalog.clone());
    xyz(&service).await;
    (catalog, service)
}

async fn cursor_film(service: &WatchlistService) -> Option<usize> {
    service
        .get_all()
        .await
        .iter()
        .find(|item| item.is_current)
        .map(|item| item.film_number.get())
}

#[tokio::test]
async fn failed_play_all_leaves_cursor_and_order_alone() {
    let (catalog, service) = flaky_xyz().await;
    service.go_to_film_number(3).await.unwrap();
    catalog.failing.store(true, Ordering::SeqCst);

    let err = service.play_all().await.unwrap_err();

    assert!(matches!(err, WatchlistError::Catalog(CatalogError::Database(_))));
    assert_eq!(cursor_film(&service).await, Some(3));
    assert_eq!(directors(&service).await, vec!["X", "Y", "Z"]);
}

#[tokio::test]
async fn failed_play_rest_leaves_cursor_and_order_alone() {
    let (catalog, service) = flaky_xyz().await;
    service.go_to_film_number(2).await.unwrap();
    catalog.failing.store(true, Ordering::SeqCst);

    let err = service.play_rest().await.unwrap_err();

    assert!(matches!(err, WatchlistError::Catalog(CatalogError::Database(_))));
    assert_eq!(cursor_film(&service).await, Some(2));
    assert_eq!(directors(&service).await, vec!["X", "Y", "Z"]);

    catalog.failing.store(false, Ordering::SeqCst);
    let report = service.play_rest().await.unwrap();
    assert_eq!(report.played.len(), 2);
    assert_eq!(cursor_film(&service).await, Some(3));
}

#[tokio::test]
async fn failed_add_leaves_watchlist_untouched() {
    let (catalog, service) = flaky_xyz().await;
    service.remove_by_film_number(3).await.unwrap();
    service.go_to_film_number(2).await.unwrap();
    catalog.failing.store(true, Ordering::SeqCst);

    let err = service.add(key("Z", "z", 1992)).await.unwrap_err();

    assert!(matches!(err, WatchlistError::Catalog(CatalogError::Database(_))));
    assert_eq!(directors(&service).await, vec!["X", "Y"]);
    assert_eq!(cursor_film(&service).await, Some(2));
    assert!(!service.contains(&key("Z", "z", 1992)).await);
}

#[tokio::test]
async fn clearing_with_the_catalog_empties_both() {
    let Fixture { catalog, service } = fixture().await;
    xyz(&service).await;

    let dropped = service.clear_with_catalog(catalog.as_ref()).await.unwrap();

    assert_eq!(dropped, 3);
    assert!(service.get_all().await.is_empty());
    assert!(catalog.list(CatalogSort::default()).await.unwrap().is_empty());
}
