use std::{fmt, sync::Arc};

use marquee_core::catalog::{CatalogPort, CatalogRepository};
use marquee_core::providers::TmdbProvider;
use marquee_core::users::UserService;
use marquee_core::watchlist::WatchlistService;

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub watchlist: Arc<WatchlistService>,
    pub users: Arc<UserService>,
    pub metadata: Arc<TmdbProvider>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the services around one catalog store. The watchlist sees the
    /// same store through its narrower port.
    pub fn new<C>(
        config: Config,
        catalog: Arc<C>,
        users: UserService,
        metadata: TmdbProvider,
    ) -> Self
    where
        C: CatalogRepository + 'static,
    {
        let port: Arc<dyn CatalogPort> = catalog.clone();
        Self {
            config: Arc::new(config),
            catalog,
            watchlist: Arc::new(WatchlistService::new(port)),
            users: Arc::new(users),
            metadata: Arc::new(metadata),
        }
    }
}
