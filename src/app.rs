//! App core for Sitelens.
//!
//! Holds the settings, the navigation controller (and through it the review
//! store) and the search client.

use std::error::Error;
use std::sync::Arc;

use crate::database::connection::Database;
use crate::managers::navigation_controller::NavigationController;
use crate::managers::page_viewer::ViewerState;
use crate::platform;
use crate::services::review_cache::{ReviewCache, SqliteReviewCache};
use crate::services::review_store::ReviewStore;
use crate::services::search_client::SearchClient;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::services::sync_client::{HttpReviewClient, ReviewService};

/// Central application struct.
pub struct App {
    pub settings_engine: SettingsEngine,
    pub navigation: NavigationController<ViewerState>,
    pub search: SearchClient,
}

impl App {
    /// Loads settings and opens the SQLite review cache in the data directory.
    pub fn new(settings_engine: SettingsEngine) -> Result<Self, Box<dyn Error>> {
        let mut settings_engine = settings_engine;
        load_settings(&mut settings_engine);

        let data_dir = platform::get_data_dir();
        std::fs::create_dir_all(&data_dir)?;
        let db_path = data_dir.join(&settings_engine.get_settings().cache.database_file);
        log::info!("Opening review cache at {}", db_path.display());
        let db = Database::open(&db_path)?;

        Self::with_cache(settings_engine, Arc::new(SqliteReviewCache::new(db)))
    }

    /// Uses the HTTP review client described by the (already loaded) settings
    /// with the given cache.
    pub fn with_cache(
        settings_engine: SettingsEngine,
        cache: Arc<dyn ReviewCache>,
    ) -> Result<Self, Box<dyn Error>> {
        let client = HttpReviewClient::new(settings_engine.get_settings().review_service.clone())?;
        Self::with_services(settings_engine, Arc::new(client), cache)
    }

    /// Builds the app around explicit review collaborators.
    pub fn with_services(
        settings_engine: SettingsEngine,
        service: Arc<dyn ReviewService>,
        cache: Arc<dyn ReviewCache>,
    ) -> Result<Self, Box<dyn Error>> {
        let settings = settings_engine.get_settings().clone();
        let store = Arc::new(ReviewStore::new(service, cache));
        let navigation = NavigationController::new(ViewerState::new(), store)
            .with_reviews_visible(settings.general.reviews_visible);
        let search = SearchClient::new(settings.search)?;

        Ok(Self {
            settings_engine,
            navigation,
            search,
        })
    }
}

fn load_settings(engine: &mut SettingsEngine) {
    if let Err(e) = engine.load() {
        log::warn!("Using default settings, {} could not be loaded: {}", engine.get_config_path(), e);
    }
}
