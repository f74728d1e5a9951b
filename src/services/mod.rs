// Sitelens services
// Services provide the review pipeline (store, remote client, local cache), address bar
// classification, search, panel formatting and settings.

pub mod review_cache;
pub mod review_format;
pub mod review_store;
pub mod search_client;
pub mod settings_engine;
pub mod sync_client;
pub mod url_normalizer;
