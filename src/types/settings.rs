use serde::{Deserialize, Serialize};

use super::search::SearchEngine;

/// Top-level shell settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ShellSettings {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub review_service: ReviewServiceSettings,
    #[serde(default)]
    pub search: SearchSettings,
    #[serde(default)]
    pub cache: CacheSettings,
}

/// General shell behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    /// Whether the review panel is open when the shell starts.
    pub reviews_visible: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            reviews_visible: true,
        }
    }
}

/// Where the remote review service lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReviewServiceSettings {
    pub base_url: String,
    pub fetch_path: String,
    pub post_path: String,
    pub timeout_secs: u64,
}

impl Default for ReviewServiceSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            fetch_path: "/reviews".to_string(),
            post_path: "/reviews/comment".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Where the external search/ranking service lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchSettings {
    pub base_url: String,
    pub path: String,
    pub default_engine: SearchEngine,
    pub timeout_secs: u64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            path: "/api/search".to_string(),
            default_engine: SearchEngine::Google,
            timeout_secs: 10,
        }
    }
}

/// Local review cache location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheSettings {
    /// File name inside the data directory.
    pub database_file: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            database_file: "sitelens.db".to_string(),
        }
    }
}
