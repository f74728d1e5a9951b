use std::fmt;

use serde::{Deserialize, Serialize};

/// URL value of the home sentinel entry.
pub const HOME_SENTINEL: &str = "home";

/// Normalized URL used to key review data.
///
/// Built through [`PageKey::new`], which runs the same canonicalisation as the
/// address bar, so two spellings of one page always map to the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(String);

impl PageKey {
    pub fn new(raw: &str) -> Self {
        Self(crate::services::url_normalizer::normalize_url(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of classifying address bar input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationTarget {
    /// A page to load; `url` is the canonical page key (no scheme, no `www.`).
    Direct { url: String },
    /// Free text handed to the search service.
    Search { query: String },
}

impl NavigationTarget {
    pub fn home() -> Self {
        NavigationTarget::Direct {
            url: HOME_SENTINEL.to_string(),
        }
    }

    pub fn is_home(&self) -> bool {
        matches!(self, NavigationTarget::Direct { url } if url == HOME_SENTINEL)
    }

    /// Page key for review lookups. `None` for searches and the home sentinel.
    pub fn page_key(&self) -> Option<PageKey> {
        match self {
            NavigationTarget::Direct { url } if url != HOME_SENTINEL => Some(PageKey::new(url)),
            _ => None,
        }
    }

    /// What the page viewer should display for this target.
    pub fn viewer_target(&self) -> ViewerTarget {
        match self {
            NavigationTarget::Direct { url } if url == HOME_SENTINEL => ViewerTarget::Home,
            NavigationTarget::Direct { url } => ViewerTarget::Page {
                url: format!("https://{}", url),
            },
            NavigationTarget::Search { query } => ViewerTarget::SearchResults {
                query: query.clone(),
            },
        }
    }

    /// Text shown in the address bar for this target.
    pub fn display_text(&self) -> &str {
        match self {
            NavigationTarget::Direct { url } => url,
            NavigationTarget::Search { query } => query,
        }
    }
}

/// One position in the navigation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub target: NavigationTarget,
}

impl HistoryEntry {
    pub fn new(target: NavigationTarget) -> Self {
        Self { target }
    }

    pub fn home() -> Self {
        Self::new(NavigationTarget::home())
    }
}

/// What the embedded viewer is asked to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewerTarget {
    Home,
    Page { url: String },
    SearchResults { query: String },
}
