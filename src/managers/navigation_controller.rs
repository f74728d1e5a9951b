//! Navigation controller for the shell.
//!
//! Ties the address bar, the history stack, the page viewer and the review
//! panel together. State transitions are synchronous and return the page key
//! whose reviews need loading; the async [`NavigationController::run`] driver
//! performs the load and applies it.
//!
//! Review results are only applied while their page is still the one on
//! screen. A slow response for a page the user already left is dropped.

use std::sync::Arc;

use crate::managers::history_stack::{HistoryStack, HistoryStackTrait};
use crate::managers::page_viewer::PageViewer;
use crate::services::review_store::ReviewStore;
use crate::services::url_normalizer;
use crate::types::errors::NavigationError;
use crate::types::navigation::{HistoryEntry, NavigationTarget, PageKey};
use crate::types::review::WebsiteReviewData;

/// A user action from the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavCommand {
    Navigate(String),
    Back,
    Forward,
    Refresh,
    Home,
}

/// What the review panel currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReviewPanel {
    pub page_key: Option<PageKey>,
    pub data: Option<WebsiteReviewData>,
    pub visible: bool,
}

/// Orchestrates navigation and the review panel.
pub struct NavigationController<V: PageViewer> {
    history: HistoryStack,
    viewer: V,
    reviews: Arc<ReviewStore>,
    panel: ReviewPanel,
}

impl<V: PageViewer> NavigationController<V> {
    pub fn new(viewer: V, reviews: Arc<ReviewStore>) -> Self {
        Self {
            history: HistoryStack::new(),
            viewer,
            reviews,
            panel: ReviewPanel {
                visible: true,
                ..ReviewPanel::default()
            },
        }
    }

    pub fn with_reviews_visible(mut self, visible: bool) -> Self {
        self.panel.visible = visible;
        self
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn viewer(&self) -> &V {
        &self.viewer
    }

    pub fn panel(&self) -> &ReviewPanel {
        &self.panel
    }

    pub fn reviews(&self) -> &Arc<ReviewStore> {
        &self.reviews
    }

    pub fn current(&self) -> HistoryEntry {
        self.history.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.history.can_go_back()
    }

    pub fn can_go_forward(&self) -> bool {
        self.history.can_go_forward()
    }

    /// Classifies `raw`, pushes it onto the history and shows it.
    ///
    /// Blank input is rejected before anything changes.
    pub fn navigate(&mut self, raw: &str) -> Result<Option<PageKey>, NavigationError> {
        let target = url_normalizer::classify(raw)?;
        log::debug!("Navigating to {:?}", target);
        self.history.push(HistoryEntry::new(target.clone()));
        Ok(self.enter(&target))
    }

    pub fn back(&mut self) -> Result<Option<PageKey>, NavigationError> {
        let entry = self.history.back()?;
        Ok(self.enter(&entry.target))
    }

    pub fn forward(&mut self) -> Result<Option<PageKey>, NavigationError> {
        let entry = self.history.forward()?;
        Ok(self.enter(&entry.target))
    }

    /// Re-shows the current entry without touching the history.
    pub fn refresh(&mut self) -> Option<PageKey> {
        let entry = self.history.current();
        self.enter(&entry.target)
    }

    /// Pushes the home sentinel and clears the review panel.
    pub fn home(&mut self) {
        self.history.home();
        self.enter(&NavigationTarget::home());
    }

    /// Shows `target` and points the review panel at its page, if it has one.
    fn enter(&mut self, target: &NavigationTarget) -> Option<PageKey> {
        self.viewer.show(&target.viewer_target());

        let key = target.page_key();
        if self.panel.page_key != key {
            self.panel.data = key.as_ref().and_then(|k| self.reviews.snapshot(k));
            self.panel.page_key = key.clone();
        }
        key
    }

    /// Applies a finished review load to the panel.
    ///
    /// Returns `false`, leaving the panel untouched, when `key` is no longer
    /// the page on screen.
    pub fn apply_reviews(&mut self, key: &PageKey, data: WebsiteReviewData) -> bool {
        if self.panel.page_key.as_ref() != Some(key) {
            log::debug!("Discarding stale reviews for {}", key);
            return false;
        }
        self.panel.data = Some(data);
        true
    }

    /// Performs `command` and, if it landed on a page, loads its reviews.
    pub async fn run(&mut self, command: NavCommand) -> Result<(), NavigationError> {
        let pending = match command {
            NavCommand::Navigate(raw) => self.navigate(&raw)?,
            NavCommand::Back => self.back()?,
            NavCommand::Forward => self.forward()?,
            NavCommand::Refresh => self.refresh(),
            NavCommand::Home => {
                self.home();
                None
            }
        };

        if let Some(key) = pending {
            let data = self.reviews.load(&key).await;
            self.apply_reviews(&key, data);
        }
        Ok(())
    }

    fn active_page(&self) -> Result<PageKey, NavigationError> {
        self.panel.page_key.clone().ok_or(NavigationError::NoActivePage)
    }

    /// Rates the page on screen.
    pub fn rate_current_page(&mut self, stars: u8) -> Result<WebsiteReviewData, NavigationError> {
        let key = self.active_page()?;
        let data = self.reviews.submit_rating(&key, stars)?;
        self.apply_reviews(&key, data.clone());
        Ok(data)
    }

    /// Comments on the page on screen. Without an explicit `rating` the
    /// comment carries the user's own rating for the page, or 0 if they have
    /// not rated it.
    pub async fn comment_on_current_page(
        &mut self,
        author: &str,
        text: &str,
        rating: Option<u8>,
    ) -> Result<WebsiteReviewData, NavigationError> {
        let key = self.active_page()?;
        let rating = rating
            .or_else(|| self.panel.data.as_ref().and_then(|d| d.user_rating))
            .unwrap_or(0);
        let data = self.reviews.submit_comment(&key, author, text, rating).await?;
        self.apply_reviews(&key, data.clone());
        Ok(data)
    }

    /// Flips review panel visibility and returns the new state.
    pub fn toggle_reviews(&mut self) -> bool {
        self.panel.visible = !self.panel.visible;
        self.panel.visible
    }
}
