//! Unit tests for the NavigationController: history wiring, viewer updates,
//! review loading and the stale-result guard.

#[path = "../common/mod.rs"]
mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::FakeReviewService;
use sitelens::managers::navigation_controller::{NavCommand, NavigationController};
use sitelens::managers::page_viewer::ViewerState;
use sitelens::services::review_cache::MemoryReviewCache;
use sitelens::services::review_store::ReviewStore;
use sitelens::types::errors::{HistoryError, NavigationError, ReviewError};
use sitelens::types::navigation::{NavigationTarget, PageKey, ViewerTarget};
use sitelens::types::review::WebsiteReviewData;

fn setup() -> (Arc<FakeReviewService>, NavigationController<ViewerState>) {
    let service = Arc::new(FakeReviewService::new());
    let store = Arc::new(ReviewStore::new(
        service.clone(),
        Arc::new(MemoryReviewCache::new()),
    ));
    (service, NavigationController::new(ViewerState::new(), store))
}

fn page(url: &str) -> ViewerTarget {
    ViewerTarget::Page { url: url.to_string() }
}

#[tokio::test]
async fn test_navigate_shows_page_and_loads_reviews() {
    let (service, mut nav) = setup();
    service.seed("example.com", "Ada", "Solid", 5);

    nav.run(NavCommand::Navigate("www.Example.com/".to_string())).await.unwrap();

    assert_eq!(nav.viewer().current(), &page("https://example.com"));
    assert_eq!(nav.panel().page_key, Some(PageKey::new("example.com")));
    let data = nav.panel().data.as_ref().expect("reviews should be loaded");
    assert_eq!(data.comments.len(), 1);
    assert_eq!(nav.history().len(), 1);
}

#[tokio::test]
async fn test_search_input_shows_results_without_review_load() {
    let (service, mut nav) = setup();
    nav.run(NavCommand::Navigate("rust borrow checker".to_string())).await.unwrap();

    assert_eq!(
        nav.viewer().current(),
        &ViewerTarget::SearchResults { query: "rust borrow checker".to_string() }
    );
    assert_eq!(nav.panel().page_key, None);
    assert_eq!(service.fetch_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_blank_input_changes_nothing() {
    let (_service, mut nav) = setup();
    let err = nav.run(NavCommand::Navigate("   ".to_string())).await.unwrap_err();
    assert!(matches!(err, NavigationError::EmptyInput));
    assert!(nav.history().is_empty());
    assert_eq!(nav.viewer().render_count(), 0);
}

#[tokio::test]
async fn test_back_and_forward_move_viewer() {
    let (_service, mut nav) = setup();
    nav.run(NavCommand::Navigate("a.com".to_string())).await.unwrap();
    nav.run(NavCommand::Navigate("b.com".to_string())).await.unwrap();

    nav.run(NavCommand::Back).await.unwrap();
    assert_eq!(nav.viewer().current(), &page("https://a.com"));
    assert_eq!(nav.panel().page_key, Some(PageKey::new("a.com")));
    assert!(nav.can_go_forward());

    nav.run(NavCommand::Forward).await.unwrap();
    assert_eq!(nav.viewer().current(), &page("https://b.com"));
    assert!(!nav.can_go_forward());
}

#[tokio::test]
async fn test_back_at_oldest_entry_is_error_and_keeps_view() {
    let (_service, mut nav) = setup();
    nav.run(NavCommand::Navigate("a.com".to_string())).await.unwrap();
    let renders = nav.viewer().render_count();

    let err = nav.run(NavCommand::Back).await.unwrap_err();
    assert!(matches!(err, NavigationError::History(HistoryError::NoBackEntry)));
    assert_eq!(nav.viewer().render_count(), renders);
    assert_eq!(nav.viewer().current(), &page("https://a.com"));
}

#[tokio::test]
async fn test_refresh_rerenders_and_reloads_without_history_change() {
    let (service, mut nav) = setup();
    nav.run(NavCommand::Navigate("a.com".to_string())).await.unwrap();
    service.seed("a.com", "Bob", "New since load", 3);

    nav.run(NavCommand::Refresh).await.unwrap();
    assert_eq!(nav.history().len(), 1);
    assert_eq!(nav.viewer().render_count(), 2);
    assert_eq!(nav.panel().data.as_ref().unwrap().comments.len(), 1);
    assert_eq!(service.fetch_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_home_pushes_sentinel_and_clears_panel() {
    let (_service, mut nav) = setup();
    nav.run(NavCommand::Navigate("a.com".to_string())).await.unwrap();
    nav.run(NavCommand::Home).await.unwrap();

    assert_eq!(nav.viewer().current(), &ViewerTarget::Home);
    assert_eq!(nav.current().target, NavigationTarget::home());
    assert_eq!(nav.panel().page_key, None);
    assert_eq!(nav.panel().data, None);
    assert!(nav.can_go_back());
}

#[test]
fn test_stale_reviews_are_discarded() {
    let (_service, mut nav) = setup();
    let first = nav.navigate("a.com").unwrap().unwrap();
    let second = nav.navigate("b.com").unwrap().unwrap();

    let stale = WebsiteReviewData::empty(first.clone());
    assert!(!nav.apply_reviews(&first, stale));
    assert_eq!(nav.panel().page_key, Some(second.clone()));
    assert_eq!(nav.panel().data, None);

    assert!(nav.apply_reviews(&second, WebsiteReviewData::empty(second.clone())));
    assert!(nav.panel().data.is_some());
}

#[tokio::test]
async fn test_rate_and_comment_on_current_page() {
    let (service, mut nav) = setup();
    nav.run(NavCommand::Navigate("docs.rs".to_string())).await.unwrap();

    let rated = nav.rate_current_page(4).unwrap();
    assert_eq!(rated.user_rating, Some(4));
    assert_eq!(nav.panel().data.as_ref().unwrap().rating.count, 1);

    let commented = nav.comment_on_current_page("Ada", "Handy", None).await.unwrap();
    assert_eq!(commented.comments[0].rating, 4);
    assert_eq!(commented.rating.count, 1);
    assert_eq!(service.stored_count("docs.rs"), 1);
}

#[tokio::test]
async fn test_explicit_comment_rating_overrides_user_rating() {
    let (_service, mut nav) = setup();
    nav.run(NavCommand::Navigate("docs.rs".to_string())).await.unwrap();
    nav.rate_current_page(4).unwrap();

    let commented = nav.comment_on_current_page("Ada", "Mixed", Some(2)).await.unwrap();
    assert_eq!(commented.comments[0].rating, 2);
    assert_eq!(commented.user_rating, Some(4));
    assert_eq!(nav.panel().data.as_ref(), Some(&commented));
}

#[tokio::test]
async fn test_review_actions_need_an_open_page() {
    let (_service, mut nav) = setup();
    assert!(matches!(nav.rate_current_page(3), Err(NavigationError::NoActivePage)));

    nav.run(NavCommand::Navigate("a.com".to_string())).await.unwrap();
    let err = nav.comment_on_current_page("Ada", "  ", None).await.unwrap_err();
    assert!(matches!(err, NavigationError::Review(ReviewError::EmptyInput)));
}

#[test]
fn test_toggle_reviews_flips_visibility() {
    let (_service, nav) = setup();
    let mut nav = nav.with_reviews_visible(false);
    assert!(nav.toggle_reviews());
    assert!(!nav.toggle_reviews());
}
