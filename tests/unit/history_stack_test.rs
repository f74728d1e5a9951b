//! Unit tests for the HistoryStack state machine.

use sitelens::managers::history_stack::{HistoryStack, HistoryStackTrait};
use sitelens::types::errors::HistoryError;
use sitelens::types::navigation::{HistoryEntry, NavigationTarget};

fn page(url: &str) -> HistoryEntry {
    HistoryEntry::new(NavigationTarget::Direct { url: url.to_string() })
}

#[test]
fn test_initial_state_is_empty_with_home_current() {
    let stack = HistoryStack::new();
    assert!(stack.is_empty());
    assert_eq!(stack.cursor(), None);
    assert!(!stack.can_go_back());
    assert!(!stack.can_go_forward());
    assert_eq!(stack.current(), HistoryEntry::home());
}

#[test]
fn test_back_and_forward_fail_on_empty_stack() {
    let mut stack = HistoryStack::new();
    assert_eq!(stack.back(), Err(HistoryError::NoBackEntry));
    assert_eq!(stack.forward(), Err(HistoryError::NoForwardEntry));
    assert!(stack.is_empty());
}

#[test]
fn test_push_push_back_returns_first_entry() {
    let mut stack = HistoryStack::new();
    stack.push(page("a.com"));
    stack.push(page("b.com"));

    let entry = stack.back().unwrap();
    assert_eq!(entry, page("a.com"));
    assert_eq!(stack.current(), page("a.com"));
    assert!(stack.can_go_forward());
    assert!(!stack.can_go_back());
}

#[test]
fn test_push_after_back_discards_forward_entries() {
    let mut stack = HistoryStack::new();
    stack.push(page("a.com"));
    stack.push(page("b.com"));
    stack.back().unwrap();
    stack.push(page("c.com"));

    assert_eq!(stack.forward(), Err(HistoryError::NoForwardEntry));
    assert_eq!(stack.entries(), &[page("a.com"), page("c.com")]);
    assert_eq!(stack.current(), page("c.com"));
    assert_eq!(stack.back().unwrap(), page("a.com"));
}

#[test]
fn test_failed_back_leaves_state_unchanged() {
    let mut stack = HistoryStack::new();
    stack.push(page("a.com"));
    assert_eq!(stack.back(), Err(HistoryError::NoBackEntry));
    assert_eq!(stack.cursor(), Some(0));
    assert_eq!(stack.current(), page("a.com"));
}

#[test]
fn test_forward_walks_back_to_newest() {
    let mut stack = HistoryStack::new();
    for url in ["a.com", "b.com", "c.com"] {
        stack.push(page(url));
    }
    stack.back().unwrap();
    stack.back().unwrap();
    assert_eq!(stack.forward().unwrap(), page("b.com"));
    assert_eq!(stack.forward().unwrap(), page("c.com"));
    assert!(!stack.can_go_forward());
}

#[test]
fn test_home_pushes_sentinel() {
    let mut stack = HistoryStack::new();
    stack.push(page("a.com"));
    stack.home();
    assert_eq!(stack.len(), 2);
    assert!(stack.current().target.is_home());
    assert!(stack.can_go_back());
}
