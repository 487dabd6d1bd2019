//! Tests for termination conditions.

use std::time::Duration;

use super::*;

#[test]
fn test_no_termination_never_fires() {
    let scope = SearchScope::new();
    assert!(!NoTermination.is_terminated(&scope));
}

#[test]
fn test_node_count_termination() {
    let mut scope = SearchScope::new();
    let term = NodeCountTermination::new(2);
    assert!(!term.is_terminated(&scope));
    scope.stats_mut().on_node(0);
    assert!(!term.is_terminated(&scope));
    scope.stats_mut().on_node(1);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_zero_time_limit_fires_immediately() {
    let scope = SearchScope::new();
    assert!(TimeTermination::new(Duration::ZERO).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3600).is_terminated(&scope));
}

#[test]
fn test_option_termination() {
    let scope = SearchScope::new();
    let none: Option<NodeCountTermination> = None;
    assert!(!none.is_terminated(&scope));
    assert!(Some(NodeCountTermination::new(0)).is_terminated(&scope));
}

#[test]
fn test_or_termination_any_fires() {
    let scope = SearchScope::new();
    let term = OrTermination((TimeTermination::seconds(3600), NodeCountTermination::new(0)));
    assert!(term.is_terminated(&scope));

    let term = OrTermination((TimeTermination::seconds(3600), NoTermination));
    assert!(!term.is_terminated(&scope));
}
