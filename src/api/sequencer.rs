//! Ordering guard for list fetches that may resolve out of order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::domain::types::UserId;
use crate::registry::Registry;

/// Ticket handed out when a list fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Issues monotonically increasing tickets for one list view.
///
/// A response is applied only while its ticket is still the latest one, so a
/// superseded fetch that resolves late is dropped instead of overwriting newer
/// results.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns `value` only when `ticket` has not been superseded.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            log::debug!("Discarding stale response for ticket {}", ticket.0);
            None
        }
    }
}

/// Key of one list view as seen from one browser tab.
type ViewKey = (UserId, &'static str, Uuid);

/// One [`RequestSequencer`] per user, list view and browser tab, shared
/// across workers.
///
/// Tabs are told apart by a token the list page carries in its query string,
/// so two tabs of the same user never discard each other's loads.
#[derive(Debug, Default)]
pub struct ListSequencers {
    views: Registry<ViewKey, RequestSequencer>,
}

impl ListSequencers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            views: Registry::with_capacity(capacity),
        }
    }

    pub fn for_view(&self, user: UserId, view: &'static str, tab: Uuid) -> Arc<RequestSequencer> {
        self.views.get_or_create((user, view, tab)).0
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Tab token of a list request; a missing or malformed one starts a new tab.
pub fn tab_token(raw: Option<&str>) -> Uuid {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or_else(Uuid::new_v4)
}

#[cfg(test)]
mod tests {
    use super::*;

    const USER: &str = "6f1c1f2e-8d0a-4c4e-9f8e-0d1b2c3d4e5f";

    #[test]
    fn views_are_isolated_per_user() {
        let sequencers = ListSequencers::new();
        let user: UserId = USER.parse().unwrap();
        let other: UserId = "7f1c1f2e-8d0a-4c4e-9f8e-0d1b2c3d4e5f".parse().unwrap();
        let tab = Uuid::new_v4();

        let tasks = sequencers.for_view(user, "tasks", tab);
        let ticket = tasks.issue();
        sequencers.for_view(other, "tasks", tab).issue();
        sequencers.for_view(user, "certificates", tab).issue();

        assert!(sequencers.for_view(user, "tasks", tab).is_current(ticket));
    }

    #[test]
    fn tabs_of_the_same_user_do_not_supersede_each_other() {
        let sequencers = ListSequencers::new();
        let user: UserId = USER.parse().unwrap();
        let first_tab = Uuid::new_v4();
        let second_tab = Uuid::new_v4();

        let slow = sequencers.for_view(user, "tasks", first_tab).issue();
        let fast = sequencers.for_view(user, "tasks", second_tab).issue();

        assert!(sequencers.for_view(user, "tasks", first_tab).is_current(slow));
        assert!(sequencers.for_view(user, "tasks", second_tab).is_current(fast));
    }

    #[test]
    fn sequencers_are_bounded() {
        let sequencers = ListSequencers::with_capacity(3);
        let user: UserId = USER.parse().unwrap();
        for _ in 0..10 {
            sequencers.for_view(user, "declarations", Uuid::new_v4());
        }
        assert_eq!(sequencers.len(), 3);
    }

    #[test]
    fn tab_token_is_reused_or_started() {
        let tab = Uuid::new_v4();
        assert_eq!(tab_token(Some(&tab.to_string())), tab);
        assert_ne!(tab_token(Some("not-a-token")), tab);
        assert_ne!(tab_token(None), tab_token(None));
    }

    #[test]
    fn tickets_increase() {
        let sequencer = RequestSequencer::new();
        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(second > first);
    }

    #[test]
    fn late_response_from_superseded_fetch_is_dropped() {
        let sequencer = RequestSequencer::new();
        let slow = sequencer.issue();
        let fast = sequencer.issue();

        assert_eq!(sequencer.accept(fast, "new results"), Some("new results"));
        assert_eq!(sequencer.accept(slow, "old results"), None);
        assert!(sequencer.is_current(fast));
    }
}
