use serde::Serialize;

use crate::domain::notification::Notification;
use crate::dto::badges::Badge;

#[derive(Debug, Serialize)]
pub struct NotificationRow {
    pub notification: Notification,
    pub badge: Badge,
}

/// Header bell: the dropdown list and its counter.
#[derive(Debug, Serialize)]
pub struct NotificationMenu {
    pub items: Vec<NotificationRow>,
    pub unread_count: usize,
    /// Empty when nothing is unread.
    pub badge_text: String,
    pub sound_enabled: bool,
}
