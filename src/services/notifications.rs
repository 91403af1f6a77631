//! Header notifications of the signed-in user.
//!
//! Each session keeps its own in-memory inbox. It is filled from the backend
//! once, when the session first opens a member page, and afterwards only
//! changes through the bell: read flags are set locally and forwarded to the
//! backend on a best-effort basis.

use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::api::NotificationApi;
use crate::domain::notification::Notification;
use crate::domain::types::NotificationId;
use crate::dto::badges::Badged;
use crate::dto::notifications::{NotificationMenu, NotificationRow};
use crate::registry::Registry;
use crate::services::{ServiceError, ServiceResult};

/// Counter above this value is shown as `9+`.
const BADGE_LIMIT: usize = 9;

/// Oldest notifications are dropped past this size.
pub const INBOX_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    sound_enabled: bool,
}

impl NotificationCenter {
    pub fn new(items: Vec<Notification>, sound_enabled: bool) -> Self {
        let mut center = Self {
            items: Vec::new(),
            sound_enabled,
        };
        center.seed(items);
        center
    }

    /// Newest first. Returns `false` when the notification is already listed.
    pub fn push(&mut self, notification: Notification) -> bool {
        if self.items.iter().any(|n| n.id == notification.id) {
            return false;
        }
        self.items.insert(0, notification);
        self.items.truncate(INBOX_LIMIT);
        true
    }

    /// Pushes `items` oldest first so the newest ends up on top.
    pub fn seed(&mut self, mut items: Vec<Notification>) {
        items.sort_by_key(|n| n.created_at);
        for notification in items {
            self.push(notification);
        }
    }

    /// Returns `false` when no notification has this id.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.items {
            notification.is_read = true;
        }
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    pub fn badge_text(&self) -> String {
        match self.unread_count() {
            0 => String::new(),
            n if n > BADGE_LIMIT => format!("{BADGE_LIMIT}+"),
            n => n.to_string(),
        }
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn set_sound(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn menu(&self) -> NotificationMenu {
        NotificationMenu {
            items: self
                .items
                .iter()
                .map(|n| NotificationRow {
                    badge: n.kind.badge(),
                    notification: n.clone(),
                })
                .collect(),
            unread_count: self.unread_count(),
            badge_text: self.badge_text(),
            sound_enabled: self.sound_enabled,
        }
    }
}

/// Notification center of one session, shared by its concurrent requests.
#[derive(Debug, Default)]
pub struct Inbox(Mutex<NotificationCenter>);

impl Inbox {
    fn lock(&self) -> MutexGuard<'_, NotificationCenter> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn seed(&self, items: Vec<Notification>) {
        self.lock().seed(items);
    }

    pub fn mark_read(&self, id: NotificationId) -> bool {
        self.lock().mark_read(id)
    }

    pub fn mark_all_read(&self) {
        self.lock().mark_all_read();
    }

    pub fn sound_enabled(&self) -> bool {
        self.lock().sound_enabled()
    }

    pub fn set_sound(&self, enabled: bool) {
        self.lock().set_sound(enabled);
    }

    pub fn menu(&self) -> NotificationMenu {
        self.lock().menu()
    }
}

/// Session inboxes, keyed by the id stored in the session cookie.
pub type Inboxes = Registry<Uuid, Inbox>;

/// Fills a freshly opened inbox. A backend failure leaves it empty rather
/// than breaking the page.
pub async fn open_inbox<A>(api: &A, inbox: &Inbox, sound_enabled: bool)
where
    A: NotificationApi,
{
    inbox.set_sound(sound_enabled);
    match api.list_notifications().await {
        Ok(items) => inbox.seed(items),
        Err(err) => log::warn!("Failed to list notifications: {err}"),
    }
}

pub async fn mark_read<A>(api: &A, inbox: &Inbox, id: NotificationId) -> ServiceResult<()>
where
    A: NotificationApi,
{
    if !inbox.mark_read(id) {
        return Err(ServiceError::NotFound);
    }
    if let Err(err) = api.mark_notification_read(id).await {
        log::warn!("Failed to forward read flag of notification {id}: {err}");
    }
    Ok(())
}

pub async fn mark_all_read<A>(api: &A, inbox: &Inbox) -> ServiceResult<()>
where
    A: NotificationApi,
{
    inbox.mark_all_read();
    if let Err(err) = api.mark_all_notifications_read().await {
        log::warn!("Failed to forward read flags of notifications: {err}");
    }
    Ok(())
}

/// Flips the sound preference and returns the new value.
pub fn toggle_sound(inbox: &Inbox) -> bool {
    let enabled = !inbox.sound_enabled();
    inbox.set_sound(enabled);
    enabled
}
