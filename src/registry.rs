//! Bounded in-memory map of per-visitor state shared across workers.
//!
//! Entries are created on first use and the least recently used one is
//! evicted once the map is full.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};

/// Entries kept before eviction starts.
pub const DEFAULT_CAPACITY: usize = 4096;

struct Slot<V> {
    value: Arc<V>,
    last_used: u64,
}

struct Slots<K, V> {
    entries: HashMap<K, Slot<V>>,
    clock: u64,
}

impl<K: Eq + Hash + Clone, V> Slots<K, V> {
    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, slot)| slot.last_used)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}

pub struct Registry<K, V> {
    slots: Mutex<Slots<K, V>>,
    capacity: usize,
}

impl<K, V> Registry<K, V>
where
    K: Eq + Hash + Clone,
    V: Default,
{
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Mutex::new(Slots {
                entries: HashMap::new(),
                clock: 0,
            }),
            capacity: capacity.max(1),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots<K, V>> {
        match self.slots.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Returns the entry for `key`, creating it when missing. The flag is
    /// `true` when the entry was just created.
    pub fn get_or_create(&self, key: K) -> (Arc<V>, bool) {
        let mut slots = self.lock();
        slots.clock += 1;
        let now = slots.clock;

        if let Some(slot) = slots.entries.get_mut(&key) {
            slot.last_used = now;
            return (slot.value.clone(), false);
        }

        if slots.entries.len() >= self.capacity {
            slots.evict_oldest();
        }
        let value = Arc::new(V::default());
        slots.entries.insert(
            key,
            Slot {
                value: value.clone(),
                last_used: now,
            },
        );
        (value, true)
    }

    pub fn remove(&self, key: &K) {
        self.lock().entries.remove(key);
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for Registry<K, V>
where
    K: Eq + Hash + Clone,
    V: Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Registry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn entries_are_shared_until_removed() {
        let registry: Registry<&str, AtomicU32> = Registry::new();

        let (first, created) = registry.get_or_create("a");
        assert!(created);
        first.fetch_add(1, Ordering::SeqCst);

        let (again, created) = registry.get_or_create("a");
        assert!(!created);
        assert_eq!(again.load(Ordering::SeqCst), 1);

        registry.remove(&"a");
        assert!(registry.is_empty());
        assert!(registry.get_or_create("a").1);
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let registry: Registry<u32, AtomicU32> = Registry::with_capacity(2);
        registry.get_or_create(1);
        registry.get_or_create(2);
        // Touch 1 so 2 becomes the oldest.
        registry.get_or_create(1);
        registry.get_or_create(3);

        assert_eq!(registry.len(), 2);
        assert!(!registry.get_or_create(1).1);
        assert!(registry.get_or_create(2).1);
    }
}
