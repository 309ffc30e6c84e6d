//! Keyed result cache with request sequencing.
//!
//! Every issued request gets a ticket carrying a sequence number. A result
//! is stored only if its ticket is still the newest one for that key, so a
//! slow response can never overwrite a newer one. The cache also remembers
//! which ticket was issued last overall: that key is what the view shows.
//! Past a slot limit the least recently requested key is evicted.

use std::collections::HashMap;
use std::hash::Hash;

/// Slot limit for caches built with `new`
pub const DEFAULT_SLOT_LIMIT: usize = 32;

#[derive(Debug, Clone, PartialEq)]
pub enum Loadable<R, E> {
    Loading,
    Ready(R),
    Err(E),
}

impl<R, E> Loadable<R, E> {
    pub fn ready(&self) -> Option<&R> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Receipt for one issued request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    key: K,
    seq: u64,
}

impl<K> Ticket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }
}

#[derive(Debug)]
struct Slot<V> {
    latest: u64,
    content: Loadable<V, String>,
}

#[derive(Debug)]
pub struct QueryCache<K, V> {
    slots: HashMap<K, Slot<V>>,
    next_seq: u64,
    current: Option<Ticket<K>>,
    limit: usize,
}

impl<K, V> Default for QueryCache<K, V> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_SLOT_LIMIT)
    }
}

impl<K, V> QueryCache<K, V> {
    /// Cache holding at most `limit` keys (never fewer than one)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            slots: HashMap::new(),
            next_seq: 0,
            current: None,
            limit: limit.max(1),
        }
    }
}

impl<K, V> QueryCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request for `key`, superseding any in flight for it.
    ///
    /// A ready value stays readable; anything else goes back to loading.
    pub fn issue(&mut self, key: K) -> Ticket<K> {
        self.next_seq += 1;
        let seq = self.next_seq;
        let slot = self.slots.entry(key.clone()).or_insert(Slot {
            latest: seq,
            content: Loadable::Loading,
        });
        slot.latest = seq;
        if slot.content.ready().is_none() {
            slot.content = Loadable::Loading;
        }

        let ticket = Ticket { key, seq };
        self.evict_beyond_limit(&ticket.key);
        self.current = Some(ticket.clone());
        ticket
    }

    // A ticket whose slot was evicted no longer resolves.
    fn evict_beyond_limit(&mut self, keep: &K) {
        while self.slots.len() > self.limit {
            let oldest = self
                .slots
                .iter()
                .filter(|(key, _)| *key != keep)
                .min_by_key(|(_, slot)| slot.latest)
                .map(|(key, _)| key.clone());
            match oldest {
                Some(key) => {
                    self.slots.remove(&key);
                }
                None => break,
            }
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Store a result. Returns false, storing nothing, when a newer request
    /// for the same key was issued after `ticket`.
    pub fn resolve(&mut self, ticket: &Ticket<K>, result: Result<V, String>) -> bool {
        match self.slots.get_mut(&ticket.key) {
            Some(slot) if slot.latest == ticket.seq => {
                slot.content = match result {
                    Ok(value) => Loadable::Ready(value),
                    Err(message) => Loadable::Err(message),
                };
                true
            }
            _ => false,
        }
    }

    pub fn ready(&self, key: &K) -> Option<&V> {
        self.slots.get(key).and_then(|slot| slot.content.ready())
    }

    pub fn get(&self, key: &K) -> Option<&Loadable<V, String>> {
        self.slots.get(key).map(|slot| &slot.content)
    }

    /// Whether `ticket` is the most recently issued request of all
    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.current.as_ref() == Some(ticket)
    }

    /// Content for the most recently issued key
    pub fn current(&self) -> Option<&Loadable<V, String>> {
        self.current
            .as_ref()
            .and_then(|ticket| self.get(&ticket.key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_response_for_same_key_is_discarded() {
        let mut cache: QueryCache<&str, u32> = QueryCache::new();
        let first = cache.issue("1015");
        let second = cache.issue("1015");

        assert!(cache.resolve(&second, Ok(2)));
        assert!(!cache.resolve(&first, Ok(1)));
        assert_eq!(cache.ready(&"1015"), Some(&2));
        assert!(cache.is_current(&second));
        assert!(!cache.is_current(&first));
    }

    #[test]
    fn current_follows_last_issued_key() {
        let mut cache: QueryCache<&str, u32> = QueryCache::new();
        let older = cache.issue("1015");
        let newer = cache.issue("1016");

        assert!(cache.resolve(&older, Ok(15)));
        assert_eq!(cache.current(), Some(&Loadable::Loading));
        assert!(!cache.is_current(&older));

        assert!(cache.resolve(&newer, Ok(16)));
        assert_eq!(cache.current(), Some(&Loadable::Ready(16)));
        assert_eq!(cache.ready(&"1015"), Some(&15));
        assert_eq!(older.key(), &"1015");
    }

    #[test]
    fn failures_are_not_ready_and_reissue_reloads() {
        let mut cache: QueryCache<&str, u32> = QueryCache::new();
        let ticket = cache.issue("catalog");
        assert!(cache.resolve(&ticket, Err("connection refused".to_string())));
        assert_eq!(cache.ready(&"catalog"), None);
        assert_eq!(
            cache.get(&"catalog"),
            Some(&Loadable::Err("connection refused".to_string()))
        );

        cache.issue("catalog");
        assert_eq!(cache.get(&"catalog"), Some(&Loadable::Loading));
    }

    #[test]
    fn reissue_keeps_ready_value_visible() {
        let mut cache: QueryCache<&str, u32> = QueryCache::new();
        let ticket = cache.issue("areas");
        cache.resolve(&ticket, Ok(7));
        cache.issue("areas");
        assert_eq!(cache.ready(&"areas"), Some(&7));
    }

    #[test]
    fn least_recently_requested_key_is_evicted_past_limit() {
        let mut cache: QueryCache<&str, u32> = QueryCache::with_limit(2);
        let first = cache.issue("1014");
        cache.resolve(&first, Ok(14));
        let failed = cache.issue("1015");
        cache.resolve(&failed, Err("timed out".to_string()));
        // Asking for 1014 again makes 1015 the oldest
        cache.issue("1014");
        let pending = cache.issue("1016");

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"1015"), None);
        assert_eq!(cache.ready(&"1014"), Some(&14));
        assert!(cache.resolve(&pending, Ok(16)));
    }

    #[test]
    fn evicted_in_flight_ticket_does_not_resolve() {
        let mut cache: QueryCache<&str, u32> = QueryCache::with_limit(1);
        let older = cache.issue("1015");
        let newer = cache.issue("1016");

        assert!(!cache.resolve(&older, Ok(15)));
        assert_eq!(cache.get(&"1015"), None);
        assert!(cache.resolve(&newer, Ok(16)));
        assert_eq!(cache.current(), Some(&Loadable::Ready(16)));
    }
}
