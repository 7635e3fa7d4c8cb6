//! Simple keyed list cache with subscriber notification.
//!
//! Holds the last loaded list for each key so that repeated consumers of the
//! same lookup (filter option lists, mostly) do not refetch on every use.
//! Loads for the same key are not deduplicated; the last completed load wins.

use crate::lock;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, Weak};
use tracing::debug;

/// Cached list and the error of the load that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<T> {
    pub data: Vec<T>,
    pub error: Option<String>,
}

pub type CacheCallback<T> = Arc<dyn Fn(&[T], Option<&str>) + Send + Sync>;

struct CacheInner<T> {
    entries: HashMap<String, CacheEntry<T>>,
    subscribers: HashMap<String, Vec<(u64, CacheCallback<T>)>>,
    next_subscriber: u64,
}

impl<T> Default for CacheInner<T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
            subscribers: HashMap::new(),
            next_subscriber: 0,
        }
    }
}

/// Shared list cache. Clones refer to the same storage.
pub struct SimpleListCache<T> {
    inner: Arc<Mutex<CacheInner<T>>>,
}

impl<T> Clone for SimpleListCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SimpleListCache<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(CacheInner::default())),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> SimpleListCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<CacheEntry<T>> {
        lock(&self.inner).entries.get(key).cloned()
    }

    /// Runs `fetcher`, stores its outcome under `key` and notifies the key's
    /// subscribers.
    ///
    /// On failure the previously cached data (or an empty list) is kept and the
    /// error message is recorded next to it.
    pub async fn load<F, Fut, E>(&self, key: &str, fetcher: F) -> CacheEntry<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<T>, E>>,
        E: fmt::Display,
    {
        let outcome = fetcher().await;

        let (entry, subscribers) = {
            let mut inner = lock(&self.inner);
            let entry = match outcome {
                Ok(data) => CacheEntry { data, error: None },
                Err(err) => {
                    let data = inner
                        .entries
                        .get(key)
                        .map(|previous| previous.data.clone())
                        .unwrap_or_default();
                    CacheEntry {
                        data,
                        error: Some(err.to_string()),
                    }
                }
            };
            inner.entries.insert(key.to_string(), entry.clone());
            let subscribers: Vec<CacheCallback<T>> = inner
                .subscribers
                .get(key)
                .map(|subs| subs.iter().map(|(_, cb)| Arc::clone(cb)).collect())
                .unwrap_or_default();
            (entry, subscribers)
        };

        debug!(
            key,
            rows = entry.data.len(),
            error = entry.error.as_deref(),
            subscribers = subscribers.len(),
            "list cache loaded"
        );
        for callback in subscribers {
            callback(&entry.data, entry.error.as_deref());
        }
        entry
    }

    /// Registers `callback` for every future load of `key`.
    ///
    /// The callback stays registered until the returned handle is dropped or
    /// [`Subscription::unsubscribe`] is called.
    pub fn subscribe(&self, key: &str, callback: CacheCallback<T>) -> Subscription<T> {
        let mut inner = lock(&self.inner);
        let id = inner.next_subscriber;
        inner.next_subscriber += 1;
        inner
            .subscribers
            .entry(key.to_string())
            .or_default()
            .push((id, callback));
        Subscription {
            cache: Arc::downgrade(&self.inner),
            key: key.to_string(),
            id,
        }
    }

    pub fn invalidate(&self, key: &str) {
        lock(&self.inner).entries.remove(key);
    }

    pub fn subscriber_count(&self, key: &str) -> usize {
        lock(&self.inner)
            .subscribers
            .get(key)
            .map_or(0, Vec::len)
    }
}

impl<T> fmt::Debug for SimpleListCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("SimpleListCache")
            .field("keys", &inner.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Handle for a cache subscription.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription<T> {
    cache: Weak<Mutex<CacheInner<T>>>,
    key: String,
    id: u64,
}

impl<T> Subscription<T> {
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        let Some(cache) = self.cache.upgrade() else {
            return;
        };
        let mut inner = lock(&cache);
        if let Some(subs) = inner.subscribers.get_mut(&self.key) {
            subs.retain(|(id, _)| *id != self.id);
            if subs.is_empty() {
                inner.subscribers.remove(&self.key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Seen = Arc<Mutex<Vec<(Vec<u32>, Option<String>)>>>;

    fn recording() -> (CacheCallback<u32>, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: CacheCallback<u32> = Arc::new(move |data: &[u32], error: Option<&str>| {
            sink.lock()
                .unwrap()
                .push((data.to_vec(), error.map(str::to_string)));
        });
        (callback, seen)
    }

    #[tokio::test]
    async fn test_load_then_get_returns_fetched_data() {
        let cache = SimpleListCache::new();
        assert!(cache.get("rooms").is_none());

        cache
            .load("rooms", || async { Ok::<_, String>(vec![1, 2, 3]) })
            .await;
        assert_eq!(
            cache.get("rooms"),
            Some(CacheEntry {
                data: vec![1, 2, 3],
                error: None
            })
        );
    }

    #[tokio::test]
    async fn test_invalidate_erases_entry() {
        let cache = SimpleListCache::new();
        cache.load("k", || async { Ok::<_, String>(vec![7]) }).await;
        cache.invalidate("k");
        assert!(cache.get("k").is_none());
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_data() {
        let cache = SimpleListCache::new();
        cache.load("k", || async { Ok::<_, String>(vec![1, 2]) }).await;
        let entry = cache
            .load("k", || async { Err::<Vec<u32>, _>("timeout".to_string()) })
            .await;
        assert_eq!(entry.data, vec![1, 2]);
        assert_eq!(entry.error.as_deref(), Some("timeout"));

        let fresh = cache
            .load("other", || async { Err::<Vec<u32>, _>("boom".to_string()) })
            .await;
        assert!(fresh.data.is_empty());
    }

    #[tokio::test]
    async fn test_all_subscribers_of_key_are_notified() {
        let cache = SimpleListCache::new();
        let (first, first_seen) = recording();
        let (second, second_seen) = recording();
        let (other, other_seen) = recording();
        let _a = cache.subscribe("k", first);
        let _b = cache.subscribe("k", second);
        let _c = cache.subscribe("other", other);

        cache.load("k", || async { Ok::<_, String>(vec![5]) }).await;

        assert_eq!(*first_seen.lock().unwrap(), vec![(vec![5], None)]);
        assert_eq!(*second_seen.lock().unwrap(), vec![(vec![5], None)]);
        assert!(other_seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_notifications() {
        let cache = SimpleListCache::new();
        let (callback, seen) = recording();
        let subscription = cache.subscribe("k", callback);
        assert_eq!(cache.subscriber_count("k"), 1);

        subscription.unsubscribe();
        assert_eq!(cache.subscriber_count("k"), 0);

        cache.load("k", || async { Ok::<_, String>(vec![1]) }).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let cache = SimpleListCache::new();
        let other = cache.clone();
        cache.load("k", || async { Ok::<_, String>(vec![9]) }).await;
        assert_eq!(other.get("k").map(|e| e.data), Some(vec![9]));
    }
}
