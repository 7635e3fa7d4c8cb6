//! Option lists for lookup filters, shared through a [`SimpleListCache`].

use crate::api_client::RestClient;
use crate::types::LookupOption;
use futures_util::future::join_all;
use std::sync::Arc;
use stowage_list::{CacheCallback, CacheEntry, LookupSource, SimpleListCache, Subscription};

/// Cache key for a lookup source.
pub fn cache_key(source: LookupSource) -> String {
    match source {
        LookupSource::Rooms => "rooms".to_string(),
        LookupSource::Buildings => "buildings".to_string(),
        LookupSource::EntityTypes(kind) => format!("entity-types:{}", kind.as_str()),
    }
}

#[derive(Clone)]
pub struct ReferenceLists {
    client: Arc<RestClient>,
    cache: SimpleListCache<LookupOption>,
}

impl ReferenceLists {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self {
            client,
            cache: SimpleListCache::new(),
        }
    }

    pub fn cache(&self) -> &SimpleListCache<LookupOption> {
        &self.cache
    }

    /// Cached options for `source`, loading them on first use.
    pub async fn options(&self, source: LookupSource) -> CacheEntry<LookupOption> {
        match self.cache.get(&cache_key(source)) {
            Some(entry) => entry,
            None => self.refresh(source).await,
        }
    }

    /// Reloads `source` from the API and notifies its subscribers.
    pub async fn refresh(&self, source: LookupSource) -> CacheEntry<LookupOption> {
        let client = Arc::clone(&self.client);
        self.cache
            .load(&cache_key(source), move || async move {
                match source {
                    LookupSource::Rooms => client.room_options().await,
                    LookupSource::Buildings => client.building_options().await,
                    LookupSource::EntityTypes(kind) => client.entity_type_options(kind).await,
                }
            })
            .await
    }

    /// Loads every source concurrently.
    pub async fn preload(&self, sources: &[LookupSource]) -> Vec<CacheEntry<LookupOption>> {
        join_all(sources.iter().map(|source| self.options(*source))).await
    }

    pub fn invalidate(&self, source: LookupSource) {
        self.cache.invalidate(&cache_key(source));
    }

    pub fn subscribe(
        &self,
        source: LookupSource,
        callback: CacheCallback<LookupOption>,
    ) -> Subscription<LookupOption> {
        self.cache.subscribe(&cache_key(source), callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::EntityKind;

    #[test]
    fn test_cache_keys_are_distinct_per_source() {
        assert_eq!(cache_key(LookupSource::Rooms), "rooms");
        assert_eq!(
            cache_key(LookupSource::EntityTypes(EntityKind::Container)),
            "entity-types:container"
        );
        assert_ne!(
            cache_key(LookupSource::EntityTypes(EntityKind::Place)),
            cache_key(LookupSource::EntityTypes(EntityKind::Container))
        );
    }
}
