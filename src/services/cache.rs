use crate::models::Profile;
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache for profiles read from the store
///
/// Only the requesting user's own profile is cached. Candidate pools are
/// fetched fresh on every request.
#[derive(Clone)]
pub struct ProfileCache {
    inner: moka::future::Cache<String, Arc<Profile>>,
}

impl ProfileCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let inner = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { inner }
    }

    pub async fn get(&self, user_id: &str) -> Option<Arc<Profile>> {
        let key = CacheKey::profile(user_id);
        let hit = self.inner.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Cache hit: {}", key);
        }
        hit
    }

    pub async fn insert(&self, profile: Profile) -> Arc<Profile> {
        let key = CacheKey::profile(&profile.id);
        let profile = Arc::new(profile);
        self.inner.insert(key.clone(), profile.clone()).await;
        tracing::trace!("Cache set: {}", key);
        profile
    }

    pub async fn invalidate(&self, user_id: &str) {
        self.inner.invalidate(&CacheKey::profile(user_id)).await;
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a compatibility profile
    pub fn profile(user_id: &str) -> String {
        format!("profile:{}", user_id)
    }
}
