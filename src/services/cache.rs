use crate::models::CompatibilityScore;
use chrono::NaiveDate;
use redis::aio::ConnectionManager;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Cache miss: {0}")]
    CacheMiss(String),
}

/// Multi-tier cache for computed scores
///
/// L1 is an in-process `moka` cache; L2 is an optional Redis instance shared
/// across service replicas.
pub struct CacheManager {
    // Store ConnectionManager in a Mutex for interior mutability
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
    ttl_secs: u64,
}

impl CacheManager {
    /// Create an in-process cache only
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            redis: None,
            l1_cache,
            ttl_secs,
        }
    }

    /// Create a cache backed by Redis as the second tier
    pub async fn with_redis(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            ..Self::in_memory(l1_size, ttl_secs)
        })
    }

    /// Get a value from cache (L1 first, then L2)
    pub async fn get<T>(&self, key: &str) -> Result<T, CacheError>
    where
        T: for<'de> Deserialize<'de>,
    {
        // Try L1 cache first
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let Some(redis) = &self.redis else {
            tracing::trace!("Cache miss: {}", key);
            return Err(CacheError::CacheMiss(key.to_string()));
        };

        // Try L2 cache (Redis)
        let mut conn = redis.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        if let Some(json) = value {
            tracing::trace!("L2 cache hit: {}", key);

            // Populate L1 cache
            let bytes = json.as_bytes().to_vec();
            self.l1_cache.insert(key.to_string(), bytes).await;

            return Ok(serde_json::from_str(&json)?);
        }

        tracing::trace!("Cache miss: {}", key);
        Err(CacheError::CacheMiss(key.to_string()))
    }

    /// Set a value in cache (both tiers)
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), CacheError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        // Set in L1 cache (uses configured TTL)
        let bytes = json.as_bytes().to_vec();
        self.l1_cache.insert(key.to_string(), bytes).await;

        if let Some(redis) = &self.redis {
            // Set in L2 cache with explicit TTL
            let mut conn = redis.lock().await;
            redis::cmd("SETEX")
                .arg(key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Delete a value from both cache tiers
    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.l1_cache.invalidate(key).await;

        if let Some(redis) = &self.redis {
            let mut conn = redis.lock().await;
            redis::cmd("DEL")
                .arg(key)
                .query_async::<()>(&mut *conn)
                .await?;
        }
        Ok(())
    }

    /// Cached score for a pair, if present
    ///
    /// Lookup failures are logged and reported as a miss.
    pub async fn get_score(&self, key: &str) -> Option<CompatibilityScore> {
        match self.get(key).await {
            Ok(score) => Some(score),
            Err(CacheError::CacheMiss(_)) => None,
            Err(e) => {
                tracing::warn!("Score cache lookup failed for {}: {}", key, e);
                None
            }
        }
    }

    /// Store a computed score; failures are logged, never returned
    pub async fn put_score(&self, key: &str, score: &CompatibilityScore) {
        if let Err(e) = self.set(key, score).await {
            tracing::warn!("Failed to cache score {}: {}", key, e);
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            l1_size: self.l1_cache.entry_count(),
            redis_enabled: self.redis.is_some(),
            ttl_secs: self.ttl_secs,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub l1_size: u64,
    pub redis_enabled: bool,
    pub ttl_secs: u64,
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a scored pair
    ///
    /// Scores are symmetric, so both orders of a pair share one key. The
    /// evaluation date is part of the key because ages depend on it. Ids are
    /// length-prefixed since they may contain the separator.
    pub fn score(profile_a: &str, profile_b: &str, today: NaiveDate) -> String {
        let (first, second) = if profile_a <= profile_b {
            (profile_a, profile_b)
        } else {
            (profile_b, profile_a)
        };
        format!(
            "score:{}:{}:{}:{}:{}",
            first.len(),
            first,
            second.len(),
            second,
            today.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Attribute;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()
    }

    fn sample_score() -> CompatibilityScore {
        CompatibilityScore {
            score: 72,
            breakdown: [(Attribute::Age, 90), (Attribute::CoreValues, 50)]
                .into_iter()
                .collect(),
        }
    }

    #[test]
    fn test_cache_key_builder() {
        assert_eq!(CacheKey::score("a", "b", today()), "score:1:a:1:b:2026-06-15");
        assert_eq!(CacheKey::score("b", "a", today()), CacheKey::score("a", "b", today()));
    }

    #[test]
    fn test_cache_key_ids_containing_separator() {
        assert_ne!(
            CacheKey::score("a:b", "c", today()),
            CacheKey::score("a", "b:c", today())
        );
        assert_ne!(
            CacheKey::score("1:a", "b", today()),
            CacheKey::score("1", "a:1:b", today())
        );
    }

    #[tokio::test]
    async fn test_in_memory_score_round_trip() {
        let cache = CacheManager::in_memory(100, 60);
        let key = CacheKey::score("a", "b", today());

        assert!(cache.get_score(&key).await.is_none());

        cache.put_score(&key, &sample_score()).await;
        assert_eq!(cache.get_score(&key).await, Some(sample_score()));

        cache.delete(&key).await.unwrap();
        assert!(matches!(
            cache.get::<CompatibilityScore>(&key).await,
            Err(CacheError::CacheMiss(_))
        ));
        assert!(!cache.stats().redis_enabled);
    }

    #[tokio::test]
    #[ignore = "Requires Redis"]
    async fn test_redis_set_get() {
        let cache = CacheManager::with_redis("redis://127.0.0.1:6379", 1000, 60)
            .await
            .expect("Failed to create cache");

        let key = "test_key";
        let value = "test_value";

        cache.set(key, &value).await.unwrap();
        let result: String = cache.get(key).await.unwrap();
        assert_eq!(result, value);

        cache.delete(key).await.unwrap();
        assert!(cache.get::<String>(key).await.is_err());
    }
}
