use crate::models::Profile;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur when resolving profiles
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Unknown selection relation '{relation}' on profile {profile_id}")]
    UnknownRelation { profile_id: String, relation: String },
}

/// Read-only access to fully-hydrated profiles
///
/// Lookups return `Ok(None)` for unknown ids; deciding that a missing
/// profile is an error is left to the caller.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Fetch one profile with all selection collections loaded
    async fn find_profile(&self, id: &str) -> Result<Option<Profile>, RepositoryError>;

    /// Fetch several profiles; unknown ids are silently skipped
    async fn find_profiles(&self, ids: &[String]) -> Result<Vec<Profile>, RepositoryError> {
        let mut profiles = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(profile) = self.find_profile(id).await? {
                profiles.push(profile);
            }
        }
        Ok(profiles)
    }

    /// Check that the backing store is reachable
    async fn health_check(&self) -> Result<bool, RepositoryError>;
}

/// Profile repository held in process memory
///
/// Backs tests and local demos.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: RwLock<HashMap<String, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profiles(profiles: impl IntoIterator<Item = Profile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.id.clone(), profile))
            .collect();

        Self {
            profiles: RwLock::new(profiles),
        }
    }

    /// Insert or replace a profile
    pub async fn insert(&self, profile: Profile) {
        self.profiles.write().await.insert(profile.id.clone(), profile);
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_profile(&self, id: &str) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.profiles.read().await.get(id).cloned())
    }

    async fn find_profiles(&self, ids: &[String]) -> Result<Vec<Profile>, RepositoryError> {
        let profiles = self.profiles.read().await;
        Ok(ids.iter().filter_map(|id| profiles.get(id).cloned()).collect())
    }

    async fn health_check(&self) -> Result<bool, RepositoryError> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let repo = InMemoryProfileRepository::with_profiles(vec![
            Profile::new("a"),
            Profile::new("b"),
        ]);

        assert_eq!(repo.find_profile("a").await.unwrap().map(|p| p.id), Some("a".to_string()));
        assert!(repo.find_profile("missing").await.unwrap().is_none());
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_find_profiles_skips_unknown_ids() {
        let repo = InMemoryProfileRepository::new();
        repo.insert(Profile::new("a")).await;
        repo.insert(Profile::new("c")).await;

        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let found: Vec<String> = repo
            .find_profiles(&ids)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(found, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_default_find_profiles_uses_find_profile() {
        struct SingleLookup;

        #[async_trait]
        impl ProfileRepository for SingleLookup {
            async fn find_profile(&self, id: &str) -> Result<Option<Profile>, RepositoryError> {
                Ok((id != "gone").then(|| Profile::new(id)))
            }

            async fn health_check(&self) -> Result<bool, RepositoryError> {
                Ok(true)
            }
        }

        let ids = vec!["x".to_string(), "gone".to_string()];
        let found = SingleLookup.find_profiles(&ids).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "x");
    }
}
