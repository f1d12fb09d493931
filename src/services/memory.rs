use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{LikeEvent, MatchRecord, Pet};
use crate::services::store::{LikeStore, MatchStore, PetStore, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    pets: Vec<Pet>,
    likes: Vec<LikeEvent>,
    matches: Vec<MatchRecord>,
}

/// In-process store backing all three capabilities
///
/// Used for local development (`storage.backend = "memory"`) and tests.
/// Preserves insertion order, which is the enumeration order the resolver
/// sees.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with pets
    pub async fn with_pets(pets: Vec<Pet>) -> Self {
        let store = Self::new();
        store.state.write().await.pets = pets;
        store
    }
}

#[async_trait]
impl PetStore for MemoryStore {
    async fn get_pet(&self, pet_id: &str) -> Result<Pet, StoreError> {
        self.state
            .read()
            .await
            .pets
            .iter()
            .find(|p| p.id == pet_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Pet {}", pet_id)))
    }

    async fn save_pet(&self, pet: &Pet) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        match state.pets.iter().position(|p| p.id == pet.id) {
            Some(index) => state.pets[index] = pet.clone(),
            None => state.pets.push(pet.clone()),
        }
        Ok(())
    }

    async fn delete_pet(&self, pet_id: &str) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        let before = state.pets.len();
        state.pets.retain(|p| p.id != pet_id);

        if state.pets.len() == before {
            return Err(StoreError::NotFound(format!("Pet {}", pet_id)));
        }
        Ok(())
    }

    async fn list_pets_owned_by(&self, user_id: &str) -> Result<Vec<Pet>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .pets
            .iter()
            .filter(|p| p.owner_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_candidate_pets(
        &self,
        excluding_user_id: &str,
        excluding_pet_ids: &[String],
    ) -> Result<Vec<Pet>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .pets
            .iter()
            .filter(|p| p.owner_id != excluding_user_id && !excluding_pet_ids.contains(&p.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LikeStore for MemoryStore {
    async fn append_like(&self, like: &LikeEvent) -> Result<(), StoreError> {
        self.state.write().await.likes.push(like.clone());
        Ok(())
    }

    async fn list_likes_by(&self, user_id: &str) -> Result<Vec<LikeEvent>, StoreError> {
        Ok(self
            .state
            .read()
            .await
            .likes
            .iter()
            .filter(|l| l.liker_user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn append_match(&self, record: &MatchRecord) -> Result<(), StoreError> {
        self.state.write().await.matches.push(record.clone());
        Ok(())
    }

    async fn list_matches_for(&self, user_id: &str) -> Result<Vec<MatchRecord>, StoreError> {
        let mut matches: Vec<MatchRecord> = self
            .state
            .read()
            .await
            .matches
            .iter()
            .filter(|m| m.involves(user_id))
            .cloned()
            .collect();

        // Newest first; stable so equal timestamps keep the reverse insertion order
        matches.reverse();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pet(id: &str, owner: &str) -> Pet {
        Pet {
            id: id.to_string(),
            name: id.to_string(),
            species: "Bird".to_string(),
            age: 1,
            breed: "Parrot".to_string(),
            photo: String::new(),
            bio: String::new(),
            owner_id: owner.to_string(),
        }
    }

    #[test]
    fn test_candidates_exclude_owner_and_ids() {
        tokio_test::block_on(async {
            let store = MemoryStore::with_pets(vec![
                pet("p1", "me"),
                pet("p2", "bob"),
                pet("p3", "bob"),
            ])
            .await;

            let candidates = store
                .list_candidate_pets("me", &["p3".to_string()])
                .await
                .unwrap();

            assert_eq!(candidates.len(), 1);
            assert_eq!(candidates[0].id, "p2");
        });
    }

    #[tokio::test]
    async fn test_delete_unknown_pet() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.delete_pet("missing").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let store = MemoryStore::new();
        store.save_pet(&pet("p1", "me")).await.unwrap();

        let mut renamed = pet("p1", "me");
        renamed.name = "Kiwi".to_string();
        store.save_pet(&renamed).await.unwrap();

        let owned = store.list_pets_owned_by("me").await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].name, "Kiwi");
    }
}
