use std::collections::HashSet;
use std::sync::Arc;

use crate::models::{LikeEvent, MatchOutcome, MatchRecord, Pet};
use crate::services::store::{LikeStore, MatchStore, PetStore, StoreError};

/// Decides whether a like completes a mutual pair and records the match
///
/// # Steps
/// 1. Persist the like
/// 2. Read every like previously recorded by the liked pet's owner
/// 3. Read the acting user's own pets
/// 4. The first owner like that targets one of those pets makes a match
///
/// The read-then-write sequence is not atomic. Two users liking each other
/// at the same moment can both miss the pair, or both record it. A
/// conditional write keyed on the sorted user-id pair would close this.
#[derive(Clone)]
pub struct MatchResolver {
    pets: Arc<dyn PetStore>,
    likes: Arc<dyn LikeStore>,
    matches: Arc<dyn MatchStore>,
}

impl MatchResolver {
    pub fn new(
        pets: Arc<dyn PetStore>,
        likes: Arc<dyn LikeStore>,
        matches: Arc<dyn MatchStore>,
    ) -> Self {
        Self { pets, likes, matches }
    }

    /// Register a like by id only; the liked pet is fetched for the snapshot
    /// only when a match is found.
    pub async fn register_like(
        &self,
        acting_user_id: &str,
        liked_pet_id: &str,
        liked_pet_owner_id: &str,
    ) -> Result<MatchOutcome, StoreError> {
        self.likes
            .append_like(&LikeEvent::new(acting_user_id, liked_pet_id, liked_pet_owner_id))
            .await?;

        let Some(own_pet) = self.find_reciprocal_pet(acting_user_id, liked_pet_owner_id).await? else {
            tracing::debug!("No reciprocal like from {} for {}", liked_pet_owner_id, acting_user_id);
            return Ok(MatchOutcome::None);
        };

        let liked_pet = self.pets.get_pet(liked_pet_id).await?;
        self.record_match(acting_user_id, own_pet, liked_pet_owner_id, liked_pet).await
    }

    /// Like `pet` on behalf of `acting_user_id`
    pub async fn like_pet(
        &self,
        acting_user_id: &str,
        pet: &Pet,
    ) -> Result<MatchOutcome, StoreError> {
        self.likes
            .append_like(&LikeEvent::new(acting_user_id, &pet.id, &pet.owner_id))
            .await?;

        match self.find_reciprocal_pet(acting_user_id, &pet.owner_id).await? {
            Some(own_pet) => {
                self.record_match(acting_user_id, own_pet, &pet.owner_id, pet.clone()).await
            }
            None => {
                tracing::debug!("No reciprocal like from {} for {}", pet.owner_id, acting_user_id);
                Ok(MatchOutcome::None)
            }
        }
    }

    /// Pet of `acting_user_id` that `owner_id` has liked, first found wins
    async fn find_reciprocal_pet(
        &self,
        acting_user_id: &str,
        owner_id: &str,
    ) -> Result<Option<Pet>, StoreError> {
        let owner_likes = self.likes.list_likes_by(owner_id).await?;
        if owner_likes.is_empty() {
            return Ok(None);
        }

        let mut own_pets = self.pets.list_pets_owned_by(acting_user_id).await?;
        let own_ids: HashSet<&str> = own_pets.iter().map(|p| p.id.as_str()).collect();

        let matched_id = owner_likes
            .iter()
            .find(|like| own_ids.contains(like.liked_pet_id.as_str()))
            .map(|like| like.liked_pet_id.clone());

        Ok(matched_id.and_then(|id| {
            own_pets
                .iter()
                .position(|p| p.id == id)
                .map(|index| own_pets.swap_remove(index))
        }))
    }

    async fn record_match(
        &self,
        acting_user_id: &str,
        own_pet: Pet,
        owner_id: &str,
        liked_pet: Pet,
    ) -> Result<MatchOutcome, StoreError> {
        let record = MatchRecord::new(acting_user_id, own_pet, owner_id, liked_pet);
        self.matches.append_match(&record).await?;

        tracing::info!(
            "Match: {} ({}) <-> {} ({})",
            record.user_id_1,
            record.pet_1_id,
            record.user_id_2,
            record.pet_2_id
        );

        Ok(MatchOutcome::Matched(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::MemoryStore;

    fn pet(id: &str, owner: &str) -> Pet {
        Pet {
            id: id.to_string(),
            name: format!("Pet {}", id),
            species: "Cat".to_string(),
            age: 2,
            breed: "Persian".to_string(),
            photo: String::new(),
            bio: String::new(),
            owner_id: owner.to_string(),
        }
    }

    async fn setup() -> (Arc<MemoryStore>, MatchResolver) {
        let store = Arc::new(MemoryStore::new());
        store.save_pet(&pet("a1", "alice")).await.unwrap();
        store.save_pet(&pet("b1", "bob")).await.unwrap();
        let resolver = MatchResolver::new(store.clone(), store.clone(), store.clone());
        (store, resolver)
    }

    #[tokio::test]
    async fn test_first_like_is_no_match() {
        let (store, resolver) = setup().await;

        let outcome = resolver.like_pet("alice", &pet("b1", "bob")).await.unwrap();

        assert_eq!(outcome, MatchOutcome::None);
        assert_eq!(store.list_likes_by("alice").await.unwrap().len(), 1);
        assert!(store.list_matches_for("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reciprocal_like_matches() {
        let (store, resolver) = setup().await;

        resolver.like_pet("alice", &pet("b1", "bob")).await.unwrap();
        let outcome = resolver.like_pet("bob", &pet("a1", "alice")).await.unwrap();

        assert_eq!(outcome.pet_ids(), Some(("b1", "a1")));
        let matches = store.list_matches_for("alice").await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].user_id_1, "bob");
        assert_eq!(matches[0].pet_2.name, "Pet a1");
    }

    #[tokio::test]
    async fn test_register_like_fetches_snapshot() {
        let (_store, resolver) = setup().await;

        resolver.register_like("alice", "b1", "bob").await.unwrap();
        let outcome = resolver.register_like("bob", "a1", "alice").await.unwrap();

        match outcome {
            MatchOutcome::Matched(record) => {
                assert_eq!(record.pet_1.owner_id, "bob");
                assert_eq!(record.pet_2.owner_id, "alice");
            }
            MatchOutcome::None => panic!("Expected a match"),
        }
    }

    #[tokio::test]
    async fn test_user_without_pets_never_matches() {
        let (_store, resolver) = setup().await;

        // carol owns nothing: bob liking "carol's" pets is impossible, and
        // carol's own likes can never be reciprocated
        resolver.like_pet("bob", &pet("a1", "alice")).await.unwrap();
        let outcome = resolver.like_pet("carol", &pet("b1", "bob")).await.unwrap();

        assert!(!outcome.is_match());
    }
}
