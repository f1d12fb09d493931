use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder photo used when a pet is created without one
pub const PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/400";

/// A pet profile as shown on a swipe card
///
/// Immutable for the lifetime of a swipe session; created and edited only
/// through the owner's profile management.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub species: String,
    pub age: u8,
    pub breed: String,
    #[serde(rename = "image", default)]
    pub photo: String,
    #[serde(default)]
    pub bio: String,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
}

/// One-directional interest of a user in a pet. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeEvent {
    #[serde(rename = "likerUserId")]
    pub liker_user_id: String,
    #[serde(rename = "likedAnimalId")]
    pub liked_pet_id: String,
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl LikeEvent {
    pub fn new(liker_user_id: &str, liked_pet_id: &str, owner_id: &str) -> Self {
        Self {
            liker_user_id: liker_user_id.to_string(),
            liked_pet_id: liked_pet_id.to_string(),
            owner_id: owner_id.to_string(),
            created_at: Utc::now(),
        }
    }
}

/// Materialized mutual like between two users' pets. Append-only.
///
/// `user_id_1` is the user whose like completed the pair and `pet_1` is the
/// pet of theirs the other side had liked earlier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: String,
    #[serde(rename = "userId1")]
    pub user_id_1: String,
    #[serde(rename = "userId2")]
    pub user_id_2: String,
    #[serde(rename = "animal1Id")]
    pub pet_1_id: String,
    #[serde(rename = "animal1")]
    pub pet_1: Pet,
    #[serde(rename = "animal2Id")]
    pub pet_2_id: String,
    #[serde(rename = "animal2")]
    pub pet_2: Pet,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl MatchRecord {
    pub fn new(user_id_1: &str, pet_1: Pet, user_id_2: &str, pet_2: Pet) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id_1: user_id_1.to_string(),
            user_id_2: user_id_2.to_string(),
            pet_1_id: pet_1.id.clone(),
            pet_1,
            pet_2_id: pet_2.id.clone(),
            pet_2,
            created_at: Utc::now(),
        }
    }

    /// Whether `user_id` is on either side of this match
    pub fn involves(&self, user_id: &str) -> bool {
        self.user_id_1 == user_id || self.user_id_2 == user_id
    }
}

/// Verdict of a like action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum MatchOutcome {
    None,
    Matched(MatchRecord),
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Matched(_))
    }

    /// The two paired pet ids: (acting user's pet, liked pet)
    pub fn pet_ids(&self) -> Option<(&str, &str)> {
        match self {
            MatchOutcome::None => None,
            MatchOutcome::Matched(record) => Some((&record.pet_1_id, &record.pet_2_id)),
        }
    }
}
