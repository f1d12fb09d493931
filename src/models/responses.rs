use serde::{Deserialize, Serialize};

use crate::core::gesture::{Decision, Motion, VisualSignals};
use crate::models::domain::{MatchOutcome, MatchRecord, Pet};

/// A card in the visible stack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckCard {
    pub pet: Pet,
    /// Only the topmost card handles gestures
    pub interactive: bool,
}

/// Response for the deck view and deck load endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub cards: Vec<DeckCard>,
    pub remaining: usize,
    pub position: usize,
}

/// Response to a drag update: visual parameters for the top card
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragUpdateResponse {
    pub dragging: bool,
    pub signals: VisualSignals,
}

/// Response to a swipe release or a like/pass button press
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwipeResponse {
    pub decision: Decision,
    pub motion: Option<Motion>,
    #[serde(rename = "petId")]
    pub pet_id: Option<String>,
    pub outcome: Option<MatchOutcome>,
    pub remaining: usize,
}

/// Response listing a user's matches, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub matches: Vec<MatchRecord>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
