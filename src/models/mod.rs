// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Pet, LikeEvent, MatchRecord, MatchOutcome, PLACEHOLDER_PHOTO};
pub use requests::{CreatePetRequest, LoadDeckRequest, DragUpdateRequest, DragReleaseRequest, MIN_PET_AGE, MAX_PET_AGE};
pub use responses::{DeckCard, DeckResponse, DragUpdateResponse, SwipeResponse, MatchesResponse, HealthResponse, ErrorResponse};
