use std::collections::HashSet;

use crate::core::deck::Deck;
use crate::core::gesture::{Decision, GestureConfig, Release, SwipeInterpreter, VisualSignals};
use crate::core::resolver::MatchResolver;
use crate::models::{MatchOutcome, Pet};
use crate::services::store::{LikeStore, PetStore, StoreError};

/// Outcome of a release or button press on the top card
#[derive(Debug, Clone)]
pub struct SwipeStep {
    pub release: Release,
    /// The card that was decided, for Accept/Reject
    pub pet: Option<Pet>,
}

/// One user's swiping state: deck, like history and the gesture interpreter
///
/// Replaces any app-wide shared state; callers hold one per active user
/// and pass the stores in explicitly.
#[derive(Debug, Clone)]
pub struct SwipeSession {
    user_id: String,
    deck: Deck,
    liked_ids: HashSet<String>,
    interpreter: SwipeInterpreter,
}

impl SwipeSession {
    pub fn new(
        user_id: &str,
        candidates: Vec<Pet>,
        liked_ids: HashSet<String>,
        config: GestureConfig,
    ) -> Self {
        Self {
            user_id: user_id.to_string(),
            deck: Deck::load(user_id, candidates, &liked_ids),
            liked_ids,
            interpreter: SwipeInterpreter::new(config),
        }
    }

    /// Build a session from the user's like history and the candidate pool
    pub async fn load(
        user_id: &str,
        config: GestureConfig,
        pets: &dyn PetStore,
        likes: &dyn LikeStore,
    ) -> Result<Self, StoreError> {
        let liked_ids: HashSet<String> = likes
            .list_likes_by(user_id)
            .await?
            .into_iter()
            .map(|like| like.liked_pet_id)
            .collect();

        let exclude: Vec<String> = liked_ids.iter().cloned().collect();
        let candidates = pets.list_candidate_pets(user_id, &exclude).await?;

        let session = Self::new(user_id, candidates, liked_ids, config);

        tracing::info!(
            "Loaded deck for {}: {} pets ({} already liked)",
            user_id,
            session.deck.len(),
            session.liked_ids.len()
        );

        Ok(session)
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn liked_ids(&self) -> &HashSet<String> {
        &self.liked_ids
    }

    pub fn interpreter(&self) -> &SwipeInterpreter {
        &self.interpreter
    }

    /// Drag the top card. `None` once the deck is exhausted.
    pub fn drag_update(&mut self, dx: f64, dy: f64) -> Option<VisualSignals> {
        self.deck.top()?;
        Some(self.interpreter.on_drag_update(dx, dy))
    }

    /// Release the drag on the top card
    ///
    /// On Accept/Reject the deck advances before the exit motion is handed
    /// back, so the next card is already on top while this one animates out.
    pub fn release(&mut self, dx: f64, dy: f64, vx: f64, vy: f64) -> SwipeStep {
        if self.deck.top().is_none() {
            return SwipeStep {
                release: Release {
                    decision: Decision::Cancel,
                    motion: None,
                },
                pet: None,
            };
        }

        let deck = &mut self.deck;
        let mut decided = None;
        let release = self.interpreter.release_with(dx, dy, vx, vy, |_| {
            decided = deck.advance();
        });

        SwipeStep { release, pet: decided }
    }

    /// Decide the top card without a gesture (like/pass buttons)
    pub fn decide(&mut self, decision: Decision) -> SwipeStep {
        let pet = match decision {
            Decision::Accept | Decision::Reject => self.deck.advance(),
            Decision::Cancel => None,
        };
        self.interpreter.reset();

        SwipeStep {
            release: Release {
                decision: if pet.is_some() { decision } else { Decision::Cancel },
                motion: None,
            },
            pet,
        }
    }

    /// The renderer finished the release animation
    pub fn complete_animation(&mut self) {
        self.interpreter.complete_animation();
    }

    /// Like `pet` and remember it so it never returns to this user's deck
    ///
    /// The id is only recorded once the like has been resolved, so a failed
    /// like leaves the pet eligible for the next deck load. On failure the
    /// exit is abandoned and the interpreter is back to idle, ready for the
    /// card that is now on top.
    pub async fn like(
        &mut self,
        resolver: &MatchResolver,
        pet: &Pet,
    ) -> Result<MatchOutcome, StoreError> {
        match resolver.like_pet(&self.user_id, pet).await {
            Ok(outcome) => {
                self.liked_ids.insert(pet.id.clone());
                Ok(outcome)
            }
            Err(e) => {
                self.interpreter.reset();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gesture::GesturePhase;

    fn pet(id: &str, owner: &str) -> Pet {
        Pet {
            id: id.to_string(),
            name: format!("Pet {}", id),
            species: "Dog".to_string(),
            age: 4,
            breed: "Beagle".to_string(),
            photo: String::new(),
            bio: String::new(),
            owner_id: owner.to_string(),
        }
    }

    fn session() -> SwipeSession {
        SwipeSession::new(
            "me",
            vec![pet("p1", "bob"), pet("p2", "carol"), pet("mine", "me")],
            HashSet::new(),
            GestureConfig::with_viewport_width(400.0),
        )
    }

    #[test]
    fn test_accept_advances_before_animation() {
        let mut session = session();

        let step = session.release(150.0, 0.0, 0.0, 0.0);

        assert_eq!(step.release.decision, Decision::Accept);
        assert_eq!(step.pet.map(|p| p.id), Some("p1".to_string()));
        assert_eq!(session.deck().top().map(|p| p.id.as_str()), Some("p2"));
        assert_eq!(session.interpreter().phase(), GesturePhase::AcceptExit);

        session.complete_animation();
        assert_eq!(session.interpreter().phase(), GesturePhase::Idle);
    }

    #[test]
    fn test_cancel_keeps_card() {
        let mut session = session();
        session.drag_update(30.0, 0.0);
        let step = session.release(30.0, 0.0, 0.1, 0.0);

        assert_eq!(step.release.decision, Decision::Cancel);
        assert!(step.pet.is_none());
        assert_eq!(session.deck().position(), 0);
    }

    #[test]
    fn test_own_pets_never_dealt() {
        let mut session = session();
        session.decide(Decision::Reject);
        session.decide(Decision::Accept);

        assert!(session.deck().is_exhausted());
        let step = session.release(300.0, 0.0, 0.0, 0.0);
        assert!(step.pet.is_none());
        assert!(step.release.motion.is_none());
        assert!(session.drag_update(10.0, 0.0).is_none());
    }
}
