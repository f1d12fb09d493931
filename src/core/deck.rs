use std::collections::{HashMap, HashSet};

use crate::models::Pet;

/// Number of cards rendered at once: the interactive top card and one beneath
pub const VISIBLE_CARDS: usize = 2;

/// Build the swipe sequence for `user_id` from raw candidates
///
/// Drops the user's own pets and anything already liked, and collapses
/// duplicate ids: the first occurrence keeps its position, the last
/// occurrence's data wins.
pub fn filter_candidates(
    candidates: Vec<Pet>,
    user_id: &str,
    liked_ids: &HashSet<String>,
) -> Vec<Pet> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut deck: Vec<Pet> = Vec::with_capacity(candidates.len());

    for pet in candidates {
        if pet.owner_id == user_id || liked_ids.contains(&pet.id) {
            continue;
        }

        match positions.get(&pet.id) {
            Some(&index) => deck[index] = pet,
            None => {
                positions.insert(pet.id.clone(), deck.len());
                deck.push(pet);
            }
        }
    }

    deck
}

/// Ordered candidate sequence with a forward-only cursor
#[derive(Debug, Clone, Default)]
pub struct Deck {
    pets: Vec<Pet>,
    cursor: usize,
}

impl Deck {
    pub fn new(pets: Vec<Pet>) -> Self {
        Self { pets, cursor: 0 }
    }

    /// Filter `candidates` for `user_id` and start at the first card
    pub fn load(user_id: &str, candidates: Vec<Pet>, liked_ids: &HashSet<String>) -> Self {
        Self::new(filter_candidates(candidates, user_id, liked_ids))
    }

    /// The interactive card, if any remain
    pub fn top(&self) -> Option<&Pet> {
        self.pets.get(self.cursor)
    }

    /// Cards currently on screen, topmost first
    pub fn visible(&self) -> &[Pet] {
        let end = (self.cursor + VISIBLE_CARDS).min(self.pets.len());
        &self.pets[self.cursor.min(end)..end]
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.pets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pets.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.pets.len().saturating_sub(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.pets.len()
    }

    /// Whether `pet_id` is still ahead of (or at) the cursor
    pub fn is_pending(&self, pet_id: &str) -> bool {
        self.pets[self.cursor.min(self.pets.len())..]
            .iter()
            .any(|p| p.id == pet_id)
    }

    /// Move past the top card and hand it back. No-op on an exhausted deck.
    pub fn advance(&mut self) -> Option<Pet> {
        let pet = self.pets.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(pet)
    }
}
