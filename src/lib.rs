//! Animinder - swipe-to-match service for pet profiles
//!
//! This library provides the swipe gesture interpreter that turns drag samples
//! into like/pass decisions and the resolver that turns reciprocal likes into
//! matches between pet owners.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{decide, Decision, GestureConfig, MatchResolver, SwipeInterpreter, SwipeSession};
pub use crate::models::{LikeEvent, MatchOutcome, MatchRecord, Pet};
pub use crate::services::{LikeStore, MatchStore, MemoryStore, PetStore, StoreError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let config = GestureConfig::with_viewport_width(400.0);
        assert_eq!(decide(&config, 150.0, 0.0), Decision::Accept);
        assert_eq!(decide(&config, -150.0, 0.0), Decision::Reject);
    }
}
