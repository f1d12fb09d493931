// Core swipe and matching logic
pub mod deck;
pub mod gesture;
pub mod interpolate;
pub mod resolver;
pub mod session;

pub use deck::{Deck, filter_candidates, VISIBLE_CARDS};
pub use gesture::{decide, visual_signals, Decision, GestureConfig, GesturePhase, Motion, Release, SwipeInterpreter, VisualSignals};
pub use interpolate::interpolate;
pub use resolver::MatchResolver;
pub use session::{SwipeSession, SwipeStep};
