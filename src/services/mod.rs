// Service exports
pub mod appwrite;
pub mod memory;
pub mod postgres;
pub mod sessions;
pub mod store;

pub use appwrite::{AppwriteClient, AppwriteCollections, AppwriteError};
pub use memory::MemoryStore;
pub use postgres::{PostgresClient, PostgresError};
pub use sessions::{SessionRegistry, SharedSession};
pub use store::{LikeStore, MatchStore, PetStore, StoreError};
