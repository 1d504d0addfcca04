pub mod paths;
pub mod persistence;
pub mod store;

pub use paths::PathManager;
pub use persistence::{load_state, save_state};
pub use store::{JsonFileStore, MemoryStore};
