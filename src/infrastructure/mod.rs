pub mod export;
pub mod persistence;
pub mod repositories;

pub use persistence::JsonFileStore;
pub use repositories::InMemoryKeyValueStore;
