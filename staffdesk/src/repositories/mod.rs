pub mod repository;
pub mod seed;
pub mod store;

pub use repository::{keys, Record, Repository};
pub use store::{FileStore, KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use store::BrowserStore;
