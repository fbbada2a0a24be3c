pub mod file;
pub mod memory;
pub mod state;
pub mod traits;

// Re-export
pub use file::FileStore;
pub use memory::MemoryStore;
pub use state::{LoadSource, StateRepository};
pub use traits::KeyValueStore;
