//! Local store adapters for the client.
//!
//! - `FileLocalStore` - single YAML file on disk
//! - `InMemoryLocalStore` - process-local map for tests

mod file_local_store;
mod in_memory_local_store;

pub use file_local_store::FileLocalStore;
pub use in_memory_local_store::InMemoryLocalStore;
