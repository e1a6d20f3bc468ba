//! Storage backends for the material graph
//!
//! Every backend implements the `TripleStore` trait. `MemoryStore` serves
//! catalogs loaded straight from a file; `SqliteStore` keeps an imported
//! catalog on disk.

mod memory;
mod sqlite;
mod traits;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{Constraint, OpenStore, Pattern, Row, StorageError, StorageResult, TripleStore};
