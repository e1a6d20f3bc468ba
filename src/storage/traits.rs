//! Storage trait definitions

use crate::graph::{Predicate, Triple};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A constraint on the subject variable of a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    /// The subject has a fact `(subject, predicate, object)`
    Equals { predicate: Predicate, object: String },
    /// The subject has no fact with this predicate at all
    Absent { predicate: Predicate },
}

impl Constraint {
    pub fn equals(predicate: Predicate, object: impl Into<String>) -> Self {
        Constraint::Equals {
            predicate,
            object: object.into(),
        }
    }

    pub fn absent(predicate: Predicate) -> Self {
        Constraint::Absent { predicate }
    }
}

/// A conjunction of constraints over one subject variable
///
/// When `bind` is set, every object of that predicate on a matching subject
/// becomes a row value; subjects without such a fact produce no row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pattern {
    pub constraints: Vec<Constraint>,
    pub bind: Option<Predicate>,
}

impl Pattern {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_all(mut self, constraints: impl IntoIterator<Item = Constraint>) -> Self {
        self.constraints.extend(constraints);
        self
    }

    pub fn bind(mut self, predicate: Predicate) -> Self {
        self.bind = Some(predicate);
        self
    }
}

/// A distinct result row of a pattern match
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    pub subject: String,
    /// Object of the bound predicate, if the pattern binds one
    pub value: Option<String>,
}

/// Trait for triple store backends
///
/// Implementations must be thread-safe (Send + Sync) so a loaded store can
/// be shared read-only by concurrent sessions.
pub trait TripleStore: Send + Sync {
    /// Insert a fact. Returns false if it was already present.
    fn insert(&self, triple: &Triple) -> StorageResult<bool>;

    /// Distinct rows matching the pattern, ordered by (subject, value)
    fn match_rows(&self, pattern: &Pattern) -> StorageResult<Vec<Row>>;

    /// Whether any subject matches the pattern
    fn exists(&self, pattern: &Pattern) -> StorageResult<bool>;

    /// Objects of `(subject, predicate, ?)`, sorted ascending
    fn objects(&self, subject: &str, predicate: Predicate) -> StorageResult<Vec<String>>;

    /// Number of stored facts
    fn len(&self) -> StorageResult<usize>;

    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Insert many facts, returning how many were new
    fn insert_all(&self, triples: &[Triple]) -> StorageResult<usize> {
        let mut added = 0;
        for triple in triples {
            if self.insert(triple)? {
                added += 1;
            }
        }
        Ok(added)
    }
}

/// Extension trait for opening stores from paths
pub trait OpenStore: TripleStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
