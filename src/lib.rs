//! edugraph: faceted discovery and learning paths over material graphs
//!
//! A catalog of learning materials is loaded into a triple store once;
//! learners then narrow it by age, topic, language, concept and education
//! level, pick a material, and get the ordered prerequisites they still
//! need to study.
//!
//! # Core Concepts
//!
//! - **Materials**: lessons identified by ids like `T1.4`, grouped into
//!   courses by the id prefix
//! - **Dimensions**: independent, multi-valued filter axes; a material may
//!   have no value for a dimension, which the "non-specific" criterion selects
//! - **Prerequisites**: a directed "requires" relation whose transitive
//!   closure forms the learning path
//!
//! # Example
//!
//! ```
//! use edugraph::{Criteria, Dimension, Library};
//!
//! let catalog = "- {id: T1.1, title: Variables, ages: 8-10}\n\
//!                - {id: T1.2, title: Loops, ages: 8-10, requires: T1.1}\n";
//! let (library, _report) = Library::from_catalog_str(catalog).unwrap();
//!
//! let criteria = Criteria::new().with(Dimension::Age, "8-10");
//! assert_eq!(library.search(&criteria).unwrap().len(), 2);
//! assert_eq!(library.resolve_prerequisites("T1.2").unwrap()[0].id, "T1.1");
//! ```

mod graph;
pub mod ingest;
pub mod interview;
mod library;
pub mod query;
pub mod storage;

pub use graph::{
    course_of, Dimension, Predicate, Triple, UnknownDimension, UnknownPredicate, COURSE_CLASS,
    MATERIAL_CLASS,
};
pub use ingest::{CatalogLoader, LoadError, LoadReport};
pub use interview::{Interview, InterviewError, Prompter, Session, Step};
pub use library::Library;
pub use query::{
    Criteria, CriterionValue, FacetQuery, FacetValue, LearningPath, MaterialRow, PathQuery,
    Prerequisite, PrerequisiteQuery, SearchOrder, SearchQuery, NON_SPECIFIC,
};
pub use storage::{MemoryStore, OpenStore, SqliteStore, StorageError, StorageResult, TripleStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
