//! Query system for material graphs
//!
//! Provides faceted filtering over material dimensions, material search,
//! and prerequisite closures with learning path planning.

mod criteria;
mod facet;
mod filter;
mod path;
mod prerequisites;
mod search;
mod types;

pub use criteria::{Criteria, CriterionValue};
pub use facet::FacetQuery;
pub use filter::{DimensionConstraint, Filter, Polarity};
pub use path::{LearningPath, PathQuery};
pub use prerequisites::{PrerequisiteIndex, PrerequisiteQuery};
pub use search::SearchQuery;
pub use types::{FacetValue, MaterialRow, Prerequisite, SearchOrder, NON_SPECIFIC};
