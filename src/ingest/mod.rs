//! Catalog ingestion
//!
//! Turns catalog records into material graph facts, expanding compact
//! prerequisite ranges. Bad records are rejected one by one; only an
//! unreadable document or a failing store aborts a load.

mod catalog;
mod dependency;
mod loader;

pub use catalog::{parse_catalog, CatalogEntry, CatalogRecord, Cell};
pub use dependency::{
    expand_dependencies, expand_token, MalformedDependencyToken, MAX_RANGE_LEN, RANGE_SEPARATOR,
};
pub use loader::{record_triples, CatalogLoader, LoadError, LoadReport, RecordError, RecordErrorKind};
