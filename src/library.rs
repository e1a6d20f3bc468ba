//! Library: a loaded material graph and the operations over it
//!
//! `Library` is the entry point for consumers. It pairs an immutable
//! triple store with the prerequisite index built from it at load time.
//! Cloning is cheap and clones share the same store, so concurrent sessions
//! can query one library read-only.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::graph::{Dimension, Predicate};
use crate::ingest::{CatalogLoader, LoadError, LoadReport};
use crate::query::{
    Criteria, FacetQuery, FacetValue, MaterialRow, PathQuery, Prerequisite, PrerequisiteIndex,
    PrerequisiteQuery, SearchOrder, SearchQuery,
};
use crate::storage::{MemoryStore, StorageResult, TripleStore};

#[derive(Clone)]
pub struct Library {
    store: Arc<dyn TripleStore>,
    prerequisites: Arc<PrerequisiteIndex>,
}

impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("prerequisite_edges", &self.prerequisites.edge_count())
            .finish_non_exhaustive()
    }
}

impl Library {
    /// Wrap a populated store. The store must not change afterwards.
    pub fn new(store: Arc<dyn TripleStore>) -> StorageResult<Self> {
        let prerequisites = PrerequisiteIndex::build(store.as_ref())?;
        Ok(Self {
            store,
            prerequisites: Arc::new(prerequisites),
        })
    }

    /// Load a catalog file into a fresh in-memory store
    pub fn from_catalog(path: impl AsRef<Path>) -> Result<(Self, LoadReport), LoadError> {
        let store = MemoryStore::new();
        let report = CatalogLoader::new(&store).load_path(path)?;
        Ok((Self::new(Arc::new(store))?, report))
    }

    /// Load catalog text into a fresh in-memory store
    pub fn from_catalog_str(text: &str) -> Result<(Self, LoadReport), LoadError> {
        let store = MemoryStore::new();
        let report = CatalogLoader::new(&store).load_str(text)?;
        Ok((Self::new(Arc::new(store))?, report))
    }

    pub fn store(&self) -> &dyn TripleStore {
        self.store.as_ref()
    }

    pub fn prerequisite_index(&self) -> &PrerequisiteIndex {
        &self.prerequisites
    }

    /// Materials matching the criteria, ordered by id
    pub fn search(&self, criteria: &Criteria) -> StorageResult<Vec<MaterialRow>> {
        self.search_ordered(criteria, SearchOrder::ById)
    }

    pub fn search_ordered(
        &self,
        criteria: &Criteria,
        order: SearchOrder,
    ) -> StorageResult<Vec<MaterialRow>> {
        SearchQuery::matching(criteria).order(order).execute(self.store())
    }

    /// Values `dimension` can still take
    ///
    /// With `apply_filter` false the criteria are ignored and every material
    /// is considered.
    pub fn list_values(
        &self,
        dimension: Dimension,
        criteria: &Criteria,
        apply_filter: bool,
    ) -> StorageResult<Vec<FacetValue>> {
        let query = FacetQuery::of(dimension);
        let query = if apply_filter {
            query.filtered_by(criteria)
        } else {
            query
        };
        query.execute(self.store())
    }

    /// Transitive prerequisites of a material, ordered by id
    pub fn resolve_prerequisites(&self, material: &str) -> StorageResult<Vec<Prerequisite>> {
        PrerequisiteQuery::of(material).execute(&self.prerequisites, self.store())
    }

    /// Remaining study sequence as `(id) title` lines
    pub fn learning_path(
        &self,
        material: &str,
        already_known: &BTreeSet<String>,
    ) -> StorageResult<Vec<String>> {
        let path = PathQuery::to(material)
            .already_known(already_known.iter().cloned())
            .execute(&self.prerequisites, self.store())?;
        Ok(path.display_lines())
    }

    /// Title of a material, if it is one
    pub fn title(&self, material: &str) -> StorageResult<Option<String>> {
        Ok(self.store.objects(material, Predicate::Label)?.into_iter().next())
    }
}
