//! Catalog loading into a triple store

use super::catalog::{parse_catalog, CatalogRecord, Cell};
use super::dependency::{expand_dependencies, MalformedDependencyToken};
use crate::graph::{course_of, Predicate, Triple, COURSE_CLASS, MATERIAL_CLASS};
use crate::storage::{StorageError, TripleStore};
use std::path::Path;
use thiserror::Error;

/// Errors that abort a whole load
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Why a single record was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordErrorKind {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("unreadable record: {0}")]
    Invalid(String),

    #[error(transparent)]
    MalformedDependency(#[from] MalformedDependencyToken),
}

/// A rejected record; the rest of the catalog still loads
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("record {record}: {kind}")]
pub struct RecordError {
    /// Material id, or the 1-based record position when the id is missing
    pub record: String,
    pub kind: RecordErrorKind,
}

/// Outcome of a catalog load
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records whose facts were written
    pub loaded: usize,
    /// Facts that were not already in the store
    pub facts_added: usize,
    pub rejected: Vec<RecordError>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Material id, or the 1-based record position when the id is missing
fn record_label(id: Option<&str>, position: usize) -> String {
    id.map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", position + 1))
}

fn required(value: &Option<String>, field: &'static str) -> Result<String, RecordErrorKind> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(RecordErrorKind::MissingField(field))
}

/// Every fact a record contributes
///
/// The record is validated in full before any fact is produced, so a
/// rejected record leaves nothing behind.
pub fn record_triples(record: &CatalogRecord) -> Result<Vec<Triple>, RecordErrorKind> {
    let id = required(&record.id, "id")?;
    let title = required(&record.title, "title")?;
    let prerequisites = expand_dependencies(record.requires.items())?;
    let course = course_of(&id).to_string();

    let mut triples = vec![
        Triple::new(course.clone(), Predicate::Type, COURSE_CLASS),
        Triple::new(id.clone(), Predicate::Type, MATERIAL_CLASS),
        Triple::new(id.clone(), Predicate::ForCourse, course),
        Triple::new(id.clone(), Predicate::Label, title),
    ];

    let dimensions: [(&Cell, Predicate); 6] = [
        (&record.ages, Predicate::TypicalAgeRange),
        (&record.topics, Predicate::ForTopic),
        (&record.languages, Predicate::InLanguage),
        (&record.levels, Predicate::EducationalLevel),
        (&record.concepts, Predicate::Teaches),
        (&record.tags, Predicate::Keywords),
    ];
    for (cell, predicate) in dimensions {
        triples.extend(cell.items().iter().map(|v| Triple::new(id.clone(), predicate, v.clone())));
    }

    triples.extend(
        prerequisites
            .into_iter()
            .map(|target| Triple::new(id.clone(), Predicate::Prerequisite, target)),
    );

    Ok(triples)
}

/// Writes catalog records into a triple store
pub struct CatalogLoader<'a> {
    store: &'a dyn TripleStore,
}

impl<'a> CatalogLoader<'a> {
    pub fn new(store: &'a dyn TripleStore) -> Self {
        Self { store }
    }

    /// Load a catalog file
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<LoadReport, LoadError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading catalog");
        let text = std::fs::read_to_string(path)?;
        self.load_str(&text)
    }

    /// Load catalog text
    pub fn load_str(&self, text: &str) -> Result<LoadReport, LoadError> {
        let mut report = LoadReport::default();

        for (position, entry) in parse_catalog(text)?.into_iter().enumerate() {
            let id = entry.id();
            match entry.decode() {
                Ok(record) => self.load_record(&record, position, &mut report)?,
                Err(e) => reject(
                    &mut report,
                    RecordError {
                        record: record_label(id.as_deref(), position),
                        kind: RecordErrorKind::Invalid(e.to_string()),
                    },
                ),
            }
        }

        Ok(summarize(report))
    }

    /// Load parsed records, rejecting bad ones individually
    pub fn load_records(&self, records: &[CatalogRecord]) -> Result<LoadReport, LoadError> {
        let mut report = LoadReport::default();
        for (position, record) in records.iter().enumerate() {
            self.load_record(record, position, &mut report)?;
        }
        Ok(summarize(report))
    }

    fn load_record(
        &self,
        record: &CatalogRecord,
        position: usize,
        report: &mut LoadReport,
    ) -> Result<(), LoadError> {
        match record_triples(record) {
            Ok(triples) => {
                report.facts_added += self.store.insert_all(&triples)?;
                report.loaded += 1;
            }
            Err(kind) => reject(
                report,
                RecordError {
                    record: record_label(record.id.as_deref(), position),
                    kind,
                },
            ),
        }
        Ok(())
    }
}

fn reject(report: &mut LoadReport, error: RecordError) {
    tracing::warn!("{}", error);
    report.rejected.push(error);
}

fn summarize(report: LoadReport) -> LoadReport {
    tracing::info!(
        loaded = report.loaded,
        rejected = report.rejected.len(),
        facts = report.facts_added,
        "catalog loaded"
    );
    report
}
