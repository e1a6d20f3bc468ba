//! Common test utilities for edugraph integration tests
//!
//! Catalog fixtures plus helpers that load them into each store
//! implementation, so the same assertions run against both.

#![allow(dead_code)]

use edugraph::{CatalogLoader, Library, MemoryStore, OpenStore, SqliteStore, TripleStore};
use std::sync::Arc;

/// Two materials: a language-neutral intro and a Python lesson requiring it
pub const SCENARIO: &str = r#"
materials:
  - id: T1.1
    title: Variables
    ages: 8-10
    topics: Programming
    concepts: Variables
    levels: all
  - id: T1.2
    title: Loops in Python
    requires: T1.1
    ages: 8-10
    topics: Programming
    languages: Python
    concepts: Loops
    levels: all
"#;

/// Diamonds, a cycle, range notation and materials missing dimensions
pub const CURRICULUM: &str = r#"
- id: A.1
  title: Basics
  ages: 8-10
  topics: Programming
  levels: all
- id: A.2
  title: Scratch loops
  requires: A.1
  ages: [8-10, 11-14]
  topics: Programming
  languages: Scratch
  concepts: Loops
- id: A.3
  title: Python conditions
  requires: A.1
  ages: 11-14
  topics: Robotics
  languages: Python
  concepts: Loops, Conditions
  levels: secondary
- id: A.4
  title: Functions
  requires: [A.2, A.3]
  ages: 11-14
  topics: Programming
  languages: Python
  concepts: Functions
  levels: secondary
- id: B.1
  title: HTML
  requires: B.2
  ages: 15-18
  topics: Web
- id: B.2
  title: JavaScript
  requires: B.1, A.4
  ages: 15-18
  topics: Web
  languages: JavaScript
  concepts: Events
  levels: secondary
- id: T7.1
  title: Sensors
  topics: Robotics
- id: T7.2
  title: Motors
  topics: Robotics
- id: T7.3
  title: Feedback
  topics: Robotics
- id: T7.4
  title: Line follower
  requires: T7.1-T7.3
  ages: 11-14
  topics: Robotics
  languages: Python
"#;

/// Every material id in `CURRICULUM`
pub const CURRICULUM_IDS: &[&str] = &[
    "A.1", "A.2", "A.3", "A.4", "B.1", "B.2", "T7.1", "T7.2", "T7.3", "T7.4",
];

fn load_into(store: &dyn TripleStore, catalog: &str) {
    let report = CatalogLoader::new(store).load_str(catalog).unwrap();
    assert!(report.is_clean(), "fixture rejected: {:?}", report.rejected);
}

pub fn memory_library(catalog: &str) -> Library {
    let store = MemoryStore::new();
    load_into(&store, catalog);
    Library::new(Arc::new(store)).unwrap()
}

pub fn sqlite_library(catalog: &str) -> Library {
    let store = SqliteStore::open_in_memory().unwrap();
    load_into(&store, catalog);
    Library::new(Arc::new(store)).unwrap()
}

/// The catalog loaded into every store implementation, labelled
pub fn libraries(catalog: &str) -> Vec<(&'static str, Library)> {
    vec![
        ("memory", memory_library(catalog)),
        ("sqlite", sqlite_library(catalog)),
    ]
}

pub fn ids<T, F>(rows: &[T], id: F) -> Vec<String>
where
    F: Fn(&T) -> &str,
{
    rows.iter().map(|r| id(r).to_string()).collect()
}
