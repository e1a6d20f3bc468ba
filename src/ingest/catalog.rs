//! Catalog records: one row per learning material
//!
//! Catalogs are YAML (JSON parses too): either a list of records or a map
//! with a `materials` list. List-valued fields accept a comma-separated
//! string, the way spreadsheet cells hold them, or a proper list.

use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// A scalar cell value; numbers and booleans are kept as their text
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Text(text) => text,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(x) => x.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    One(Scalar),
    List(Vec<Scalar>),
}

fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

/// The trimmed, non-empty items of one catalog cell
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<RawCell>")]
pub struct Cell(Vec<String>);

impl Cell {
    pub fn items(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Option<RawCell>> for Cell {
    fn from(raw: Option<RawCell>) -> Self {
        let items: Vec<String> = match raw {
            None => Vec::new(),
            Some(RawCell::One(Scalar::Text(text))) => text.split(',').map(str::to_string).collect(),
            Some(RawCell::One(scalar)) => vec![scalar.into_text()],
            Some(RawCell::List(list)) => list.into_iter().map(Scalar::into_text).collect(),
        };
        Cell(
            items
                .into_iter()
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
        )
    }
}

impl<S: Into<String>> FromIterator<S> for Cell {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Cell::from(Some(RawCell::List(
            iter.into_iter().map(|item| Scalar::Text(item.into())).collect(),
        )))
    }
}

/// One catalog row
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogRecord {
    #[serde(default, deserialize_with = "scalar_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,
    /// Prerequisite ids and ranges
    #[serde(default, alias = "depends_on")]
    pub requires: Cell,
    #[serde(default, alias = "age")]
    pub ages: Cell,
    #[serde(default, alias = "topic")]
    pub topics: Cell,
    #[serde(default, alias = "language")]
    pub languages: Cell,
    #[serde(default, alias = "concept")]
    pub concepts: Cell,
    #[serde(default, alias = "tag")]
    pub tags: Cell,
    #[serde(default, alias = "level", alias = "education")]
    pub levels: Cell,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Value>),
    Wrapped { materials: Vec<Value> },
}

/// One catalog entry, not yet decoded into a record
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry(Value);

impl CatalogEntry {
    /// The entry's id, if it has a usable scalar one
    pub fn id(&self) -> Option<String> {
        let id = match self.0.get("id")? {
            Value::String(text) => text.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            _ => return None,
        };
        (!id.is_empty()).then_some(id)
    }

    pub fn decode(self) -> Result<CatalogRecord, serde_yaml::Error> {
        serde_yaml::from_value(self.0)
    }
}

/// Parse a catalog document into its entries
///
/// Only the document shape is checked here; each entry is decoded on its
/// own so one bad row cannot sink the rest.
pub fn parse_catalog(text: &str) -> Result<Vec<CatalogEntry>, serde_yaml::Error> {
    let entries = match serde_yaml::from_str::<CatalogDocument>(text)? {
        CatalogDocument::List(entries) => entries,
        CatalogDocument::Wrapped { materials } => materials,
    };
    Ok(entries.into_iter().map(CatalogEntry).collect())
}
