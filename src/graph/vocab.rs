//! Vocabulary of the material graph: predicates, classes and dimensions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Class of learning material nodes
pub const MATERIAL_CLASS: &str = "oer:LearningComponent";

/// Class of course nodes
pub const COURSE_CLASS: &str = "oer:Course";

/// Predicates used by the material graph
///
/// Stored by their compact IRI (`prefix:name`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Predicate {
    Type,
    ForCourse,
    Label,
    TypicalAgeRange,
    ForTopic,
    InLanguage,
    Teaches,
    EducationalLevel,
    Keywords,
    Prerequisite,
}

impl Predicate {
    pub const ALL: [Predicate; 10] = [
        Predicate::Type,
        Predicate::ForCourse,
        Predicate::Label,
        Predicate::TypicalAgeRange,
        Predicate::ForTopic,
        Predicate::InLanguage,
        Predicate::Teaches,
        Predicate::EducationalLevel,
        Predicate::Keywords,
        Predicate::Prerequisite,
    ];

    /// Compact IRI of the predicate
    pub fn iri(&self) -> &'static str {
        match self {
            Predicate::Type => "rdf:type",
            Predicate::ForCourse => "oer:forCourse",
            Predicate::Label => "rdfs:label",
            Predicate::TypicalAgeRange => "sdo:typicalAgeRange",
            Predicate::ForTopic => "oer:forTopic",
            Predicate::InLanguage => "sdo:inLanguage",
            Predicate::Teaches => "sdo:teaches",
            Predicate::EducationalLevel => "sdo:educationalLevel",
            Predicate::Keywords => "sdo:keywords",
            Predicate::Prerequisite => "oer:coursePrerequisites",
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.iri())
    }
}

/// Error for an IRI outside the material vocabulary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown predicate: {0}")]
pub struct UnknownPredicate(pub String);

impl FromStr for Predicate {
    type Err = UnknownPredicate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Predicate::ALL
            .into_iter()
            .find(|p| p.iri() == s)
            .ok_or_else(|| UnknownPredicate(s.to_string()))
    }
}

impl TryFrom<String> for Predicate {
    type Error = UnknownPredicate;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Predicate> for String {
    fn from(p: Predicate) -> Self {
        p.iri().to_string()
    }
}

/// A single fact in the material graph
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Triple {
    pub subject: String,
    pub predicate: Predicate,
    pub object: String,
}

impl Triple {
    pub fn new(subject: impl Into<String>, predicate: Predicate, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }
}

/// A filter axis over materials
///
/// Declaration order is the canonical processing order of criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Age,
    Topic,
    Language,
    Concept,
    Education,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Age,
        Dimension::Topic,
        Dimension::Language,
        Dimension::Concept,
        Dimension::Education,
    ];

    /// Predicate carrying this dimension's values
    pub fn predicate(&self) -> Predicate {
        match self {
            Dimension::Age => Predicate::TypicalAgeRange,
            Dimension::Topic => Predicate::ForTopic,
            Dimension::Language => Predicate::InLanguage,
            Dimension::Concept => Predicate::Teaches,
            Dimension::Education => Predicate::EducationalLevel,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Age => "age",
            Dimension::Topic => "topic",
            Dimension::Language => "language",
            Dimension::Concept => "concept",
            Dimension::Education => "education",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dimension: {0}")]
pub struct UnknownDimension(pub String);

impl FromStr for Dimension {
    type Err = UnknownDimension;

    /// Accepts singular and plural names plus the short forms used by the CLI
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "age" | "ages" => Ok(Dimension::Age),
            "topic" | "topics" => Ok(Dimension::Topic),
            "language" | "languages" | "lang" => Ok(Dimension::Language),
            "concept" | "concepts" => Ok(Dimension::Concept),
            "education" | "educations" | "edu_level" | "level" => Ok(Dimension::Education),
            _ => Err(UnknownDimension(s.to_string())),
        }
    }
}

/// Course id of a material: the text before the first `.`
pub fn course_of(material_id: &str) -> &str {
    let trimmed = material_id.trim();
    trimmed.split('.').next().unwrap_or(trimmed)
}
