//! Registry record model
//!
//! Records are persisted as JSON with hyphenated keys (`npm-name`,
//! `ci-build`, `ig-version`, `fhir-version`). Reading also accepts the
//! snake-style spelling of each key; writing always emits the hyphenated one.
//!
//! Each record type lists its renamed keys in a [`FieldName`] table so that
//! other tooling can translate between the two spellings without going
//! through serde.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════
// Field name mapping
// ═══════════════════════════════════════════════════════════════════════

/// One renamed key: the Rust-side (snake) name and the persisted (wire) name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldName {
    /// Snake-style name, accepted on read
    pub canonical: &'static str,

    /// Hyphenated name, emitted on write and accepted on read
    pub wire: &'static str,
}

impl FieldName {
    const fn new(canonical: &'static str, wire: &'static str) -> Self {
        Self { canonical, wire }
    }
}

/// Records whose persisted keys differ from their field names.
pub trait RecordFields {
    /// Every key whose wire spelling differs from its canonical spelling.
    /// Keys not listed here are spelled the same both ways.
    const FIELDS: &'static [FieldName];

    /// Persisted spelling of a key given either spelling.
    fn wire_name(key: &str) -> &str {
        Self::FIELDS
            .iter()
            .find(|f| f.canonical == key || f.wire == key)
            .map_or(key, |f| f.wire)
    }

    /// Snake-style spelling of a key given either spelling.
    fn canonical_name(key: &str) -> &str {
        Self::FIELDS
            .iter()
            .find(|f| f.canonical == key || f.wire == key)
            .map_or(key, |f| f.canonical)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Records
// ═══════════════════════════════════════════════════════════════════════

/// One publishable release track of a guide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edition {
    /// Sequence label, e.g. `STU1` or `ballot`
    pub name: String,

    /// Display version
    #[serde(rename = "ig-version", alias = "ig_version")]
    pub ig_version: String,

    /// Identity key, `"{npm-name}#{ig-version}"`
    pub package: String,

    /// Compatible FHIR versions; the first one is canonical
    #[serde(rename = "fhir-version", alias = "fhir_version")]
    pub fhir_version: Vec<String>,

    /// Where this edition is published
    pub url: String,

    /// Free-text description
    pub description: String,
}

impl RecordFields for Edition {
    const FIELDS: &'static [FieldName] = &[
        FieldName::new("ig_version", "ig-version"),
        FieldName::new("fhir_version", "fhir-version"),
    ];
}

impl Edition {
    /// The canonical FHIR version, if any is listed.
    pub fn primary_fhir_version(&self) -> Option<&str> {
        self.fhir_version.first().map(String::as_str)
    }
}

/// One documentation package and its release history.
///
/// This is also the shape of a per-guide history document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guide {
    /// Display title
    pub name: String,

    /// Registry category
    pub category: String,

    /// Product identity, unique across the registry
    #[serde(rename = "npm-name", alias = "npm_name")]
    pub npm_name: String,

    /// Free-text description
    pub description: String,

    /// Canonical base URL
    pub canonical: String,

    /// Continuous build location
    #[serde(rename = "ci-build", alias = "ci_build")]
    pub ci_build: String,

    /// Editions in publish order
    pub editions: Vec<Edition>,
}

impl RecordFields for Guide {
    const FIELDS: &'static [FieldName] = &[
        FieldName::new("npm_name", "npm-name"),
        FieldName::new("ci_build", "ci-build"),
    ];
}

/// The full registry of guides.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideList {
    /// Guides in first-publish order
    #[serde(default)]
    pub guides: Vec<Guide>,
}

impl RecordFields for GuideList {
    const FIELDS: &'static [FieldName] = &[];
}

impl GuideList {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a guide by its product identity.
    pub fn find(&self, npm_name: &str) -> Option<&Guide> {
        self.guides.iter().find(|g| g.npm_name == npm_name)
    }

    /// Number of guides.
    pub fn len(&self) -> usize {
        self.guides.len()
    }

    /// Whether the registry holds no guides.
    pub fn is_empty(&self) -> bool {
        self.guides.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Incoming publication
// ═══════════════════════════════════════════════════════════════════════

/// A freshly built package: the guide definition plus the one edition
/// being published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    /// Display title
    pub name: String,

    /// Registry category
    pub category: String,

    /// Publisher name, used as the feed item creator
    pub publisher: String,

    /// Product identity
    #[serde(rename = "npm-name", alias = "npm_name")]
    pub npm_name: String,

    /// Free-text description
    pub description: String,

    /// Canonical base URL
    pub canonical: String,

    /// Continuous build location
    #[serde(rename = "ci-build", alias = "ci_build")]
    pub ci_build: String,

    /// The edition being published
    pub edition: Edition,
}

impl RecordFields for Publication {
    const FIELDS: &'static [FieldName] = &[
        FieldName::new("npm_name", "npm-name"),
        FieldName::new("ci_build", "ci-build"),
    ];
}

impl Publication {
    /// Build a new guide whose history starts with this publication's edition.
    pub fn to_guide(&self) -> Guide {
        Guide {
            name: self.name.clone(),
            category: self.category.clone(),
            npm_name: self.npm_name.clone(),
            description: self.description.clone(),
            canonical: self.canonical.clone(),
            ci_build: self.ci_build.clone(),
            editions: vec![self.edition.clone()],
        }
    }

    /// Last path segment of the canonical URL, used as the publish folder name.
    pub fn project_name(&self) -> &str {
        self.canonical
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_name_translates_both_spellings() {
        assert_eq!(Guide::wire_name("npm_name"), "npm-name");
        assert_eq!(Guide::wire_name("npm-name"), "npm-name");
        assert_eq!(Edition::wire_name("fhir_version"), "fhir-version");
        assert_eq!(Edition::wire_name("package"), "package");
    }

    #[test]
    fn test_canonical_name_translates_both_spellings() {
        assert_eq!(Guide::canonical_name("ci-build"), "ci_build");
        assert_eq!(Edition::canonical_name("ig-version"), "ig_version");
        assert_eq!(Edition::canonical_name("url"), "url");
    }

    #[test]
    fn test_project_name_is_last_segment() {
        let publication = Publication {
            name: "Example".into(),
            category: "Core".into(),
            publisher: "HL7".into(),
            npm_name: "hl7.fhir.example".into(),
            description: String::new(),
            canonical: "http://example.org/fhir/example/".into(),
            ci_build: String::new(),
            edition: Edition {
                name: "STU1".into(),
                ig_version: "1.0.0".into(),
                package: "hl7.fhir.example#1.0.0".into(),
                fhir_version: vec!["4.0.1".into()],
                url: String::new(),
                description: String::new(),
            },
        };
        assert_eq!(publication.project_name(), "example");
    }
}
