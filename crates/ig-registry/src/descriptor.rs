//! Build and publication descriptors of a guide project
//!
//! A project directory holds the build tool's output (`output/`, with one
//! `ImplementationGuide*.json`) and a `publication-request.json` written by
//! the editors. Both are read into typed descriptors; every required key is
//! checked up front and a missing one is reported by name.
//!
//! `version` and `package-id` become directory and archive names, so each must
//! be a single plain path segment. `fhirVersion` must not be empty.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::error::{RegistryError, Result};
use crate::model::{Edition, Publication};

/// Directory of the build output inside a project
pub const OUTPUT_DIR: &str = "output";

/// File name prefix of the build output descriptor
pub const BUILD_OUTPUT_PREFIX: &str = "ImplementationGuide";

/// Publication request file inside a project
pub const PUBLICATION_REQUEST_FILE: &str = "publication-request.json";

fn require<T>(value: Option<T>, descriptor: &'static str, field: &'static str) -> Result<T> {
    value.ok_or(RegistryError::MissingField { descriptor, field })
}

fn invalid(descriptor: &'static str, field: &'static str, reason: &'static str) -> RegistryError {
    RegistryError::InvalidField {
        descriptor,
        field,
        reason,
    }
}

/// Values that name a directory or archive must be one plain path segment.
fn require_segment(
    value: String,
    descriptor: &'static str,
    field: &'static str,
) -> Result<String> {
    let mut components = Path::new(&value).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(value),
        _ => Err(invalid(
            descriptor,
            field,
            "must be a single non-empty path segment",
        )),
    }
}

fn read_descriptor<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| RegistryError::json(path, e))
}

// ═══════════════════════════════════════════════════════════════════════
// Build output
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
struct RawBuildOutput {
    url: Option<String>,
    #[serde(rename = "fhirVersion")]
    fhir_version: Option<Vec<String>>,
    publisher: Option<String>,
}

/// The parts of the built ImplementationGuide resource the registry needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOutput {
    /// Canonical URL of the ImplementationGuide resource
    pub url: String,

    /// FHIR versions the guide targets
    pub fhir_version: Vec<String>,

    /// Publisher name
    pub publisher: String,
}

impl BuildOutput {
    const NAME: &'static str = "build output";

    /// Read and validate a build output descriptor.
    pub fn load(path: &Path) -> Result<Self> {
        let raw: RawBuildOutput = read_descriptor(path)?;
        let fhir_version = require(raw.fhir_version, Self::NAME, "fhirVersion")?;
        if fhir_version.first().map_or(true, |v| v.trim().is_empty()) {
            return Err(invalid(Self::NAME, "fhirVersion", "must list at least one version"));
        }
        Ok(Self {
            url: require(raw.url, Self::NAME, "url")?,
            fhir_version,
            publisher: require(raw.publisher, Self::NAME, "publisher")?,
        })
    }

    /// Canonical base: the resource URL without its last two segments
    /// (`/ImplementationGuide/<id>`).
    pub fn canonical(&self) -> Result<String> {
        self.url
            .rsplitn(3, '/')
            .nth(2)
            .filter(|base| !base.is_empty())
            .map(str::to_string)
            .ok_or_else(|| RegistryError::InvalidCanonical(self.url.clone()))
    }
}

/// Locate the single build output descriptor in `output_dir`.
pub fn find_build_output(output_dir: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(output_dir).map_err(|_| RegistryError::PackageNotBuilt {
        dir: output_dir.to_path_buf(),
        found: 0,
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| RegistryError::io(output_dir, e))?.path();
        let is_descriptor = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(BUILD_OUTPUT_PREFIX) && n.ends_with(".json"));
        if is_descriptor && path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        1 => Ok(matches.remove(0)),
        found => Err(RegistryError::PackageNotBuilt {
            dir: output_dir.to_path_buf(),
            found,
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Publication request
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawPublicationRequest {
    title: Option<String>,
    category: Option<String>,
    package_id: Option<String>,
    introduction: Option<String>,
    ci_build: Option<String>,
    sequence: Option<String>,
    version: Option<String>,
    path: Option<String>,
    desc: Option<String>,
}

/// What the editors asked to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRequest {
    /// Guide title
    pub title: String,

    /// Registry category
    pub category: String,

    /// Package id, the guide's product identity
    pub package_id: String,

    /// Guide description
    pub introduction: String,

    /// Continuous build location
    pub ci_build: String,

    /// Sequence label of this edition
    pub sequence: String,

    /// Edition version
    pub version: String,

    /// Where the edition is published
    pub path: String,

    /// Edition description
    pub desc: String,
}

impl PublicationRequest {
    const NAME: &'static str = "publication request";

    /// Read and validate a publication request.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(RegistryError::PublicationRequestMissing(path.to_path_buf()));
        }
        let raw: RawPublicationRequest = read_descriptor(path)?;
        Ok(Self {
            title: require(raw.title, Self::NAME, "title")?,
            category: require(raw.category, Self::NAME, "category")?,
            package_id: require_segment(
                require(raw.package_id, Self::NAME, "package-id")?,
                Self::NAME,
                "package-id",
            )?,
            introduction: require(raw.introduction, Self::NAME, "introduction")?,
            ci_build: require(raw.ci_build, Self::NAME, "ci-build")?,
            sequence: require(raw.sequence, Self::NAME, "sequence")?,
            version: require_segment(
                require(raw.version, Self::NAME, "version")?,
                Self::NAME,
                "version",
            )?,
            path: require(raw.path, Self::NAME, "path")?,
            desc: require(raw.desc, Self::NAME, "desc")?,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Publication
// ═══════════════════════════════════════════════════════════════════════

impl Publication {
    /// Combine a build output and a publication request.
    pub fn from_descriptors(build: BuildOutput, request: PublicationRequest) -> Result<Self> {
        let canonical = build.canonical()?;
        Ok(Self {
            name: request.title,
            category: request.category,
            publisher: build.publisher,
            npm_name: request.package_id.clone(),
            description: request.introduction,
            canonical,
            ci_build: request.ci_build,
            edition: Edition {
                name: request.sequence,
                package: format!("{}#{}", request.package_id, request.version),
                ig_version: request.version,
                fhir_version: build.fhir_version,
                url: request.path,
                description: request.desc,
            },
        })
    }

    /// Read the publication described by a built project directory.
    pub fn load(project_dir: &Path) -> Result<Self> {
        debug!(project = %project_dir.display(), "reading package information");
        let build = BuildOutput::load(&find_build_output(&project_dir.join(OUTPUT_DIR))?)?;
        let request = PublicationRequest::load(&project_dir.join(PUBLICATION_REQUEST_FILE))?;
        Self::from_descriptors(build, request)
    }
}
