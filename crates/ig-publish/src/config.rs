//! Resolved settings for a publish run

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ig_registry::descriptor::OUTPUT_DIR;
use ig_registry::Registry;

use crate::cli::RegistryArgs;

/// Publish directory inside a project
pub const PUBLISH_DIR: &str = "publish";

/// Archive directory inside the publish directory
pub const ARCHIVE_DIR: &str = "ig-build-zips";

/// Everything a publish run needs, with defaults applied.
///
/// | Source              | Setting        | Default                   |
/// |---------------------|----------------|---------------------------|
/// | `--project-dir`     | project        | current directory         |
/// | `--ig-registry`     | registry       | `IG_REGISTRY`             |
/// | `--list-title`      | list title     | `IG_LIST_TITLE`, built-in |
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Project being published
    pub project_dir: PathBuf,

    /// Registry receiving the publication
    pub registry: Registry,

    /// Title of the rendered list page
    pub list_title: String,
}

impl PublishConfig {
    /// Apply defaults to the parsed arguments.
    pub fn resolve(project_dir: Option<PathBuf>, args: RegistryArgs) -> Result<Self> {
        let project_dir = match project_dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("cannot determine current directory")?,
        };
        Ok(Self {
            project_dir,
            registry: Registry::new(args.ig_registry),
            list_title: args.list_title,
        })
    }

    /// Build output of the project.
    pub fn output_dir(&self) -> PathBuf {
        self.project_dir.join(OUTPUT_DIR)
    }

    /// Where versioned copies and archives are written.
    pub fn publish_dir(&self) -> PathBuf {
        self.project_dir.join(PUBLISH_DIR)
    }

    /// Where archives are written.
    pub fn archive_dir(&self) -> PathBuf {
        self.publish_dir().join(ARCHIVE_DIR)
    }

    /// Registry directory.
    pub fn registry_dir(&self) -> &Path {
        self.registry.root()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ig_registry::descriptor::find_build_output;
    use std::fs;

    #[test]
    fn test_output_dir_is_where_descriptors_are_found() {
        let dir = tempfile::tempdir().unwrap();
        let config = PublishConfig::resolve(
            Some(dir.path().to_path_buf()),
            RegistryArgs {
                ig_registry: dir.path().join("registry"),
                list_title: "Registry".to_string(),
            },
        )
        .unwrap();

        fs::create_dir_all(config.output_dir()).unwrap();
        let descriptor = config.output_dir().join("ImplementationGuide-x.json");
        fs::write(&descriptor, "{}").unwrap();

        assert_eq!(
            find_build_output(&dir.path().join(OUTPUT_DIR)).unwrap(),
            descriptor
        );
        assert_eq!(config.archive_dir(), dir.path().join("publish").join("ig-build-zips"));
    }
}
