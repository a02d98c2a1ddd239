//! The publish workflow
//!
//! ```text
//! output/ ──copy──► publish/<project>/<version>/ ──zip──► publish/ig-build-zips/<package>.zip
//!    │
//!    └─ descriptors ──► history ──► list ──► feed
//! ```

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ig_registry::feed;
use ig_registry::registry::{render_history, update_history};
use ig_registry::{FeedDate, FeedUpdate, GuideUpsert, Publication};
use tracing::info;

use crate::archive::{copy_dir, zip_dir};
use crate::config::PublishConfig;

/// What a publish run produced.
#[derive(Debug, Clone)]
pub struct PublishReport {
    /// The publication that was read from the project
    pub publication: Publication,

    /// Versioned copy of the build output
    pub version_dir: PathBuf,

    /// Zip archive of the versioned copy
    pub archive: PathBuf,

    /// The guide's history document
    pub history: PathBuf,

    /// What happened in the guide list
    pub guide: GuideUpsert,

    /// What happened in the package feed
    pub feed: FeedUpdate,
}

/// Publish the project described by `config`, stamping the feed with the
/// current local time.
pub fn publish(config: &PublishConfig) -> Result<PublishReport> {
    publish_at(config, feed::now())
}

/// Publish the project described by `config` with an explicit feed date.
pub fn publish_at(config: &PublishConfig, published: FeedDate) -> Result<PublishReport> {
    let publication = Publication::load(&config.project_dir).with_context(|| {
        format!(
            "cannot read package information from {}",
            config.project_dir.display()
        )
    })?;
    info!(
        name = %publication.name,
        package = %publication.edition.package,
        "publishing"
    );

    let guide_dir = config.publish_dir().join(publication.project_name());
    let version_dir = guide_dir.join(&publication.edition.ig_version);
    if version_dir.exists() {
        fs::remove_dir_all(&version_dir)
            .with_context(|| format!("cannot remove {}", version_dir.display()))?;
        info!("removed previous versioned guide");
    }
    let copied = copy_dir(&config.output_dir(), &version_dir)?;
    info!(files = copied, path = %version_dir.display(), "created versioned guide");

    let archive = zip_dir(
        &version_dir,
        &publication.edition.ig_version,
        &config
            .archive_dir()
            .join(format!("{}.zip", publication.edition.package)),
    )?;
    info!(path = %archive.display(), "created guide archive");

    let history = update_history(&guide_dir, &publication)?;
    render_history(&history)?;

    let guide = config.registry.update_guide_list(&publication)?;
    config.registry.render_list(&config.list_title)?;

    let feed = config
        .registry
        .update_package_feed(&publication, published)
        .context("cannot update package feed")?;

    Ok(PublishReport {
        publication,
        version_dir,
        archive,
        history,
        guide,
        feed,
    })
}
