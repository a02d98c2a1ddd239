//! File-level registry operations
//!
//! Every operation reads one whole document, changes it in memory and writes
//! the whole document back. Callers must not run two operations against the
//! same files at once; the last writer wins.
//!
//! # Layout
//!
//! ```text
//! <registry>/ig-list.json        all guides
//! <registry>/package-feed.xml    package announcements
//! <registry>/index.html          rendered list
//!
//! <guide dir>/ig_history.json    one guide's history
//! <guide dir>/index.html         rendered history
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{RegistryError, Result};
use crate::feed::{upsert_feed_item, Feed, FeedDate, FeedItem, FeedUpdate};
use crate::model::{Guide, GuideList, Publication};
use crate::present::{HistoryView, ListView};
use crate::render::{render_history_page, render_list_page};
use crate::upsert::{upsert_edition, upsert_guide, GuideUpsert};

/// Guide list document inside a registry directory
pub const GUIDE_LIST_FILE: &str = "ig-list.json";

/// Package feed document inside a registry directory
pub const FEED_FILE: &str = "package-feed.xml";

/// History document inside a guide directory
pub const HISTORY_FILE: &str = "ig_history.json";

/// Rendered page next to a list or history document
pub const INDEX_PAGE: &str = "index.html";

// ═══════════════════════════════════════════════════════════════════════
// Document IO
// ═══════════════════════════════════════════════════════════════════════

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| RegistryError::io(parent, e))
        }
        _ => Ok(()),
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent(path)?;
    fs::write(path, contents).map_err(|e| RegistryError::io(path, e))
}

/// Read a JSON document.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| RegistryError::json(path, e))
}

/// Write a JSON document with four-space indentation.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| RegistryError::json(path, e))?;
    buf.push(b'\n');

    ensure_parent(path)?;
    fs::write(path, buf).map_err(|e| RegistryError::io(path, e))
}

/// Read the guide list, or an empty one if the file does not exist yet.
pub fn load_guide_list(path: &Path) -> Result<GuideList> {
    if path.exists() {
        read_json(path)
    } else {
        Ok(GuideList::new())
    }
}

/// Read the package feed. A missing feed is an error: creating it is not
/// part of publishing.
pub fn load_feed(path: &Path) -> Result<Feed> {
    if !path.exists() {
        return Err(RegistryError::FeedMissing(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|e| RegistryError::io(path, e))?;
    Feed::from_xml(&text)
}

/// Write the package feed.
pub fn save_feed(path: &Path, feed: &Feed) -> Result<()> {
    write_file(path, &feed.to_xml()?)
}

// ═══════════════════════════════════════════════════════════════════════
// Updates
// ═══════════════════════════════════════════════════════════════════════

/// Upsert the publication's edition into the history document in
/// `guide_dir`, creating the document on first publish.
///
/// Returns the path of the history document.
pub fn update_history(guide_dir: &Path, publication: &Publication) -> Result<PathBuf> {
    let path = guide_dir.join(HISTORY_FILE);

    let guide = if path.exists() {
        let mut guide: Guide = read_json(&path)?;
        let outcome = upsert_edition(&mut guide.editions, publication.edition.clone());
        debug!(
            package = %publication.edition.package,
            replaced = outcome.replaced(),
            "upserted edition into history"
        );
        guide
    } else {
        debug!(path = %path.display(), "starting new history");
        publication.to_guide()
    };

    write_json(&path, &guide)?;
    info!(path = %path.display(), "updated guide history");
    Ok(path)
}

/// Upsert the publication into the guide list document.
pub fn update_guide_list(path: &Path, publication: &Publication) -> Result<GuideUpsert> {
    let mut list = load_guide_list(path)?;
    let outcome = upsert_guide(&mut list, publication);
    write_json(path, &list)?;

    match outcome {
        GuideUpsert::Added { .. } => info!(guide = %publication.npm_name, "added guide to list"),
        GuideUpsert::Updated { edition, .. } => info!(
            guide = %publication.npm_name,
            replaced = edition.replaced(),
            "updated guide in list"
        ),
    }
    Ok(outcome)
}

/// Announce the publication's package in the feed, unless it already is.
///
/// The feed file is only rewritten when an item was inserted.
pub fn update_package_feed(
    path: &Path,
    publication: &Publication,
    published: FeedDate,
) -> Result<FeedUpdate> {
    let mut feed = load_feed(path)?;
    let outcome = upsert_feed_item(&mut feed, FeedItem::for_publication(publication, published));

    match outcome {
        FeedUpdate::Inserted => {
            save_feed(path, &feed)?;
            info!(path = %path.display(), "updated package feed");
        }
        FeedUpdate::AlreadyPublished => {
            warn!("no new package, did not update package feed");
        }
    }
    Ok(outcome)
}

// ═══════════════════════════════════════════════════════════════════════
// Rendering
// ═══════════════════════════════════════════════════════════════════════

/// Render the history document into `index.html` beside it.
pub fn render_history(history_file: &Path) -> Result<PathBuf> {
    let history: Guide = read_json(history_file)?;
    let page = render_history_page(&HistoryView::new(history));

    let out = history_file.with_file_name(INDEX_PAGE);
    write_file(&out, &page.into_string())?;
    info!(path = %out.display(), "rendered history page");
    Ok(out)
}

/// Render the guide list document into `index.html` beside it.
pub fn render_guide_list(list_file: &Path, title: &str) -> Result<PathBuf> {
    let list = load_guide_list(list_file)?;
    let page = render_list_page(&ListView::new(title, &list));

    let out = list_file.with_file_name(INDEX_PAGE);
    write_file(&out, &page.into_string())?;
    info!(path = %out.display(), "rendered guide list page");
    Ok(out)
}

// ═══════════════════════════════════════════════════════════════════════
// Registry directory
// ═══════════════════════════════════════════════════════════════════════

/// A registry directory holding the guide list, feed and list page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    root: PathBuf,
}

impl Registry {
    /// A registry rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Registry directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the guide list document.
    pub fn guide_list_file(&self) -> PathBuf {
        self.root.join(GUIDE_LIST_FILE)
    }

    /// Path of the package feed document.
    pub fn feed_file(&self) -> PathBuf {
        self.root.join(FEED_FILE)
    }

    /// Path of the rendered list page.
    pub fn index_page(&self) -> PathBuf {
        self.root.join(INDEX_PAGE)
    }

    /// Upsert a publication into the guide list.
    pub fn update_guide_list(&self, publication: &Publication) -> Result<GuideUpsert> {
        update_guide_list(&self.guide_list_file(), publication)
    }

    /// Announce a publication in the package feed.
    pub fn update_package_feed(
        &self,
        publication: &Publication,
        published: FeedDate,
    ) -> Result<FeedUpdate> {
        update_package_feed(&self.feed_file(), publication, published)
    }

    /// Render the list page.
    pub fn render_list(&self, title: &str) -> Result<PathBuf> {
        render_guide_list(&self.guide_list_file(), title)
    }
}
