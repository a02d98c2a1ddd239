//! # ig-registry
//!
//! Local registry of published implementation guides.
//!
//! Each guide has a history of editions (release tracks). Publishing an
//! edition upserts it into the guide's own history document and into the
//! registry-wide guide list, announces the package in an RSS feed, and
//! re-renders the index pages.
//!
//! ## Architecture
//!
//! ```text
//! descriptors ──► Publication ──► upsert ──► ig_history.json ──► history page
//!                                   │
//!                                   ├──────► ig-list.json ─────► list page
//!                                   │
//!                                   └──────► package-feed.xml
//! ```
//!
//! - **Record model** ([`model`]): `Edition`, `Guide`, `GuideList` and their
//!   hyphenated persisted keys
//! - **Edition upsert** ([`upsert`]): at most one edition per package key,
//!   at most one guide per npm name, replace in place
//! - **Feed** ([`feed`]): RSS model, XML codec, insert-only-if-absent upsert
//! - **Presentation** ([`present`]): sequence/topic grouping, pre-release
//!   aware ordering, legacy escaping
//! - **Rendering** ([`render`]): maud pages fed by the presentation views
//! - **Files** ([`registry`], [`descriptor`]): reading and writing documents

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod descriptor;
pub mod error;
pub mod feed;
pub mod model;
pub mod present;
pub mod registry;
pub mod render;
pub mod upsert;

// Re-export main types
pub use descriptor::{BuildOutput, PublicationRequest};
pub use error::{RegistryError, Result};
pub use feed::{upsert_feed_item, Feed, FeedDate, FeedItem, FeedUpdate};
pub use model::{Edition, FieldName, Guide, GuideList, Publication, RecordFields};
pub use present::{sort_sequences, topic_of, HistoryView, ListView};
pub use registry::Registry;
pub use upsert::{upsert_edition, upsert_guide, EditionUpsert, GuideUpsert};

/// ig-registry version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
