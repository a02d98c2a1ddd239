//! Package syndication feed
//!
//! An RSS 2.0 document announcing every published package artifact. Items
//! are immutable announcements: once an item with a given `guid` is in the
//! feed it is never replaced, unlike editions in the guide list.

mod codec;
mod date;

pub use date::{format_feed_date, now, parse_feed_date, FeedDate, FEED_DATE_FORMAT};

use crate::model::Publication;

/// Atom namespace, used for the channel self link
pub const NS_ATOM: &str = "http://www.w3.org/2005/Atom";

/// RSS content module namespace
pub const NS_CONTENT: &str = "http://purl.org/rss/1.0/modules/content/";

/// Dublin Core namespace, used for item creators
pub const NS_DC: &str = "http://purl.org/dc/elements/1.1/";

/// FHIR package feed namespace
pub const NS_FHIR: &str = "http://hl7.org/fhir/feed";

/// Item kind written when none is given
pub const DEFAULT_KIND: &str = "IG";

/// Channel language written when none is given
pub const DEFAULT_LANGUAGE: &str = "en";

/// Channel time-to-live in minutes written when none is given
pub const DEFAULT_TTL: u32 = 600;

/// RSS version of the root element
pub const RSS_VERSION: &str = "2.0";

/// Stable item identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guid {
    /// Identity URL, also the download location
    pub url: String,

    /// The `isPermaLink` attribute
    pub is_perma_link: bool,
}

impl Guid {
    /// A permanent-link guid.
    pub fn permalink(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            is_perma_link: true,
        }
    }
}

/// One feed entry announcing a package artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// Entry title
    pub title: String,

    /// Entry description
    pub description: String,

    /// Download link
    pub link: String,

    /// Identity of the entry
    pub guid: Guid,

    /// `dc:creator`
    pub creator: String,

    /// `fhir:version`, a single canonical FHIR version
    pub fhir_version: String,

    /// `fhir:kind`
    pub kind: String,

    /// `pubDate`
    pub publication_date: FeedDate,

    /// `fhir:details`
    pub details: Option<String>,
}

impl FeedItem {
    /// The feed entry announcing a publication's package.
    pub fn for_publication(publication: &Publication, published: FeedDate) -> Self {
        let edition = &publication.edition;
        let package_url = format!("{}/package.tgz", edition.url);
        Self {
            title: format!("{} version {}", publication.name, edition.ig_version),
            description: edition.description.clone(),
            link: package_url.clone(),
            guid: Guid::permalink(package_url),
            creator: publication.publisher.clone(),
            fhir_version: edition.primary_fhir_version().unwrap_or_default().to_string(),
            kind: DEFAULT_KIND.to_string(),
            publication_date: published,
            details: None,
        }
    }
}

/// The channel's `atom:link` pointing at the feed itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomLink {
    /// Feed location
    pub href: String,

    /// Link relation
    pub rel: String,

    /// Media type
    pub link_type: String,
}

impl AtomLink {
    /// A `rel="self"` RSS link.
    pub fn self_link(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: "self".to_string(),
            link_type: "application/rss+xml".to_string(),
        }
    }
}

/// Channel envelope and its items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    /// Channel title
    pub title: String,

    /// Channel description
    pub description: String,

    /// Site link
    pub link: String,

    /// Generator name
    pub generator: String,

    /// Date of the newest item
    pub last_build_date: FeedDate,

    /// Self link
    pub atom_link: AtomLink,

    /// Channel publication date
    pub publication_date: FeedDate,

    /// Content language
    pub language: String,

    /// Time-to-live in minutes
    pub ttl: u32,

    /// Items in publish order
    pub items: Vec<FeedItem>,
}

/// A package feed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    /// `version` attribute of the root element
    pub version: String,

    /// The single channel
    pub channel: Channel,
}

/// Outcome of [`upsert_feed_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedUpdate {
    /// The item was appended and the build date moved forward
    Inserted,

    /// An item with the same guid exists; nothing changed
    AlreadyPublished,
}

impl FeedUpdate {
    /// Whether the feed was modified.
    pub fn inserted(self) -> bool {
        self == Self::Inserted
    }
}

impl Feed {
    /// An empty feed whose dates are all `created`.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
        self_href: impl Into<String>,
        created: FeedDate,
    ) -> Self {
        Self {
            version: RSS_VERSION.to_string(),
            channel: Channel {
                title: title.into(),
                description: description.into(),
                link: link.into(),
                generator: concat!("ig-registry ", env!("CARGO_PKG_VERSION")).to_string(),
                last_build_date: created,
                atom_link: AtomLink::self_link(self_href),
                publication_date: created,
                language: DEFAULT_LANGUAGE.to_string(),
                ttl: DEFAULT_TTL,
                items: Vec::new(),
            },
        }
    }

    /// Items in publish order.
    pub fn items(&self) -> &[FeedItem] {
        &self.channel.items
    }

    /// Whether an item with this guid URL is already announced.
    pub fn contains(&self, guid_url: &str) -> bool {
        self.channel.items.iter().any(|i| i.guid.url == guid_url)
    }
}

/// Append `item` unless its guid is already in the feed.
///
/// On insert the channel's `last_build_date` becomes the item's
/// publication date. An existing guid leaves the feed untouched.
pub fn upsert_feed_item(feed: &mut Feed, item: FeedItem) -> FeedUpdate {
    if feed.contains(&item.guid.url) {
        return FeedUpdate::AlreadyPublished;
    }
    feed.channel.last_build_date = item.publication_date;
    feed.channel.items.push(item);
    FeedUpdate::Inserted
}
