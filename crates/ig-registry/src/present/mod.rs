//! Presentation data for the history and list pages
//!
//! Turns persisted records into display-ready groupings. The views are plain
//! serializable data; [`crate::render`] turns them into HTML.

mod escape;
mod grouping;
mod ordering;

pub use escape::{escape_legacy, LEGACY_ENTITIES};
pub use grouping::{
    group_by_sequence, group_by_topic, topic_of, SequenceGroups, TopicEntry, TopicGroups,
    TOPIC_SUFFIX_PATTERN,
};
pub use ordering::{
    base_key, compare_sequences, is_prerelease, sort_sequences, PRERELEASE_TOKEN_PATTERN,
};

use serde::Serialize;

use crate::model::{Guide, GuideList};

/// Data for one guide's history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    /// Page title, the guide's name
    pub title: String,

    /// The guide the page is about
    pub guides: Vec<Guide>,

    /// Its editions by sequence, in order of first appearance
    pub sequences: SequenceGroups,
}

impl HistoryView {
    /// Build the view from a history record.
    pub fn new(history: Guide) -> Self {
        Self {
            title: history.name.clone(),
            sequences: group_by_sequence(&history.editions),
            guides: vec![history],
        }
    }
}

/// Data for the registry list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    /// Page title
    pub title: String,

    /// Entries by topic and sequence name
    pub topics: TopicGroups,
}

impl ListView {
    /// Build the view from the registry.
    ///
    /// Topics are ordered case-insensitively; sequence names within a topic
    /// newest first, each pre-release after its final release.
    pub fn new(title: impl Into<String>, list: &GuideList) -> Self {
        let mut topics = group_by_topic(list);
        topics.sort_by(|a, _, b, _| {
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        for sequences in topics.values_mut() {
            sort_sequences(sequences, true);
        }
        Self {
            title: title.into(),
            topics,
        }
    }
}
