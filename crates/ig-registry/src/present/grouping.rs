//! Grouping of editions for the history and list pages

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::model::{Edition, GuideList};

/// Trailing version or ballot marker stripped from an edition name to get
/// its topic, e.g. ` 2.1.0-ballot`.
pub const TOPIC_SUFFIX_PATTERN: &str = r"\s[\-\d.(ballot|b)]+$";

static TOPIC_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOPIC_SUFFIX_PATTERN).expect("valid regex"));

/// Editions keyed by sequence name, in order of first appearance.
pub type SequenceGroups = IndexMap<String, Vec<Edition>>;

/// List entries keyed by topic, then by sequence name.
pub type TopicGroups = IndexMap<String, IndexMap<String, Vec<TopicEntry>>>;

/// One row of the list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicEntry {
    /// Guide title
    pub name: String,

    /// Edition version
    pub ig_version: String,

    /// Edition FHIR versions
    pub fhir_version: Vec<String>,

    /// Edition description
    pub description: String,

    /// Edition location
    pub url: String,
}

/// Topic of an edition name: the name without its trailing version marker.
///
/// A name with no such marker is its own topic.
pub fn topic_of(name: &str) -> &str {
    match TOPIC_SUFFIX_RE.find(name) {
        Some(suffix) => &name[..suffix.start()],
        None => name,
    }
}

/// Partition editions by sequence name, keeping their relative order.
pub fn group_by_sequence(editions: &[Edition]) -> SequenceGroups {
    let mut groups = SequenceGroups::new();
    for edition in editions {
        groups
            .entry(edition.name.clone())
            .or_default()
            .push(edition.clone());
    }
    groups
}

/// Group every (guide, edition) pair of the registry by topic and
/// sequence name. Entries keep publish order within a sequence.
pub fn group_by_topic(list: &GuideList) -> TopicGroups {
    let mut topics = TopicGroups::new();
    for guide in &list.guides {
        for edition in &guide.editions {
            topics
                .entry(topic_of(&edition.name).to_string())
                .or_default()
                .entry(edition.name.clone())
                .or_default()
                .push(TopicEntry {
                    name: guide.name.clone(),
                    ig_version: edition.ig_version.clone(),
                    fhir_version: edition.fhir_version.clone(),
                    description: edition.description.clone(),
                    url: edition.url.clone(),
                });
        }
    }
    topics
}
