//! Edition upsert engine
//!
//! Merges one edition into an edition list, and one publication into the
//! guide list. Both are idempotent: applying the same input twice leaves
//! the same state as applying it once.

use crate::model::{Edition, GuideList, Publication};

/// Where an upserted edition ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditionUpsert {
    /// An edition with the same package key was overwritten in place
    Replaced {
        /// Position of the overwritten edition
        index: usize,
    },

    /// No edition had the package key; the new one was appended
    Appended {
        /// Position of the appended edition
        index: usize,
    },
}

impl EditionUpsert {
    /// Whether an existing edition was overwritten.
    pub fn replaced(self) -> bool {
        matches!(self, Self::Replaced { .. })
    }

    /// Position of the edition after the upsert.
    pub fn index(self) -> usize {
        match self {
            Self::Replaced { index } | Self::Appended { index } => index,
        }
    }
}

/// Outcome of merging a publication into the guide list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuideUpsert {
    /// The guide already existed; its edition list was upserted
    Updated {
        /// Position of the guide in the list
        guide: usize,
        /// What happened to the edition
        edition: EditionUpsert,
    },

    /// The guide was new and has been appended
    Added {
        /// Position of the new guide
        guide: usize,
    },
}

/// Insert `edition` into `editions`, replacing any entry with the same
/// `package` at its current position.
///
/// Order is never changed otherwise, so the list stays in publish order.
pub fn upsert_edition(editions: &mut Vec<Edition>, edition: Edition) -> EditionUpsert {
    match editions.iter().position(|e| e.package == edition.package) {
        Some(index) => {
            editions[index] = edition;
            EditionUpsert::Replaced { index }
        }
        None => {
            editions.push(edition);
            EditionUpsert::Appended {
                index: editions.len() - 1,
            }
        }
    }
}

/// Merge a publication into the registry.
///
/// A guide with the same `npm_name` only has its edition list touched;
/// its name, category, description and URLs keep their first-published
/// values. An unknown guide is appended with the publication's edition as
/// its whole history.
pub fn upsert_guide(list: &mut GuideList, publication: &Publication) -> GuideUpsert {
    match list
        .guides
        .iter()
        .position(|g| g.npm_name == publication.npm_name)
    {
        Some(guide) => {
            let edition = upsert_edition(
                &mut list.guides[guide].editions,
                publication.edition.clone(),
            );
            GuideUpsert::Updated { guide, edition }
        }
        None => {
            list.guides.push(publication.to_guide());
            GuideUpsert::Added {
                guide: list.guides.len() - 1,
            }
        }
    }
}
