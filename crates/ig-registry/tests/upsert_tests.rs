//! Edition and guide upsert tests

mod common;

use common::{edition, publication};
use ig_registry::*;
use pretty_assertions::assert_eq;

fn packages(editions: &[Edition]) -> Vec<&str> {
    editions.iter().map(|e| e.package.as_str()).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Edition upsert
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_upsert_edition_appends_new_package() {
    let mut editions = vec![edition("STU1", "1.0.0")];
    let outcome = upsert_edition(&mut editions, edition("STU1", "1.0.1"));

    assert_eq!(outcome, EditionUpsert::Appended { index: 1 });
    assert!(!outcome.replaced());
    assert_eq!(
        packages(&editions),
        vec!["hl7.fhir.example#1.0.0", "hl7.fhir.example#1.0.1"]
    );
}

#[test]
fn test_upsert_edition_replaces_in_place() {
    let mut editions = vec![
        edition("STU1", "1.0.0"),
        edition("STU1", "1.0.1"),
        edition("STU2", "2.0.0"),
    ];
    let mut changed = edition("STU1 ballot", "1.0.1");
    changed.description = "Corrected".to_string();

    let outcome = upsert_edition(&mut editions, changed.clone());

    assert_eq!(outcome, EditionUpsert::Replaced { index: 1 });
    assert_eq!(outcome.index(), 1);
    assert_eq!(editions.len(), 3);
    assert_eq!(editions[1], changed);
    assert_eq!(
        packages(&editions),
        vec![
            "hl7.fhir.example#1.0.0",
            "hl7.fhir.example#1.0.1",
            "hl7.fhir.example#2.0.0"
        ]
    );
}

#[test]
fn test_upsert_edition_into_empty() {
    let mut editions = Vec::new();
    let outcome = upsert_edition(&mut editions, edition("STU1", "1.0.0"));
    assert_eq!(outcome, EditionUpsert::Appended { index: 0 });
    assert_eq!(editions.len(), 1);
}

#[test]
fn test_upsert_edition_keeps_packages_unique() {
    let mut editions = Vec::new();
    for version in ["1.0.0", "1.0.1", "1.0.0", "2.0.0", "1.0.1", "1.0.1"] {
        upsert_edition(&mut editions, edition("STU1", version));
    }

    let mut seen = packages(&editions);
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), editions.len());
    assert_eq!(editions.len(), 3);
}

// ═══════════════════════════════════════════════════════════════════════
// Guide upsert
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_publish_scenario() {
    let mut list = GuideList::new();

    let outcome = upsert_guide(
        &mut list,
        &publication("hl7.fhir.example", edition("STU1", "1.0.0")),
    );
    assert_eq!(outcome, GuideUpsert::Added { guide: 0 });
    assert_eq!(list.len(), 1);
    assert_eq!(list.guides[0].editions.len(), 1);

    let outcome = upsert_guide(
        &mut list,
        &publication("hl7.fhir.example", edition("STU1", "1.0.1")),
    );
    assert_eq!(
        outcome,
        GuideUpsert::Updated {
            guide: 0,
            edition: EditionUpsert::Appended { index: 1 }
        }
    );
    assert_eq!(list.len(), 1);
    assert_eq!(
        packages(&list.guides[0].editions),
        vec!["hl7.fhir.example#1.0.0", "hl7.fhir.example#1.0.1"]
    );

    let mut republished = edition("STU1", "1.0.0");
    republished.description = "Technical correction".to_string();
    let outcome = upsert_guide(
        &mut list,
        &publication("hl7.fhir.example", republished.clone()),
    );
    assert_eq!(
        outcome,
        GuideUpsert::Updated {
            guide: 0,
            edition: EditionUpsert::Replaced { index: 0 }
        }
    );
    assert_eq!(list.guides[0].editions.len(), 2);
    assert_eq!(list.guides[0].editions[0], republished);
}

#[test]
fn test_upsert_guide_is_idempotent() {
    let incoming = publication("hl7.fhir.example", edition("STU1", "1.0.0"));

    let mut once = GuideList::new();
    upsert_guide(&mut once, &incoming);

    let mut twice = GuideList::new();
    upsert_guide(&mut twice, &incoming);
    upsert_guide(&mut twice, &incoming);

    assert_eq!(
        serde_json::to_value(&once).unwrap(),
        serde_json::to_value(&twice).unwrap()
    );
}

#[test]
fn test_upsert_guide_does_not_refresh_guide_fields() {
    let mut list = GuideList::new();
    upsert_guide(
        &mut list,
        &publication("hl7.fhir.example", edition("STU1", "1.0.0")),
    );

    let mut renamed = publication("hl7.fhir.example", edition("STU1", "1.0.1"));
    renamed.name = "Renamed Guide".to_string();
    renamed.category = "Other".to_string();
    renamed.description = "New text".to_string();
    upsert_guide(&mut list, &renamed);

    let guide = list.find("hl7.fhir.example").unwrap();
    assert_eq!(guide.name, "Example Guide");
    assert_eq!(guide.category, "Core");
    assert_eq!(guide.description, "An example guide");
    assert_eq!(guide.editions.len(), 2);
}

#[test]
fn test_upsert_guide_keeps_npm_names_unique() {
    let mut list = GuideList::new();
    for (npm, version) in [
        ("hl7.fhir.a", "1.0.0"),
        ("hl7.fhir.b", "1.0.0"),
        ("hl7.fhir.a", "1.1.0"),
        ("hl7.fhir.c", "0.1.0"),
        ("hl7.fhir.b", "1.0.0"),
    ] {
        upsert_guide(&mut list, &publication(npm, edition("STU1", version)));
    }

    let names: Vec<&str> = list.guides.iter().map(|g| g.npm_name.as_str()).collect();
    assert_eq!(names, vec!["hl7.fhir.a", "hl7.fhir.b", "hl7.fhir.c"]);
    assert_eq!(list.find("hl7.fhir.a").unwrap().editions.len(), 2);
    assert_eq!(list.find("hl7.fhir.b").unwrap().editions.len(), 1);
}
