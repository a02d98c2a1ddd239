//! HTML pages for the registry
//!
//! Free text from records goes through [`escape_legacy`]; URLs and version
//! strings are escaped by maud itself.

use maud::{html, Markup, DOCTYPE};

use crate::model::Edition;
use crate::present::{escape_legacy, HistoryView, ListView, TopicEntry};

fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (escape_legacy(title)) }
            }
            body {
                h1 { (escape_legacy(title)) }
                (body)
            }
        }
    }
}

fn fhir_versions(versions: &[String]) -> String {
    versions.join(", ")
}

fn edition_row(edition: &Edition) -> Markup {
    html! {
        tr {
            td { a href=(edition.url) { (edition.ig_version) } }
            td { (fhir_versions(&edition.fhir_version)) }
            td { (escape_legacy(&edition.description)) }
        }
    }
}

fn entry_row(entry: &TopicEntry) -> Markup {
    html! {
        tr {
            td { a href=(entry.url) { (escape_legacy(&entry.name)) } }
            td { (entry.ig_version) }
            td { (fhir_versions(&entry.fhir_version)) }
            td { (escape_legacy(&entry.description)) }
        }
    }
}

/// Render one guide's history page.
pub fn render_history_page(view: &HistoryView) -> Markup {
    page(
        &view.title,
        html! {
            @for guide in &view.guides {
                p.description { (escape_legacy(&guide.description)) }
                dl.guide {
                    dt { "Package" }
                    dd { code { (guide.npm_name) } }
                    dt { "Canonical" }
                    dd { a href=(guide.canonical) { (guide.canonical) } }
                    dt { "Continuous build" }
                    dd { a href=(guide.ci_build) { (guide.ci_build) } }
                }
            }
            @for (sequence, editions) in &view.sequences {
                section.sequence {
                    h2 { (escape_legacy(sequence)) }
                    table {
                        thead {
                            tr { th { "Version" } th { "FHIR" } th { "Description" } }
                        }
                        tbody {
                            @for edition in editions {
                                (edition_row(edition))
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Render the registry list page.
pub fn render_list_page(view: &ListView) -> Markup {
    page(
        &view.title,
        html! {
            @for (topic, sequences) in &view.topics {
                section.topic {
                    h2 { (escape_legacy(topic)) }
                    @for (sequence, entries) in sequences {
                        h3 { (escape_legacy(sequence)) }
                        table {
                            thead {
                                tr {
                                    th { "Guide" } th { "Version" } th { "FHIR" } th { "Description" }
                                }
                            }
                            tbody {
                                @for entry in entries {
                                    (entry_row(entry))
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
