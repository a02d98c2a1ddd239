//! Shared fixtures for the integration tests

#![allow(dead_code)]

use chrono::{FixedOffset, TimeZone};
use ig_registry::{Edition, FeedDate, Publication};

pub fn edition(sequence: &str, version: &str) -> Edition {
    Edition {
        name: sequence.to_string(),
        ig_version: version.to_string(),
        package: format!("hl7.fhir.example#{}", version),
        fhir_version: vec!["4.0.1".to_string(), "4.3.0".to_string()],
        url: format!("http://example.org/fhir/example/{}", version),
        description: format!("Release {}", version),
    }
}

pub fn publication(npm_name: &str, edition: Edition) -> Publication {
    Publication {
        name: "Example Guide".to_string(),
        category: "Core".to_string(),
        publisher: "HL7 International".to_string(),
        npm_name: npm_name.to_string(),
        description: "An example guide".to_string(),
        canonical: "http://example.org/fhir/example".to_string(),
        ci_build: "http://build.fhir.org/ig/example".to_string(),
        edition,
    }
}

pub fn date(day: u32, hour: u32) -> FeedDate {
    FixedOffset::east_opt(3600)
        .unwrap()
        .with_ymd_and_hms(2024, 3, day, hour, 0, 0)
        .unwrap()
}
