//! Inheritance validator.
//!
//! Validates the `extends` graph against the supplied ancestor lists:
//! - no schema may be its own ancestor
//! - each schema's `schemata` list should equal itself plus the structural
//!   parent closure; a mismatch is reported, never corrected

use std::collections::BTreeSet;

use ftm_model::{Model, ModelError};
use tracing::debug;

use crate::report::{ConformanceReport, Severity, TestResult};

const VALIDATOR: &str = "model/inheritance";

/// Validates inheritance structure of `model`.
pub fn validate(model: &Model) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let mut cycles: BTreeSet<String> = BTreeSet::new();
    let mut divergent: Vec<String> = Vec::new();

    for schema in model.schemata() {
        let parents = match schema.parents() {
            Ok(parents) => parents,
            Err(ModelError::CyclicInheritance { cycle, .. }) => {
                cycles.insert(canonical_cycle(&cycle));
                continue;
            }
            // Unknown parents are reported by the reference validator.
            Err(_) => continue,
        };

        let structural: BTreeSet<&str> = parents
            .iter()
            .map(|p| p.name())
            .chain([schema.name()])
            .collect();
        let supplied: BTreeSet<&str> = schema.schemata_names().iter().map(String::as_str).collect();
        if structural != supplied {
            let missing: Vec<_> = structural.difference(&supplied).copied().collect();
            let extra: Vec<_> = supplied.difference(&structural).copied().collect();
            divergent.push(format!(
                "Schema {schema}: schemata lacks [{}], has extra [{}]",
                missing.join(", "),
                extra.join(", ")
            ));
        }
    }

    report.push(TestResult::from_violations(
        VALIDATOR,
        "No inheritance cycles",
        "Inheritance cycles detected",
        Severity::Failure,
        cycles.into_iter().collect(),
    ));
    report.push(TestResult::from_violations(
        VALIDATOR,
        "Ancestor lists match the extends closure",
        "Ancestor lists disagree with the extends closure",
        Severity::Warning,
        divergent,
    ));

    debug!(results = report.results.len(), "inheritance validation done");
    report
}

/// Renders a cycle starting at its smallest name so each cycle is reported
/// once, whichever member's traversal found it.
fn canonical_cycle(cycle: &[String]) -> String {
    // The last entry repeats the first.
    let ring = &cycle[..cycle.len().saturating_sub(1)];
    let start = ring
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map_or(0, |(i, _)| i);
    let mut names: Vec<&str> = ring[start..]
        .iter()
        .chain(&ring[..start])
        .map(String::as_str)
        .collect();
    if let Some(first) = names.first().copied() {
        names.push(first);
    }
    names.join(" -> ")
}
