//! Property validator.
//!
//! Validates property declarations:
//! - qualified names must be unique and equal `schema.name`
//! - a declared reverse should resolve, and point back: the reverse
//!   property's own reverse is this property's name and its range covers
//!   the declaring schema
//! - stub properties should declare a reverse

use std::collections::HashMap;

use ftm_model::{Model, Property};
use tracing::debug;

use crate::report::{ConformanceReport, Severity, TestResult};

const VALIDATOR: &str = "model/properties";

/// Validates property declarations in `model`.
pub fn validate(model: &Model) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let mut qnames: Vec<String> = Vec::new();
    let mut reverses: Vec<String> = Vec::new();
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for schema in model.schemata() {
        for prop in schema.own_properties() {
            let expected = format!("{}.{}", schema.name(), prop.name());
            if prop.qname() != expected {
                qnames.push(format!("Property {expected} has qualified name {}", prop.qname()));
            }
            if let Some(other) = seen.insert(prop.qname(), schema.name()) {
                qnames.push(format!(
                    "Qualified name {} declared by {other} and {schema}",
                    prop.qname()
                ));
            }
            if let Some(violation) = check_reverse(prop) {
                reverses.push(violation);
            }
        }
    }

    report.push(TestResult::from_violations(
        VALIDATOR,
        "Qualified property names are unique and consistent",
        "Qualified property name violations",
        Severity::Failure,
        qnames,
    ));
    report.push(TestResult::from_violations(
        VALIDATOR,
        "All reverse properties resolve and pair up",
        "Reverse properties that dangle or do not pair up",
        Severity::Warning,
        reverses,
    ));

    debug!(results = report.results.len(), "property validation done");
    report
}

fn check_reverse(prop: Property<'_>) -> Option<String> {
    let Some(reverse_name) = prop.reverse_name() else {
        return prop
            .stub()
            .then(|| format!("Stub property {prop} declares no reverse"));
    };
    // Unknown ranges are reported by the reference validator.
    let range = prop.range().ok()?;
    if range.is_none() {
        return Some(format!("Property {prop} declares reverse {reverse_name} without a range"));
    }
    let reverse = match prop.reverse() {
        Ok(Some(reverse)) => reverse,
        Ok(None) => {
            return Some(format!("Property {prop} has dangling reverse {reverse_name}"));
        }
        Err(_) => return None,
    };
    if reverse.reverse_name() != Some(prop.name()) {
        return Some(format!(
            "Property {prop} reverses to {reverse}, which reverses to {}",
            reverse.reverse_name().unwrap_or("nothing")
        ));
    }
    let covers = match reverse.range() {
        Ok(Some(back)) => prop.schema().is_a(back),
        _ => false,
    };
    if !covers {
        return Some(format!(
            "Property {prop} reverses to {reverse}, whose range {} does not cover {}",
            reverse.range_name().unwrap_or("nothing"),
            prop.schema()
        ));
    }
    None
}
