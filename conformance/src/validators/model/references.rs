//! Reference validator.
//!
//! Validates that every name a definition set mentions resolves:
//! - `extends` and `schemata` entries must be known schemata
//! - every schema must list itself in `schemata`
//! - declared property ranges must be known schemata
//! - `featured`, `caption`, `required` and edge property names should
//!   resolve to a property visible on the schema

use ftm_model::{Model, Schema};
use tracing::debug;

use crate::report::{ConformanceReport, Severity, TestResult};

const VALIDATOR: &str = "model/references";

/// Validates schema and property references in `model`.
pub fn validate(model: &Model) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let mut schema_refs: Vec<String> = Vec::new();
    let mut range_refs: Vec<String> = Vec::new();
    let mut name_refs: Vec<String> = Vec::new();

    for schema in model.schemata() {
        for parent in schema.extends_names() {
            if model.get_schema(parent).is_err() {
                schema_refs.push(format!("Schema {schema} extends unknown schema {parent}"));
            }
        }
        for ancestor in schema.schemata_names() {
            if model.get_schema(ancestor).is_err() {
                schema_refs.push(format!("Schema {schema} lists unknown schema {ancestor}"));
            }
        }
        if !schema.schemata_names().iter().any(|s| s == schema.name()) {
            schema_refs.push(format!("Schema {schema} does not list itself in schemata"));
        }

        for prop in schema.own_properties() {
            if let Some(range) = prop.range_name() {
                if model.get_schema(range).is_err() {
                    range_refs.push(format!("Property {prop} has unknown range: {range}"));
                }
            }
        }

        check_property_names(schema, &mut name_refs);
    }

    report.push(TestResult::from_violations(
        VALIDATOR,
        "All extends and schemata entries resolve",
        "Unresolvable schema references detected",
        Severity::Failure,
        schema_refs,
    ));
    report.push(TestResult::from_violations(
        VALIDATOR,
        "All property ranges resolve",
        "Unresolvable property ranges detected",
        Severity::Failure,
        range_refs,
    ));
    report.push(TestResult::from_violations(
        VALIDATOR,
        "All featured, caption, required and edge names resolve",
        "Property names that do not resolve on their schema",
        Severity::Warning,
        name_refs,
    ));

    debug!(results = report.results.len(), "reference validation done");
    report
}

/// Checks the name lists that are silently filtered at query time.
fn check_property_names(schema: Schema<'_>, violations: &mut Vec<String>) {
    // Unresolvable inheritance is reported by the inheritance validator.
    let Ok(properties) = schema.properties(false) else {
        return;
    };
    let edge_ends;
    let mut lists: Vec<(&str, &[String])> = vec![
        ("featured", schema.featured()),
        ("caption", schema.caption()),
        ("required", schema.required()),
    ];
    if let Some(edge) = schema.edge() {
        edge_ends = [edge.source.clone(), edge.target.clone()];
        lists.push(("edge", &edge_ends[..]));
        lists.push(("edge caption", edge.caption.as_slice()));
        if let Some(required) = &edge.required {
            lists.push(("edge required", required.as_slice()));
        }
    }
    for (list, names) in lists {
        for name in names {
            if !properties.contains_key(name.as_str()) {
                violations.push(format!(
                    "Schema {schema} {list} names unknown property {name}"
                ));
            }
        }
    }
}
