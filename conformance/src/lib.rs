//! Definition-set conformance suite.
//!
//! The engine in `ftm-model` loads definition sets permissively: dangling
//! names only fail when a query reaches them, and a supplied ancestor list
//! is trusted even if it disagrees with `extends`. This crate walks a loaded
//! model once and reports every such problem up front.
//!
//! # Conformance Scope
//!
//! | Validator | Checks |
//! |-----------|--------|
//! | `model/references` | `extends`, `schemata`, ranges, featured/caption/required and edge names |
//! | `model/inheritance` | cycles, ancestor lists vs. `extends` closure |
//! | `model/properties` | qualified names, reverse pairing, stubs |
//!
//! # Entry Point
//!
//! ```no_run
//! use ftm_conformance::{load_model, run_all};
//!
//! let model = load_model("model.json").expect("Failed to load model");
//! let report = run_all(&model);
//! assert!(report.all_passed());
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod report;
pub mod validators;

use std::path::Path;

use anyhow::{Context, Result};
use ftm_model::Model;

pub use report::{ConformanceReport, Severity, TestResult};

/// Loads a JSON definition set from `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid definition
/// set, or names an unknown property type.
pub fn load_model(path: impl AsRef<Path>) -> Result<Model> {
    let path = path.as_ref();
    Model::from_path(path).with_context(|| format!("Failed to load model from {}", path.display()))
}

/// Runs all conformance validators and returns the aggregated report.
///
/// Validators are run in this order:
/// 1. References (schema names, ranges, property name lists)
/// 2. Inheritance (cycles, ancestor lists)
/// 3. Properties (qualified names, reverse pairing)
pub fn run_all(model: &Model) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    report.extend(validators::model::references::validate(model));
    report.extend(validators::model::inheritance::validate(model));
    report.extend(validators::model::properties::validate(model));

    report
}
