//! Validators, grouped by the artifact they check.

pub mod model;
