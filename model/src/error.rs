//! Error type for model construction and structural lookups.
//!
//! Only hard failures live here. Lookups whose miss is an expected outcome
//! (`Schema::property`, `Property::reverse`, `Schema::is_a`) return
//! `Option`/`bool` instead and never produce a [`ModelError`].

use std::path::PathBuf;

use thiserror::Error;

/// Hard failures raised by the ontology engine.
#[derive(Error, Debug)]
pub enum ModelError {
    /// A schema name could not be resolved against the model.
    #[error("schema not found: {name}")]
    UnknownSchema {
        /// The name that was looked up.
        name: String,
    },

    /// A property type name is not part of the model's type vocabulary.
    #[error("property type not found: {name}")]
    UnknownType {
        /// The name that was looked up.
        name: String,
    },

    /// Walking `extends` revisited a schema already on the current path.
    #[error("cyclic inheritance on schema {schema}: {}", .cycle.join(" -> "))]
    CyclicInheritance {
        /// The schema that is its own ancestor.
        schema: String,
        /// The inheritance path, ending with the repeated schema name.
        cycle: Vec<String>,
    },

    /// The definition set is not valid JSON or does not match its shape.
    #[error("invalid model definition: {0}")]
    Json(#[from] serde_json::Error),

    /// The definition file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path of the definition file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ModelError {
    pub(crate) fn unknown_schema(name: impl Into<String>) -> Self {
        Self::UnknownSchema { name: name.into() }
    }

    pub(crate) fn unknown_type(name: impl Into<String>) -> Self {
        Self::UnknownType { name: name.into() }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ModelError>;
