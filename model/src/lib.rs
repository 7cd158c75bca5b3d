//! Entity-type ontology engine.
//!
//! The `ftm-model` crate loads a declarative definition set of schemata and
//! property types and answers structural questions about it: which schemata
//! a schema descends from, which properties it carries once multiple
//! inheritance is resolved, and where a property's range and reverse point.
//!
//! # Entry Point
//!
//! ```
//! let model = ftm_model::Model::from_json(r#"{
//!     "schemata": {
//!         "Thing": {"extends": [], "schemata": ["Thing"],
//!                   "properties": {"name": {"type": "name"}}},
//!         "Person": {"extends": ["Thing"], "schemata": ["Thing", "Person"],
//!                    "properties": {}}
//!     },
//!     "types": {"name": {}}
//! }"#)?;
//!
//! let person = model.get_schema("Person")?;
//! assert!(person.is_a("Thing"));
//! assert!(person.has_property("name")?);
//! # Ok::<(), ftm_model::ModelError>(())
//! ```
//!
//! # Failure policy
//!
//! Lookups the caller explicitly asks for fail hard with a [`ModelError`]:
//! an unknown schema or type name, an unresolvable parent, a declared range
//! that does not exist, or an inheritance cycle. Lookups whose miss is a
//! normal outcome are soft: [`Schema::property`] and [`Property::reverse`]
//! return `None`, [`Schema::is_a`] returns `false`.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod definition;
pub mod error;
pub mod model;
pub mod property;
pub mod property_type;
pub mod schema;

pub use definition::{
    EdgeDefinition, ModelDefinition, PropertyDefinition, SchemaDefinition, TypeDefinition,
};
pub use error::{ModelError, Result};
pub use model::Model;
pub use property::{Property, PropertyRef};
pub use property_type::{PropertyType, TypeRegistry};
pub use schema::{Schema, SchemaRef};
