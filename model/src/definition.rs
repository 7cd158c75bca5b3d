//! Declarative definition set the [`Model`](crate::Model) is built from.
//!
//! These types mirror the JSON shape of existing schema data field for
//! field, so definition files produced elsewhere load unchanged:
//!
//! ```json
//! {
//!   "schemata": {
//!     "Person": {
//!       "label": "Person",
//!       "extends": ["LegalEntity"],
//!       "schemata": ["Thing", "LegalEntity", "Person"],
//!       "properties": { "nationality": { "type": "country" } }
//!     }
//!   },
//!   "types": { "country": { "label": "Country" } }
//! }
//! ```
//!
//! Every field except the maps' keys is optional on input. Defaults are
//! applied when the model is built, not here, so a definition can be
//! exported back without gaining fields it never had.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// The complete definition set: schemata and property types keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Schema definitions in registration order.
    #[serde(default)]
    pub schemata: IndexMap<String, SchemaDefinition>,
    /// Property type definitions, the recognised type vocabulary.
    #[serde(default)]
    pub types: IndexMap<String, TypeDefinition>,
}

/// Definition of one schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    /// Human-readable label; defaults to the schema name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Plural label; defaults to the label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Every schema this one "is", itself included.
    #[serde(default)]
    pub schemata: Vec<String>,
    /// Names of the direct parent schemata.
    #[serde(default)]
    pub extends: Vec<String>,
    /// Abstract schemata cannot be instantiated.
    #[serde(default, skip_serializing_if = "is_false")]
    pub r#abstract: bool,
    /// Hidden from user-facing listings.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Entities of this schema take part in matching.
    #[serde(default, skip_serializing_if = "is_false")]
    pub matchable: bool,
    /// Entities of this schema are generated rather than sourced.
    #[serde(default, skip_serializing_if = "is_false")]
    pub generated: bool,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Present when the schema describes a relationship between entities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<EdgeDefinition>,
    /// Property names shown prominently.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub featured: Vec<String>,
    /// Property names used to build an entity caption.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caption: Vec<String>,
    /// Property names an entity must carry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Directly declared properties, keyed by short name.
    #[serde(default)]
    pub properties: IndexMap<String, PropertyDefinition>,
}

/// Edge semantics of a relationship schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeDefinition {
    /// Property holding the edge's source entity.
    pub source: String,
    /// Property holding the edge's target entity.
    pub target: String,
    /// Whether the relationship has a direction.
    #[serde(default)]
    pub directed: bool,
    /// Label used when rendering the edge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Property names used to caption the edge.
    #[serde(default)]
    pub caption: Vec<String>,
    /// Property names an edge must carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
}

/// Definition of one property declared on a schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Short name; defaults to the key in the owning `properties` map.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Qualified name; defaults to `schema.name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qname: Option<String>,
    /// Human-readable label; defaults to the short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Name of the property type.
    #[serde(rename = "type")]
    pub type_: String,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stub properties exist only as the reverse side of another property.
    #[serde(default, skip_serializing_if = "is_false")]
    pub stub: bool,
    /// Hidden from user-facing listings.
    #[serde(default, skip_serializing_if = "is_false")]
    pub hidden: bool,
    /// Values of this property take part in matching.
    #[serde(default, skip_serializing_if = "is_false")]
    pub matchable: bool,
    /// Schema that values of this property must conform to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    /// Name of the inverse property on the range schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse: Option<String>,
}

/// Definition of one property type.
///
/// The engine treats types as opaque; these fields are carried through for
/// callers that render or group values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Human-readable label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Plural label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Free-text description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Group name used when indexing values of this type together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Values of this type take part in matching.
    #[serde(default, skip_serializing_if = "is_false")]
    pub matchable: bool,
    /// Values of this type are useful pivots between entities.
    #[serde(default, skip_serializing_if = "is_false")]
    pub pivot: bool,
    /// Maximum value length.
    #[serde(
        rename = "maxLength",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub max_length: Option<u64>,
}
