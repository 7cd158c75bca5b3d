//! The [`Model`]: owner of every schema and property type.
//!
//! Schemata never hold on to each other. They store names and resolve them
//! through the model on demand, which is why the model is the only place a
//! schema name turns into a [`Schema`].

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::definition::ModelDefinition;
use crate::error::{ModelError, Result};
use crate::property::Property;
use crate::property_type::{PropertyType, TypeRegistry};
use crate::schema::{Schema, SchemaData, SchemaRef};

/// A loaded definition set. Immutable once built.
#[derive(Debug, Default)]
pub struct Model {
    schemata: IndexMap<String, SchemaData>,
    types: TypeRegistry,
}

impl Model {
    /// Builds a model from a definition set.
    ///
    /// Only direct properties are built here. Parent, range and reverse
    /// names are kept as written and resolved when queried.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownType`] if a property names a type that is
    /// not in `definition.types`.
    pub fn new(definition: &ModelDefinition) -> Result<Self> {
        let types = TypeRegistry::new(&definition.types);
        let schemata = definition
            .schemata
            .iter()
            .map(|(name, def)| Ok((name.clone(), SchemaData::new(name, def, &types)?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        debug!(schemata = schemata.len(), types = types.len(), "built model");
        let model = Self { schemata, types };
        #[cfg(debug_assertions)]
        model.check_closures();
        Ok(model)
    }

    #[cfg(debug_assertions)]
    fn check_closures(&self) {
        for schema in self.schemata() {
            // Unresolvable inheritance fails on the query that reaches it.
            let Ok(parents) = schema.parents() else {
                continue;
            };
            if schema.closure_diverges(&parents) {
                tracing::warn!(
                    schema = schema.name(),
                    supplied = ?schema.schemata_names(),
                    structural = ?parents.iter().map(Schema::name).collect::<Vec<_>>(),
                    "ancestor list disagrees with extends closure"
                );
            }
        }
    }

    /// Parses a JSON definition set and builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] for malformed input and the errors of
    /// [`Model::new`].
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: ModelDefinition = serde_json::from_str(json)?;
        Self::new(&definition)
    }

    /// Reads a JSON definition set and builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] for malformed input and the errors of
    /// [`Model::new`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let definition: ModelDefinition = serde_json::from_reader(reader)?;
        Self::new(&definition)
    }

    /// Loads a JSON definition file and builds the model.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] if the file cannot be opened, plus the
    /// errors of [`Model::from_reader`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading model definition");
        let file = File::open(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Resolves a schema reference. A resolved schema is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownSchema`] with the attempted name if the
    /// model has no such schema.
    pub fn get_schema<'m, 'a>(
        &'m self,
        schema: impl Into<SchemaRef<'a, 'm>>,
    ) -> Result<Schema<'m>> {
        match schema.into() {
            SchemaRef::Schema(schema) => Ok(schema),
            SchemaRef::Name(name) => self
                .schemata
                .get(name)
                .map(|data| Schema::new(self, data))
                .ok_or_else(|| ModelError::unknown_schema(name)),
        }
    }

    /// Returns the shared descriptor of a property type.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownType`] if the type is not registered.
    pub fn get_type(&self, name: &str) -> Result<Arc<PropertyType>> {
        self.types.get(name)
    }

    /// All schemata in registration order.
    pub fn schemata(&self) -> impl ExactSizeIterator<Item = Schema<'_>> + '_ {
        self.schemata.values().map(move |data| Schema::new(self, data))
    }

    /// All property types in definition order.
    pub fn types(&self) -> impl Iterator<Item = &Arc<PropertyType>> {
        self.types.iter()
    }

    /// Number of registered schemata.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemata.len()
    }

    /// Returns true if no schemata are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemata.is_empty()
    }

    /// Looks a property up by qualified name, e.g. `Person.nationality`.
    ///
    /// The schema part must exist. Qualified names carry the declaring
    /// schema, so `Person.name` is `None` when `name` is declared on
    /// `Thing`. Also `None` if `qname` has no schema part.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownSchema`] for an unknown schema part and
    /// propagates the hard failures of [`Schema::properties`].
    pub fn find_property(&self, qname: &str) -> Result<Option<Property<'_>>> {
        let Some((schema, _)) = qname.split_once('.') else {
            return Ok(None);
        };
        let schema = self.get_schema(schema)?;
        Ok(schema.properties(true)?.get(qname).copied())
    }

    /// Exports the model back to a definition set, defaults filled in.
    #[must_use]
    pub fn to_definition(&self) -> ModelDefinition {
        ModelDefinition {
            schemata: self
                .schemata()
                .map(|schema| (schema.name().to_owned(), schema.to_definition()))
                .collect(),
            types: self
                .types()
                .map(|t| (t.name.clone(), t.to_definition()))
                .collect(),
        }
    }
}
