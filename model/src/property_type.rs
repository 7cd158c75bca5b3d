//! Property type descriptors and the registry that hands them out.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::definition::TypeDefinition;
use crate::error::{ModelError, Result};

/// A property type such as `string`, `date` or `entity`.
///
/// One descriptor exists per type name; every property of that type holds
/// the same [`Arc`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyType {
    /// Type name, the registry key.
    pub name: String,
    /// Human-readable label; defaults to the name.
    pub label: String,
    /// Plural label; defaults to the label.
    pub plural: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Group name used when indexing values of this type together.
    pub group: Option<String>,
    /// Values of this type take part in matching.
    pub matchable: bool,
    /// Values of this type are useful pivots between entities.
    pub pivot: bool,
    /// Maximum value length.
    pub max_length: Option<u64>,
}

impl PropertyType {
    fn new(name: &str, def: &TypeDefinition) -> Self {
        let label = non_empty(def.label.as_deref()).unwrap_or(name).to_owned();
        let plural = non_empty(def.plural.as_deref())
            .map_or_else(|| label.clone(), str::to_owned);
        Self {
            name: name.to_owned(),
            label,
            plural,
            description: def.description.clone(),
            group: def.group.clone(),
            matchable: def.matchable,
            pivot: def.pivot,
            max_length: def.max_length,
        }
    }

    /// Returns the definition this descriptor was built from.
    #[must_use]
    pub fn to_definition(&self) -> TypeDefinition {
        TypeDefinition {
            label: Some(self.label.clone()),
            plural: Some(self.plural.clone()),
            description: self.description.clone(),
            group: self.group.clone(),
            matchable: self.matchable,
            pivot: self.pivot,
            max_length: self.max_length,
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The recognised type vocabulary, keyed by type name.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: IndexMap<String, Arc<PropertyType>>,
}

impl TypeRegistry {
    /// Builds one descriptor per entry of the type definitions.
    #[must_use]
    pub fn new(definitions: &IndexMap<String, TypeDefinition>) -> Self {
        let types = definitions
            .iter()
            .map(|(name, def)| (name.clone(), Arc::new(PropertyType::new(name, def))))
            .collect();
        Self { types }
    }

    /// Returns the shared descriptor for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownType`] if `name` is not in the vocabulary.
    pub fn get(&self, name: &str) -> Result<Arc<PropertyType>> {
        self.types
            .get(name)
            .cloned()
            .ok_or_else(|| ModelError::unknown_type(name))
    }

    /// Iterates descriptors in definition order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PropertyType>> {
        self.types.values()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns true if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TypeRegistry {
        let mut defs = IndexMap::new();
        defs.insert("string".to_owned(), TypeDefinition::default());
        defs.insert(
            "date".to_owned(),
            TypeDefinition {
                label: Some("Date".to_owned()),
                plural: Some("Dates".to_owned()),
                matchable: true,
                ..TypeDefinition::default()
            },
        );
        TypeRegistry::new(&defs)
    }

    #[test]
    fn same_descriptor_is_shared() {
        let types = registry();
        let a = types.get("date").expect("date is registered");
        let b = types.get("date").expect("date is registered");
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.plural, "Dates");
        assert!(a.matchable);
    }

    #[test]
    fn labels_default_to_name() {
        let types = registry();
        let string = types.get("string").expect("string is registered");
        assert_eq!(string.label, "string");
        assert_eq!(string.plural, "string");
    }

    #[test]
    fn unknown_type_is_a_hard_failure() {
        let types = registry();
        assert!(matches!(
            types.get("money"),
            Err(ModelError::UnknownType { name }) if name == "money"
        ));
    }

    #[test]
    fn registry_keeps_definition_order() {
        let types = registry();
        assert!(!types.is_empty());
        assert_eq!(types.len(), 2);
        let names: Vec<_> = types.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["string", "date"]);
        assert!(TypeRegistry::default().is_empty());
    }
}
