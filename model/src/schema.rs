//! Schemata: the nodes of the type graph.
//!
//! A schema owns only its directly declared properties. Everything that
//! involves another schema (parents, children, inherited properties) is
//! computed on each call by resolving names through the owning [`Model`],
//! so the definition set may list schemata in any order.
//!
//! Two ancestry paths exist side by side:
//!
//! - [`Schema::is_a`] trusts the supplied `schemata` list and is a plain
//!   membership test.
//! - [`Schema::parents`] and [`Schema::children`] walk `extends`.
//!
//! In a well-formed definition set both agree. Debug builds log a warning
//! for each schema where they don't, once, when the model is built.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;

use crate::definition::{EdgeDefinition, SchemaDefinition};
use crate::error::{ModelError, Result};
use crate::property::{Property, PropertyData, PropertyRef};
use crate::property_type::{non_empty, TypeRegistry};
use crate::Model;

type PropertyMap<'m> = IndexMap<&'m str, Property<'m>>;

/// Owned schema data, stored in the [`Model`].
#[derive(Debug)]
pub(crate) struct SchemaData {
    pub(crate) name: String,
    pub(crate) label: String,
    pub(crate) plural: String,
    pub(crate) r#abstract: bool,
    pub(crate) hidden: bool,
    pub(crate) matchable: bool,
    pub(crate) generated: bool,
    pub(crate) description: Option<String>,
    pub(crate) extends: Vec<String>,
    pub(crate) schemata: Vec<String>,
    pub(crate) edge: Option<EdgeDefinition>,
    pub(crate) featured: Vec<String>,
    pub(crate) caption: Vec<String>,
    pub(crate) required: Vec<String>,
    pub(crate) properties: IndexMap<String, PropertyData>,
}

impl SchemaData {
    /// Applies defaults and builds the directly declared properties.
    pub(crate) fn new(name: &str, def: &SchemaDefinition, types: &TypeRegistry) -> Result<Self> {
        let label = non_empty(def.label.as_deref()).unwrap_or(name).to_owned();
        let plural = non_empty(def.plural.as_deref())
            .map_or_else(|| label.clone(), str::to_owned);
        let properties = def
            .properties
            .iter()
            .map(|(key, prop)| Ok((key.clone(), PropertyData::new(name, key, prop, types)?)))
            .collect::<Result<IndexMap<_, _>>>()?;
        Ok(Self {
            name: name.to_owned(),
            label,
            plural,
            r#abstract: def.r#abstract,
            hidden: def.hidden,
            matchable: def.matchable,
            generated: def.generated,
            description: non_empty(def.description.as_deref()).map(str::to_owned),
            extends: def.extends.clone(),
            schemata: def.schemata.clone(),
            edge: def.edge.clone(),
            featured: def.featured.clone(),
            caption: def.caption.clone(),
            required: def.required.clone(),
            properties,
        })
    }
}

/// A schema in a [`Model`].
///
/// `Schema` is a cheap, copyable view; the model owns the data. Equality is
/// identity: two values are equal when they view the same registration.
#[derive(Clone, Copy)]
pub struct Schema<'m> {
    model: &'m Model,
    data: &'m SchemaData,
}

impl<'m> Schema<'m> {
    /// Name of the root schema every entity type descends from.
    pub const THING: &'static str = "Thing";

    pub(crate) fn new(model: &'m Model, data: &'m SchemaData) -> Self {
        Self { model, data }
    }

    /// The model this schema belongs to.
    #[must_use]
    pub fn model(&self) -> &'m Model {
        self.model
    }

    /// Unique schema name.
    #[must_use]
    pub fn name(&self) -> &'m str {
        &self.data.name
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'m str {
        &self.data.label
    }

    /// Plural label.
    #[must_use]
    pub fn plural(&self) -> &'m str {
        &self.data.plural
    }

    /// Abstract schemata cannot be instantiated.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        self.data.r#abstract
    }

    /// Hidden from user-facing listings.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.data.hidden
    }

    /// Entities of this schema take part in matching.
    #[must_use]
    pub fn matchable(&self) -> bool {
        self.data.matchable
    }

    /// Entities of this schema are generated rather than sourced.
    #[must_use]
    pub fn generated(&self) -> bool {
        self.data.generated
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&'m str> {
        self.data.description.as_deref()
    }

    /// Names of the direct parents, as declared.
    #[must_use]
    pub fn extends_names(&self) -> &'m [String] {
        &self.data.extends
    }

    /// The supplied ancestor-closure list, this schema included.
    #[must_use]
    pub fn schemata_names(&self) -> &'m [String] {
        &self.data.schemata
    }

    /// Featured property names, as declared.
    #[must_use]
    pub fn featured(&self) -> &'m [String] {
        &self.data.featured
    }

    /// Caption property names, as declared.
    #[must_use]
    pub fn caption(&self) -> &'m [String] {
        &self.data.caption
    }

    /// Required property names, as declared.
    #[must_use]
    pub fn required(&self) -> &'m [String] {
        &self.data.required
    }

    /// Returns true if this schema describes a relationship.
    #[must_use]
    pub fn is_edge(&self) -> bool {
        self.data.edge.is_some()
    }

    /// Edge semantics, present for relationship schemata.
    #[must_use]
    pub fn edge(&self) -> Option<&'m EdgeDefinition> {
        self.data.edge.as_ref()
    }

    /// Returns true if this schema's ancestor-closure list names `Thing`.
    ///
    /// A plain list test: the model need not register a `Thing` schema.
    #[must_use]
    pub fn is_thing(&self) -> bool {
        self.data.schemata.iter().any(|s| s == Self::THING)
    }

    /// Resolves the direct parents.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownSchema`] if a parent name is not in the
    /// model.
    pub fn extends(&self) -> Result<Vec<Schema<'m>>> {
        self.data
            .extends
            .iter()
            .map(|name| self.model.get_schema(name.as_str()))
            .collect()
    }

    /// All ancestors reachable through `extends`, without duplicates.
    ///
    /// Order is first discovery: each direct parent is followed by its own
    /// ancestors before the next direct parent is visited.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownSchema`] for an unresolvable parent and
    /// [`ModelError::CyclicInheritance`] if a schema is its own ancestor.
    pub fn parents(&self) -> Result<Vec<Schema<'m>>> {
        let mut path = Vec::new();
        let mut found = IndexMap::new();
        self.collect_parents(&mut path, &mut found)?;
        Ok(found.into_values().collect())
    }

    fn collect_parents(
        &self,
        path: &mut Vec<&'m str>,
        found: &mut IndexMap<&'m str, Schema<'m>>,
    ) -> Result<()> {
        path.push(self.name());
        for parent in self.extends()? {
            if path.contains(&parent.name()) {
                return Err(cycle_error(path, parent.name()));
            }
            if found.contains_key(parent.name()) {
                continue;
            }
            found.insert(parent.name(), parent);
            parent.collect_parents(path, found)?;
        }
        path.pop();
        Ok(())
    }

    /// Returns true if the supplied `schemata` list differs, as a set, from
    /// this schema plus `parents`.
    #[cfg(debug_assertions)]
    pub(crate) fn closure_diverges(&self, parents: &[Schema<'m>]) -> bool {
        let supplied = &self.data.schemata;
        let mut structural = parents.iter().map(Schema::name).chain([self.name()]);
        structural.any(|name| !supplied.iter().any(|s| s == name))
            || supplied
                .iter()
                .any(|s| s != self.name() && !parents.iter().any(|p| p.name() == s))
    }

    /// All schemata that have this one among their structural parents.
    ///
    /// Scans the whole model on every call.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::parents`] for any schema
    /// in the model.
    pub fn children(&self) -> Result<Vec<Schema<'m>>> {
        let mut children = Vec::new();
        for schema in self.model.schemata() {
            if schema.parents()?.contains(self) {
                children.push(schema);
            }
        }
        Ok(children)
    }

    /// The full property set: inherited and direct.
    ///
    /// Parents are merged in `extends` order, a later parent overwriting an
    /// earlier one on a name collision; direct properties are applied last
    /// and always win. With `qualified` the keys are qualified names, which
    /// keeps same-named properties from different declaring schemata apart.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownSchema`] for an unresolvable ancestor and
    /// [`ModelError::CyclicInheritance`] if a schema is its own ancestor.
    pub fn properties(&self, qualified: bool) -> Result<IndexMap<&'m str, Property<'m>>> {
        let mut path = Vec::new();
        let mut merged = HashMap::new();
        self.merge_properties(qualified, &mut path, &mut merged)
    }

    /// Merges the property set of this schema, reusing the sets already
    /// merged for ancestors shared by several inheritance paths.
    fn merge_properties(
        &self,
        qualified: bool,
        path: &mut Vec<&'m str>,
        merged: &mut HashMap<&'m str, PropertyMap<'m>>,
    ) -> Result<PropertyMap<'m>> {
        if let Some(done) = merged.get(self.name()) {
            return Ok(done.clone());
        }
        let mut out = IndexMap::new();
        path.push(self.name());
        for parent in self.extends()? {
            if path.contains(&parent.name()) {
                return Err(cycle_error(path, parent.name()));
            }
            out.extend(parent.merge_properties(qualified, path, merged)?);
        }
        path.pop();
        for data in self.data.properties.values() {
            let prop = Property::new(*self, data);
            let key = if qualified { prop.qname() } else { prop.name() };
            out.insert(key, prop);
        }
        merged.insert(self.name(), out.clone());
        Ok(out)
    }

    /// Directly declared properties only, in declaration order.
    pub fn own_properties(&self) -> impl Iterator<Item = Property<'m>> + 'm {
        let schema = *self;
        schema
            .data
            .properties
            .values()
            .map(move |data| Property::new(schema, data))
    }

    /// Resolves the `featured` names, skipping names that do not resolve.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::properties`].
    pub fn featured_properties(&self) -> Result<Vec<Property<'m>>> {
        self.resolve_names(&self.data.featured)
    }

    /// Resolves the `caption` names, skipping names that do not resolve.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::properties`].
    pub fn caption_properties(&self) -> Result<Vec<Property<'m>>> {
        self.resolve_names(&self.data.caption)
    }

    /// Resolves the `required` names, skipping names that do not resolve.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::properties`].
    pub fn required_properties(&self) -> Result<Vec<Property<'m>>> {
        self.resolve_names(&self.data.required)
    }

    fn resolve_names(&self, names: &[String]) -> Result<Vec<Property<'m>>> {
        let properties = self.properties(false)?;
        Ok(names
            .iter()
            .filter_map(|name| properties.get(name.as_str()).copied())
            .collect())
    }

    /// Resolves the edge's source property.
    ///
    /// Returns `None` for non-edge schemata or an unknown property name.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::properties`].
    pub fn edge_source(&self) -> Result<Option<Property<'m>>> {
        match &self.data.edge {
            Some(edge) => self.property(edge.source.as_str()),
            None => Ok(None),
        }
    }

    /// Resolves the edge's target property.
    ///
    /// Returns `None` for non-edge schemata or an unknown property name.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::properties`].
    pub fn edge_target(&self) -> Result<Option<Property<'m>>> {
        match &self.data.edge {
            Some(edge) => self.property(edge.target.as_str()),
            None => Ok(None),
        }
    }

    /// Resolves the edge's caption names; empty for non-edge schemata.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::properties`].
    pub fn edge_caption(&self) -> Result<Vec<Property<'m>>> {
        match &self.data.edge {
            Some(edge) => self.resolve_names(&edge.caption),
            None => Ok(Vec::new()),
        }
    }

    /// Returns true if this schema has the property, directly or inherited.
    ///
    /// A resolved property is matched by qualified name, so a same-named
    /// property from an unrelated schema is not a match. A name is matched
    /// by short name.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::properties`].
    pub fn has_property<'a>(&self, prop: impl Into<PropertyRef<'a, 'm>>) -> Result<bool> {
        Ok(match prop.into() {
            PropertyRef::Property(prop) => self.properties(true)?.contains_key(prop.qname()),
            PropertyRef::Name(name) => self.properties(false)?.contains_key(name),
        })
    }

    /// Looks a property up by short name; a resolved property is returned
    /// as is.
    ///
    /// Returns `None` if no property by that name exists.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::properties`].
    pub fn property<'a>(
        &self,
        prop: impl Into<PropertyRef<'a, 'm>>,
    ) -> Result<Option<Property<'m>>> {
        match prop.into() {
            PropertyRef::Property(prop) => Ok(Some(prop)),
            PropertyRef::Name(name) => Ok(self.properties(false)?.get(name).copied()),
        }
    }

    /// Returns true if `schema` is in this schema's ancestor-closure list.
    ///
    /// Never fails: a reference the model cannot resolve yields `false`.
    #[must_use]
    pub fn is_a<'a>(&self, schema: impl Into<SchemaRef<'a, 'm>>) -> bool {
        match self.model.get_schema(schema) {
            Ok(schema) => self.data.schemata.iter().any(|s| s == schema.name()),
            Err(_) => false,
        }
    }

    /// Returns true if [`Schema::is_a`] holds for any of `schemata`.
    #[must_use]
    pub fn is_any<'a, I>(&self, schemata: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<SchemaRef<'a, 'm>>,
    {
        schemata.into_iter().any(|schema| self.is_a(schema))
    }

    /// Returns true if `item` holds a schema.
    #[must_use]
    pub fn is_schema(item: Option<&Schema<'_>>) -> bool {
        item.is_some()
    }

    /// The given schemata followed by every structural parent of any of
    /// them, each schema listed once.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Schema::parents`].
    pub fn all_parents(schemata: &[Schema<'m>]) -> Result<Vec<Schema<'m>>> {
        let mut all = schemata.to_vec();
        for schema in schemata {
            for parent in schema.parents()? {
                if !all.contains(&parent) {
                    all.push(parent);
                }
            }
        }
        Ok(all)
    }

    /// Returns the definition this schema was built from, with defaults
    /// filled in.
    #[must_use]
    pub fn to_definition(&self) -> SchemaDefinition {
        let data = self.data;
        SchemaDefinition {
            label: Some(data.label.clone()),
            plural: Some(data.plural.clone()),
            schemata: data.schemata.clone(),
            extends: data.extends.clone(),
            r#abstract: data.r#abstract,
            hidden: data.hidden,
            matchable: data.matchable,
            generated: data.generated,
            description: data.description.clone(),
            edge: data.edge.clone(),
            featured: data.featured.clone(),
            caption: data.caption.clone(),
            required: data.required.clone(),
            properties: self
                .own_properties()
                .map(|prop| (prop.name().to_owned(), prop.to_definition()))
                .collect(),
        }
    }
}

fn cycle_error(path: &[&str], repeated: &str) -> ModelError {
    let start = path.iter().position(|name| *name == repeated).unwrap_or(0);
    let mut cycle: Vec<String> = path[start..].iter().map(|name| (*name).to_owned()).collect();
    cycle.push(repeated.to_owned());
    ModelError::CyclicInheritance {
        schema: repeated.to_owned(),
        cycle,
    }
}

impl PartialEq for Schema<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.data, other.data)
    }
}

impl Eq for Schema<'_> {}

impl fmt::Debug for Schema<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.data.name)
            .field("extends", &self.data.extends)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Schema<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.name)
    }
}

/// Either a schema name or an already resolved [`Schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaRef<'a, 'm> {
    /// A schema name.
    Name(&'a str),
    /// A resolved schema.
    Schema(Schema<'m>),
}

impl<'a> From<&'a str> for SchemaRef<'a, '_> {
    fn from(name: &'a str) -> Self {
        SchemaRef::Name(name)
    }
}

impl<'a> From<&'a String> for SchemaRef<'a, '_> {
    fn from(name: &'a String) -> Self {
        SchemaRef::Name(name)
    }
}

impl<'m> From<Schema<'m>> for SchemaRef<'_, 'm> {
    fn from(schema: Schema<'m>) -> Self {
        SchemaRef::Schema(schema)
    }
}

impl<'m> From<&Schema<'m>> for SchemaRef<'_, 'm> {
    fn from(schema: &Schema<'m>) -> Self {
        SchemaRef::Schema(*schema)
    }
}
