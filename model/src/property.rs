//! Properties: typed, named attributes declared on a schema.
//!
//! A [`Property`] is a borrowed view onto data owned by the [`Model`]. It
//! keeps its range and reverse as names and resolves them on request, so a
//! property can point at schemata that were registered after its own.

use std::fmt;
use std::sync::Arc;

use crate::definition::PropertyDefinition;
use crate::error::Result;
use crate::property_type::{non_empty, PropertyType, TypeRegistry};
use crate::schema::Schema;

/// Owned property data, stored inside its declaring schema.
#[derive(Debug)]
pub(crate) struct PropertyData {
    pub(crate) name: String,
    pub(crate) qname: String,
    pub(crate) label: String,
    pub(crate) type_: Arc<PropertyType>,
    pub(crate) hidden: bool,
    pub(crate) matchable: bool,
    pub(crate) description: Option<String>,
    pub(crate) stub: bool,
    pub(crate) range: Option<String>,
    pub(crate) reverse: Option<String>,
}

impl PropertyData {
    /// Applies defaults and resolves the property type.
    ///
    /// This is the only place a property touches the type registry; the
    /// type is the one reference resolved eagerly.
    pub(crate) fn new(
        schema: &str,
        key: &str,
        def: &PropertyDefinition,
        types: &TypeRegistry,
    ) -> Result<Self> {
        let name = non_empty(def.name.as_deref()).unwrap_or(key).to_owned();
        let qname = non_empty(def.qname.as_deref())
            .map_or_else(|| format!("{schema}.{name}"), str::to_owned);
        let label = non_empty(def.label.as_deref()).unwrap_or(&name).to_owned();
        Ok(Self {
            type_: types.get(&def.type_)?,
            qname,
            label,
            hidden: def.hidden,
            matchable: def.matchable,
            description: non_empty(def.description.as_deref()).map(str::to_owned),
            stub: def.stub,
            range: non_empty(def.range.as_deref()).map(str::to_owned),
            reverse: non_empty(def.reverse.as_deref()).map(str::to_owned),
            name,
        })
    }
}

/// A property declared on a schema.
///
/// Two `Property` values are equal when they view the same declaration.
#[derive(Clone, Copy)]
pub struct Property<'m> {
    schema: Schema<'m>,
    data: &'m PropertyData,
}

impl<'m> Property<'m> {
    pub(crate) fn new(schema: Schema<'m>, data: &'m PropertyData) -> Self {
        Self { schema, data }
    }

    /// The schema that declares this property.
    #[must_use]
    pub fn schema(&self) -> Schema<'m> {
        self.schema
    }

    /// Short name, unique within the declaring schema.
    #[must_use]
    pub fn name(&self) -> &'m str {
        &self.data.name
    }

    /// Qualified name, `schema.name`.
    #[must_use]
    pub fn qname(&self) -> &'m str {
        &self.data.qname
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(&self) -> &'m str {
        &self.data.label
    }

    /// The shared type descriptor.
    #[must_use]
    pub fn type_(&self) -> &'m Arc<PropertyType> {
        &self.data.type_
    }

    /// Hidden from user-facing listings.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.data.hidden
    }

    /// Values take part in matching.
    #[must_use]
    pub fn matchable(&self) -> bool {
        self.data.matchable
    }

    /// Stub properties exist only as the reverse side of another property.
    #[must_use]
    pub fn stub(&self) -> bool {
        self.data.stub
    }

    /// Free-text description.
    #[must_use]
    pub fn description(&self) -> Option<&'m str> {
        self.data.description.as_deref()
    }

    /// Declared range schema name, unresolved.
    #[must_use]
    pub fn range_name(&self) -> Option<&'m str> {
        self.data.range.as_deref()
    }

    /// Declared reverse property name, unresolved.
    #[must_use]
    pub fn reverse_name(&self) -> Option<&'m str> {
        self.data.reverse.as_deref()
    }

    /// Resolves the range schema.
    ///
    /// Returns `None` if no range is declared.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::UnknownSchema`](crate::ModelError::UnknownSchema)
    /// if a range is declared but the model has no such schema.
    pub fn range(&self) -> Result<Option<Schema<'m>>> {
        match self.range_name() {
            None => Ok(None),
            Some(name) => self.schema.model().get_schema(name).map(Some),
        }
    }

    /// Resolves the inverse property on the range schema.
    ///
    /// Returns `None` if no reverse or no range is declared, or if the range
    /// schema has no property by that name. A missing reverse is not an
    /// error; a missing range schema is.
    ///
    /// # Errors
    ///
    /// Propagates the hard failures of [`Property::range`] and of
    /// resolving the range schema's inherited properties.
    pub fn reverse(&self) -> Result<Option<Property<'m>>> {
        let Some(range) = self.range()? else {
            return Ok(None);
        };
        match self.reverse_name() {
            None => Ok(None),
            Some(name) => range.property(name),
        }
    }

    /// Returns true if `item` holds a resolved property rather than a name
    /// or nothing.
    #[must_use]
    pub fn is_property(item: Option<&PropertyRef<'_, '_>>) -> bool {
        matches!(item, Some(PropertyRef::Property(_)))
    }

    /// Returns the definition this property was built from, with defaults
    /// filled in.
    #[must_use]
    pub fn to_definition(&self) -> PropertyDefinition {
        PropertyDefinition {
            name: Some(self.data.name.clone()),
            qname: Some(self.data.qname.clone()),
            label: Some(self.data.label.clone()),
            type_: self.data.type_.name.clone(),
            description: self.data.description.clone(),
            stub: self.data.stub,
            hidden: self.data.hidden,
            matchable: self.data.matchable,
            range: self.data.range.clone(),
            reverse: self.data.reverse.clone(),
        }
    }
}

impl PartialEq for Property<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.data, other.data)
    }
}

impl Eq for Property<'_> {}

impl fmt::Debug for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("qname", &self.data.qname)
            .field("type", &self.data.type_.name)
            .field("range", &self.data.range)
            .field("reverse", &self.data.reverse)
            .finish()
    }
}

impl fmt::Display for Property<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.qname)
    }
}

/// Either a property name or an already resolved [`Property`].
///
/// Accepted by schema lookups so callers can pass whichever they hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyRef<'a, 'm> {
    /// A short property name.
    Name(&'a str),
    /// A resolved property.
    Property(Property<'m>),
}

impl<'a, 'm> PropertyRef<'a, 'm> {
    /// The resolved property, if this is one.
    #[must_use]
    pub fn as_property(&self) -> Option<Property<'m>> {
        match self {
            PropertyRef::Property(prop) => Some(*prop),
            PropertyRef::Name(_) => None,
        }
    }
}

impl<'a> From<&'a str> for PropertyRef<'a, '_> {
    fn from(name: &'a str) -> Self {
        PropertyRef::Name(name)
    }
}

impl<'a> From<&'a String> for PropertyRef<'a, '_> {
    fn from(name: &'a String) -> Self {
        PropertyRef::Name(name)
    }
}

impl<'m> From<Property<'m>> for PropertyRef<'_, 'm> {
    fn from(prop: Property<'m>) -> Self {
        PropertyRef::Property(prop)
    }
}

impl<'m> From<&Property<'m>> for PropertyRef<'_, 'm> {
    fn from(prop: &Property<'m>) -> Self {
        PropertyRef::Property(*prop)
    }
}
