//! Property types and typed properties.
//!
//! A [`DataPropertyType`] is either a simple scalar (`Int`, `Type3`) or a
//! referential type pointing at a field of another entity, encoded as
//! `owner:field`. A [`DataProperty`] attaches a name and a cardinality range
//! to a type.

use crate::error::RepoError;
use crate::registry::Referential;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between owner and field in a referential type.
pub const REF_SEPARATOR: char = ':';

/// The scalar types every model starts with.
pub const BUILTIN_TYPES: &str = "Bool Int Float DateTime";

/// A property type, identified by its literal type string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPropertyType(String);

impl DataPropertyType {
    /// Create a simple (scalar) type.
    pub fn simple(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Create a referential type pointing at `field` of `owner`.
    pub fn reference(owner: &str, field: &str) -> Self {
        Self(format!("{owner}{REF_SEPARATOR}{field}"))
    }

    /// The literal type string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this type references another entity.
    pub fn is_ref(&self) -> bool {
        self.0.contains(REF_SEPARATOR)
    }

    /// Owner and field of a referential type.
    pub fn ref_target(&self) -> Option<(&str, &str)> {
        self.0.split_once(REF_SEPARATOR)
    }
}

impl Referential for DataPropertyType {
    fn is_ref(&self) -> bool {
        DataPropertyType::is_ref(self)
    }
}

impl fmt::Display for DataPropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A named, typed field with a cardinality range.
///
/// Example: `colors : Int [3, 3]`
///
/// Deserialization goes through [`DataPropertyBuilder`], so a decoded
/// property satisfies the same checks as a built one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DataPropertyFields")]
pub struct DataProperty {
    name: String,
    datatype: DataPropertyType,
    min_items: u64,
    max_items: u64,
}

#[derive(Deserialize)]
struct DataPropertyFields {
    name: String,
    datatype: DataPropertyType,
    min_items: u64,
    max_items: u64,
}

impl TryFrom<DataPropertyFields> for DataProperty {
    type Error = RepoError;

    fn try_from(fields: DataPropertyFields) -> Result<Self, Self::Error> {
        DataProperty::builder(fields.name)
            .datatype(fields.datatype)
            .min_items(fields.min_items)
            .max_items(fields.max_items)
            .build()
    }
}

impl DataProperty {
    /// Start building a property with the given name.
    pub fn builder(name: impl Into<String>) -> DataPropertyBuilder {
        DataPropertyBuilder {
            name: name.into(),
            datatype: DataPropertyType::simple("Int"),
            min_items: 0,
            max_items: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datatype(&self) -> &DataPropertyType {
        &self.datatype
    }

    pub fn min_items(&self) -> u64 {
        self.min_items
    }

    pub fn max_items(&self) -> u64 {
        self.max_items
    }
}

impl fmt::Display for DataProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} : {} [{}, {}]",
            self.name, self.datatype, self.min_items, self.max_items
        )
    }
}

/// Builder for [`DataProperty`].
///
/// Defaults to an `Int` property with range `[0, 1]`.
#[derive(Debug, Clone)]
pub struct DataPropertyBuilder {
    name: String,
    datatype: DataPropertyType,
    min_items: u64,
    max_items: u64,
}

impl DataPropertyBuilder {
    pub fn datatype(mut self, datatype: DataPropertyType) -> Self {
        self.datatype = datatype;
        self
    }

    pub fn min_items(mut self, min_items: u64) -> Self {
        self.min_items = min_items;
        self
    }

    pub fn max_items(mut self, max_items: u64) -> Self {
        self.max_items = max_items;
        self
    }

    /// Finish the property.
    ///
    /// Fails for an empty name or when `min_items > max_items`.
    pub fn build(self) -> Result<DataProperty, RepoError> {
        if self.name.is_empty() {
            return Err(RepoError::invalid("property", &self.name, "empty name"));
        }
        if self.min_items > self.max_items {
            return Err(RepoError::invalid(
                "property",
                &self.name,
                "min_items exceeds max_items",
            ));
        }
        Ok(DataProperty {
            name: self.name,
            datatype: self.datatype,
            min_items: self.min_items,
            max_items: self.max_items,
        })
    }
}
