//! Data classes and their repository.

use crate::error::RepoError;
use crate::registry::{Partition, PartitionedRegistry, Referential};
use crate::types::DataProperty;
use indexmap::IndexSet;
use rand::Rng;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A named set of properties.
///
/// Properties equal in name, type and range collapse into one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataClass {
    name: String,
    properties: IndexSet<DataProperty>,
}

// Consistent with the order-insensitive set equality.
impl Hash for DataClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.properties.len().hash(state);
    }
}

impl DataClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: IndexSet::new(),
        }
    }

    /// Add a property. Returns `false` if an identical one is already present.
    pub fn add(&mut self, property: DataProperty) -> bool {
        self.properties.insert(property)
    }

    pub fn with_property(mut self, property: DataProperty) -> Self {
        self.add(property);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> impl Iterator<Item = &DataProperty> {
        self.properties.iter()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Pick one of this class's properties.
    pub fn random_property<R: Rng>(&self, rng: &mut R) -> Option<&DataProperty> {
        if self.properties.is_empty() {
            return None;
        }
        self.properties
            .get_index(rng.gen_range(0..self.properties.len()))
    }
}

impl Referential for DataClass {
    fn is_ref(&self) -> bool {
        self.properties.iter().any(|p| p.datatype().is_ref())
    }
}

impl fmt::Display for DataClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name = {}", self.name)?;
        writeln!(f, "----")?;
        for property in &self.properties {
            writeln!(f, "{property}")?;
        }
        Ok(())
    }
}

/// Repository of data classes, split into simple and referential classes.
///
/// Classes are shared with the services bound to them and are never removed.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct DataClassRepo {
    registry: PartitionedRegistry<Arc<DataClass>>,
    #[serde(skip)]
    by_name: HashMap<String, (Partition, usize)>,
}

impl Default for DataClassRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl DataClassRepo {
    pub fn new() -> Self {
        Self {
            registry: PartitionedRegistry::new("data classes"),
            by_name: HashMap::new(),
        }
    }

    /// Register a finished class and return the shared handle.
    pub fn add_dataclass(&mut self, dataclass: DataClass) -> Arc<DataClass> {
        let dataclass = Arc::new(dataclass);
        if let Some(position) = self.registry.insert_full(Arc::clone(&dataclass)) {
            self.by_name
                .entry(dataclass.name().to_string())
                .or_insert(position);
        }
        dataclass
    }

    pub fn has(&self, dataclass: &DataClass) -> bool {
        self.registry.contains(dataclass)
    }

    /// Look up a class by name.
    pub fn get(&self, name: &str) -> Option<&Arc<DataClass>> {
        let &(partition, idx) = self.by_name.get(name)?;
        self.registry.get_index(partition, idx)
    }

    pub fn simple_classes(&self) -> impl Iterator<Item = &Arc<DataClass>> {
        self.registry.partition(Partition::Simple)
    }

    pub fn ref_classes(&self) -> impl Iterator<Item = &Arc<DataClass>> {
        self.registry.partition(Partition::Ref)
    }

    pub fn random_simple_class<R: Rng>(&self, rng: &mut R) -> Result<&Arc<DataClass>, RepoError> {
        self.registry.random(Partition::Simple, rng)
    }

    pub fn random_ref_class<R: Rng>(&self, rng: &mut R) -> Result<&Arc<DataClass>, RepoError> {
        self.registry.random(Partition::Ref, rng)
    }

    /// All classes, simple ones first.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<DataClass>> {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl fmt::Display for DataClassRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# classes")?;
        for dataclass in self.registry.iter() {
            writeln!(f, "{dataclass}")?;
        }
        Ok(())
    }
}
