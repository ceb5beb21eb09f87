//! Repository of property types, split into simple and referential types.

use crate::error::RepoError;
use crate::registry::{Partition, PartitionedRegistry};
use crate::types::DataPropertyType;
use rand::Rng;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct DataPropertyTypeRepo {
    registry: PartitionedRegistry<DataPropertyType>,
}

impl Default for DataPropertyTypeRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl DataPropertyTypeRepo {
    pub fn new() -> Self {
        Self {
            registry: PartitionedRegistry::new("property types"),
        }
    }

    /// Insert a type into the partition matching [`DataPropertyType::is_ref`].
    pub fn add(&mut self, datatype: DataPropertyType) -> &mut Self {
        self.registry.insert(datatype);
        self
    }

    pub fn discard(&mut self, datatype: &DataPropertyType) -> &mut Self {
        self.registry.discard(datatype);
        self
    }

    pub fn has(&self, datatype: &DataPropertyType) -> bool {
        self.registry.contains(datatype)
    }

    /// Register whitespace-separated type names, e.g. `"Bool Int Float DateTime"`.
    pub fn add_types_as_str(&mut self, types: &str) -> &mut Self {
        for name in types.split_whitespace() {
            self.add(DataPropertyType::simple(name));
        }
        self
    }

    /// Register `Type0..Type{count-1}`.
    pub fn setup_simple_types(&mut self, count: usize) -> &mut Self {
        for i in 0..count {
            self.add(DataPropertyType::simple(format!("Type{i}")));
        }
        self
    }

    pub fn simple_types(&self) -> impl Iterator<Item = &DataPropertyType> {
        self.registry.partition(Partition::Simple)
    }

    pub fn ref_types(&self) -> impl Iterator<Item = &DataPropertyType> {
        self.registry.partition(Partition::Ref)
    }

    pub fn random_simple_type<R: Rng>(&self, rng: &mut R) -> Result<&DataPropertyType, RepoError> {
        self.registry.random(Partition::Simple, rng)
    }

    pub fn random_ref_type<R: Rng>(&self, rng: &mut R) -> Result<&DataPropertyType, RepoError> {
        self.registry.random(Partition::Ref, rng)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl fmt::Display for DataPropertyTypeRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# property types")?;
        for datatype in self.registry.iter() {
            writeln!(f, "{datatype}")?;
        }
        Ok(())
    }
}
