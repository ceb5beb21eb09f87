//! Data services and their repository.

use crate::class::DataClass;
use crate::error::RepoError;
use crate::ratio::{self, Rational};
use crate::registry::{Partition, PartitionedRegistry, Referential};
use rand::Rng;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A service wrapping exactly one data class.
///
/// Identity is `(name, dataclass name)`: two services with the same name and
/// class compare equal whatever their timings.
#[derive(Debug, Clone, Serialize)]
pub struct DataService {
    name: String,
    #[serde(serialize_with = "serialize_class_name")]
    dataclass: Arc<DataClass>,
    processing_magnitude: u64,
    error_processing_magnitude: u64,
    #[serde(with = "ratio")]
    error_rate: Rational,
}

fn serialize_class_name<S: Serializer>(
    dataclass: &Arc<DataClass>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(dataclass.name())
}

impl DataService {
    /// Start building a service bound to `dataclass`.
    pub fn builder(name: impl Into<String>, dataclass: Arc<DataClass>) -> DataServiceBuilder {
        DataServiceBuilder {
            name: name.into(),
            dataclass,
            processing_magnitude: 1,
            error_processing_magnitude: 1,
            error_rate: Rational::new(1, 1_000_000),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dataclass(&self) -> &Arc<DataClass> {
        &self.dataclass
    }

    pub fn processing_magnitude(&self) -> u64 {
        self.processing_magnitude
    }

    pub fn error_processing_magnitude(&self) -> u64 {
        self.error_processing_magnitude
    }

    pub fn error_rate(&self) -> &Rational {
        &self.error_rate
    }

    /// Decide whether one simulated call to this service fails.
    pub fn rand_error_rate<R: Rng>(&self, rng: &mut R) -> bool {
        ratio::bernoulli(&self.error_rate, rng)
    }
}

impl PartialEq for DataService {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.dataclass.name() == other.dataclass.name()
    }
}

impl Eq for DataService {}

impl Hash for DataService {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.dataclass.name().hash(state);
    }
}

impl Referential for DataService {
    fn is_ref(&self) -> bool {
        self.dataclass.is_ref()
    }
}

impl fmt::Display for DataService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "service {} for class {}: processing_magnitude = {}, error_processing_magnitude = {}, error_rate = {}/{}",
            self.name,
            self.dataclass.name(),
            self.processing_magnitude,
            self.error_processing_magnitude,
            self.error_rate.numer(),
            self.error_rate.denom()
        )
    }
}

/// Builder for [`DataService`].
#[derive(Debug, Clone)]
pub struct DataServiceBuilder {
    name: String,
    dataclass: Arc<DataClass>,
    processing_magnitude: u64,
    error_processing_magnitude: u64,
    error_rate: Rational,
}

impl DataServiceBuilder {
    pub fn processing_magnitude(mut self, magnitude: u64) -> Self {
        self.processing_magnitude = magnitude;
        self
    }

    pub fn error_processing_magnitude(mut self, magnitude: u64) -> Self {
        self.error_processing_magnitude = magnitude;
        self
    }

    pub fn error_rate(mut self, error_rate: Rational) -> Self {
        self.error_rate = error_rate;
        self
    }

    /// Finish the service.
    ///
    /// Fails for an empty name, a zero magnitude or an error rate outside
    /// `(0, 1]`.
    pub fn build(self) -> Result<DataService, RepoError> {
        if self.name.is_empty() {
            return Err(RepoError::invalid("service", &self.name, "empty name"));
        }
        if self.processing_magnitude == 0 || self.error_processing_magnitude == 0 {
            return Err(RepoError::invalid(
                "service",
                &self.name,
                "processing magnitudes must be positive",
            ));
        }
        if *self.error_rate.numer() == 0 || self.error_rate > Rational::from_integer(1) {
            return Err(RepoError::invalid(
                "service",
                &self.name,
                "error rate must lie in (0, 1]",
            ));
        }
        Ok(DataService {
            name: self.name,
            dataclass: self.dataclass,
            processing_magnitude: self.processing_magnitude,
            error_processing_magnitude: self.error_processing_magnitude,
            error_rate: self.error_rate,
        })
    }
}

/// Repository of data services, split by whether the bound class is referential.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct DataServiceRepo {
    registry: PartitionedRegistry<DataService>,
    #[serde(skip)]
    by_name: HashMap<String, (Partition, usize)>,
}

impl Default for DataServiceRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl DataServiceRepo {
    pub fn new() -> Self {
        Self {
            registry: PartitionedRegistry::new("data services"),
            by_name: HashMap::new(),
        }
    }

    /// Register a service. Returns `false` if an equal service exists.
    pub fn add_dataservice(&mut self, service: DataService) -> bool {
        let name = service.name().to_string();
        match self.registry.insert_full(service) {
            Some(position) => {
                self.by_name.entry(name).or_insert(position);
                true
            }
            None => false,
        }
    }

    pub fn has(&self, service: &DataService) -> bool {
        self.registry.contains(service)
    }

    /// Look up a service by name.
    pub fn get(&self, name: &str) -> Option<&DataService> {
        let &(partition, idx) = self.by_name.get(name)?;
        self.registry.get_index(partition, idx)
    }

    pub fn simple_services(&self) -> impl Iterator<Item = &DataService> {
        self.registry.partition(Partition::Simple)
    }

    pub fn ref_services(&self) -> impl Iterator<Item = &DataService> {
        self.registry.partition(Partition::Ref)
    }

    pub fn random_simple_service<R: Rng>(&self, rng: &mut R) -> Result<&DataService, RepoError> {
        self.registry.random(Partition::Simple, rng)
    }

    pub fn random_ref_service<R: Rng>(&self, rng: &mut R) -> Result<&DataService, RepoError> {
        self.registry.random(Partition::Ref, rng)
    }

    /// All services, simple ones first.
    pub fn iter(&self) -> impl Iterator<Item = &DataService> {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }
}

impl fmt::Display for DataServiceRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# services")?;
        for service in self.registry.iter() {
            writeln!(f, "{service}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DataProperty, DataPropertyType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simple_class(name: &str) -> Arc<DataClass> {
        Arc::new(DataClass::new(name).with_property(DataProperty::builder("x").build().unwrap()))
    }

    #[test]
    fn test_equality_ignores_timings() {
        let class = simple_class("DataClass0");
        let a = DataService::builder("DataService0", Arc::clone(&class))
            .processing_magnitude(5)
            .build()
            .unwrap();
        let b = DataService::builder("DataService0", class)
            .processing_magnitude(99)
            .error_rate(Rational::new(1, 100))
            .build()
            .unwrap();
        assert_eq!(a, b);

        let mut repo = DataServiceRepo::new();
        assert!(repo.add_dataservice(a));
        assert!(!repo.add_dataservice(b));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_same_name_other_class_differs() {
        let a = DataService::builder("S", simple_class("A")).build().unwrap();
        let b = DataService::builder("S", simple_class("B")).build().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_builder_validation() {
        let class = simple_class("A");
        assert!(DataService::builder("S", Arc::clone(&class))
            .processing_magnitude(0)
            .build()
            .is_err());
        assert!(DataService::builder("S", Arc::clone(&class))
            .error_rate(Rational::from_integer(0))
            .build()
            .is_err());
        assert!(DataService::builder("S", class)
            .error_rate(Rational::new(3, 2))
            .build()
            .is_err());
    }

    #[test]
    fn test_display() {
        let service = DataService::builder("DataService0", simple_class("DataClass2"))
            .processing_magnitude(12)
            .error_processing_magnitude(30)
            .error_rate(Rational::new(1, 1000))
            .build()
            .unwrap();
        assert_eq!(
            service.to_string(),
            "service DataService0 for class DataClass2: processing_magnitude = 12, error_processing_magnitude = 30, error_rate = 1/1000"
        );
    }

    #[test]
    fn test_rand_error_rate_frequency() {
        let service = DataService::builder("S", simple_class("A"))
            .error_rate(Rational::new(1, 100))
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let trials = 100_000;
        let failures = (0..trials).filter(|_| service.rand_error_rate(&mut rng)).count();
        let observed = failures as f64 / trials as f64;
        // Expected 1000 failures, standard deviation ~31.5
        assert!((observed - 0.01).abs() < 0.002, "observed {observed}");
    }

    #[test]
    fn test_repo_partitions_follow_class() {
        let referential = Arc::new(
            DataClass::new("R").with_property(
                DataProperty::builder("link")
                    .datatype(DataPropertyType::reference("A", "x"))
                    .build()
                    .unwrap(),
            ),
        );
        let mut repo = DataServiceRepo::new();
        repo.add_dataservice(DataService::builder("S0", simple_class("A")).build().unwrap());
        repo.add_dataservice(DataService::builder("S1", referential).build().unwrap());

        assert_eq!(repo.simple_services().count(), 1);
        assert_eq!(repo.ref_services().next().unwrap().name(), "S1");
        assert_eq!(repo.get("S0").unwrap().dataclass().name(), "A");
        assert_eq!(repo.get("S1").unwrap().dataclass().name(), "R");
        assert!(repo.get("S2").is_none());

        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(repo.random_ref_service(&mut rng).unwrap().name(), "S1");
    }

    #[test]
    fn test_serialize_uses_class_name_and_rational_string() {
        let service = DataService::builder("S", simple_class("A"))
            .error_rate(Rational::new(1, 100))
            .build()
            .unwrap();
        let json = serde_json::to_value(&service).unwrap();
        assert_eq!(json["dataclass"], "A");
        assert_eq!(json["error_rate"], "1/100");
    }
}
