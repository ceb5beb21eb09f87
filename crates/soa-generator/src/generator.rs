//! Main generator producing a complete architecture model.

use crate::config::{ConfigError, GeneratorConfig};
use crate::generators::{
    generate_ref_class, generate_service, generate_simple_class, ClassDeck, RefContext,
};
use crate::simulate::{simulate_invocations, InvocationStats};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use soa_core::{
    DataClassRepo, DataPropertyTypeRepo, DataServiceRepo, NameKind, NameRepo, RepoError,
    BUILTIN_TYPES,
};
use std::fmt;
use tracing::{debug, info};

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Repository draw or sample error
    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// A generated model: every repository filled by one run.
#[derive(Debug, Clone, Serialize)]
pub struct SoaModel {
    pub property_types: DataPropertyTypeRepo,
    pub property_names: NameRepo,
    #[serde(skip)]
    pub class_names: NameRepo,
    #[serde(skip)]
    pub service_names: NameRepo,
    pub classes: DataClassRepo,
    pub services: DataServiceRepo,
}

impl fmt::Display for SoaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.property_types)?;
        writeln!(f, "{}", self.property_names)?;
        writeln!(f, "{}", self.classes)?;
        write!(f, "{}", self.services)
    }
}

/// Generator that fills the repositories from a [`GeneratorConfig`].
///
/// All randomness comes from the owned RNG; a seeded RNG makes the model
/// reproducible.
pub struct SoaGenerator<R: Rng = StdRng> {
    config: GeneratorConfig,
    rng: R,
}

impl SoaGenerator<StdRng> {
    /// Create a generator seeded from `config.seed`, or from entropy when unset.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    /// Create a generator with an explicit seed.
    pub fn with_seed(config: GeneratorConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SoaGenerator<R> {
    /// Create a generator drawing from the given RNG.
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the full generation: simple classes, simple services, then the
    /// referential classes and services that may point back at them.
    pub fn generate(&mut self) -> Result<SoaModel, GeneratorError> {
        self.config.validate()?;
        let config = &self.config;
        let rng = &mut self.rng;

        let mut property_types = DataPropertyTypeRepo::new();
        property_types
            .add_types_as_str(BUILTIN_TYPES)
            .setup_simple_types(config.datatype_count);

        let mut property_names = NameRepo::new(NameKind::Property);
        property_names.add_names_auto(config.property_name_count);

        info!(
            "Registered {} property types and {} property names",
            property_types.len(),
            property_names.len()
        );

        let mut class_names = NameRepo::new(NameKind::DataClass);
        let mut service_names = NameRepo::new(NameKind::DataService);
        let mut classes = DataClassRepo::new();
        let mut services = DataServiceRepo::new();

        info!("Generating {} simple classes", config.get_simple_class_count());
        for _ in 0..config.get_simple_class_count() {
            let dataclass = generate_simple_class(
                class_names.add_next_name(),
                &property_names,
                config.properties_max,
                &property_types,
                rng,
            )?;
            debug!(
                "Generated class {} with {} properties",
                dataclass.name(),
                dataclass.len()
            );
            classes.add_dataclass(dataclass);
        }

        let simple_service_count = config.get_simple_service_count();
        info!("Generating {} simple services", simple_service_count);
        if simple_service_count > 0 {
            let mut deck = ClassDeck::new("simple data classes", classes.simple_classes());
            for _ in 0..simple_service_count {
                let dataclass = deck.deal(rng)?;
                let service = generate_service(service_names.add_next_name(), dataclass, rng)?;
                debug!("Generated {}", service);
                services.add_dataservice(service);
            }
        }

        info!("Generating {} referential classes", config.get_ref_class_count());
        for _ in 0..config.get_ref_class_count() {
            let mut ctx = RefContext {
                types: &mut property_types,
                classes: &classes,
                services: &services,
            };
            let dataclass = generate_ref_class(
                class_names.add_next_name(),
                &property_names,
                config.properties_max,
                &config.ref_ratio,
                &mut ctx,
                rng,
            )?;
            debug!(
                "Generated referential class {} with {} properties",
                dataclass.name(),
                dataclass.len()
            );
            classes.add_dataclass(dataclass);
        }

        let ref_service_count = config.get_ref_service_count();
        info!("Generating {} referential services", ref_service_count);
        if ref_service_count > 0 {
            let mut deck = ClassDeck::new("ref data classes", classes.ref_classes());
            for _ in 0..ref_service_count {
                let dataclass = deck.deal(rng)?;
                let service = generate_service(service_names.add_next_name(), dataclass, rng)?;
                debug!("Generated {}", service);
                services.add_dataservice(service);
            }
        }

        info!(
            "Generated {} classes and {} services",
            classes.len(),
            services.len()
        );

        Ok(SoaModel {
            property_types,
            property_names,
            class_names,
            service_names,
            classes,
            services,
        })
    }

    /// Simulate `calls` invocations of every service in the model.
    pub fn simulate(&mut self, model: &SoaModel, calls: u64) -> Vec<(String, InvocationStats)> {
        model
            .services
            .iter()
            .map(|service| {
                let stats = simulate_invocations(service, calls, &mut self.rng);
                (service.name().to_string(), stats)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use soa_core::{Rational, Referential};
    use std::collections::HashSet;

    fn simple_only(classes: usize, services: usize, properties: usize) -> GeneratorConfig {
        let mut config = GeneratorConfig::new(0, classes, services, properties);
        config.ref_class_ratio = Rational::from_integer(0);
        config.ref_service_ratio = Rational::from_integer(0);
        config
    }

    #[test]
    fn test_simple_scenario() {
        let mut generator = SoaGenerator::with_seed(simple_only(5, 3, 2), 42);
        let model = generator.generate().unwrap();

        let types: Vec<_> = model.property_types.simple_types().map(|t| t.as_str()).collect();
        assert_eq!(types, ["Bool", "Int", "Float", "DateTime"]);
        assert_eq!(model.property_types.ref_types().count(), 0);

        assert_eq!(model.classes.len(), 5);
        for class in model.classes.iter() {
            assert!((1..=2).contains(&class.len()));
            assert!(class.properties().all(|p| types.contains(&p.datatype().as_str())));
        }

        assert_eq!(model.services.len(), 3);
        let bound: HashSet<_> = model.services.iter().map(|s| s.dataclass().name()).collect();
        // Classes are dealt without replacement
        assert_eq!(bound.len(), 3);
        for service in model.services.iter() {
            assert!(model.classes.get(service.dataclass().name()).is_some());
        }
    }

    #[test]
    fn test_names_are_unique() {
        let mut config = GeneratorConfig::new(3, 40, 30, 5);
        config.ref_class_ratio = Rational::new(1, 4);
        let model = SoaGenerator::with_seed(config, 7).generate().unwrap();

        let class_names: HashSet<_> = model.classes.iter().map(|c| c.name()).collect();
        assert_eq!(class_names.len(), 40);
        let service_names: HashSet<_> = model.services.iter().map(|s| s.name()).collect();
        assert_eq!(service_names.len(), 30);
        let property_names: HashSet<_> = model.property_names.iter().collect();
        assert_eq!(property_names.len(), model.property_names.len());
    }

    #[test]
    fn test_referential_populations() {
        let mut config = GeneratorConfig::new(2, 20, 10, 4);
        config.ref_class_ratio = Rational::new(1, 2);
        config.ref_service_ratio = Rational::new(1, 2);
        config.ref_ratio = Rational::new(1, 3);
        let model = SoaGenerator::with_seed(config, 42).generate().unwrap();

        assert_eq!(model.classes.simple_classes().count(), 10);
        assert_eq!(model.classes.ref_classes().count(), 10);
        assert_eq!(model.services.simple_services().count(), 5);
        assert_eq!(model.services.ref_services().count(), 5);

        for service in model.services.ref_services() {
            assert!(service.dataclass().is_ref());
        }
        for datatype in model.property_types.ref_types() {
            let (owner, _) = datatype.ref_target().unwrap();
            assert!(model.classes.get(owner).is_some() || model.services.get(owner).is_some());
        }
    }

    #[test]
    fn test_ref_services_need_ref_classes() {
        // 5 classes at 1/10 leaves no referential class for the one ref service
        let config = GeneratorConfig::new(0, 5, 3, 2);
        let err = SoaGenerator::with_seed(config, 42).generate().unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Config(ConfigError::Population(RepoError::InsufficientPopulation {
                requested: 1,
                available: 0,
                ..
            }))
        ));
    }

    #[test]
    fn test_default_ratios_small_model() {
        let model = SoaGenerator::with_seed(GeneratorConfig::new(0, 10, 3, 2), 42)
            .generate()
            .unwrap();
        assert_eq!(model.classes.ref_classes().count(), 1);
        assert_eq!(model.services.ref_services().count(), 1);
        assert_eq!(model.services.simple_services().count(), 2);
    }

    #[test]
    fn test_properties_max_exceeds_names() {
        let mut config = simple_only(2, 1, 10);
        config.property_name_count = 5;
        let err = SoaGenerator::with_seed(config, 42).generate().unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Repo(RepoError::InsufficientPopulation {
                requested: 10,
                available: 5,
                ..
            })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = simple_only(0, 1, 1);
        let err = SoaGenerator::with_seed(config, 42).generate().unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::Config(ConfigError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_deterministic_generation() {
        let mut config = GeneratorConfig::new(4, 12, 8, 3);
        config.ref_class_ratio = Rational::new(1, 3);

        let a = SoaGenerator::with_seed(config.clone(), 99).generate().unwrap();
        let b = SoaGenerator::with_seed(config, 99).generate().unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_seed_from_config() {
        let mut config = simple_only(4, 2, 3);
        config.seed = Some(5);

        let a = SoaGenerator::new(config.clone()).generate().unwrap();
        let b = SoaGenerator::with_seed(config, 5).generate().unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_simulate() {
        let mut generator = SoaGenerator::with_seed(simple_only(3, 3, 2), 42);
        let model = generator.generate().unwrap();

        let stats = generator.simulate(&model, 1000);
        assert_eq!(stats.len(), 3);
        for (_, s) in &stats {
            assert_eq!(s.calls, 1000);
            assert!(s.failures <= s.calls);
        }
    }
}
