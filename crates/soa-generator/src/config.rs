//! Generation configuration: population counts and ratios.
//!
//! All derived counts are pure functions of the configuration. Splits use
//! floor (truncation): `ref = floor(total * ratio)`, `simple = total - ref`.

use serde::{Deserialize, Serialize};
use soa_core::ratio::{self, Rational};
use soa_core::RepoError;
use std::fs;
use std::path::Path;

/// Default size of the property name pool.
pub const DEFAULT_PROPERTY_NAME_COUNT: usize = 200;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Counts or ratios out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A service partition with no class partition to bind to
    #[error(transparent)]
    Population(#[from] RepoError),
}

fn default_property_name_count() -> usize {
    DEFAULT_PROPERTY_NAME_COUNT
}

fn default_ref_ratio() -> Rational {
    Rational::new(1, 10)
}

fn default_ref_class_ratio() -> Rational {
    Rational::new(1, 10)
}

fn default_ref_service_ratio() -> Rational {
    Rational::new(1, 2)
}

/// Counts and ratios driving one generation run.
///
/// YAML keys match the command-line flags:
///
/// ```yaml
/// datatypes: 5
/// classes: 20
/// services: 10
/// properties: 6
/// names: 200
/// refclassratio: "1/10"
/// refserviceratio: "1/2"
/// refratio: "1/10"
/// seed: 42
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Extra simple types beyond the built-in scalars
    #[serde(rename = "datatypes")]
    pub datatype_count: usize,

    /// Total number of data classes
    #[serde(rename = "classes")]
    pub class_count: usize,

    /// Total number of data services
    #[serde(rename = "services")]
    pub service_count: usize,

    /// Maximum number of properties per class
    #[serde(rename = "properties")]
    pub properties_max: usize,

    /// Size of the property name pool
    #[serde(rename = "names", default = "default_property_name_count")]
    pub property_name_count: usize,

    /// Fraction of extra property slots in referential classes typed referentially
    #[serde(rename = "refratio", with = "ratio", default = "default_ref_ratio")]
    pub ref_ratio: Rational,

    /// Fraction of classes that are referential
    #[serde(
        rename = "refclassratio",
        with = "ratio",
        default = "default_ref_class_ratio"
    )]
    pub ref_class_ratio: Rational,

    /// Fraction of services that are referential
    #[serde(
        rename = "refserviceratio",
        with = "ratio",
        default = "default_ref_service_ratio"
    )]
    pub ref_service_ratio: Rational,

    /// Seed for reproducible runs; entropy-seeded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    /// Create a configuration with default name pool and ratios.
    pub fn new(
        datatype_count: usize,
        class_count: usize,
        service_count: usize,
        properties_max: usize,
    ) -> Self {
        Self {
            datatype_count,
            class_count,
            service_count,
            properties_max,
            property_name_count: DEFAULT_PROPERTY_NAME_COUNT,
            ref_ratio: default_ref_ratio(),
            ref_class_ratio: default_ref_class_ratio(),
            ref_service_ratio: default_ref_service_ratio(),
            seed: None,
        }
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check counts are positive, ratios lie in `[0, 1]`, and every service
    /// partition has a class partition to bind to.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("classes", self.class_count),
            ("services", self.service_count),
            ("properties", self.properties_max),
            ("names", self.property_name_count),
        ];
        for (name, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "{name} must be at least 1"
                )));
            }
        }

        let one = Rational::from_integer(1);
        let ratios = [
            ("refratio", &self.ref_ratio),
            ("refclassratio", &self.ref_class_ratio),
            ("refserviceratio", &self.ref_service_ratio),
        ];
        for (name, value) in ratios {
            if *value > one {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "{name} {}/{} is outside [0, 1]",
                    value.numer(),
                    value.denom()
                )));
            }
        }

        let bindings = [
            (
                "simple data classes",
                self.get_simple_service_count(),
                self.get_simple_class_count(),
            ),
            (
                "ref data classes",
                self.get_ref_service_count(),
                self.get_ref_class_count(),
            ),
        ];
        for (population, requested, available) in bindings {
            if requested > 0 && available == 0 {
                return Err(RepoError::InsufficientPopulation {
                    population: population.to_string(),
                    requested,
                    available,
                }
                .into());
            }
        }
        Ok(())
    }

    pub fn get_ref_class_count(&self) -> usize {
        ratio::floor_mul(self.class_count, &self.ref_class_ratio)
    }

    pub fn get_simple_class_count(&self) -> usize {
        self.class_count - self.get_ref_class_count()
    }

    pub fn get_ref_service_count(&self) -> usize {
        ratio::floor_mul(self.service_count, &self.ref_service_ratio)
    }

    pub fn get_simple_service_count(&self) -> usize {
        self.service_count - self.get_ref_service_count()
    }
}
