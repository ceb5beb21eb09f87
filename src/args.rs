//! CLI argument definitions for model generation.

use anyhow::Context;
use clap::Args;
use soa_core::ratio::parse_unit_ratio;
use soa_core::Rational;
use soa_generator::{GeneratorConfig, DEFAULT_PROPERTY_NAME_COUNT};
use std::path::PathBuf;

/// Counts, ratios and seed for one generation run.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// The number of datatypes beyond Bool, Int, Float and DateTime
    #[arg(short = 'd', long, required_unless_present = "config")]
    pub datatypes: Option<usize>,

    /// The number of data classes
    #[arg(short = 'c', long, required_unless_present = "config")]
    pub classes: Option<usize>,

    /// The number of data services
    #[arg(short = 's', long, required_unless_present = "config")]
    pub services: Option<usize>,

    /// The max number of properties per class
    #[arg(short = 'p', long, required_unless_present = "config")]
    pub properties: Option<usize>,

    /// The number of property names
    #[arg(short = 'n', long, default_value_t = DEFAULT_PROPERTY_NAME_COUNT)]
    pub names: usize,

    /// Ratio of classes with references vs simple POJO classes
    #[arg(long, default_value = "1/10", value_parser = parse_unit_ratio)]
    pub refclassratio: Rational,

    /// Ratio of services with references vs simple POJO services
    #[arg(long, default_value = "1/2", value_parser = parse_unit_ratio)]
    pub refserviceratio: Rational,

    /// Ratio of ref vs simple types for extra properties of referential classes
    #[arg(short = 'r', long, default_value = "1/10", value_parser = parse_unit_ratio)]
    pub refratio: Rational,

    /// Seed for reproducible output (random when omitted)
    #[arg(long, env = "SOA_SIM_SEED")]
    pub seed: Option<u64>,

    /// YAML configuration file; replaces the count and ratio flags
    #[arg(long, conflicts_with_all = ["datatypes", "classes", "services", "properties"])]
    pub config: Option<PathBuf>,
}

impl GenerateArgs {
    /// Build the generator configuration from the file or the flags.
    ///
    /// `--seed` overrides a seed given in the configuration file.
    pub fn to_config(&self) -> anyhow::Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {path:?}"))?,
            None => {
                let mut config = GeneratorConfig::new(
                    self.datatypes.context("--datatypes is required")?,
                    self.classes.context("--classes is required")?,
                    self.services.context("--services is required")?,
                    self.properties.context("--properties is required")?,
                );
                config.property_name_count = self.names;
                config.ref_class_ratio = self.refclassratio;
                config.ref_service_ratio = self.refserviceratio;
                config.ref_ratio = self.refratio;
                config
            }
        };
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config
            .validate()
            .context("Invalid generation parameters")?;
        Ok(config)
    }
}
