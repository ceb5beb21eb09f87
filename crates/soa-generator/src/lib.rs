//! Randomized generator for mock service-oriented architecture models.
//!
//! This crate provides the [`SoaGenerator`] which fills the `soa-core`
//! repositories from a [`GeneratorConfig`]. The generator owns its RNG; a
//! seeded RNG reproduces the same model across runs.
//!
//! # Architecture
//!
//! ```text
//! GeneratorConfig (CLI / YAML)
//!        │
//!        ▼
//! ┌──────────────────┐
//! │   SoaGenerator   │
//! │                  │
//! │  - config        │
//! │  - rng (StdRng)  │
//! └────────┬─────────┘
//!          │  simple classes → simple services
//!          │  → ref classes → ref services
//!          ▼
//!    SoaModel { property_types, property_names, classes, services }
//! ```
//!
//! # Example
//!
//! ```rust
//! use soa_generator::{GeneratorConfig, SoaGenerator};
//!
//! let config = GeneratorConfig::from_yaml(r#"
//! datatypes: 2
//! classes: 10
//! services: 4
//! properties: 3
//! refclassratio: "1/5"
//! "#).unwrap();
//!
//! let mut generator = SoaGenerator::with_seed(config, 42);
//! let model = generator.generate().unwrap();
//! assert_eq!(model.classes.len(), 10);
//! println!("{model}");
//! ```
//!
//! # Generation rules
//!
//! - Property `max_items` uniform in `[1, 2^48]`, `min_items` in `[0, max_items]`
//! - Processing magnitudes uniform in `[1, 2^27]`
//! - Error rate `1/10^k` with `k` uniform in `[2, 6]`
//! - Referential classes reference only classes and services created before them

pub mod config;
pub mod generator;
pub mod generators;
pub mod simulate;

// Re-exports for convenience
pub use config::{ConfigError, GeneratorConfig, DEFAULT_PROPERTY_NAME_COUNT};
pub use generator::{GeneratorError, SoaGenerator, SoaModel};
pub use simulate::{simulate_invocations, InvocationStats};
