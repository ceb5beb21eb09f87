//! soa-sim library
//!
//! Generates mock service-oriented architecture models (property types,
//! data classes and data services) as input for simulations and benchmarks.
//!
//! # Crates
//!
//! - `soa_core` - Entity model and partitioned repositories
//! - `soa_generator` - Configuration and randomized generation
//!
//! # CLI Usage
//!
//! ```bash
//! # 5 classes, 3 services, up to 2 properties each, no references
//! soa-sim -d 0 -c 5 -s 3 -p 2 --refclassratio 0 --refserviceratio 0
//!
//! # Reproducible run from a YAML configuration, as JSON
//! soa-sim --config model.yaml --seed 42 --format json
//!
//! # Simulate 10000 calls per service
//! soa-sim -d 2 -c 20 -s 10 -p 4 --seed 7 --simulate-calls 10000
//! ```

pub mod args;
pub mod render;

pub use args::GenerateArgs;
pub use render::{render, OutputFormat};
