//! Entity model and repositories for the soa-sim architecture generator.
//!
//! This crate defines the description of a mock service-oriented
//! architecture:
//!
//! - [`DataPropertyType`] - Simple scalar or referential (`owner:field`) type
//! - [`DataProperty`] - Named, typed field with a cardinality range
//! - [`DataClass`] - Named set of properties
//! - [`DataService`] - Service bound to one class, with timing and error rate
//! - [`NameRepo`] - Unique name issuance per namespace
//! - [`PartitionedRegistry`] - Set split into simple and referential members
//!
//! # Architecture
//!
//! ```text
//! soa-core (this crate)
//!    │
//!    ├─── NameRepo                 (prop*, DataClass*, DataService*)
//!    ├─── DataPropertyTypeRepo ─┐
//!    ├─── DataClassRepo        ─┼── PartitionedRegistry<T: Referential>
//!    └─── DataServiceRepo      ─┘
//!    │
//!    └─── soa-generator  (fills the repositories from a GeneratorConfig)
//! ```
//!
//! # Example
//!
//! ```rust
//! use soa_core::{DataClass, DataClassRepo, DataProperty, DataPropertyType, Referential};
//!
//! let property = DataProperty::builder("owner")
//!     .datatype(DataPropertyType::reference("DataClass0", "prop3"))
//!     .min_items(0)
//!     .max_items(1)
//!     .build()
//!     .unwrap();
//!
//! let mut repo = DataClassRepo::new();
//! let class = repo.add_dataclass(DataClass::new("DataClass1").with_property(property));
//! assert!(class.is_ref());
//! assert_eq!(repo.ref_classes().count(), 1);
//! ```

pub mod class;
pub mod error;
pub mod names;
pub mod property_types;
pub mod ratio;
pub mod registry;
pub mod service;
pub mod types;

// Re-exports for convenience
pub use class::{DataClass, DataClassRepo};
pub use error::RepoError;
pub use names::{NameKind, NameRepo};
pub use property_types::DataPropertyTypeRepo;
pub use ratio::{RatioError, Rational};
pub use registry::{Partition, PartitionedRegistry, Referential};
pub use service::{DataService, DataServiceBuilder, DataServiceRepo};
pub use types::{DataProperty, DataPropertyBuilder, DataPropertyType, BUILTIN_TYPES};
