//! Entity generators for classes and services.
//!
//! Each generator draws from the given RNG only, so a seeded source yields a
//! reproducible model.

pub mod class;
pub mod service;

pub use class::{
    generate_property, generate_ref_class, generate_simple_class, RefContext, MAX_ITEMS,
};
pub use service::{
    generate_error_rate, generate_service, ClassDeck, ERROR_RATE_EXPONENTS,
    MAX_PROCESSING_MAGNITUDE,
};
