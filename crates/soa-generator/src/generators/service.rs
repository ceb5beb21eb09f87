//! Data service generators.

use rand::seq::SliceRandom;
use rand::Rng;
use soa_core::{DataClass, DataService, Rational, RepoError};
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Upper bound for processing magnitudes (2^27, latency scale in microseconds).
pub const MAX_PROCESSING_MAGNITUDE: u64 = 1 << 27;

/// Exponents `k` for error rates `1/10^k`.
pub const ERROR_RATE_EXPONENTS: RangeInclusive<u32> = 2..=6;

/// Draw an error rate `1/10^k` with `k` uniform in [`ERROR_RATE_EXPONENTS`].
pub fn generate_error_rate<R: Rng>(rng: &mut R) -> Rational {
    let exponent = rng.gen_range(ERROR_RATE_EXPONENTS);
    Rational::new(1, 10u64.pow(exponent))
}

/// Build a service bound to `dataclass` with random timings and error rate.
pub fn generate_service<R: Rng>(
    name: String,
    dataclass: Arc<DataClass>,
    rng: &mut R,
) -> Result<DataService, RepoError> {
    DataService::builder(name, dataclass)
        .processing_magnitude(rng.gen_range(1..=MAX_PROCESSING_MAGNITUDE))
        .error_processing_magnitude(rng.gen_range(1..=MAX_PROCESSING_MAGNITUDE))
        .error_rate(generate_error_rate(rng))
        .build()
}

/// Deals classes to services without replacement.
///
/// The deck is reshuffled each time it runs out, so every class is dealt
/// once before any class is dealt twice.
#[derive(Debug)]
pub struct ClassDeck {
    label: &'static str,
    classes: Vec<Arc<DataClass>>,
    next: usize,
}

impl ClassDeck {
    pub fn new<'a>(
        label: &'static str,
        classes: impl IntoIterator<Item = &'a Arc<DataClass>>,
    ) -> Self {
        Self {
            label,
            classes: classes.into_iter().cloned().collect(),
            next: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Deal the next class.
    pub fn deal<R: Rng>(&mut self, rng: &mut R) -> Result<Arc<DataClass>, RepoError> {
        if self.classes.is_empty() {
            return Err(RepoError::EmptyPopulation {
                population: self.label.to_string(),
            });
        }
        if self.next == 0 {
            self.classes.shuffle(rng);
        }
        let dataclass = Arc::clone(&self.classes[self.next]);
        self.next = (self.next + 1) % self.classes.len();
        Ok(dataclass)
    }
}
