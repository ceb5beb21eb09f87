//! Error types for repository operations.

/// Error type for repository draws and samples.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    /// More distinct members were requested than the population holds
    #[error("Insufficient population in {population}: requested {requested}, available {available}")]
    InsufficientPopulation {
        population: String,
        requested: usize,
        available: usize,
    },

    /// Random draw from a population without members
    #[error("Empty population: cannot draw from {population}")]
    EmptyPopulation { population: String },

    /// Builder inputs violating an entity invariant
    #[error("Invalid {entity} '{name}': {reason}")]
    InvalidEntity {
        entity: &'static str,
        name: String,
        reason: &'static str,
    },
}

impl RepoError {
    pub(crate) fn insufficient(population: impl Into<String>, requested: usize, available: usize) -> Self {
        Self::InsufficientPopulation {
            population: population.into(),
            requested,
            available,
        }
    }

    pub(crate) fn invalid(entity: &'static str, name: &str, reason: &'static str) -> Self {
        Self::InvalidEntity {
            entity,
            name: name.to_string(),
            reason,
        }
    }

    pub(crate) fn empty(population: impl Into<String>) -> Self {
        Self::EmptyPopulation {
            population: population.into(),
        }
    }
}
