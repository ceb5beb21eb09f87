//! Unique name issuance for property names, data classes and data services.

use crate::error::RepoError;
use indexmap::IndexSet;
use rand::Rng;
use serde::Serialize;
use std::fmt;

/// Naming scheme for one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Property,
    DataClass,
    DataService,
}

impl NameKind {
    /// Prefix prepended to the counter.
    pub fn prefix(self) -> &'static str {
        match self {
            NameKind::Property => "prop",
            NameKind::DataClass => "DataClass",
            NameKind::DataService => "DataService",
        }
    }

    fn label(self) -> &'static str {
        match self {
            NameKind::Property => "property names",
            NameKind::DataClass => "data class names",
            NameKind::DataService => "data service names",
        }
    }
}

/// Registry of issued names within one namespace.
///
/// Names are `{prefix}{counter}`; the counter only ever grows, so a name is
/// never issued twice and never removed.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct NameRepo {
    #[serde(skip)]
    kind: NameKind,
    #[serde(skip)]
    next: u64,
    names: IndexSet<String>,
}

impl NameRepo {
    pub fn new(kind: NameKind) -> Self {
        Self {
            kind,
            next: 0,
            names: IndexSet::new(),
        }
    }

    pub fn kind(&self) -> NameKind {
        self.kind
    }

    /// Issue and record a fresh name.
    pub fn add_next_name(&mut self) -> String {
        loop {
            let candidate = format!("{}{}", self.kind.prefix(), self.next);
            self.next += 1;
            if self.names.insert(candidate.clone()) {
                return candidate;
            }
        }
    }

    /// Issue `count` fresh names.
    pub fn add_names_auto(&mut self, count: usize) {
        self.names.reserve(count);
        for _ in 0..count {
            self.add_next_name();
        }
    }

    /// Draw `count` distinct issued names without replacement.
    pub fn sample<R: Rng>(&self, count: usize, rng: &mut R) -> Result<Vec<&str>, RepoError> {
        if count > self.names.len() {
            return Err(RepoError::insufficient(
                self.kind.label(),
                count,
                self.names.len(),
            ));
        }
        Ok(rand::seq::index::sample(rng, self.names.len(), count)
            .into_iter()
            .filter_map(|idx| self.names.get_index(idx).map(String::as_str))
            .collect())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Issued names in issue order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for NameRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.kind.label())?;
        for name in &self.names {
            writeln!(f, "{name}")?;
        }
        Ok(())
    }
}
