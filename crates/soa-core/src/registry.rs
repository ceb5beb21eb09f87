//! Partitioned registry shared by the type, class and service repositories.
//!
//! Members are split into a simple and a referential partition by the
//! [`Referential`] predicate. Both partitions keep insertion order so that a
//! seeded RNG always draws the same member.

use crate::error::RepoError;
use indexmap::{Equivalent, IndexSet};
use rand::Rng;
use serde::Serialize;
use std::hash::Hash;
use std::sync::Arc;

/// Predicate deciding which partition a member belongs to.
pub trait Referential {
    /// Whether the member references another entity.
    fn is_ref(&self) -> bool;
}

impl<T: Referential + ?Sized> Referential for Arc<T> {
    fn is_ref(&self) -> bool {
        (**self).is_ref()
    }
}

/// Which half of a [`PartitionedRegistry`] to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Simple,
    Ref,
}

impl Partition {
    fn label(self) -> &'static str {
        match self {
            Partition::Simple => "simple",
            Partition::Ref => "ref",
        }
    }
}

/// Append-mostly set split into simple and referential members.
#[derive(Debug, Clone, Serialize)]
pub struct PartitionedRegistry<T: Hash + Eq> {
    #[serde(skip)]
    label: &'static str,
    simple: IndexSet<T>,
    #[serde(rename = "ref")]
    refs: IndexSet<T>,
}

impl<T: Hash + Eq + Referential> PartitionedRegistry<T> {
    /// Create an empty registry. `label` names it in error messages.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            simple: IndexSet::new(),
            refs: IndexSet::new(),
        }
    }

    fn store(&self, partition: Partition) -> &IndexSet<T> {
        match partition {
            Partition::Simple => &self.simple,
            Partition::Ref => &self.refs,
        }
    }

    /// Insert a member into the partition its predicate selects.
    ///
    /// Returns `false` if an equal member was already present.
    pub fn insert(&mut self, item: T) -> bool {
        if item.is_ref() {
            self.refs.insert(item)
        } else {
            self.simple.insert(item)
        }
    }

    /// Remove a member from its partition. Returns whether it was present.
    pub fn discard(&mut self, item: &T) -> bool {
        if item.is_ref() {
            self.refs.shift_remove(item)
        } else {
            self.simple.shift_remove(item)
        }
    }

    /// Insert a member and return its partition and position.
    ///
    /// Returns `None` if an equal member was already present. Positions stay
    /// valid until a member of the same partition is discarded.
    pub fn insert_full(&mut self, item: T) -> Option<(Partition, usize)> {
        let partition = if item.is_ref() {
            Partition::Ref
        } else {
            Partition::Simple
        };
        let store = match partition {
            Partition::Simple => &mut self.simple,
            Partition::Ref => &mut self.refs,
        };
        match store.insert_full(item) {
            (idx, true) => Some((partition, idx)),
            (_, false) => None,
        }
    }

    /// Whether an equal member is present in either partition.
    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.simple.contains(item) || self.refs.contains(item)
    }

    /// The member at `idx` of one partition.
    pub fn get_index(&self, partition: Partition, idx: usize) -> Option<&T> {
        self.store(partition).get_index(idx)
    }

    /// Members of one partition, in insertion order.
    pub fn partition(&self, partition: Partition) -> impl Iterator<Item = &T> {
        self.store(partition).iter()
    }

    /// Number of members in one partition.
    pub fn partition_len(&self, partition: Partition) -> usize {
        self.store(partition).len()
    }

    /// All members, simple partition first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.simple.iter().chain(self.refs.iter())
    }

    pub fn len(&self) -> usize {
        self.simple.len() + self.refs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Draw a member of `partition` uniformly at random.
    pub fn random<R: Rng>(&self, partition: Partition, rng: &mut R) -> Result<&T, RepoError> {
        let store = self.store(partition);
        if store.is_empty() {
            return Err(RepoError::empty(format!(
                "{} {} partition",
                self.label,
                partition.label()
            )));
        }
        let idx = rng.gen_range(0..store.len());
        store
            .get_index(idx)
            .ok_or_else(|| RepoError::empty(self.label))
    }
}
