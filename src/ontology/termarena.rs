use std::collections::hash_map::{Entry, Values};
use std::collections::HashMap;

use crate::term::internal::HpoTermInternal;
use crate::HpoTermId;
use crate::DEFAULT_NUM_TERMS;

/// Owns every term of the Ontology, keyed by id
pub(crate) struct Arena {
    terms: HashMap<HpoTermId, HpoTermInternal>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Adds the term to the arena
    ///
    /// Returns `false` and leaves the arena untouched if a term
    /// with the same id is already present
    pub fn insert(&mut self, term: HpoTermInternal) -> bool {
        match self.terms.entry(term.id().clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(term);
                true
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.terms.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&HpoTermInternal> {
        self.terms.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut HpoTermInternal> {
        self.terms.get_mut(id)
    }

    pub fn values(&self) -> Values<'_, HpoTermId, HpoTermInternal> {
        self.terms.values()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: HashMap::with_capacity(DEFAULT_NUM_TERMS),
        }
    }
}
