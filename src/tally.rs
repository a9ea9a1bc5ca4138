//! Counting how often each term is used across a population
use std::collections::hash_map::Iter;
use std::collections::HashMap;

use tracing::{trace, warn};

use crate::{HpoError, HpoResult, HpoTermId, OntologyGraph};

/// Per-term usage counts of a population plus the total of all counts
///
/// Only terms that were tallied at least once have a count. A missing
/// count is not the same as a count of `0`, so [`FrequencyTally::count_of`]
/// fails for terms that were never observed.
///
/// Terms that are not part of the ontology graph are ignored.
///
/// # Examples
///
/// ```
/// use hpo_similarity::{FrequencyTally, Ontology};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("All".into(), "HP:0000001");
///
/// let mut tally = FrequencyTally::default();
/// assert!(tally.count_of("HP:0000001").is_err());
///
/// assert!(tally.add_one(&ontology, "HP:0000001"));
/// assert!(tally.add_one(&ontology, "HP:0000001"));
/// assert!(!tally.add_one(&ontology, "unknown_term"));
///
/// assert_eq!(tally.count_of("HP:0000001").unwrap(), 2);
/// assert_eq!(tally.total_freq(), 2);
/// ```
#[derive(Debug, Default, Clone)]
pub struct FrequencyTally {
    counts: HashMap<HpoTermId, u32>,
    total_freq: u32,
}

impl FrequencyTally {
    /// Tallies every term of every annotation list
    ///
    /// Each occurrence counts, duplicates within one list included.
    pub fn tally_all<'b, G, I, T>(&mut self, graph: &G, annotations: I)
    where
        G: OntologyGraph + ?Sized,
        I: IntoIterator<Item = T>,
        T: IntoIterator<Item = &'b HpoTermId>,
    {
        for terms in annotations {
            for term in terms {
                self.add_one(graph, term.as_str());
            }
        }
    }

    /// Increments the count of the term and the total count by one
    ///
    /// Returns `false` without changing anything if the term is not part
    /// of the `graph` or if the total count is exhausted.
    pub fn add_one<G: OntologyGraph + ?Sized>(&mut self, graph: &G, id: &str) -> bool {
        if !graph.contains(id) {
            trace!("Ignoring unknown term {}", id);
            return false;
        }
        // a single count never exceeds the total
        let Some(total_freq) = self.total_freq.checked_add(1) else {
            warn!("Total count exhausted, ignoring {}", id);
            return false;
        };
        match self.counts.get_mut(id) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(HpoTermId::from(id), 1);
            }
        }
        self.total_freq = total_freq;
        true
    }

    /// Returns the count of the term
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] if the term was never tallied
    pub fn count_of(&self, id: &str) -> HpoResult<u32> {
        self.get(id)
            .ok_or_else(|| HpoError::NotFound(id.to_string()))
    }

    /// Returns the count of the term, `None` if it was never tallied
    pub fn get(&self, id: &str) -> Option<u32> {
        self.counts.get(id).copied()
    }

    /// Returns the sum of all counts
    pub fn total_freq(&self) -> u32 {
        self.total_freq
    }

    /// Returns the number of distinct tallied terms
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if nothing was tallied yet
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates all tallied terms and their counts, in arbitrary order
    pub fn iter(&self) -> Iter<'_, HpoTermId, u32> {
        self.counts.iter()
    }
}

impl<'a> IntoIterator for &'a FrequencyTally {
    type Item = (&'a HpoTermId, &'a u32);
    type IntoIter = Iter<'a, HpoTermId, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Ontology;

    fn ontology() -> Ontology {
        let mut ont = Ontology::default();
        ont.insert_term("All".into(), "HP:0000001");
        ont.insert_term("Phenotypic abnormality".into(), "HP:0000118");
        ont.insert_term("Abnormality of the nervous system".into(), "HP:0000707");
        ont.add_parent("HP:0000001", "HP:0000118").unwrap();
        ont.add_parent("HP:0000118", "HP:0000707").unwrap();
        ont
    }

    fn ids(terms: &[&str]) -> Vec<HpoTermId> {
        terms.iter().map(|id| HpoTermId::from(*id)).collect()
    }

    #[test]
    fn tally_counts_every_occurrence() {
        let ont = ontology();
        let population = vec![
            ids(&["HP:0000707", "HP:0000707"]),
            ids(&["HP:0000118", "HP:0000707"]),
        ];

        let mut tally = FrequencyTally::default();
        tally.tally_all(&ont, &population);

        assert_eq!(tally.count_of("HP:0000707").unwrap(), 3);
        assert_eq!(tally.count_of("HP:0000118").unwrap(), 1);
        assert_eq!(tally.total_freq(), 4);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn unknown_terms_are_ignored() {
        let ont = ontology();
        let population = vec![ids(&["HP:0000707", "HP:9999999", "unknown_term"])];

        let mut tally = FrequencyTally::default();
        tally.tally_all(&ont, &population);

        assert_eq!(tally.total_freq(), 1);
        assert!(tally.get("HP:9999999").is_none());
        assert!(tally.get("unknown_term").is_none());
    }

    #[test]
    fn order_does_not_matter() {
        let ont = ontology();
        let mut forward = FrequencyTally::default();
        forward.tally_all(&ont, &[ids(&["HP:0000001", "HP:0000707", "HP:0000707"])]);

        let mut backward = FrequencyTally::default();
        backward.tally_all(&ont, &[ids(&["HP:0000707"]), ids(&["HP:0000707", "HP:0000001"])]);

        assert_eq!(forward.total_freq(), backward.total_freq());
        for (id, count) in &forward {
            assert_eq!(backward.count_of(id.as_str()).unwrap(), *count);
        }
    }

    #[test]
    fn add_one_is_monotonic() {
        let ont = ontology();
        let mut tally = FrequencyTally::default();

        assert!(tally.add_one(&ont, "HP:0000118"));
        assert_eq!(tally.count_of("HP:0000118").unwrap(), 1);
        assert_eq!(tally.total_freq(), 1);

        assert!(tally.add_one(&ont, "HP:0000118"));
        assert_eq!(tally.count_of("HP:0000118").unwrap(), 2);
        assert_eq!(tally.total_freq(), 2);

        assert!(!tally.add_one(&ont, "unknown_term"));
        assert_eq!(tally.total_freq(), 2);
    }

    #[test]
    fn missing_count_is_an_error() {
        let tally = FrequencyTally::default();
        assert!(tally.is_empty());
        match tally.count_of("HP:0000001") {
            Err(HpoError::NotFound(id)) => assert_eq!(id, "HP:0000001"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_total_changes_nothing() {
        let ont = ontology();
        let mut tally = FrequencyTally {
            counts: HashMap::new(),
            total_freq: u32::MAX,
        };
        assert!(!tally.add_one(&ont, "HP:0000118"));
        assert_eq!(tally.total_freq(), u32::MAX);
        assert!(tally.get("HP:0000118").is_none());
    }

    #[test]
    fn total_is_sum_of_counts() {
        let ont = ontology();
        let mut tally = FrequencyTally::default();
        for id in ["HP:0000001", "HP:0000707", "HP:0000707", "foo", "HP:0000118"] {
            tally.add_one(&ont, id);
        }
        let sum: u32 = tally.iter().map(|(_, count)| count).sum();
        assert_eq!(sum, tally.total_freq());
    }
}
