//! Contains implementation for the Similarity algorithms that are
//! considered to be default implementations.
//!
//! All of the algorithms can also be accessed via [`crate::similarity::Builtins`]

use crate::similarity::Similarity;
use crate::term::InformationContentKind;
use crate::{OntologyGraph, SimilarityEngine};

/// Similarity score from Resnik
///
/// The information content of the most informative common ancestor.
/// Common ancestors that were never observed in the population do not
/// contribute. If no common ancestor contributes, the score is `0.0`.
///
/// For a detailed description see [Resnik P, Proceedings of the 14th IJCAI, (1995)](https://www.ijcai.org/Proceedings/95-1/Papers/059.pdf)
#[derive(Debug, Default, Clone, Copy)]
pub struct Resnik {
    kind: InformationContentKind,
}

impl Resnik {
    /// Constructs a new struct to calculate the Resnik based similarity scores
    /// between two terms
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_similarity::similarity::Resnik;
    /// use hpo_similarity::InformationContentKind;
    ///
    /// // use the propagated counts for the information content
    /// let resnik = Resnik::new(InformationContentKind::Propagated);
    /// ```
    pub fn new(kind: InformationContentKind) -> Self {
        Self { kind }
    }
}

impl Similarity for Resnik {
    fn calculate<G: OntologyGraph + ?Sized>(
        &self,
        engine: &SimilarityEngine<'_, G>,
        a: &str,
        b: &str,
    ) -> f32 {
        engine
            .common_ancestors_of(a, b)
            .iter()
            .filter_map(|term| {
                engine
                    .information_content_of_kind(term.as_str(), self.kind)
                    .ok()
            })
            .fold(0.0, f32::max)
    }
}

/// Similarity score from Lin
///
/// `2 * resnik(a, b) / (ic(a) + ic(b))`. The score is `0.0` if either term
/// has no information content or both have an information content of `0.0`.
///
/// For a detailed description see [Lin D, Proceedings of the 15th ICML, (1998)](https://dl.acm.org/doi/10.5555/645527.657297)
#[derive(Debug, Default, Clone, Copy)]
pub struct Lin {
    kind: InformationContentKind,
}

impl Lin {
    /// Constructs a new struct to calculate the Lin based similarity scores
    /// between two terms
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_similarity::similarity::Lin;
    /// use hpo_similarity::InformationContentKind;
    ///
    /// let lin = Lin::new(InformationContentKind::Observed);
    /// ```
    pub fn new(kind: InformationContentKind) -> Self {
        Self { kind }
    }
}

impl Similarity for Lin {
    fn calculate<G: OntologyGraph + ?Sized>(
        &self,
        engine: &SimilarityEngine<'_, G>,
        a: &str,
        b: &str,
    ) -> f32 {
        let (Ok(ic_a), Ok(ic_b)) = (
            engine.information_content_of_kind(a, self.kind),
            engine.information_content_of_kind(b, self.kind),
        ) else {
            return 0.0;
        };

        let ic_combined = ic_a + ic_b;
        if ic_combined == 0.0 {
            return 0.0;
        }

        let resnik = Resnik::new(self.kind).calculate(engine, a, b);

        2.0 * resnik / ic_combined
    }
}
