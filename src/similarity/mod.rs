//! Methods to calculate the Similarity between two terms or sets of terms
//!
//! Term - term similarity is calculated by an implementor of [`Similarity`].
//! To compare two sets of terms, every term of one set is scored against
//! every term of the other set and the resulting [`Matrix`] is reduced to a
//! single score by a [`SimilarityCombiner`]. [`GroupSimilarity`] ties both
//! together.

use crate::matrix::Matrix;
use crate::term::InformationContentKind;
use crate::{HpoGroup, OntologyGraph, SimilarityEngine};

mod defaults;
pub use defaults::{Lin, Resnik};

/// Trait for similarity score calculation between 2 terms
///
/// The [`SimilarityEngine`] provides everything that is needed for the
/// calculation: the closure queries and the information content of
/// each term.
pub trait Similarity {
    /// calculates the actual similarity between term a and term b
    fn calculate<G: OntologyGraph + ?Sized>(
        &self,
        engine: &SimilarityEngine<'_, G>,
        a: &str,
        b: &str,
    ) -> f32;
}

/// Shortcut to select one of the built-in [`Similarity`] algorithms
///
/// # Examples
///
/// ```
/// use hpo_similarity::similarity::Builtins;
/// use hpo_similarity::InformationContentKind;
///
/// let resnik = Builtins::Resnik(InformationContentKind::Observed);
/// let lin = Builtins::Lin(InformationContentKind::Propagated);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtins {
    /// [`Resnik`]
    Resnik(InformationContentKind),
    /// [`Lin`]
    Lin(InformationContentKind),
}

impl Default for Builtins {
    fn default() -> Self {
        Self::Resnik(InformationContentKind::default())
    }
}

impl Similarity for Builtins {
    fn calculate<G: OntologyGraph + ?Sized>(
        &self,
        engine: &SimilarityEngine<'_, G>,
        a: &str,
        b: &str,
    ) -> f32 {
        match self {
            Builtins::Resnik(kind) => Resnik::new(*kind).calculate(engine, a, b),
            Builtins::Lin(kind) => Lin::new(*kind).calculate(engine, a, b),
        }
    }
}

/// This trait is needed for custom implementations
///
/// For similarity calculation between sets of terms
/// the similarity scores must be combined
pub trait SimilarityCombiner {
    /// This method implements the actual logic to calculate a single
    /// similarity score from a Matrix of term - term similarity scores.
    fn combine(&self, m: &Matrix<f32>) -> f32;

    /// this method is called by [`GroupSimilarity`] to combine individual term - term
    /// similarity scores into a single score for the group - group similarity
    ///
    /// An empty matrix has a score of `0.0`
    fn calculate(&self, m: &Matrix<f32>) -> f32 {
        if m.is_empty() {
            return 0.0;
        }
        self.combine(m)
    }

    /// Returns the maximum values of each row
    fn row_maxes(&self, m: &Matrix<f32>) -> Vec<f32> {
        m.rows()
            .map(|row| row.iter().copied().fold(f32::NEG_INFINITY, f32::max))
            .collect()
    }

    /// Returns the maximum values of each column
    fn col_maxes(&self, m: &Matrix<f32>) -> Vec<f32> {
        m.cols()
            .map(|col| col.copied().fold(f32::NEG_INFINITY, f32::max))
            .collect()
    }

    /// Returns the dimenension of the `Matrix`, (rows, columns)
    fn dim_f32(&self, m: &Matrix<f32>) -> (f32, f32) {
        let (rows, cols) = m.dim();
        (usize_to_f32(rows), usize_to_f32(cols))
    }
}

/// Default implementations for combining similarity scores
/// for comparison of 2 sets of terms
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StandardCombiner {
    /// funSimAvg algorithm from [Schlicker A, et. al., BMC Bioinf (2006)](https://pubmed.ncbi.nlm.nih.gov/16776819/)
    ///
    /// The best-match average: each term of one set is matched with its best
    /// scoring term of the other set, the matches are averaged per direction
    /// and both directions are averaged.
    #[default]
    FunSimAvg,
    /// funSimMax algorithm from [Schlicker A, et. al., BMC Bioinf (2006)](https://pubmed.ncbi.nlm.nih.gov/16776819/)
    FunSimMax,
    /// BMA algorithm from [Wang JZ, et. al., Bioinformatics (2007)](https://pubmed.ncbi.nlm.nih.gov/17344234/)
    Bwa,
}

impl StandardCombiner {
    fn fun_sim_avg(&self, m: &Matrix<f32>) -> f32 {
        let (rows, cols) = self.dim_f32(m);
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);
        let mut nom = row_maxes.iter().sum::<f32>() / rows;
        nom += col_maxes.iter().sum::<f32>() / cols;

        nom / 2.0
    }

    fn fun_sim_max(&self, m: &Matrix<f32>) -> f32 {
        let (rows, cols) = self.dim_f32(m);
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);

        (row_maxes.iter().sum::<f32>() / rows).max(col_maxes.iter().sum::<f32>() / cols)
    }

    fn bwa(&self, m: &Matrix<f32>) -> f32 {
        let (rows, cols) = self.dim_f32(m);
        let row_maxes = self.row_maxes(m);
        let col_maxes = self.col_maxes(m);

        (row_maxes.iter().sum::<f32>() + col_maxes.iter().sum::<f32>()) / (rows + cols)
    }
}

impl SimilarityCombiner for StandardCombiner {
    fn combine(&self, m: &Matrix<f32>) -> f32 {
        match self {
            StandardCombiner::FunSimAvg => self.fun_sim_avg(m),
            StandardCombiner::FunSimMax => self.fun_sim_max(m),
            StandardCombiner::Bwa => self.bwa(m),
        }
    }
}

/// calculate the Similarity score between two sets of HPO terms
///
/// # Examples
///
/// ```
/// use hpo_similarity::similarity::{Builtins, GroupSimilarity, StandardCombiner};
/// use hpo_similarity::InformationContentKind;
///
/// // use the observed term counts for the information content
/// let resnik = Builtins::Resnik(InformationContentKind::Observed);
///
/// // use the funSimAvg algorithm to combine the similarity scores
/// let combiner = StandardCombiner::FunSimAvg;
///
/// let sim = GroupSimilarity::new(combiner, resnik);
/// ```
#[derive(Debug)]
pub struct GroupSimilarity<T, C> {
    combiner: C,
    similarity: T,
}

impl<T: Similarity, C: SimilarityCombiner> GroupSimilarity<T, C> {
    /// Constructs a new `GroupSimilarity` from a combiner and a term - term
    /// similarity algorithm
    pub fn new(combiner: C, similarity: T) -> Self {
        Self {
            combiner,
            similarity,
        }
    }

    /// calculates the similarity between two sets of terms
    ///
    /// The score is `0.0` if either set is empty
    pub fn calculate<G: OntologyGraph + ?Sized>(
        &self,
        engine: &SimilarityEngine<'_, G>,
        a: &HpoGroup,
        b: &HpoGroup,
    ) -> f32 {
        let mut v = Vec::with_capacity(a.len() * b.len());
        for t1 in a {
            for t2 in b {
                v.push(self.similarity.calculate(engine, t1.as_str(), t2.as_str()));
            }
        }
        Matrix::new(a.len(), b.len(), v).map_or(0.0, |m| self.combiner.calculate(&m))
    }
}

impl Default for GroupSimilarity<Builtins, StandardCombiner> {
    fn default() -> Self {
        Self {
            combiner: StandardCombiner::default(),
            similarity: Builtins::default(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn usize_to_f32(n: usize) -> f32 {
    n as f32
}

#[cfg(test)]
mod test {
    use super::*;

    fn matrix() -> Matrix<f32> {
        // rows: best matches 0.8 and 0.6
        // cols: best matches 0.8, 0.6 and 0.2
        Matrix::new(2, 3, vec![0.8, 0.1, 0.2, 0.3, 0.6, 0.0]).unwrap()
    }

    #[test]
    fn maxes() {
        let m = matrix();
        let c = StandardCombiner::default();
        assert_eq!(c.row_maxes(&m), vec![0.8, 0.6]);
        assert_eq!(c.col_maxes(&m), vec![0.8, 0.6, 0.2]);
    }

    #[test]
    fn fun_sim_avg() {
        let m = matrix();
        let score = StandardCombiner::FunSimAvg.calculate(&m);
        let expected = (1.4 / 2.0 + 1.6 / 3.0) / 2.0;
        assert!((score - expected).abs() < 1e-6, "{score}");
    }

    #[test]
    fn fun_sim_max() {
        let m = matrix();
        let score = StandardCombiner::FunSimMax.calculate(&m);
        assert!((score - 0.7).abs() < 1e-6, "{score}");
    }

    #[test]
    fn bwa() {
        let m = matrix();
        let score = StandardCombiner::Bwa.calculate(&m);
        assert!((score - 3.0 / 5.0).abs() < 1e-6, "{score}");
    }

    #[test]
    fn empty_matrix() {
        let m = Matrix::new(0, 3, vec![]).unwrap();
        assert!(StandardCombiner::FunSimAvg.calculate(&m).abs() < f32::EPSILON);
        assert!(StandardCombiner::Bwa.calculate(&m).abs() < f32::EPSILON);
    }
}
