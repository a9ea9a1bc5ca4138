//! The [`SimilarityEngine`] scores phenotype similarity of probands
//!
//! The engine owns the annotations of a population of probands and the
//! [`FrequencyTally`] derived from them. It borrows the ontology graph and
//! answers closure queries, information content lookups and similarity
//! scores on top of them.
use std::collections::BTreeMap;
use std::collections::btree_map::Keys;

use tracing::debug;

use crate::similarity::{GroupSimilarity, Resnik, Similarity, SimilarityCombiner};
use crate::term::information_content;
use crate::utils::Combinations;
use crate::{
    ClosureResolver, FrequencyTally, HpoError, HpoGroup, HpoResult, HpoTermId,
    InformationContentKind, OntologyGraph,
};

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Frequency-weighted semantic similarity of HPO-annotated probands
///
/// The information content of a term is derived from how often the
/// term is used to annotate the probands of the population:
/// `IC(term) = -ln(count(term) / total_freq)`.
///
/// ```mermaid
/// graph LR
///    A[annotations] -->|tally_all| T[FrequencyTally]
///    G[OntologyGraph] --> C[ClosureResolver]
///    T --> IC[information content]
///    C --> S[Similarity]
///    IC --> S
/// ```
///
/// # Examples
///
/// ```
/// use hpo_similarity::{Ontology, SimilarityEngine};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("All".into(), "HP:0000001");
/// ontology.insert_term("Phenotypic abnormality".into(), "HP:0000118");
/// ontology.insert_term("Abnormality of the nervous system".into(), "HP:0000707");
/// ontology.add_parent("HP:0000001", "HP:0000118").unwrap();
/// ontology.add_parent("HP:0000118", "HP:0000707").unwrap();
///
/// let engine = SimilarityEngine::new(
///     [
///         ("proband_1", vec!["HP:0000118"]),
///         ("proband_2", vec!["HP:0000707", "HP:0000707"]),
///     ],
///     &ontology,
/// );
///
/// assert_eq!(engine.total_freq(), 3);
/// assert_eq!(engine.count_of("HP:0000707").unwrap(), 2);
///
/// // `HP:0000001` was never used, it has no information content
/// assert!(engine.information_content("HP:0000001").is_err());
///
/// let ic = engine.information_content("HP:0000118").unwrap();
/// assert!((ic - 3f32.ln()).abs() < 1e-6);
///
/// // the most informative common ancestor is `HP:0000118`
/// let score = engine.term_similarity("HP:0000118", "HP:0000707");
/// assert!((score - ic).abs() < 1e-6);
/// ```
#[derive(Debug)]
pub struct SimilarityEngine<'a, G: ?Sized> {
    graph: &'a G,
    probands: BTreeMap<String, Vec<HpoTermId>>,
    tally: FrequencyTally,
}

impl<'a, G: OntologyGraph + ?Sized> SimilarityEngine<'a, G> {
    /// Constructs a new engine from the annotations of a population
    ///
    /// `annotations` maps each proband to the terms it is annotated with.
    /// Every term occurrence is tallied, duplicates included. Terms that are
    /// not part of the `graph` are stored with the proband but not tallied.
    /// If a proband occurs more than once, its term lists are concatenated.
    pub fn new<I, K, V, T>(annotations: I, graph: &'a G) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: IntoIterator<Item = T>,
        T: Into<HpoTermId>,
    {
        let mut probands: BTreeMap<String, Vec<HpoTermId>> = BTreeMap::new();
        for (proband, terms) in annotations {
            probands
                .entry(proband.into())
                .or_default()
                .extend(terms.into_iter().map(Into::into));
        }

        let mut tally = FrequencyTally::default();
        tally.tally_all(graph, probands.values());

        debug!(
            "Tallied {} annotations of {} probands into {} terms",
            tally.total_freq(),
            probands.len(),
            tally.len()
        );

        Self {
            graph,
            probands,
            tally,
        }
    }

    /// Returns the ontology graph
    pub fn graph(&self) -> &'a G {
        self.graph
    }

    /// Returns the term counts of the population
    pub fn tally(&self) -> &FrequencyTally {
        &self.tally
    }

    /// Records one more usage of the term
    ///
    /// Returns `false` and changes nothing if the term is not part of
    /// the graph.
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_similarity::{Ontology, SimilarityEngine};
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("All".into(), "HP:0000001");
    ///
    /// let annotations: Vec<(&str, Vec<&str>)> = vec![];
    /// let mut engine = SimilarityEngine::new(annotations, &ontology);
    ///
    /// assert!(engine.add_hpo("HP:0000001"));
    /// assert!(!engine.add_hpo("unknown_term"));
    /// assert_eq!(engine.total_freq(), 1);
    /// ```
    pub fn add_hpo(&mut self, id: &str) -> bool {
        self.tally.add_one(self.graph, id)
    }

    /// Returns how often the term was used
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] if the term was never tallied
    pub fn count_of(&self, id: &str) -> HpoResult<u32> {
        self.tally.count_of(id)
    }

    /// Returns the sum of all term counts
    pub fn total_freq(&self) -> u32 {
        self.tally.total_freq()
    }

    /// Returns all descendants of the term, see [`ClosureResolver::descendants_of`]
    pub fn descendants_of(&self, id: &str) -> HpoGroup {
        self.resolver().descendants_of(id)
    }

    /// Returns all ancestors of the term, see [`ClosureResolver::ancestors_of`]
    pub fn ancestors_of(&self, id: &str) -> HpoGroup {
        self.resolver().ancestors_of(id)
    }

    /// Returns the common ancestors, see [`ClosureResolver::common_ancestors_of`]
    pub fn common_ancestors_of(&self, a: &str, b: &str) -> HpoGroup {
        self.resolver().common_ancestors_of(a, b)
    }

    /// Returns the union of ancestors, see [`ClosureResolver::union_ancestors_of`]
    pub fn union_ancestors_of(&self, a: &str, b: &str) -> HpoGroup {
        self.resolver().union_ancestors_of(a, b)
    }

    /// Returns the [`InformationContentKind::Observed`] information content
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] if the term was never tallied
    pub fn information_content(&self, id: &str) -> HpoResult<f32> {
        self.information_content_of_kind(id, InformationContentKind::Observed)
    }

    /// Returns the information content of the term
    ///
    /// # Errors
    ///
    /// [`HpoError::NotFound`] if the count of the term is missing or `0`
    /// for the requested `kind`
    pub fn information_content_of_kind(
        &self,
        id: &str,
        kind: InformationContentKind,
    ) -> HpoResult<f32> {
        let count = match kind {
            InformationContentKind::Observed => self.tally.count_of(id)?,
            InformationContentKind::Propagated => self.propagated_count(id),
        };
        if count == 0 {
            return Err(HpoError::NotFound(id.to_string()));
        }
        Ok(information_content(count, self.tally.total_freq()))
    }

    /// Calculates the Resnik similarity of two terms, based on the
    /// [`InformationContentKind::Observed`] information content
    ///
    /// Unknown terms have a similarity of `0.0`.
    pub fn term_similarity(&self, a: &str, b: &str) -> f32 {
        self.term_similarity_with(a, b, &Resnik::new(InformationContentKind::Observed))
    }

    /// Calculates the similarity of two terms with a custom algorithm
    pub fn term_similarity_with<S: Similarity>(&self, a: &str, b: &str, similarity: &S) -> f32 {
        similarity.calculate(self, a, b)
    }

    /// Calculates the similarity of two sets of terms
    ///
    /// Terms that are not part of the graph are ignored, the same way
    /// as for [`SimilarityEngine::proband_similarity`]. The score is `0.0`
    /// if either set is empty.
    pub fn set_similarity<S, C>(
        &self,
        a: &HpoGroup,
        b: &HpoGroup,
        similarity: &GroupSimilarity<S, C>,
    ) -> f32
    where
        S: Similarity,
        C: SimilarityCombiner,
    {
        similarity.calculate(self, &self.known_terms(a), &self.known_terms(b))
    }

    /// Calculates the similarity of two probands of the population
    ///
    /// Terms that are not part of the graph are ignored, repeated terms
    /// are only considered once.
    ///
    /// # Errors
    ///
    /// [`HpoError::UnknownProband`] if either proband is not part of
    /// the population
    pub fn proband_similarity<S, C>(
        &self,
        a: &str,
        b: &str,
        similarity: &GroupSimilarity<S, C>,
    ) -> HpoResult<f32>
    where
        S: Similarity,
        C: SimilarityCombiner,
    {
        let group_a = self.proband_terms(a)?;
        let group_b = self.proband_terms(b)?;
        Ok(similarity.calculate(self, &group_a, &group_b))
    }

    /// Calculates the similarity of every one-way pair of probands
    ///
    /// The pairs are returned in the order of the proband ids.
    pub fn pairwise_proband_similarity<S, C>(
        &self,
        similarity: &GroupSimilarity<S, C>,
    ) -> Vec<(&str, &str, f32)>
    where
        S: Similarity,
        C: SimilarityCombiner,
    {
        let groups: Vec<(&str, HpoGroup)> = self
            .probands
            .iter()
            .map(|(id, terms)| (id.as_str(), self.known_terms(terms)))
            .collect();

        Combinations::new(&groups)
            .map(|((id_a, group_a), (id_b, group_b))| {
                (*id_a, *id_b, similarity.calculate(self, group_a, group_b))
            })
            .collect()
    }

    /// Iterates the ids of all probands, in order
    pub fn probands(&self) -> Keys<'_, String, Vec<HpoTermId>> {
        self.probands.keys()
    }

    /// Returns the terms of the proband as they were provided
    pub fn proband(&self, id: &str) -> Option<&[HpoTermId]> {
        self.probands.get(id).map(Vec::as_slice)
    }

    fn proband_terms(&self, id: &str) -> HpoResult<HpoGroup> {
        self.probands
            .get(id)
            .map(|terms| self.known_terms(terms))
            .ok_or_else(|| HpoError::UnknownProband(id.to_string()))
    }

    fn known_terms<'t, I>(&self, terms: I) -> HpoGroup
    where
        I: IntoIterator<Item = &'t HpoTermId>,
    {
        terms
            .into_iter()
            .filter(|term| self.graph.contains(term.as_str()))
            .collect()
    }

    fn propagated_count(&self, id: &str) -> u32 {
        let own = self.tally.get(id).unwrap_or_default();
        self.descendants_of(id)
            .iter()
            .filter_map(|term| self.tally.get(term.as_str()))
            .fold(own, |sum, count| sum + count)
    }

    fn resolver(&self) -> ClosureResolver<'a, G> {
        ClosureResolver::new(self.graph)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::similarity::{Builtins, Lin, StandardCombiner};
    use crate::Ontology;

    const EPS: f32 = 1e-6;

    /// ```text
    ///          HP:0000001
    ///         /          \
    ///   HP:0000005    HP:0000118
    ///                 /        \
    ///          HP:0000707    HP:0000924
    ///               |
    ///          HP:0002011
    /// ```
    fn ontology() -> Ontology {
        let mut ont = Ontology::default();
        ont.insert_term("All".into(), "HP:0000001");
        ont.insert_term("Mode of inheritance".into(), "HP:0000005");
        ont.insert_term("Phenotypic abnormality".into(), "HP:0000118");
        ont.insert_term("Abnormality of the nervous system".into(), "HP:0000707");
        ont.insert_term("Abnormality of the skeletal system".into(), "HP:0000924");
        ont.insert_term("Morphological central nervous system abnormality".into(), "HP:0002011");
        for (parent, child) in [
            ("HP:0000001", "HP:0000005"),
            ("HP:0000001", "HP:0000118"),
            ("HP:0000118", "HP:0000707"),
            ("HP:0000118", "HP:0000924"),
            ("HP:0000707", "HP:0002011"),
        ] {
            ont.add_parent(parent, child).unwrap();
        }
        ont
    }

    fn engine(ont: &Ontology) -> SimilarityEngine<'_, Ontology> {
        SimilarityEngine::new(
            [
                ("proband_1", vec!["HP:0000924", "HP:0000118", "HP:0002011"]),
                ("proband_2", vec!["HP:0000707", "HP:0002011"]),
                ("proband_3", vec!["unknown_term"]),
            ],
            ont,
        )
    }

    #[test]
    fn setup() {
        let ont = ontology();
        let engine = engine(&ont);
        assert_eq!(engine.count_of("HP:0000924").unwrap(), 1);
        assert_eq!(engine.count_of("HP:0000118").unwrap(), 1);
        assert_eq!(engine.count_of("HP:0002011").unwrap(), 2);
        assert_eq!(engine.count_of("HP:0000707").unwrap(), 1);
        assert!(engine.count_of("HP:0000001").is_err());
        assert!(engine.count_of("unknown_term").is_err());
        assert_eq!(engine.total_freq(), 5);
        assert_eq!(engine.probands().count(), 3);
    }

    #[test]
    fn duplicate_probands_are_merged() {
        let ont = ontology();
        let engine = SimilarityEngine::new(
            [("p", vec!["HP:0000118"]), ("p", vec!["HP:0000707"])],
            &ont,
        );
        assert_eq!(engine.probands().count(), 1);
        assert_eq!(engine.proband("p").unwrap().len(), 2);
        assert_eq!(engine.total_freq(), 2);
    }

    #[test]
    fn add_hpo() {
        let ont = ontology();
        let mut engine = engine(&ont);
        assert!(engine.add_hpo("HP:0000001"));
        assert_eq!(engine.count_of("HP:0000001").unwrap(), 1);
        assert_eq!(engine.total_freq(), 6);

        assert!(engine.add_hpo("HP:0000001"));
        assert_eq!(engine.count_of("HP:0000001").unwrap(), 2);
        assert_eq!(engine.total_freq(), 7);

        assert!(!engine.add_hpo("unknown_term"));
        assert_eq!(engine.total_freq(), 7);
    }

    #[test]
    fn information_content() {
        let ont = ontology();
        let engine = engine(&ont);
        for id in ["HP:0000924", "HP:0000118", "HP:0000707"] {
            let ic = engine.information_content(id).unwrap();
            assert!((ic - 5f32.ln()).abs() < EPS, "{id}: {ic}");
        }
        let ic = engine.information_content("HP:0002011").unwrap();
        assert!((ic - 2.5f32.ln()).abs() < EPS);

        assert!(matches!(
            engine.information_content("HP:0000001"),
            Err(HpoError::NotFound(_))
        ));
    }

    #[test]
    fn propagated_information_content() {
        let ont = ontology();
        let engine = engine(&ont);
        let kind = InformationContentKind::Propagated;

        let ic = engine.information_content_of_kind("HP:0000118", kind).unwrap();
        assert!(ic.abs() < EPS);

        let ic = engine.information_content_of_kind("HP:0000707", kind).unwrap();
        assert!((ic - (5f32 / 3f32).ln()).abs() < EPS);

        // the root is implied by every annotation
        let ic = engine.information_content_of_kind("HP:0000001", kind).unwrap();
        assert!(ic.abs() < EPS);

        assert!(engine.information_content_of_kind("HP:0000005", kind).is_err());
    }

    #[test]
    fn term_similarity() {
        let ont = ontology();
        let engine = engine(&ont);

        let score = engine.term_similarity("HP:0000924", "HP:0000707");
        assert!((score - 5f32.ln()).abs() < EPS);

        // only the untallied root is shared
        assert!(engine.term_similarity("HP:0000005", "HP:0000924").abs() < EPS);

        assert!(engine.term_similarity("unknown_term", "HP:0000924").abs() < EPS);

        let forward = engine.term_similarity("HP:0002011", "HP:0000924");
        let backward = engine.term_similarity("HP:0000924", "HP:0002011");
        assert!((forward - backward).abs() < EPS);
    }

    #[test]
    fn self_similarity() {
        let ont = ontology();
        let engine = engine(&ont);
        let score = engine.term_similarity("HP:0002011", "HP:0002011");
        assert!((score - 5f32.ln()).abs() < EPS);
    }

    #[test]
    fn lin() {
        let ont = ontology();
        let engine = engine(&ont);
        let lin = Lin::new(InformationContentKind::Observed);

        let score = engine.term_similarity_with("HP:0000924", "HP:0000707", &lin);
        assert!((score - 1.0).abs() < EPS);

        // root has no observed information content
        assert!(engine
            .term_similarity_with("HP:0000001", "HP:0000707", &lin)
            .abs()
            < EPS);
    }

    #[test]
    fn resnik_propagated() {
        let ont = ontology();
        let engine = engine(&ont);
        let resnik = Resnik::new(InformationContentKind::Propagated);

        // the most specific common ancestor HP:0000118 is implied by every annotation
        let score = engine.term_similarity_with("HP:0000924", "HP:0002011", &resnik);
        assert!(score.abs() < EPS);

        let score = engine.term_similarity_with("HP:0000707", "HP:0002011", &resnik);
        assert!((score - (5f32 / 3f32).ln()).abs() < EPS);

        let score = engine.term_similarity_with("HP:0002011", "HP:0002011", &resnik);
        assert!((score - 2.5f32.ln()).abs() < EPS);
    }

    #[test]
    fn lin_propagated() {
        let ont = ontology();
        let engine = engine(&ont);
        let lin = Builtins::Lin(InformationContentKind::Propagated);

        let ic_707 = (5f32 / 3f32).ln();
        let ic_2011 = 2.5f32.ln();
        let expected = 2.0 * ic_707 / (ic_707 + ic_2011);

        let score = engine.term_similarity_with("HP:0000707", "HP:0002011", &lin);
        assert!((score - expected).abs() < 1e-5, "{score}");

        assert!(engine
            .term_similarity_with("HP:0000924", "HP:0002011", &lin)
            .abs()
            < EPS);
    }

    #[test]
    fn set_similarity_bwa_lin() {
        let ont = ontology();
        let engine = engine(&ont);
        let sim = GroupSimilarity::new(
            StandardCombiner::Bwa,
            Builtins::Lin(InformationContentKind::Propagated),
        );

        let ic_707 = (5f32 / 3f32).ln();
        let ic_2011 = 2.5f32.ln();
        let lin_707_2011 = 2.0 * ic_707 / (ic_707 + ic_2011);

        // rows: [0.0, lin_707_2011], cols: [lin_707_2011]
        let a: HpoGroup = ["HP:0000924", "HP:0000707"].into_iter().collect();
        let b: HpoGroup = ["HP:0002011"].into_iter().collect();
        let score = engine.set_similarity(&a, &b, &sim);
        assert!((score - 2.0 * lin_707_2011 / 3.0).abs() < 1e-5, "{score}");
    }

    #[test]
    fn set_similarity_ignores_unknown_terms() {
        let ont = ontology();
        let engine = SimilarityEngine::new(
            [
                ("p1", vec!["HP:0000924", "unknown_term"]),
                ("p2", vec!["HP:0000707"]),
            ],
            &ont,
        );
        let sim: GroupSimilarity<Builtins, StandardCombiner> = GroupSimilarity::default();

        let a: HpoGroup = ["HP:0000924", "unknown_term"].into_iter().collect();
        let b: HpoGroup = ["HP:0000707"].into_iter().collect();
        let known: HpoGroup = ["HP:0000924"].into_iter().collect();

        let set_score = engine.set_similarity(&a, &b, &sim);
        let proband_score = engine.proband_similarity("p1", "p2", &sim).unwrap();
        assert!((set_score - proband_score).abs() < EPS);
        assert!((set_score - engine.set_similarity(&known, &b, &sim)).abs() < EPS);
    }

    #[test]
    fn set_similarity() {
        let ont = ontology();
        let engine = engine(&ont);
        let sim: GroupSimilarity<Builtins, StandardCombiner> = GroupSimilarity::default();

        let a: HpoGroup = ["HP:0000924"].into_iter().collect();
        let b: HpoGroup = ["HP:0000707"].into_iter().collect();
        let score = engine.set_similarity(&a, &b, &sim);
        assert!((score - 5f32.ln()).abs() < EPS);

        let empty = HpoGroup::new();
        assert!(engine.set_similarity(&a, &empty, &sim).abs() < EPS);
        assert!(engine.set_similarity(&empty, &empty, &sim).abs() < EPS);
    }

    #[test]
    fn proband_similarity() {
        let ont = ontology();
        let engine = engine(&ont);
        let sim: GroupSimilarity<Builtins, StandardCombiner> = GroupSimilarity::default();

        let score = engine
            .proband_similarity("proband_1", "proband_2", &sim)
            .unwrap();
        assert!((score - 5f32.ln()).abs() < EPS);

        // proband_3 has no known terms
        let score = engine
            .proband_similarity("proband_1", "proband_3", &sim)
            .unwrap();
        assert!(score.abs() < EPS);

        assert!(matches!(
            engine.proband_similarity("proband_1", "nobody", &sim),
            Err(HpoError::UnknownProband(id)) if id == "nobody"
        ));
    }

    #[test]
    fn pairwise_proband_similarity() {
        let ont = ontology();
        let engine = engine(&ont);
        let sim = GroupSimilarity::new(
            StandardCombiner::FunSimMax,
            Builtins::Resnik(InformationContentKind::Observed),
        );

        let scores = engine.pairwise_proband_similarity(&sim);
        let pairs: Vec<(&str, &str)> = scores.iter().map(|(a, b, _)| (*a, *b)).collect();
        assert_eq!(
            pairs,
            vec![
                ("proband_1", "proband_2"),
                ("proband_1", "proband_3"),
                ("proband_2", "proband_3"),
            ]
        );
        for (a, b, score) in scores {
            let single = engine.proband_similarity(a, b, &sim).unwrap();
            assert!((score - single).abs() < EPS);
        }
    }
}
