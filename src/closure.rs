//! Ancestor and descendant closures over an [`OntologyGraph`]
use std::collections::HashSet;

use smallvec::SmallVec;

use crate::{HpoGroup, HpoTermId, OntologyGraph};

/// Traversals rarely need a deeper stack than this
const STACK_SIZE: usize = 32;

#[derive(Clone, Copy)]
enum Direction {
    Parents,
    Children,
}

/// Computes transitive closures of concepts in a DAG
///
/// All queries are pure functions of the graph. The traversal uses an
/// explicit stack and a visited set, so terms that are reachable via
/// multiple paths are visited once and deep ontologies don't overflow the
/// call stack. Results are not cached.
///
/// Unknown ids are not an error, they simply have no ancestors and
/// no descendants.
///
/// # Examples
///
/// ```
/// use hpo_similarity::{ClosureResolver, Ontology};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("All".into(), "HP:0000001");
/// ontology.insert_term("Phenotypic abnormality".into(), "HP:0000118");
/// ontology.add_parent("HP:0000001", "HP:0000118").unwrap();
///
/// let resolver = ClosureResolver::new(&ontology);
///
/// let ancestors = resolver.ancestors_of("HP:0000118");
/// assert!(ancestors.contains("HP:0000001"));
/// assert!(ancestors.contains("HP:0000118"));
///
/// assert!(resolver.descendants_of("HP:0000118").is_empty());
/// assert!(resolver.ancestors_of("HP:9999999").is_empty());
/// ```
#[derive(Debug)]
pub struct ClosureResolver<'a, G: ?Sized> {
    graph: &'a G,
}

impl<G: ?Sized> Clone for ClosureResolver<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: ?Sized> Copy for ClosureResolver<'_, G> {}

impl<'a, G: OntologyGraph + ?Sized> ClosureResolver<'a, G> {
    /// Constructs a new resolver for `graph`
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    /// Returns all terms reachable via child edges, excluding `id` itself
    ///
    /// Leaf terms and unknown terms have no descendants.
    pub fn descendants_of(&self, id: &str) -> HpoGroup {
        if !self.graph.contains(id) {
            return HpoGroup::new();
        }
        let mut descendants = self.reachable(id, Direction::Children);
        // a graph with a self-loop or a cycle leads back to `id`
        descendants.remove(id);
        descendants.into_iter().collect()
    }

    /// Returns all terms reachable via parent edges, including `id` itself
    ///
    /// A root term is its own only ancestor. Unknown terms have no ancestors.
    pub fn ancestors_of(&self, id: &str) -> HpoGroup {
        if !self.graph.contains(id) {
            return HpoGroup::new();
        }
        let mut ancestors = self.reachable(id, Direction::Parents);
        ancestors.insert(id);
        ancestors.into_iter().collect()
    }

    /// Returns the terms that are ancestors of both `a` **and** `b`
    ///
    /// The result is empty if either term is unknown. A term is always a
    /// common ancestor of itself with itself.
    pub fn common_ancestors_of(&self, a: &str, b: &str) -> HpoGroup {
        if a == b {
            return self.ancestors_of(a);
        }
        &self.ancestors_of(a) & &self.ancestors_of(b)
    }

    /// Returns the terms that are ancestors of either `a` **or** `b`
    pub fn union_ancestors_of(&self, a: &str, b: &str) -> HpoGroup {
        &self.ancestors_of(a) | &self.ancestors_of(b)
    }

    /// Returns `true` if `ancestor` is a direct or indirect parent of `id`
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        ancestor != id && self.ancestors_of(id).contains(ancestor)
    }

    /// Depth-first traversal from `id`, not including `id`
    fn reachable<'s>(&self, id: &'s str, direction: Direction) -> HashSet<&'s str>
    where
        'a: 's,
    {
        let mut visited: HashSet<&'s str> = HashSet::new();
        let mut stack: SmallVec<[&'a HpoTermId; STACK_SIZE]> =
            self.neighbours(id, direction).iter().collect();

        while let Some(term) = stack.pop() {
            if visited.insert(term.as_str()) {
                stack.extend(self.neighbours(term.as_str(), direction).iter());
            }
        }
        visited
    }

    fn neighbours(&self, id: &str, direction: Direction) -> &'a HpoGroup {
        let graph: &'a G = self.graph;
        match direction {
            Direction::Parents => graph.parents_of(id),
            Direction::Children => graph.children_of(id),
        }
    }
}
