//! The in-memory [`Ontology`] and the [`OntologyGraph`] trait it implements
use core::fmt::Debug;
use std::path::Path;

use crate::parser;
use crate::term::internal::HpoTermInternal;
use crate::term::{HpoChildren, HpoGroup, HpoParents, HpoTerm};
use crate::{HpoError, HpoResult, HpoTermId};

mod termarena;
use termarena::Arena;

/// Returned for parents and children of terms that are not part of a graph
static EMPTY_GROUP: HpoGroup = HpoGroup::new();

/// Read access to a directed acyclic graph of concepts
///
/// Edges encode `is_a` relationships from child to parent. A concept can
/// have multiple parents. The graph is built once and only read afterwards.
///
/// This is the only interface the [`ClosureResolver`](crate::ClosureResolver)
/// and the [`SimilarityEngine`](crate::SimilarityEngine) need, so any
/// ontology representation can be plugged in. The crate provides
/// [`Ontology`] as the default implementation.
pub trait OntologyGraph {
    /// Returns `true` if `id` names a known concept
    fn contains(&self, id: &str) -> bool;

    /// Returns the direct parents of `id`
    ///
    /// The group is empty for root concepts and for unknown ids
    fn parents_of(&self, id: &str) -> &HpoParents;

    /// Returns the direct children of `id`
    ///
    /// The group is empty for leaf concepts and for unknown ids
    fn children_of(&self, id: &str) -> &HpoChildren;
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// `Ontology` is the in-memory representation of the HP Ontology
///
/// It holds all terms and their direct `is_a` relationships and implements
/// [`OntologyGraph`].
///
/// # Examples
///
/// ```
/// use hpo_similarity::{Ontology, OntologyGraph};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("All".into(), "HP:0000001");
/// ontology.insert_term("Phenotypic abnormality".into(), "HP:0000118");
/// ontology.add_parent("HP:0000001", "HP:0000118").unwrap();
///
/// assert_eq!(ontology.len(), 2);
/// assert!(ontology.contains("HP:0000118"));
/// assert!(!ontology.contains("HP:9999999"));
///
/// let term = ontology.hpo("HP:0000118").unwrap();
/// assert_eq!(term.name(), "Phenotypic abnormality");
/// assert!(term.parent_ids().contains("HP:0000001"));
/// ```
///
/// # Construction
///
/// 1. Parse an OBO file using [`Ontology::from_obo_file`] or OBO data
///     using [`Ontology::from_obo_str`]
/// 2. Build it manually:
///     1. construct an empty Ontology [`Ontology::default`]
///     2. Add all terms [`Ontology::insert_term`]
///     3. Connect terms to their parents [`Ontology::add_parent`]
///
/// # Example ontology
///
/// The tests and examples of this crate use the following small
/// ontology:
///
/// ```mermaid
/// graph TD
/// HP:0000001["HP:0000001<br>
/// All"]
/// HP:0000001 --> HP:0000005
/// HP:0000001 --> HP:0000118
/// HP:0000005["HP:0000005<br>
/// Mode of inheritance"]
/// HP:0000118["HP:0000118<br>
/// Phenotypic abnormality"]
/// HP:0000118 --> HP:0000707
/// HP:0000118 --> HP:0000924
/// HP:0000707["HP:0000707<br>
/// Abnormality of the nervous system"]
/// HP:0000707 --> HP:0002011
/// HP:0000924["HP:0000924<br>
/// Abnormality of the skeletal system"]
/// HP:0002011["HP:0002011<br>
/// Morphological central nervous system abnormality"]
/// ```
#[derive(Default)]
pub struct Ontology {
    hpo_terms: Arena,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.hpo_terms.len())
    }
}

/// Public API of the Ontology
impl Ontology {
    /// Builds an Ontology from the content of an OBO file
    ///
    /// Only `[Term]` stanzas are used. From each stanza the `id`, `name`,
    /// `is_a` and `is_obsolete` tags are read.
    ///
    /// # Errors
    ///
    /// - An `is_a` tag points to a term that is not defined: [`HpoError::InvalidInput`]
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_similarity::{Ontology, OntologyGraph};
    ///
    /// let obo = "[Term]
    /// id: HP:0000001
    /// name: All
    ///
    /// [Term]
    /// id: HP:0000118
    /// name: Phenotypic abnormality
    /// is_a: HP:0000001 ! All
    /// ";
    ///
    /// let ontology = Ontology::from_obo_str(obo).unwrap();
    /// assert_eq!(ontology.len(), 2);
    /// assert!(ontology.parents_of("HP:0000118").contains("HP:0000001"));
    /// ```
    pub fn from_obo_str(content: &str) -> HpoResult<Self> {
        let mut ont = Ontology::default();
        parser::hp_obo::read_obo_str(content, &mut ont)?;
        Ok(ont)
    }

    /// Builds an Ontology from an OBO file, e.g. `hp.obo`
    ///
    /// See [`Ontology::from_obo_str`] for details
    ///
    /// # Errors
    ///
    /// - obo file not present or not readable: [`HpoError::CannotOpenFile`]
    /// - An `is_a` tag points to a term that is not defined: [`HpoError::InvalidInput`]
    pub fn from_obo_file<P: AsRef<Path>>(filename: P) -> HpoResult<Self> {
        let mut ont = Ontology::default();
        parser::hp_obo::read_obo_file(filename, &mut ont)?;
        Ok(ont)
    }

    /// Returns the number of HPO-Terms in the Ontology
    pub fn len(&self) -> usize {
        self.hpo_terms.len()
    }

    /// Returns `true` if the Ontology does not contain any HPO-Terms
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_similarity::Ontology;
    /// let ontology = Ontology::default();
    /// assert!(ontology.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the [`HpoTerm`] of the provided id
    ///
    /// If no such term is present in the Ontolgy, `None` is returned
    pub fn hpo(&self, term_id: &str) -> Option<HpoTerm<'_>> {
        HpoTerm::try_new(self, term_id).ok()
    }

    /// Returns an Iterator of all [`HpoTerm`]s from the Ontology
    ///
    /// The iteration order is arbitrary
    pub fn hpos(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Returns all terms without parents
    pub fn roots(&self) -> HpoGroup {
        self.hpos()
            .filter(HpoTerm::is_root)
            .map(|term| term.id())
            .collect()
    }

    /// Crates and inserts a new term to the ontology
    ///
    /// This method does not link the term to its parents. If a term with
    /// the same id exists already, it is left untouched and `false`
    /// is returned.
    pub fn insert_term<I: Into<HpoTermId>>(&mut self, name: String, id: I) -> bool {
        self.hpo_terms.insert(HpoTermInternal::new(name, id.into()))
    }

    /// Add a connection from a term to its parent
    ///
    /// # Errors
    ///
    /// If `parent_id` or `child_id` is not present in the Ontology,
    /// [`HpoError::DoesNotExist`] is returned and nothing is changed.
    ///
    /// A term cannot be its own parent: [`HpoError::InvalidInput`]
    ///
    /// # Examples
    ///
    /// ```
    /// use hpo_similarity::{Ontology, OntologyGraph};
    ///
    /// let mut ontology = Ontology::default();
    /// ontology.insert_term("Foo".into(), "HP:1");
    /// ontology.insert_term("Bar".into(), "HP:2");
    ///
    /// ontology.add_parent("HP:1", "HP:2").unwrap();
    /// assert!(ontology.add_parent("HP:1", "HP:3").is_err());
    /// assert!(ontology.add_parent("HP:2", "HP:2").is_err());
    ///
    /// assert!(ontology.parents_of("HP:2").contains("HP:1"));
    /// assert!(ontology.children_of("HP:1").contains("HP:2"));
    /// ```
    pub fn add_parent(&mut self, parent_id: &str, child_id: &str) -> HpoResult<()> {
        if parent_id == child_id {
            return Err(HpoError::InvalidInput(format!(
                "{child_id} cannot be its own parent"
            )));
        }
        if !self.hpo_terms.contains(parent_id) || !self.hpo_terms.contains(child_id) {
            return Err(HpoError::DoesNotExist);
        }

        self.get_mut(parent_id)
            .ok_or(HpoError::DoesNotExist)?
            .add_child(child_id);
        self.get_mut(child_id)
            .ok_or(HpoError::DoesNotExist)?
            .add_parent(parent_id);
        Ok(())
    }

    /// Flags the term as obsolete
    ///
    /// Obsolete terms stay part of the graph
    ///
    /// # Errors
    ///
    /// If the term is not present: [`HpoError::DoesNotExist`]
    pub fn set_obsolete(&mut self, term_id: &str) -> HpoResult<()> {
        *self
            .get_mut(term_id)
            .ok_or(HpoError::DoesNotExist)?
            .obsolete_mut() = true;
        Ok(())
    }

    /// Returns the code to crate a `Mermaid` flow diagram
    ///
    /// This is meant to be used with small ontologies
    pub fn as_mermaid(&self) -> String {
        let mut terms: Vec<HpoTerm> = self.hpos().collect();
        terms.sort_by(|a, b| a.id().cmp(b.id()));

        let mut code = String::new();
        code.push_str("graph TD\n");
        for term in terms {
            code.push_str(&format!("{}[\"{}<br>\n{}\"]\n", term.id(), term.id(), term.name()));
            for child in term.children_ids() {
                code.push_str(&format!("{} --> {}\n", term.id(), child));
            }
        }
        code
    }
}

/// Crate-only functions
impl Ontology {
    /// Returns the `HpoTermInternal` with the given id
    ///
    /// Returns `None` if no such term is present
    pub(crate) fn get(&self, term_id: &str) -> Option<&HpoTermInternal> {
        self.hpo_terms.get(term_id)
    }

    fn get_mut(&mut self, term_id: &str) -> Option<&mut HpoTermInternal> {
        self.hpo_terms.get_mut(term_id)
    }
}

impl OntologyGraph for Ontology {
    fn contains(&self, id: &str) -> bool {
        self.hpo_terms.contains(id)
    }

    fn parents_of(&self, id: &str) -> &HpoParents {
        self.get(id).map_or(&EMPTY_GROUP, HpoTermInternal::parents)
    }

    fn children_of(&self, id: &str) -> &HpoChildren {
        self.get(id).map_or(&EMPTY_GROUP, HpoTermInternal::children)
    }
}

/// Iterates the Ontology and yields [`HpoTerm`]s
pub struct Iter<'a> {
    inner: std::collections::hash_map::Values<'a, HpoTermId, HpoTermInternal>,
}

impl<'a> std::iter::Iterator for Iter<'a> {
    type Item = HpoTerm<'a>;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(HpoTerm::new)
    }
}

impl<'a> IntoIterator for &'a Ontology {
    type Item = HpoTerm<'a>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.hpo_terms.values(),
        }
    }
}
