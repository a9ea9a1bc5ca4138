use crate::term::internal::HpoTermInternal;
use crate::term::{HpoChildren, HpoParents};
use crate::HpoError;
use crate::HpoResult;
use crate::HpoTermId;
use crate::Ontology;

/// The `HpoTerm` is a borrowed view of a single term of an [`Ontology`]
///
/// It exposes the term's name and its direct relationships. Transitive
/// queries (ancestors, descendants) are handled by the
/// [`ClosureResolver`](crate::ClosureResolver).
#[derive(Debug, Clone, Copy)]
pub struct HpoTerm<'a> {
    id: &'a HpoTermId,
    name: &'a str,
    parents: &'a HpoParents,
    children: &'a HpoChildren,
    obsolete: bool,
}

impl<'a> HpoTerm<'a> {
    /// Constructs a new [`HpoTerm`]
    ///
    /// # Errors
    ///
    /// If the given id does not match an existing term
    /// it returns [`HpoError::DoesNotExist`]
    pub fn try_new(ontology: &'a Ontology, term: &str) -> HpoResult<HpoTerm<'a>> {
        let term = ontology.get(term).ok_or(HpoError::DoesNotExist)?;
        Ok(HpoTerm::new(term))
    }

    pub(crate) fn new(term: &'a HpoTermInternal) -> HpoTerm<'a> {
        HpoTerm {
            id: term.id(),
            name: term.name(),
            parents: term.parents(),
            children: term.children(),
            obsolete: term.obsolete(),
        }
    }

    /// Returns the [`HpoTermId`] of the term
    ///
    /// e.g.: `HP:0012345`
    pub fn id(&self) -> &'a HpoTermId {
        self.id
    }

    /// Returns the name of the term
    ///
    /// e.g.: `Abnormality of the nervous system`
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Returns the [`HpoTermId`]s of the direct parents
    pub fn parent_ids(&self) -> &'a HpoParents {
        self.parents
    }

    /// Returns the [`HpoTermId`]s of the direct children
    pub fn children_ids(&self) -> &'a HpoChildren {
        self.children
    }

    /// Returns `true` if the term has no parents
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Returns `true` if the term has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if the term is flagged as obsolete
    pub fn is_obsolete(&self) -> bool {
        self.obsolete
    }
}

impl PartialEq for HpoTerm<'_> {
    fn eq(&self, other: &HpoTerm) -> bool {
        self.id == other.id
    }
}

impl Eq for HpoTerm<'_> {}
