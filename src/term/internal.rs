use crate::term::{HpoChildren, HpoParents};
use crate::HpoTermId;

/// The owned data of a single term, stored inside the
/// [`Ontology`](crate::Ontology)'s term arena
#[derive(Debug)]
pub(crate) struct HpoTermInternal {
    id: HpoTermId,
    name: String,
    parents: HpoParents,
    children: HpoChildren,
    obsolete: bool,
}

impl HpoTermInternal {
    pub fn new(name: String, id: HpoTermId) -> HpoTermInternal {
        HpoTermInternal {
            id,
            name,
            parents: HpoParents::new(),
            children: HpoChildren::new(),
            obsolete: false,
        }
    }

    pub fn id(&self) -> &HpoTermId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &HpoParents {
        &self.parents
    }

    pub fn children(&self) -> &HpoChildren {
        &self.children
    }

    pub fn add_parent<I: Into<HpoTermId>>(&mut self, parent_id: I) -> bool {
        self.parents.insert(parent_id)
    }

    pub fn add_child<I: Into<HpoTermId>>(&mut self, child_id: I) -> bool {
        self.children.insert(child_id)
    }

    pub fn obsolete(&self) -> bool {
        self.obsolete
    }

    pub fn obsolete_mut(&mut self) -> &mut bool {
        &mut self.obsolete
    }
}

impl PartialEq for HpoTermInternal {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for HpoTermInternal {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_term_does_not_allocate_edges() {
        let term = HpoTermInternal::new("All".to_string(), HpoTermId::from("HP:0000001"));
        assert_eq!(term.parents().capacity(), 0);
        assert_eq!(term.children().capacity(), 0);
    }

    #[test]
    fn edges_grow_on_demand() {
        let mut term = HpoTermInternal::new("Foo".to_string(), HpoTermId::from("HP:2"));
        assert!(term.add_parent("HP:1"));
        assert!(!term.add_parent("HP:1"));
        assert!(term.add_child("HP:3"));
        assert_eq!(term.parents().len(), 1);
        assert_eq!(term.children().len(), 1);
    }
}
