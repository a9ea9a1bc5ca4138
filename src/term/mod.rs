//! [`HpoTermId`]s, sets of them ([`HpoGroup`]) and borrowed views of
//! single terms of an [`Ontology`](crate::Ontology) ([`HpoTerm`])

mod group;
mod hpoterm;
mod hpotermid;
mod information_content;
pub(crate) mod internal;

pub use group::HpoGroup;
pub use hpoterm::HpoTerm;
pub use hpotermid::HpoTermId;
pub use information_content::InformationContentKind;
pub(crate) use information_content::information_content;

/// The direct parents of a term
pub type HpoParents = HpoGroup;

/// The direct children of a term
pub type HpoChildren = HpoGroup;
