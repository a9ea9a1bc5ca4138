//! Building an [`Ontology`](crate::Ontology) from source files

/// Module to parse `hp.obo` file
pub(crate) mod hp_obo;
