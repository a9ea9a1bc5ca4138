#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use thiserror::Error;

pub mod closure;
pub mod engine;
pub mod matrix;
pub mod ontology;
mod parser;
pub mod similarity;
pub mod tally;
pub mod term;
pub mod utils;

pub use closure::ClosureResolver;
pub use engine::SimilarityEngine;
pub use ontology::{Ontology, OntologyGraph};
pub use tally::FrequencyTally;
pub use term::{HpoGroup, HpoTerm, HpoTermId, InformationContentKind};

const DEFAULT_NUM_TERMS: usize = 20_000;

/// Main Error type for this crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HpoError {
    /// The term was never tallied, so it has no count and no information content
    #[error("term {0} has not been observed in the population")]
    NotFound(String),
    /// Term does not exist in the Ontology
    #[error("term does not exist")]
    DoesNotExist,
    /// The proband is not part of the population
    #[error("proband {0} is not part of the population")]
    UnknownProband(String),
    /// Failed to open a file
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// Input data is malformed
    #[error("invalid data: {0}")]
    InvalidInput(String),
}

/// Shortcut for `Result<T, HpoError>`
pub type HpoResult<T> = Result<T, HpoError>;
