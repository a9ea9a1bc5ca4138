use core::fmt::Debug;
use std::borrow::Borrow;
use std::fmt::Display;

/// The identifier of a single concept of the ontology, e.g. `HP:0000118`
///
/// The identifier is treated as an opaque string. It is not checked for
/// the `HP:nnnnnnn` format, the only thing that matters is whether an
/// [`OntologyGraph`](crate::OntologyGraph) knows about it.
///
/// `HpoTermId` borrows as `str`, so maps and sets keyed by it can be
/// queried with plain string slices.
///
/// # Examples
///
/// ```
/// use hpo_similarity::HpoTermId;
///
/// let id = HpoTermId::from("HP:0000118");
/// assert_eq!(id.as_str(), "HP:0000118");
/// assert_eq!(id, "HP:0000118");
/// assert_eq!(id.to_string(), "HP:0000118");
/// ```
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct HpoTermId {
    inner: String,
}

impl HpoTermId {
    /// Returns the identifier as string slice
    pub fn as_str(&self) -> &str {
        &self.inner
    }
}

impl From<&str> for HpoTermId {
    fn from(s: &str) -> Self {
        Self {
            inner: s.to_string(),
        }
    }
}

impl From<String> for HpoTermId {
    fn from(inner: String) -> Self {
        Self { inner }
    }
}

impl From<&String> for HpoTermId {
    fn from(s: &String) -> Self {
        Self { inner: s.clone() }
    }
}

impl From<&HpoTermId> for HpoTermId {
    fn from(id: &HpoTermId) -> Self {
        id.clone()
    }
}

impl Borrow<str> for HpoTermId {
    fn borrow(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for HpoTermId {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Debug for HpoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HpoTermId({self})")
    }
}

impl Display for HpoTermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl PartialEq<str> for HpoTermId {
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl PartialEq<&str> for HpoTermId {
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}
