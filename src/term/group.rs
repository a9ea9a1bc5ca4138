use std::cmp::Ordering;
use std::ops::{BitAnd, BitOr};

use crate::HpoTermId;

/// A set of [`HpoTermId`] representing a group of HPO terms
///
/// Each term can occur only once in the group. The ids are kept sorted,
/// which makes membership tests, intersections and unions cheap and
/// gives the group a deterministic iteration order.
///
/// This group is used e.g. for direct parents and children of a term and
/// for the results of all ancestor and descendant queries.
///
/// # Examples
///
/// ```
/// use hpo_similarity::HpoGroup;
///
/// let mut group = HpoGroup::new();
/// assert!(group.insert("HP:0000118"));
/// assert!(group.insert("HP:0000001"));
/// assert!(!group.insert("HP:0000118"));
///
/// assert_eq!(group.len(), 2);
/// assert!(group.contains("HP:0000001"));
///
/// let ids: Vec<&str> = group.iter().map(|id| id.as_str()).collect();
/// assert_eq!(ids, vec!["HP:0000001", "HP:0000118"]);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HpoGroup {
    ids: Vec<HpoTermId>,
}

impl HpoGroup {
    /// Constructs a new, empty [`HpoGroup`]
    #[must_use]
    pub const fn new() -> Self {
        Self { ids: Vec::new() }
    }

    /// Constructs a new, empty [`HpoGroup`] with the given capacity
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
        }
    }

    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.ids.capacity()
    }

    /// Returns `true` if the group contains no [`HpoTermId`]s
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns the number of [`HpoTermId`]s in the group
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Adds a new [`HpoTermId`] to the group
    ///
    /// Returns whether the `HpoTermId` was newly inserted. That is:
    ///
    /// - If the group did not previously contain this `HpoTermId`, true is returned.
    /// - If the group already contained this `HpoTermId`, false is returned.
    ///
    pub fn insert<I: Into<HpoTermId>>(&mut self, id: I) -> bool {
        let id = id.into();
        match self.position(id.as_str()) {
            Ok(_) => false,
            Err(idx) => {
                self.ids.insert(idx, id);
                true
            }
        }
    }

    /// Removes the [`HpoTermId`] from the group
    ///
    /// Returns whether the id was present
    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Ok(idx) => {
                self.ids.remove(idx);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns `true` if the group contains the [`HpoTermId`]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_ok()
    }

    /// Returns an Iterator of the [`HpoTermId`]s inside the group
    pub fn iter(&self) -> std::slice::Iter<'_, HpoTermId> {
        self.ids.iter()
    }

    fn position(&self, id: &str) -> Result<usize, usize> {
        self.ids.binary_search_by(|probe| probe.as_str().cmp(id))
    }

    /// Builds a group from ids that are already sorted and unique
    fn from_sorted(ids: Vec<HpoTermId>) -> Self {
        debug_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        Self { ids }
    }
}

impl FromIterator<HpoTermId> for HpoGroup {
    fn from_iter<T: IntoIterator<Item = HpoTermId>>(iter: T) -> Self {
        let mut ids: Vec<HpoTermId> = iter.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self::from_sorted(ids)
    }
}

impl<'a> FromIterator<&'a HpoTermId> for HpoGroup {
    fn from_iter<T: IntoIterator<Item = &'a HpoTermId>>(iter: T) -> Self {
        iter.into_iter().cloned().collect()
    }
}

impl<'a> FromIterator<&'a str> for HpoGroup {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        iter.into_iter().map(HpoTermId::from).collect()
    }
}

impl<'a> IntoIterator for &'a HpoGroup {
    type Item = &'a HpoTermId;
    type IntoIter = std::slice::Iter<'a, HpoTermId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}

impl IntoIterator for HpoGroup {
    type Item = HpoTermId;
    type IntoIter = std::vec::IntoIter<HpoTermId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.into_iter()
    }
}

impl BitOr for &HpoGroup {
    type Output = HpoGroup;

    fn bitor(self, rhs: &HpoGroup) -> HpoGroup {
        let mut ids = Vec::with_capacity(self.len() + rhs.len());
        let mut left = self.ids.iter().peekable();
        let mut right = rhs.ids.iter().peekable();

        loop {
            let order = match (left.peek(), right.peek()) {
                (Some(l), Some(r)) => l.cmp(r),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => break,
            };
            let next = match order {
                Ordering::Less => left.next(),
                Ordering::Greater => right.next(),
                Ordering::Equal => {
                    right.next();
                    left.next()
                }
            };
            if let Some(id) = next {
                ids.push(id.clone());
            }
        }
        HpoGroup::from_sorted(ids)
    }
}

impl BitAnd for &HpoGroup {
    type Output = HpoGroup;

    fn bitand(self, rhs: &HpoGroup) -> HpoGroup {
        let mut ids = Vec::with_capacity(self.len().min(rhs.len()));
        let mut left = self.ids.iter();
        let mut right = rhs.ids.iter();
        let mut l = left.next();
        let mut r = right.next();

        while let (Some(a), Some(b)) = (l, r) {
            match a.cmp(b) {
                Ordering::Less => l = left.next(),
                Ordering::Greater => r = right.next(),
                Ordering::Equal => {
                    ids.push(a.clone());
                    l = left.next();
                    r = right.next();
                }
            }
        }
        HpoGroup::from_sorted(ids)
    }
}
