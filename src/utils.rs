//! Utility structs and methods

/// Iterator of all one-way pairwise combinations of the inner slice
///
/// # Examples
/// ```
/// use hpo_similarity::utils::Combinations;
///
/// let data = [1, 2, 3];
/// let mut c = Combinations::new(&data);
///
/// assert_eq!(c.next(), Some((&1, &2)));
/// assert_eq!(c.next(), Some((&1, &3)));
/// assert_eq!(c.next(), Some((&2, &3)));
/// assert!(c.next().is_none());
/// ```
pub struct Combinations<'a, T> {
    inner: &'a [T],
    idx1: usize,
    idx2: usize,
}

impl<'a, T> Combinations<'a, T> {
    /// Creates a new Combinations iterator
    pub fn new(inner: &'a [T]) -> Self {
        Self {
            inner,
            idx1: 0,
            idx2: 1,
        }
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = (&'a T, &'a T);
    fn next(&mut self) -> Option<Self::Item> {
        while self.idx1 < self.inner.len() {
            if self.idx2 < self.inner.len() {
                let pair = (&self.inner[self.idx1], &self.inner[self.idx2]);
                self.idx2 += 1;
                return Some(pair);
            }
            self.idx1 += 1;
            self.idx2 = self.idx1 + 1;
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.inner.len();
        if self.idx1 >= n {
            return (0, Some(0));
        }
        // remaining pairs of the current row plus all following rows
        let current = n.saturating_sub(self.idx2);
        let rest = n - self.idx1 - 1;
        let following = rest * rest.saturating_sub(1) / 2;
        (current + following, Some(current + following))
    }
}

impl<T> ExactSizeIterator for Combinations<'_, T> {}
