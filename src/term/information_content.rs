/// Different ways to derive the information content of a term from the
/// population's term counts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InformationContentKind {
    /// Uses only the count of the term itself
    ///
    /// `-ln(count(term) / total_freq)`. Terms that were never tallied
    /// have no information content.
    #[default]
    Observed,
    /// Uses the count of the term plus the counts of all its descendants
    ///
    /// An annotation with a specific term implies all of its ancestors,
    /// so general terms end up with a low information content.
    Propagated,
}

/// Calculates `-ln(count / total)`
///
/// Callers must ensure that `0 < count <= total`.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn information_content(count: u32, total: u32) -> f32 {
    debug_assert!(count > 0 && count <= total);
    let probability = f64::from(count) / f64::from(total);
    (-probability.ln()) as f32
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn single_term_population() {
        assert!(information_content(1, 1).abs() < f32::EPSILON);
    }

    #[test]
    fn rare_terms_are_more_informative() {
        let common = information_content(4, 5);
        let rare = information_content(1, 5);
        assert!(rare > common);
        assert!((rare - 5f32.ln()).abs() < 1e-6);
    }
}
