//! Inclusion vectors over a project set.

use std::fmt;

use super::types::{project_label, Criterion, ProjectSet};

/// A subset of projects, stored as one inclusion flag per project.
///
/// Totals are never cached on the combination itself; they are recomputed
/// from the [`ProjectSet`] it indexes into.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combination {
    bits: Vec<bool>,
}

impl Combination {
    /// The combination selecting nothing out of `n` projects.
    pub fn empty(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Builds a combination of `n` projects from 0-based selected indices.
    ///
    /// # Panics
    ///
    /// Panics if an index is `>= n`.
    pub fn from_indices(n: usize, indices: &[usize]) -> Self {
        let mut bits = vec![false; n];
        for &i in indices {
            bits[i] = true;
        }
        Self { bits }
    }

    /// Number of projects this combination ranges over (selected or not).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the combination ranges over zero projects.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The 0/1 vector form.
    pub fn to_vector(&self) -> Vec<u8> {
        self.bits.iter().map(|&b| u8::from(b)).collect()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn set(&mut self, index: usize, selected: bool) {
        self.bits[index] = selected;
    }

    /// 0-based indices of the selected projects, ascending.
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }

    pub fn selected_count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Total cost of the selected projects.
    pub fn cost(&self, projects: &ProjectSet) -> i64 {
        self.selected()
            .filter_map(|i| projects.get(i))
            .map(|p| p.cost())
            .sum()
    }

    /// Sum of `criterion` over the selected projects.
    pub fn total(&self, projects: &ProjectSet, criterion: Criterion) -> i64 {
        self.selected()
            .filter_map(|i| projects.get(i))
            .map(|p| p.value(criterion))
            .sum()
    }

    /// Sum of per-project normalized values over the selected projects.
    pub fn normalized_total(&self, normalized: &[f64]) -> f64 {
        self.selected().filter_map(|i| normalized.get(i)).sum()
    }

    /// Comma-separated labels of the selected projects, `"None"` if empty.
    ///
    /// ```
    /// use u_portfolio::model::Combination;
    ///
    /// assert_eq!(Combination::from_indices(4, &[0, 2]).labels(), "x1, x3");
    /// assert_eq!(Combination::empty(4).labels(), "None");
    /// ```
    pub fn labels(&self) -> String {
        let labels: Vec<String> = self.selected().map(project_label).collect();
        if labels.is_empty() {
            "None".to_string()
        } else {
            labels.join(", ")
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.labels())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ProjectSet {
        ProjectSet::from_triples(&[(2, 20, 4), (1, 30, 3), (3, 40, 2), (2, 20, 5)]).unwrap()
    }

    #[test]
    fn test_totals_are_recomputed_from_projects() {
        let projects = sample();
        let combo = Combination::from_indices(4, &[0, 1, 2]);
        assert_eq!(combo.cost(&projects), 6);
        assert_eq!(combo.total(&projects, Criterion::Profit), 90);
        assert_eq!(combo.total(&projects, Criterion::ExpertScore), 9);
    }

    #[test]
    fn test_empty_combination() {
        let projects = sample();
        let combo = Combination::empty(4);
        assert_eq!(combo.len(), 4);
        assert_eq!(combo.selected_count(), 0);
        assert_eq!(combo.cost(&projects), 0);
        assert_eq!(combo.to_vector(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_normalized_total() {
        let combo = Combination::from_indices(3, &[1, 2]);
        let norm = [0.5, 0.25, 0.125];
        assert!((combo.normalized_total(&norm) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_display_labels() {
        let combo = Combination::from_bits(vec![false, true, false, true]);
        assert_eq!(combo.to_string(), "x2, x4");
        assert_eq!(combo.selected().collect::<Vec<_>>(), vec![1, 3]);
    }
}
