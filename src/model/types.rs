//! Projects, project sets and the criteria they are scored on.

use std::fmt;

use crate::error::{PortfolioError, Result};

/// A secondary criterion a project is scored on (cost is the constraint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Criterion {
    /// Monetary return of a project.
    Profit,
    /// Score assigned by domain experts.
    ExpertScore,
}

impl Criterion {
    /// Both criteria, in column order.
    pub const ALL: [Criterion; 2] = [Criterion::Profit, Criterion::ExpertScore];

    /// Returns the complementary criterion.
    pub fn other(self) -> Criterion {
        match self {
            Criterion::Profit => Criterion::ExpertScore,
            Criterion::ExpertScore => Criterion::Profit,
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Criterion::Profit => "profit",
            Criterion::ExpertScore => "expert score",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Validates that `primary` and `secondary` are the two distinct criteria.
pub fn check_complementary(primary: Criterion, secondary: Criterion) -> Result<()> {
    if primary.other() == secondary {
        Ok(())
    } else {
        Err(PortfolioError::CriteriaNotComplementary { primary, secondary })
    }
}

/// Largest cost or criterion value a [`Project`] accepts.
///
/// Keeps every square and every per-combination sum inside `i64`.
pub const MAX_PROJECT_VALUE: i64 = i32::MAX as i64;

/// A candidate project: its cost and its two criterion values.
///
/// Fields are private so every `Project` in existence has passed
/// validation: positive cost, non-negative criterion values, nothing
/// above [`MAX_PROJECT_VALUE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ProjectRecord"))]
pub struct Project {
    cost: i64,
    profit: i64,
    expert_score: i64,
}

impl Project {
    /// Creates a project.
    ///
    /// The returned errors report index 0; use [`ProjectSet::from_triples`]
    /// to get the project's position in the error.
    ///
    /// # Errors
    ///
    /// [`PortfolioError::NonPositiveCost`] if `cost < 1`,
    /// [`PortfolioError::NegativeCriterion`] if a criterion value is negative,
    /// [`PortfolioError::ValueTooLarge`] above [`MAX_PROJECT_VALUE`].
    pub fn new(cost: i64, profit: i64, expert_score: i64) -> Result<Self> {
        Self::validated(0, cost, profit, expert_score)
    }

    fn validated(index: usize, cost: i64, profit: i64, expert_score: i64) -> Result<Self> {
        if cost < 1 {
            return Err(PortfolioError::NonPositiveCost { index, cost });
        }
        for (criterion, value) in [
            (Criterion::Profit, profit),
            (Criterion::ExpertScore, expert_score),
        ] {
            if value < 0 {
                return Err(PortfolioError::NegativeCriterion {
                    index,
                    criterion,
                    value,
                });
            }
        }
        for (field, value) in [
            ("cost", cost),
            (Criterion::Profit.name(), profit),
            (Criterion::ExpertScore.name(), expert_score),
        ] {
            if value > MAX_PROJECT_VALUE {
                return Err(PortfolioError::ValueTooLarge {
                    index,
                    field,
                    value,
                    limit: MAX_PROJECT_VALUE,
                });
            }
        }
        Ok(Self {
            cost,
            profit,
            expert_score,
        })
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn profit(&self) -> i64 {
        self.profit
    }

    pub fn expert_score(&self) -> i64 {
        self.expert_score
    }

    /// Returns the value of the given criterion.
    pub fn value(&self, criterion: Criterion) -> i64 {
        match criterion {
            Criterion::Profit => self.profit,
            Criterion::ExpertScore => self.expert_score,
        }
    }
}

/// Unvalidated wire form of a [`Project`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ProjectRecord {
    cost: i64,
    profit: i64,
    expert_score: i64,
}

#[cfg(feature = "serde")]
impl TryFrom<ProjectRecord> for Project {
    type Error = PortfolioError;

    fn try_from(r: ProjectRecord) -> Result<Self> {
        Project::new(r.cost, r.profit, r.expert_score)
    }
}

/// Returns the display label of the project at `index` (`x1`, `x2`, ...).
pub fn project_label(index: usize) -> String {
    format!("x{}", index + 1)
}

/// An ordered, read-only sequence of projects.
///
/// Projects are identified only by their position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Project>", into = "Vec<Project>"))]
pub struct ProjectSet {
    projects: Vec<Project>,
}

impl ProjectSet {
    pub fn new(projects: Vec<Project>) -> Self {
        Self { projects }
    }

    /// Builds a set from `(cost, profit, expert_score)` triples.
    ///
    /// # Errors
    ///
    /// Reports the first invalid triple with its position.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_portfolio::model::ProjectSet;
    ///
    /// let set = ProjectSet::from_triples(&[(2, 20, 4), (1, 30, 3)]).unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert!(ProjectSet::from_triples(&[(2, 20, 4), (0, 30, 3)]).is_err());
    /// ```
    pub fn from_triples(triples: &[(i64, i64, i64)]) -> Result<Self> {
        let projects = triples
            .iter()
            .enumerate()
            .map(|(i, &(cost, profit, expert))| Project::validated(i, cost, profit, expert))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { projects })
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Project> {
        self.projects.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Project> {
        self.projects.iter()
    }

    pub fn as_slice(&self) -> &[Project] {
        &self.projects
    }

    /// Returns one criterion's values in project order.
    pub fn column(&self, criterion: Criterion) -> Vec<i64> {
        self.projects.iter().map(|p| p.value(criterion)).collect()
    }

    /// Cost of funding every project.
    pub fn total_cost(&self) -> i64 {
        self.projects.iter().map(Project::cost).sum()
    }

    /// Display labels of all projects.
    pub fn labels(&self) -> Vec<String> {
        (0..self.projects.len()).map(project_label).collect()
    }
}

impl From<Vec<Project>> for ProjectSet {
    fn from(projects: Vec<Project>) -> Self {
        Self::new(projects)
    }
}

impl From<ProjectSet> for Vec<Project> {
    fn from(set: ProjectSet) -> Self {
        set.projects
    }
}

impl<'a> IntoIterator for &'a ProjectSet {
    type Item = &'a Project;
    type IntoIter = std::slice::Iter<'a, Project>;

    fn into_iter(self) -> Self::IntoIter {
        self.projects.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_other() {
        assert_eq!(Criterion::Profit.other(), Criterion::ExpertScore);
        assert_eq!(Criterion::ExpertScore.other(), Criterion::Profit);
    }

    #[test]
    fn test_check_complementary() {
        assert!(check_complementary(Criterion::Profit, Criterion::ExpertScore).is_ok());
        assert!(check_complementary(Criterion::ExpertScore, Criterion::Profit).is_ok());
        assert_eq!(
            check_complementary(Criterion::Profit, Criterion::Profit),
            Err(PortfolioError::CriteriaNotComplementary {
                primary: Criterion::Profit,
                secondary: Criterion::Profit,
            })
        );
    }

    #[test]
    fn test_project_value_lookup() {
        let p = Project::new(3, 40, 2).unwrap();
        assert_eq!(p.cost(), 3);
        assert_eq!(p.value(Criterion::Profit), 40);
        assert_eq!(p.value(Criterion::ExpertScore), 2);
    }

    #[test]
    fn test_project_rejects_bad_values() {
        assert!(matches!(
            Project::new(0, 1, 1),
            Err(PortfolioError::NonPositiveCost { cost: 0, .. })
        ));
        assert!(matches!(
            Project::new(-2, 1, 1),
            Err(PortfolioError::NonPositiveCost { cost: -2, .. })
        ));
        assert!(matches!(
            Project::new(1, 1, -1),
            Err(PortfolioError::NegativeCriterion {
                criterion: Criterion::ExpertScore,
                ..
            })
        ));
        assert!(Project::new(1, 0, 0).is_ok());
    }

    #[test]
    fn test_project_rejects_values_above_limit() {
        assert!(Project::new(MAX_PROJECT_VALUE, MAX_PROJECT_VALUE, MAX_PROJECT_VALUE).is_ok());
        let err = ProjectSet::from_triples(&[(1, 1, 1), (1, 4_000_000_000, 1)]).unwrap_err();
        assert_eq!(
            err,
            PortfolioError::ValueTooLarge {
                index: 1,
                field: "profit",
                value: 4_000_000_000,
                limit: MAX_PROJECT_VALUE,
            }
        );
        assert!(matches!(
            Project::new(i64::MAX / 2 + 1, 1, 1),
            Err(PortfolioError::ValueTooLarge { field: "cost", .. })
        ));
        assert!(matches!(
            Project::new(1, 1, i64::MAX),
            Err(PortfolioError::ValueTooLarge { field: "expert score", .. })
        ));
    }

    #[test]
    fn test_from_triples_reports_position() {
        let err = ProjectSet::from_triples(&[(1, 1, 1), (1, 1, 1), (0, 5, 5)]).unwrap_err();
        assert_eq!(err, PortfolioError::NonPositiveCost { index: 2, cost: 0 });
    }

    #[test]
    fn test_columns_and_labels() {
        let set = ProjectSet::from_triples(&[(2, 20, 4), (1, 30, 3), (3, 40, 2)]).unwrap();
        assert_eq!(set.column(Criterion::Profit), vec![20, 30, 40]);
        assert_eq!(set.column(Criterion::ExpertScore), vec![4, 3, 2]);
        assert_eq!(set.total_cost(), 6);
        assert_eq!(set.labels(), vec!["x1", "x2", "x3"]);
    }
}
