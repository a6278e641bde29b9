#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Branching variable heuristics.
//!
//! Any order keeps DPLL sound and complete; the choice only affects how much
//! of the tree is explored.

use crate::sat::assignment::Assignment;
use crate::sat::literal::Variable;
use crate::sat::problem::Problem;
use ordered_float::OrderedFloat;

pub trait VariableSelection {
    fn new(problem: &Problem) -> Self;

    /// Chooses an unassigned variable, or `None` if every variable is assigned.
    fn pick(&mut self, assignment: &Assignment) -> Option<Variable>;

    fn name(&self) -> &'static str;
}

/// Returns the unassigned variable with the greatest score, preferring the
/// lowest index on ties.
fn best_unassigned<S: PartialOrd + Copy>(scores: &[S], assignment: &Assignment) -> Option<Variable> {
    let mut best: Option<(Variable, S)> = None;
    for variable in assignment.unassigned() {
        let score = scores[variable.index()];
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((variable, score)),
        }
    }
    best.map(|(variable, _)| variable)
}

/// Static "most occurrences" order: the unassigned variable appearing in the
/// most literal positions across all clauses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MostOccurrences(Vec<usize>);

impl MostOccurrences {
    #[must_use]
    pub fn count(&self, variable: Variable) -> usize {
        self.0[variable.index()]
    }
}

impl VariableSelection for MostOccurrences {
    fn new(problem: &Problem) -> Self {
        Self(
            problem
                .variables()
                .map(|v| problem.occurrences(v).len())
                .collect(),
        )
    }

    fn pick(&mut self, assignment: &Assignment) -> Option<Variable> {
        best_unassigned(&self.0, assignment)
    }

    fn name(&self) -> &'static str {
        "most-occurrences"
    }
}

/// The first unassigned variable in index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedOrder;

impl VariableSelection for FixedOrder {
    fn new(_: &Problem) -> Self {
        Self
    }

    fn pick(&mut self, assignment: &Assignment) -> Option<Variable> {
        assignment.unassigned().next()
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Two-sided Jeroslow-Wang: each occurrence in a clause of width `w`
/// contributes `2^-w`, so variables in short clauses are preferred.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JeroslowWang(Vec<OrderedFloat<f64>>);

impl VariableSelection for JeroslowWang {
    fn new(problem: &Problem) -> Self {
        Self(
            problem
                .variables()
                .map(|v| {
                    let score = problem
                        .occurrences(v)
                        .iter()
                        .map(|o| {
                            let width = problem.clause(o.clause).len();
                            let width = i32::try_from(width).unwrap_or(i32::MAX);
                            2f64.powi(-width)
                        })
                        .sum::<f64>();
                    OrderedFloat(score)
                })
                .collect(),
        )
    }

    fn pick(&mut self, assignment: &Assignment) -> Option<Variable> {
        best_unassigned(&self.0, assignment)
    }

    fn name(&self) -> &'static str {
        "jeroslow-wang"
    }
}

/// Default seed for [`RandomOrder`], so runs are reproducible unless a seed is
/// chosen explicitly.
pub const DEFAULT_SEED: u64 = 0x5EED_DA11;

/// A uniformly random unassigned variable.
#[derive(Debug, Clone)]
pub struct RandomOrder {
    rng: fastrand::Rng,
}

impl RandomOrder {
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Default for RandomOrder {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl VariableSelection for RandomOrder {
    fn new(_: &Problem) -> Self {
        Self::default()
    }

    fn pick(&mut self, assignment: &Assignment) -> Option<Variable> {
        let unassigned = assignment.num_vars() - assignment.num_assigned();
        if unassigned == 0 {
            return None;
        }
        let nth = self.rng.usize(..unassigned);
        assignment.unassigned().nth(nth)
    }

    fn name(&self) -> &'static str {
        "random"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sat::assignment::Value;

    fn problem() -> Problem {
        Problem::from_signed(vec![vec![1, 2], vec![-2, 3], vec![2, -3], vec![3]]).unwrap()
    }

    #[test]
    fn test_most_occurrences_prefers_frequent_variable() {
        let p = problem();
        let mut selector = MostOccurrences::new(&p);
        let mut a = Assignment::for_problem(&p);
        assert_eq!(selector.count(Variable::new(1)), 3);
        assert_eq!(selector.count(Variable::new(2)), 3);
        // Tie between x2 and x3 goes to the lower index.
        assert_eq!(selector.pick(&a), Some(Variable::new(1)));

        a.set(Variable::new(1), Value::True);
        assert_eq!(selector.pick(&a), Some(Variable::new(2)));

        a.set(Variable::new(2), Value::True);
        assert_eq!(selector.pick(&a), Some(Variable::new(0)));

        a.set(Variable::new(0), Value::False);
        assert_eq!(selector.pick(&a), None);
    }

    #[test]
    fn test_fixed_order() {
        let p = problem();
        let mut selector = FixedOrder::new(&p);
        let mut a = Assignment::for_problem(&p);
        assert_eq!(selector.pick(&a), Some(Variable::new(0)));
        a.set(Variable::new(0), Value::True);
        assert_eq!(selector.pick(&a), Some(Variable::new(1)));
    }

    #[test]
    fn test_jeroslow_wang_prefers_short_clauses() {
        let p = problem();
        let mut selector = JeroslowWang::new(&p);
        let a = Assignment::for_problem(&p);
        // x3: 1/4 + 1/4 + 1/2, x2: 3/4.
        assert_eq!(selector.pick(&a), Some(Variable::new(2)));
    }

    #[test]
    fn test_random_order_only_picks_unassigned() {
        let p = problem();
        let mut selector = RandomOrder::with_seed(7);
        let mut a = Assignment::for_problem(&p);
        a.set(Variable::new(0), Value::True);
        a.set(Variable::new(2), Value::False);
        for _ in 0..32 {
            assert_eq!(selector.pick(&a), Some(Variable::new(1)));
        }
        a.set(Variable::new(1), Value::True);
        assert_eq!(selector.pick(&a), None);
    }
}
