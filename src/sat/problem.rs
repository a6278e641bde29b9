//! The static structure of a CNF formula.
//!
//! A [`Problem`] owns every clause in stable, index-addressed storage and, for
//! each variable, the list of places it occurs. Literals refer to variables by
//! index and occurrences refer to clauses by index, so there are no ownership
//! cycles and the whole structure can be shared by `&` reference across every
//! branch of a search.

use crate::sat::assignment::{Assignment, Solutions, Value};
use crate::sat::clause::{Clause, ClauseId};
use crate::sat::error::ProblemError;
use crate::sat::literal::{Literal, Variable};
use core::fmt;
use itertools::Itertools;
use rustc_hash::FxHashSet;

/// One appearance of a variable: the clause it sits in and the polarity it
/// has there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Occurrence {
    pub clause: ClauseId,
    pub polarity: bool,
}

/// Largest number of variables a [`Problem`] accepts.
///
/// Per-variable storage is allocated up front, so a single huge literal would
/// otherwise request memory for every variable below it.
pub const MAX_VARIABLES: usize = 1 << 26;

/// A conjunction of clauses over `num_vars` variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Problem {
    num_vars: usize,
    clauses: Vec<Clause>,
    occurrences: Vec<Vec<Occurrence>>,
}

impl Problem {
    /// Builds a problem over variables `0..num_vars`.
    ///
    /// # Errors
    ///
    /// Returns [`ProblemError::UnknownVariable`] if a literal refers to a
    /// variable outside the problem, and [`ProblemError::TooLarge`] if the
    /// variable or clause count does not fit the index types.
    pub fn new(num_vars: usize, clauses: Vec<Clause>) -> Result<Self, ProblemError> {
        if num_vars > MAX_VARIABLES {
            return Err(ProblemError::TooLarge {
                what: "variables",
                count: num_vars,
                max: MAX_VARIABLES,
            });
        }
        let max = u32::MAX as usize;
        if clauses.len() > max {
            return Err(ProblemError::TooLarge {
                what: "clauses",
                count: clauses.len(),
                max,
            });
        }

        let mut occurrences = vec![Vec::new(); num_vars];
        for (i, clause) in clauses.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let id = ClauseId::new(i as u32);
            for lit in clause {
                let variable = lit.variable().index();
                let Some(list) = occurrences.get_mut(variable) else {
                    return Err(ProblemError::UnknownVariable {
                        clause: i,
                        variable,
                        num_vars,
                    });
                };
                list.push(Occurrence {
                    clause: id,
                    polarity: lit.polarity(),
                });
            }
        }

        Ok(Self {
            num_vars,
            clauses,
            occurrences,
        })
    }

    /// Builds a problem from clauses in signed one-based notation, sizing the
    /// variable set to the largest variable mentioned.
    ///
    /// # Errors
    ///
    /// See [`Problem::new`]. A literal beyond [`MAX_VARIABLES`] is rejected
    /// as [`ProblemError::TooLarge`] before anything is allocated.
    pub fn from_signed(clauses: Vec<Vec<i32>>) -> Result<Self, ProblemError> {
        let num_vars = clauses
            .iter()
            .flatten()
            .map(|l| l.unsigned_abs() as usize)
            .max()
            .unwrap_or(0);
        Self::from_signed_with_vars(num_vars, clauses)
    }

    /// Like [`Problem::from_signed`] but with an explicit variable count, which
    /// may exceed the variables actually mentioned.
    ///
    /// # Errors
    ///
    /// See [`Problem::new`].
    pub fn from_signed_with_vars(
        num_vars: usize,
        clauses: Vec<Vec<i32>>,
    ) -> Result<Self, ProblemError> {
        let clauses = clauses
            .into_iter()
            .map(|c| c.into_iter().filter(|&l| l != 0).collect_vec())
            .map(Clause::from)
            .collect();
        Self::new(num_vars, clauses)
    }

    #[must_use]
    pub const fn num_vars(&self) -> usize {
        self.num_vars
    }

    #[must_use]
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    #[must_use]
    pub fn num_literals(&self) -> usize {
        self.clauses.iter().map(Clause::len).sum()
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[must_use]
    pub fn clause(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.index()]
    }

    /// Clauses paired with their ids, in problem order.
    pub fn clauses_with_ids(&self) -> impl Iterator<Item = (ClauseId, &Clause)> {
        self.clauses.iter().enumerate().map(|(i, c)| {
            #[allow(clippy::cast_possible_truncation)]
            (ClauseId::new(i as u32), c)
        })
    }

    /// Variables in index order.
    pub fn variables(&self) -> impl Iterator<Item = Variable> + use<> {
        #[allow(clippy::cast_possible_truncation)]
        (0..self.num_vars as u32).map(Variable::new)
    }

    /// Every occurrence of `variable`, in clause order.
    #[must_use]
    pub fn occurrences(&self, variable: Variable) -> &[Occurrence] {
        &self.occurrences[variable.index()]
    }

    /// True if the problem contains a clause with no literals.
    #[must_use]
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(Clause::is_empty)
    }

    #[must_use]
    pub fn max_clause_width(&self) -> usize {
        self.clauses.iter().map(Clause::len).max().unwrap_or(0)
    }

    /// Checks that every clause holds under `assignment`.
    #[must_use]
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        assignment.formula_value(self) == Value::True
    }

    /// Checks a signed model as produced by [`Assignment::solutions`]: every
    /// clause must contain a literal listed in `solutions`.
    #[must_use]
    pub fn verify(&self, solutions: &Solutions) -> bool {
        let model: FxHashSet<i32> = solutions.iter().copied().collect();
        self.clauses
            .iter()
            .all(|c| c.iter().any(|lit| model.contains(&lit.to_i32())))
    }

    /// The literals of every clause in signed notation.
    #[must_use]
    pub fn to_signed(&self) -> Vec<Vec<i32>> {
        self.clauses
            .iter()
            .map(|c| c.iter().copied().map(Literal::to_i32).collect())
            .collect()
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "⊤");
        }
        write!(f, "{}", self.clauses.iter().join(" ∧ "))
    }
}
