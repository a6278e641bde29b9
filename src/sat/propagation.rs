#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The two simplification rules DPLL applies before branching.
//!
//! Both rules only inspect the problem and the current assignment and report
//! the literal that should be made true; the engine performs the assignment so
//! that it can undo it.

use crate::sat::assignment::{Assignment, Value};
use crate::sat::literal::Literal;
use crate::sat::problem::Problem;

/// Which rule forced an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    Unit,
    Pure,
}

/// Finds the first unit clause: an undetermined clause with exactly one
/// unassigned literal. Returns that literal, which must become true for the
/// clause to be satisfied.
#[must_use]
pub fn find_unit_literal(problem: &Problem, assignment: &Assignment) -> Option<Literal> {
    problem.clauses().iter().find_map(|clause| {
        if assignment.clause_value(clause) != Value::Unknown
            || assignment.count_unknown_literals(clause) != 1
        {
            return None;
        }
        clause
            .iter()
            .copied()
            .find(|&lit| assignment.literal_value(lit).is_unknown())
    })
}

/// Finds the first pure literal among the unassigned variables.
///
/// Only occurrences in clauses that are not yet satisfied count. A variable is
/// pure if it has at least one such occurrence and all of them share one
/// polarity; the returned literal carries that polarity.
#[must_use]
pub fn find_pure_literal(problem: &Problem, assignment: &Assignment) -> Option<Literal> {
    assignment.unassigned().find_map(|variable| {
        let mut positive = false;
        let mut negative = false;

        for occurrence in problem.occurrences(variable) {
            let clause = problem.clause(occurrence.clause);
            if assignment.clause_value(clause) != Value::Unknown {
                continue;
            }
            if occurrence.polarity {
                positive = true;
            } else {
                negative = true;
            }
            if positive && negative {
                return None;
            }
        }

        match (positive, negative) {
            (true, false) => Some(Literal::positive(variable)),
            (false, true) => Some(Literal::negative(variable)),
            _ => None,
        }
    })
}
