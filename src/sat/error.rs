//! Errors raised while building a [`Problem`](crate::sat::problem::Problem).
//!
//! Search failure is never an error: an unsatisfiable branch is an ordinary
//! `false`. These errors only cover structurally invalid input.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("clause {clause} refers to variable {variable}, but the problem has {num_vars} variables")]
    UnknownVariable {
        clause: usize,
        variable: usize,
        num_vars: usize,
    },

    #[error("problem has {count} {what}, more than the supported maximum of {max}")]
    TooLarge {
        what: &'static str,
        count: usize,
        max: usize,
    },

    #[error("clause width {width} exceeds the {num_vars} available variables")]
    WidthExceedsVariables { width: usize, num_vars: usize },

    #[error("a planted instance needs clauses of width at least 1")]
    ZeroWidth,
}
