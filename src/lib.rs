//! A DPLL decision procedure for Boolean satisfiability of CNF formulas.
//!
//! The entry point is [`decide`], which takes a [`Problem`] and returns a
//! [`Verdict`] together with the final [`Assignment`]. [`Dpll`] exposes the
//! same search with a configurable branching heuristic, an optional verdict
//! cache and a caller supplied interrupt hook.
//!
//! ```
//! use dpll_sat::{Problem, Verdict, decide};
//!
//! let problem = Problem::from_signed(vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]).unwrap();
//! let (verdict, assignment) = decide(&problem);
//! assert_eq!(verdict, Verdict::Satisfiable);
//! assert!(problem.is_satisfied_by(&assignment));
//! ```

/// The `sat` module holds the formula model, the assignment and the DPLL
/// engine.
pub mod sat;

pub use sat::assignment::{Assignment, Solutions, Value};
pub use sat::clause::{Clause, ClauseId};
pub use sat::dpll::{Dpll, decide, decide_with};
pub use sat::error::ProblemError;
pub use sat::literal::{Literal, Variable};
pub use sat::problem::{Occurrence, Problem};
pub use sat::solver::{
    DefaultConfig, Interrupt, MemoConfig, Never, SolutionStats, SolverConfig, Verdict,
};
