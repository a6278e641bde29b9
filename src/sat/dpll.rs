//! Defines the DPLL (Davis-Putnam-Logemann-Loveland) decision procedure.
//!
//! The [`Dpll`] engine decides whether a [`Problem`] is satisfiable by a
//! depth-first search over partial assignments. At every node the following
//! steps are tried in strict order:
//!
//! 1.  **Interrupt check:** the caller supplied [`Interrupt`] hook may stop the
//!     whole search, which yields [`Verdict::Unknown`] rather than a refutation.
//! 2.  **Terminal check:** if every clause is true the branch succeeds, if any
//!     clause is false it fails.
//! 3.  **Memo lookup:** with a verdict cache configured, a state already known
//!     to be unsatisfiable fails immediately.
//! 4.  **Unit propagation:** a clause with exactly one unassigned literal
//!     forces that literal. The forced assignment is not a choice point.
//! 5.  **Pure literal elimination:** a variable whose live occurrences all
//!     share one polarity is assigned that polarity, again without branching.
//! 6.  **Decision:** an unassigned variable chosen by the configured
//!     [`VariableSelection`] is tried as true and, if that fails, as false.
//!
//! The assignment is mutated in place. Each step records the value it
//! overwrote and restores it on every return that is not a success, so a
//! failed branch leaves no trace for its parent or its sibling.

use crate::sat::assignment::{Assignment, Solutions, Value};
use crate::sat::literal::Literal;
use crate::sat::memo::Memo;
use crate::sat::problem::Problem;
use crate::sat::propagation::{Reason, find_pure_literal, find_unit_literal};
use crate::sat::solver::{
    DefaultConfig, Interrupt, Interrupted, Never, SolutionStats, SolverConfig, Verdict,
};
use crate::sat::variable_selection::VariableSelection;
use tracing::{debug, trace};

/// Decides `problem` with the default configuration.
///
/// Returns the verdict and the final assignment. For a satisfiable problem the
/// assignment makes every clause true; variables that were never needed may be
/// left unknown.
#[must_use]
pub fn decide(problem: &Problem) -> (Verdict, Assignment) {
    decide_with::<DefaultConfig>(problem)
}

/// Like [`decide`] with an explicit configuration.
#[must_use]
pub fn decide_with<C: SolverConfig>(problem: &Problem) -> (Verdict, Assignment) {
    let mut solver = Dpll::<C>::new(problem);
    let verdict = solver.solve();
    (verdict, solver.into_assignment())
}

/// A DPLL solver bound to one problem.
///
/// The problem is borrowed and never modified. The verdict cache, if the
/// configuration has one, lives as long as the solver and is reused by
/// successive calls to [`Dpll::solve_from`].
#[derive(Debug)]
pub struct Dpll<'p, C: SolverConfig = DefaultConfig, I: Interrupt = Never> {
    problem: &'p Problem,
    /// Result of the last [`Dpll::solve`].
    assignment: Assignment,
    selector: C::VariableSelector,
    memo: C::Memo,
    interrupt: I,
    stats: SolutionStats,
}

impl<'p, C: SolverConfig> Dpll<'p, C, Never> {
    #[must_use]
    pub fn new(problem: &'p Problem) -> Self {
        Self::with_interrupt(problem, Never)
    }
}

impl<'p, C: SolverConfig, I: Interrupt> Dpll<'p, C, I> {
    /// Creates a solver whose search consults `interrupt` at every call.
    #[must_use]
    pub fn with_interrupt(problem: &'p Problem, interrupt: I) -> Self {
        Self {
            problem,
            assignment: Assignment::for_problem(problem),
            selector: C::VariableSelector::new(problem),
            memo: C::Memo::default(),
            interrupt,
            stats: SolutionStats::default(),
        }
    }

    /// Solves from the empty assignment. The final assignment is available
    /// through [`Dpll::assignment`].
    pub fn solve(&mut self) -> Verdict {
        let mut assignment = Assignment::for_problem(self.problem);
        let verdict = self.solve_from(&mut assignment);
        self.assignment = assignment;
        verdict
    }

    /// Solves starting from a caller provided, possibly partial, assignment.
    ///
    /// On [`Verdict::Satisfiable`] `assignment` holds the model. Otherwise it
    /// is left exactly as it was passed in.
    ///
    /// # Panics
    ///
    /// If `assignment` was not built for a problem with the same number of
    /// variables.
    pub fn solve_from(&mut self, assignment: &mut Assignment) -> Verdict {
        assert_eq!(
            assignment.num_vars(),
            self.problem.num_vars(),
            "assignment does not match the problem"
        );

        self.stats = SolutionStats::default();
        debug!(
            vars = self.problem.num_vars(),
            clauses = self.problem.num_clauses(),
            preset = assignment.num_assigned(),
            selector = self.selector.name(),
            "starting DPLL search"
        );

        let verdict = match self.search(assignment, 0) {
            Ok(true) => Verdict::Satisfiable,
            Ok(false) => Verdict::Unsatisfiable,
            Err(interrupted) => {
                debug!("{interrupted}");
                Verdict::Unknown
            }
        };

        debug!(
            %verdict,
            calls = self.stats.calls,
            decisions = self.stats.decisions,
            backtracks = self.stats.backtracks,
            "DPLL search finished"
        );
        verdict
    }

    #[must_use]
    pub const fn problem(&self) -> &'p Problem {
        self.problem
    }

    #[must_use]
    pub const fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    #[must_use]
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    /// The model found by the last [`Dpll::solve`] in signed notation.
    #[must_use]
    pub fn solutions(&self) -> Solutions {
        self.assignment.solutions()
    }

    /// Statistics of the last search.
    #[must_use]
    pub const fn stats(&self) -> SolutionStats {
        self.stats
    }

    #[must_use]
    pub const fn memo(&self) -> &C::Memo {
        &self.memo
    }

    /// One node of the search tree.
    ///
    /// `Ok(false)` is an ordinary failed branch. `Err` means the interrupt
    /// fired and the search must unwind without concluding anything.
    fn search(&mut self, assignment: &mut Assignment, depth: usize) -> Result<bool, Interrupted> {
        self.stats.calls += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        if self.interrupt.should_stop(&self.stats) {
            return Err(Interrupted {
                calls: self.stats.calls,
            });
        }

        match assignment.formula_value(self.problem) {
            Value::True => return Ok(true),
            Value::False => {
                self.stats.conflicts += 1;
                return Ok(false);
            }
            Value::Unknown => {}
        }

        let key = self.memo.enabled().then(|| assignment.cache_key());
        if let Some(key) = &key {
            // A cached success still needs the model, so only refutations
            // short-circuit.
            if self.memo.lookup(key) == Some(false) {
                self.stats.cache_hits += 1;
                trace!(depth, "state refuted by memo");
                return Ok(false);
            }
        }

        let satisfiable = self.simplify_or_branch(assignment, depth)?;
        if let Some(key) = key {
            self.memo.store(key, satisfiable);
        }
        Ok(satisfiable)
    }

    /// Steps 4 to 6 of a node, for a state that is neither decided nor
    /// refuted by the memo.
    ///
    /// A unit clause wins over a pure literal, and both win over a decision.
    /// Only a decision opens two branches; a forced literal has a single
    /// child whose result is returned unchanged.
    fn simplify_or_branch(
        &mut self,
        assignment: &mut Assignment,
        depth: usize,
    ) -> Result<bool, Interrupted> {
        if let Some(literal) = find_unit_literal(self.problem, assignment) {
            return self.force(assignment, literal, Reason::Unit, depth);
        }

        if let Some(literal) = find_pure_literal(self.problem, assignment) {
            return self.force(assignment, literal, Reason::Pure, depth);
        }

        let Some(variable) = self.selector.pick(assignment) else {
            // Unreachable while the formula is undetermined, since an unknown
            // clause has an unassigned variable.
            return Ok(false);
        };

        self.stats.decisions += 1;
        trace!(%variable, depth, "decision");
        Ok(self.assign_and_search(assignment, Literal::positive(variable), depth)?
            || self.assign_and_search(assignment, Literal::negative(variable), depth)?)
    }

    /// Assigns a literal that unit propagation or pure literal elimination
    /// has forced, counting it under `reason`. Failure below it fails this
    /// node too, since there is no alternative value to try.
    fn force(
        &mut self,
        assignment: &mut Assignment,
        literal: Literal,
        reason: Reason,
        depth: usize,
    ) -> Result<bool, Interrupted> {
        match reason {
            Reason::Unit => self.stats.propagations += 1,
            Reason::Pure => self.stats.pure_literals += 1,
        }
        trace!(%literal, ?reason, depth, "forced");
        self.assign_and_search(assignment, literal, depth)
    }

    /// Makes `literal` true, searches below it and undoes the assignment
    /// unless the search succeeded.
    fn assign_and_search(
        &mut self,
        assignment: &mut Assignment,
        literal: Literal,
        depth: usize,
    ) -> Result<bool, Interrupted> {
        let prior = assignment.assign(literal);
        let result = self.search(assignment, depth + 1);
        if !matches!(result, Ok(true)) {
            assignment.set(literal.variable(), prior);
            if result.is_ok() {
                self.stats.backtracks += 1;
                trace!(%literal, depth, "backtrack");
            }
        }
        result
    }
}
