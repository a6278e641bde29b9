//! Solver configuration, verdicts, statistics and the interrupt hook.

use crate::sat::memo::{Memo, MemoCache, NoMemo};
use crate::sat::variable_selection::{
    FixedOrder, JeroslowWang, MostOccurrences, RandomOrder, VariableSelection,
};
use std::fmt;
use std::fmt::Debug;
use thiserror::Error;

/// Compile-time choice of the pluggable parts of the engine.
pub trait SolverConfig: Debug {
    type VariableSelector: VariableSelection + Debug;
    type Memo: Memo + Default + Debug;
}

/// Most-occurrences branching, no memoization.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultConfig;

impl SolverConfig for DefaultConfig {
    type VariableSelector = MostOccurrences;
    type Memo = NoMemo;
}

/// Most-occurrences branching with a verdict cache.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoConfig;

impl SolverConfig for MemoConfig {
    type VariableSelector = MostOccurrences;
    type Memo = MemoCache;
}

/// Any selector, with or without memoization.
#[derive(Debug, Clone, Copy, Default)]
pub struct Config<V, M = NoMemo>(std::marker::PhantomData<(V, M)>);

impl<V, M> SolverConfig for Config<V, M>
where
    V: VariableSelection + Debug,
    M: Memo + Default + Debug,
{
    type VariableSelector = V;
    type Memo = M;
}

pub type FixedOrderConfig = Config<FixedOrder>;
pub type JeroslowWangConfig = Config<JeroslowWang>;
pub type RandomOrderConfig = Config<RandomOrder>;

/// Outcome of a solve.
///
/// `Unknown` means the search was stopped before it finished and says nothing
/// about satisfiability. It is never produced by a completed search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Satisfiable,
    Unsatisfiable,
    Unknown,
}

impl Verdict {
    #[must_use]
    pub const fn is_sat(self) -> bool {
        matches!(self, Self::Satisfiable)
    }

    #[must_use]
    pub const fn is_unsat(self) -> bool {
        matches!(self, Self::Unsatisfiable)
    }

    /// `Some(satisfiable)` for a completed search, `None` if it was stopped.
    #[must_use]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            Self::Satisfiable => Some(true),
            Self::Unsatisfiable => Some(false),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Satisfiable => write!(f, "SATISFIABLE"),
            Self::Unsatisfiable => write!(f, "UNSATISFIABLE"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Counters collected during a search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolutionStats {
    /// Recursive search calls.
    pub calls: usize,
    /// Case splits.
    pub decisions: usize,
    /// Unit clause assignments.
    pub propagations: usize,
    /// Pure literal assignments.
    pub pure_literals: usize,
    /// Assignments undone after a failed branch.
    pub backtracks: usize,
    /// States found with a false clause.
    pub conflicts: usize,
    /// States refuted by the memo without search.
    pub cache_hits: usize,
    pub max_depth: usize,
}

/// Raised inside the search when the interrupt hook fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search interrupted after {calls} calls")]
pub struct Interrupted {
    pub calls: usize,
}

/// A caller supplied stop condition, consulted at the top of every recursive
/// call.
pub trait Interrupt {
    fn should_stop(&mut self, stats: &SolutionStats) -> bool;
}

/// Never stops the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Never;

impl Interrupt for Never {
    fn should_stop(&mut self, _: &SolutionStats) -> bool {
        false
    }
}

impl<F: FnMut(&SolutionStats) -> bool> Interrupt for F {
    fn should_stop(&mut self, stats: &SolutionStats) -> bool {
        self(stats)
    }
}
