#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Partial truth assignments and three-valued evaluation.
//!
//! An [`Assignment`] maps every variable of a problem to [`Value::True`],
//! [`Value::False`] or [`Value::Unknown`]. Clause and formula values are
//! recomputed from the mapping on demand, so evaluation is a pure function of
//! the current state and is correct for any partial assignment.

use crate::sat::clause::Clause;
use crate::sat::literal::{Literal, Variable};
use crate::sat::memo::CacheKey;
use crate::sat::problem::Problem;
use core::ops::{Index, Not};
use std::fmt;

/// A three-valued truth value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, PartialOrd, Ord)]
pub enum Value {
    #[default]
    Unknown,
    False,
    True,
}

impl Value {
    #[must_use]
    pub const fn from_bool(b: bool) -> Self {
        if b { Self::True } else { Self::False }
    }

    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    #[must_use]
    pub const fn to_bool(self) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::False => Some(false),
            Self::Unknown => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::from_bool(b)
    }
}

impl From<Option<bool>> for Value {
    fn from(b: Option<bool>) -> Self {
        b.map_or(Self::Unknown, Self::from_bool)
    }
}

impl Not for Value {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "T"),
            Self::False => write!(f, "F"),
            Self::Unknown => write!(f, "?"),
        }
    }
}

/// A model in signed one-based notation: `3` means x3 is true, `-3` that it is
/// false. Unassigned variables are omitted.
pub type Solutions = Vec<i32>;

/// A partial mapping from variables to truth values.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct Assignment(Vec<Value>);

impl Index<Variable> for Assignment {
    type Output = Value;

    fn index(&self, index: Variable) -> &Self::Output {
        &self.0[index.index()]
    }
}

impl Assignment {
    /// An assignment over `num_vars` variables, all unknown.
    #[must_use]
    pub fn new(num_vars: usize) -> Self {
        Self(vec![Value::Unknown; num_vars])
    }

    #[must_use]
    pub fn for_problem(problem: &Problem) -> Self {
        Self::new(problem.num_vars())
    }

    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn value(&self, variable: Variable) -> Value {
        self[variable]
    }

    /// Overwrites the value of `variable` and returns the value it replaced,
    /// which may itself be [`Value::Unknown`].
    pub fn set(&mut self, variable: Variable, value: Value) -> Value {
        std::mem::replace(&mut self.0[variable.index()], value)
    }

    /// Makes `literal` true.
    pub fn assign(&mut self, literal: Literal) -> Value {
        self.set(literal.variable(), Value::from_bool(literal.polarity()))
    }

    #[must_use]
    pub fn literal_value(&self, literal: Literal) -> Value {
        let value = self[literal.variable()];
        if literal.polarity() { value } else { !value }
    }

    /// True if any literal is true, false if every literal is false, unknown
    /// otherwise. The empty clause is false.
    #[must_use]
    pub fn clause_value(&self, clause: &Clause) -> Value {
        let mut any_unknown = false;
        for &lit in clause {
            match self.literal_value(lit) {
                Value::True => return Value::True,
                Value::False => {}
                Value::Unknown => any_unknown = true,
            }
        }
        if any_unknown {
            Value::Unknown
        } else {
            Value::False
        }
    }

    /// True if every clause is true, false if any clause is false, unknown
    /// otherwise. The empty formula is true.
    #[must_use]
    pub fn formula_value(&self, problem: &Problem) -> Value {
        let mut all_true = true;
        for clause in problem.clauses() {
            match self.clause_value(clause) {
                Value::True => {}
                Value::False => return Value::False,
                Value::Unknown => all_true = false,
            }
        }
        if all_true {
            Value::True
        } else {
            Value::Unknown
        }
    }

    #[must_use]
    pub fn count_false_clauses(&self, problem: &Problem) -> usize {
        problem
            .clauses()
            .iter()
            .filter(|c| self.clause_value(c) == Value::False)
            .count()
    }

    #[must_use]
    pub fn count_unknown_clauses(&self, problem: &Problem) -> usize {
        problem
            .clauses()
            .iter()
            .filter(|c| self.clause_value(c) == Value::Unknown)
            .count()
    }

    /// Number of literals of `clause` whose variable is unassigned.
    #[must_use]
    pub fn count_unknown_literals(&self, clause: &Clause) -> usize {
        clause
            .iter()
            .filter(|lit| self[lit.variable()].is_unknown())
            .count()
    }

    #[must_use]
    pub fn num_assigned(&self) -> usize {
        self.0.iter().filter(|v| v.is_known()).count()
    }

    /// Variables still unknown, in index order.
    pub fn unassigned(&self) -> impl Iterator<Item = Variable> + '_ {
        self.iter()
            .filter(|(_, v)| v.is_unknown())
            .map(|(var, _)| var)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, Value)> + '_ {
        self.0.iter().enumerate().map(|(i, &v)| {
            #[allow(clippy::cast_possible_truncation)]
            (Variable::new(i as u32), v)
        })
    }

    /// The assigned variables in signed notation.
    #[must_use]
    pub fn solutions(&self) -> Solutions {
        self.iter()
            .filter_map(|(var, value)| {
                value
                    .to_bool()
                    .map(|b| Literal::new(var, b).to_i32())
            })
            .collect()
    }

    /// The canonical key of the complete current mapping.
    #[must_use]
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from_values(&self.0)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "x{}={value}", i + 1)?;
        }
        Ok(())
    }
}
