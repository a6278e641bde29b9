#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Variables and literals of a CNF formula.
//!
//! Variables are dense indices into the owning [`Problem`](crate::sat::problem::Problem),
//! so identity is index identity: two variables are equal iff they denote the
//! same slot of the same problem. A [`Literal`] pairs a variable with the
//! polarity ("valence") it requires to be satisfied.

use core::fmt;
use core::ops::{Neg, Not};

/// A propositional variable, identified by its index within a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Variable(u32);

impl Variable {
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The zero-based index of this variable.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The one-based number used in signed (DIMACS style) notation.
    #[must_use]
    pub const fn number(self) -> u32 {
        self.0 + 1
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.number())
    }
}

/// A variable together with the polarity it must take to satisfy the literal.
///
/// `polarity == true` is satisfied when the variable is true, `false` when it
/// is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Literal {
    variable: Variable,
    polarity: bool,
}

impl Literal {
    #[must_use]
    pub const fn new(variable: Variable, polarity: bool) -> Self {
        Self { variable, polarity }
    }

    #[must_use]
    pub const fn positive(variable: Variable) -> Self {
        Self::new(variable, true)
    }

    #[must_use]
    pub const fn negative(variable: Variable) -> Self {
        Self::new(variable, false)
    }

    #[must_use]
    pub const fn variable(self) -> Variable {
        self.variable
    }

    #[must_use]
    pub const fn polarity(self) -> bool {
        self.polarity
    }

    #[must_use]
    pub const fn is_negated(self) -> bool {
        !self.polarity
    }

    #[must_use]
    pub const fn negated(self) -> Self {
        Self {
            variable: self.variable,
            polarity: !self.polarity,
        }
    }

    /// Builds a literal from signed one-based notation: `3` is `x3`, `-3` is `¬x3`.
    ///
    /// # Panics
    ///
    /// If `value` is zero, which has no literal meaning.
    #[must_use]
    pub fn from_i32(value: i32) -> Self {
        assert_ne!(value, 0, "0 is a clause terminator, not a literal");
        let variable = Variable::new(value.unsigned_abs() - 1);
        Self::new(variable, value.is_positive())
    }

    /// The inverse of [`Literal::from_i32`].
    ///
    /// # Panics
    ///
    /// If the variable number does not fit in an `i32`.
    #[must_use]
    pub fn to_i32(self) -> i32 {
        let number =
            i32::try_from(self.variable.number()).expect("literal variable overflowed i32");
        if self.polarity { number } else { -number }
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.polarity {
            write!(f, "{}", self.variable)
        } else {
            write!(f, "¬{}", self.variable)
        }
    }
}

impl Neg for Literal {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.negated()
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negated()
    }
}
