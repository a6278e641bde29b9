#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod assignment;
pub mod clause;
pub mod dpll;
pub mod error;
pub mod generator;
pub mod literal;
pub mod memo;
pub mod problem;
pub mod propagation;
pub mod solver;
pub mod variable_selection;
