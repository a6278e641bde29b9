//! Generated benchmark instances.
//!
//! These stand in for benchmark files: random k-SAT around the phase
//! transition, planted instances that are satisfiable by construction, and
//! pigeonhole formulas that are unsatisfiable by construction.

use crate::sat::assignment::Solutions;
use crate::sat::clause::Clause;
use crate::sat::error::ProblemError;
use crate::sat::literal::{Literal, Variable};
use crate::sat::problem::{MAX_VARIABLES, Problem};
use smallvec::SmallVec;

/// Clause-to-variable ratio near which random 3-SAT is hardest.
pub const THREE_SAT_THRESHOLD: f64 = 4.26;

fn too_many_variables(count: usize) -> ProblemError {
    ProblemError::TooLarge {
        what: "variables",
        count,
        max: MAX_VARIABLES,
    }
}

fn check_width(num_vars: usize, width: usize) -> Result<(), ProblemError> {
    if num_vars > MAX_VARIABLES {
        return Err(too_many_variables(num_vars));
    }
    if width > num_vars {
        return Err(ProblemError::WidthExceedsVariables { width, num_vars });
    }
    Ok(())
}

/// `width` distinct variables with random polarities.
fn random_clause(num_vars: usize, width: usize, rng: &mut fastrand::Rng) -> Clause {
    let mut chosen: SmallVec<[u32; 8]> = SmallVec::new();
    while chosen.len() < width {
        #[allow(clippy::cast_possible_truncation)]
        let var = rng.usize(..num_vars) as u32;
        if !chosen.contains(&var) {
            chosen.push(var);
        }
    }
    Clause::new(
        chosen
            .into_iter()
            .map(|v| Literal::new(Variable::new(v), rng.bool())),
    )
}

/// Uniform random k-SAT: `num_clauses` clauses of `width` distinct variables.
///
/// # Errors
///
/// If `width` exceeds `num_vars`, or the sizes do not fit a [`Problem`].
pub fn random_k_sat(
    num_vars: usize,
    num_clauses: usize,
    width: usize,
    rng: &mut fastrand::Rng,
) -> Result<Problem, ProblemError> {
    check_width(num_vars, width)?;
    let clauses = (0..num_clauses)
        .map(|_| random_clause(num_vars, width, rng))
        .collect();
    Problem::new(num_vars, clauses)
}

/// Random k-SAT in which every clause is satisfied by a hidden model.
///
/// Returns the problem together with the planted model in signed notation.
///
/// # Errors
///
/// See [`random_k_sat`]. A `width` of zero is rejected with
/// [`ProblemError::ZeroWidth`], since empty clauses cannot hold the model.
pub fn planted_k_sat(
    num_vars: usize,
    num_clauses: usize,
    width: usize,
    rng: &mut fastrand::Rng,
) -> Result<(Problem, Solutions), ProblemError> {
    if width == 0 {
        return Err(ProblemError::ZeroWidth);
    }
    check_width(num_vars, width)?;
    let model: Vec<bool> = (0..num_vars).map(|_| rng.bool()).collect();

    let clauses = (0..num_clauses)
        .map(|_| {
            let clause = random_clause(num_vars, width, rng);
            let satisfied = clause
                .iter()
                .any(|lit| model[lit.variable().index()] == lit.polarity());
            if satisfied {
                return clause;
            }
            let flip = rng.usize(..clause.len());
            Clause::new(
                clause
                    .iter()
                    .enumerate()
                    .map(|(i, &lit)| if i == flip { lit.negated() } else { lit }),
            )
        })
        .collect();

    let solutions = model
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            #[allow(clippy::cast_possible_truncation)]
            Literal::new(Variable::new(i as u32), b).to_i32()
        })
        .collect();

    Ok((Problem::new(num_vars, clauses)?, solutions))
}

/// The pigeonhole principle for `holes + 1` pigeons and `holes` holes.
///
/// Variable `p * holes + h` states that pigeon `p` sits in hole `h`. Every
/// pigeon needs a hole and no hole takes two pigeons, which is impossible.
///
/// # Errors
///
/// If the instance is too large for a [`Problem`].
pub fn pigeonhole(holes: usize) -> Result<Problem, ProblemError> {
    let pigeons = holes
        .checked_add(1)
        .ok_or_else(|| too_many_variables(usize::MAX))?;
    let num_vars = pigeons
        .checked_mul(holes)
        .ok_or_else(|| too_many_variables(usize::MAX))?;
    if num_vars > MAX_VARIABLES {
        return Err(too_many_variables(num_vars));
    }

    // One clause per pigeon plus one per hole and pair of pigeons.
    let max_clauses = u32::MAX as usize;
    let num_clauses = holes
        .checked_mul(num_vars / 2)
        .and_then(|n| n.checked_add(pigeons))
        .unwrap_or(usize::MAX);
    if num_clauses > max_clauses {
        return Err(ProblemError::TooLarge {
            what: "clauses",
            count: num_clauses,
            max: max_clauses,
        });
    }

    #[allow(clippy::cast_possible_truncation)]
    let var = |p: usize, h: usize| Variable::new((p * holes + h) as u32);

    let mut clauses = Vec::with_capacity(num_clauses);
    for p in 0..pigeons {
        clauses.push(Clause::new((0..holes).map(|h| Literal::positive(var(p, h)))));
    }
    for h in 0..holes {
        for p in 0..pigeons {
            for q in p + 1..pigeons {
                clauses.push(Clause::new([
                    Literal::negative(var(p, h)),
                    Literal::negative(var(q, h)),
                ]));
            }
        }
    }
    Problem::new(num_vars, clauses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_k_sat_shape() {
        let mut rng = fastrand::Rng::with_seed(1);
        let p = random_k_sat(10, 40, 3, &mut rng).unwrap();
        assert_eq!(p.num_vars(), 10);
        assert_eq!(p.num_clauses(), 40);
        for clause in p.clauses() {
            assert_eq!(clause.len(), 3);
            let mut vars: Vec<_> = clause.iter().map(|l| l.variable()).collect();
            vars.sort();
            vars.dedup();
            assert_eq!(vars.len(), 3, "clause {clause} repeats a variable");
        }
    }

    #[test]
    fn test_random_k_sat_is_reproducible() {
        let a = random_k_sat(8, 20, 3, &mut fastrand::Rng::with_seed(42)).unwrap();
        let b = random_k_sat(8, 20, 3, &mut fastrand::Rng::with_seed(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_width_larger_than_vars_is_rejected() {
        let mut rng = fastrand::Rng::with_seed(0);
        assert_eq!(
            random_k_sat(2, 1, 3, &mut rng).unwrap_err(),
            ProblemError::WidthExceedsVariables {
                width: 3,
                num_vars: 2
            }
        );
    }

    #[test]
    fn test_planted_model_satisfies_problem() {
        let mut rng = fastrand::Rng::with_seed(9);
        let (p, model) = planted_k_sat(30, 150, 3, &mut rng).unwrap();
        assert_eq!(model.len(), 30);
        assert!(p.verify(&model));
    }

    #[test]
    fn test_planted_zero_width_is_rejected() {
        let mut rng = fastrand::Rng::with_seed(3);
        assert_eq!(
            planted_k_sat(5, 3, 0, &mut rng).unwrap_err(),
            ProblemError::ZeroWidth
        );
        // Plain random instances may still be built from empty clauses.
        assert!(random_k_sat(5, 3, 0, &mut rng).unwrap().has_empty_clause());
    }

    #[test]
    fn test_oversized_instances_are_rejected() {
        let mut rng = fastrand::Rng::with_seed(0);
        for holes in [usize::MAX, usize::MAX / 2, 1 << 20] {
            assert!(
                matches!(
                    pigeonhole(holes),
                    Err(ProblemError::TooLarge {
                        what: "variables",
                        ..
                    })
                ),
                "{holes} holes"
            );
        }
        assert!(matches!(
            planted_k_sat(usize::MAX, 1, 3, &mut rng),
            Err(ProblemError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_pigeonhole_shape() {
        let p = pigeonhole(3).unwrap();
        assert_eq!(p.num_vars(), 12);
        // 4 pigeon clauses, 3 holes * C(4, 2) exclusion clauses.
        assert_eq!(p.num_clauses(), 4 + 3 * 6);

        let p = pigeonhole(0).unwrap();
        assert!(p.has_empty_clause());
    }
}
