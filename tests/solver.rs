use dpll_sat::sat::generator::{pigeonhole, planted_k_sat, random_k_sat};
use dpll_sat::sat::memo::MemoCache;
use dpll_sat::sat::solver::Config;
use dpll_sat::sat::variable_selection::{FixedOrder, JeroslowWang, MostOccurrences, RandomOrder};
use dpll_sat::{
    Assignment, Dpll, MemoConfig, Problem, SolutionStats, SolverConfig, Value, Variable, Verdict,
    decide, decide_with,
};
use proptest::prelude::*;

/// Satisfiability by trying every total assignment.
fn brute_force(problem: &Problem) -> bool {
    let n = problem.num_vars();
    (0u32..1 << n).any(|mask| {
        let model = (0..n)
            .map(|i| {
                let v = i32::try_from(i + 1).unwrap();
                if mask & (1 << i) == 0 { -v } else { v }
            })
            .collect();
        problem.verify(&model)
    })
}

fn check<C: SolverConfig>(problem: &Problem, expected: bool) -> Result<(), TestCaseError> {
    let (verdict, assignment) = decide_with::<C>(problem);
    prop_assert_eq!(verdict.to_bool(), Some(expected), "{}", problem);
    if expected {
        prop_assert!(problem.is_satisfied_by(&assignment));
        prop_assert!(problem.verify(&assignment.solutions()));
    } else {
        prop_assert_eq!(assignment.num_assigned(), 0);
    }
    Ok(())
}

fn small_problem() -> impl Strategy<Value = Problem> {
    (1usize..=10).prop_flat_map(|n| {
        let bound = i32::try_from(n).unwrap();
        let literal = (1..=bound, any::<bool>()).prop_map(|(v, neg)| if neg { -v } else { v });
        let clause = prop::collection::vec(literal, 0..=4);
        prop::collection::vec(clause, 0..=(4 * n)).prop_map(move |clauses| {
            Problem::from_signed_with_vars(n, clauses).expect("literals are in range")
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn every_configuration_agrees_with_brute_force(problem in small_problem()) {
        let expected = brute_force(&problem);
        check::<Config<MostOccurrences>>(&problem, expected)?;
        check::<Config<FixedOrder>>(&problem, expected)?;
        check::<Config<JeroslowWang>>(&problem, expected)?;
        check::<Config<RandomOrder>>(&problem, expected)?;
        check::<Config<MostOccurrences, MemoCache>>(&problem, expected)?;
        check::<Config<FixedOrder, MemoCache>>(&problem, expected)?;
    }

    #[test]
    fn interrupted_search_leaves_start_untouched(problem in small_problem(), limit in 1usize..20) {
        let mut solver =
            Dpll::<MemoConfig, _>::with_interrupt(&problem, move |s: &SolutionStats| s.calls > limit);
        let mut assignment = Assignment::for_problem(&problem);
        let verdict = solver.solve_from(&mut assignment);
        match verdict {
            Verdict::Satisfiable => prop_assert!(problem.is_satisfied_by(&assignment)),
            _ => prop_assert_eq!(assignment.num_assigned(), 0),
        }
        if verdict == Verdict::Unknown {
            prop_assert_eq!(solver.stats().calls, limit + 1);
        } else {
            prop_assert_eq!(verdict.to_bool(), Some(brute_force(&problem)));
        }
    }
}

#[test]
fn empty_formula_is_satisfiable() {
    let problem = Problem::from_signed(Vec::new()).unwrap();
    let (verdict, assignment) = decide(&problem);
    assert_eq!(verdict, Verdict::Satisfiable);
    assert_eq!(assignment.num_vars(), 0);
}

#[test]
fn empty_clause_is_unsatisfiable() {
    let problem = Problem::from_signed(vec![vec![1, 2], vec![]]).unwrap();
    assert_eq!(decide(&problem).0, Verdict::Unsatisfiable);
}

#[test]
fn contradictory_units_are_unsatisfiable() {
    let problem = Problem::from_signed(vec![vec![1], vec![-1]]).unwrap();
    let (verdict, assignment) = decide(&problem);
    assert_eq!(verdict, Verdict::Unsatisfiable);
    assert_eq!(assignment.value(Variable::new(0)), Value::Unknown);
}

#[test]
fn chain_of_implications_is_propagated() {
    let problem = Problem::from_signed(vec![vec![1], vec![-1, 2], vec![-2, 3], vec![-3, 4]]).unwrap();
    let mut solver = Dpll::<MemoConfig>::new(&problem);
    assert_eq!(solver.solve(), Verdict::Satisfiable);
    assert_eq!(solver.solutions(), vec![1, 2, 3, 4]);
    assert_eq!(solver.stats().decisions, 0);
    assert_eq!(solver.stats().propagations, 4);
}

#[test]
fn preset_assignment_is_respected() {
    let problem = Problem::from_signed(vec![vec![1, 2], vec![-2, 3]]).unwrap();
    let mut solver = Dpll::<Config<FixedOrder>>::new(&problem);

    let mut assignment = Assignment::for_problem(&problem);
    assignment.set(Variable::new(0), Value::False);
    assert_eq!(solver.solve_from(&mut assignment), Verdict::Satisfiable);
    assert_eq!(assignment.value(Variable::new(0)), Value::False);
    assert_eq!(assignment.value(Variable::new(1)), Value::True);
    assert_eq!(assignment.value(Variable::new(2)), Value::True);

    let mut assignment = Assignment::for_problem(&problem);
    assignment.set(Variable::new(0), Value::False);
    assignment.set(Variable::new(2), Value::False);
    let before = assignment.clone();
    assert_eq!(solver.solve_from(&mut assignment), Verdict::Unsatisfiable);
    assert_eq!(assignment, before);
}

#[test]
fn planted_instances_are_satisfiable() {
    for seed in 0..10 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let (problem, _) = planted_k_sat(40, 170, 3, &mut rng).unwrap();
        let (verdict, assignment) = decide_with::<Config<JeroslowWang>>(&problem);
        assert_eq!(verdict, Verdict::Satisfiable, "seed {seed}");
        assert!(problem.is_satisfied_by(&assignment));
    }
}

#[test]
fn pigeonhole_is_unsatisfiable() {
    for holes in 1..=4 {
        let problem = pigeonhole(holes).unwrap();
        assert_eq!(decide(&problem).0, Verdict::Unsatisfiable, "{holes} holes");
        assert_eq!(
            decide_with::<MemoConfig>(&problem).0,
            Verdict::Unsatisfiable,
            "{holes} holes with memo"
        );
    }
}

#[test]
fn heuristics_agree_on_threshold_instances() {
    for seed in 0..20 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let problem = random_k_sat(12, 51, 3, &mut rng).unwrap();
        let expected = brute_force(&problem);
        for verdict in [
            decide_with::<Config<MostOccurrences>>(&problem).0,
            decide_with::<Config<FixedOrder>>(&problem).0,
            decide_with::<Config<JeroslowWang>>(&problem).0,
            decide_with::<Config<RandomOrder>>(&problem).0,
            decide_with::<MemoConfig>(&problem).0,
        ] {
            assert_eq!(verdict.to_bool(), Some(expected), "seed {seed}");
        }
    }
}
