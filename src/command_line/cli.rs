#![allow(clippy::cast_precision_loss)]

use anyhow::{Result, bail};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use dpll_sat::sat::generator::{pigeonhole, planted_k_sat, random_k_sat};
use dpll_sat::sat::memo::MemoCache;
use dpll_sat::sat::solver::Config;
use dpll_sat::sat::variable_selection::{
    FixedOrder, JeroslowWang, MostOccurrences, RandomOrder, VariableSelection,
};
use dpll_sat::{Assignment, Dpll, Problem, SolutionStats, SolverConfig, Verdict};
use itertools::Itertools;
use std::fmt;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};
use tracing::{debug, info};

/// Defines the command-line interface for the DPLL solver.
///
/// Problems are generated rather than read from files.
#[derive(Parser, Debug)]
#[command(name = "dpll-sat", version, about = "A DPLL SAT solver")]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub common: CommonOptions,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a uniform random k-SAT instance.
    Random {
        #[command(flatten)]
        shape: Shape,
    },

    /// Solve a random k-SAT instance with a planted (hidden) model.
    Planted {
        #[command(flatten)]
        shape: Shape,
    },

    /// Solve the pigeonhole formula for `holes + 1` pigeons, which is unsatisfiable.
    Pigeonhole {
        #[arg(long)]
        holes: usize,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Size and seed of a generated random instance.
#[derive(Args, Debug, Clone)]
pub(crate) struct Shape {
    /// Number of variables.
    #[arg(long)]
    pub vars: usize,

    /// Number of clauses. Defaults to the 3-SAT threshold ratio times `vars`.
    #[arg(long)]
    pub clauses: Option<usize>,

    /// Literals per clause.
    #[arg(long, default_value_t = 3)]
    pub width: usize,

    #[arg(long, default_value_t = 1)]
    pub seed: u64,
}

impl Shape {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn num_clauses(&self) -> usize {
        self.clauses.unwrap_or_else(|| {
            (self.vars as f64 * dpll_sat::sat::generator::THREE_SAT_THRESHOLD).round() as usize
        })
    }
}

/// Branching heuristic selectable at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum VariableSelectionType {
    #[default]
    MostOccurrences,
    Fixed,
    JeroslowWang,
    Random,
}

impl fmt::Display for VariableSelectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MostOccurrences => write!(f, "most-occurrences"),
            Self::Fixed => write!(f, "fixed"),
            Self::JeroslowWang => write!(f, "jeroslow-wang"),
            Self::Random => write!(f, "random"),
        }
    }
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug output, including per-search logging.
    #[arg(short, long, global = true, default_value_t = false)]
    pub debug: bool,

    /// Check a satisfying assignment against every clause.
    #[arg(long, global = true, action = ArgAction::Set, default_value_t = true)]
    pub verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(long, global = true, action = ArgAction::Set, default_value_t = true)]
    pub stats: bool,

    /// Print the satisfying assignment if the formula is satisfiable.
    #[arg(short, long, global = true, default_value_t = false)]
    pub print_solution: bool,

    /// Branching heuristic.
    #[arg(long, global = true, default_value_t = VariableSelectionType::MostOccurrences)]
    pub heuristic: VariableSelectionType,

    /// Cache verdicts of complete assignment states.
    #[arg(long, global = true, default_value_t = false)]
    pub memo: bool,

    /// Give up (answer UNKNOWN) after this many search calls.
    #[arg(long, global = true)]
    pub max_calls: Option<usize>,
}

/// Everything a finished solve reports back.
struct Outcome {
    verdict: Verdict,
    assignment: Assignment,
    stats: SolutionStats,
    elapsed: Duration,
    selector: &'static str,
}

/// Runs the parsed command line and maps the verdict to the usual SAT
/// competition exit codes.
pub(crate) fn run(cli: Cli) -> Result<ExitCode> {
    let time = Instant::now();
    let (problem, planted) = match &cli.command {
        Commands::Random { shape } => {
            let mut rng = fastrand::Rng::with_seed(shape.seed);
            let problem = random_k_sat(shape.vars, shape.num_clauses(), shape.width, &mut rng)?;
            (problem, false)
        }
        Commands::Planted { shape } => {
            let mut rng = fastrand::Rng::with_seed(shape.seed);
            let (problem, _) =
                planted_k_sat(shape.vars, shape.num_clauses(), shape.width, &mut rng)?;
            (problem, true)
        }
        Commands::Pigeonhole { holes } => (pigeonhole(*holes)?, false),
        Commands::Completions { shell } => {
            print_completions(*shell);
            return Ok(ExitCode::SUCCESS);
        }
    };
    let generate_time = time.elapsed();

    info!(
        vars = problem.num_vars(),
        clauses = problem.num_clauses(),
        "generated problem"
    );
    debug!("CNF: {problem}");

    let outcome = solve(&problem, &cli.common);

    if planted && outcome.verdict.is_unsat() {
        bail!("planted instance reported unsatisfiable");
    }

    if cli.common.verify {
        verify_solution(&problem, &outcome)?;
    }

    if cli.common.stats {
        let (allocated, resident) = memory_usage()?;
        print_stats(generate_time, &problem, &outcome, allocated, resident);
    }

    if cli.common.print_solution && outcome.verdict.is_sat() {
        println!("v {} 0", outcome.assignment.solutions().iter().join(" "));
    }

    println!("\n{}", outcome.verdict);
    Ok(match outcome.verdict {
        Verdict::Satisfiable => ExitCode::from(10),
        Verdict::Unsatisfiable => ExitCode::from(20),
        Verdict::Unknown => ExitCode::SUCCESS,
    })
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage() -> Result<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;

    epoch::advance()?;
    let allocated = stats::allocated::mib()?.read()? as f64 / MIB;
    let resident = stats::resident::mib()?.read()? as f64 / MIB;
    Ok((allocated, resident))
}

fn print_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
}

/// Maps the runtime heuristic and memo choice onto a solver configuration.
fn solve(problem: &Problem, common: &CommonOptions) -> Outcome {
    let limit = common.max_calls;
    match (common.heuristic, common.memo) {
        (VariableSelectionType::MostOccurrences, false) => {
            solve_with::<Config<MostOccurrences>>(problem, limit)
        }
        (VariableSelectionType::MostOccurrences, true) => {
            solve_with::<Config<MostOccurrences, MemoCache>>(problem, limit)
        }
        (VariableSelectionType::Fixed, false) => solve_with::<Config<FixedOrder>>(problem, limit),
        (VariableSelectionType::Fixed, true) => {
            solve_with::<Config<FixedOrder, MemoCache>>(problem, limit)
        }
        (VariableSelectionType::JeroslowWang, false) => {
            solve_with::<Config<JeroslowWang>>(problem, limit)
        }
        (VariableSelectionType::JeroslowWang, true) => {
            solve_with::<Config<JeroslowWang, MemoCache>>(problem, limit)
        }
        (VariableSelectionType::Random, false) => solve_with::<Config<RandomOrder>>(problem, limit),
        (VariableSelectionType::Random, true) => {
            solve_with::<Config<RandomOrder, MemoCache>>(problem, limit)
        }
    }
}

fn solve_with<C: SolverConfig>(problem: &Problem, max_calls: Option<usize>) -> Outcome {
    let limit = max_calls.unwrap_or(usize::MAX);
    let mut solver =
        Dpll::<C, _>::with_interrupt(problem, move |s: &SolutionStats| s.calls > limit);
    let selector = C::VariableSelector::new(problem).name();

    let time = Instant::now();
    let verdict = solver.solve();
    let elapsed = time.elapsed();

    debug!(%verdict, ?elapsed, "solved");

    Outcome {
        verdict,
        stats: solver.stats(),
        assignment: solver.into_assignment(),
        elapsed,
        selector,
    }
}

/// Checks a reported model against the problem.
fn verify_solution(problem: &Problem, outcome: &Outcome) -> Result<()> {
    if !outcome.verdict.is_sat() {
        return Ok(());
    }
    if !problem.is_satisfied_by(&outcome.assignment) {
        bail!("solution failed verification");
    }
    println!("Verified: true");
    Ok(())
}

fn stat_line(label: &str, value: impl fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

fn print_stats(
    generate_time: Duration,
    problem: &Problem,
    outcome: &Outcome,
    allocated: f64,
    resident: f64,
) {
    let s = &outcome.stats;
    let elapsed = outcome.elapsed.as_secs_f64();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Generate time (s)", format!("{:.3}", generate_time.as_secs_f64()));
    stat_line("Variables", problem.num_vars());
    stat_line("Clauses", problem.num_clauses());
    stat_line("Literals", problem.num_literals());
    stat_line("Max clause width", problem.max_clause_width());

    println!("========================[ Search Statistics ]========================");
    stat_line("Heuristic", outcome.selector);
    stat_line_with_rate("Calls", s.calls, elapsed);
    stat_line_with_rate("Decisions", s.decisions, elapsed);
    stat_line_with_rate("Propagations", s.propagations, elapsed);
    stat_line_with_rate("Pure literals", s.pure_literals, elapsed);
    stat_line_with_rate("Conflicts", s.conflicts, elapsed);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed);
    stat_line("Memo refutations", s.cache_hits);
    stat_line("Max depth", s.max_depth);
    stat_line("Assigned variables", outcome.assignment.num_assigned());
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed:.3}"));
    println!("=====================================================================");
}
