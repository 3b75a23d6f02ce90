use std::{path::PathBuf, time::Duration};

use lumigrid_engine::{Instance, InstanceSeed};
use lumigrid_evaluator::{Evaluation, ScoreReport};

use crate::{command, solver, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct EvaluateArg {
    /// Solver command line, split on whitespace into program and arguments
    #[arg(long)]
    exec: String,
    /// Instance JSON file; generated from the seed if omitted
    #[arg(long)]
    instance: Option<PathBuf>,
    /// Seed for instance generation when no instance file is given
    #[arg(long)]
    seed: Option<InstanceSeed>,
    /// Seconds to wait for each solver response line
    #[arg(long, default_value_t = 10)]
    timeout: u64,
    /// Print the lit board to stderr after the replay
    #[arg(long)]
    show_grid: bool,
    /// Where to write the score report JSON (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &EvaluateArg) -> anyhow::Result<()> {
    let instance = command::load_instance(arg.instance.as_ref(), arg.seed)?;
    let report = evaluate(arg, &instance);

    eprintln!("Score = {}", report.score);
    util::save_json(&report, arg.output.clone())
}

/// Runs the solver and replays its answer. Any protocol or placement
/// failure is reported on stderr and collapses the run to the sentinel
/// score rather than an error exit, so batch runs keep going.
fn evaluate(arg: &EvaluateArg, instance: &Instance) -> ScoreReport {
    let timeout = Duration::from_secs(arg.timeout);
    let items = match solver::run_solver(&arg.exec, instance, timeout) {
        Ok(items) => items,
        Err(err) => {
            eprintln!("{err}");
            return ScoreReport::invalid();
        }
    };

    let mut evaluation = Evaluation::new(instance);
    if let Err(err) = evaluation.replay(&items) {
        eprintln!("{err}");
        return ScoreReport::invalid();
    }

    if arg.show_grid {
        for row in evaluation.playfield().result().rows() {
            eprintln!("{row}");
        }
    }
    evaluation.finish()
}
