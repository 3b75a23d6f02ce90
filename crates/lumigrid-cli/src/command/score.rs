use std::{fs, path::PathBuf};

use anyhow::Context as _;
use lumigrid_engine::InstanceSeed;
use lumigrid_evaluator::{Evaluation, ReplayItem, ScoreReport};

use crate::{command, solver, util};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    /// Placement file with one `ROW COL TYPE` line per item
    #[arg(long)]
    placements: PathBuf,
    /// Instance JSON file; generated from the seed if omitted
    #[arg(long)]
    instance: Option<PathBuf>,
    /// Seed for instance generation when no instance file is given
    #[arg(long)]
    seed: Option<InstanceSeed>,
    /// Print the lit board to stderr after the replay
    #[arg(long)]
    show_grid: bool,
    /// Where to write the score report JSON (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let instance = command::load_instance(arg.instance.as_ref(), arg.seed)?;
    let items = read_placements(&arg.placements)?;

    let mut evaluation = Evaluation::new(&instance);
    let report = match evaluation.replay(&items) {
        Ok(()) => {
            if arg.show_grid {
                for row in evaluation.playfield().result().rows() {
                    eprintln!("{row}");
                }
            }
            evaluation.finish()
        }
        Err(err) => {
            eprintln!("{err}");
            ScoreReport::invalid()
        }
    };

    eprintln!("Score = {}", report.score);
    util::save_json(&report, arg.output.clone())
}

/// Reads a placement file. Blank lines are skipped; every other line must
/// parse as a placement.
fn read_placements(path: &PathBuf) -> anyhow::Result<Vec<ReplayItem>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read placements file: {}", path.display()))?;
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, line)| {
            solver::parse_item_line(index, line)
                .with_context(|| format!("{}:{}", path.display(), index + 1))
        })
        .collect()
}
