use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lumigrid_engine::{Instance, InstanceSeed};
use rand::Rng as _;

use self::{evaluate::EvaluateArg, generate::GenerateArg, score::ScoreArg};
use crate::util;

mod evaluate;
mod generate;
mod score;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Generate a puzzle instance from a seed
    Generate(#[clap(flatten)] GenerateArg),
    /// Run a candidate solver against an instance and score it
    Evaluate(#[clap(flatten)] EvaluateArg),
    /// Score a placement list from a file against an instance
    Score(#[clap(flatten)] ScoreArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Generate(arg) => generate::run(&arg)?,
        Mode::Evaluate(arg) => evaluate::run(&arg)?,
        Mode::Score(arg) => score::run(&arg)?,
    }
    Ok(())
}

/// Resolves the puzzle for a run: an instance file wins over a seed, and a
/// missing seed means a random one (reported on stderr so the run can be
/// reproduced).
pub(crate) fn load_instance(
    instance_path: Option<&PathBuf>,
    seed: Option<InstanceSeed>,
) -> anyhow::Result<Instance> {
    if let Some(path) = instance_path {
        return util::read_json_file("instance", path);
    }
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    eprintln!("seed = {seed}");
    Ok(Instance::generate(seed))
}
