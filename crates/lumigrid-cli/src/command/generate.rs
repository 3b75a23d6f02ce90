use std::path::PathBuf;

use lumigrid_engine::{Instance, InstanceSeed};
use rand::Rng as _;

use crate::util;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Seed for deterministic generation (up to 32 hex digits); random if
    /// omitted
    #[arg(long)]
    seed: Option<InstanceSeed>,
    /// Where to write the instance JSON (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let instance = Instance::generate(seed);

    eprintln!("seed = {seed}");
    eprintln!(
        "H = {}, W = {}, crystals = {}",
        instance.target.height(),
        instance.target.width(),
        instance.target.num_crystals(),
    );
    eprintln!(
        "costs: lantern = {}, mirror = {}, obstacle = {}",
        instance.costs.lantern, instance.costs.mirror, instance.costs.obstacle,
    );
    eprintln!(
        "budgets: mirrors = {}, obstacles = {}",
        instance.budgets.max_mirrors, instance.budgets.max_obstacles,
    );

    util::save_json(&instance, arg.output.clone())
}
