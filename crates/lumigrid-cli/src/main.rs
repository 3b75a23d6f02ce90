mod command;
mod solver;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
