use clap::Parser;
use memorito_cli::{Args, run};

fn main() -> anyhow::Result<()> {
    run(Args::parse())
}
