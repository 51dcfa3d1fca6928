use anyhow::Result;
use clap::Parser;
use lpmodel::{CLIArguments, assignment_main, knapsack_main, simple_mip_main};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = CLIArguments::parse();

    match args {
        CLIArguments::SimpleMip(args) => simple_mip_main(args),
        CLIArguments::Assignment(args) => assignment_main(args),
        CLIArguments::Knapsack(args) => knapsack_main(args),
    }
}
