use clap::Parser;
use featurepipe::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    run(Cli::parse())
}
