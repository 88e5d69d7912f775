//! CLI definition and dispatch.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::logging::{setup_logging, DEFAULT_LOGGING_PATH};
use crate::pipeline::dag::{self, PipelineName};
use crate::pipeline::registry::StepRegistry;
use crate::pipeline::runner::Runner;

#[derive(Parser, Debug)]
#[command(name = "featurepipe", about = "Technical feature pipeline runner")]
pub struct Cli {
    /// Pipeline to run
    #[arg(long, value_enum, default_value_t = PipelineName::Minimal)]
    pub pipeline: PipelineName,

    /// Declarative logging configuration
    #[arg(long, default_value = DEFAULT_LOGGING_PATH)]
    pub log_config: PathBuf,
}

pub fn run(cli: Cli) -> ExitCode {
    if let Err(e) = setup_logging(&cli.log_config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let registry = StepRegistry::builtin();
    run_with_registry(cli.pipeline, &registry)
}

pub fn run_with_registry(pipeline: PipelineName, registry: &StepRegistry) -> ExitCode {
    let steps = dag::pipeline(pipeline);
    match Runner::new(registry).run(&steps) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
