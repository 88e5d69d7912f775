//! Named pipelines. Every pipeline is currently a single linear chain.

use crate::pipeline::baseline_features;
use crate::pipeline::runner::StepEntry;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PipelineName {
    #[default]
    Minimal,
}

pub fn dag_minimal() -> Vec<StepEntry> {
    vec![StepEntry::new("baseline_features", baseline_features::TARGET)]
}

pub fn pipeline(name: PipelineName) -> Vec<StepEntry> {
    match name {
        PipelineName::Minimal => dag_minimal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::registry::StepRegistry;

    #[test]
    fn minimal_is_single_baseline_step() {
        let steps = pipeline(PipelineName::Minimal);
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].name, "baseline_features");
    }

    #[test]
    fn every_builtin_pipeline_resolves() {
        let registry = StepRegistry::builtin();
        for name in PipelineName::value_variants() {
            for step in pipeline(*name) {
                assert!(registry.resolve(&step.target).is_ok(), "{}", step.target);
            }
        }
    }
}
