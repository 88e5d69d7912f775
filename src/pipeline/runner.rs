//! Sequential pipeline runner.
//!
//! `Idle -> Running(i) -> Running(i+1) | Failed | Done`. The first failing step
//! stops the run; later steps are never resolved.

use crate::domain::error::PipelineError;
use crate::pipeline::registry::StepRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepEntry {
    pub name: String,
    pub target: String,
}

impl StepEntry {
    pub fn new(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunnerState {
    Idle,
    Running(usize),
    Done,
    Failed { step: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub completed: Vec<String>,
}

pub struct Runner<'a> {
    registry: &'a StepRegistry,
    state: RunnerState,
}

impl<'a> Runner<'a> {
    pub fn new(registry: &'a StepRegistry) -> Self {
        Self {
            registry,
            state: RunnerState::Idle,
        }
    }

    pub fn state(&self) -> &RunnerState {
        &self.state
    }

    pub fn run(&mut self, steps: &[StepEntry]) -> Result<PipelineReport, PipelineError> {
        let mut report = PipelineReport::default();

        for (i, entry) in steps.iter().enumerate() {
            self.state = RunnerState::Running(i);
            log::info!("[{}/{}] {}", i + 1, steps.len(), entry.name);

            let outcome = self
                .registry
                .resolve(&entry.target)
                .and_then(|step| step());

            if let Err(source) = outcome {
                log::error!("step {} failed: {}", entry.name, source);
                self.state = RunnerState::Failed {
                    step: entry.name.clone(),
                };
                return Err(PipelineError::StepFailed {
                    step: entry.name.clone(),
                    source: Box::new(source),
                });
            }
            report.completed.push(entry.name.clone());
        }

        self.state = RunnerState::Done;
        log::info!("pipeline finished: {} steps", report.completed.len());
        Ok(report)
    }
}

pub fn run_pipeline(
    steps: &[StepEntry],
    registry: &StepRegistry,
) -> Result<PipelineReport, PipelineError> {
    Runner::new(registry).run(steps)
}
