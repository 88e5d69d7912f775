//! Static step registry: target identifiers mapped to zero-argument units.
//!
//! Targets use the `"<module-path>:<symbol>"` form and are looked up only when
//! the runner reaches them.

use crate::domain::error::PipelineError;
use crate::pipeline::baseline_features;
use std::collections::HashMap;

pub type StepFn = Box<dyn Fn() -> Result<(), PipelineError>>;

#[derive(Default)]
pub struct StepRegistry {
    steps: HashMap<String, StepFn>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every step shipped with the crate.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(baseline_features::TARGET, baseline_features::run);
        registry
    }

    /// Registers `step` under `target`, replacing any previous entry.
    pub fn register<F>(&mut self, target: &str, step: F)
    where
        F: Fn() -> Result<(), PipelineError> + 'static,
    {
        self.steps.insert(target.to_string(), Box::new(step));
    }

    pub fn resolve(&self, target: &str) -> Result<&StepFn, PipelineError> {
        parse_target(target)?;
        self.steps
            .get(target)
            .ok_or_else(|| PipelineError::UnresolvedStep(target.to_string()))
    }
}

/// Splits a target into `(module_path, symbol)`.
pub fn parse_target(target: &str) -> Result<(&str, &str), PipelineError> {
    match target.split_once(':') {
        Some((module, symbol))
            if !module.trim().is_empty() && !symbol.trim().is_empty() && !symbol.contains(':') =>
        {
            Ok((module, symbol))
        }
        _ => Err(PipelineError::InvalidTarget(target.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn parse_target_splits_module_and_symbol() {
        assert_eq!(
            parse_target("modules.baseline_features:run").unwrap(),
            ("modules.baseline_features", "run")
        );
    }

    #[test]
    fn parse_target_rejects_malformed() {
        for target in ["", "run", ":run", "module:", "a:b:c"] {
            assert!(
                matches!(parse_target(target), Err(PipelineError::InvalidTarget(_))),
                "{target:?} should be rejected"
            );
        }
    }

    #[test]
    fn builtin_registers_baseline_features() {
        let registry = StepRegistry::builtin();
        assert!(registry.resolve(baseline_features::TARGET).is_ok());
    }

    #[test]
    fn unknown_target_is_unresolved() {
        let registry = StepRegistry::new();
        assert!(matches!(
            registry.resolve("modules.nowhere:run"),
            Err(PipelineError::UnresolvedStep(_))
        ));
    }

    #[test]
    fn resolution_does_not_invoke() {
        let calls = Rc::new(Cell::new(0));
        let mut registry = StepRegistry::new();
        let counter = Rc::clone(&calls);
        registry.register("test:step", move || {
            counter.set(counter.get() + 1);
            Ok(())
        });

        let step = registry.resolve("test:step").unwrap();
        assert_eq!(calls.get(), 0);
        step().unwrap();
        assert_eq!(calls.get(), 1);
    }
}
