//! Domain error types.

/// Top-level error type for featurepipe.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("cannot read config file {file}: {source}")]
    ConfigRead {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("store error: {reason}")]
    Store { reason: String },

    #[error("malformed series for {asset}: {reason}")]
    MalformedSeries { asset: String, reason: String },

    #[error("invalid step target {0:?} (expected \"<module-path>:<symbol>\")")]
    InvalidTarget(String),

    #[error("no step registered for target {0:?}")]
    UnresolvedStep(String),

    #[error("step {step} failed: {source}")]
    StepFailed {
        step: String,
        #[source]
        source: Box<PipelineError>,
    },
}

impl PipelineError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PipelineError::ConfigRead { .. }
                | PipelineError::ConfigParse { .. }
                | PipelineError::ConfigMissing { .. }
                | PipelineError::ConfigInvalid { .. }
        )
    }
}

impl From<&PipelineError> for std::process::ExitCode {
    fn from(err: &PipelineError) -> Self {
        std::process::ExitCode::from(exit_status(err))
    }
}

fn exit_status(err: &PipelineError) -> u8 {
    match err {
        PipelineError::ConfigRead { .. }
        | PipelineError::ConfigParse { .. }
        | PipelineError::ConfigMissing { .. }
        | PipelineError::ConfigInvalid { .. } => 2,
        PipelineError::Store { .. } | PipelineError::MalformedSeries { .. } => 3,
        PipelineError::InvalidTarget(_) | PipelineError::UnresolvedStep(_) => 4,
        PipelineError::StepFailed { source, .. } => exit_status(source),
    }
}
