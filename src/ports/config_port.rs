//! Configuration resolution port.

use crate::domain::error::PipelineError;
use crate::domain::settings::{ConfigDocument, Settings};

pub trait ConfigSource {
    /// Resolves settings and the configuration document once per run.
    fn resolve(&self) -> Result<(Settings, ConfigDocument), PipelineError>;
}
