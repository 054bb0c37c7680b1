pub mod manifest;
pub mod python;

use libcircles_core::error::CirclesError;
use serde::{Deserialize, Serialize};

use crate::{config::CodegenConfig, synth::GeneratedUnit};

use self::{manifest::ManifestEmitter, python::PythonEmitter};

/// Renders generated units as source text.
pub trait Emitter {
    fn file_extension(&self) -> &'static str;

    fn emit(
        &self,
        contract: &str,
        units: &[GeneratedUnit],
    ) -> Result<String, CirclesError>;
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Python,
    Manifest,
}

impl OutputFormat {
    pub fn emitter(&self, cfg: &CodegenConfig) -> Box<dyn Emitter> {
        match self {
            OutputFormat::Python => Box::new(PythonEmitter::from(cfg)),
            OutputFormat::Manifest => Box::new(ManifestEmitter),
        }
    }
}
