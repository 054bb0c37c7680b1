use std::path::{Path, PathBuf};

use libcircles_core::{
    abi::{function_descriptors, FunctionDescriptor},
    error::CirclesError,
};
use libcircles_utils::log::{debug, info};

use crate::{
    emit::Emitter,
    naming::contract_name_from_path,
    synth::{synthesize, GeneratedUnit},
};

/// Generates the strategies of one contract.
#[derive(Clone, Debug)]
pub struct ContractGenerator {
    pub contract_name: String,
    pub functions: Vec<FunctionDescriptor>,
}

impl ContractGenerator {
    pub fn new(
        contract_name: impl Into<String>,
        functions: Vec<FunctionDescriptor>,
    ) -> Self {
        Self {
            contract_name: contract_name.into(),
            functions,
        }
    }

    pub fn from_abi_str(
        contract_name: impl Into<String>,
        abi: &str,
    ) -> Result<Self, CirclesError> {
        Ok(Self::new(contract_name, function_descriptors(abi)?))
    }

    pub fn from_abi_file(path: impl AsRef<Path>) -> Result<Self, CirclesError> {
        let path = path.as_ref();
        let contract_name = contract_name_from_path(path).ok_or_else(|| {
            CirclesError::Abi(format!(
                "cannot derive contract name from {}",
                path.display()
            ))
        })?;
        info!(contract = contract_name.as_str(), "loading abi from {}", path.display());
        let abi = std::fs::read_to_string(path)?;
        Self::from_abi_str(contract_name, &abi)
    }

    pub fn with_contract_name(mut self, name: impl Into<String>) -> Self {
        self.contract_name = name.into();
        self
    }

    pub fn units(&self) -> Vec<GeneratedUnit> {
        synthesize(&self.functions)
    }

    pub fn output_path(&self, emitter: &dyn Emitter, out_dir: &Path) -> PathBuf {
        out_dir.join(format!(
            "{}_strategies.{}",
            self.contract_name.to_lowercase(),
            emitter.file_extension()
        ))
    }

    /// Writes the emitted strategies into `out_dir` and returns the file path.
    pub fn generate(
        &self,
        emitter: &dyn Emitter,
        out_dir: &Path,
    ) -> Result<PathBuf, CirclesError> {
        let units = self.units();
        debug!(
            contract = self.contract_name.as_str(),
            functions = self.functions.len(),
            units = units.len(),
            "synthesized strategies"
        );
        let content = emitter.emit(&self.contract_name, &units)?;
        std::fs::create_dir_all(out_dir)?;
        let path = self.output_path(emitter, out_dir);
        std::fs::write(&path, content)?;
        info!(
            contract = self.contract_name.as_str(),
            "wrote {} strategies to {}",
            units.len(),
            path.display()
        );
        Ok(path)
    }
}
