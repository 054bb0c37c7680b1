use libcircles_utils::config::Config;

use crate::emit::OutputFormat;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CodegenConfig {
    pub out_dir: String,
    pub format: OutputFormat,
    /// Module providing the `BaseStrategy` class.
    pub base_strategy_module: String,
    /// Module providing the `SimulationContext` class.
    pub context_module: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            out_dir: "generated".to_string(),
            format: OutputFormat::Python,
            base_strategy_module: "src.protocols.handler_strategies.base"
                .to_string(),
            context_module: "src.framework.core.context".to_string(),
        }
    }
}

impl Config for CodegenConfig {
    fn section_name() -> &'static str {
        "codegen"
    }
}
