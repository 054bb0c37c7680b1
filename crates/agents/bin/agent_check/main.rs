use std::path::PathBuf;

use clap::Parser;
use libcircles_agents::{
    config::AgentsConfig, descriptor::AgentConfig, registry::ActionRegistry,
};
use libcircles_codegen::generator::ContractGenerator;
use libcircles_utils::{
    config::ConfigDefault,
    log::{config::LogConfig, error, info},
};

/// Validate an agent behavior document, optionally against contract ABIs.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Agent config file. Defaults to `agents.config_path`.
    config: Option<PathBuf>,

    /// Contract ABI files whose strategies the actions must resolve to.
    #[arg(long)]
    abi: Vec<PathBuf>,

    #[arg(short, long)]
    level: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // logger
    let mut log_cfg = LogConfig::must_load_or_default();
    log_cfg.console_level = args.level.clone().unwrap_or(log_cfg.console_level);
    log_cfg.init();

    let path = match args.config {
        Some(path) => path,
        None => PathBuf::from(AgentsConfig::load_or_default()?.config_path),
    };
    let config = AgentConfig::load(&path)?;
    for (name, profile) in &config.profiles {
        info!(
            profile = name.as_str(),
            weight = config.agent_distribution.get(name).copied().unwrap_or(0),
            actions = profile.available_actions.len(),
            sequences = profile.action_sequences.len(),
            "profile ok"
        );
    }

    if args.abi.is_empty() {
        return Ok(());
    }
    let mut registry = ActionRegistry::new();
    for abi in &args.abi {
        registry.register_generator(&ContractGenerator::from_abi_file(abi)?);
    }
    info!("{} actions registered", registry.len());
    let issues = registry.check(&config);
    for issue in &issues {
        error!("{}", issue);
    }
    if !issues.is_empty() {
        return Err(format!("{} unknown actions in {}", issues.len(), path.display()).into());
    }
    Ok(())
}
