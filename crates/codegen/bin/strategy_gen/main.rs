use std::path::PathBuf;

use clap::Parser;
use libcircles_codegen::{
    config::CodegenConfig, emit::OutputFormat, generator::ContractGenerator,
};
use libcircles_utils::{
    config::ConfigDefault,
    log::{config::LogConfig, info},
};

/// Generate one parameter strategy per non-view function of each ABI.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Contract ABI JSON files.
    #[arg(required = true)]
    abi_paths: Vec<PathBuf>,

    #[arg(short, long)]
    level: Option<String>,

    #[arg(short, long)]
    out: Option<String>,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Override the contract name derived from the file name.
    /// Only valid with a single ABI file.
    #[arg(short, long)]
    contract: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Cli::parse();

    // logger
    let mut log_cfg = LogConfig::must_load_or_default();
    log_cfg.console_level = args.level.clone().unwrap_or(log_cfg.console_level);
    log_cfg.init();

    let mut cfg = CodegenConfig::load_or_default()?;
    cfg.out_dir = args.out.unwrap_or(cfg.out_dir);
    cfg.format = args.format.unwrap_or(cfg.format);

    if args.contract.is_some() && args.abi_paths.len() > 1 {
        return Err("--contract requires exactly one ABI file".into());
    }

    let emitter = cfg.format.emitter(&cfg);
    let out_dir = PathBuf::from(&cfg.out_dir);
    for abi_path in &args.abi_paths {
        let mut generator = ContractGenerator::from_abi_file(abi_path)?;
        if let Some(name) = &args.contract {
            generator = generator.with_contract_name(name.clone());
        }
        let path = generator.generate(emitter.as_ref(), &out_dir)?;
        info!("generated {}", path.display());
    }
    Ok(())
}
