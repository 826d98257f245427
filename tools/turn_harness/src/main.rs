use std::{fs, io, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use intellect_core::{
    load_intellect_config_from_env, manage_agents, IntellectConfig, PlayTurnApi, Scenario,
    TieBreaker,
};
use serde_json::json;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run one basic intellect allocation turn", long_about = None)]
struct Args {
    /// Scenario JSON holding `state` and `data`
    #[arg(long)]
    scenario: PathBuf,

    /// Tuning config JSON (defaults to INTELLECT_CONFIG_PATH, then the builtin)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for tie-breaks
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Include the issued commands in the output
    #[arg(long)]
    print_commands: bool,

    /// Include the resulting game state in the output
    #[arg(long)]
    print_state: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;

    let scenario_json = fs::read_to_string(&args.scenario)
        .with_context(|| format!("Failed to read scenario at {}", args.scenario.display()))?;
    let scenario = Scenario::from_json_str(&scenario_json).with_context(|| {
        format!(
            "Failed to parse scenario JSON at {}",
            args.scenario.display()
        )
    })?;

    let mut api = scenario.into_session();
    let mut tie_breaker = TieBreaker::from_seed(args.seed);
    info!(
        scenario = %args.scenario.display(),
        seed = args.seed,
        turn = api.game_state().turn,
        "turn_harness.start"
    );
    let report = manage_agents(&mut api, &config, &mut tie_breaker)
        .with_context(|| "Allocation turn aborted")?;

    let mut output = json!({ "report": report });
    if args.print_commands {
        output["commands"] = serde_json::to_value(api.command_log())?;
    }
    if args.print_state {
        output["state"] = serde_json::to_value(api.game_state())?;
    }
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Arc<IntellectConfig>> {
    match path {
        Some(path) => {
            let config = IntellectConfig::from_file(path)
                .with_context(|| format!("Failed to load config at {}", path.display()))?;
            Ok(Arc::new(config))
        }
        None => Ok(load_intellect_config_from_env().0),
    }
}
