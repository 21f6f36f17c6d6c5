mod menu;
mod report;
mod scenario;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use mission_common::config::DEFAULT_CONFIG_PATH;
use mission_common::{ClientConfig, MissionControlClient};
use std::path::PathBuf;
use tracing::{error, info};

use scenario::Pacing;

#[derive(Parser)]
#[command(name = "mission-cli")]
#[command(about = "Report agent status, terminal logs and feed events to Mission Control")]
struct Args {
    /// Path to the client TOML config
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Dashboard URL (overrides config and MISSION_CONTROL_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Agent ID (overrides config and MISSION_CONTROL_AGENT_ID)
    #[arg(long)]
    agent_id: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Set the agent status
    Status {
        /// "working", "idle" or "offline"
        status: String,
        /// Description of the current task
        #[arg(long)]
        task: Option<String>,
    },
    /// Append a line to the agent terminal
    Log {
        /// "info", "success", "warning", "error" or "system"
        level: String,
        message: String,
        #[arg(long)]
        task_id: Option<String>,
        /// JSON object with extra data
        #[arg(long)]
        metadata: Option<String>,
    },
    /// Add an event to the live feed
    Event {
        /// Event type, e.g. "task_completed"
        event_type: String,
        message: String,
        #[arg(long)]
        task_id: Option<String>,
        /// JSON object with extra data
        #[arg(long)]
        metadata: Option<String>,
    },
    /// Show this agent's terminal logs
    Logs {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show recent feed events
    Events {
        #[arg(long)]
        limit: Option<u32>,
        /// Only events of this type
        #[arg(long = "type")]
        event_type: Option<String>,
    },
    /// Run a scripted agent scenario
    Scenario {
        #[arg(value_enum)]
        kind: ScenarioKind,
        /// Skip the scripted delays between steps
        #[arg(long)]
        no_delay: bool,
        /// Item count for the long-running scenario
        #[arg(long, default_value = "100")]
        items: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenarioKind {
    /// Full task workflow
    Workflow,
    /// Failure reporting
    Errors,
    /// Long task with progress updates
    LongRunning,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = ClientConfig::load_or_default(&args.config)
        .await
        .apply_env()
        .apply_overrides(args.base_url, args.agent_id);
    info!(
        "Reporting to {} as agent {}",
        config.base_url, config.agent_id
    );

    let client = MissionControlClient::from_config(&config);

    let result = match args.command {
        Some(Commands::Status { status, task }) => {
            report::update_status(&client, &status, task.as_deref()).await
        }
        Some(Commands::Log {
            level,
            message,
            task_id,
            metadata,
        }) => report::log(&client, &level, &message, task_id.as_deref(), metadata).await,
        Some(Commands::Event {
            event_type,
            message,
            task_id,
            metadata,
        }) => {
            report::add_event(
                &client,
                &event_type,
                &message,
                task_id.as_deref(),
                metadata,
            )
            .await
        }
        Some(Commands::Logs { limit }) => report::show_logs(&client, limit).await,
        Some(Commands::Events { limit, event_type }) => {
            report::show_events(&client, limit, event_type.as_deref()).await
        }
        Some(Commands::Scenario {
            kind,
            no_delay,
            items,
        }) => {
            let pacing = if no_delay {
                Pacing::Skip
            } else {
                Pacing::RealTime
            };
            scenario::handle_scenario_command(&client, kind, pacing, items).await
        }
        None => menu::run_interactive(&client).await,
    };

    if let Err(e) = &result {
        error!("Request failed: {}", e);
    }

    result
}
