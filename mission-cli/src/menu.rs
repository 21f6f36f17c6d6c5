use anyhow::Result;
use mission_common::MissionControlClient;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::scenario::{self, Pacing};
use crate::ScenarioKind;

const DEFAULT_ITEMS: u32 = 100;

pub fn parse_choice(input: &str) -> Option<ScenarioKind> {
    match input.trim() {
        "1" => Some(ScenarioKind::Workflow),
        "2" => Some(ScenarioKind::Errors),
        "3" => Some(ScenarioKind::LongRunning),
        _ => None,
    }
}

/// Prompt for one of the three scenarios and run it in real time
pub async fn run_interactive(client: &MissionControlClient) -> Result<()> {
    println!("Mission Control - Agent Integration Examples");
    println!();
    println!("Choose an example:");
    println!("1. Full workflow");
    println!("2. Error handling");
    println!("3. Long-running task with progress");
    print!("\nOption (1-3): ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;

    match parse_choice(&line) {
        Some(kind) => {
            scenario::handle_scenario_command(client, kind, Pacing::RealTime, DEFAULT_ITEMS).await
        }
        None => {
            println!("Invalid option");
            Ok(())
        }
    }
}
