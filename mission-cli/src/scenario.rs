use anyhow::{anyhow, Result};
use mission_common::MissionControlClient;
use mission_protocol::{AgentStatus, EventType, Metadata};
use serde_json::json;
use tokio::time::{sleep, Duration};
use tracing::info;

use crate::ScenarioKind;

const TASK_ID: &str = "j9876543210";
const DASHBOARD_URL: &str = "https://mission-control-ui-seven.vercel.app";

const WORKFLOW_TASK: &str = "Build and deploy frontend";
const WORKFLOW_STEPS: [(&str, u64); 5] = [
    ("Installing dependencies...", 2),
    ("Running linter...", 1),
    ("Building production bundle...", 3),
    ("Running tests...", 2),
    ("Deploying to Vercel...", 4),
];

const ITEM_DELAY: Duration = Duration::from_millis(100);
const PROGRESS_EVERY: u32 = 10;

/// Whether scenario steps wait out their scripted durations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    RealTime,
    Skip,
}

impl Pacing {
    async fn wait(self, duration: Duration) {
        if self == Pacing::RealTime {
            sleep(duration).await;
        }
    }
}

pub async fn handle_scenario_command(
    client: &MissionControlClient,
    kind: ScenarioKind,
    pacing: Pacing,
    items: u32,
) -> Result<()> {
    match kind {
        ScenarioKind::Workflow => run_workflow(client, pacing).await,
        ScenarioKind::Errors => run_error_handling(client, pacing).await,
        ScenarioKind::LongRunning => run_long_running(client, pacing, items).await,
    }
}

fn object(value: serde_json::Value) -> Option<Metadata> {
    match value {
        serde_json::Value::Object(map) => Some(map),
        _ => None,
    }
}

/// Full agent lifecycle: come online, pick up a task, report each step,
/// finish and go idle
pub async fn run_workflow(client: &MissionControlClient, pacing: Pacing) -> Result<()> {
    println!("🤖 Agent starting...");

    client.update_status(AgentStatus::Idle, None).await?;
    client
        .system("Agent initialized and ready for tasks", None, None)
        .await?;
    client
        .add_event(
            EventType::AgentOnline,
            "Dev Agent is now online",
            None,
            None,
        )
        .await?;

    pacing.wait(Duration::from_secs(1)).await;

    client
        .update_status(AgentStatus::Working, Some(WORKFLOW_TASK))
        .await?;
    client
        .info(format!("Starting task: {}", WORKFLOW_TASK), None, None)
        .await?;
    client
        .add_event(
            EventType::TaskStarted,
            format!("Dev Agent started working on '{}'", WORKFLOW_TASK),
            Some(TASK_ID),
            None,
        )
        .await?;

    let total = WORKFLOW_STEPS.len();
    for (i, (step, seconds)) in WORKFLOW_STEPS.iter().enumerate() {
        let index = i + 1;
        info!("Workflow step {}/{}: {}", index, total, step);

        client
            .info(
                format!("[{}/{}] {}", index, total, step),
                None,
                object(json!({"step": index, "total": total})),
            )
            .await?;
        pacing.wait(Duration::from_secs(*seconds)).await;
        client
            .success(format!("✓ {} completed", step.replace("...", "")), None, None)
            .await?;
    }

    client.update_status(AgentStatus::Idle, None).await?;
    client
        .success(
            format!("Task '{}' completed successfully", WORKFLOW_TASK),
            None,
            None,
        )
        .await?;
    client
        .add_event(
            EventType::TaskCompleted,
            format!("Dev Agent completed '{}'", WORKFLOW_TASK),
            Some(TASK_ID),
            object(json!({
                "duration": "12s",
                "result": "success",
                "url": DASHBOARD_URL,
            })),
        )
        .await?;

    println!("✅ Workflow complete!");
    Ok(())
}

async fn risky_operation(client: &MissionControlClient, pacing: Pacing) -> Result<()> {
    client
        .update_status(AgentStatus::Working, Some("Running risky operation"))
        .await?;
    client.info("Starting risky operation...", None, None).await?;
    client
        .warning("Detected potential issue, retrying...", None, None)
        .await?;

    pacing.wait(Duration::from_secs(1)).await;

    Err(anyhow!("Operation failed: Connection timeout"))
}

/// A task that fails part-way; the failure is reported to the dashboard and
/// the agent goes back to idle
pub async fn run_error_handling(client: &MissionControlClient, pacing: Pacing) -> Result<()> {
    let err = match risky_operation(client, pacing).await {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    client
        .error(format!("Task failed: {}", err), None, None)
        .await?;
    client
        .add_event(
            EventType::TaskUpdated,
            format!("Task failed with error: {}", err),
            Some(TASK_ID),
            object(json!({"error": err.to_string(), "status": "failed"})),
        )
        .await?;
    client.update_status(AgentStatus::Idle, None).await?;

    println!("❌ Handled error: {}", err);
    Ok(())
}

/// Batch job reporting progress every tenth item
pub async fn run_long_running(
    client: &MissionControlClient,
    pacing: Pacing,
    total_items: u32,
) -> Result<()> {
    let task = format!("Processing {} items", total_items);
    client
        .update_status(AgentStatus::Working, Some(task.as_str()))
        .await?;
    client
        .info(
            format!("Starting batch processing ({} items)", total_items),
            None,
            None,
        )
        .await?;

    for i in 1..=total_items {
        pacing.wait(ITEM_DELAY).await;

        if i % PROGRESS_EVERY == 0 {
            let progress = f64::from(i) / f64::from(total_items) * 100.0;
            client
                .info(
                    format!("Progress: {}/{} ({:.0}%)", i, total_items, progress),
                    None,
                    object(json!({
                        "progress": progress,
                        "processed": i,
                        "total": total_items,
                    })),
                )
                .await?;
        }
    }

    client
        .success(
            format!("Batch processing completed ({} items)", total_items),
            None,
            None,
        )
        .await?;
    client.update_status(AgentStatus::Idle, None).await?;

    Ok(())
}
