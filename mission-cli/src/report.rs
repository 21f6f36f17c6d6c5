use anyhow::{anyhow, Result};
use mission_common::MissionControlClient;
use mission_protocol::Metadata;
use serde_json::Value;

/// Parse a `--metadata` argument, which must be a JSON object
pub fn parse_metadata(raw: Option<String>) -> Result<Option<Metadata>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    match serde_json::from_str::<Value>(&raw)? {
        Value::Object(map) => Ok(Some(map)),
        other => Err(anyhow!("Metadata must be a JSON object, got: {}", other)),
    }
}

fn print_response(response: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}

pub async fn update_status(
    client: &MissionControlClient,
    status: &str,
    task: Option<&str>,
) -> Result<()> {
    let response = client.update_status(status, task).await?;
    print_response(&response)
}

pub async fn log(
    client: &MissionControlClient,
    level: &str,
    message: &str,
    task_id: Option<&str>,
    metadata: Option<String>,
) -> Result<()> {
    let metadata = parse_metadata(metadata)?;
    let response = client.log(level, message, task_id, metadata).await?;
    print_response(&response)
}

pub async fn add_event(
    client: &MissionControlClient,
    event_type: &str,
    message: &str,
    task_id: Option<&str>,
    metadata: Option<String>,
) -> Result<()> {
    let metadata = parse_metadata(metadata)?;
    let response = client
        .add_event(event_type, message, task_id, metadata)
        .await?;
    print_response(&response)
}

pub async fn show_logs(client: &MissionControlClient, limit: Option<u32>) -> Result<()> {
    let response = client.fetch_logs(limit).await?;
    print_response(&response)
}

pub async fn show_events(
    client: &MissionControlClient,
    limit: Option<u32>,
    event_type: Option<&str>,
) -> Result<()> {
    let response = client.recent_events(limit, event_type).await?;
    print_response(&response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_metadata() {
        assert!(parse_metadata(None).unwrap().is_none());

        let parsed = parse_metadata(Some(r#"{"step": 1}"#.to_string()))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.get("step"), Some(&json!(1)));

        assert!(parse_metadata(Some("[1, 2]".to_string())).is_err());
        assert!(parse_metadata(Some("not json".to_string())).is_err());
    }

    #[tokio::test]
    async fn test_invalid_metadata_sends_nothing() {
        let server = MockServer::start().await;
        let client = MissionControlClient::new(server.uri(), "agent-1");

        let result = log(&client, "info", "hello", None, Some("42".to_string())).await;

        assert!(result.is_err());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_event_command_forwards_metadata() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/events"))
            .and(body_json(json!({
                "type": "decision_made",
                "agentId": "agent-1",
                "message": "ship it",
                "taskId": "t2",
                "metadata": {"votes": 3}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = MissionControlClient::new(server.uri(), "agent-1");
        add_event(
            &client,
            "decision_made",
            "ship it",
            Some("t2"),
            Some(r#"{"votes": 3}"#.to_string()),
        )
        .await
        .unwrap();
    }
}
