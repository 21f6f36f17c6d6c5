use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Free-form JSON object attached to log entries and feed events
pub type Metadata = serde_json::Map<String, serde_json::Value>;

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn non_empty_map(value: Option<Metadata>) -> Option<Metadata> {
    value.filter(|m| !m.is_empty())
}

/// Body of `PUT /api/agents/{id}/status`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<String>,
}

impl StatusUpdate {
    pub fn new(status: impl Into<String>, current_task: Option<&str>) -> Self {
        Self {
            status: status.into(),
            current_task: non_empty(current_task),
        }
    }
}

/// Body of `POST /api/terminal`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub agent_id: String,
    pub level: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl LogEntry {
    pub fn new(
        agent_id: impl Into<String>,
        level: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            agent_id: agent_id.into(),
            level: level.into(),
            message: message.into(),
            task_id: None,
            metadata: None,
        }
    }

    pub fn with_task_id(mut self, task_id: Option<&str>) -> Self {
        self.task_id = non_empty(task_id);
        self
    }

    pub fn with_metadata(mut self, metadata: Option<Metadata>) -> Self {
        self.metadata = non_empty_map(metadata);
        self
    }
}

/// Body of `POST /api/events`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub agent_id: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl FeedEvent {
    pub fn new(
        event_type: impl Into<String>,
        agent_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            agent_id: agent_id.into(),
            message: message.into(),
            task_id: None,
            metadata: None,
        }
    }

    pub fn with_task_id(mut self, task_id: Option<&str>) -> Self {
        self.task_id = non_empty(task_id);
        self
    }

    pub fn with_metadata(mut self, metadata: Option<Metadata>) -> Self {
        self.metadata = non_empty_map(metadata);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Working,
    Idle,
    Offline,
}

impl AgentStatus {
    pub const ALL: [AgentStatus; 3] = [Self::Working, Self::Idle, Self::Offline];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::Idle => "idle",
            Self::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
    System,
}

impl LogLevel {
    pub const ALL: [LogLevel; 5] = [
        Self::Info,
        Self::Success,
        Self::Warning,
        Self::Error,
        Self::System,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::System => "system",
        }
    }
}

/// Feed event types accepted by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    TaskCreated,
    TaskAssigned,
    TaskStarted,
    TaskCompleted,
    TaskUpdated,
    TaskCommented,
    AgentOnline,
    AgentOffline,
    AgentWorking,
    DocumentCreated,
    DecisionMade,
    MessageSent,
    AgentStatusChanged,
}

impl EventType {
    pub const ALL: [EventType; 13] = [
        Self::TaskCreated,
        Self::TaskAssigned,
        Self::TaskStarted,
        Self::TaskCompleted,
        Self::TaskUpdated,
        Self::TaskCommented,
        Self::AgentOnline,
        Self::AgentOffline,
        Self::AgentWorking,
        Self::DocumentCreated,
        Self::DecisionMade,
        Self::MessageSent,
        Self::AgentStatusChanged,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskCreated => "task_created",
            Self::TaskAssigned => "task_assigned",
            Self::TaskStarted => "task_started",
            Self::TaskCompleted => "task_completed",
            Self::TaskUpdated => "task_updated",
            Self::TaskCommented => "task_commented",
            Self::AgentOnline => "agent_online",
            Self::AgentOffline => "agent_offline",
            Self::AgentWorking => "agent_working",
            Self::DocumentCreated => "document_created",
            Self::DecisionMade => "decision_made",
            Self::MessageSent => "message_sent",
            Self::AgentStatusChanged => "agent_status_changed",
        }
    }
}

// Display, FromStr and Into<String> are identical for the three wire enums.
macro_rules! wire_enum_conversions {
    ($ty:ident, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.as_str().to_string()
            }
        }
    };
}

wire_enum_conversions!(AgentStatus, "status");
wire_enum_conversions!(LogLevel, "log level");
wire_enum_conversions!(EventType, "event type");

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_update_omits_empty_task() {
        let body = serde_json::to_value(StatusUpdate::new("idle", None)).unwrap();
        assert_eq!(body, json!({"status": "idle"}));

        let body = serde_json::to_value(StatusUpdate::new("idle", Some(""))).unwrap();
        assert_eq!(body, json!({"status": "idle"}));

        let body = serde_json::to_value(StatusUpdate::new(AgentStatus::Working, Some("Deploy")))
            .unwrap();
        assert_eq!(body, json!({"status": "working", "currentTask": "Deploy"}));
    }

    #[test]
    fn test_log_entry_optional_fields() {
        let entry = LogEntry::new("agent-1", LogLevel::Error, "boom").with_task_id(Some("t1"));
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"agentId": "agent-1", "level": "error", "message": "boom", "taskId": "t1"})
        );

        let mut metadata = Metadata::new();
        metadata.insert("step".to_string(), json!(2));
        let entry = LogEntry::new("agent-1", "info", "hi").with_metadata(Some(metadata));
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"agentId": "agent-1", "level": "info", "message": "hi", "metadata": {"step": 2}})
        );

        let entry = LogEntry::new("agent-1", "info", "hi").with_metadata(Some(Metadata::new()));
        assert!(entry.metadata.is_none());
    }

    #[test]
    fn test_feed_event_uses_type_key() {
        let event = FeedEvent::new(EventType::AgentOnline, "agent-1", "online");
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({"type": "agent_online", "agentId": "agent-1", "message": "online"})
        );
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("offline".parse::<AgentStatus>().unwrap(), AgentStatus::Offline);
        assert_eq!("system".parse::<LogLevel>().unwrap(), LogLevel::System);
        assert_eq!(
            "agent_status_changed".parse::<EventType>().unwrap(),
            EventType::AgentStatusChanged
        );

        let err = "sleeping".parse::<AgentStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown status 'sleeping'");
    }

    #[test]
    fn test_enum_serde_matches_as_str() {
        for level in LogLevel::ALL {
            assert_eq!(serde_json::to_value(level).unwrap(), json!(level.as_str()));
        }
        for event_type in EventType::ALL {
            assert_eq!(event_type.to_string(), event_type.as_str());
        }
    }
}
