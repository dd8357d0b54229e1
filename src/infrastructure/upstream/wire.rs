//! Wire shapes of the upstream chat service
//!
//! The upstream API speaks snake_case and keeps conversation state (name
//! pairs) attached to each assistant turn. These structs only describe the
//! contract; mapping into domain models lives in the remote gateway.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// `GET /sessions` response
#[derive(Debug, Clone, Deserialize)]
pub struct SessionsListing {
    #[serde(default)]
    pub sessions: Vec<SessionRecord>,
}

/// One upstream session, as listed or fetched by id
#[derive(Debug, Clone, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    #[serde(default)]
    pub last_activity: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub message_count: Option<usize>,
    #[serde(default)]
    pub messages_with_states: Option<Vec<UpstreamMessage>>,
}

/// One turn of an upstream conversation
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamMessage {
    /// Discriminator: `"HumanMessage"` marks user authorship, anything else
    /// is treated as the assistant
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub state: Option<UpstreamState>,
}

impl UpstreamMessage {
    pub fn is_human(&self) -> bool {
        self.kind == "HumanMessage"
    }
}

/// Conversation state attached to an assistant turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamState {
    #[serde(default)]
    pub name_pairs: Option<Vec<NamePair>>,
}

/// A generated company name in both product languages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamePair {
    pub french: String,
    pub arabic: String,
}

/// `POST /sessions` request/response
#[derive(Debug, Clone, Serialize)]
pub struct CreateSessionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionResponse {
    pub session_id: String,
}

/// `POST /chat` request/response
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub message_state: Option<UpstreamState>,
}

/// Lenient RFC 3339 parsing for upstream timestamps; unparsable or missing
/// values resolve to the current instant.
pub fn parse_instant(value: Option<&str>) -> DateTime<Utc> {
    value
        .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_record_with_messages() {
        let record: SessionRecord = serde_json::from_value(serde_json::json!({
            "session_id": "abc123",
            "last_activity": "2024-05-01T10:00:00Z",
            "message_count": 2,
            "messages_with_states": [
                { "type": "HumanMessage", "content": "Comment créer une SARL ?" },
                {
                    "type": "AIMessage",
                    "content": "Voici quelques suggestions",
                    "state": { "name_pairs": [ { "french": "Atlas Conseil", "arabic": "أطلس" } ] }
                }
            ]
        }))
        .unwrap();

        let messages = record.messages_with_states.unwrap();
        assert!(messages[0].is_human());
        assert!(!messages[1].is_human());
        let pairs = messages[1].state.as_ref().unwrap().name_pairs.as_ref().unwrap();
        assert_eq!(pairs[0].french, "Atlas Conseil");
    }

    #[test]
    fn test_parse_instant_falls_back_to_now() {
        let parsed = parse_instant(Some("2024-05-01T10:00:00Z"));
        assert_eq!(parsed.timestamp(), 1714557600);

        let now_ish = parse_instant(Some("not-a-date"));
        assert!((Utc::now() - now_ish).num_seconds().abs() < 5);
    }
}
