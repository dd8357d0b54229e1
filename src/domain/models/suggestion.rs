use serde::{Deserialize, Serialize};

/// Availability of a candidate name in the RNE registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionStatus {
    Available,
    Unavailable,
}

/// User rating of a suggestion; local-only, never synced back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Up,
    Down,
}

/// A candidate company name surfaced inside a bot message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyNameSuggestion {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arabic_name: Option<String>,
    pub status: SuggestionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<Feedback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
}

impl CompanyNameSuggestion {
    pub fn new(id: impl Into<String>, name: impl Into<String>, status: SuggestionStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arabic_name: None,
            status,
            feedback: None,
            score: None,
        }
    }

    pub fn with_arabic_name(mut self, arabic_name: impl Into<String>) -> Self {
        self.arabic_name = Some(arabic_name.into());
        self
    }

    pub fn with_score(mut self, score: u8) -> Self {
        self.score = Some(score);
        self
    }
}
