use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }

    /// Upper-case label used for history lines in the prompt.
    pub fn prompt_label(self) -> &'static str {
        match self {
            ChatRole::User => "USER",
            ChatRole::Assistant => "ASSISTANT",
        }
    }
}

/// One message of the conversation. Turns are append-only and never edited,
/// so insertion order is chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStage {
    #[default]
    Greeting,
    Exploring,
    Discussing,
}

impl ConversationStage {
    /// Derived purely from how many turns the session holds.
    pub fn from_turn_count(count: usize) -> Self {
        if count <= 2 {
            ConversationStage::Greeting
        } else if count <= 6 {
            ConversationStage::Exploring
        } else {
            ConversationStage::Discussing
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConversationStage::Greeting => "greeting",
            ConversationStage::Exploring => "exploring",
            ConversationStage::Discussing => "discussing",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Residential,
    Commercial,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::Residential => "residential",
            ProjectType::Commercial => "commercial",
        }
    }
}

/// What the session has inferred about the visitor so far. Derived only from
/// turns already recorded; used to enrich the prompt, nothing else.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserProfile {
    /// Service keywords the user has mentioned. Grows monotonically.
    pub interests: Vec<String>,
    /// Last-write-wins across turns.
    pub project_type: Option<ProjectType>,
    /// Last matched amount+unit token, e.g. "500 thousand".
    pub budget: Option<String>,
    pub stage: ConversationStage,
    /// Raw user messages in submission order.
    pub asked_questions: Vec<String>,
}

/// What the orchestrator hands back to the page for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatReply {
    pub text: String,
    /// Suggested follow-up actions, empty until the conversation has warmed up.
    pub suggestions: Vec<String>,
}
