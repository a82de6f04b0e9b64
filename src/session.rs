use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use chrono::Utc;
use regex::Regex;
use tokio::sync::RwLock;

use crate::types::{ChatRole, ConversationStage, ConversationTurn, ProjectType, UserProfile};

/// Service keywords tracked as interests, matched case-insensitively.
const SERVICE_KEYWORDS: [&str; 8] = [
    "electrical",
    "plumbing",
    "hvac",
    "swimming pool",
    "renovation",
    "maintenance",
    "painting",
    "tiling",
];

const RESIDENTIAL_KEYWORDS: [&str; 3] = ["villa", "house", "home"];
const COMMERCIAL_KEYWORDS: [&str; 3] = ["office", "commercial", "business"];

fn budget_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d+)\s*(aed|dirham|thousand|million)").expect("budget pattern is valid")
    })
}

/// One visitor conversation: the turn history plus the profile derived from it.
/// Lives for a single page view, nothing is persisted.
#[derive(Debug, Default)]
pub struct Session {
    turns: Vec<ConversationTurn>,
    profile: UserProfile,
}

impl Session {
    /// Appends a user turn and folds the message into the profile.
    /// Blank input is a no-op; callers are expected to reject it earlier.
    pub fn record_user_turn(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.turns.push(ConversationTurn {
            role: ChatRole::User,
            text: text.to_owned(),
            timestamp: Utc::now(),
        });
        self.analyze_user_text(text);
    }

    /// Appends an assistant turn. The profile only reacts to user messages.
    pub fn record_assistant_turn(&mut self, text: &str) {
        self.turns.push(ConversationTurn {
            role: ChatRole::Assistant,
            text: text.to_owned(),
            timestamp: Utc::now(),
        });
        self.profile.stage = ConversationStage::from_turn_count(self.turns.len());
    }

    /// The last `n` turns in chronological order. Bounds the prompt size.
    pub fn recent_history(&self, n: usize) -> &[ConversationTurn] {
        let start = self.turns.len().saturating_sub(n);
        &self.turns[start..]
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    fn analyze_user_text(&mut self, text: &str) {
        let lower = text.to_lowercase();

        self.profile.stage = ConversationStage::from_turn_count(self.turns.len());

        if RESIDENTIAL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            self.profile.project_type = Some(ProjectType::Residential);
        } else if COMMERCIAL_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            self.profile.project_type = Some(ProjectType::Commercial);
        }

        if let Some(found) = budget_pattern().find(&lower) {
            self.profile.budget = Some(found.as_str().to_owned());
        }

        for service in SERVICE_KEYWORDS {
            if lower.contains(service) && !self.profile.interests.iter().any(|i| i == service) {
                self.profile.interests.push(service.to_owned());
            }
        }

        self.profile.asked_questions.push(text.to_owned());
    }
}

/// Live sessions keyed by the page-supplied session id. Sessions are created
/// on first use and dropped only with the process.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub async fn with_session<R>(&self, id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.inner.write().await;
        f(sessions.entry(id.to_owned()).or_default())
    }

    /// Full turn history of a session, if it exists.
    pub async fn history(&self, id: &str) -> Option<Vec<ConversationTurn>> {
        let sessions = self.inner.read().await;
        sessions.get(id).map(|session| session.turns.clone())
    }
}
