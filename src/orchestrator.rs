use std::sync::Arc;

use tracing::warn;

use crate::{
    fallback::fallback_reply,
    model::ModelProvider,
    prompt::build_prompt,
    session::SessionStore,
    types::{ChatReply, ConversationTurn, UserProfile},
};

/// How many turns of history go into each prompt.
const HISTORY_WINDOW: usize = 8;

/// A reply starts carrying follow-up suggestions once the session holds at
/// least this many turns.
const SUGGESTION_THRESHOLD: usize = 4;

/// Drives one exchange per user message: record the turn, build the prompt,
/// call the model, fall back on failure, record and return the reply. Only one
/// exchange per session is expected to be in flight at a time; queueing
/// overlapping submissions is the caller's concern.
pub struct ChatOrchestrator {
    model: Arc<dyn ModelProvider>,
    sessions: SessionStore,
    persona: String,
}

struct TurnSnapshot {
    profile: UserProfile,
    history: Vec<ConversationTurn>,
    turn_count: usize,
}

impl ChatOrchestrator {
    pub fn new(model: Arc<dyn ModelProvider>, sessions: SessionStore, persona: String) -> Self {
        Self {
            model,
            sessions,
            persona,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handles one user message. Returns `None` for blank input, which is
    /// rejected before the session is touched. Transport and response-shape
    /// failures never escape: the fallback responder supplies the reply.
    pub async fn handle_message(
        &self,
        session_id: &str,
        text: &str,
    ) -> anyhow::Result<Option<ChatReply>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let snapshot = self
            .sessions
            .with_session(session_id, |session| {
                session.record_user_turn(text);
                TurnSnapshot {
                    profile: session.profile().clone(),
                    history: session.recent_history(HISTORY_WINDOW).to_vec(),
                    turn_count: session.turn_count(),
                }
            })
            .await;

        let prompt = build_prompt(&self.persona, &snapshot.profile, &snapshot.history, text);

        let reply_text = match self.model.complete(&prompt).await {
            Ok(reply) if !reply.trim().is_empty() => reply,
            Ok(_) => {
                warn!(session_id, "model returned an empty reply; using fallback");
                fallback_reply(text, snapshot.turn_count)
            }
            Err(error) => {
                warn!(session_id, ?error, "inference call failed; using fallback");
                fallback_reply(text, snapshot.turn_count)
            }
        };

        let suggestions = self
            .sessions
            .with_session(session_id, |session| {
                session.record_assistant_turn(&reply_text);
                suggest_follow_ups(session.profile(), session.turn_count())
            })
            .await;

        Ok(Some(ChatReply {
            text: reply_text,
            suggestions,
        }))
    }
}

/// Follow-up actions offered to the page once the conversation has warmed up.
fn suggest_follow_ups(profile: &UserProfile, turn_count: usize) -> Vec<String> {
    if turn_count < SUGGESTION_THRESHOLD {
        return Vec::new();
    }

    let mut suggestions = Vec::new();
    if profile.project_type.is_some() && profile.budget.is_none() {
        suggestions.push("Get cost estimate".to_owned());
    }
    if !profile.interests.is_empty() {
        suggestions.push("Schedule consultation".to_owned());
    }
    suggestions.push("View our projects".to_owned());
    suggestions.push("Contact our team".to_owned());
    suggestions
}
