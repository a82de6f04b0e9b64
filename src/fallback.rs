//! Deterministic canned replies used whenever the inference call does not
//! succeed. Keyword groups are checked in a fixed priority order; the order
//! matters when a message mentions several topics at once.

const CREATION_KEYWORDS: [&str; 3] = ["create", "made", "built"];
const PRICING_KEYWORDS: [&str; 3] = ["price", "cost", "quote"];
const TIMING_KEYWORDS: [&str; 3] = ["time", "duration", "how long"];

const CREATION_REPLY: &str = "That sounds interesting! I'd love to hear more about \
what you've created. Could you tell me more details about your project? I might be \
able to help with construction or improvement ideas!";

const PRICING_REPLY: &str = "I'd be happy to help with pricing! To give you an \
accurate estimate, could you tell me: what type of project (villa, office, \
renovation), the approximate size, and the location in the UAE? This helps me \
provide better guidance.";

const TIMING_REPLY: &str = "Good question about timing! Project duration varies \
based on scope and complexity. What specific project are you planning? I can give \
you a more accurate timeline estimate.";

const CLARIFY_REPLY: &str = "I want to make sure I understand you correctly. Could \
you clarify what you're asking about? I'm here to help with any construction or \
service questions.";

const GREETING_REPLY: &str = "Hi there! I'm Shiraji's AI assistant. I'm here to \
help with construction, maintenance, and project questions. What can I help you \
with today?";

/// Picks a canned reply for `user_message`. `recorded_turns` is the number of
/// turns already in the session (including this user message); past the first
/// exchange an unmatched message gets a clarification instead of a greeting.
/// Never returns an empty string.
pub fn fallback_reply(user_message: &str, recorded_turns: usize) -> String {
    let lower = user_message.to_lowercase();

    if CREATION_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return CREATION_REPLY.to_owned();
    }
    if PRICING_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return PRICING_REPLY.to_owned();
    }
    if TIMING_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return TIMING_REPLY.to_owned();
    }
    if recorded_turns > 2 {
        return CLARIFY_REPLY.to_owned();
    }
    GREETING_REPLY.to_owned()
}

#[cfg(test)]
mod tests {
    use super::{
        CLARIFY_REPLY, CREATION_REPLY, GREETING_REPLY, PRICING_REPLY, TIMING_REPLY, fallback_reply,
    };

    #[test]
    fn pricing_outranks_timing() {
        let reply = fallback_reply("What's the cost and how long will plumbing take?", 1);
        assert_eq!(reply, PRICING_REPLY);
    }

    #[test]
    fn creation_outranks_everything() {
        let reply = fallback_reply("I built a house, what would it cost to extend?", 1);
        assert_eq!(reply, CREATION_REPLY);
    }

    #[test]
    fn timing_matches_when_nothing_above_does() {
        let reply = fallback_reply("How long does a renovation usually run?", 1);
        assert_eq!(reply, TIMING_REPLY);
    }

    #[test]
    fn unmatched_message_greets_early_in_the_conversation() {
        assert_eq!(fallback_reply("hello there", 1), GREETING_REPLY);
    }

    #[test]
    fn unmatched_message_asks_for_clarification_later() {
        assert_eq!(fallback_reply("hmm", 3), CLARIFY_REPLY);
    }

    #[test]
    fn reply_is_never_empty() {
        for message in ["", "x", "cost", "anything else entirely", "построить"] {
            for turns in [0, 1, 5] {
                assert!(!fallback_reply(message, turns).is_empty());
            }
        }
    }
}
