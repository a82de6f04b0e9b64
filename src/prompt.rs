use std::fmt::Write as _;

use crate::types::{ConversationTurn, UserProfile};

/// Static persona and policy text prepended to every prompt. The contact
/// allow-list is spliced in from configuration rather than hardcoded.
const PERSONA_HEADER: &str = "\
You are the Shiraji Group AI Assistant, a smart, helpful construction expert for \
Shiraji General Contracting and its group of companies based in Abu Dhabi, UAE.

ABOUT SHIRAJI GROUP:
Shiraji Group is a trusted collection of companies providing expert construction, \
maintenance, and technical services across the UAE.

GROUP COMPANIES:
1. Shiraji General Contracting - general contracting, construction and project management.
2. Happy Future General Maintenance - maintenance for residential and commercial properties.
3. Mariner Technical Services - technical services, maintenance, and cleaning.

LOCATION: Al Nahyan, Abu Dhabi, UAE. Phone: +971 26 76 7004.
";

const PERSONA_RULES: &str = "\
IMPORTANT RULES:
1. ONLY share contact addresses exactly as listed above. NEVER invent or guess \
names, people, or email addresses.
2. If asked for a contact not in the list, respond: \"Sorry, I don't have that information.\"
3. ALWAYS reference previous conversation history and never repeat information twice.
4. Provide actionable, short answers tailored to user intent.
5. If a question is unclear, ask for clarification.

LIMITATIONS:
You are an internal assistant running locally. You do NOT access the internet and \
respond only using the provided information.
";

/// Renders the full persona preamble with the configured contact allow-list.
pub fn render_persona(contact_emails: &[String]) -> String {
    let mut persona = String::from(PERSONA_HEADER);
    persona.push_str("\nOFFICIAL CONTACT EMAILS:\n");
    for email in contact_emails {
        let _ = writeln!(persona, "- {email}");
    }
    persona.push('\n');
    persona.push_str(PERSONA_RULES);
    persona
}

/// Assembles the single prompt string sent to the model. Pure: identical
/// inputs produce a byte-identical prompt.
pub fn build_prompt(
    persona: &str,
    profile: &UserProfile,
    recent_history: &[ConversationTurn],
    new_message: &str,
) -> String {
    let interests = if profile.interests.is_empty() {
        "None detected".to_owned()
    } else {
        profile.interests.join(", ")
    };
    let project_type = profile
        .project_type
        .map_or("Unknown", |project_type| project_type.as_str());
    let budget = profile.budget.as_deref().unwrap_or("Not mentioned");

    let mut prompt = String::from(persona);
    let _ = write!(
        prompt,
        "\nCONVERSATION STAGE: {stage}\nUSER INTERESTS: {interests}\nPROJECT TYPE: {project_type}\nBUDGET: {budget}\n",
        stage = profile.stage.as_str(),
    );

    prompt.push_str("\nRECENT CONVERSATION:\n");
    for turn in recent_history {
        let _ = writeln!(prompt, "{}: {}", turn.role.prompt_label(), turn.text);
    }

    let _ = write!(prompt, "\nCURRENT USER MESSAGE: \"{new_message}\"\n");

    prompt.push_str(
        "\nINSTRUCTIONS:\n\
         - Respond naturally to what the user just said\n\
         - Reference previous conversation if relevant\n\
         - Ask ONE specific follow-up question\n\
         - Be helpful and conversational\n\
         - Keep response under 80 words\n\
         - If user mentions creating something, acknowledge it specifically\n\
         - If unclear, ask for clarification\n\
         \n\
         RESPOND AS SHIRAJI AI:",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::types::{ChatRole, ConversationTurn, ProjectType, UserProfile};

    use super::{build_prompt, render_persona};

    fn turn(role: ChatRole, text: &str) -> ConversationTurn {
        ConversationTurn {
            role,
            text: text.to_owned(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn identical_inputs_yield_identical_prompts() {
        let persona = render_persona(&["info@shiraji.ae".to_owned()]);
        let mut profile = UserProfile::default();
        profile.interests.push("plumbing".to_owned());
        profile.project_type = Some(ProjectType::Commercial);
        let history = vec![
            turn(ChatRole::User, "hello"),
            turn(ChatRole::Assistant, "hi, how can I help?"),
        ];

        let first = build_prompt(&persona, &profile, &history, "what about plumbing?");
        let second = build_prompt(&persona, &profile, &history, "what about plumbing?");
        assert_eq!(first, second);
    }

    #[test]
    fn empty_profile_renders_placeholders() {
        let prompt = build_prompt("persona", &UserProfile::default(), &[], "hi");

        assert!(prompt.contains("CONVERSATION STAGE: greeting"));
        assert!(prompt.contains("USER INTERESTS: None detected"));
        assert!(prompt.contains("PROJECT TYPE: Unknown"));
        assert!(prompt.contains("BUDGET: Not mentioned"));
        assert!(prompt.contains("CURRENT USER MESSAGE: \"hi\""));
    }

    #[test]
    fn history_renders_as_role_labelled_lines() {
        let history = vec![
            turn(ChatRole::User, "do you build offices?"),
            turn(ChatRole::Assistant, "we do"),
        ];
        let prompt = build_prompt("persona", &UserProfile::default(), &history, "great");

        assert!(prompt.contains("USER: do you build offices?\nASSISTANT: we do\n"));
    }

    #[test]
    fn persona_lists_configured_contacts_only() {
        let persona = render_persona(&[
            "info@shiraji.ae".to_owned(),
            "md@shirajiuea.ae".to_owned(),
        ]);

        assert!(persona.contains("- info@shiraji.ae\n"));
        assert!(persona.contains("- md@shirajiuea.ae\n"));
        assert!(persona.contains("NEVER invent or guess"));
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let persona = render_persona(&["info@shiraji.ae".to_owned()]);
        let prompt = build_prompt(&persona, &UserProfile::default(), &[], "hello");

        let persona_at = prompt.find("Shiraji Group AI Assistant").unwrap();
        let profile_at = prompt.find("CONVERSATION STAGE:").unwrap();
        let history_at = prompt.find("RECENT CONVERSATION:").unwrap();
        let message_at = prompt.find("CURRENT USER MESSAGE:").unwrap();
        let instructions_at = prompt.find("INSTRUCTIONS:").unwrap();

        assert!(persona_at < profile_at);
        assert!(profile_at < history_at);
        assert!(history_at < message_at);
        assert!(message_at < instructions_at);
        assert!(prompt.ends_with("RESPOND AS SHIRAJI AI:"));
    }
}
