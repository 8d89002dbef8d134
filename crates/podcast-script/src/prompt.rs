//! Prompt construction for the chat model.

use podcast_types::{ConversationTurn, Persona};

/// Describes who the model is playing.
///
/// Falls back to the voice character and age when the persona has no
/// free-form personality text.
pub fn system_prompt(persona: &Persona) -> String {
    let personality = match persona.personality.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => format!(
            "{} character ({} years old)",
            persona.voice_character.as_deref().unwrap_or("unspecified"),
            persona.age
        ),
    };
    let sex = persona.sex.as_deref().unwrap_or("person");

    format!(
        "You are {name}, a {age}-year-old {sex} with the following personality: {personality}\n\n\
         You are participating in a podcast conversation. Stay in character and respond naturally based on the conversation so far.\n\n\
         Keep your response concise and conversational (10-12 sentences max). Speak as if you're in a real podcast.",
        name = persona.name,
        age = persona.age,
    )
}

/// Renders the history as `Name: text` paragraphs and asks for the next line.
/// With no history the persona is asked to open the show.
pub fn user_prompt(persona: &Persona, history: &[ConversationTurn], all: &[Persona]) -> String {
    if history.is_empty() {
        return format!(
            "Start the conversation as {}. Introduce yourself or make an opening statement.",
            persona.name
        );
    }

    let context = history
        .iter()
        .map(|turn| {
            let speaker = all
                .iter()
                .find(|p| p.id == turn.person_id)
                .map(|p| p.name.as_str())
                .unwrap_or("Unknown");
            format!("{}: {}", speaker, turn.text)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "Here's the conversation so far:\n\n{}\n\nNow respond as {}:",
        context, persona.name
    )
}
