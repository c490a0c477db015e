use optia_core::models::message::{Message, Role};
use optia_core::prompt::{
    PERSONA_PROMPT, ResponseStyle, SIMPLE_PROMPT, TECHNICAL_PROMPT, build_messages,
    greeting_prompt,
};

fn history() -> Vec<Message> {
    vec![
        Message::system("stale system prompt"),
        Message::user("¿Qué es un flujograma?"),
        Message::assistant("Un flujograma es..."),
    ]
}

#[test]
fn new_chat_uses_greeting_set() {
    let question = Message::user("Hola");
    let messages = build_messages(ResponseStyle::Simple, true, &[], &question);

    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::System);
    assert_eq!(messages[0].content, greeting_prompt());
    assert_eq!(messages[1], question);
}

#[test]
fn continuation_uses_style_prompt_and_drops_stored_system_messages() {
    let question = Message::user("¿Y un diagrama de Pareto?");
    let messages = build_messages(ResponseStyle::Technical, false, &history(), &question);

    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0].content, TECHNICAL_PROMPT);
    assert_eq!(
        messages.iter().filter(|m| m.role == Role::System).count(),
        1
    );
    assert_eq!(messages[1].content, "¿Qué es un flujograma?");
    assert_eq!(messages[2].role, Role::Assistant);
    assert_eq!(messages[3], question);
}

#[test]
fn greeting_set_differs_from_continuation_set() {
    let question = Message::user("Hola");
    let first = build_messages(ResponseStyle::Default, true, &[], &question);
    let later = build_messages(ResponseStyle::Default, false, &history(), &question);
    assert_ne!(first[0].content, later[0].content);
}

#[test]
fn style_names_fall_back_to_default() {
    assert_eq!(ResponseStyle::from_name(Some("simple")), ResponseStyle::Simple);
    assert_eq!(ResponseStyle::from_name(Some("technical")), ResponseStyle::Technical);
    assert_eq!(ResponseStyle::from_name(Some("poetic")), ResponseStyle::Default);
    assert_eq!(ResponseStyle::from_name(None), ResponseStyle::Default);
    assert_eq!(ResponseStyle::Default.system_prompt(), PERSONA_PROMPT);
    assert_eq!(ResponseStyle::Simple.system_prompt(), SIMPLE_PROMPT);
}

#[test]
fn persona_prompt_keeps_retrieval_step_and_corpus_name() {
    assert!(PERSONA_PROMPT.contains("3. Búsqueda y Recuperación de Información:"));
    assert!(PERSONA_PROMPT.contains("\"Plataforma Aceleradora de Productividad\" de la UMSA"));
    assert!(PERSONA_PROMPT.trim_end().ends_with("Todas las respuestas deben ser en español."));
}
