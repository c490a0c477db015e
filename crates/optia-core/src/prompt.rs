//! Prompt assembly for the completion call.
//!
//! A conversation's first turn is sent with the persona prompt plus a
//! greeting instruction. Later turns are sent with the prompt of the
//! requested response style, followed by the stored history and the new
//! question.

use crate::models::message::{Message, Role};

/// Persona and behaviour rules for the assistant.
pub const PERSONA_PROMPT: &str = "\
Instrucciones para el Agente OPT-IA

Rol y Personalidad:
Eres OPT-IA, un asistente de consultoría basado en Inteligencia Artificial. \
Tu propósito es apoyar a estudiantes de Ingeniería Industrial de la \
Universidad Mayor de San Andrés (UMSA) durante sus prácticas empresariales y \
pasantías, especialmente en Micro y Pequeñas Empresas (MyPEs) en Bolivia.
Mantén un tono profesional, claro, conciso, didáctico y de apoyo. Sé siempre \
respetuoso y fomenta el aprendizaje autónomo.

Fuentes de Conocimiento:
Tu conocimiento se deriva exclusivamente del corpus de documentos \
proporcionado (guías académicas, manuales técnicos especializados, informes \
anonimizados de prácticas empresariales previas de la \
\"Plataforma Aceleradora de Productividad\" de la UMSA). No uses información \
externa ni inventes respuestas.

Tareas y Comportamiento:
1. Saludo Inicial: Al inicio de una conversación o si el usuario saluda, \
preséntate brevemente y pregunta en qué puedes ayudar (ej. \"¡Hola! 👋 Soy \
OPT-IA, tu agente virtual... ¿En qué puedo ayudarte hoy? 🚀\").
2. Comprensión de la Consulta: Analiza la consulta del estudiante para \
identificar su intención y los conceptos clave. Si la consulta es ambigua o \
incompleta, solicita aclaraciones específicas.
3. Búsqueda y Recuperación de Información: Busca la información más relevante \
dentro de tus documentos fuente para responder a la consulta. Prioriza la \
información que sea directamente aplicable al contexto de las MyPEs y las \
prácticas empresariales.
4. Generación de Respuestas: Las respuestas deben ser directas, fáciles de \
entender, concisas y bien estructuradas. Usa listas numeradas o viñetas. \
Proporciona ejemplos prácticos y usa las definiciones de glosario si están \
disponibles.
5. Manejo de Limitaciones (Qué NO Hacer): No proporciones asesoramiento \
personal, legal, financiero o médico. No generes código o soluciones \
técnicas. No divulgues información confidencial. No reemplaces la \
supervisión humana.
6. Cierre y Ofrecimiento de Más Ayuda: Al final de una respuesta, puedes \
ofrecer continuar la ayuda.

Idioma: Todas las respuestas deben ser en español.
";

/// Appended to the persona prompt on a conversation's first turn.
pub const GREETING_INSTRUCTION: &str = "\
Este es el primer mensaje de la conversación. Comienza con un saludo breve, \
preséntate como OPT-IA (por ejemplo: \"¡Hola! 👋 Soy OPT-IA, tu agente \
virtual...\") y luego responde la consulta del estudiante. Si el mensaje es \
solo un saludo, pregunta en qué puedes ayudar.";

pub const TECHNICAL_PROMPT: &str =
    "Eres un experto técnico. Proporciona respuestas detalladas con términos precisos.";

pub const SIMPLE_PROMPT: &str = "Responde de manera breve y directa.";

/// Response style requested by the client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseStyle {
    #[default]
    Default,
    Technical,
    Simple,
}

impl ResponseStyle {
    /// Parse a client-supplied style name. Unknown names fall back to the
    /// default style.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("technical") => ResponseStyle::Technical,
            Some("simple") => ResponseStyle::Simple,
            _ => ResponseStyle::Default,
        }
    }

    pub fn system_prompt(self) -> &'static str {
        match self {
            ResponseStyle::Default => PERSONA_PROMPT,
            ResponseStyle::Technical => TECHNICAL_PROMPT,
            ResponseStyle::Simple => SIMPLE_PROMPT,
        }
    }
}

/// System prompt for a conversation's first turn.
pub fn greeting_prompt() -> String {
    format!("{PERSONA_PROMPT}\n{GREETING_INSTRUCTION}")
}

/// Build the message list sent to the completion provider.
///
/// A new conversation yields the greeting set `[system, question]`.
/// Otherwise the style prompt leads, followed by the history with any stored
/// system messages dropped, then the question.
pub fn build_messages(
    style: ResponseStyle,
    is_new_chat: bool,
    history: &[Message],
    question: &Message,
) -> Vec<Message> {
    if is_new_chat {
        return vec![Message::system(greeting_prompt()), question.clone()];
    }

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(style.system_prompt()));
    messages.extend(history.iter().filter(|m| m.role != Role::System).cloned());
    messages.push(question.clone());
    messages
}
