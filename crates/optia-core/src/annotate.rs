//! Appends recommended guide documents to an assistant reply.

use std::fmt::Write;

use crate::models::message::DocumentRef;

const HEADER: &str = "\n\n📚 **Documentos recomendados:**\n";
const FOOTER: &str = "\nPuedes descargar estos documentos desde los enlaces proporcionados.";

/// Append a markdown list of `documents` to `content`.
///
/// Returns `content` unchanged when there is nothing to recommend.
pub fn annotate(content: &str, documents: &[DocumentRef]) -> String {
    if documents.is_empty() {
        return content.to_string();
    }

    let mut annotated = String::from(content);
    annotated.push_str(HEADER);
    for doc in documents {
        // Writing to a String cannot fail.
        let _ = writeln!(
            annotated,
            "\n👉 [{}]({}): {}",
            doc.filename, doc.url, doc.description
        );
    }
    annotated.push_str(FOOTER);
    annotated
}
