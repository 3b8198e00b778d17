//! Context-augmented prompt assembly.
//!
//! Builds the prompt string sent to the generative model from retrieved
//! chunks plus the user question. Pure string manipulation; no I/O.

/// Marker inserted between context chunks so the model can tell where one
/// retrieved passage ends and the next begins.
pub const CONTEXT_SEPARATOR: &str = "\n\n---\n\n";

/// Build a context-restricted prompt from retrieved chunks and a question.
///
/// The instruction to answer strictly from the provided context, and to say
/// so when the context is insufficient, is what keeps the model from
/// inventing answers; keep it intact when editing the template.
///
/// An empty `context_chunks` slice still produces a valid prompt with an
/// empty context section; callers do not short-circuit on empty retrieval.
pub fn assemble(context_chunks: &[String], question: &str) -> String {
    let context = context_chunks.join(CONTEXT_SEPARATOR);
    format!(
        "Answer the question using only the context provided below.\n\
         If the context does not contain the information needed to answer, \
         say explicitly that the context is insufficient instead of guessing.\n\
         \n\
         Context:\n\
         {context}\n\
         \n\
         Question:\n\
         {question}"
    )
}
