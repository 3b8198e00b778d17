//! Tests for context-augmented prompt assembly.

use corvus_rag::prompt::{CONTEXT_SEPARATOR, assemble};

#[test]
fn prompt_contains_chunks_and_question() {
    let chunks = vec!["first passage".to_string(), "second passage".to_string()];
    let prompt = assemble(&chunks, "what is the answer?");

    assert!(prompt.contains("first passage"));
    assert!(prompt.contains("second passage"));
    assert!(prompt.contains("what is the answer?"));
}

#[test]
fn chunks_are_joined_with_a_distinct_separator() {
    let chunks = vec!["aaa".to_string(), "bbb".to_string()];
    let prompt = assemble(&chunks, "q");

    assert!(prompt.contains(&format!("aaa{CONTEXT_SEPARATOR}bbb")));
    assert!(CONTEXT_SEPARATOR.contains("---"));
}

#[test]
fn instruction_restricts_answers_to_the_context() {
    let prompt = assemble(&["some context".to_string()], "q");

    // The grounding instruction is load-bearing for hallucination control.
    assert!(prompt.contains("using only the context"));
    assert!(prompt.contains("insufficient"));
}

#[test]
fn empty_context_still_produces_a_valid_prompt() {
    let prompt = assemble(&[], "where is the treasure?");

    assert!(prompt.contains("Context:"));
    assert!(prompt.contains("Question:"));
    assert!(prompt.contains("where is the treasure?"));
}

#[test]
fn assembly_is_pure() {
    let chunks = vec!["ctx".to_string()];
    assert_eq!(assemble(&chunks, "q"), assemble(&chunks, "q"));
}
