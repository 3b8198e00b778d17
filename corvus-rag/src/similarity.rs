//! Cosine similarity scoring and stable top-k selection.
//!
//! Used by [`InMemoryVectorStore`](crate::InMemoryVectorStore) to rank
//! stored chunks against a query vector. Remote backends rank server-side.

use crate::document::Chunk;

/// Compute cosine similarity between two vectors.
///
/// Formula: `dot(a, b) / (‖a‖ · ‖b‖)`. Returns 0.0 if either vector has
/// zero magnitude; that is a deliberate degenerate-case policy, not an
/// error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Return the `k` candidates most similar to `query`, ordered by
/// descending score.
///
/// Ties keep the candidates' insertion order (the sort is stable), so
/// results are deterministic.
pub fn top_k<'a>(query: &[f32], candidates: &'a [Chunk], k: usize) -> Vec<(&'a Chunk, f32)> {
    let mut scored: Vec<(&Chunk, f32)> = candidates
        .iter()
        .map(|chunk| (chunk, cosine_similarity(&chunk.embedding, query)))
        .collect();

    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(k);
    scored
}
