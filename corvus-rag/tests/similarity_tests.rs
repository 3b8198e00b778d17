//! Tests for cosine similarity scoring and stable top-k selection.

use corvus_rag::document::Chunk;
use corvus_rag::similarity::{cosine_similarity, top_k};

fn chunk(id: &str, embedding: Vec<f32>) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: id.to_string(),
        embedding,
        document_id: "doc_1".to_string(),
        source_name: "test.txt".to_string(),
        sequence_index: 0,
    }
}

#[test]
fn self_similarity_is_one() {
    let v = vec![0.3, -1.2, 4.5, 0.01];
    assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-6);
}

#[test]
fn zero_vector_similarity_is_zero() {
    let v = vec![1.0, 2.0, 3.0];
    let zero = vec![0.0, 0.0, 0.0];
    assert_eq!(cosine_similarity(&v, &zero), 0.0);
    assert_eq!(cosine_similarity(&zero, &v), 0.0);
    assert_eq!(cosine_similarity(&zero, &zero), 0.0);
}

#[test]
fn orthogonal_vectors_score_zero() {
    assert!((cosine_similarity(&[1.0, 0.0], &[0.0, 1.0])).abs() < 1e-6);
}

#[test]
fn opposite_vectors_score_minus_one() {
    assert!((cosine_similarity(&[1.0, 2.0], &[-1.0, -2.0]) + 1.0).abs() < 1e-6);
}

#[test]
fn top_k_orders_by_descending_similarity() {
    let candidates = vec![
        chunk("far", vec![0.0, 1.0]),
        chunk("near", vec![1.0, 0.0]),
        chunk("middle", vec![1.0, 1.0]),
    ];

    let ranked = top_k(&[1.0, 0.0], &candidates, 3);
    let ids: Vec<&str> = ranked.iter().map(|(c, _)| c.id.as_str()).collect();
    assert_eq!(ids, vec!["near", "middle", "far"]);

    for window in ranked.windows(2) {
        assert!(window[0].1 >= window[1].1);
    }
}

#[test]
fn top_k_is_stable_under_ties() {
    // All candidates have the same score against the query; output order
    // must match insertion order.
    let candidates: Vec<Chunk> =
        (0..5).map(|i| chunk(&format!("c{i}"), vec![1.0, 0.0])).collect();

    let ranked = top_k(&[1.0, 0.0], &candidates, 3);
    let ids: Vec<&str> = ranked.iter().map(|(c, _)| c.id.as_str()).collect();
    assert_eq!(ids, vec!["c0", "c1", "c2"]);
}

#[test]
fn top_k_never_returns_more_than_k() {
    let candidates: Vec<Chunk> =
        (0..10).map(|i| chunk(&format!("c{i}"), vec![i as f32, 1.0])).collect();

    assert_eq!(top_k(&[1.0, 0.0], &candidates, 4).len(), 4);
    assert_eq!(top_k(&[1.0, 0.0], &candidates, 100).len(), 10);
    assert!(top_k(&[1.0, 0.0], &candidates, 0).is_empty());
}
