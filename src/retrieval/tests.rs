use std::sync::Arc;

use super::*;
use crate::embedding::MockEmbedder;
use crate::index::FactIndex;

fn retriever() -> Retriever<MockEmbedder> {
    let embedder = MockEmbedder::new(2)
        .with_vector("The sky is blue.", vec![1.0, 0.0])
        .with_vector("Grass is green.", vec![0.0, 1.0])
        .with_vector("Snow is white.", vec![-1.0, 0.0])
        .with_vector("sky color", vec![0.9, 0.0])
        .with_vector("unrelated", vec![10.0, 10.0]);
    let retriever = Retriever::new(Arc::new(FactIndex::new()), embedder);
    retriever
        .rebuild(vec![
            "The sky is blue.".to_string(),
            "Grass is green.".to_string(),
            "Snow is white.".to_string(),
        ])
        .unwrap();
    retriever
}

fn result(distances: &[f32]) -> RetrievalResult {
    RetrievalResult::new(
        distances
            .iter()
            .enumerate()
            .map(|(i, &distance)| RetrievedFact {
                fact: format!("fact {i}"),
                distance,
            })
            .collect(),
    )
}

#[test]
fn test_confidence_linear_decay() {
    let calibration = ConfidenceCalibration::default();

    let confidence = result(&[0.5, 1.0, 1.5]).confidence(&calibration);
    assert!((confidence - 0.9).abs() < 1e-6);
}

#[test]
fn test_confidence_clamps_at_zero() {
    let calibration = ConfidenceCalibration::default();

    assert_eq!(result(&[12.0, 12.0, 12.0]).confidence(&calibration), 0.0);
    assert_eq!(result(&[10.0]).confidence(&calibration), 0.0);
}

#[test]
fn test_confidence_of_empty_result_is_zero() {
    let calibration = ConfidenceCalibration::default();
    let empty = RetrievalResult::default();

    assert!(empty.is_empty());
    assert_eq!(empty.average_distance(), None);
    assert_eq!(empty.confidence(&calibration), 0.0);
}

#[test]
fn test_confidence_exact_match_is_one() {
    let calibration = ConfidenceCalibration::default();
    assert_eq!(result(&[0.0]).confidence(&calibration), 1.0);
}

#[test]
fn test_custom_normalization() {
    let calibration = ConfidenceCalibration::new(2.0);

    assert_eq!(calibration.normalization(), 2.0);
    assert!((calibration.score(1.0) - 0.5).abs() < 1e-6);
    assert_eq!(calibration.score(3.0), 0.0);
}

#[test]
fn test_retrieve_orders_evidence_by_distance() {
    let retriever = retriever();

    let result = retriever.retrieve("sky color", 2).unwrap();

    assert_eq!(result.evidence(), ["The sky is blue.", "Grass is green."]);
    assert!((result.facts()[0].distance - 0.01).abs() < 1e-6);
    assert!((result.facts()[1].distance - 1.81).abs() < 1e-5);
}

#[test]
fn test_retrieve_caps_at_corpus_size() {
    let retriever = retriever();

    let result = retriever.retrieve("sky color", 10).unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(
        result.into_evidence(),
        ["The sky is blue.", "Grass is green.", "Snow is white."]
    );
}

#[test]
fn test_confidence_score_matches_retrieval() {
    let retriever = retriever();

    let direct = retriever.confidence_score("sky color", 3).unwrap();
    let via_result = retriever
        .retrieve("sky color", 3)
        .unwrap()
        .confidence(retriever.calibration());
    assert_eq!(direct, via_result);
    assert!(direct > 0.3);

    assert_eq!(retriever.confidence_score("unrelated", 3).unwrap(), 0.0);
}

#[test]
fn test_retrieve_before_build_skips_embedding() {
    let embedder = MockEmbedder::new(2).with_vector("claim", vec![0.0, 0.0]);
    let retriever = Retriever::new(Arc::new(FactIndex::new()), embedder);

    assert!(matches!(
        retriever.retrieve("claim", 3),
        Err(IndexError::NotBuilt)
    ));
    assert!(matches!(
        retriever.confidence_score("claim", 3),
        Err(IndexError::NotBuilt)
    ));
    assert_eq!(retriever.embedder().encode_calls(), 0);
}

#[test]
fn test_retrieve_propagates_embedding_failure() {
    let retriever = retriever();

    assert!(matches!(
        retriever.retrieve("never registered", 3),
        Err(IndexError::Embedding(_))
    ));
}
