use std::sync::Arc;
use std::thread;

use polarity::{
    AnalyzeRequest, EvaluateSample, KeywordEmotionBackend, LexiconBackend, LexiconExplainer,
    SentimentService, ServiceError,
};

fn full_service() -> SentimentService {
    SentimentService::builder()
        .with_backend(Arc::new(LexiconBackend::new()))
        .with_emotion(Arc::new(KeywordEmotionBackend::new()))
        .with_explainer(Arc::new(LexiconExplainer::new()))
        .build()
        .unwrap()
}

#[test]
fn test_analyze_end_to_end() {
    let service = full_service();
    let response = service
        .analyze(&AnalyzeRequest::new("I love this product"))
        .unwrap();
    assert_eq!(response.label, "positive");
    assert!(response.confidence > 0.0 && response.confidence <= 1.0);
    // "love" is also a joy cue, so the emotion side-channel fires.
    assert_eq!(response.emotion_label.as_deref(), Some("joy"));
}

#[test]
fn test_analyze_with_explanation() {
    let service = full_service();
    let response = service
        .analyze(&AnalyzeRequest::new("Not good, very disappointed").with_explanation())
        .unwrap();
    assert_eq!(response.label, "negative");
    let weights = response.explanation.unwrap();
    assert!(!weights.is_empty());
    assert!(weights.iter().all(|w| w.weight < 0.0));
}

#[test]
fn test_emotion_omitted_without_cues() {
    let service = full_service();
    let response = service
        .analyze(&AnalyzeRequest::new("It works as expected"))
        .unwrap();
    assert_eq!(response.label, "neutral");
    assert!(response.emotion_label.is_none());
    assert!(response.emotion_confidence.is_none());
}

#[test]
fn test_batch_end_to_end() {
    let service = full_service();
    let texts = vec![
        "Absolutely fantastic experience".to_string(),
        "".to_string(),
        "This is the worst thing ever".to_string(),
    ];
    let response = service.analyze_batch(&texts).unwrap();
    assert_eq!(response.items.len(), 2);
    assert_eq!(response.items[0].label, "positive");
    assert_eq!(response.items[1].label, "negative");
}

#[test]
fn test_default_fixture_evaluation() {
    // The lexicon backend classifies every fixture sample correctly.
    let service = full_service();
    let report = service.evaluate(None).unwrap();
    assert_eq!(report.accuracy, 1.0);
    assert_eq!(report.f1_macro, 1.0);
    assert_eq!(report.f1_micro, 1.0);
    assert_eq!(report.per_label_f1.len(), 3);
}

#[test]
fn test_evaluation_with_custom_samples() {
    let service = full_service();
    let samples = vec![
        EvaluateSample::new("great stuff", "positive"),
        EvaluateSample::new("terrible stuff", "positive"),
    ];
    let report = service.evaluate(Some(&samples)).unwrap();
    assert_eq!(report.accuracy, 0.5);
    assert_eq!(report.f1_micro, 0.5);
}

#[test]
fn test_validation_errors_are_client_errors() {
    let service = full_service();
    let err = service
        .analyze(&AnalyzeRequest::new("\t \n"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::ValidationError(_)));
    assert!(err.is_client_error());
}

#[test]
fn test_concurrent_evaluations() {
    let service = Arc::new(full_service());

    let mut handles = vec![];
    for _ in 0..4 {
        let service = Arc::clone(&service);
        handles.push(thread::spawn(move || {
            let report = service.evaluate(None).unwrap();
            assert_eq!(report.accuracy, 1.0);
            let response = service
                .analyze(&AnalyzeRequest::new("an awesome result"))
                .unwrap();
            assert_eq!(response.label, "positive");
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
}
