//! End-to-end scenarios for the EVA scoring engine through the public crate API.

use std::sync::Arc;
use std::thread;

use eva_core::assessment::{
    AnswerMap, AssessmentService, ChoiceKey, Classification, CsvSubmissionLog, Identity,
    QuestionBank, QuestionId, ScoringConfig, ScoringEngine, SubmissionStatus,
};

fn reference() -> (QuestionBank, ScoringEngine) {
    (QuestionBank::reference(), ScoringEngine::reference())
}

#[test]
fn all_a_scenario() {
    let (bank, engine) = reference();
    let answers = AnswerMap::uniform(bank.questions(), ChoiceKey::A);

    let result = engine.score(bank.questions(), &answers);

    assert_eq!(result.index, 100.0);
    assert_eq!(result.percentile, 98);
    assert_eq!(result.classification, Classification::CertifiedCompliance);
    assert_eq!(
        result.flags,
        vec![
            "Legitimacy outsourced (12A)",
            "Private happiness rejected (7A)",
            "Continuous self-monitoring (4A)",
            "Happiness terminated upon awareness (11A)",
            "Status permanently under review (15A)",
        ]
    );
}

#[test]
fn all_d_scenario() {
    let (bank, engine) = reference();
    let answers = AnswerMap::uniform(bank.questions(), ChoiceKey::D);

    let result = engine.score(bank.questions(), &answers);

    assert_eq!(result.index, 25.0);
    assert_eq!(result.percentile, 11);
    assert_eq!(result.classification, Classification::NonconformingSignal);
    assert!(result.flags.is_empty());
}

#[test]
fn mixed_answers_surface_the_legitimacy_contradiction() {
    let (bank, engine) = reference();
    let answers =
        AnswerMap::parse_raw("1C, 2A, 3D, 4B, 5C, 6A, 7D, 8B, 9C, 10D, 11B, 12A, 13C, 14B, 15D")
            .expect("raw answers parse");

    let result = engine.score(bank.questions(), &answers);

    assert!(result.flags.contains(
        &"Contradiction: internal sufficiency vs external legitimacy (7D + 12A)".to_string()
    ));
}

#[test]
fn empty_answers_scenario() {
    let (bank, engine) = reference();

    let result = engine.score(bank.questions(), &AnswerMap::new());

    assert_eq!(result.index, 0.0);
    assert!(result.flags.is_empty());
    assert_eq!(result.classification, Classification::NonconformingSignal);
}

#[test]
fn concurrent_scoring_is_independent() {
    let bank = Arc::new(QuestionBank::reference());
    let engine = Arc::new(ScoringEngine::new(ScoringConfig::reference()));

    let handles: Vec<_> = ChoiceKey::ALL
        .into_iter()
        .map(|key| {
            let bank = Arc::clone(&bank);
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let answers = AnswerMap::uniform(bank.questions(), key);
                (key, engine.score(bank.questions(), &answers))
            })
        })
        .collect();

    for handle in handles {
        let (key, result) = handle.join().expect("scoring thread");
        let expected = engine.score(
            bank.questions(),
            &AnswerMap::uniform(bank.questions(), key),
        );
        assert_eq!(result, expected);
    }
}

#[test]
fn service_submission_round_trip_through_csv_log() {
    let log = Arc::new(CsvSubmissionLog::from_writer(Vec::new()));
    let service = AssessmentService::new(
        QuestionBank::reference(),
        ScoringConfig::reference(),
        log.clone(),
    );
    let mut answers = AnswerMap::uniform(service.bank().questions(), ChoiceKey::B);
    answers.insert(QuestionId(7), ChoiceKey::D);
    answers.insert(QuestionId(12), ChoiceKey::A);

    let receipt = service
        .submit(&Identity::new("Alan", "Turing"), &answers, None)
        .expect("submission processed");

    assert_eq!(receipt.status, SubmissionStatus::Processed);
    assert!(receipt
        .result
        .flags
        .iter()
        .any(|flag| flag.starts_with("Contradiction: internal sufficiency")));

    drop(service);
    let bytes = Arc::try_unwrap(log)
        .ok()
        .expect("log released")
        .into_inner()
        .expect("log flushed");
    let text = String::from_utf8(bytes).expect("utf8");
    assert!(text.contains("Alan,Turing"));
    assert!(text.contains("7D"));
    assert!(text.contains("12A"));
}
