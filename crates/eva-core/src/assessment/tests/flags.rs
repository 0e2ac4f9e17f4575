use super::common::*;
use crate::assessment::domain::{AnswerMap, ChoiceKey, Classification, QuestionId};
use crate::assessment::scoring::{
    AnswerCondition, ContradictionRule, ScoringConfig, ScoringEngine, SingleAnswerRule,
};

const ANOMALY: &str = "Anomaly: high alignment without external verification dependency";

#[test]
fn all_a_raises_every_single_answer_flag_in_table_order() {
    let result = score(&uniform(ChoiceKey::A));

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
fn internal_sufficiency_contradiction_fires_for_7d_and_12a() {
    let answers = answers_with(ChoiceKey::B, &[(7, ChoiceKey::D), (12, ChoiceKey::A)]);
    let result = score(&answers);

    assert_eq!(
        result.flags,
        vec![
            "Legitimacy outsourced (12A)",
            "Contradiction: internal sufficiency vs external legitimacy (7D + 12A)",
        ]
    );
}

#[test]
fn monitoring_contradiction_fires_for_4d_and_11a() {
    let answers = answers_with(ChoiceKey::C, &[(4, ChoiceKey::D), (11, ChoiceKey::A)]);
    let result = score(&answers);

    assert!(result
        .flags
        .contains(&"Contradiction: low monitoring yet termination trigger (4D + 11A)".to_string()));
    assert!(result
        .flags
        .contains(&"Happiness terminated upon awareness (11A)".to_string()));
}

#[test]
fn affect_policy_contradiction_follows_the_other_contradictions() {
    let answers = answers_with(
        ChoiceKey::C,
        &[
            (4, ChoiceKey::D),
            (11, ChoiceKey::A),
            (8, ChoiceKey::D),
            (7, ChoiceKey::A),
        ],
    );
    let result = score(&answers);

    assert_eq!(
        result.flags,
        vec![
            "Private happiness rejected (7A)",
            "Happiness terminated upon awareness (11A)",
            "Contradiction: low monitoring yet termination trigger (4D + 11A)",
            "Inconsistent affect policy (8D vs 7A)",
        ]
    );
}

#[test]
fn contradiction_needs_both_answers() {
    let only_first = score(&answers_with(ChoiceKey::C, &[(7, ChoiceKey::D)]));
    let only_second = score(&answers_with(ChoiceKey::C, &[(12, ChoiceKey::A)]));

    assert!(only_first.flags.is_empty());
    assert_eq!(only_second.flags, vec!["Legitimacy outsourced (12A)"]);
}

#[test]
fn anomaly_fires_for_high_index_with_low_verification() {
    let answers = answers_with(ChoiceKey::A, &[(7, ChoiceKey::D), (12, ChoiceKey::D)]);
    let result = score(&answers);

    assert_eq!(result.index, 82.3);
    assert_eq!(result.classification, Classification::InstitutionalFit);
    assert_eq!(
        result.flags,
        vec![
            "Continuous self-monitoring (4A)",
            "Happiness terminated upon awareness (11A)",
            "Status permanently under review (15A)",
            ANOMALY,
        ]
    );
}

#[test]
fn anomaly_stays_quiet_below_the_index_floor() {
    let answers = answers_with(ChoiceKey::B, &[(7, ChoiceKey::D), (12, ChoiceKey::D)]);
    let result = score(&answers);

    assert!(result.index < 80.0);
    assert!(!result.flags.iter().any(|flag| flag == ANOMALY));
}

#[test]
fn unanswered_questions_never_trigger_rules() {
    let mut answers = AnswerMap::new();
    answers.insert(QuestionId(12), ChoiceKey::A);

    let result = score(&answers);

    assert_eq!(result.flags, vec!["Legitimacy outsourced (12A)"]);
}

#[test]
fn answers_outside_the_bank_are_not_inspected() {
    let mut config = ScoringConfig::reference();
    config.flags.single.push(SingleAnswerRule {
        when: AnswerCondition {
            question: QuestionId(99),
            choice: ChoiceKey::A,
        },
        message: "off-bank".to_string(),
    });
    let engine = ScoringEngine::new(config);
    let mut answers = uniform(ChoiceKey::D);
    answers.insert(QuestionId(99), ChoiceKey::A);

    let result = engine.score(bank().questions(), &answers);

    assert!(result.flags.is_empty());
}

#[test]
fn rule_tables_can_be_extended_without_touching_the_math() {
    let mut config = ScoringConfig::reference();
    config.flags.contradictions.push(ContradictionRule {
        first: AnswerCondition {
            question: QuestionId(1),
            choice: ChoiceKey::D,
        },
        second: AnswerCondition {
            question: QuestionId(2),
            choice: ChoiceKey::D,
        },
        message: "Play and idleness both endorsed (1D + 2D)".to_string(),
    });
    config.flags.anomaly = None;

    let answers = uniform(ChoiceKey::D);
    let extended = ScoringEngine::new(config).score(bank().questions(), &answers);
    let reference = score(&answers);

    assert_eq!(extended.index, reference.index);
    assert_eq!(
        extended.flags,
        vec!["Play and idleness both endorsed (1D + 2D)"]
    );
}
