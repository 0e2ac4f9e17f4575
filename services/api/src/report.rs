use crate::infra::{parse_choice_key, InMemorySubmissionRecorder};
use clap::Args;
use eva_core::assessment::{
    AnswerMap, AssessmentService, ChoiceKey, QuestionBank, ScoreBreakdown, ScoringConfig,
};
use eva_core::error::AppError;
use std::io;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Answers in submission form, e.g. "1A, 2C, 3B"
    #[arg(long, conflicts_with = "uniform", required_unless_present = "uniform")]
    pub(crate) answers: Option<String>,
    /// Answer every question with the same key (A-D)
    #[arg(long, value_parser = parse_choice_key)]
    pub(crate) uniform: Option<ChoiceKey>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Include dimension scores and weighted totals
    #[arg(long)]
    pub(crate) details: bool,
}

fn offline_service() -> AssessmentService<InMemorySubmissionRecorder> {
    AssessmentService::new(
        QuestionBank::reference(),
        ScoringConfig::reference(),
        Arc::new(InMemorySubmissionRecorder::default()),
    )
}

pub(crate) fn run_questions() -> Result<(), AppError> {
    let bank = QuestionBank::reference();
    for question in bank.questions() {
        println!("{}. {} (weight {:.1})", question.id, question.prompt, question.base_weight());
        for key in ChoiceKey::ALL {
            println!("   {key}  {}", question.choices.text(key));
        }
    }
    Ok(())
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let service = offline_service();
    let answers = answers_from_args(&args, service.bank())?;

    let breakdown = service.score_detailed(&answers)?;

    if args.json {
        let rendered = if args.details {
            serde_json::to_string_pretty(&breakdown)
        } else {
            serde_json::to_string_pretty(&breakdown.result)
        }
        .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        println!("{rendered}");
    } else {
        render_breakdown(&breakdown, args.details);
    }

    Ok(())
}

fn answers_from_args(args: &ScoreArgs, bank: &QuestionBank) -> Result<AnswerMap, AppError> {
    match (&args.answers, args.uniform) {
        (Some(raw), _) => {
            AnswerMap::parse_raw(raw).map_err(|err| AppError::Assessment(err.into()))
        }
        (None, Some(key)) => Ok(AnswerMap::uniform(bank.questions(), key)),
        (None, None) => Ok(AnswerMap::new()),
    }
}

fn render_breakdown(breakdown: &ScoreBreakdown, details: bool) {
    let result = &breakdown.result;
    println!("EVA Index: {:.1}", result.index);
    println!("Percentile: {}th", result.percentile);
    println!("Classification: {}", result.classification);

    if result.flags.is_empty() {
        println!("\nFlagged observations: none");
    } else {
        println!("\nFlagged observations (non-critical)");
        for flag in &result.flags {
            println!("- {flag}");
        }
    }

    if details {
        println!("\nDimensions");
        for (dimension, score) in breakdown.dimensions.iter() {
            println!("- {}: {:.3}", dimension.label(), score);
        }
        println!(
            "\nWeighted: {:.3} earned of {:.3} ({} answered)",
            breakdown.weighted_earned, breakdown.weighted_max, breakdown.answered
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eva_core::assessment::AssessmentError;

    fn args(answers: Option<&str>, uniform: Option<ChoiceKey>) -> ScoreArgs {
        ScoreArgs {
            answers: answers.map(str::to_string),
            uniform,
            json: false,
            details: false,
        }
    }

    #[test]
    fn uniform_args_answer_every_question() {
        let bank = QuestionBank::reference();
        let answers =
            answers_from_args(&args(None, Some(ChoiceKey::D)), &bank).expect("answers build");
        assert_eq!(answers.len(), bank.len());
        assert!(bank.missing_answers(&answers).is_empty());
    }

    #[test]
    fn partial_answers_are_refused_by_the_service() {
        let service = offline_service();
        let answers = answers_from_args(&args(Some("1A, 2B"), None), service.bank())
            .expect("answers parse");

        let err = service.score(&answers).expect_err("incomplete");
        assert!(matches!(err, AssessmentError::Incomplete { .. }));
    }

    #[test]
    fn malformed_raw_answers_surface_as_assessment_errors() {
        let bank = QuestionBank::reference();
        let err = answers_from_args(&args(Some("1A, 2Z"), None), &bank).expect_err("bad key");
        assert!(matches!(err, AppError::Assessment(AssessmentError::Scoring(_))));
    }

    #[test]
    fn run_score_succeeds_for_complete_answers() {
        run_score(ScoreArgs {
            answers: None,
            uniform: Some(ChoiceKey::A),
            json: true,
            details: true,
        })
        .expect("score renders");
    }
}
