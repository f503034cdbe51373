// src/pipeline/exercise.rs

//! Exercise normalization.
//!
//! Converts one category's raw question list into a scored exercise node.
//! Callers must never pass an empty question list; a zero-question
//! category is skipped upstream and recorded in the failure log instead.

use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::models::{ExerciseNode, ExerciseQuestion, MasteryPolicy, RawQuestion};

/// Default mastery threshold, clamped down to the question count.
const DEFAULT_MASTERY_M: usize = 3;

/// Normalize one category's raw questions into an exercise node.
///
/// The category display title comes from the configured lookup table; an
/// unrecognized category is a contract violation and fails the run.
pub fn normalize_exercise(
    item_id: u64,
    category: &str,
    questions: &[RawQuestion],
    labels: &HashMap<String, String>,
) -> Result<ExerciseNode> {
    let title = labels
        .get(category)
        .ok_or_else(|| AppError::lookup("exercise category", category))?;
    debug_assert!(!questions.is_empty(), "caller must skip empty categories");

    let questions: Vec<ExerciseQuestion> = questions.iter().map(normalize_question).collect();

    Ok(ExerciseNode {
        source_id: format!("{item_id}:{category}"),
        title: title.clone(),
        mastery: MasteryPolicy {
            model: "m_of_n",
            m: questions.len().min(DEFAULT_MASTERY_M) as u32,
            randomize: false,
        },
        questions,
    })
}

/// Build the unique answer list in first-seen order.
///
/// A repeated answer text is dropped with a warning; the first occurrence
/// wins, including for correctness marking. A question where no answer is
/// marked correct keeps `correct_answer` unset.
fn normalize_question(question: &RawQuestion) -> ExerciseQuestion {
    let mut answers: Vec<String> = Vec::with_capacity(question.answers.len());
    let mut correct_answer: Option<String> = None;

    for answer in &question.answers {
        if answers.iter().any(|seen| seen == &answer.title) {
            log::warn!("Duplicate answer in question id={}", question.id);
            continue;
        }
        if answer.is_correct && correct_answer.is_none() {
            correct_answer = Some(answer.title.clone());
        }
        answers.push(answer.title.clone());
    }

    ExerciseQuestion {
        id: question.id.to_string(),
        question: question.title.clone(),
        answers,
        correct_answer,
        hints: Vec::new(),
    }
}
