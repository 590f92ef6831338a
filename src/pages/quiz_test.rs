use super::*;
use crate::state::quiz::QuizQuestion;

fn question() -> QuizQuestion {
    serde_json::from_str(r#"{"question":"Q","options":["a","b"],"correctAnswer":1}"#).expect("question")
}

#[test]
fn offered_topic_with_questions_resumes() {
    let draft = QuizDraft::new("risk-management", vec![question(), question()]);
    assert_eq!(resumable_topic(&draft).map(|t| t.id), Some("risk-management"));
}

#[test]
fn empty_or_mismatched_drafts_do_not_resume() {
    assert!(resumable_topic(&QuizDraft::new("risk-management", Vec::new())).is_none());
    let mut draft = QuizDraft::new("risk-management", vec![question()]);
    draft.answers.push(Some(0));
    assert!(resumable_topic(&draft).is_none());
}

#[test]
fn retired_topic_does_not_resume() {
    assert!(resumable_topic(&QuizDraft::new("astrology", vec![question()])).is_none());
}
