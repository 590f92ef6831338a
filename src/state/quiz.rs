//! Quiz rounds: generated questions, answer selection, grading.
//!
//! DESIGN
//! ======
//! Questions come from a generative backend function and are not trusted:
//! `sanitize_questions` drops anything that cannot be answered. A graded
//! round becomes a `QuizResult`, which is what the results screen reads
//! back from local storage.

#[cfg(test)]
#[path = "quiz_test.rs"]
mod quiz_test;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuizTopic {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const TOPICS: &[QuizTopic] = &[
    QuizTopic { id: "candlestick-patterns", title: "Candlestick Patterns", description: "Hammers, stars and engulfing candles." },
    QuizTopic { id: "technical-indicators", title: "Technical Indicators", description: "RSI, MACD and moving averages." },
    QuizTopic { id: "fundamental-analysis", title: "Fundamental Analysis", description: "P/E, EPS and balance-sheet ratios." },
    QuizTopic { id: "risk-management", title: "Risk Management", description: "Position sizing, stops and risk/reward." },
];

#[must_use]
pub fn find_topic(id: &str) -> Option<&'static QuizTopic> {
    TOPICS.iter().find(|t| t.id == id)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    #[serde(alias = "correct_answer", alias = "answer")]
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Trim text and keep only questions with a prompt, at least two options,
/// and an in-range answer index.
#[must_use]
pub fn sanitize_questions(questions: Vec<QuizQuestion>) -> Vec<QuizQuestion> {
    questions
        .into_iter()
        .filter_map(|q| {
            let question = q.question.trim().to_owned();
            let options: Vec<String> = q.options.iter().map(|o| o.trim().to_owned()).collect();
            let usable = !question.is_empty()
                && options.len() >= 2
                && options.iter().all(|o| !o.is_empty())
                && q.correct_answer < options.len();
            usable.then(|| QuizQuestion {
                question,
                options,
                correct_answer: q.correct_answer,
                explanation: q.explanation.map(|e| e.trim().to_owned()).filter(|e| !e.is_empty()),
            })
        })
        .collect()
}

/// A round in progress; persisted so a reload resumes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDraft {
    pub topic_id: String,
    pub questions: Vec<QuizQuestion>,
    pub answers: Vec<Option<usize>>,
}

impl QuizDraft {
    #[must_use]
    pub fn new(topic_id: &str, questions: Vec<QuizQuestion>) -> Self {
        let answers = vec![None; questions.len()];
        Self { topic_id: topic_id.to_owned(), questions, answers }
    }

    /// Choose `option` for question `index`; out-of-range picks are ignored.
    pub fn select(&mut self, index: usize, option: usize) {
        let Some(question) = self.questions.get(index) else {
            return;
        };
        if option < question.options.len() {
            self.answers[index] = Some(option);
        }
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.questions.is_empty() && self.answered_count() == self.questions.len()
    }

    /// Score the round.
    #[must_use]
    pub fn grade(&self, completed_at_ms: i64) -> QuizResult {
        let items: Vec<GradedAnswer> = self
            .questions
            .iter()
            .zip(&self.answers)
            .map(|(q, selected)| GradedAnswer {
                question: q.question.clone(),
                options: q.options.clone(),
                selected: *selected,
                correct_answer: q.correct_answer,
                explanation: q.explanation.clone(),
            })
            .collect();
        let score = items.iter().filter(|i| i.is_correct()).count();
        QuizResult { topic_id: self.topic_id.clone(), score, total: items.len(), items, completed_at_ms }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAnswer {
    pub question: String,
    pub options: Vec<String>,
    pub selected: Option<usize>,
    pub correct_answer: usize,
    pub explanation: Option<String>,
}

impl GradedAnswer {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.selected == Some(self.correct_answer)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub topic_id: String,
    pub score: usize,
    pub total: usize,
    pub items: Vec<GradedAnswer>,
    pub completed_at_ms: i64,
}

impl QuizResult {
    /// Whole-number percentage, rounded down. Zero for an empty round.
    #[must_use]
    pub fn percent(&self) -> usize {
        self.score.saturating_mul(100).checked_div(self.total).unwrap_or(0)
    }

    #[must_use]
    pub fn verdict(&self) -> &'static str {
        match self.percent() {
            80.. => "Excellent work",
            60..=79 => "Good effort",
            40..=59 => "Keep practising",
            _ => "Review the material and try again",
        }
    }

    #[must_use]
    pub fn topic_title(&self) -> &str {
        find_topic(&self.topic_id).map_or(self.topic_id.as_str(), |t| t.title)
    }
}
