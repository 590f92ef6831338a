//! Score and per-question review of the last submitted quiz.

use leptos::prelude::*;

use crate::components::link::NavLink;
use crate::components::load_gate::{load_gate, start_load};
use crate::components::shell::FullPage;
use crate::state::lazy::LoadState;
use crate::state::quiz::{GradedAnswer, QuizResult};
use crate::util::persistence;

#[allow(clippy::unused_async)]
async fn stored_result() -> Result<QuizResult, String> {
    persistence::load_json::<QuizResult>(persistence::QUIZ_RESULT_KEY).ok_or_else(|| "No quiz result yet.".to_owned())
}

fn review_item(index: usize, item: GradedAnswer) -> impl IntoView {
    let correct = item.is_correct();
    let chosen = item
        .selected
        .and_then(|i| item.options.get(i).cloned())
        .unwrap_or_else(|| "No answer".to_owned());
    let answer = item.options.get(item.correct_answer).cloned().unwrap_or_default();
    view! {
        <li class="quiz-review__item" class:quiz-review__item--correct=correct class:quiz-review__item--wrong=!correct>
            <p class="quiz-review__question">{format!("{}. {}", index + 1, item.question)}</p>
            <p class="quiz-review__chosen">{format!("Your answer: {chosen}")}</p>
            {(!correct).then(|| view! { <p class="quiz-review__answer">{format!("Correct answer: {answer}")}</p> })}
            {item.explanation.map(|text| view! { <p class="quiz-review__explanation">{text}</p> })}
        </li>
    }
}

#[component]
pub fn QuizResultsPage() -> impl IntoView {
    let result = RwSignal::new(LoadState::<QuizResult>::default());
    let load = move || start_load(result, stored_result);
    load();
    let on_retry = Callback::new(move |()| load());

    let summary = load_gate(result, on_retry, |r: QuizResult| {
        let headline = format!("{} / {} ({}%)", r.score, r.total, r.percent());
        let verdict = r.verdict();
        let topic = r.topic_title().to_owned();
        let items = r.items.into_iter().enumerate().map(|(i, item)| review_item(i, item)).collect::<Vec<_>>();
        view! {
            <div class="quiz-results">
                <p class="quiz-results__topic">{topic}</p>
                <p class="quiz-results__score">{headline}</p>
                <p class="quiz-results__verdict">{verdict}</p>
                <ol class="quiz-review">{items}</ol>
            </div>
        }
    });

    view! {
        <FullPage title="Quiz results" back_path="/quiz">
            <section class="quiz-results-page">
                {summary}
                <NavLink path="/quiz" class="btn btn--primary">
                    "Take another quiz"
                </NavLink>
            </section>
        </FullPage>
    }
}
