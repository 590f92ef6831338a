//! Quiz screen: topic picker, generated round, submission.
//!
//! A round in progress is mirrored to local storage after every answer so a
//! reload resumes it. Submitting grades the round, stores the result for the
//! results screen and discards the draft.

#[cfg(test)]
#[path = "quiz_test.rs"]
mod quiz_test;

use leptos::prelude::*;

use crate::app::use_services;
use crate::components::load_gate::{load_gate, start_load};
use crate::components::shell::FullPage;
use crate::net::functions;
use crate::routing::navigation::use_navigator;
use crate::session::controller::use_session;
use crate::state::lazy::LoadState;
use crate::state::quiz::{self, QuizDraft, QuizTopic, TOPICS};
use crate::util::{clock, persistence};

const RESULTS_PATH: &str = "/quiz/results";

/// Topic of a stored draft worth resuming: every question still has an
/// answer slot and the topic is one we offer.
fn resumable_topic(draft: &QuizDraft) -> Option<&'static QuizTopic> {
    if draft.questions.is_empty() || draft.answers.len() != draft.questions.len() {
        return None;
    }
    quiz::find_topic(&draft.topic_id)
}

#[component]
pub fn QuizPage() -> impl IntoView {
    let services = use_services();
    let session = use_session();
    let navigator = use_navigator();

    let resumed = persistence::load_json::<QuizDraft>(persistence::QUIZ_DRAFT_KEY)
        .and_then(|d| resumable_topic(&d).map(|t| (t, d)));
    let topic = RwSignal::new(resumed.as_ref().map(|(t, _)| *t));
    let round = RwSignal::new(resumed.map_or(LoadState::NotLoaded, |(_, d)| LoadState::Ready(d)));

    let generate = move |picked: &'static QuizTopic| {
        topic.set(Some(picked));
        let client = services.client();
        let token = session.session_untracked().map(|s| s.access_token);
        start_load(round, move || async move {
            let questions = functions::generate_quiz(&client, token.as_deref(), picked.id)
                .await
                .map_err(|e| e.to_string())?;
            let draft = QuizDraft::new(picked.id, questions);
            persistence::save_json(persistence::QUIZ_DRAFT_KEY, &draft);
            Ok(draft)
        });
    };

    let on_retry = Callback::new(move |()| {
        if let Some(picked) = topic.get_untracked() {
            generate(picked);
        }
    });

    let on_change_topic = Callback::new(move |()| {
        persistence::remove(persistence::QUIZ_DRAFT_KEY);
        round.set(LoadState::NotLoaded);
        topic.set(None);
    });

    let on_answer = Callback::new(move |(index, option): (usize, usize)| {
        round.update(|s| {
            if let Some(draft) = s.ready_mut() {
                draft.select(index, option);
                persistence::save_json(persistence::QUIZ_DRAFT_KEY, draft);
            }
        });
    });

    let on_submit = Callback::new(move |()| {
        let Some(result) = round.with_untracked(|s| s.ready().filter(|d| d.is_complete()).map(|d| d.grade(clock::now_millis())))
        else {
            return;
        };
        log::info!("quiz submitted: topic={} score={}/{}", result.topic_id, result.score, result.total);
        persistence::save_json(persistence::QUIZ_RESULT_KEY, &result);
        persistence::remove(persistence::QUIZ_DRAFT_KEY);
        navigator.navigate(RESULTS_PATH);
    });

    let render_round = move |draft: QuizDraft| {
        view! { <QuizRound draft=draft on_answer=on_answer on_change_topic=on_change_topic on_submit=on_submit/> }
    };

    view! {
        <FullPage title="Quiz">
            <section class="quiz">
                {move || match topic.get() {
                    None => view! {
                        <p class="quiz__lede">"Pick a topic and we'll generate a fresh round of questions."</p>
                        <div class="card-grid">
                            {TOPICS
                                .iter()
                                .map(|t| {
                                    view! {
                                        <button class="card card--link quiz-topic" on:click=move |_| generate(t)>
                                            <h3>{t.title}</h3>
                                            <p>{t.description}</p>
                                        </button>
                                    }
                                })
                                .collect::<Vec<_>>()}
                        </div>
                    }
                        .into_any(),
                    Some(t) => view! {
                        <h2 class="quiz__topic">{t.title}</h2>
                        {load_gate(round, on_retry, render_round)}
                    }
                        .into_any(),
                }}
            </section>
        </FullPage>
    }
}

#[component]
fn QuizRound(
    draft: QuizDraft,
    on_answer: Callback<(usize, usize)>,
    on_change_topic: Callback<()>,
    on_submit: Callback<()>,
) -> impl IntoView {
    let complete = draft.is_complete();
    let progress = format!("{} of {} answered", draft.answered_count(), draft.questions.len());
    let cards = draft
        .questions
        .into_iter()
        .zip(draft.answers)
        .enumerate()
        .map(|(index, (q, selected))| {
            let options = q
                .options
                .into_iter()
                .enumerate()
                .map(|(option, text)| {
                    view! {
                        <button
                            class="quiz-option"
                            class:quiz-option--selected=selected == Some(option)
                            on:click=move |_| on_answer.run((index, option))
                        >
                            {text}
                        </button>
                    }
                })
                .collect::<Vec<_>>();
            view! {
                <div class="card quiz-question">
                    <p class="quiz-question__prompt">{format!("{}. {}", index + 1, q.question)}</p>
                    <div class="quiz-question__options">{options}</div>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="quiz-round">
            {cards}
            <div class="quiz-round__footer">
                <span class="quiz-round__progress">{progress}</span>
                <button class="btn" on:click=move |_| on_change_topic.run(())>
                    "Change topic"
                </button>
                <button class="btn btn--primary" disabled=!complete on:click=move |_| on_submit.run(())>
                    "Submit answers"
                </button>
            </div>
        </div>
    }
}
