//! Landing screen after sign-in.

use leptos::prelude::*;

use crate::components::link::NavLink;
use crate::content::catalog::{MODULES, PatternCategory};
use crate::session::controller::use_session;
use crate::state::quiz::QuizResult;
use crate::util::persistence;

struct EntryCard {
    title: &'static str,
    blurb: &'static str,
    path: &'static str,
}

const ENTRY_CARDS: &[EntryCard] = &[
    EntryCard { title: "Learning", blurb: "Structured modules from first candle to risk management.", path: "/learning" },
    EntryCard { title: "Practice", blurb: "Paper-trade a live simulated market with virtual cash.", path: "/practice" },
    EntryCard { title: "Quiz", blurb: "Test yourself with freshly generated questions.", path: "/quiz" },
    EntryCard { title: "Go Pro", blurb: "Unlock every module and unlimited quizzes.", path: "/pricing" },
];

#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session();
    let greeting = move || {
        session
            .session()
            .map_or_else(|| "Welcome back".to_owned(), |s| format!("Welcome back, {}", s.user.display_name()))
    };
    let last_result = persistence::load_json::<QuizResult>(persistence::QUIZ_RESULT_KEY);

    let cards = ENTRY_CARDS
        .iter()
        .map(|card| {
            view! {
                <NavLink path=card.path class="card card--link">
                    <h3>{card.title}</h3>
                    <p>{card.blurb}</p>
                </NavLink>
            }
        })
        .collect::<Vec<_>>();

    let libraries = PatternCategory::ALL
        .iter()
        .map(|category| {
            view! {
                <NavLink path=category.list_path() class="chip">
                    {category.title()}
                </NavLink>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <section class="home">
            <h2 class="home__greeting">{greeting}</h2>
            <p class="home__lede">
                {format!("{} modules and a full pattern library are waiting for you.", MODULES.len())}
            </p>
            <div class="card-grid">{cards}</div>
            <h3>"Pattern library"</h3>
            <div class="chip-row">{libraries}</div>
            {last_result.map(|result| {
                view! {
                    <div class="card home__last-quiz">
                        <h3>"Last quiz"</h3>
                        <p>{format!("{}: {}/{} ({}%)", result.topic_title(), result.score, result.total, result.percent())}</p>
                        <NavLink path="/quiz/results" class="btn">
                            "Review answers"
                        </NavLink>
                    </div>
                }
            })}
            <p class="home__footer">
                <NavLink path="/policies" class="home__policies">
                    "Policies & contact"
                </NavLink>
            </p>
        </section>
    }
}
