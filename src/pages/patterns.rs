//! Pattern library: per-category lists and the pattern detail screen.

use leptos::prelude::*;

use crate::components::link::NavLink;
use crate::components::markdown::Markdown;
use crate::components::not_found::NotFound;
use crate::content::catalog::{self, PatternCategory};

#[component]
pub fn PatternListPage(category: PatternCategory) -> impl IntoView {
    let cards = catalog::patterns_in(category)
        .map(|pattern| {
            view! {
                <NavLink path=pattern.path() class="card card--link pattern-card">
                    <h3>{pattern.name}</h3>
                    <p>{pattern.summary}</p>
                </NavLink>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <section class="pattern-list">
            <h2>{category.title()}</h2>
            <p class="pattern-list__blurb">{category.blurb()}</p>
            <div class="card-grid">{cards}</div>
        </section>
    }
}

#[component]
pub fn PatternDetailPage(pattern_id: String) -> impl IntoView {
    let Some(pattern) = catalog::find_pattern(&pattern_id) else {
        return view! { <NotFound what="Pattern" back_path="/learning" back_label="Back to learning"/> }.into_any();
    };

    let points = pattern
        .key_points
        .iter()
        .map(|point| view! { <li>{*point}</li> })
        .collect::<Vec<_>>();

    view! {
        <article class="pattern-detail">
            <NavLink path=pattern.category.list_path() class="back-link">
                {format!("← {}", pattern.category.title())}
            </NavLink>
            <h2>{pattern.name}</h2>
            <p class="pattern-detail__summary">{pattern.summary}</p>
            <Markdown source=pattern.body/>
            <h3>"Key points"</h3>
            <ul class="pattern-detail__points">{points}</ul>
            <NavLink path="/practice" class="btn btn--primary">
                "Try it in the simulator"
            </NavLink>
        </article>
    }
    .into_any()
}
