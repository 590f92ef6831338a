//! Learning catalogue: module list, module detail and the chapter reader.

use leptos::prelude::*;

use crate::components::link::NavLink;
use crate::components::markdown::Markdown;
use crate::components::not_found::NotFound;
use crate::content::catalog::{self, MODULES, PatternCategory};

#[component]
pub fn LearningHomePage() -> impl IntoView {
    let modules = MODULES
        .iter()
        .map(|module| {
            view! {
                <NavLink path=catalog::module_path(module.id) class="card card--link module-card">
                    <span class="badge">{module.level.label()}</span>
                    <h3>{module.title}</h3>
                    <p>{module.summary}</p>
                    <p class="module-card__meta">
                        {format!("{} chapters · {} min", module.chapters.len(), module.total_minutes())}
                    </p>
                </NavLink>
            }
        })
        .collect::<Vec<_>>();

    let categories = PatternCategory::ALL
        .iter()
        .map(|category| {
            view! {
                <NavLink path=category.list_path() class="card card--link">
                    <h3>{category.title()}</h3>
                    <p>{category.blurb()}</p>
                </NavLink>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <section class="learning">
            <h2>"Modules"</h2>
            <div class="card-grid">{modules}</div>
            <h2>"Pattern library"</h2>
            <div class="card-grid">{categories}</div>
        </section>
    }
}

#[component]
pub fn ModuleDetailPage(module_id: String) -> impl IntoView {
    let Some(module) = catalog::find_module(&module_id) else {
        return view! { <NotFound what="Module" back_path="/learning" back_label="All modules"/> }.into_any();
    };

    let chapters = module
        .chapters
        .iter()
        .enumerate()
        .map(|(index, chapter)| {
            view! {
                <li class="chapter-list__item">
                    <NavLink path=catalog::chapter_path(chapter.id) class="chapter-list__link">
                        <span class="chapter-list__index">{index + 1}</span>
                        <span class="chapter-list__title">{chapter.title}</span>
                        <span class="chapter-list__minutes">{format!("{} min", chapter.minutes)}</span>
                    </NavLink>
                </li>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <section class="module-detail">
            <NavLink path="/learning" class="back-link">
                "← All modules"
            </NavLink>
            <span class="badge">{module.level.label()}</span>
            <h2>{module.title}</h2>
            <p>{module.summary}</p>
            <ol class="chapter-list">{chapters}</ol>
        </section>
    }
    .into_any()
}

#[component]
pub fn ChapterPage(chapter_id: String) -> impl IntoView {
    let Some((module, chapter)) = catalog::find_chapter(&chapter_id) else {
        return view! { <NotFound what="Chapter" back_path="/learning" back_label="All modules"/> }.into_any();
    };
    let (prev, next) = catalog::chapter_neighbours(chapter.id);

    view! {
        <article class="chapter">
            <NavLink path=catalog::module_path(module.id) class="back-link">
                {format!("← {}", module.title)}
            </NavLink>
            <h2>{chapter.title}</h2>
            <p class="chapter__meta">{format!("{} min read", chapter.minutes)}</p>
            <Markdown source=chapter.body/>
            <nav class="chapter__pager">
                {prev.map(|c| {
                    view! {
                        <NavLink path=catalog::chapter_path(c.id) class="btn">
                            {format!("← {}", c.title)}
                        </NavLink>
                    }
                })}
                {next.map(|c| {
                    view! {
                        <NavLink path=catalog::chapter_path(c.id) class="btn btn--primary">
                            {format!("{} →", c.title)}
                        </NavLink>
                    }
                })}
            </nav>
        </article>
    }
    .into_any()
}
