//! Rendered markdown block.

use leptos::prelude::*;

use crate::util::markdown::render_markdown_html;

#[component]
pub fn Markdown(#[prop(into)] source: String) -> impl IntoView {
    view! { <div class="markdown" inner_html=render_markdown_html(&source)></div> }
}
