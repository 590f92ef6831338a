//! Message for detail routes whose id matches nothing.

use leptos::prelude::*;

use crate::components::link::NavLink;

#[component]
pub fn NotFound(
    #[prop(into)] what: String,
    #[prop(into)] back_path: String,
    #[prop(into)] back_label: String,
) -> impl IntoView {
    view! {
        <div class="not-found">
            <h2>{format!("{what} not found")}</h2>
            <p>"The link may be out of date."</p>
            <NavLink path=back_path class="btn">
                {back_label}
            </NavLink>
        </div>
    }
}
