//! Policy list and the individual policy pages.

use leptos::prelude::*;

use crate::components::link::NavLink;
use crate::components::markdown::Markdown;
use crate::components::shell::FullPage;
use crate::content::policies::PolicyKind;

#[component]
pub fn PoliciesListPage() -> impl IntoView {
    let items = PolicyKind::ALL
        .iter()
        .map(|kind| {
            view! {
                <li>
                    <NavLink path=kind.path() class="policy-list__link">
                        {kind.title()}
                    </NavLink>
                </li>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <FullPage title="Policies">
            <ul class="policy-list">{items}</ul>
        </FullPage>
    }
}

#[component]
pub fn PolicyPage(kind: PolicyKind) -> impl IntoView {
    view! {
        <FullPage title=kind.title() back_path="/policies">
            <article class="policy">
                <Markdown source=kind.body()/>
            </article>
        </FullPage>
    }
}
