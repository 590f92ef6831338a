//! Plan list and checkout.

use leptos::prelude::*;

use crate::app::use_services;
use crate::components::shell::FullPage;
use crate::content::plans::{PLANS, Plan};
use crate::net::PaymentError;
use crate::net::payment;
use crate::session::controller::use_session;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Purchase {
    Idle,
    Working(&'static str),
    Succeeded(String),
    Failed(String),
}

#[component]
pub fn PricingPage() -> impl IntoView {
    let services = use_services();
    let session = use_session();
    let status = RwSignal::new(Purchase::Idle);

    let buy = move |plan: &'static Plan| {
        if matches!(status.get_untracked(), Purchase::Working(_)) {
            return;
        }
        let Some(current) = session.session_untracked() else {
            status.set(Purchase::Failed("Sign in to subscribe.".to_owned()));
            return;
        };
        status.set(Purchase::Working(plan.id));
        let client = services.client();
        leptos::task::spawn_local(async move {
            let next = match payment::purchase_plan(&client, &current, plan).await {
                Ok(verdict) => Purchase::Succeeded(
                    verdict.message.unwrap_or_else(|| format!("You're on {} now. Enjoy!", plan.name)),
                ),
                Err(PaymentError::Dismissed) => Purchase::Idle,
                Err(e) => {
                    log::warn!("purchase of {} failed: {e}", plan.id);
                    Purchase::Failed(e.to_string())
                }
            };
            let _ = status.try_set(next);
        });
    };

    let cards = PLANS
        .iter()
        .map(|plan| {
            let features = plan.features.iter().map(|f| view! { <li>{*f}</li> }).collect::<Vec<_>>();
            let working_on_this = move || status.get() == Purchase::Working(plan.id);
            view! {
                <div class=if plan.highlighted { "plan plan--highlighted" } else { "plan" }>
                    <h3 class="plan__name">{plan.name}</h3>
                    <p class="plan__price">
                        {plan.display_price()}
                        <span class="plan__period">{format!(" {}", plan.period)}</span>
                    </p>
                    <ul class="plan__features">{features}</ul>
                    <button
                        class="btn btn--primary"
                        disabled=move || matches!(status.get(), Purchase::Working(_))
                        on:click=move |_| buy(plan)
                    >
                        {move || if working_on_this() { "Processing..." } else { "Subscribe" }}
                    </button>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <FullPage title="Pricing">
            <section class="pricing">
                <p class="pricing__lede">"Pick a plan. Cancel any time from your profile."</p>
                <div class="pricing__plans">{cards}</div>
                {move || match status.get() {
                    Purchase::Succeeded(message) => view! { <p class="pricing__status pricing__status--ok">{message}</p> }.into_any(),
                    Purchase::Failed(message) => view! { <p class="pricing__status pricing__status--error">{message}</p> }.into_any(),
                    Purchase::Idle | Purchase::Working(_) => ().into_any(),
                }}
            </section>
        </FullPage>
    }
}
