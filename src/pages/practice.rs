//! Paper-trading simulator screen.
//!
//! The price ticks once a second while the screen is mounted; the interval
//! is cleared on unmount. Nothing is persisted: every visit starts a fresh
//! account on a fresh seed.

#[cfg(test)]
#[path = "practice_test.rs"]
mod practice_test;

use std::time::Duration;

use leptos::prelude::*;

use crate::components::shell::FullPage;
use crate::state::practice::{Account, PriceFeed, STARTING_PRICE, Side, TICK_MS, parse_quantity};
use crate::util::clock;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 160.0;

/// SVG polyline points scaling `prices` into a `width` × `height` box,
/// highest price at the top.
fn sparkline_points(prices: &[f64], width: f64, height: f64) -> String {
    if prices.is_empty() {
        return String::new();
    }
    let (min, max) = prices
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
    let span = if (max - min).abs() < f64::EPSILON { 1.0 } else { max - min };
    #[allow(clippy::cast_precision_loss)]
    let step = if prices.len() > 1 { width / (prices.len() - 1) as f64 } else { 0.0 };
    prices
        .iter()
        .enumerate()
        .map(|(i, p)| {
            #[allow(clippy::cast_precision_loss)]
            let x = step * i as f64;
            let y = height - (p - min) / span * height;
            format!("{x:.1},{y:.1}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn money(value: f64) -> String {
    if value < 0.0 { format!("-₹{:.2}", value.abs()) } else { format!("₹{value:.2}") }
}

fn pnl_class(value: f64) -> &'static str {
    if value > 0.0 {
        "pnl pnl--up"
    } else if value < 0.0 {
        "pnl pnl--down"
    } else {
        "pnl"
    }
}

/// Place one order from the ticket's raw quantity text at `price`.
fn place_order(account: &mut Account, side: Side, quantity: &str, price: f64) -> Result<(), String> {
    let qty = parse_quantity(quantity)?;
    let placed = match side {
        Side::Buy => account.buy(qty, price).map(|_| ()),
        Side::Sell => account.sell(qty, price).map(|_| ()),
    };
    placed.map_err(|e| e.to_string())
}

#[component]
pub fn PracticePage() -> impl IntoView {
    #[allow(clippy::cast_sign_loss)]
    let seed = clock::now_millis() as u64;
    let feed = RwSignal::new(PriceFeed::new(seed, STARTING_PRICE));
    let account = RwSignal::new(Account::default());
    let quantity = RwSignal::new("1".to_owned());
    let error = RwSignal::new(None::<String>);

    match set_interval_with_handle(move || feed.update(|f| { f.tick(); }), Duration::from_millis(u64::from(TICK_MS))) {
        Ok(handle) => on_cleanup(move || handle.clear()),
        Err(e) => log::warn!("price ticker unavailable: {e:?}"),
    }

    let place = move |side: Side| {
        let price = feed.with_untracked(PriceFeed::price);
        let mut outcome = Ok(());
        account.update(|a| outcome = place_order(a, side, &quantity.get_untracked(), price));
        error.set(outcome.err());
    };

    let price = Signal::derive(move || feed.with(PriceFeed::price));
    let change = move || feed.with(PriceFeed::change_percent);
    let chart = move || feed.with(|f| sparkline_points(&f.history().collect::<Vec<_>>(), CHART_WIDTH, CHART_HEIGHT));

    view! {
        <FullPage title="Practice">
            <div class="practice">
                <section class="practice__market card">
                    <div class="practice__quote">
                        <span class="practice__symbol">"CNDL"</span>
                        <span class="practice__price">{move || money(price.get())}</span>
                        <span class=move || pnl_class(change())>{move || format!("{:+.2}%", change())}</span>
                    </div>
                    <svg class="practice__chart" viewBox=format!("0 0 {CHART_WIDTH} {CHART_HEIGHT}") preserveAspectRatio="none">
                        <polyline fill="none" stroke="currentColor" stroke-width="2" points=chart></polyline>
                    </svg>
                </section>
                <section class="practice__ticket card">
                    <label class="practice__label">
                        "Quantity"
                        <input
                            class="practice__qty"
                            type="number"
                            min="1"
                            prop:value=move || quantity.get()
                            on:input=move |ev| quantity.set(event_target_value(&ev))
                        />
                    </label>
                    <p class="practice__hint">
                        {move || format!("Max affordable: {}", account.with(|a| a.max_affordable(price.get())))}
                    </p>
                    <div class="practice__actions">
                        <button class="btn btn--buy" on:click=move |_| place(Side::Buy)>"Buy"</button>
                        <button class="btn btn--sell" on:click=move |_| place(Side::Sell)>"Sell"</button>
                    </div>
                    <Show when=move || error.get().is_some()>
                        <p class="practice__error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                </section>
                <AccountSummary account=account price=price/>
                <TradeLog account=account/>
            </div>
        </FullPage>
    }
}

#[component]
fn AccountSummary(account: RwSignal<Account>, price: Signal<f64>) -> impl IntoView {
    let unrealized = move || account.with(|a| a.unrealized_pnl(price.get()));
    let realized = move || account.with(|a| a.realized_pnl);

    view! {
        <section class="practice__account card">
            <dl>
                <dt>"Cash"</dt>
                <dd>{move || money(account.with(|a| a.cash))}</dd>
                <dt>"Position"</dt>
                <dd>{move || account.with(|a| format!("{} @ {}", a.shares, money(a.average_price)))}</dd>
                <dt>"Unrealised P&L"</dt>
                <dd class=move || pnl_class(unrealized())>{move || money(unrealized())}</dd>
                <dt>"Realised P&L"</dt>
                <dd class=move || pnl_class(realized())>{move || money(realized())}</dd>
                <dt>"Equity"</dt>
                <dd>{move || money(account.with(|a| a.equity(price.get())))}</dd>
            </dl>
        </section>
    }
}

/// Most recent trades first.
#[component]
fn TradeLog(account: RwSignal<Account>) -> impl IntoView {
    let trades = move || {
        account.with(|a| {
            a.trades
                .iter()
                .rev()
                .take(20)
                .map(|t| {
                    view! {
                        <tr>
                            <td class={if t.side == Side::Buy { "side side--buy" } else { "side side--sell" }}>
                                {t.side.label()}
                            </td>
                            <td>{t.quantity}</td>
                            <td>{money(t.price)}</td>
                            <td class=pnl_class(t.realized)>{money(t.realized)}</td>
                        </tr>
                    }
                })
                .collect::<Vec<_>>()
        })
    };

    view! {
        <section class="practice__trades card">
            <h3>"Trades"</h3>
            <table>
                <thead>
                    <tr>
                        <th>"Side"</th>
                        <th>"Qty"</th>
                        <th>"Price"</th>
                        <th>"Realised"</th>
                    </tr>
                </thead>
                <tbody>{trades}</tbody>
            </table>
        </section>
    }
}
