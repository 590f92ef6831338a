//! Paper-trading simulator: a seeded random-walk price and a cash account.
//!
//! DESIGN
//! ======
//! The feed is deterministic for a given seed so tests can replay it. The
//! account is long-only: sells are capped at the shares held. Average price
//! is the weighted cost of the open position; realised P&L is booked on
//! each sell against that average.

#[cfg(test)]
#[path = "practice_test.rs"]
mod practice_test;

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub const STARTING_CASH: f64 = 100_000.0;
pub const STARTING_PRICE: f64 = 250.0;
pub const HISTORY_LEN: usize = 60;
pub const TICK_MS: u32 = 1000;

const MIN_PRICE: f64 = 1.0;
const VOLATILITY: f64 = 0.006;

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Simulated last-traded price.
#[derive(Clone, Debug)]
pub struct PriceFeed {
    rng: SmallRng,
    price: f64,
    history: VecDeque<f64>,
}

impl PriceFeed {
    #[must_use]
    pub fn new(seed: u64, start: f64) -> Self {
        let price = round_cents(start.max(MIN_PRICE));
        let mut history = VecDeque::with_capacity(HISTORY_LEN);
        history.push_back(price);
        Self { rng: SmallRng::seed_from_u64(seed), price, history }
    }

    #[must_use]
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Recent prices, oldest first.
    pub fn history(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    /// Advance one tick and return the new price.
    pub fn tick(&mut self) -> f64 {
        let shock: f64 = self.rng.random_range(-1.0..=1.0);
        let next = round_cents((self.price * (1.0 + VOLATILITY * shock)).max(MIN_PRICE));
        self.price = next;
        if self.history.len() == HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(next);
        next
    }

    /// Change from the oldest retained price, as a percentage.
    #[must_use]
    pub fn change_percent(&self) -> f64 {
        let first = self.history.front().copied().unwrap_or(self.price);
        if first.abs() < f64::EPSILON { 0.0 } else { (self.price - first) / first * 100.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Trade {
    pub side: Side,
    pub quantity: u32,
    pub price: f64,
    /// Realised P&L booked by this trade (zero for buys).
    pub realized: f64,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TradeError {
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("not enough cash: need {needed:.2}, have {available:.2}")]
    InsufficientCash { needed: f64, available: f64 },
    #[error("cannot sell {requested} shares, holding {held}")]
    InsufficientShares { requested: u32, held: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Account {
    pub cash: f64,
    pub shares: u32,
    pub average_price: f64,
    pub realized_pnl: f64,
    pub trades: Vec<Trade>,
}

impl Default for Account {
    fn default() -> Self {
        Self::new(STARTING_CASH)
    }
}

impl Account {
    #[must_use]
    pub fn new(cash: f64) -> Self {
        Self { cash, shares: 0, average_price: 0.0, realized_pnl: 0.0, trades: Vec::new() }
    }

    /// # Errors
    ///
    /// Fails for a zero quantity or when cash does not cover the cost.
    pub fn buy(&mut self, quantity: u32, price: f64) -> Result<&Trade, TradeError> {
        if quantity == 0 {
            return Err(TradeError::ZeroQuantity);
        }
        let cost = round_cents(f64::from(quantity) * price);
        if cost > self.cash + f64::EPSILON {
            return Err(TradeError::InsufficientCash { needed: cost, available: self.cash });
        }
        let held_cost = self.average_price * f64::from(self.shares);
        self.shares += quantity;
        self.average_price = (held_cost + cost) / f64::from(self.shares);
        self.cash = round_cents(self.cash - cost);
        Ok(self.record(Trade { side: Side::Buy, quantity, price, realized: 0.0 }))
    }

    /// # Errors
    ///
    /// Fails for a zero quantity or when selling more than is held.
    pub fn sell(&mut self, quantity: u32, price: f64) -> Result<&Trade, TradeError> {
        if quantity == 0 {
            return Err(TradeError::ZeroQuantity);
        }
        if quantity > self.shares {
            return Err(TradeError::InsufficientShares { requested: quantity, held: self.shares });
        }
        let proceeds = round_cents(f64::from(quantity) * price);
        let realized = round_cents((price - self.average_price) * f64::from(quantity));
        self.shares -= quantity;
        self.cash = round_cents(self.cash + proceeds);
        self.realized_pnl = round_cents(self.realized_pnl + realized);
        if self.shares == 0 {
            self.average_price = 0.0;
        }
        Ok(self.record(Trade { side: Side::Sell, quantity, price, realized }))
    }

    fn record(&mut self, trade: Trade) -> &Trade {
        self.trades.push(trade);
        &self.trades[self.trades.len() - 1]
    }

    #[must_use]
    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        round_cents((price - self.average_price) * f64::from(self.shares))
    }

    #[must_use]
    pub fn equity(&self, price: f64) -> f64 {
        round_cents(self.cash + price * f64::from(self.shares))
    }

    /// Largest whole quantity the cash covers at `price`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn max_affordable(&self, price: f64) -> u32 {
        if price <= 0.0 {
            return 0;
        }
        // `as` saturates at the u32 bounds.
        (self.cash / price).floor() as u32
    }
}

/// Parse a quantity typed into the order form.
///
/// # Errors
///
/// Returns a user-facing message for anything but a positive integer.
pub fn parse_quantity(raw: &str) -> Result<u32, String> {
    match raw.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err("Enter a whole number of shares.".to_owned()),
        Ok(qty) => Ok(qty),
    }
}
