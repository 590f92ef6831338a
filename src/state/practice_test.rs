use super::*;

// =============================================================
// Price feed
// =============================================================

#[test]
fn same_seed_replays_same_prices() {
    let mut a = PriceFeed::new(7, STARTING_PRICE);
    let mut b = PriceFeed::new(7, STARTING_PRICE);
    for _ in 0..20 {
        assert_eq!(a.tick(), b.tick());
    }
}

#[test]
fn ticks_stay_within_volatility_band() {
    let mut feed = PriceFeed::new(1, 100.0);
    for _ in 0..200 {
        let before = feed.price();
        let after = feed.tick();
        assert!((after - before).abs() <= before * VOLATILITY + 0.01, "{before} -> {after}");
        assert!(after >= MIN_PRICE);
    }
}

#[test]
fn history_is_bounded() {
    let mut feed = PriceFeed::new(3, 100.0);
    for _ in 0..(HISTORY_LEN * 2) {
        feed.tick();
    }
    assert_eq!(feed.history().count(), HISTORY_LEN);
    assert_eq!(feed.history().last(), Some(feed.price()));
}

#[test]
fn fresh_feed_has_no_change() {
    let feed = PriceFeed::new(0, 120.0);
    assert_eq!(feed.change_percent(), 0.0);
    assert_eq!(feed.history().collect::<Vec<_>>(), vec![120.0]);
}

// =============================================================
// Account
// =============================================================

#[test]
fn buy_moves_cash_into_position() {
    let mut account = Account::new(1_000.0);
    account.buy(5, 100.0).expect("buy");
    assert_eq!(account.cash, 500.0);
    assert_eq!(account.shares, 5);
    assert_eq!(account.average_price, 100.0);
}

#[test]
fn average_price_is_weighted() {
    let mut account = Account::new(10_000.0);
    account.buy(10, 100.0).expect("buy");
    account.buy(10, 120.0).expect("buy");
    assert_eq!(account.average_price, 110.0);
}

#[test]
fn sell_books_realized_pnl_against_average() {
    let mut account = Account::new(10_000.0);
    account.buy(10, 100.0).expect("buy");
    let trade = account.sell(4, 125.0).expect("sell").clone();
    assert_eq!(trade.realized, 100.0);
    assert_eq!(account.realized_pnl, 100.0);
    assert_eq!(account.shares, 6);
    assert_eq!(account.average_price, 100.0);
    assert_eq!(account.cash, 9_500.0);
}

#[test]
fn unrealized_and_equity_follow_price() {
    let mut account = Account::new(2_000.0);
    account.buy(10, 100.0).expect("buy");
    assert_eq!(account.unrealized_pnl(90.0), -100.0);
    assert_eq!(account.equity(90.0), 1_900.0);
}

#[test]
fn closing_position_resets_average() {
    let mut account = Account::new(1_000.0);
    account.buy(2, 100.0).expect("buy");
    account.sell(2, 90.0).expect("sell");
    assert_eq!(account.shares, 0);
    assert_eq!(account.average_price, 0.0);
    assert_eq!(account.realized_pnl, -20.0);
    assert_eq!(account.unrealized_pnl(500.0), 0.0);
}

#[test]
fn rejects_orders_it_cannot_fill() {
    let mut account = Account::new(100.0);
    assert_eq!(account.buy(0, 10.0).map(|_| ()), Err(TradeError::ZeroQuantity));
    assert!(matches!(account.buy(2, 60.0), Err(TradeError::InsufficientCash { .. })));
    assert_eq!(
        account.sell(1, 10.0).map(|_| ()),
        Err(TradeError::InsufficientShares { requested: 1, held: 0 })
    );
    assert!(account.trades.is_empty());
    assert_eq!(account.cash, 100.0);
}

#[test]
fn trades_are_logged_in_order() {
    let mut account = Account::default();
    account.buy(1, 10.0).expect("buy");
    account.sell(1, 11.0).expect("sell");
    let sides: Vec<Side> = account.trades.iter().map(|t| t.side).collect();
    assert_eq!(sides, vec![Side::Buy, Side::Sell]);
}

#[test]
fn max_affordable_floors() {
    let account = Account::new(1_000.0);
    assert_eq!(account.max_affordable(300.0), 3);
    assert_eq!(account.max_affordable(0.0), 0);
}

#[test]
fn quantity_parsing() {
    assert_eq!(parse_quantity(" 12 "), Ok(12));
    assert!(parse_quantity("0").is_err());
    assert!(parse_quantity("-3").is_err());
    assert!(parse_quantity("1.5").is_err());
}
