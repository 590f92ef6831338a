use super::*;

#[test]
fn sparkline_spans_the_box() {
    let points = sparkline_points(&[10.0, 20.0, 15.0], 100.0, 50.0);
    assert_eq!(points, "0.0,50.0 50.0,0.0 100.0,25.0");
}

#[test]
fn flat_series_sits_on_the_baseline() {
    assert_eq!(sparkline_points(&[5.0, 5.0], 10.0, 4.0), "0.0,4.0 10.0,4.0");
}

#[test]
fn empty_and_single_point_series() {
    assert_eq!(sparkline_points(&[], 10.0, 4.0), "");
    assert_eq!(sparkline_points(&[3.0], 10.0, 4.0), "0.0,4.0");
}

#[test]
fn money_formats_sign() {
    assert_eq!(money(1234.5), "₹1234.50");
    assert_eq!(money(-20.0), "-₹20.00");
}

#[test]
fn pnl_class_by_sign() {
    assert_eq!(pnl_class(1.0), "pnl pnl--up");
    assert_eq!(pnl_class(-1.0), "pnl pnl--down");
    assert_eq!(pnl_class(0.0), "pnl");
}

#[test]
fn order_ticket_rejects_bad_quantity_without_trading() {
    let mut account = Account::default();
    assert_eq!(place_order(&mut account, Side::Buy, "0", 100.0), Err("Enter a whole number of shares.".to_owned()));
    assert_eq!(place_order(&mut account, Side::Buy, "abc", 100.0), Err("Enter a whole number of shares.".to_owned()));
    assert!(account.trades.is_empty());
}

#[test]
fn order_ticket_buys_then_sells() {
    let mut account = Account::default();
    assert_eq!(place_order(&mut account, Side::Buy, " 3 ", 100.0), Ok(()));
    assert_eq!(account.shares, 3);
    assert_eq!(place_order(&mut account, Side::Sell, "2", 110.0), Ok(()));
    assert_eq!(account.shares, 1);
    assert_eq!(account.trades.len(), 2);
}

#[test]
fn order_ticket_reports_trade_errors() {
    let mut account = Account::default();
    let err = place_order(&mut account, Side::Sell, "1", 100.0).expect_err("nothing to sell");
    assert!(!err.is_empty());
    assert_eq!(account.shares, 0);
}
