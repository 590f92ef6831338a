use super::*;

fn pair(k: &str, v: &str) -> (String, String) {
    (k.to_owned(), v.to_owned())
}

#[test]
fn empty_query_selects_everything() {
    assert_eq!(Query::new().to_pairs(), vec![pair("select", "*")]);
}

#[test]
fn filters_order_and_limit_render_in_sequence() {
    let pairs = Query::new()
        .columns("id,body")
        .eq("user_id", "u-1")
        .eq("sender", "support")
        .order("created_at", Order::Desc)
        .limit(10)
        .to_pairs();
    assert_eq!(
        pairs,
        vec![
            pair("select", "id,body"),
            pair("user_id", "eq.u-1"),
            pair("sender", "eq.support"),
            pair("order", "created_at.desc"),
            pair("limit", "10"),
        ]
    );
}

#[test]
fn support_history_is_oldest_first_for_one_user() {
    let pairs = support_history_query("abc").to_pairs();
    assert!(pairs.contains(&pair("user_id", "eq.abc")));
    assert!(pairs.contains(&pair("order", "created_at.asc")));
}

#[test]
fn first_row_requires_a_row() {
    assert_eq!(first_row("write t", vec![1, 2]), Ok(1));
    let err = first_row::<u8>("write t", Vec::new()).expect_err("empty");
    assert!(matches!(err, BackendError::Decode { .. }));
}
