use super::*;

#[test]
fn plan_ids_are_unique_and_findable() {
    for plan in PLANS {
        assert_eq!(find(plan.id), Some(plan));
        assert_eq!(PLANS.iter().filter(|p| p.id == plan.id).count(), 1);
    }
    assert_eq!(find("enterprise"), None);
}

#[test]
fn display_price_uses_rupee_symbol() {
    assert_eq!(find("pro-monthly").expect("plan").display_price(), "₹499");
}

#[test]
fn display_price_keeps_paise() {
    let plan = Plan { price_minor: 12_345, currency: "USD", ..PLANS[0] };
    assert_eq!(plan.display_price(), "USD123.45");
}
