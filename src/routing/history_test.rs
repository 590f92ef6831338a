use super::*;

#[test]
fn memory_history_starts_at_initial_location() {
    let history = MemoryHistory::new("/learning");
    assert_eq!(history.current(), Location::new("/learning"));
}

#[test]
fn set_updates_current_and_notifies() {
    let history = MemoryHistory::new("");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let seen = Rc::clone(&seen);
        history.subscribe(Rc::new(move |loc: &Location| seen.borrow_mut().push(loc.clone())))
    };

    history.set("/chat");
    history.external_change("/pricing");

    assert_eq!(history.current(), Location::new("/pricing"));
    assert_eq!(*seen.borrow(), vec![Location::new("/chat"), Location::new("/pricing")]);
}

#[test]
fn dropped_subscription_is_removed() {
    let history = MemoryHistory::new("");
    let sub = history.subscribe(Rc::new(|_: &Location| {}));
    assert_eq!(history.subscriber_count(), 1);
    drop(sub);
    assert_eq!(history.subscriber_count(), 0);
}

#[test]
fn scroll_resets_are_counted() {
    let history = MemoryHistory::new("");
    history.scroll_to_top();
    history.scroll_to_top();
    assert_eq!(history.scroll_resets(), 2);
}

#[test]
fn setting_the_same_location_does_not_notify() {
    let history = MemoryHistory::new("/chat");
    let count = Rc::new(Cell::new(0));
    let _sub = {
        let count = Rc::clone(&count);
        history.subscribe(Rc::new(move |_: &Location| count.set(count.get() + 1)))
    };
    history.set("/chat");
    assert_eq!(count.get(), 0);
}
