use super::*;
use std::cell::Cell;

#[test]
fn emit_delivers_in_registration_order() {
    let listeners = Listeners::<u32>::new();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let first = {
        let seen = Rc::clone(&seen);
        listeners.subscribe(move |v: &u32| seen.borrow_mut().push(("first", *v)))
    };
    let second = {
        let seen = Rc::clone(&seen);
        listeners.subscribe(move |v: &u32| seen.borrow_mut().push(("second", *v)))
    };

    listeners.emit(&7);
    assert_eq!(*seen.borrow(), vec![("first", 7), ("second", 7)]);
    drop((first, second));
}

#[test]
fn dropping_subscription_stops_delivery() {
    let listeners = Listeners::<()>::new();
    let count = Rc::new(Cell::new(0));
    let sub = {
        let count = Rc::clone(&count);
        listeners.subscribe(move |_| count.set(count.get() + 1))
    };

    listeners.emit(&());
    drop(sub);
    listeners.emit(&());

    assert_eq!(count.get(), 1);
    assert!(listeners.is_empty());
}

#[test]
fn cancel_runs_release_exactly_once() {
    let released = Rc::new(Cell::new(0));
    let sub = {
        let released = Rc::clone(&released);
        Subscription::new(move || released.set(released.get() + 1))
    };
    sub.cancel();
    assert_eq!(released.get(), 1);
}

#[test]
fn noop_subscription_drops_cleanly() {
    let sub = Subscription::noop();
    drop(sub);
}

#[test]
fn callback_may_unsubscribe_during_emit() {
    let listeners = Listeners::<u8>::new();
    let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
    let count = Rc::new(Cell::new(0));

    let sub = {
        let slot = Rc::clone(&slot);
        let count = Rc::clone(&count);
        listeners.subscribe(move |_| {
            count.set(count.get() + 1);
            slot.borrow_mut().take();
        })
    };
    *slot.borrow_mut() = Some(sub);

    listeners.emit(&1);
    listeners.emit(&2);

    assert_eq!(count.get(), 1);
    assert_eq!(listeners.len(), 0);
}

#[test]
fn subscription_outliving_listeners_is_harmless() {
    let listeners = Listeners::<u8>::new();
    let sub = listeners.subscribe(|_| {});
    drop(listeners);
    drop(sub);
}
