use super::*;
use crate::routing::history::MemoryHistory;
use crate::routing::parser::ViewId;
use std::cell::Cell;

fn controller_on(initial: &str) -> (Rc<MemoryHistory>, NavigationController) {
    let history = Rc::new(MemoryHistory::new(initial));
    let controller = NavigationController::new(history.clone());
    (history, controller)
}

#[test]
fn initial_state_is_parsed_from_history() {
    let (_history, controller) = controller_on("/learning/pattern/doji");
    let state = controller.state();
    assert_eq!(state.route.view, ViewId::PatternDetail);
    assert_eq!(state.render_key, 0);
    assert!(!state.drawer_open);
}

#[test]
fn navigate_is_observed_by_next_parse() {
    let (_history, controller) = controller_on("");
    controller.navigate("/quiz/results");
    assert_eq!(controller.route().view, ViewId::QuizResults);
    assert_eq!(controller.state().location, Location::new("/quiz/results"));
}

#[test]
fn every_change_bumps_render_key_and_resets_scroll() {
    let (history, controller) = controller_on("");
    controller.navigate("/chat");
    controller.navigate("/learning");
    assert_eq!(controller.state().render_key, 2);
    assert_eq!(history.scroll_resets(), 2);
}

#[test]
fn external_back_forward_changes_are_followed() {
    let (history, controller) = controller_on("/chat");
    history.external_change("/policies/terms");
    assert_eq!(controller.route().view, ViewId::Terms);
}

#[test]
fn navigate_closes_open_drawer() {
    let (_history, controller) = controller_on("");
    controller.toggle_drawer();
    assert!(controller.state().drawer_open);
    controller.navigate("/profile");
    assert!(!controller.state().drawer_open);
}

#[test]
fn drawer_toggle_does_not_change_render_key() {
    let (_history, controller) = controller_on("");
    controller.toggle_drawer();
    controller.toggle_drawer();
    assert_eq!(controller.state().render_key, 0);
}

#[test]
fn subscribers_receive_snapshots_in_order() {
    let (_history, controller) = controller_on("");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let _sub = {
        let seen = Rc::clone(&seen);
        controller.subscribe(move |s| seen.borrow_mut().push(s.route.view))
    };

    controller.navigate("/pricing");
    controller.navigate("/chat");

    assert_eq!(*seen.borrow(), vec![ViewId::Pricing, ViewId::Chat]);
}

#[test]
fn dropping_controller_unsubscribes_from_history() {
    let (history, controller) = controller_on("");
    assert_eq!(history.subscriber_count(), 1);
    drop(controller);
    assert_eq!(history.subscriber_count(), 0);
    history.external_change("/chat");
    assert_eq!(history.scroll_resets(), 0);
}

#[test]
fn no_notification_reaches_dropped_subscriber() {
    let (_history, controller) = controller_on("");
    let count = Rc::new(Cell::new(0));
    let sub = {
        let count = Rc::clone(&count);
        controller.subscribe(move |_| count.set(count.get() + 1))
    };
    drop(sub);
    controller.navigate("/chat");
    assert_eq!(count.get(), 0);
}
