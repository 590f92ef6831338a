use super::*;
use crate::routing::parser::{Location, parse};

#[test]
fn full_page_screens_bypass_the_shell() {
    for view in [
        ViewId::Practice,
        ViewId::PoliciesList,
        ViewId::Cancellation,
        ViewId::Terms,
        ViewId::Shipping,
        ViewId::Privacy,
        ViewId::Contact,
        ViewId::Pricing,
        ViewId::Quiz,
        ViewId::QuizResults,
        ViewId::Chat,
    ] {
        assert_eq!(view.layout(), Layout::FullPage, "{view:?}");
    }
}

#[test]
fn learning_and_account_screens_use_the_shell() {
    for view in [
        ViewId::Home,
        ViewId::LearningHome,
        ViewId::LearningModuleDetail,
        ViewId::LearningChapter,
        ViewId::BullishList,
        ViewId::BearishList,
        ViewId::IndicatorsList,
        ViewId::FundamentalList,
        ViewId::PatternDetail,
        ViewId::Profile,
    ] {
        assert_eq!(view.layout(), Layout::Shell, "{view:?}");
    }
}

#[test]
fn terms_scenario_is_full_page() {
    let route = parse(&Location::from_hash("#/policies/terms"));
    assert_eq!(route.view, ViewId::Terms);
    assert_eq!(route.view.layout(), Layout::FullPage);
}

#[test]
fn empty_location_scenario_is_home_in_shell() {
    for hash in ["", "#/"] {
        let route = parse(&Location::from_hash(hash));
        assert_eq!(route.view, ViewId::Home);
        assert_eq!(route.view.layout(), Layout::Shell);
    }
}

#[test]
fn only_quiz_screens_are_lazy() {
    let lazy: Vec<ViewId> = ViewId::ALL.into_iter().filter(|v| v.is_lazy()).collect();
    assert_eq!(lazy, vec![ViewId::Quiz, ViewId::QuizResults]);
}

#[test]
fn sidebar_paths_resolve_to_their_own_section() {
    for item in SIDEBAR_ITEMS {
        let route = parse(&Location::new(item.path));
        assert!(item.is_active(route.view), "{} -> {:?}", item.path, route.view);
    }
}

#[test]
fn chat_path_resolves_to_chat() {
    assert_eq!(parse(&Location::new(CHAT_PATH)).view, ViewId::Chat);
}

#[test]
fn every_view_has_a_title() {
    for view in ViewId::ALL {
        assert!(!view.title().is_empty());
    }
}
