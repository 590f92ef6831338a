use super::*;

fn route(path: &str) -> Route {
    parse(&Location::new(path))
}

fn view(path: &str) -> ViewId {
    route(path).view
}

// =============================================================
// Fallbacks
// =============================================================

#[test]
fn empty_and_root_locations_resolve_home() {
    assert_eq!(view(""), ViewId::Home);
    assert_eq!(view("/"), ViewId::Home);
    assert_eq!(parse(&Location::from_hash("#/")).view, ViewId::Home);
    assert_eq!(parse(&Location::from_hash("")).view, ViewId::Home);
}

#[test]
fn unknown_and_malformed_locations_resolve_home() {
    for path in ["/nope", "//", "///x", "/PRICING", "/ pricing", "?q=1", "/home/extra", "#", "/%20"] {
        let r = route(path);
        assert_eq!(r.view, ViewId::Home, "path {path:?}");
        assert_eq!(r.params, RouteParams::default(), "path {path:?}");
    }
}

#[test]
fn parsing_is_idempotent() {
    for path in ["/learning/chapter/c1", "/quiz/results", "/policies/x", "", "/learning/module"] {
        let loc = Location::new(path);
        assert_eq!(parse(&loc), parse(&loc));
    }
}

// =============================================================
// Top-level sections
// =============================================================

#[test]
fn literal_sections_map_directly() {
    assert_eq!(view("/pricing"), ViewId::Pricing);
    assert_eq!(view("/practice"), ViewId::Practice);
    assert_eq!(view("/profile"), ViewId::Profile);
    assert_eq!(view("/chat"), ViewId::Chat);
}

#[test]
fn literal_sections_ignore_trailing_segments() {
    assert_eq!(view("/pricing/annual"), ViewId::Pricing);
    assert_eq!(view("/chat/"), ViewId::Chat);
}

#[test]
fn leading_slashes_are_optional() {
    assert_eq!(view("pricing"), ViewId::Pricing);
    assert_eq!(view("//pricing"), ViewId::Pricing);
}

// =============================================================
// Quiz
// =============================================================

#[test]
fn quiz_results_requires_exact_second_segment() {
    assert_eq!(view("/quiz/results"), ViewId::QuizResults);
    assert_eq!(view("/quiz"), ViewId::Quiz);
    assert_eq!(view("/quiz/anything-else"), ViewId::Quiz);
    assert_eq!(view("/quiz/Results"), ViewId::Quiz);
}

// =============================================================
// Policies
// =============================================================

#[test]
fn policy_pages_dispatch_on_second_segment() {
    assert_eq!(view("/policies/cancellation"), ViewId::Cancellation);
    assert_eq!(view("/policies/terms"), ViewId::Terms);
    assert_eq!(view("/policies/shipping"), ViewId::Shipping);
    assert_eq!(view("/policies/privacy"), ViewId::Privacy);
    assert_eq!(view("/policies/contact"), ViewId::Contact);
}

#[test]
fn unknown_policy_falls_back_to_list() {
    assert_eq!(view("/policies"), ViewId::PoliciesList);
    assert_eq!(view("/policies/refunds"), ViewId::PoliciesList);
    assert_eq!(view("/policies/"), ViewId::PoliciesList);
}

// =============================================================
// Learning
// =============================================================

#[test]
fn learning_root_is_learning_home() {
    assert_eq!(view("/learning"), ViewId::LearningHome);
    assert_eq!(view("/learning/"), ViewId::LearningHome);
}

#[test]
fn chapter_id_is_copied_verbatim() {
    for id in ["c1", "Intro-To-Candles", "42", "a%20b", "with.dot"] {
        let r = route(&format!("/learning/chapter/{id}"));
        assert_eq!(r.view, ViewId::LearningChapter);
        assert_eq!(r.params.active_chapter_id.as_deref(), Some(id));
        assert_eq!(r.params.active_module_id, None);
        assert_eq!(r.params.active_pattern_id, None);
    }
}

#[test]
fn chapter_trailing_slash_yields_empty_id() {
    let r = route("/learning/chapter/");
    assert_eq!(r.view, ViewId::LearningChapter);
    assert_eq!(r.params.active_chapter_id.as_deref(), Some(""));
}

#[test]
fn detail_without_id_falls_back_to_learning_home() {
    for path in ["/learning/module", "/learning/chapter", "/learning/pattern"] {
        let r = route(path);
        assert_eq!(r.view, ViewId::LearningHome, "path {path:?}");
        assert_eq!(r.params, RouteParams::default(), "path {path:?}");
    }
}

#[test]
fn module_detail_copies_module_id() {
    let r = route("/learning/module/basics");
    assert_eq!(r.view, ViewId::LearningModuleDetail);
    assert_eq!(r.params.active_module_id.as_deref(), Some("basics"));
}

#[test]
fn pattern_detail_scenario() {
    let r = parse(&Location::from_hash("#/learning/pattern/hammer-candle"));
    assert_eq!(r.view, ViewId::PatternDetail);
    assert_eq!(r.params.active_pattern_id.as_deref(), Some("hammer-candle"));
}

#[test]
fn detail_uses_third_segment_only() {
    let r = route("/learning/pattern/doji/extra");
    assert_eq!(r.params.active_pattern_id.as_deref(), Some("doji"));
}

#[test]
fn pattern_lists_map_by_category() {
    assert_eq!(view("/learning/bullish"), ViewId::BullishList);
    assert_eq!(view("/learning/bearish"), ViewId::BearishList);
    assert_eq!(view("/learning/indicators"), ViewId::IndicatorsList);
    assert_eq!(view("/learning/fundamental"), ViewId::FundamentalList);
}

#[test]
fn unknown_learning_subsection_is_learning_home() {
    assert_eq!(view("/learning/options"), ViewId::LearningHome);
}

#[test]
fn interior_empty_segments_are_discarded() {
    assert_eq!(view("/learning//bullish"), ViewId::BullishList);
    assert_eq!(view("/policies///terms"), ViewId::Terms);
    let r = route("/learning/chapter//c1");
    assert_eq!(r.view, ViewId::LearningChapter);
    assert_eq!(r.params.active_chapter_id.as_deref(), Some("c1"));
}

#[test]
fn repeated_trailing_delimiters_still_yield_empty_id() {
    let r = route("/learning/pattern//");
    assert_eq!(r.view, ViewId::PatternDetail);
    assert_eq!(r.params.active_pattern_id.as_deref(), Some(""));
}

// =============================================================
// Location
// =============================================================

#[test]
fn from_hash_strips_single_marker() {
    assert_eq!(Location::from_hash("#/chat").as_str(), "/chat");
    assert_eq!(Location::from_hash("/chat").as_str(), "/chat");
    assert_eq!(Location::from_hash("##/chat").as_str(), "#/chat");
}

#[test]
fn view_tags_are_unique() {
    let mut tags: Vec<&str> = ViewId::ALL.iter().map(|v| v.tag()).collect();
    tags.sort_unstable();
    tags.dedup();
    assert_eq!(tags.len(), ViewId::ALL.len());
}
