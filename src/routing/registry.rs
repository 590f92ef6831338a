//! View registry: screen, layout mode and sidebar entry for every `ViewId`.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use leptos::prelude::*;

use super::parser::{Route, ViewId};
use crate::content::catalog::PatternCategory;
use crate::content::policies::PolicyKind;
use crate::pages;

/// How a screen is framed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// The screen owns its whole frame.
    FullPage,
    /// The screen renders inside the sidebar + header shell.
    Shell,
}

impl ViewId {
    #[must_use]
    pub const fn layout(self) -> Layout {
        match self {
            ViewId::Practice
            | ViewId::PoliciesList
            | ViewId::Cancellation
            | ViewId::Terms
            | ViewId::Shipping
            | ViewId::Privacy
            | ViewId::Contact
            | ViewId::Pricing
            | ViewId::Quiz
            | ViewId::QuizResults
            | ViewId::Chat => Layout::FullPage,
            _ => Layout::Shell,
        }
    }

    /// Screens whose data is loaded on demand behind a loading indicator.
    #[must_use]
    pub const fn is_lazy(self) -> bool {
        matches!(self, ViewId::Quiz | ViewId::QuizResults)
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            ViewId::Home => "Home",
            ViewId::Pricing => "Pricing",
            ViewId::PoliciesList => "Policies",
            ViewId::Cancellation => "Cancellation & Refunds",
            ViewId::Terms => "Terms & Conditions",
            ViewId::Shipping => "Shipping & Delivery",
            ViewId::Privacy => "Privacy Policy",
            ViewId::Contact => "Contact Us",
            ViewId::LearningHome => "Learning",
            ViewId::LearningModuleDetail => "Module",
            ViewId::LearningChapter => "Chapter",
            ViewId::BullishList => "Bullish Patterns",
            ViewId::BearishList => "Bearish Patterns",
            ViewId::IndicatorsList => "Indicators",
            ViewId::FundamentalList => "Fundamentals",
            ViewId::PatternDetail => "Pattern",
            ViewId::Practice => "Practice",
            ViewId::Profile => "Profile",
            ViewId::Chat => "Support Chat",
            ViewId::Quiz => "Quiz",
            ViewId::QuizResults => "Quiz Results",
        }
    }
}

/// One sidebar link.
#[derive(Clone, Copy, Debug)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    section: &'static [ViewId],
}

impl NavItem {
    #[must_use]
    pub fn is_active(&self, view: ViewId) -> bool {
        self.section.contains(&view)
    }
}

pub const SIDEBAR_ITEMS: &[NavItem] = &[
    NavItem { label: "Home", path: "/home", section: &[ViewId::Home] },
    NavItem {
        label: "Learning",
        path: "/learning",
        section: &[ViewId::LearningHome, ViewId::LearningModuleDetail, ViewId::LearningChapter],
    },
    NavItem { label: "Bullish", path: "/learning/bullish", section: &[ViewId::BullishList] },
    NavItem { label: "Bearish", path: "/learning/bearish", section: &[ViewId::BearishList] },
    NavItem { label: "Indicators", path: "/learning/indicators", section: &[ViewId::IndicatorsList] },
    NavItem { label: "Fundamentals", path: "/learning/fundamental", section: &[ViewId::FundamentalList] },
    NavItem { label: "Practice", path: "/practice", section: &[ViewId::Practice] },
    NavItem { label: "Quiz", path: "/quiz", section: &[ViewId::Quiz, ViewId::QuizResults] },
    NavItem { label: "Pricing", path: "/pricing", section: &[ViewId::Pricing] },
    NavItem { label: "Profile", path: "/profile", section: &[ViewId::Profile] },
];

/// Path the floating action control always opens.
pub const CHAT_PATH: &str = "/chat";

/// Build the screen for `route`.
pub fn render_screen(route: &Route) -> AnyView {
    let params = route.params.clone();
    match route.view {
        ViewId::Home => view! { <pages::home::HomePage/> }.into_any(),
        ViewId::Pricing => view! { <pages::pricing::PricingPage/> }.into_any(),
        ViewId::PoliciesList => view! { <pages::policies::PoliciesListPage/> }.into_any(),
        ViewId::Cancellation => policy(PolicyKind::Cancellation),
        ViewId::Terms => policy(PolicyKind::Terms),
        ViewId::Shipping => policy(PolicyKind::Shipping),
        ViewId::Privacy => policy(PolicyKind::Privacy),
        ViewId::Contact => policy(PolicyKind::Contact),
        ViewId::LearningHome => view! { <pages::learning::LearningHomePage/> }.into_any(),
        ViewId::LearningModuleDetail => {
            let module_id = params.active_module_id.unwrap_or_default();
            view! { <pages::learning::ModuleDetailPage module_id=module_id/> }.into_any()
        }
        ViewId::LearningChapter => {
            let chapter_id = params.active_chapter_id.unwrap_or_default();
            view! { <pages::learning::ChapterPage chapter_id=chapter_id/> }.into_any()
        }
        ViewId::BullishList => pattern_list(PatternCategory::Bullish),
        ViewId::BearishList => pattern_list(PatternCategory::Bearish),
        ViewId::IndicatorsList => pattern_list(PatternCategory::Indicator),
        ViewId::FundamentalList => pattern_list(PatternCategory::Fundamental),
        ViewId::PatternDetail => {
            let pattern_id = params.active_pattern_id.unwrap_or_default();
            view! { <pages::patterns::PatternDetailPage pattern_id=pattern_id/> }.into_any()
        }
        ViewId::Practice => view! { <pages::practice::PracticePage/> }.into_any(),
        ViewId::Profile => view! { <pages::profile::ProfilePage/> }.into_any(),
        ViewId::Chat => view! { <pages::chat::ChatPage/> }.into_any(),
        ViewId::Quiz => view! { <pages::quiz::QuizPage/> }.into_any(),
        ViewId::QuizResults => view! { <pages::quiz_results::QuizResultsPage/> }.into_any(),
    }
}

fn policy(kind: PolicyKind) -> AnyView {
    view! { <pages::policies::PolicyPage kind=kind/> }.into_any()
}

fn pattern_list(category: PatternCategory) -> AnyView {
    view! { <pages::patterns::PatternListPage category=category/> }.into_any()
}
