//! Location string → `(ViewId, RouteParams)` resolution.
//!
//! DESIGN
//! ======
//! Matching is an ordered table of matchers evaluated first-match-wins.
//! Anything the table does not match resolves to `ViewId::Home`, so parsing
//! never fails. Segment comparison is exact and case-sensitive.
//!
//! Leading delimiters are discarded; interior and trailing empty segments are
//! kept. A trailing slash after a detail prefix therefore yields a present,
//! empty identifier (`learning/chapter/` → chapter `""`).

#[cfg(test)]
#[path = "parser_test.rs"]
mod parser_test;

const DELIMITER: char = '/';

/// The routable fragment of the address, without the leading `#`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location(String);

impl Location {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Build from a raw `location.hash` value (`"#/learning"` → `"/learning"`).
    #[must_use]
    pub fn from_hash(hash: &str) -> Self {
        Self(hash.strip_prefix('#').unwrap_or(hash).to_owned())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty segments in order. A trailing delimiter after at least one
    /// segment adds a final empty segment, so `learning/chapter/` carries a
    /// present but empty id.
    fn segments(&self) -> Vec<&str> {
        let mut segments: Vec<&str> = self.0.split(DELIMITER).filter(|s| !s.is_empty()).collect();
        if !segments.is_empty() && self.0.ends_with(DELIMITER) {
            segments.push("");
        }
        segments
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One tag per screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewId {
    Home,
    Pricing,
    PoliciesList,
    Cancellation,
    Terms,
    Shipping,
    Privacy,
    Contact,
    LearningHome,
    LearningModuleDetail,
    LearningChapter,
    BullishList,
    BearishList,
    IndicatorsList,
    FundamentalList,
    PatternDetail,
    Practice,
    Profile,
    Chat,
    Quiz,
    QuizResults,
}

impl ViewId {
    pub const ALL: [ViewId; 21] = [
        ViewId::Home,
        ViewId::Pricing,
        ViewId::PoliciesList,
        ViewId::Cancellation,
        ViewId::Terms,
        ViewId::Shipping,
        ViewId::Privacy,
        ViewId::Contact,
        ViewId::LearningHome,
        ViewId::LearningModuleDetail,
        ViewId::LearningChapter,
        ViewId::BullishList,
        ViewId::BearishList,
        ViewId::IndicatorsList,
        ViewId::FundamentalList,
        ViewId::PatternDetail,
        ViewId::Practice,
        ViewId::Profile,
        ViewId::Chat,
        ViewId::Quiz,
        ViewId::QuizResults,
    ];

    /// Stable kebab-case tag, used as a CSS hook.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            ViewId::Home => "home",
            ViewId::Pricing => "pricing",
            ViewId::PoliciesList => "policies-list",
            ViewId::Cancellation => "cancellation",
            ViewId::Terms => "terms",
            ViewId::Shipping => "shipping",
            ViewId::Privacy => "privacy",
            ViewId::Contact => "contact",
            ViewId::LearningHome => "learning-home",
            ViewId::LearningModuleDetail => "learning-module-detail",
            ViewId::LearningChapter => "learning-chapter",
            ViewId::BullishList => "bullish-list",
            ViewId::BearishList => "bearish-list",
            ViewId::IndicatorsList => "indicators-list",
            ViewId::FundamentalList => "fundamental-list",
            ViewId::PatternDetail => "pattern-detail",
            ViewId::Practice => "practice",
            ViewId::Profile => "profile",
            ViewId::Chat => "chat",
            ViewId::Quiz => "quiz",
            ViewId::QuizResults => "quiz-results",
        }
    }
}

/// Identifiers copied verbatim from the path. At most one is set per route.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub active_module_id: Option<String>,
    pub active_chapter_id: Option<String>,
    pub active_pattern_id: Option<String>,
}

/// Result of parsing a location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub view: ViewId,
    pub params: RouteParams,
}

impl Route {
    #[must_use]
    pub fn new(view: ViewId) -> Self {
        Self { view, params: RouteParams::default() }
    }
}

impl Default for Route {
    fn default() -> Self {
        Self::new(ViewId::Home)
    }
}

#[derive(Clone, Copy, Debug)]
enum ParamSlot {
    Module,
    Chapter,
    Pattern,
}

impl ParamSlot {
    fn fill(self, id: &str) -> RouteParams {
        let id = Some(id.to_owned());
        match self {
            ParamSlot::Module => RouteParams { active_module_id: id, ..RouteParams::default() },
            ParamSlot::Chapter => RouteParams { active_chapter_id: id, ..RouteParams::default() },
            ParamSlot::Pattern => RouteParams { active_pattern_id: id, ..RouteParams::default() },
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Matcher {
    /// `section/sub/<id>`; needs the third segment to be present.
    Detail { section: &'static str, sub: &'static str, slot: ParamSlot, view: ViewId },
    /// `section/sub`, any trailing segments ignored.
    Sub { section: &'static str, sub: &'static str, view: ViewId },
    /// `section`, any trailing segments ignored.
    Section { section: &'static str, view: ViewId },
}

impl Matcher {
    fn try_match(self, segments: &[&str]) -> Option<Route> {
        match self {
            Matcher::Detail { section, sub, slot, view } => match segments {
                [first, second, id, ..] if *first == section && *second == sub => {
                    Some(Route { view, params: slot.fill(id) })
                }
                _ => None,
            },
            Matcher::Sub { section, sub, view } => match segments {
                [first, second, ..] if *first == section && *second == sub => Some(Route::new(view)),
                _ => None,
            },
            Matcher::Section { section, view } => match segments {
                [first, ..] if *first == section => Some(Route::new(view)),
                _ => None,
            },
        }
    }
}

const MATCHERS: &[Matcher] = &[
    Matcher::Section { section: "pricing", view: ViewId::Pricing },
    Matcher::Section { section: "practice", view: ViewId::Practice },
    Matcher::Section { section: "profile", view: ViewId::Profile },
    Matcher::Section { section: "chat", view: ViewId::Chat },
    Matcher::Sub { section: "quiz", sub: "results", view: ViewId::QuizResults },
    Matcher::Section { section: "quiz", view: ViewId::Quiz },
    Matcher::Sub { section: "policies", sub: "cancellation", view: ViewId::Cancellation },
    Matcher::Sub { section: "policies", sub: "terms", view: ViewId::Terms },
    Matcher::Sub { section: "policies", sub: "shipping", view: ViewId::Shipping },
    Matcher::Sub { section: "policies", sub: "privacy", view: ViewId::Privacy },
    Matcher::Sub { section: "policies", sub: "contact", view: ViewId::Contact },
    Matcher::Section { section: "policies", view: ViewId::PoliciesList },
    Matcher::Detail {
        section: "learning",
        sub: "module",
        slot: ParamSlot::Module,
        view: ViewId::LearningModuleDetail,
    },
    Matcher::Detail {
        section: "learning",
        sub: "chapter",
        slot: ParamSlot::Chapter,
        view: ViewId::LearningChapter,
    },
    Matcher::Detail {
        section: "learning",
        sub: "pattern",
        slot: ParamSlot::Pattern,
        view: ViewId::PatternDetail,
    },
    Matcher::Sub { section: "learning", sub: "bullish", view: ViewId::BullishList },
    Matcher::Sub { section: "learning", sub: "bearish", view: ViewId::BearishList },
    Matcher::Sub { section: "learning", sub: "indicators", view: ViewId::IndicatorsList },
    Matcher::Sub { section: "learning", sub: "fundamental", view: ViewId::FundamentalList },
    Matcher::Section { section: "learning", view: ViewId::LearningHome },
];

/// Resolve a location to its route. Total: unknown input yields `Home`.
#[must_use]
pub fn parse(location: &Location) -> Route {
    let segments = location.segments();
    MATCHERS
        .iter()
        .find_map(|matcher| matcher.try_match(&segments))
        .unwrap_or_default()
}
