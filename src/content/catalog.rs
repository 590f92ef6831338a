//! Learning catalogue: modules with their chapters, and the pattern library.
//!
//! DESIGN
//! ======
//! Content is compiled in as static data. Chapter ids are unique across all
//! modules because the chapter route carries only the chapter id. Pattern
//! list screens filter the single `PATTERNS` table by category.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Chapter {
    pub id: &'static str,
    pub title: &'static str,
    pub minutes: u32,
    /// Markdown body.
    pub body: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Module {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub level: Level,
    pub chapters: &'static [Chapter],
}

impl Module {
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.chapters.iter().map(|c| c.minutes).sum()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternCategory {
    Bullish,
    Bearish,
    Indicator,
    Fundamental,
}

impl PatternCategory {
    pub const ALL: [PatternCategory; 4] =
        [PatternCategory::Bullish, PatternCategory::Bearish, PatternCategory::Indicator, PatternCategory::Fundamental];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            PatternCategory::Bullish => "Bullish Patterns",
            PatternCategory::Bearish => "Bearish Patterns",
            PatternCategory::Indicator => "Technical Indicators",
            PatternCategory::Fundamental => "Fundamental Analysis",
        }
    }

    /// Hash path of the category's list screen.
    #[must_use]
    pub fn list_path(self) -> &'static str {
        match self {
            PatternCategory::Bullish => "/learning/bullish",
            PatternCategory::Bearish => "/learning/bearish",
            PatternCategory::Indicator => "/learning/indicators",
            PatternCategory::Fundamental => "/learning/fundamental",
        }
    }

    #[must_use]
    pub fn blurb(self) -> &'static str {
        match self {
            PatternCategory::Bullish => "Formations that often precede a move higher.",
            PatternCategory::Bearish => "Formations that often precede a move lower.",
            PatternCategory::Indicator => "Calculations on price and volume that confirm what the candles suggest.",
            PatternCategory::Fundamental => "Ratios that describe the business behind the ticker.",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Pattern {
    pub id: &'static str,
    pub name: &'static str,
    pub category: PatternCategory,
    pub summary: &'static str,
    /// Markdown body.
    pub body: &'static str,
    pub key_points: &'static [&'static str],
}

impl Pattern {
    /// Hash path of the detail screen.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/learning/pattern/{}", self.id)
    }
}

#[must_use]
pub fn module_path(id: &str) -> String {
    format!("/learning/module/{id}")
}

#[must_use]
pub fn chapter_path(id: &str) -> String {
    format!("/learning/chapter/{id}")
}

#[must_use]
pub fn find_module(id: &str) -> Option<&'static Module> {
    MODULES.iter().find(|m| m.id == id)
}

/// The chapter with `id` together with the module that contains it.
#[must_use]
pub fn find_chapter(id: &str) -> Option<(&'static Module, &'static Chapter)> {
    MODULES
        .iter()
        .find_map(|m| m.chapters.iter().find(|c| c.id == id).map(|c| (m, c)))
}

/// Chapters before and after `id` within its module.
#[must_use]
pub fn chapter_neighbours(id: &str) -> (Option<&'static Chapter>, Option<&'static Chapter>) {
    let Some((module, _)) = find_chapter(id) else {
        return (None, None);
    };
    let Some(index) = module.chapters.iter().position(|c| c.id == id) else {
        return (None, None);
    };
    let prev = index.checked_sub(1).and_then(|i| module.chapters.get(i));
    (prev, module.chapters.get(index + 1))
}

pub fn patterns_in(category: PatternCategory) -> impl Iterator<Item = &'static Pattern> {
    PATTERNS.iter().filter(move |p| p.category == category)
}

#[must_use]
pub fn find_pattern(id: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.id == id)
}

// =============================================================================
// MODULES
// =============================================================================

pub static MODULES: &[Module] = &[
    Module {
        id: "candlestick-basics",
        title: "Candlestick Basics",
        summary: "Read a single candle: body, wicks, and what they say about buyers and sellers.",
        level: Level::Beginner,
        chapters: &[
            Chapter {
                id: "anatomy-of-a-candle",
                title: "Anatomy of a Candle",
                minutes: 6,
                body: "\
Every candle summarises one period with four prices: **open**, **high**, **low** and **close**.

| Part | Meaning |
|------|---------|
| Body | Distance between open and close |
| Upper wick | High above the body |
| Lower wick | Low below the body |

A green (hollow) body closed above its open; a red (filled) body closed below it.
",
            },
            Chapter {
                id: "reading-wicks",
                title: "Reading Wicks",
                minutes: 8,
                body: "\
Long wicks show prices that were reached and then **rejected**.

- A long lower wick: sellers pushed down, buyers pushed back.
- A long upper wick: buyers pushed up, sellers pushed back.

Wicks matter most at support and resistance levels.
",
            },
            Chapter {
                id: "timeframes",
                title: "Choosing a Timeframe",
                minutes: 5,
                body: "\
The same market tells different stories on a 5-minute and a daily chart. \
Start from the higher timeframe for direction, then drop down for entries.
",
            },
        ],
    },
    Module {
        id: "trend-and-structure",
        title: "Trend and Market Structure",
        summary: "Higher highs, lower lows, support, resistance and where patterns actually matter.",
        level: Level::Intermediate,
        chapters: &[
            Chapter {
                id: "identifying-trends",
                title: "Identifying Trends",
                minutes: 7,
                body: "\
An **uptrend** prints higher highs and higher lows. A **downtrend** prints lower highs and lower lows. \
Anything else is a range.
",
            },
            Chapter {
                id: "support-and-resistance",
                title: "Support and Resistance",
                minutes: 9,
                body: "\
Support is a price zone where demand has repeatedly absorbed selling; resistance is the mirror image. \
Once broken, old resistance often becomes new support.
",
            },
        ],
    },
    Module {
        id: "risk-management",
        title: "Risk Management",
        summary: "Position sizing, stop losses and why surviving matters more than any single trade.",
        level: Level::Advanced,
        chapters: &[
            Chapter {
                id: "position-sizing",
                title: "Position Sizing",
                minutes: 8,
                body: "\
Risk a fixed fraction of the account per trade, commonly **1%**.

`quantity = (account × risk%) ÷ (entry − stop)`
",
            },
            Chapter {
                id: "stop-losses",
                title: "Stop Losses",
                minutes: 6,
                body: "\
Place the stop where the trade idea is proven wrong, not at an arbitrary percentage. \
If that stop is too far away, reduce size rather than moving the stop.
",
            },
            Chapter {
                id: "risk-reward",
                title: "Risk and Reward",
                minutes: 5,
                body: "\
A 1:2 risk-to-reward setup only needs to win one time in three to break even.
",
            },
        ],
    },
];

// =============================================================================
// PATTERNS
// =============================================================================

pub static PATTERNS: &[Pattern] = &[
    Pattern {
        id: "hammer",
        name: "Hammer",
        category: PatternCategory::Bullish,
        summary: "Small body at the top of a long lower wick after a decline.",
        body: "Sellers drove price sharply lower but buyers recovered almost all of it by the close. \
Most meaningful at support after a sustained fall.",
        key_points: &["Lower wick at least twice the body", "Little or no upper wick", "Confirm with the next candle closing higher"],
    },
    Pattern {
        id: "bullish-engulfing",
        name: "Bullish Engulfing",
        category: PatternCategory::Bullish,
        summary: "A green body that fully covers the previous red body.",
        body: "The second candle opens below the prior close and closes above the prior open, \
showing a decisive shift from sellers to buyers.",
        key_points: &["Appears after a downtrend", "Second body engulfs the first", "Higher volume strengthens the signal"],
    },
    Pattern {
        id: "morning-star",
        name: "Morning Star",
        category: PatternCategory::Bullish,
        summary: "Three-candle reversal: long red, small indecisive, long green.",
        body: "The small middle candle marks exhaustion; the third candle closing well into the first body confirms the turn.",
        key_points: &["Three candles", "Gap or near-gap around the middle candle", "Third candle closes above the first body's midpoint"],
    },
    Pattern {
        id: "shooting-star",
        name: "Shooting Star",
        category: PatternCategory::Bearish,
        summary: "Small body at the bottom of a long upper wick after a rally.",
        body: "Buyers pushed price higher but could not hold it. Sellers closed the candle near its low.",
        key_points: &["Upper wick at least twice the body", "Appears after an advance", "Confirm with a lower close next"],
    },
    Pattern {
        id: "bearish-engulfing",
        name: "Bearish Engulfing",
        category: PatternCategory::Bearish,
        summary: "A red body that fully covers the previous green body.",
        body: "The mirror of the bullish engulfing: momentum flips from buyers to sellers within one period.",
        key_points: &["Appears after an uptrend", "Second body engulfs the first", "Stronger near resistance"],
    },
    Pattern {
        id: "evening-star",
        name: "Evening Star",
        category: PatternCategory::Bearish,
        summary: "Three-candle top: long green, small indecisive, long red.",
        body: "The small middle candle shows the rally stalling; the red third candle confirms sellers have taken over.",
        key_points: &["Three candles", "Middle candle gaps up", "Third candle closes below the first body's midpoint"],
    },
    Pattern {
        id: "rsi",
        name: "Relative Strength Index",
        category: PatternCategory::Indicator,
        summary: "Momentum oscillator between 0 and 100.",
        body: "RSI compares average gains to average losses over 14 periods. \
Readings above **70** are commonly called overbought and below **30** oversold.",
        key_points: &["Default period 14", "Divergence from price hints at weakening momentum", "Trends can stay overbought for long stretches"],
    },
    Pattern {
        id: "macd",
        name: "MACD",
        category: PatternCategory::Indicator,
        summary: "Difference between a fast and a slow exponential moving average.",
        body: "The MACD line is EMA(12) minus EMA(26); the signal line is EMA(9) of MACD. Crossovers mark momentum shifts.",
        key_points: &["12 / 26 / 9 defaults", "Histogram shows MACD minus signal", "Lagging by construction"],
    },
    Pattern {
        id: "moving-averages",
        name: "Moving Averages",
        category: PatternCategory::Indicator,
        summary: "Smoothed price used to read trend direction.",
        body: "Price above a rising 50-day average is a simple definition of an uptrend. \
The 50/200 crossover is known as the golden (up) or death (down) cross.",
        key_points: &["SMA weights every bar equally", "EMA reacts faster", "Slope matters more than crossings"],
    },
    Pattern {
        id: "pe-ratio",
        name: "Price to Earnings",
        category: PatternCategory::Fundamental,
        summary: "Share price divided by earnings per share.",
        body: "P/E tells you how many years of current earnings the market is paying for. Compare within an industry, not across.",
        key_points: &["High P/E can mean growth or hype", "Negative earnings make P/E meaningless", "Use forward and trailing values"],
    },
    Pattern {
        id: "earnings-per-share",
        name: "Earnings per Share",
        category: PatternCategory::Fundamental,
        summary: "Net profit attributable to each share.",
        body: "EPS growth over several years is one of the clearest signs of a compounding business.",
        key_points: &["Watch for dilution", "One-off gains inflate EPS", "Trend beats any single quarter"],
    },
    Pattern {
        id: "debt-to-equity",
        name: "Debt to Equity",
        category: PatternCategory::Fundamental,
        summary: "Total debt relative to shareholder equity.",
        body: "Leverage magnifies both returns and risk. Capital-heavy industries naturally carry more debt.",
        key_points: &["Below 1 is conservative for most sectors", "Rising debt with falling profits is a warning", "Compare with interest coverage"],
    },
];
