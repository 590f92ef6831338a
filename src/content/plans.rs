//! Subscription plans offered on the pricing screen.

#[cfg(test)]
#[path = "plans_test.rs"]
mod plans_test;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Plan {
    pub id: &'static str,
    pub name: &'static str,
    /// Price in minor currency units (paise).
    pub price_minor: u64,
    pub currency: &'static str,
    pub period: &'static str,
    pub features: &'static [&'static str],
    pub highlighted: bool,
}

impl Plan {
    /// Price formatted for display, e.g. `₹499`.
    #[must_use]
    pub fn display_price(&self) -> String {
        let major = self.price_minor / 100;
        let minor = self.price_minor % 100;
        let symbol = if self.currency == "INR" { "₹" } else { self.currency };
        if minor == 0 { format!("{symbol}{major}") } else { format!("{symbol}{major}.{minor:02}") }
    }
}

pub const PLANS: &[Plan] = &[
    Plan {
        id: "pro-monthly",
        name: "Pro Monthly",
        price_minor: 49_900,
        currency: "INR",
        period: "per month",
        features: &["All learning modules", "Unlimited AI quizzes", "Paper-trading simulator", "Priority support chat"],
        highlighted: false,
    },
    Plan {
        id: "pro-yearly",
        name: "Pro Yearly",
        price_minor: 399_900,
        currency: "INR",
        period: "per year",
        features: &[
            "Everything in Pro Monthly",
            "Two months free",
            "Early access to new modules",
        ],
        highlighted: true,
    },
];

#[must_use]
pub fn find(id: &str) -> Option<&'static Plan> {
    PLANS.iter().find(|p| p.id == id)
}
