//! Legal and contact pages shown from the policies list.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    Cancellation,
    Terms,
    Shipping,
    Privacy,
    Contact,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::Cancellation,
        PolicyKind::Terms,
        PolicyKind::Shipping,
        PolicyKind::Privacy,
        PolicyKind::Contact,
    ];

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            PolicyKind::Cancellation => "Cancellation & Refunds",
            PolicyKind::Terms => "Terms & Conditions",
            PolicyKind::Shipping => "Shipping & Delivery",
            PolicyKind::Privacy => "Privacy Policy",
            PolicyKind::Contact => "Contact Us",
        }
    }

    /// Hash path of the page.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            PolicyKind::Cancellation => "/policies/cancellation",
            PolicyKind::Terms => "/policies/terms",
            PolicyKind::Shipping => "/policies/shipping",
            PolicyKind::Privacy => "/policies/privacy",
            PolicyKind::Contact => "/policies/contact",
        }
    }

    /// Page body as markdown.
    #[must_use]
    pub fn body(self) -> &'static str {
        match self {
            PolicyKind::Cancellation => CANCELLATION,
            PolicyKind::Terms => TERMS,
            PolicyKind::Shipping => SHIPPING,
            PolicyKind::Privacy => PRIVACY,
            PolicyKind::Contact => CONTACT,
        }
    }
}

const CANCELLATION: &str = "\
You may cancel a subscription at any time from your profile. Access continues \
until the end of the paid period.

## Refunds

Refund requests made within **7 days** of the first purchase are honoured in \
full. Renewals are not refunded. Approved refunds reach the original payment \
method within 5-7 working days.
";

const TERMS: &str = "\
By using Candle Academy you agree to these terms.

- Content is for education only and is **not investment advice**.
- Simulated trades use generated prices and carry no real money.
- Accounts are personal; sharing credentials may lead to suspension.
- We may update course material and these terms; continued use means acceptance.
";

const SHIPPING: &str = "\
Candle Academy sells digital subscriptions only. Nothing is shipped. Access \
is granted to your account immediately after payment is verified.
";

const PRIVACY: &str = "\
We store your email, display name, avatar and quiz results to run the \
service. Payment details are handled by our payment partner and never reach \
our servers. Support conversations are kept to help resolve your requests.

You can ask for your data to be deleted through the support chat.
";

const CONTACT: &str = "\
- Email: support@candleacademy.in
- Support chat: the chat button in the bottom corner of any page
- Hours: Monday to Friday, 10:00 to 18:00 IST
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{Location, ViewId, parse};

    #[test]
    fn every_policy_path_routes_to_its_view() {
        let expected = [
            ViewId::Cancellation,
            ViewId::Terms,
            ViewId::Shipping,
            ViewId::Privacy,
            ViewId::Contact,
        ];
        for (kind, view) in PolicyKind::ALL.into_iter().zip(expected) {
            assert_eq!(parse(&Location::new(kind.path())).view, view, "{kind:?}");
            assert!(!kind.body().trim().is_empty());
        }
    }
}
