//! Coupons and the discount text shown to the customer.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CouponCode;

/// How long a coupon's discount applies once redeemed.
///
/// Values Stripe may add later are kept verbatim in `Other` so the coupon
/// still parses and its description shows what Stripe sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CouponDuration {
    /// Applies to the first invoice only.
    Once,
    /// Applies for `duration_in_months`.
    Repeating,
    /// Applies to every invoice.
    Forever,
    Other(String),
}

impl CouponDuration {
    pub fn as_str(&self) -> &str {
        match self {
            CouponDuration::Once => "once",
            CouponDuration::Repeating => "repeating",
            CouponDuration::Forever => "forever",
            CouponDuration::Other(raw) => raw,
        }
    }
}

impl From<String> for CouponDuration {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "once" => CouponDuration::Once,
            "repeating" => CouponDuration::Repeating,
            "forever" => CouponDuration::Forever,
            _ => CouponDuration::Other(raw),
        }
    }
}

impl From<CouponDuration> for String {
    fn from(duration: CouponDuration) -> Self {
        match duration {
            CouponDuration::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for CouponDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coupon as reported by the payment processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub id: CouponCode,

    /// False once expired or fully redeemed.
    pub valid: bool,

    pub percent_off: Option<f64>,

    /// Fixed discount in minor currency units.
    pub amount_off: Option<i64>,

    pub currency: Option<String>,

    pub duration: CouponDuration,

    pub duration_in_months: Option<i64>,
}

impl Coupon {
    /// The discount this coupon grants, percent taking precedence.
    pub fn discount(&self) -> Option<Discount> {
        match (self.percent_off, self.amount_off) {
            (Some(percent), _) => Some(Discount::PercentOff(percent)),
            (None, Some(amount)) => Some(Discount::AmountOff(amount)),
            (None, None) => None,
        }
    }

    /// Customer-facing summary, e.g. `20% OFF repeating` or `$5 OFF once`.
    ///
    /// Returns `None` for coupons that can no longer be redeemed or that carry
    /// no discount at all.
    pub fn describe(&self) -> Option<String> {
        if !self.valid {
            return None;
        }
        self.discount()
            .map(|discount| format!("{} OFF {}", discount, self.duration))
    }
}

/// A coupon's discount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Discount {
    PercentOff(f64),
    /// Minor currency units.
    AmountOff(i64),
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // f64 Display drops a trailing ".0"
            Discount::PercentOff(percent) => write!(f, "{}%", percent),
            // whole dollars only
            Discount::AmountOff(amount) => write!(f, "${}", amount / 100),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coupon(percent_off: Option<f64>, amount_off: Option<i64>, duration: CouponDuration) -> Coupon {
        Coupon {
            id: CouponCode::new("SPRING"),
            valid: true,
            percent_off,
            amount_off,
            currency: amount_off.map(|_| "usd".to_string()),
            duration,
            duration_in_months: None,
        }
    }

    #[test]
    fn percent_coupon_description() {
        let c = coupon(Some(20.0), None, CouponDuration::Repeating);
        assert_eq!(c.describe().as_deref(), Some("20% OFF repeating"));
    }

    #[test]
    fn fractional_percent_is_kept() {
        let c = coupon(Some(12.5), None, CouponDuration::Forever);
        assert_eq!(c.describe().as_deref(), Some("12.5% OFF forever"));
    }

    #[test]
    fn amount_coupon_description() {
        let c = coupon(None, Some(500), CouponDuration::Once);
        assert_eq!(c.describe().as_deref(), Some("$5 OFF once"));
    }

    #[test]
    fn amount_truncates_cents() {
        let c = coupon(None, Some(999), CouponDuration::Once);
        assert_eq!(c.describe().as_deref(), Some("$9 OFF once"));
    }

    #[test]
    fn percent_wins_over_amount() {
        let c = coupon(Some(10.0), Some(500), CouponDuration::Once);
        assert_eq!(c.discount(), Some(Discount::PercentOff(10.0)));
    }

    #[test]
    fn invalid_coupon_has_no_description() {
        let mut c = coupon(Some(20.0), None, CouponDuration::Once);
        c.valid = false;
        assert!(c.describe().is_none());
    }

    #[test]
    fn coupon_without_discount_has_no_description() {
        let c = coupon(None, None, CouponDuration::Once);
        assert!(c.describe().is_none());
    }

    #[test]
    fn deserializes_stripe_duration() {
        let d: CouponDuration = serde_json::from_str(r#""repeating""#).unwrap();
        assert_eq!(d, CouponDuration::Repeating);
    }

    #[test]
    fn unknown_duration_is_kept_verbatim() {
        let d: CouponDuration = serde_json::from_str(r#""per_seat""#).unwrap();
        assert_eq!(d, CouponDuration::Other("per_seat".to_string()));
        assert_eq!(serde_json::to_string(&d).unwrap(), r#""per_seat""#);

        let c = coupon(Some(15.0), None, d);
        assert_eq!(c.describe().as_deref(), Some("15% OFF per_seat"));
    }

    proptest! {
        #[test]
        fn whole_percentages_render_without_decimals(p in 1u32..=100) {
            let c = coupon(Some(p as f64), None, CouponDuration::Once);
            prop_assert_eq!(c.describe().unwrap(), format!("{}% OFF once", p));
        }

        #[test]
        fn amounts_render_in_whole_dollars(cents in 0i64..10_000_000) {
            let c = coupon(None, Some(cents), CouponDuration::Forever);
            prop_assert_eq!(c.describe().unwrap(), format!("${} OFF forever", cents / 100));
        }
    }
}
