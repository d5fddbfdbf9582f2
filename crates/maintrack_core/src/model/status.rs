//! Payment status enumeration and its fixed toggle cycle.
//!
//! # Invariants
//! - Persisted form is exactly `""`, `"PAID"` or `"UNPAID"`.
//! - Decoding never fails: any other stored value reads back as `Unset`.
//! - `next()` is a 3-cycle: `Unset -> Paid -> Unpaid -> Unset`.

use serde::{Deserialize, Deserializer, Serialize};

/// Payment state of one billable field of an apartment record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum PaymentStatus {
    /// Nothing recorded yet. Persisted as an empty string.
    #[default]
    #[serde(rename = "")]
    Unset,
    #[serde(rename = "PAID")]
    Paid,
    #[serde(rename = "UNPAID")]
    Unpaid,
}

impl PaymentStatus {
    /// Returns the status that follows `self` in the toggle cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Unset => Self::Paid,
            Self::Paid => Self::Unpaid,
            Self::Unpaid => Self::Unset,
        }
    }

    /// Stable persisted string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::Paid => "PAID",
            Self::Unpaid => "UNPAID",
        }
    }

    /// Parses the persisted string form. Anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "" => Some(Self::Unset),
            "PAID" => Some(Self::Paid),
            "UNPAID" => Some(Self::Unpaid),
            _ => None,
        }
    }

    /// Short label for status buttons; `Unset` shows as `N/A`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Unset => "N/A",
            other => other.as_str(),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(value.as_str().and_then(Self::parse).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::PaymentStatus;
    use proptest::prelude::*;

    #[test]
    fn next_follows_fixed_cycle() {
        assert_eq!(PaymentStatus::Unset.next(), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::Paid.next(), PaymentStatus::Unpaid);
        assert_eq!(PaymentStatus::Unpaid.next(), PaymentStatus::Unset);
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert_eq!(PaymentStatus::parse("PAID"), Some(PaymentStatus::Paid));
        assert_eq!(PaymentStatus::parse(""), Some(PaymentStatus::Unset));
        assert_eq!(PaymentStatus::parse("paid"), None);
        assert_eq!(PaymentStatus::parse("LATE"), None);
    }

    #[test]
    fn serde_uses_persisted_strings() {
        let encoded = serde_json::to_string(&[
            PaymentStatus::Unset,
            PaymentStatus::Paid,
            PaymentStatus::Unpaid,
        ])
        .expect("statuses should serialize");
        assert_eq!(encoded, r#"["","PAID","UNPAID"]"#);

        let decoded: Vec<PaymentStatus> =
            serde_json::from_str(r#"["UNPAID","PAID",""]"#).expect("statuses should decode");
        assert_eq!(
            decoded,
            [PaymentStatus::Unpaid, PaymentStatus::Paid, PaymentStatus::Unset]
        );
    }

    #[test]
    fn unknown_stored_values_decode_as_unset() {
        let decoded: Vec<PaymentStatus> = serde_json::from_str(r#"["LATE","paid",null,3,{}]"#)
            .expect("unknown statuses should still decode");
        assert!(decoded.iter().all(|status| *status == PaymentStatus::Unset));
        assert_eq!(decoded.len(), 5);
    }

    #[test]
    fn label_renders_unset_as_not_available() {
        assert_eq!(PaymentStatus::Unset.label(), "N/A");
        assert_eq!(PaymentStatus::Unpaid.label(), "UNPAID");
    }

    fn any_status() -> impl Strategy<Value = PaymentStatus> {
        prop_oneof![
            Just(PaymentStatus::Unset),
            Just(PaymentStatus::Paid),
            Just(PaymentStatus::Unpaid),
        ]
    }

    proptest! {
        #[test]
        fn three_toggles_return_to_start(status in any_status()) {
            prop_assert_eq!(status.next().next().next(), status);
            prop_assert_ne!(status.next(), status);
        }

        #[test]
        fn as_str_and_parse_agree(status in any_status()) {
            prop_assert_eq!(PaymentStatus::parse(status.as_str()), Some(status));
        }
    }
}
