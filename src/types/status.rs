use std::{convert::Infallible, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// Lifecycle status of a payment as reported by the gateway.
///
/// Statuses this crate does not know about are kept verbatim in
/// [`PaymentStatus::Other`], so parsing never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    New,
    Canceled,
    Preauthorizing,
    FormShowed,
    Authorizing,
    ThreeDsChecking,
    ThreeDsChecked,
    Authorized,
    Reversing,
    Reversed,
    Confirming,
    Confirmed,
    Refunding,
    Refunded,
    PartialRefunded,
    Rejected,
    #[default]
    Unknown,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::New => "NEW",
            PaymentStatus::Canceled => "CANCELED",
            PaymentStatus::Preauthorizing => "PREAUTHORIZING",
            PaymentStatus::FormShowed => "FORMSHOWED",
            PaymentStatus::Authorizing => "AUTHORIZING",
            PaymentStatus::ThreeDsChecking => "3DS_CHECKING",
            PaymentStatus::ThreeDsChecked => "3DS_CHECKED",
            PaymentStatus::Authorized => "AUTHORIZED",
            PaymentStatus::Reversing => "REVERSING",
            PaymentStatus::Reversed => "REVERSED",
            PaymentStatus::Confirming => "CONFIRMING",
            PaymentStatus::Confirmed => "CONFIRMED",
            PaymentStatus::Refunding => "REFUNDING",
            PaymentStatus::Refunded => "REFUNDED",
            PaymentStatus::PartialRefunded => "PARTIAL_REFUNDED",
            PaymentStatus::Rejected => "REJECTED",
            PaymentStatus::Unknown => "UNKNOWN",
            PaymentStatus::Other(s) => s,
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "NEW" => PaymentStatus::New,
            "CANCELED" => PaymentStatus::Canceled,
            "PREAUTHORIZING" => PaymentStatus::Preauthorizing,
            "FORMSHOWED" => PaymentStatus::FormShowed,
            "AUTHORIZING" => PaymentStatus::Authorizing,
            "3DS_CHECKING" => PaymentStatus::ThreeDsChecking,
            "3DS_CHECKED" => PaymentStatus::ThreeDsChecked,
            "AUTHORIZED" => PaymentStatus::Authorized,
            "REVERSING" => PaymentStatus::Reversing,
            "REVERSED" => PaymentStatus::Reversed,
            "CONFIRMING" => PaymentStatus::Confirming,
            "CONFIRMED" => PaymentStatus::Confirmed,
            "REFUNDING" => PaymentStatus::Refunding,
            "REFUNDED" => PaymentStatus::Refunded,
            "PARTIAL_REFUNDED" => PaymentStatus::PartialRefunded,
            "REJECTED" => PaymentStatus::Rejected,
            "UNKNOWN" | "" => PaymentStatus::Unknown,
            other => PaymentStatus::Other(other.to_string()),
        })
    }
}

impl Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_statuses() {
        for status in [
            PaymentStatus::New,
            PaymentStatus::ThreeDsChecking,
            PaymentStatus::PartialRefunded,
            PaymentStatus::Confirmed,
        ] {
            assert_eq!(status.as_str().parse::<PaymentStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_parse_unknown_status() {
        let status: PaymentStatus = "DEADLINE_EXPIRED".parse().unwrap();
        assert_eq!(status, PaymentStatus::Other("DEADLINE_EXPIRED".to_string()));
        assert_eq!(status.to_string(), "DEADLINE_EXPIRED");
        assert_eq!("".parse::<PaymentStatus>(), Ok(PaymentStatus::Unknown));
    }

    #[test]
    fn test_serde() {
        let status: PaymentStatus = serde_json::from_str("\"3DS_CHECKED\"").unwrap();
        assert_eq!(status, PaymentStatus::ThreeDsChecked);
        assert_eq!(serde_json::to_string(&status).unwrap(), "\"3DS_CHECKED\"");
    }
}
