use serde::{Deserialize, Serialize};

/// Order lifecycle. Forward transitions (Pending → Processing → Shipped →
/// Delivered) are driven by operational tooling outside this service; the
/// only transition exposed here is cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(Self::Pending),
            "Processing" => Some(Self::Processing),
            "Shipped" => Some(Self::Shipped),
            "Delivered" => Some(Self::Delivered),
            "Cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Processing => "Processing",
            Self::Shipped => "Shipped",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Cancellation is only allowed before the order ships. Delivered and
    /// Cancelled are terminal.
    pub fn can_cancel(self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    COD,
    Card,
    UPI,
}

impl PaymentMethod {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "COD" => Some(Self::COD),
            "Card" => Some(Self::Card),
            "UPI" => Some(Self::UPI),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_and_processing_can_cancel() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Processing.can_cancel());
        assert!(!OrderStatus::Shipped.can_cancel());
        assert!(!OrderStatus::Delivered.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());
    }

    #[test]
    fn status_strings_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(OrderStatus::parse("Refunded"), None);
    }

    #[test]
    fn payment_methods_parse_exactly() {
        assert_eq!(PaymentMethod::parse("COD"), Some(PaymentMethod::COD));
        assert_eq!(PaymentMethod::parse("Card"), Some(PaymentMethod::Card));
        assert_eq!(PaymentMethod::parse("UPI"), Some(PaymentMethod::UPI));
        assert_eq!(PaymentMethod::parse("cod"), None);
        assert_eq!(PaymentMethod::parse("Cheque"), None);
    }
}
