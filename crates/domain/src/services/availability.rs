//! Ticket availability calculator.
//!
//! Availability is a pure function of `max_quantity` and `tickets_purchased`
//! and is never stored: callers recompute it on every read.

use serde::{Deserialize, Serialize};

/// Availability bucket of a ticket category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityStatus {
    Available,
    AlmostSold,
    SoldOut,
}

impl AvailabilityStatus {
    /// Badge text on the dashboard ticket card.
    pub fn label(&self) -> &'static str {
        match self {
            AvailabilityStatus::Available => "Tersedia",
            AvailabilityStatus::AlmostSold => "Hampir Habis",
            AvailabilityStatus::SoldOut => "Habis",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub status: AvailabilityStatus,
    pub remaining: u32,
}

/// Classifies a ticket category.
///
/// Sold out when nothing remains, almost sold when at most 10% of
/// `max_quantity` remains, available otherwise.
pub fn availability(max_quantity: u32, tickets_purchased: u32) -> Availability {
    let remaining = max_quantity.saturating_sub(tickets_purchased);
    // remaining <= 10% of max, in integers
    let status = if remaining == 0 {
        AvailabilityStatus::SoldOut
    } else if u64::from(remaining) * 10 <= u64::from(max_quantity) {
        AvailabilityStatus::AlmostSold
    } else {
        AvailabilityStatus::Available
    };
    Availability { status, remaining }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sold_out() {
        assert_eq!(
            availability(100, 100),
            Availability {
                status: AvailabilityStatus::SoldOut,
                remaining: 0
            }
        );
        assert_eq!(availability(150, 150).status, AvailabilityStatus::SoldOut);
    }

    #[test]
    fn test_almost_sold_boundary() {
        assert_eq!(availability(50, 45).status, AvailabilityStatus::AlmostSold);
        assert_eq!(availability(50, 44).status, AvailabilityStatus::Available);
        assert_eq!(availability(50, 48).remaining, 2);
    }

    #[test]
    fn test_small_quantities() {
        // 1 of 10 remaining is exactly 10%
        assert_eq!(availability(10, 9).status, AvailabilityStatus::AlmostSold);
        // 1 of 5 is 20%
        assert_eq!(availability(5, 4).status, AvailabilityStatus::Available);
        assert_eq!(availability(1, 0).status, AvailabilityStatus::Available);
    }

    #[test]
    fn test_oversold_counts_as_sold_out() {
        assert_eq!(availability(10, 12).status, AvailabilityStatus::SoldOut);
        assert_eq!(availability(10, 12).remaining, 0);
    }

    #[test]
    fn test_zero_capacity_is_sold_out() {
        assert_eq!(availability(0, 0).status, AvailabilityStatus::SoldOut);
    }

    #[test]
    fn test_status_matches_threshold_rule_for_all_small_inputs() {
        for max in 1..=300u32 {
            for purchased in 0..=max {
                let status = availability(max, purchased).status;
                let remaining = f64::from(max - purchased);
                let expected = if purchased == max {
                    AvailabilityStatus::SoldOut
                } else if remaining <= 0.1 * f64::from(max) {
                    AvailabilityStatus::AlmostSold
                } else {
                    AvailabilityStatus::Available
                };
                assert_eq!(status, expected, "max={} purchased={}", max, purchased);
            }
        }
    }

    #[test]
    fn test_labels_and_serialization() {
        assert_eq!(AvailabilityStatus::AlmostSold.label(), "Hampir Habis");
        assert_eq!(
            serde_json::to_string(&AvailabilityStatus::SoldOut).unwrap(),
            "\"sold-out\""
        );
    }
}
