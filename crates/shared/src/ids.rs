//! Identifier generation for drafts, orders and transactions.
//!
//! Nothing here is persisted server-side, so identifiers only need to be
//! unique within a browser session.

use chrono::{DateTime, Utc};
use rand::{distributions::Alphanumeric, Rng};

/// Returns `len` random upper-case alphanumeric characters.
pub fn random_code(len: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(|b| char::from(b).to_ascii_uppercase())
        .collect()
}

/// Returns `len` random decimal digits.
pub fn random_digits(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Identifier for a newly authored coupon, e.g. `KPN-7QX2MA`.
pub fn coupon_id() -> String {
    format!("KPN-{}", random_code(6))
}

/// Identifier for a newly authored ticket category, e.g. `TICKET-P0K9ZD`.
pub fn ticket_id() -> String {
    format!("TICKET-{}", random_code(6))
}

/// Identifier for a newly added crew member.
pub fn crew_id() -> String {
    format!("CREW-{}", random_code(6))
}

/// Transaction reference derived from the payment timestamp.
pub fn transaction_id(at: DateTime<Utc>) -> String {
    format!("TRX-HEGIRA-{}", last_digits(at.timestamp_millis(), 8))
}

/// Order reference derived from the payment timestamp.
pub fn order_id(at: DateTime<Utc>) -> String {
    format!("ORD-{}", last_digits(at.timestamp_millis(), 6))
}

fn last_digits(value: i64, count: usize) -> String {
    let digits = value.unsigned_abs().to_string();
    let start = digits.len().saturating_sub(count);
    digits[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_random_code_shape() {
        let code = random_code(10);
        assert_eq!(code.len(), 10);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_random_digits_shape() {
        let digits = random_digits(6);
        assert_eq!(digits.len(), 6);
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_prefixed_ids() {
        assert!(coupon_id().starts_with("KPN-"));
        assert!(ticket_id().starts_with("TICKET-"));
        assert!(crew_id().starts_with("CREW-"));
        assert_eq!(coupon_id().len(), "KPN-".len() + 6);
    }

    #[test]
    fn test_transaction_and_order_ids_use_timestamp_tail() {
        let at = Utc.timestamp_millis_opt(1_751_234_567_890).unwrap();
        assert_eq!(transaction_id(at), "TRX-HEGIRA-34567890");
        assert_eq!(order_id(at), "ORD-567890");
    }

    #[test]
    fn test_last_digits_shorter_than_count() {
        assert_eq!(last_digits(42, 6), "42");
    }
}
