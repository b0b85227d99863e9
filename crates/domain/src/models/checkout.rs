//! Checkout and transaction models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::validation::{field_error, is_blank};
use validator::{Validate, ValidationError};

use super::event::Event;

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedTicket {
    pub category_id: String,
    pub category_name: String,
    pub quantity: u32,
    pub price_per_ticket: i64,
}

impl SelectedTicket {
    pub fn line_total(&self) -> i64 {
        i64::from(self.quantity) * self.price_per_ticket
    }
}

/// Coupon redeemed against a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    pub coupon_id: String,
    pub code: String,
    pub name: String,
    pub discount: i64,
}

/// Cart-like aggregate of selected tickets for one event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub event: Event,
    pub selected_tickets: Vec<SelectedTicket>,
    #[serde(default)]
    pub applied_coupon: Option<AppliedCoupon>,
    /// Subtotal minus any coupon discount.
    pub total_price: i64,
}

impl Checkout {
    pub fn subtotal(&self) -> i64 {
        self.selected_tickets.iter().map(SelectedTicket::line_total).sum()
    }

    pub fn discount(&self) -> i64 {
        self.applied_coupon.as_ref().map_or(0, |c| c.discount)
    }

    pub fn ticket_count(&self) -> u32 {
        self.selected_tickets.iter().map(|t| t.quantity).sum()
    }
}

fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error("required", "Nama lengkap tidak boleh kosong."));
    }
    Ok(())
}

/// Additional attendee captured on the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TicketHolder {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    #[validate(custom(function = "shared::validation::validate_phone_number"))]
    pub whats_app_number: String,
}

/// Buyer data submitted with the payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransactionForm {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    #[validate(email(message = "Format email tidak valid."))]
    pub email: String,

    #[validate(custom(function = "shared::validation::validate_phone_number"))]
    pub phone_number: String,

    pub gender: Option<String>,
    pub date_of_birth: Option<NaiveDate>,

    #[serde(default)]
    #[validate(nested)]
    pub additional_ticket_holders: Vec<TicketHolder>,
}

/// Fields prefilled on the checkout form for a logged-in buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerPrefill {
    pub full_name: String,
    pub email: String,
}

/// Result of a processed payment. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub checkout: Checkout,
    pub form: TransactionForm,
    pub transaction_id: String,
    pub order_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::Name;
    use fake::Fake;

    fn form() -> TransactionForm {
        TransactionForm {
            full_name: Name().fake(),
            email: SafeEmail().fake(),
            phone_number: "081234567890".into(),
            gender: None,
            date_of_birth: None,
            additional_ticket_holders: vec![],
        }
    }

    #[test]
    fn test_line_total() {
        let line = SelectedTicket {
            category_id: "vip".into(),
            category_name: "VIP".into(),
            quantity: 3,
            price_per_ticket: 150_000,
        };
        assert_eq!(line.line_total(), 450_000);
    }

    #[test]
    fn test_valid_form() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_form_rejects_blank_name_and_bad_email() {
        let mut f = form();
        f.full_name = "  ".into();
        f.email = "bukan-email".into();
        let errors = f.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("full_name"));
        assert!(fields.contains_key("email"));
    }

    #[test]
    fn test_form_rejects_short_phone() {
        let mut f = form();
        f.phone_number = "0812".into();
        assert!(f.validate().is_err());
    }

    #[test]
    fn test_form_validates_additional_holders() {
        let mut f = form();
        f.additional_ticket_holders.push(TicketHolder {
            full_name: "Sari".into(),
            whats_app_number: "12".into(),
        });
        assert!(f.validate().is_err());

        f.additional_ticket_holders[0].whats_app_number = "081298765432".into();
        assert!(f.validate().is_ok());
    }
}
