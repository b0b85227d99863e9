//! Checkout pricing, coupon redemption and transaction creation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::format::format_rupiah;
use shared::ids;
use tracing::{debug, info};
use validator::Validate;

use super::coupon_book::CouponBook;
use crate::error::{CouponRejection, DomainError};
use crate::models::{
    AppliedCoupon, Checkout, Coupon, Event, Order, SelectedTicket, Transaction, TransactionForm,
};

/// Quantity requested for one ticket category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSelection {
    pub category_id: String,
    pub quantity: u32,
}

impl TicketSelection {
    pub fn new(category_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            category_id: category_id.into(),
            quantity,
        }
    }
}

/// Builds a checkout for `event` from the requested quantities.
///
/// Zero-quantity lines are dropped. Every remaining line must reference an
/// existing category and fit in its remaining stock.
pub fn build_checkout(event: &Event, selections: &[TicketSelection]) -> Result<Checkout, DomainError> {
    let mut lines = Vec::new();

    for selection in selections.iter().filter(|s| s.quantity > 0) {
        let category = event
            .ticket_category(&selection.category_id)
            .ok_or_else(|| DomainError::NotFound(format!("ticket {}", selection.category_id)))?;

        let remaining = category.remaining();
        if selection.quantity > remaining {
            return Err(DomainError::InsufficientTickets {
                category: category.name.clone(),
                remaining,
            });
        }

        if let Some(line) = lines
            .iter_mut()
            .find(|l: &&mut SelectedTicket| l.category_id == category.id)
        {
            let merged = line.quantity + selection.quantity;
            if merged > remaining {
                return Err(DomainError::InvalidQuantity(category.name.clone()));
            }
            line.quantity = merged;
        } else {
            lines.push(SelectedTicket {
                category_id: category.id.clone(),
                category_name: category.name.clone(),
                quantity: selection.quantity,
                price_per_ticket: category.price,
            });
        }
    }

    if lines.is_empty() {
        return Err(DomainError::EmptySelection);
    }

    let total_price = lines.iter().map(SelectedTicket::line_total).sum();
    debug!(event_id = event.id, lines = lines.len(), total_price, "Checkout built");

    Ok(Checkout {
        event: event.clone(),
        selected_tickets: lines,
        applied_coupon: None,
        total_price,
    })
}

/// Number of successful orders of `event_id` that used `coupon`, limited to
/// `on` when the coupon quota resets daily.
pub fn coupon_usage(coupon: &Coupon, event_id: i64, orders: &[Order], on: NaiveDate) -> u32 {
    let count = orders
        .iter()
        .filter(|o| o.event_id == event_id && o.is_successful() && o.uses_coupon(&coupon.code))
        .filter(|o| !coupon.resets_daily || o.order_date() == on)
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Redeems `code` against `checkout` on `today`.
///
/// Returns a new checkout with the coupon applied; the input is untouched.
/// Only codes in the book of the checkout's own event are redeemable.
pub fn apply_coupon(
    checkout: &Checkout,
    book: &CouponBook,
    orders: &[Order],
    code: &str,
    today: NaiveDate,
) -> Result<Checkout, DomainError> {
    let coupon = book
        .find_code(code)
        .filter(|_| book.event_id() == checkout.event.id)
        .ok_or(CouponRejection::UnknownCode)?;

    coupon.check_window(today)?;

    if let Some(cap) = coupon.quantity {
        if coupon_usage(coupon, checkout.event.id, orders, today) >= cap {
            return Err(CouponRejection::QuotaExhausted.into());
        }
    }

    let applicable_subtotal: i64 = checkout
        .selected_tickets
        .iter()
        .filter(|t| coupon.applies_to(&t.category_id))
        .map(SelectedTicket::line_total)
        .sum();

    if !checkout
        .selected_tickets
        .iter()
        .any(|t| coupon.applies_to(&t.category_id))
    {
        return Err(CouponRejection::NotApplicable.into());
    }

    if let Some(minimum) = coupon.minimum_purchase {
        if applicable_subtotal < minimum {
            return Err(CouponRejection::BelowMinimumPurchase(format_rupiah(minimum)).into());
        }
    }

    let discount = coupon.discount_for(applicable_subtotal);
    let mut applied = checkout.clone();
    applied.total_price = checkout.subtotal() - discount;
    applied.applied_coupon = Some(AppliedCoupon {
        coupon_id: coupon.id.clone(),
        code: coupon.code.clone(),
        name: coupon.name.clone(),
        discount,
    });

    info!(code = %coupon.code, discount, total = applied.total_price, "Coupon applied");
    Ok(applied)
}

/// Drops any applied coupon and restores the undiscounted total.
pub fn remove_coupon(checkout: &Checkout) -> Checkout {
    let mut cleared = checkout.clone();
    cleared.applied_coupon = None;
    cleared.total_price = checkout.subtotal();
    cleared
}

/// Validates the buyer form and wraps the checkout into a transaction.
pub fn create_transaction(
    checkout: &Checkout,
    form: TransactionForm,
    now: DateTime<Utc>,
) -> Result<Transaction, DomainError> {
    form.validate()?;
    if checkout.selected_tickets.is_empty() {
        return Err(DomainError::EmptySelection);
    }

    let transaction = Transaction {
        checkout: checkout.clone(),
        form,
        transaction_id: ids::transaction_id(now),
        order_id: ids::order_id(now),
    };
    info!(
        transaction_id = %transaction.transaction_id,
        order_id = %transaction.order_id,
        total = checkout.total_price,
        "Transaction created"
    );
    Ok(transaction)
}
