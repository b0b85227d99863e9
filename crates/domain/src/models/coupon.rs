//! Coupon domain model and authoring-time validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::format::format_rupiah;
use shared::validation::{field_error, has_inner_whitespace, is_blank};
use validator::{Validate, ValidationErrors};

use super::ticket_category::TicketCategory;
use crate::error::CouponRejection;

/// Label used when a coupon is not restricted to specific tickets.
pub const ALL_TICKETS: &str = "Semua Tiket";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// A discount code scoped to one event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: String,
    pub name: String,
    /// Upper-case, no whitespace.
    pub code: String,
    pub discount_type: DiscountType,
    /// Percent for `Percentage`, whole rupiah for `Fixed`.
    pub discount_value: i64,
    /// Usage cap. `None` is unlimited.
    pub quantity: Option<u32>,
    #[serde(default)]
    pub resets_daily: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub minimum_purchase: Option<i64>,
    /// Empty applies to every ticket category of the event.
    #[serde(default)]
    pub applicable_ticket_ids: Vec<String>,
}

impl Coupon {
    pub fn applies_to(&self, ticket_id: &str) -> bool {
        self.applicable_ticket_ids.is_empty()
            || self.applicable_ticket_ids.iter().any(|id| id == ticket_id)
    }

    /// Checks the validity window against `date`.
    pub fn check_window(&self, date: NaiveDate) -> Result<(), CouponRejection> {
        if self.start_date.is_some_and(|start| date < start) {
            return Err(CouponRejection::NotYetValid);
        }
        if self.end_date.is_some_and(|end| date > end) {
            return Err(CouponRejection::Expired);
        }
        Ok(())
    }

    /// Discount for an applicable subtotal, never more than the subtotal.
    pub fn discount_for(&self, applicable_subtotal: i64) -> i64 {
        let discount = match self.discount_type {
            DiscountType::Percentage => {
                (applicable_subtotal * self.discount_value + 50).div_euclid(100)
            }
            DiscountType::Fixed => self.discount_value,
        };
        discount.clamp(0, applicable_subtotal.max(0))
    }

    /// `10%` or `Rp 25.000`.
    pub fn discount_label(&self) -> String {
        match self.discount_type {
            DiscountType::Percentage => format!("{}%", self.discount_value),
            DiscountType::Fixed => format_rupiah(self.discount_value),
        }
    }

    /// Names of the tickets this coupon applies to, resolved against `tickets`.
    pub fn applicable_label(&self, tickets: &[TicketCategory]) -> String {
        if self.applicable_ticket_ids.is_empty() {
            return ALL_TICKETS.to_string();
        }
        self.applicable_ticket_ids
            .iter()
            .map(|id| {
                tickets
                    .iter()
                    .find(|t| &t.id == id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|| format!("ID: {}", id))
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Form input for creating or editing a coupon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponDraft {
    /// Set when editing an existing coupon.
    pub id: Option<String>,
    pub name: String,
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: i64,
    pub quantity: Option<i64>,
    #[serde(default)]
    pub resets_daily: bool,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub minimum_purchase: Option<i64>,
    #[serde(default)]
    pub applicable_ticket_ids: Vec<String>,
}

impl Validate for CouponDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.name) {
            errors.add(
                "name",
                field_error("required", "Nama kupon tidak boleh kosong."),
            );
        }

        if is_blank(&self.code) {
            errors.add(
                "code",
                field_error("required", "Kode kupon tidak boleh kosong."),
            );
        } else if has_inner_whitespace(&self.code) {
            errors.add(
                "code",
                field_error("whitespace", "Kode kupon tidak boleh mengandung spasi."),
            );
        }

        if self.discount_value <= 0 {
            errors.add(
                "discountValue",
                field_error("positive", "Nilai diskon harus lebih dari 0."),
            );
        } else if self.discount_type == DiscountType::Percentage && self.discount_value > 100 {
            errors.add(
                "discountValue",
                field_error("percentage", "Diskon persentase tidak boleh lebih dari 100%."),
            );
        }

        if self.quantity.is_some_and(|q| q < 0) {
            errors.add(
                "quantity",
                field_error("non_negative", "Jumlah kupon tidak boleh negatif."),
            );
        }

        if self.minimum_purchase.is_some_and(|m| m < 0) {
            errors.add(
                "minimumPurchase",
                field_error("non_negative", "Minimum pembelian tidak boleh negatif."),
            );
        }

        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.add(
                    "endDate",
                    field_error(
                        "date_order",
                        "Tanggal akhir tidak boleh sebelum tanggal mulai.",
                    ),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl CouponDraft {
    /// Builds the stored coupon. Call only after `validate` succeeds.
    pub fn into_coupon(self, id: String) -> Coupon {
        Coupon {
            id,
            name: self.name.trim().to_string(),
            code: self.code.trim().to_uppercase(),
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            quantity: self.quantity.and_then(|q| u32::try_from(q).ok()),
            resets_daily: self.resets_daily,
            start_date: self.start_date,
            end_date: self.end_date,
            minimum_purchase: self.minimum_purchase.filter(|m| *m > 0),
            applicable_ticket_ids: self.applicable_ticket_ids,
        }
    }
}

impl From<&Coupon> for CouponDraft {
    fn from(coupon: &Coupon) -> Self {
        Self {
            id: Some(coupon.id.clone()),
            name: coupon.name.clone(),
            code: coupon.code.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            quantity: coupon.quantity.map(i64::from),
            resets_daily: coupon.resets_daily,
            start_date: coupon.start_date,
            end_date: coupon.end_date,
            minimum_purchase: coupon.minimum_purchase,
            applicable_ticket_ids: coupon.applicable_ticket_ids.clone(),
        }
    }
}
