//! Order records used by the dashboard reports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Berhasil")]
    Success,
    #[serde(rename = "Menunggu")]
    Pending,
    #[serde(rename = "Gagal")]
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub ticket_name: String,
    pub quantity: u32,
    pub price_per_ticket: i64,
}

impl OrderItem {
    pub fn revenue(&self) -> i64 {
        i64::from(self.quantity) * self.price_per_ticket
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCoupon {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub event_id: i64,
    pub buyer_name: String,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub coupon: Option<OrderCoupon>,
}

impl Order {
    pub fn is_successful(&self) -> bool {
        self.status == OrderStatus::Success
    }

    /// Calendar day of the order in UTC.
    pub fn order_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    pub fn uses_coupon(&self, code: &str) -> bool {
        self.coupon
            .as_ref()
            .is_some_and(|c| c.code.eq_ignore_ascii_case(code))
    }
}
