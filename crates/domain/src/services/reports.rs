//! Dashboard sales and coupon usage reports.

use chrono::NaiveDate;
use serde::Serialize;
use shared::csv::{report_filename, CsvDocument, Field};

use crate::models::Order;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSalesRow {
    pub ticket_name: String,
    pub sold: u32,
    pub revenue: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketSalesReport {
    pub rows: Vec<TicketSalesRow>,
    pub total_revenue: i64,
}

/// Successful orders of `event_id` aggregated by ticket name, highest revenue first.
pub fn ticket_sales_report(orders: &[Order], event_id: i64, search: Option<&str>) -> TicketSalesReport {
    let mut rows: Vec<TicketSalesRow> = Vec::new();

    for order in orders
        .iter()
        .filter(|o| o.event_id == event_id && o.is_successful())
    {
        for item in &order.items {
            match rows.iter_mut().find(|r| r.ticket_name == item.ticket_name) {
                Some(row) => {
                    row.sold += item.quantity;
                    row.revenue += item.revenue();
                }
                None => rows.push(TicketSalesRow {
                    ticket_name: item.ticket_name.clone(),
                    sold: item.quantity,
                    revenue: item.revenue(),
                }),
            }
        }
    }

    if let Some(term) = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) {
        rows.retain(|r| r.ticket_name.to_lowercase().contains(&term));
    }
    rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));

    let total_revenue = rows.iter().map(|r| r.revenue).sum();
    TicketSalesReport {
        rows,
        total_revenue,
    }
}

impl TicketSalesReport {
    pub fn to_csv(&self) -> String {
        let mut doc = CsvDocument::with_header(&["Nama Tiket", "Tiket Terjual", "Pendapatan"]);
        for row in &self.rows {
            doc.push_row(&[
                Field::Text(row.ticket_name.clone()),
                Field::Number(i64::from(row.sold)),
                Field::Number(row.revenue),
            ]);
        }
        doc.push_blank();
        doc.push_raw(format!("Total Pendapatan,,{}", self.total_revenue));
        doc.render()
    }

    pub fn filename(event_name: &str) -> String {
        report_filename("laporan_tiket", event_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponUsageRow {
    pub coupon_name: String,
    pub date: NaiveDate,
    pub count: u32,
}

/// Inclusive date window for the coupon report. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateWindow {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |s| date >= s) && self.end.map_or(true, |e| date <= e)
    }
}

/// Successful coupon orders of `event_id` counted per coupon name and day, latest day first.
pub fn coupon_usage_report(
    orders: &[Order],
    event_id: i64,
    window: DateWindow,
    search: Option<&str>,
) -> Vec<CouponUsageRow> {
    let mut rows: Vec<CouponUsageRow> = Vec::new();

    for order in orders
        .iter()
        .filter(|o| o.event_id == event_id && o.is_successful())
        .filter(|o| window.contains(o.order_date()))
    {
        let Some(coupon) = &order.coupon else {
            continue;
        };
        let date = order.order_date();
        match rows
            .iter_mut()
            .find(|r| r.coupon_name == coupon.name && r.date == date)
        {
            Some(row) => row.count += 1,
            None => rows.push(CouponUsageRow {
                coupon_name: coupon.name.clone(),
                date,
                count: 1,
            }),
        }
    }

    if let Some(term) = search.map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) {
        rows.retain(|r| r.coupon_name.to_lowercase().contains(&term));
    }
    rows.sort_by(|a, b| b.date.cmp(&a.date));
    rows
}

pub fn coupon_usage_csv(rows: &[CouponUsageRow]) -> String {
    let mut doc =
        CsvDocument::with_header(&["Nama Kupon", "Tanggal Terpakai", "Jumlah Kupon Terpakai"]);
    for row in rows {
        doc.push_row(&[
            Field::Text(row.coupon_name.clone()),
            Field::Raw(row.date.format("%Y-%m-%d").to_string()),
            Field::Number(i64::from(row.count)),
        ]);
    }
    doc.render()
}

pub fn coupon_usage_filename(event_name: &str) -> String {
    report_filename("laporan_kupon", event_name)
}
