//! Ticket holders checked in at the venue.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "Belum Hadir")]
    NotArrived,
    #[serde(rename = "Sudah Hadir")]
    Arrived,
}

impl AttendanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceStatus::NotArrived => "Belum Hadir",
            AttendanceStatus::Arrived => "Sudah Hadir",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    /// Upper-case ticket code printed on the QR.
    pub ticket_id: String,
    pub owner_name: String,
    pub ticket_category_name: String,
    pub event_id: i64,
    pub event_name: String,
    pub status: AttendanceStatus,
    pub scan_timestamp: Option<DateTime<Utc>>,
}

impl Attendee {
    pub fn has_arrived(&self) -> bool {
        self.status == AttendanceStatus::Arrived
    }
}
