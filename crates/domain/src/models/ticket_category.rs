//! Ticket category domain model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::format::{format_display_date, format_event_time};

use super::event::Timezone;
use crate::services::availability::{availability, Availability};

/// Label shown when a category inherits the event's schedule.
pub const FOLLOWS_EVENT_SCHEDULE: &str = "Mengikuti Jadwal Event";

/// When a ticket category can be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum TicketSchedule {
    #[default]
    FollowEvent,
    #[serde(rename_all = "camelCase")]
    Custom {
        start_date: NaiveDate,
        end_date: Option<NaiveDate>,
        start_time: String,
        /// Present only when the ticket is valid for a time range.
        end_time: Option<String>,
        timezone: Timezone,
    },
}

impl TicketSchedule {
    pub fn follows_event(&self) -> bool {
        matches!(self, TicketSchedule::FollowEvent)
    }

    /// Human-readable schedule, e.g. `1 - 19 Juli 2025, 08:00 - 18:00 WIB`.
    pub fn display(&self) -> String {
        match self {
            TicketSchedule::FollowEvent => FOLLOWS_EVENT_SCHEDULE.to_string(),
            TicketSchedule::Custom {
                start_date,
                end_date,
                start_time,
                end_time,
                timezone,
            } => {
                let dates = match end_date {
                    Some(end) if end != start_date => format!("{} - {}", start_date, end),
                    _ => start_date.to_string(),
                };
                let times = match end_time {
                    Some(end) => format!("{} - {}", start_time, end),
                    None => start_time.clone(),
                };
                format!(
                    "{}, {}",
                    format_display_date(Some(&dates)),
                    format_event_time(Some(&times), Some(timezone.as_str()))
                )
            }
        }
    }
}

/// A priced, quantity-limited class of admission within an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCategory {
    pub id: String,
    pub name: String,
    /// Whole rupiah.
    pub price: i64,
    pub max_quantity: u32,
    pub tickets_purchased: u32,
    pub description: Option<String>,
    #[serde(default)]
    pub schedule: TicketSchedule,
}

impl TicketCategory {
    /// Computed on every call from the current counters.
    pub fn availability(&self) -> Availability {
        availability(self.max_quantity, self.tickets_purchased)
    }

    pub fn remaining(&self) -> u32 {
        self.availability().remaining
    }

    pub fn schedule_display(&self) -> String {
        self.schedule.display()
    }
}
