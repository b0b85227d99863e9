//! Venue check-in of ticket holders.
//!
//! Manual entry and camera scans go through [`AttendeeRoster::check_in`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::models::{AttendanceStatus, Attendee};

/// Result of presenting a ticket id at the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScanOutcome {
    Success { attendee: Attendee },
    AlreadyScanned { attendee: Attendee },
    NotFound { ticket_id: String },
}

/// Trims and upper-cases a typed or scanned ticket id.
pub fn normalize_ticket_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[derive(Debug, Clone, Default)]
pub struct AttendeeRoster {
    attendees: Vec<Attendee>,
}

impl AttendeeRoster {
    pub fn new(attendees: Vec<Attendee>) -> Self {
        Self { attendees }
    }

    pub fn attendees(&self) -> &[Attendee] {
        &self.attendees
    }

    pub fn for_event(&self, event_id: i64) -> Vec<&Attendee> {
        self.attendees
            .iter()
            .filter(|a| a.event_id == event_id)
            .collect()
    }

    pub fn arrived_count(&self, event_id: i64) -> usize {
        self.for_event(event_id)
            .iter()
            .filter(|a| a.has_arrived())
            .count()
    }

    /// Marks the holder of `raw_ticket_id` as present at `at`.
    pub fn check_in(&mut self, raw_ticket_id: &str, at: DateTime<Utc>) -> ScanOutcome {
        let ticket_id = normalize_ticket_id(raw_ticket_id);

        let Some(attendee) = self.attendees.iter_mut().find(|a| a.ticket_id == ticket_id) else {
            warn!(ticket_id = %ticket_id, "Ticket not found");
            return ScanOutcome::NotFound { ticket_id };
        };

        if attendee.has_arrived() {
            info!(ticket_id = %ticket_id, "Ticket already scanned");
            return ScanOutcome::AlreadyScanned {
                attendee: attendee.clone(),
            };
        }

        attendee.status = AttendanceStatus::Arrived;
        attendee.scan_timestamp = Some(at);
        info!(ticket_id = %ticket_id, owner = %attendee.owner_name, "Attendee checked in");
        ScanOutcome::Success {
            attendee: attendee.clone(),
        }
    }
}
