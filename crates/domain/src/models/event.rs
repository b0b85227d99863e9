//! Event domain model.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::format::{format_display_date, format_event_time, parse_date_part};

use super::ticket_category::TicketCategory;

/// Audience tier of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "B2C")]
    Consumer,
    #[serde(rename = "B2B")]
    Business,
    #[serde(rename = "B2G")]
    Government,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Consumer => "B2C",
            EventCategory::Business => "B2B",
            EventCategory::Government => "B2G",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Publication status. Only `Active` events appear in public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventStatus {
    #[serde(rename = "Draf")]
    Draft,
    #[serde(rename = "Aktif")]
    Active,
    #[serde(rename = "Selesai")]
    Finished,
}

impl EventStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EventStatus::Draft => "Draf",
            EventStatus::Active => "Aktif",
            EventStatus::Finished => "Selesai",
        }
    }
}

/// Indonesian time zones recognized in schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Timezone {
    Wib,
    Wita,
    Wit,
}

impl Timezone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timezone::Wib => "WIB",
            Timezone::Wita => "WITA",
            Timezone::Wit => "WIT",
        }
    }
}

impl FromStr for Timezone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WIB" => Ok(Timezone::Wib),
            "WITA" => Ok(Timezone::Wita),
            "WIT" => Ok(Timezone::Wit),
            _ => Err(format!("Invalid timezone: {}", s)),
        }
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Contact person shown on the event detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

/// A purchasable, listable occasion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub category: EventCategory,
    pub name: String,
    pub slug: Option<String>,
    pub location: String,
    pub address: String,
    pub summary: Option<String>,
    pub full_description: String,
    pub ticket_categories: Vec<TicketCategory>,
    pub status: EventStatus,
    pub display_price: String,
    /// `YYYY/MM/DD` or `YYYY/MM/DD - YYYY/MM/DD`.
    pub date_display: String,
    pub time_display: String,
    pub timezone: Option<Timezone>,
    pub theme: String,
    pub organizer_name: Option<String>,
    pub terms_and_conditions: Option<String>,
    pub parking_available: Option<bool>,
    pub age_restriction: Option<String>,
    pub arrival_info: Option<String>,
    pub contact: Option<Contact>,
}

impl Event {
    /// Key used in routes and session storage: the slug when present, else the id.
    pub fn route_key(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => self.id.to_string(),
        }
    }

    pub fn is_listed(&self) -> bool {
        self.status == EventStatus::Active
    }

    pub fn is_purchasable(&self) -> bool {
        self.is_listed() && !self.ticket_categories.is_empty()
    }

    pub fn ticket_category(&self, id: &str) -> Option<&TicketCategory> {
        self.ticket_categories.iter().find(|tc| tc.id == id)
    }

    pub fn ticket_category_mut(&mut self, id: &str) -> Option<&mut TicketCategory> {
        self.ticket_categories.iter_mut().find(|tc| tc.id == id)
    }

    /// First and last day of the event, when the date display is parseable.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut parts = self.date_display.split(" - ");
        let start = parse_date_part(parts.next()?)?;
        let end = match parts.next() {
            Some(part) => parse_date_part(part)?,
            None => start,
        };
        Some((start, end))
    }

    pub fn formatted_date(&self) -> String {
        format_display_date(Some(&self.date_display))
    }

    pub fn formatted_time(&self) -> String {
        format_event_time(
            Some(&self.time_display),
            self.timezone.as_ref().map(Timezone::as_str),
        )
    }

    /// Case-insensitive match on name, summary, category tier and location.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term)
            || self
                .summary
                .as_ref()
                .is_some_and(|s| s.to_lowercase().contains(&term))
            || self.category.as_str().to_lowercase().contains(&term)
            || self.location.to_lowercase().contains(&term)
    }
}
