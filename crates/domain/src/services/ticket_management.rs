//! Ticket category authoring for the creator dashboard.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::ids;
use shared::pagination::{paginate, PageSlice};
use shared::validation::{field_error, is_blank, parse_time_of_day, validate_time_of_day};
use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::error::DomainError;
use crate::models::{Event, TicketCategory, TicketSchedule, Timezone};

const DEFAULT_MAX_QUANTITY: i64 = 100;

/// Form state of the add/edit ticket modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    /// Set when editing.
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub max_quantity: i64,
    /// Sold so far; copied from the stored category when editing.
    #[serde(default)]
    pub tickets_purchased: u32,
    pub use_event_schedule: bool,
    pub ticket_start_date: Option<NaiveDate>,
    pub ticket_end_date: Option<NaiveDate>,
    #[serde(default)]
    pub ticket_start_time: String,
    #[serde(default)]
    pub ticket_end_time: String,
    pub ticket_is_time_range: bool,
    pub ticket_timezone: Option<Timezone>,
}

impl TicketDraft {
    /// Empty form for a new ticket of `event`.
    pub fn for_event(event: &Event) -> Self {
        Self {
            id: None,
            name: String::new(),
            description: None,
            price: 0,
            max_quantity: DEFAULT_MAX_QUANTITY,
            tickets_purchased: 0,
            use_event_schedule: true,
            ticket_start_date: None,
            ticket_end_date: None,
            ticket_start_time: String::new(),
            ticket_end_time: String::new(),
            ticket_is_time_range: true,
            ticket_timezone: Some(event.timezone.unwrap_or(Timezone::Wib)),
        }
    }

    /// Form prefilled from a stored category.
    pub fn from_category(category: &TicketCategory) -> Self {
        let mut draft = Self {
            id: Some(category.id.clone()),
            name: category.name.clone(),
            description: category.description.clone(),
            price: category.price,
            max_quantity: i64::from(category.max_quantity),
            tickets_purchased: category.tickets_purchased,
            use_event_schedule: true,
            ticket_start_date: None,
            ticket_end_date: None,
            ticket_start_time: String::new(),
            ticket_end_time: String::new(),
            ticket_is_time_range: true,
            ticket_timezone: Some(Timezone::Wib),
        };

        if let TicketSchedule::Custom {
            start_date,
            end_date,
            start_time,
            end_time,
            timezone,
        } = &category.schedule
        {
            draft.use_event_schedule = false;
            draft.ticket_start_date = Some(*start_date);
            draft.ticket_end_date = *end_date;
            draft.ticket_start_time = start_time.clone();
            draft.ticket_is_time_range = end_time.is_some();
            draft.ticket_end_time = end_time.clone().unwrap_or_default();
            draft.ticket_timezone = Some(*timezone);
        }
        draft
    }

    fn validate_schedule(&self, errors: &mut ValidationErrors) {
        if self.ticket_start_date.is_none() {
            errors.add(
                "ticketStartDate",
                field_error(
                    "required",
                    "Tanggal mulai tiket harus diisi jika tidak menggunakan jadwal event.",
                ),
            );
        }

        let start_time = if is_blank(&self.ticket_start_time) {
            errors.add(
                "ticketStartTime",
                field_error(
                    "required",
                    "Waktu mulai tiket harus diisi jika tidak menggunakan jadwal event.",
                ),
            );
            None
        } else if let Err(e) = validate_time_of_day(&self.ticket_start_time) {
            errors.add("ticketStartTime", e);
            None
        } else {
            parse_time_of_day(&self.ticket_start_time)
        };

        if self.ticket_is_time_range {
            if is_blank(&self.ticket_end_time) {
                errors.add(
                    "ticketEndTime",
                    field_error(
                        "required",
                        "Waktu selesai tiket harus diisi jika rentang waktu dipilih.",
                    ),
                );
            } else if let Err(e) = validate_time_of_day(&self.ticket_end_time) {
                errors.add("ticketEndTime", e);
            } else {
                let same_day = match (self.ticket_start_date, self.ticket_end_date) {
                    (Some(start), Some(end)) => start == end,
                    (_, None) => true,
                    _ => false,
                };
                let end_time = parse_time_of_day(&self.ticket_end_time);
                if let (true, Some(start), Some(end)) = (same_day, start_time, end_time) {
                    if end <= start {
                        errors.add(
                            "ticketEndTime",
                            field_error(
                                "time_order",
                                "Waktu selesai tiket harus setelah waktu mulai pada hari yang sama.",
                            ),
                        );
                    }
                }
            }
        }

        if let (Some(start), Some(end)) = (self.ticket_start_date, self.ticket_end_date) {
            if end < start {
                errors.add(
                    "ticketEndDate",
                    field_error(
                        "date_order",
                        "Tanggal selesai tiket tidak boleh sebelum tanggal mulai.",
                    ),
                );
            }
        }

        if self.ticket_timezone.is_none() {
            errors.add(
                "ticketTimezone",
                field_error("required", "Zona waktu tiket harus dipilih."),
            );
        }
    }

    /// Validates and converts into a stored category.
    pub fn into_category(self, id: String) -> Result<TicketCategory, ValidationErrors> {
        self.validate()?;

        let schedule = if self.use_event_schedule {
            TicketSchedule::FollowEvent
        } else {
            match (self.ticket_start_date, self.ticket_timezone) {
                (Some(start_date), Some(timezone)) => TicketSchedule::Custom {
                    start_date,
                    end_date: self.ticket_end_date,
                    start_time: self.ticket_start_time.trim().to_string(),
                    end_time: self
                        .ticket_is_time_range
                        .then(|| self.ticket_end_time.trim().to_string()),
                    timezone,
                },
                _ => return Err(ValidationErrors::new()),
            }
        };

        Ok(TicketCategory {
            id,
            name: self.name.trim().to_string(),
            price: self.price,
            max_quantity: u32::try_from(self.max_quantity).unwrap_or(u32::MAX),
            tickets_purchased: self.tickets_purchased,
            description: self.description.filter(|d| !is_blank(d)),
            schedule,
        })
    }
}

impl Validate for TicketDraft {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if is_blank(&self.name) {
            errors.add(
                "name",
                field_error("required", "Nama tiket tidak boleh kosong."),
            );
        }

        if self.price < 0 {
            errors.add(
                "price",
                field_error("non_negative", "Harga tiket tidak boleh negatif."),
            );
        }

        if self.max_quantity <= 0 {
            errors.add(
                "maxQuantity",
                field_error("positive", "Jumlah tiket tersedia harus lebih dari 0."),
            );
        } else if self.max_quantity < i64::from(self.tickets_purchased) {
            errors.add(
                "maxQuantity",
                field_error(
                    "below_sold",
                    format!(
                        "Jumlah tiket tersedia tidak boleh kurang dari tiket terjual ({}).",
                        self.tickets_purchased
                    ),
                ),
            );
        }

        if !self.use_event_schedule {
            self.validate_schedule(&mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Adds or replaces a ticket category of `event`.
///
/// Editing keeps the stored sold count regardless of what the draft carries.
pub fn save_ticket(event: &mut Event, mut draft: TicketDraft) -> Result<TicketCategory, DomainError> {
    let existing = draft
        .id
        .as_ref()
        .and_then(|id| event.ticket_categories.iter().position(|t| &t.id == id));

    if let Some(index) = existing {
        draft.tickets_purchased = event.ticket_categories[index].tickets_purchased;
    } else {
        draft.tickets_purchased = 0;
    }

    let id = draft.id.clone().unwrap_or_else(ids::ticket_id);
    let category = draft.into_category(id)?;

    match existing {
        Some(index) => event.ticket_categories[index] = category.clone(),
        None => event.ticket_categories.push(category.clone()),
    }

    info!(event_id = event.id, ticket_id = %category.id, "Ticket category saved");
    Ok(category)
}

pub fn delete_ticket(event: &mut Event, ticket_id: &str) -> Result<TicketCategory, DomainError> {
    let index = event
        .ticket_categories
        .iter()
        .position(|t| t.id == ticket_id)
        .ok_or_else(|| DomainError::NotFound(format!("ticket {}", ticket_id)))?;
    info!(event_id = event.id, ticket_id, "Ticket category deleted");
    Ok(event.ticket_categories.remove(index))
}

/// Case-insensitive search by ticket name.
pub fn search_tickets<'a>(event: &'a Event, term: &str) -> Vec<&'a TicketCategory> {
    let term = term.trim().to_lowercase();
    event
        .ticket_categories
        .iter()
        .filter(|t| term.is_empty() || t.name.to_lowercase().contains(&term))
        .collect()
}

pub fn ticket_page(
    event: &Event,
    term: &str,
    page: usize,
    per_page: usize,
) -> PageSlice<TicketCategory> {
    let matching: Vec<TicketCategory> = search_tickets(event, term).into_iter().cloned().collect();
    paginate(&matching, page, per_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::field_messages;
    use crate::sample_data::sample_events;

    fn event(id: i64) -> Event {
        sample_events().into_iter().find(|e| e.id == id).unwrap()
    }

    fn custom_draft(event: &Event) -> TicketDraft {
        TicketDraft {
            name: "Sesi Pagi".into(),
            price: 50_000,
            use_event_schedule: false,
            ticket_start_date: NaiveDate::from_ymd_opt(2025, 11, 1),
            ticket_end_date: NaiveDate::from_ymd_opt(2025, 11, 1),
            ticket_start_time: "09:00".into(),
            ticket_end_time: "12:00".into(),
            ..TicketDraft::for_event(event)
        }
    }

    fn fields(errors: &ValidationErrors) -> Vec<String> {
        field_messages(errors).into_iter().map(|(f, _)| f).collect()
    }

    #[test]
    fn test_for_event_defaults() {
        let e = event(1);
        let draft = TicketDraft::for_event(&e);
        assert_eq!(draft.max_quantity, 100);
        assert!(draft.use_event_schedule);
        assert_eq!(draft.ticket_timezone, Some(Timezone::Wib));
    }

    #[test]
    fn test_basic_rules() {
        let e = event(1);
        let draft = TicketDraft {
            name: " ".into(),
            price: -1,
            max_quantity: 0,
            ..TicketDraft::for_event(&e)
        };
        assert_eq!(
            fields(&draft.validate().unwrap_err()),
            vec!["maxQuantity", "name", "price"]
        );
    }

    #[test]
    fn test_custom_schedule_requires_fields() {
        let e = event(1);
        let draft = TicketDraft {
            name: "Sesi".into(),
            use_event_schedule: false,
            ticket_timezone: None,
            ..TicketDraft::for_event(&e)
        };
        assert_eq!(
            fields(&draft.validate().unwrap_err()),
            vec![
                "ticketEndTime",
                "ticketStartDate",
                "ticketStartTime",
                "ticketTimezone"
            ]
        );
    }

    #[test]
    fn test_end_time_must_follow_start_on_same_day() {
        let e = event(101);
        let mut draft = custom_draft(&e);
        draft.ticket_end_time = "08:00".into();
        let errors = draft.validate().unwrap_err();
        assert_eq!(
            field_messages(&errors),
            vec![(
                "ticketEndTime".to_string(),
                "Waktu selesai tiket harus setelah waktu mulai pada hari yang sama.".to_string()
            )]
        );

        draft.ticket_end_date = NaiveDate::from_ymd_opt(2025, 11, 2);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_end_date_before_start() {
        let e = event(101);
        let mut draft = custom_draft(&e);
        draft.ticket_end_date = NaiveDate::from_ymd_opt(2025, 10, 30);
        assert_eq!(fields(&draft.validate().unwrap_err()), vec!["ticketEndDate"]);
    }

    #[test]
    fn test_save_new_ticket_appends() {
        let mut e = event(101);
        let draft = custom_draft(&e);
        let saved = save_ticket(&mut e, draft).unwrap();
        assert!(saved.id.starts_with("TICKET-"));
        assert_eq!(saved.tickets_purchased, 0);
        assert_eq!(e.ticket_categories.last().unwrap().id, saved.id);
        assert_eq!(saved.schedule_display(), "1 November 2025, 09:00 - 12:00 WIB");
    }

    #[test]
    fn test_edit_preserves_sold_count() {
        let mut e = event(101);
        let original = e.ticket_category("daily-pass-jce").cloned().unwrap();
        let mut draft = TicketDraft::from_category(&original);
        draft.price = 80_000;
        draft.tickets_purchased = 0;
        let saved = save_ticket(&mut e, draft).unwrap();
        assert_eq!(saved.tickets_purchased, original.tickets_purchased);
        assert_eq!(e.ticket_category("daily-pass-jce").unwrap().price, 80_000);
        assert_eq!(e.ticket_categories.len(), 2);
    }

    #[test]
    fn test_edit_cannot_shrink_below_sold() {
        let mut e = event(1);
        let vip = e.ticket_category("vip").cloned().unwrap();
        let mut draft = TicketDraft::from_category(&vip);
        draft.max_quantity = 10;
        let err = save_ticket(&mut e, draft).unwrap_err();
        assert_eq!(err.field_messages()[0].0, "maxQuantity");
        assert_eq!(e.ticket_category("vip").unwrap().max_quantity, 50);
    }

    #[test]
    fn test_custom_schedule_round_trips_through_draft() {
        let e = event(2);
        let creator_pass = e.ticket_category("creator-pass").unwrap();
        let draft = TicketDraft::from_category(creator_pass);
        assert!(!draft.use_event_schedule);
        let rebuilt = draft.into_category(creator_pass.id.clone()).unwrap();
        assert_eq!(&rebuilt, creator_pass);
    }

    #[test]
    fn test_delete_and_search() {
        let mut e = event(1);
        assert_eq!(search_tickets(&e, "VIP").len(), 1);
        assert_eq!(search_tickets(&e, "").len(), 2);

        delete_ticket(&mut e, "vip").unwrap();
        assert!(search_tickets(&e, "vip").is_empty());
        assert!(matches!(
            delete_ticket(&mut e, "vip"),
            Err(DomainError::NotFound(_))
        ));
    }

    #[test]
    fn test_ticket_page() {
        let e = event(15);
        let page = ticket_page(&e, "", 2, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total_pages, 2);
    }
}
