//! In-memory event catalog backing the landing, events and dashboard pages.

use chrono::NaiveDate;
use shared::pagination::{paginate, PageSlice};
use tracing::debug;

use crate::error::DomainError;
use crate::models::{Event, EventCategory};

/// Filters for the public events page.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub search: Option<String>,
    /// Empty matches every tier.
    pub categories: Vec<EventCategory>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub page: usize,
}

impl EventQuery {
    fn matches(&self, event: &Event) -> bool {
        if let Some(term) = &self.search {
            if !event.matches_search(term) {
                return false;
            }
        }
        if !self.categories.is_empty() && !self.categories.contains(&event.category) {
            return false;
        }
        if self.date_from.is_none() && self.date_to.is_none() {
            return true;
        }
        // Events without a readable date never match a date filter.
        match event.date_range() {
            Some((start, end)) => {
                self.date_to.map_or(true, |to| start <= to)
                    && self.date_from.map_or(true, |from| end >= from)
            }
            None => false,
        }
    }
}

/// Ordered list of all events, newest additions first.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: i64) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut Event> {
        self.events.iter_mut().find(|e| e.id == id)
    }

    /// Looks up by slug, falling back to the numeric id.
    pub fn find_by_route_key(&self, key: &str) -> Option<&Event> {
        self.events
            .iter()
            .find(|e| e.slug.as_deref() == Some(key))
            .or_else(|| key.parse::<i64>().ok().and_then(|id| self.get(id)))
    }

    /// First `count` events for the landing hero slider.
    pub fn hero(&self, count: usize) -> &[Event] {
        &self.events[..count.min(self.events.len())]
    }

    pub fn featured(&self, count: usize) -> &[Event] {
        self.hero(count)
    }

    /// Events shown publicly.
    pub fn listed(&self) -> Vec<Event> {
        self.events.iter().filter(|e| e.is_listed()).cloned().collect()
    }

    /// One page of listed events matching `query`.
    pub fn search(&self, query: &EventQuery, per_page: usize) -> PageSlice<Event> {
        let matching: Vec<Event> = self
            .events
            .iter()
            .filter(|e| e.is_listed() && query.matches(e))
            .cloned()
            .collect();
        debug!(matches = matching.len(), page = query.page, "Event search");
        paginate(&matching, query.page, per_page)
    }

    /// Prepends a newly created event.
    pub fn add(&mut self, event: Event) {
        debug!(event_id = event.id, "Event added");
        self.events.insert(0, event);
    }

    /// Replaces the event with the same id.
    pub fn update(&mut self, event: Event) -> Result<(), DomainError> {
        let slot = self
            .get_mut(event.id)
            .ok_or_else(|| DomainError::NotFound(format!("event {}", event.id)))?;
        *slot = event;
        Ok(())
    }

    /// Next free id for a new event.
    pub fn next_id(&self) -> i64 {
        self.events.iter().map(|e| e.id).max().unwrap_or(0) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventStatus;
    use crate::sample_data::sample_events;

    fn catalog() -> EventCatalog {
        EventCatalog::new(sample_events())
    }

    fn ids(slice: &PageSlice<Event>) -> Vec<i64> {
        slice.items.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_hero_and_featured() {
        let c = catalog();
        assert_eq!(c.hero(3).len(), 3);
        assert_eq!(c.featured(6).len(), 6);
        assert_eq!(c.hero(100).len(), c.all().len());
    }

    #[test]
    fn test_listed_excludes_draft_and_finished() {
        let listed = catalog().listed();
        assert!(listed.iter().all(|e| e.status == EventStatus::Active));
        assert!(!listed.iter().any(|e| e.id == 3 || e.id == 15));
    }

    #[test]
    fn test_search_by_term() {
        let query = EventQuery {
            search: Some("culinary".into()),
            page: 1,
            ..Default::default()
        };
        assert_eq!(ids(&catalog().search(&query, 9)), vec![101]);
    }

    #[test]
    fn test_search_by_category() {
        let query = EventQuery {
            categories: vec![EventCategory::Business],
            page: 1,
            ..Default::default()
        };
        assert_eq!(ids(&catalog().search(&query, 9)), vec![2]);
    }

    #[test]
    fn test_search_by_date_window() {
        let query = EventQuery {
            date_from: NaiveDate::from_ymd_opt(2025, 9, 10),
            date_to: NaiveDate::from_ymd_opt(2025, 9, 30),
            page: 1,
            ..Default::default()
        };
        assert_eq!(ids(&catalog().search(&query, 9)), vec![4, 14]);
    }

    #[test]
    fn test_out_of_range_page_falls_back_to_first() {
        let query = EventQuery {
            page: 42,
            ..Default::default()
        };
        let page = catalog().search(&query, 2);
        assert_eq!(page.page, 1);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_add_prepends() {
        let mut c = catalog();
        let mut event = c.all()[0].clone();
        event.id = c.next_id();
        event.name = "Acara Baru".into();
        c.add(event.clone());
        assert_eq!(c.all()[0].id, event.id);
    }

    #[test]
    fn test_update_replaces_and_reports_missing() {
        let mut c = catalog();
        let mut event = c.get(1).cloned().unwrap();
        event.name = "Local Soundscape Vol. 2".into();
        c.update(event).unwrap();
        assert_eq!(c.get(1).unwrap().name, "Local Soundscape Vol. 2");

        let mut ghost = c.get(1).cloned().unwrap();
        ghost.id = 9999;
        assert!(matches!(c.update(ghost), Err(DomainError::NotFound(_))));
    }

    #[test]
    fn test_find_by_route_key() {
        let c = catalog();
        assert_eq!(c.find_by_route_key("local-soundscape-depok").unwrap().id, 1);
        assert_eq!(c.find_by_route_key("101").unwrap().id, 101);
        assert!(c.find_by_route_key("tidak-ada").is_none());
    }
}
