//! Crew members assigned to events.

use shared::ids;
use tracing::info;
use validator::Validate;

use crate::error::DomainError;
use crate::models::{AttendanceStatus, CrewDraft, CrewMember, Event};

#[derive(Debug, Clone, Default)]
pub struct CrewRoster {
    members: Vec<CrewMember>,
}

impl CrewRoster {
    pub fn new(members: Vec<CrewMember>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[CrewMember] {
        &self.members
    }

    pub fn for_event(&self, event_id: i64) -> Vec<&CrewMember> {
        self.members.iter().filter(|m| m.event_id == event_id).collect()
    }

    /// Validates `draft` and adds the member to `event`, not yet checked in.
    pub fn add(&mut self, event: &Event, draft: CrewDraft) -> Result<&CrewMember, DomainError> {
        draft.validate()?;

        let member = CrewMember {
            id: ids::crew_id(),
            event_id: event.id,
            event_name: event.name.clone(),
            name: draft.name.trim().to_string(),
            role: draft.role.trim().to_string(),
            phone_number: draft.full_phone_number(),
            status: AttendanceStatus::NotArrived,
            scan_timestamp: None,
        };
        info!(event_id = event.id, crew_id = %member.id, "Crew member added");
        self.members.push(member);
        Ok(&self.members[self.members.len() - 1])
    }

    pub fn remove(&mut self, id: &str) -> Result<CrewMember, DomainError> {
        let index = self
            .members
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("crew {}", id)))?;
        Ok(self.members.remove(index))
    }

    /// Case-insensitive match on name or role within one event.
    pub fn search(&self, event_id: i64, term: &str) -> Vec<&CrewMember> {
        let term = term.trim().to_lowercase();
        self.for_event(event_id)
            .into_iter()
            .filter(|m| {
                term.is_empty()
                    || m.name.to_lowercase().contains(&term)
                    || m.role.to_lowercase().contains(&term)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crew::DEFAULT_COUNTRY_CODE;
    use crate::sample_data::sample_events;

    fn draft(name: &str, role: &str) -> CrewDraft {
        CrewDraft {
            name: name.into(),
            role: role.into(),
            country_code: DEFAULT_COUNTRY_CODE.into(),
            phone_number: "81234567890".into(),
        }
    }

    #[test]
    fn test_add_and_search() {
        let event = sample_events().into_iter().next().unwrap();
        let mut roster = CrewRoster::default();
        let added = roster.add(&event, draft(" Budi ", "Keamanan")).unwrap().clone();
        roster.add(&event, draft("Sari", "Tiket")).unwrap();

        assert!(added.id.starts_with("CREW-"));
        assert_eq!(added.name, "Budi");
        assert_eq!(added.phone_number, "+6281234567890");
        assert_eq!(added.status, AttendanceStatus::NotArrived);
        assert_eq!(roster.search(event.id, "keamanan").len(), 1);
        assert_eq!(roster.search(event.id, "").len(), 2);
        assert!(roster.search(event.id + 1, "").is_empty());
    }

    #[test]
    fn test_invalid_draft_not_added() {
        let event = sample_events().into_iter().next().unwrap();
        let mut roster = CrewRoster::default();
        assert!(roster.add(&event, draft("", "Keamanan")).is_err());
        assert!(roster.members().is_empty());
    }

    #[test]
    fn test_remove() {
        let event = sample_events().into_iter().next().unwrap();
        let mut roster = CrewRoster::default();
        let id = roster.add(&event, draft("Budi", "Keamanan")).unwrap().id.clone();
        roster.remove(&id).unwrap();
        assert!(matches!(roster.remove(&id), Err(DomainError::NotFound(_))));
    }
}
