//! Event crew members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::validation::{field_error, is_blank};
use validator::{Validate, ValidationError};

use super::attendee::AttendanceStatus;

/// Dialing prefixes offered on the crew form.
pub const COUNTRY_CODES: [&str; 4] = ["+62", "+1", "+44", "+65"];

pub const DEFAULT_COUNTRY_CODE: &str = "+62";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMember {
    pub id: String,
    pub event_id: i64,
    pub event_name: String,
    pub name: String,
    pub role: String,
    /// Country code followed by the local number.
    pub phone_number: String,
    pub status: AttendanceStatus,
    pub scan_timestamp: Option<DateTime<Utc>>,
}

fn validate_crew_name(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error("required", "Nama lengkap tidak boleh kosong."));
    }
    Ok(())
}

fn validate_crew_role(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(field_error("required", "Role tidak boleh kosong."));
    }
    Ok(())
}

fn validate_country_code(value: &str) -> Result<(), ValidationError> {
    if COUNTRY_CODES.contains(&value) {
        Ok(())
    } else {
        Err(field_error("country_code", "Kode negara tidak dikenal."))
    }
}

/// Form input for adding a crew member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CrewDraft {
    #[validate(custom(function = "validate_crew_name"))]
    pub name: String,

    #[validate(custom(function = "validate_crew_role"))]
    pub role: String,

    #[validate(custom(function = "validate_country_code"))]
    pub country_code: String,

    /// Local part only, without the country code.
    #[validate(custom(function = "shared::validation::validate_phone_number"))]
    pub phone_number: String,
}

impl CrewDraft {
    pub fn full_phone_number(&self) -> String {
        format!("{}{}", self.country_code, self.phone_number.trim())
    }
}
