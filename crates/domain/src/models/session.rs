//! Roles and the authenticated session.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Role of a logged-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Visitor,
    Creator,
    Organization,
}

/// Where a default display name is being assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    /// Plain login without a captured name.
    Login,
    /// First login right after OTP verification.
    Verified,
    /// Switching roles from the dashboard.
    RoleSwitch,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Visitor => "visitor",
            UserRole::Creator => "creator",
            UserRole::Organization => "organization",
        }
    }

    /// Creators and organizations land on the dashboard after login.
    pub fn uses_dashboard(&self) -> bool {
        matches!(self, UserRole::Creator | UserRole::Organization)
    }

    pub fn default_name(&self, context: NameContext) -> &'static str {
        match (context, self) {
            (NameContext::Login, UserRole::Visitor) => "Pengunjung Hegira",
            (NameContext::Login, UserRole::Creator) => "Kreator Event",
            (NameContext::Login, UserRole::Organization) => "Organisasi Hegira",
            (NameContext::Verified, UserRole::Visitor) => "Pengunjung Baru",
            (NameContext::Verified, UserRole::Creator) => "Kreator Baru",
            (NameContext::Verified, UserRole::Organization) => "Organisasi Baru",
            (NameContext::RoleSwitch, UserRole::Visitor) => "Pengunjung Hegira",
            (NameContext::RoleSwitch, UserRole::Creator) => "Kreator Hegira",
            (NameContext::RoleSwitch, UserRole::Organization) => "Nama Organisasi Anda",
        }
    }

    /// Placeholder address used when no email was captured during auth.
    pub fn default_email(&self) -> String {
        format!("{}@hegira.com", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visitor" | "Event Visitor" => Ok(UserRole::Visitor),
            "creator" | "Event Creator" => Ok(UserRole::Creator),
            "organization" | "Organization" => Ok(UserRole::Organization),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role picked in the auth selection modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthRole {
    #[serde(rename = "Event Visitor")]
    EventVisitor,
    #[serde(rename = "Event Creator")]
    EventCreator,
    #[serde(rename = "Organization")]
    Organization,
}

impl AuthRole {
    pub fn label(&self) -> &'static str {
        match self {
            AuthRole::EventVisitor => "Event Visitor",
            AuthRole::EventCreator => "Event Creator",
            AuthRole::Organization => "Organization",
        }
    }
}

impl From<AuthRole> for UserRole {
    fn from(role: AuthRole) -> Self {
        match role {
            AuthRole::EventVisitor => UserRole::Visitor,
            AuthRole::EventCreator => UserRole::Creator,
            AuthRole::Organization => UserRole::Organization,
        }
    }
}

impl fmt::Display for AuthRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// An authenticated user. Exists only while logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub role: UserRole,
    pub display_name: String,
    pub email: String,
}

impl Session {
    /// Fills missing name and email with the role defaults for `context`.
    pub fn start(
        role: UserRole,
        name: Option<String>,
        email: Option<String>,
        context: NameContext,
    ) -> Self {
        Self {
            role,
            display_name: name
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| role.default_name(context).to_string()),
            email: email
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| role.default_email()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_role_maps_to_user_role() {
        assert_eq!(UserRole::from(AuthRole::EventVisitor), UserRole::Visitor);
        assert_eq!(UserRole::from(AuthRole::EventCreator), UserRole::Creator);
        assert_eq!(UserRole::from(AuthRole::Organization), UserRole::Organization);
    }

    #[test]
    fn test_user_role_from_str_accepts_both_forms() {
        assert_eq!("creator".parse::<UserRole>(), Ok(UserRole::Creator));
        assert_eq!("Event Visitor".parse::<UserRole>(), Ok(UserRole::Visitor));
        assert!("admin".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_default_names() {
        assert_eq!(UserRole::Creator.default_name(NameContext::Login), "Kreator Event");
        assert_eq!(
            UserRole::Organization.default_name(NameContext::Verified),
            "Organisasi Baru"
        );
        assert_eq!(
            UserRole::Organization.default_name(NameContext::RoleSwitch),
            "Nama Organisasi Anda"
        );
    }

    #[test]
    fn test_session_start_fills_defaults() {
        let session = Session::start(UserRole::Visitor, None, Some(" ".into()), NameContext::Login);
        assert_eq!(session.display_name, "Pengunjung Hegira");
        assert_eq!(session.email, "visitor@hegira.com");

        let session = Session::start(
            UserRole::Creator,
            Some("Dewi".into()),
            Some("dewi@contoh.id".into()),
            NameContext::Verified,
        );
        assert_eq!(session.display_name, "Dewi");
        assert_eq!(session.email, "dewi@contoh.id");
    }

    #[test]
    fn test_auth_role_serializes_as_label() {
        assert_eq!(
            serde_json::to_string(&AuthRole::EventCreator).unwrap(),
            "\"Event Creator\""
        );
    }
}
