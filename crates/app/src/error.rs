use domain::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Failures of the sign-in, verification and role switch steps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("No verification is pending")]
    NoPendingVerification,

    #[error("Invalid verification code")]
    InvalidCode,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("No role is selected for this auth step")]
    NoActiveRole,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// One inline form message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationDetail {
    pub field: String,
    pub message: String,
}

impl AppError {
    /// Field-keyed messages to show next to form inputs. Empty for non-form errors.
    pub fn details(&self) -> Vec<ValidationDetail> {
        match self {
            AppError::Domain(err) => err
                .field_messages()
                .into_iter()
                .map(|(field, message)| ValidationDetail { field, message })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Single line suitable for a toast or banner.
    pub fn user_message(&self) -> String {
        let details = self.details();
        match details.len() {
            0 => self.to_string(),
            1 => details[0].message.clone(),
            n => format!("{} validation errors", n),
        }
    }
}
