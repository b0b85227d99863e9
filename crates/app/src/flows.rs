//! Modal state, one tagged union per modal group.
//!
//! Each enum admits only the combinations the UI can actually show, so a
//! login modal and an OTP modal can never be open at the same time.

use domain::models::AuthRole;
use serde::Serialize;
use std::fmt;

use crate::controller::{AppController, NavPayload};
use crate::routes::Page;

/// Email and name captured at signup, carried into verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpContext {
    pub email: String,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthFlow {
    #[default]
    Closed,
    SelectingRole,
    Login {
        role: AuthRole,
    },
    Signup {
        role: AuthRole,
    },
    /// Full-page creator login and signup.
    CreatorAuth,
    /// Inline OTP modal used by visitors.
    OtpModal(OtpContext),
    /// Full-page OTP step used by creators and organizations.
    OtpPage {
        role: AuthRole,
        context: OtpContext,
    },
}

impl AuthFlow {
    pub fn is_open(&self) -> bool {
        !matches!(self, AuthFlow::Closed)
    }

    /// Role the current step signs in as.
    pub fn role(&self) -> Option<AuthRole> {
        match self {
            AuthFlow::Login { role } | AuthFlow::Signup { role } | AuthFlow::OtpPage { role, .. } => {
                Some(*role)
            }
            AuthFlow::CreatorAuth => Some(AuthRole::EventCreator),
            AuthFlow::OtpModal(_) => Some(AuthRole::EventVisitor),
            AuthFlow::Closed | AuthFlow::SelectingRole => None,
        }
    }

    pub fn otp_context(&self) -> Option<&OtpContext> {
        match self {
            AuthFlow::OtpModal(context) | AuthFlow::OtpPage { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Page the step takes over entirely, if it is a full-page step.
    pub fn full_page(&self) -> Option<Page> {
        match self {
            AuthFlow::CreatorAuth => Some(Page::CreatorAuth),
            AuthFlow::OtpPage { .. } => Some(Page::OtpInput),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoleSwitchFlow {
    #[default]
    Closed,
    Choosing,
    /// Switching to an organization waits for a verification code.
    VerifyingOrganization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PromptKind {
    UnsavedChanges,
    CancelPayment,
    Logout,
}

/// Copy shown in the confirmation modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationPrompt {
    pub kind: PromptKind,
    pub title: &'static str,
    pub message: &'static str,
    pub confirm_text: &'static str,
    pub cancel_text: &'static str,
}

impl ConfirmationPrompt {
    pub fn unsaved_changes() -> Self {
        Self {
            kind: PromptKind::UnsavedChanges,
            title: "Konfirmasi Navigasi",
            message: "Anda memiliki item di keranjang atau data yang belum disimpan. Apakah Anda yakin ingin meninggalkan halaman ini? Perubahan Anda akan hilang.",
            confirm_text: "Ya, Tinggalkan",
            cancel_text: "Tidak, Tetap di Sini",
        }
    }

    pub fn cancel_payment() -> Self {
        Self {
            kind: PromptKind::CancelPayment,
            title: "Batalkan Pembayaran?",
            message: "Apakah Anda yakin ingin membatalkan proses pembayaran dan kembali ke halaman checkout? Pesanan Anda belum selesai.",
            confirm_text: "Ya, Batalkan",
            cancel_text: "Tidak, Tetap di Sini",
        }
    }

    pub fn logout() -> Self {
        Self {
            kind: PromptKind::Logout,
            title: "Konfirmasi Logout",
            message: "Apakah Anda yakin ingin keluar dari akun Anda?",
            confirm_text: "Ya, Logout",
            cancel_text: "Batal",
        }
    }
}

/// Runs against the controller right before a confirmed navigation.
pub type Cleanup = Box<dyn FnOnce(&mut AppController) + Send>;

pub struct PendingConfirmation {
    pub prompt: ConfirmationPrompt,
    pub target: Page,
    pub payload: NavPayload,
    pub cleanup: Option<Cleanup>,
}

impl fmt::Debug for PendingConfirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingConfirmation")
            .field("prompt", &self.prompt.kind)
            .field("target", &self.target)
            .field("has_cleanup", &self.cleanup.is_some())
            .finish()
    }
}

#[derive(Debug, Default)]
pub enum ConfirmationFlow {
    #[default]
    Idle,
    Open(PendingConfirmation),
}

impl ConfirmationFlow {
    pub fn prompt(&self) -> Option<&ConfirmationPrompt> {
        match self {
            ConfirmationFlow::Open(pending) => Some(&pending.prompt),
            ConfirmationFlow::Idle => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, ConfirmationFlow::Open(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> OtpContext {
        OtpContext {
            email: "rina@contoh.id".into(),
            name: None,
        }
    }

    #[test]
    fn test_auth_flow_roles() {
        assert_eq!(AuthFlow::Closed.role(), None);
        assert_eq!(AuthFlow::CreatorAuth.role(), Some(AuthRole::EventCreator));
        assert_eq!(AuthFlow::OtpModal(context()).role(), Some(AuthRole::EventVisitor));
        assert_eq!(
            AuthFlow::OtpPage {
                role: AuthRole::Organization,
                context: context()
            }
            .role(),
            Some(AuthRole::Organization)
        );
    }

    #[test]
    fn test_full_page_steps() {
        assert_eq!(AuthFlow::CreatorAuth.full_page(), Some(Page::CreatorAuth));
        assert_eq!(AuthFlow::OtpModal(context()).full_page(), None);
        assert_eq!(
            AuthFlow::OtpPage {
                role: AuthRole::EventCreator,
                context: context()
            }
            .full_page(),
            Some(Page::OtpInput)
        );
    }

    #[test]
    fn test_otp_context_only_during_verification() {
        assert!(AuthFlow::Login {
            role: AuthRole::EventVisitor
        }
        .otp_context()
        .is_none());
        assert_eq!(
            AuthFlow::OtpModal(context()).otp_context().map(|c| c.email.as_str()),
            Some("rina@contoh.id")
        );
    }

    #[test]
    fn test_prompts_are_distinct() {
        assert_ne!(
            ConfirmationPrompt::unsaved_changes().title,
            ConfirmationPrompt::cancel_payment().title
        );
        assert_eq!(ConfirmationPrompt::logout().confirm_text, "Ya, Logout");
    }

    #[test]
    fn test_idle_confirmation_has_no_prompt() {
        let flow = ConfirmationFlow::default();
        assert!(!flow.is_open());
        assert!(flow.prompt().is_none());
    }
}
