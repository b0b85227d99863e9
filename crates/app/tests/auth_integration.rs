//! Integration tests for sign-in, OTP verification, role switching and logout.

mod common;

use common::{settle, test_controller, TestBuyer, CULINARY_EXPO, VALID_ORG_CODE, VALID_OTP};
use domain::models::{AuthRole, UserRole};
use domain::services::TicketSelection;
use hegira_app::controller::{DashboardKind, NavPayload, Redirect};
use hegira_app::error::AuthError;
use hegira_app::flows::{AuthFlow, PromptKind, RoleSwitchFlow};
use hegira_app::routes::Page;

// ============================================================================
// Login
// ============================================================================

#[test]
fn test_visitor_login_lands_on_landing() {
    let mut controller = test_controller();
    controller.open_auth(None, None);
    assert_eq!(controller.auth_flow(), &AuthFlow::SelectingRole);

    controller.select_auth_role(AuthRole::EventVisitor);
    assert_eq!(
        controller.auth_flow(),
        &AuthFlow::Login {
            role: AuthRole::EventVisitor
        }
    );
    assert!(!controller.is_loading());

    controller.login_success(None).unwrap();
    settle(&mut controller);

    let session = controller.session().unwrap();
    assert_eq!(session.role, UserRole::Visitor);
    assert_eq!(session.display_name, "Pengunjung Baru");
    assert_eq!(session.email, "visitor@hegira.com");
    assert_eq!(controller.current_page(), Page::Landing);
    assert!(!controller.auth_flow().is_open());
}

#[test]
fn test_creator_login_goes_to_dashboard() {
    let mut controller = test_controller();
    controller.open_auth(None, None);
    controller.select_auth_role(AuthRole::EventCreator);
    settle(&mut controller);
    assert_eq!(controller.current_page(), Page::CreatorAuth);
    assert!(!controller.layout().show_navbar);

    controller.creator_login_success(None).unwrap();
    settle(&mut controller);

    let session = controller.session().unwrap();
    assert_eq!(session.role, UserRole::Creator);
    assert_eq!(session.display_name, "Kreator Event");
    assert_eq!(controller.current_page(), Page::Dashboard);
    assert_eq!(controller.dashboard_kind(), Some(DashboardKind::Events));
    assert!(!controller.layout().show_navbar);
}

#[test]
fn test_login_without_active_role_is_rejected() {
    let mut controller = test_controller();
    assert_eq!(controller.login_success(None), Err(AuthError::NoActiveRole));
    assert_eq!(controller.creator_login_success(None), Err(AuthError::NoActiveRole));
    assert_eq!(controller.switch_to_signup(), Err(AuthError::NoActiveRole));
}

#[test]
fn test_login_follows_redirect() {
    let mut controller = test_controller();
    controller.open_event(CULINARY_EXPO).unwrap();
    settle(&mut controller);
    let event = controller.selected_event().cloned().unwrap();

    controller.open_auth(
        Some(AuthRole::Organization),
        Some(Redirect {
            page: Page::EventDetail,
            payload: NavPayload::event(event),
        }),
    );
    controller.login_success(Some("mitra@contoh.id".into())).unwrap();
    settle(&mut controller);

    assert_eq!(controller.current_page(), Page::EventDetail);
    assert!(controller.post_login_redirect().is_none());
    assert_eq!(controller.session().unwrap().email, "mitra@contoh.id");
    assert_eq!(controller.dashboard_kind(), Some(DashboardKind::BusinessMatching));
}

#[test]
fn test_checkout_login_returns_to_checkout() {
    let mut controller = test_controller();
    controller.open_event(CULINARY_EXPO).unwrap();
    settle(&mut controller);
    controller
        .start_checkout(&[TicketSelection::new("3day-pass-jce", 1)])
        .unwrap();
    settle(&mut controller);

    controller.request_checkout_login(None);
    assert_eq!(controller.auth_flow(), &AuthFlow::SelectingRole);
    assert_eq!(
        controller.post_login_redirect().map(|r| r.page),
        Some(Page::Checkout)
    );

    controller.select_auth_role(AuthRole::EventVisitor);
    controller.login_success(None).unwrap();
    settle(&mut controller);

    assert_eq!(controller.current_page(), Page::Checkout);
    assert_eq!(controller.checkout().map(|c| c.total_price), Some(200_000));
    let prefill = controller.buyer_prefill().unwrap();
    assert_eq!(prefill.full_name, "Pengunjung Baru");
}

// ============================================================================
// Signup and OTP
// ============================================================================

#[test]
fn test_visitor_signup_uses_otp_modal() {
    let buyer = TestBuyer::new();
    let mut controller = test_controller();
    controller.open_auth(Some(AuthRole::EventVisitor), None);
    controller.switch_to_signup().unwrap();

    controller
        .signup_success(&buyer.email, Some(buyer.full_name.clone()))
        .unwrap();
    assert!(matches!(controller.auth_flow(), AuthFlow::OtpModal(_)));
    assert_eq!(controller.resend_otp(), Ok(buyer.email.as_str()));
    assert!(controller.layout().show_navbar);

    assert_eq!(controller.verify_otp("12"), Err(AuthError::InvalidCode));
    assert!(controller.session().is_none());

    controller.verify_otp(VALID_OTP).unwrap();
    settle(&mut controller);
    let session = controller.session().unwrap();
    assert_eq!(session.role, UserRole::Visitor);
    assert_eq!(session.display_name, buyer.full_name);
    assert_eq!(session.email, buyer.email);
    assert_eq!(controller.current_page(), Page::Landing);
}

#[test]
fn test_creator_signup_uses_full_page_otp() {
    let mut controller = test_controller();
    controller.select_auth_role(AuthRole::EventCreator);
    settle(&mut controller);

    controller.signup_success("kreator@contoh.id", None).unwrap();
    assert!(matches!(
        controller.auth_flow(),
        AuthFlow::OtpPage {
            role: AuthRole::EventCreator,
            ..
        }
    ));
    assert!(!controller.layout().show_navbar);

    controller.verify_otp(VALID_OTP).unwrap();
    settle(&mut controller);
    let session = controller.session().unwrap();
    assert_eq!(session.display_name, "Kreator Baru");
    assert_eq!(session.email, "kreator@contoh.id");
    assert_eq!(controller.current_page(), Page::Dashboard);
}

#[test]
fn test_change_otp_email() {
    let mut controller = test_controller();
    controller.open_auth(Some(AuthRole::EventVisitor), None);
    controller.signup_success("a@contoh.id", None).unwrap();
    controller.change_otp_email().unwrap();
    assert_eq!(
        controller.auth_flow(),
        &AuthFlow::Signup {
            role: AuthRole::EventVisitor
        }
    );

    controller.select_auth_role(AuthRole::EventCreator);
    controller.signup_success("b@contoh.id", None).unwrap();
    controller.change_otp_email().unwrap();
    assert_eq!(controller.auth_flow(), &AuthFlow::CreatorAuth);

    assert_eq!(
        controller.change_otp_email(),
        Err(AuthError::NoPendingVerification)
    );
}

#[test]
fn test_verify_without_signup() {
    let mut controller = test_controller();
    assert_eq!(
        controller.verify_otp(VALID_OTP),
        Err(AuthError::NoPendingVerification)
    );
    assert_eq!(controller.resend_otp(), Err(AuthError::NoPendingVerification));
}

#[test]
fn test_close_auth_flow_clears_everything() {
    let mut controller = test_controller();
    controller.request_checkout_login(Some(AuthRole::EventVisitor));
    controller.close_auth_flow();
    settle(&mut controller);

    assert!(!controller.auth_flow().is_open());
    assert!(controller.post_login_redirect().is_none());
    assert_eq!(controller.current_page(), Page::Landing);
}

// ============================================================================
// Role switch
// ============================================================================

fn logged_in_creator() -> hegira_app::controller::AppController {
    let mut controller = test_controller();
    controller.select_auth_role(AuthRole::EventCreator);
    controller.signup_success("kreator@contoh.id", None).unwrap();
    controller.verify_otp(VALID_OTP).unwrap();
    settle(&mut controller);
    controller
}

#[test]
fn test_switch_to_visitor_commits_immediately() {
    let mut controller = logged_in_creator();
    controller.open_role_switch().unwrap();
    assert_eq!(controller.role_switch_flow(), RoleSwitchFlow::Choosing);

    let generation = controller.switch_role(UserRole::Visitor).unwrap();
    assert!(generation.is_some());
    settle(&mut controller);

    let session = controller.session().unwrap();
    assert_eq!(session.role, UserRole::Visitor);
    assert_eq!(session.display_name, "Pengunjung Hegira");
    assert_eq!(session.email, "kreator@contoh.id");
    assert_eq!(controller.role_switch_flow(), RoleSwitchFlow::Closed);
    assert_eq!(controller.current_page(), Page::Landing);
}

#[test]
fn test_switch_to_organization_needs_code() {
    let mut controller = logged_in_creator();
    controller.open_role_switch().unwrap();

    assert_eq!(controller.switch_role(UserRole::Organization), Ok(None));
    assert_eq!(
        controller.role_switch_flow(),
        RoleSwitchFlow::VerifyingOrganization
    );
    assert_eq!(controller.session().unwrap().role, UserRole::Creator);

    assert_eq!(
        controller.verify_organization("short"),
        Err(AuthError::InvalidCode)
    );
    controller.verify_organization(VALID_ORG_CODE).unwrap();
    settle(&mut controller);

    let session = controller.session().unwrap();
    assert_eq!(session.role, UserRole::Organization);
    assert_eq!(session.display_name, "Nama Organisasi Anda");
    assert_eq!(controller.dashboard_kind(), Some(DashboardKind::BusinessMatching));
}

#[test]
fn test_closing_organization_verification_keeps_role() {
    let mut controller = logged_in_creator();
    controller.switch_role(UserRole::Organization).unwrap();
    controller.close_organization_verification();
    assert_eq!(controller.role_switch_flow(), RoleSwitchFlow::Closed);
    assert_eq!(controller.session().unwrap().role, UserRole::Creator);
}

#[test]
fn test_role_switch_requires_session() {
    let mut controller = test_controller();
    assert_eq!(controller.open_role_switch(), Err(AuthError::NotAuthenticated));
    assert_eq!(
        controller.switch_role(UserRole::Creator),
        Err(AuthError::NotAuthenticated)
    );
}

// ============================================================================
// Logout
// ============================================================================

#[test]
fn test_logout_asks_first() {
    let mut controller = logged_in_creator();
    controller.logout().unwrap();
    assert_eq!(
        controller.confirmation_prompt().map(|p| p.kind),
        Some(PromptKind::Logout)
    );

    controller.cancel_confirmation();
    assert!(controller.is_logged_in());
    assert_eq!(controller.current_page(), Page::Dashboard);

    controller.logout().unwrap();
    controller.confirm().unwrap();
    assert!(!controller.is_logged_in());
    settle(&mut controller);
    assert_eq!(controller.current_page(), Page::Landing);
}
