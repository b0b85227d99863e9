//! Common test utilities for integration tests.
//!
//! Controllers and shells here run over the sample catalog with in-memory
//! session storage and the demo code verifier.

// Allow dead code in this module - not every integration test uses every helper.
#![allow(dead_code)]

use domain::models::TransactionForm;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use hegira_app::config::Config;
use hegira_app::controller::AppController;
use hegira_app::shell::AppShell;

pub const CULINARY_EXPO: &str = "jakarta-culinary-expo-2025";
pub const VALID_OTP: &str = "123456";
pub const VALID_ORG_CODE: &str = "ORG123";

/// Test configuration built from embedded defaults.
pub fn test_config() -> Config {
    Config::load_for_test(&[]).expect("Failed to load test config")
}

pub fn test_controller() -> AppController {
    AppController::with_config(test_config())
}

pub fn test_shell() -> AppShell {
    AppShell::new(test_controller())
}

/// Commits whatever navigation is pending.
pub fn settle(controller: &mut AppController) {
    controller.flush_navigation();
}

/// Test buyer with randomized details.
pub struct TestBuyer {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
}

impl TestBuyer {
    pub fn new() -> Self {
        Self {
            full_name: Name().fake(),
            email: SafeEmail().fake(),
            phone_number: "081234567890".to_string(),
        }
    }

    pub fn form(&self) -> TransactionForm {
        TransactionForm {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            phone_number: self.phone_number.clone(),
            gender: None,
            date_of_birth: None,
            additional_ticket_holders: Vec::new(),
        }
    }
}

impl Default for TestBuyer {
    fn default() -> Self {
        Self::new()
    }
}
