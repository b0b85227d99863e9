//! Verification of one-time codes.

use tracing::debug;

/// Checks codes typed during signup and before switching to an organization role.
pub trait CodeVerifier: Send + Sync {
    fn verify_otp(&self, email: &str, code: &str) -> bool;

    fn verify_organization_code(&self, code: &str) -> bool;
}

/// Accepts any well-formed code: `otp_length` digits for signup,
/// `organization_code_length` letters or digits for organizations.
#[derive(Debug, Clone)]
pub struct DemoVerifier {
    otp_length: usize,
    organization_code_length: usize,
}

impl DemoVerifier {
    pub fn new(otp_length: usize, organization_code_length: usize) -> Self {
        Self {
            otp_length,
            organization_code_length,
        }
    }
}

impl Default for DemoVerifier {
    fn default() -> Self {
        Self::new(6, 6)
    }
}

impl CodeVerifier for DemoVerifier {
    fn verify_otp(&self, email: &str, code: &str) -> bool {
        let code = code.trim();
        let ok = code.len() == self.otp_length && code.chars().all(|c| c.is_ascii_digit());
        debug!(email = %email, ok, "OTP checked");
        ok
    }

    fn verify_organization_code(&self, code: &str) -> bool {
        let code = code.trim();
        code.len() == self.organization_code_length
            && code.chars().all(|c| c.is_ascii_alphanumeric())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_format() {
        let v = DemoVerifier::default();
        assert!(v.verify_otp("a@b.id", "123456"));
        assert!(v.verify_otp("a@b.id", " 123456 "));
        assert!(!v.verify_otp("a@b.id", "12345"));
        assert!(!v.verify_otp("a@b.id", "12345a"));
    }

    #[test]
    fn test_organization_code_format() {
        let v = DemoVerifier::new(6, 8);
        assert!(v.verify_organization_code("ORG12345"));
        assert!(!v.verify_organization_code("ORG-1234"));
        assert!(!v.verify_organization_code("ORG1"));
    }
}
