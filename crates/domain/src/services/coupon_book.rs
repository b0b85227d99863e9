//! Coupons authored for one event.

use shared::ids;
use shared::validation::field_error;
use tracing::info;
use validator::{Validate, ValidationErrors};

use crate::error::DomainError;
use crate::models::{Coupon, CouponDraft};

#[derive(Debug, Clone, Default)]
pub struct CouponBook {
    event_id: i64,
    coupons: Vec<Coupon>,
}

impl CouponBook {
    pub fn new(event_id: i64, coupons: Vec<Coupon>) -> Self {
        Self { event_id, coupons }
    }

    pub fn event_id(&self) -> i64 {
        self.event_id
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn get(&self, id: &str) -> Option<&Coupon> {
        self.coupons.iter().find(|c| c.id == id)
    }

    /// Looks up a coupon by code, ignoring case and surrounding whitespace.
    pub fn find_code(&self, code: &str) -> Option<&Coupon> {
        let code = code.trim();
        self.coupons.iter().find(|c| c.code.eq_ignore_ascii_case(code))
    }

    /// Validates `draft` and appends it, or replaces the coupon with the same id.
    ///
    /// Nothing is mutated when validation fails.
    pub fn save(&mut self, draft: CouponDraft) -> Result<&Coupon, DomainError> {
        draft.validate()?;

        let code = draft.code.trim().to_uppercase();
        let clash = self
            .coupons
            .iter()
            .any(|c| c.code == code && Some(&c.id) != draft.id.as_ref());
        if clash {
            let mut errors = ValidationErrors::new();
            errors.add(
                "code",
                field_error("unique", "Kode kupon sudah digunakan."),
            );
            return Err(errors.into());
        }

        let position = draft
            .id
            .as_ref()
            .and_then(|id| self.coupons.iter().position(|c| &c.id == id));

        let index = match position {
            Some(index) => {
                let id = self.coupons[index].id.clone();
                self.coupons[index] = draft.into_coupon(id);
                index
            }
            None => {
                let id = draft.id.clone().unwrap_or_else(ids::coupon_id);
                self.coupons.push(draft.into_coupon(id));
                self.coupons.len() - 1
            }
        };

        let saved = &self.coupons[index];
        info!(event_id = self.event_id, coupon_id = %saved.id, code = %saved.code, "Coupon saved");
        Ok(saved)
    }

    pub fn delete(&mut self, id: &str) -> Result<Coupon, DomainError> {
        let index = self
            .coupons
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("coupon {}", id)))?;
        info!(event_id = self.event_id, coupon_id = %id, "Coupon deleted");
        Ok(self.coupons.remove(index))
    }

    /// Case-insensitive match on name or code.
    pub fn search(&self, term: &str) -> Vec<&Coupon> {
        let term = term.trim().to_lowercase();
        self.coupons
            .iter()
            .filter(|c| {
                term.is_empty()
                    || c.name.to_lowercase().contains(&term)
                    || c.code.to_lowercase().contains(&term)
            })
            .collect()
    }
}
