//! Domain error types.

use thiserror::Error;
use validator::ValidationErrors;

/// Why a coupon code could not be redeemed against a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponRejection {
    #[error("Kode kupon tidak ditemukan.")]
    UnknownCode,

    #[error("Kupon belum berlaku.")]
    NotYetValid,

    #[error("Kupon sudah kedaluwarsa.")]
    Expired,

    #[error("Kuota kupon sudah habis.")]
    QuotaExhausted,

    #[error("Minimum pembelian untuk kupon ini adalah {0}.")]
    BelowMinimumPurchase(String),

    #[error("Kupon tidak berlaku untuk tiket yang dipilih.")]
    NotApplicable,
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Only {remaining} tickets left for {category}")]
    InsufficientTickets { category: String, remaining: u32 },

    #[error("Invalid quantity for {0}")]
    InvalidQuantity(String),

    #[error("No tickets selected")]
    EmptySelection,

    #[error("Coupon rejected: {0}")]
    CouponRejected(#[from] CouponRejection),
}

impl DomainError {
    /// Field-keyed messages for inline form errors. Empty for non-validation errors.
    pub fn field_messages(&self) -> Vec<(String, String)> {
        match self {
            DomainError::Validation(errors) => field_messages(errors),
            _ => Vec::new(),
        }
    }
}

/// Flattens `ValidationErrors` into `(field, message)` pairs sorted by field.
pub fn field_messages(errors: &ValidationErrors) -> Vec<(String, String)> {
    let mut messages: Vec<(String, String)> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                (
                    field.to_string(),
                    e.message.clone().map(|m| m.to_string()).unwrap_or_default(),
                )
            })
        })
        .collect();
    messages.sort();
    messages
}
