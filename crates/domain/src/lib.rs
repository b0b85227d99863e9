//! Domain layer for the Hegira event marketplace.
//!
//! This crate contains:
//! - Domain models (Event, TicketCategory, Coupon, Checkout, Order, roles)
//! - Business logic services (availability, catalog, checkout pricing,
//!   coupon and ticket management, crew, check-in, reports)
//! - The static sample data standing in for a backend
//! - Domain error types

pub mod error;
pub mod models;
pub mod sample_data;
pub mod services;

pub use error::DomainError;
