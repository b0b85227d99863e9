//! Shared utilities for the Hegira marketplace client.
//!
//! This crate provides common functionality used by the domain and app crates:
//! - Indonesian date, time and currency formatting
//! - Identifier generation for drafts and transactions
//! - Common validation rules
//! - Page-number pagination
//! - CSV report rendering

pub mod csv;
pub mod format;
pub mod ids;
pub mod pagination;
pub mod validation;
