//! Domain services for Hegira.
//!
//! Services contain business logic that operates on domain models.

pub mod availability;
pub mod catalog;
pub mod check_in;
pub mod checkout;
pub mod coupon_book;
pub mod crew_roster;
pub mod reports;
pub mod ticket_management;

pub use availability::{availability, Availability, AvailabilityStatus};
pub use catalog::{EventCatalog, EventQuery};
pub use check_in::{normalize_ticket_id, AttendeeRoster, ScanOutcome};
pub use checkout::{
    apply_coupon, build_checkout, coupon_usage, create_transaction, remove_coupon,
    TicketSelection,
};
pub use coupon_book::CouponBook;
pub use crew_roster::CrewRoster;
pub use reports::{
    coupon_usage_csv, coupon_usage_filename, coupon_usage_report, ticket_sales_report,
    CouponUsageRow, DateWindow, TicketSalesReport, TicketSalesRow,
};
pub use ticket_management::{
    delete_ticket, save_ticket, search_tickets, ticket_page, TicketDraft,
};
