//! Domain models for Hegira.

pub mod attendee;
pub mod business;
pub mod checkout;
pub mod coupon;
pub mod crew;
pub mod event;
pub mod order;
pub mod session;
pub mod ticket_category;

pub use attendee::{AttendanceStatus, Attendee};
pub use business::BusinessListing;
pub use checkout::{
    AppliedCoupon, BuyerPrefill, Checkout, SelectedTicket, TicketHolder, Transaction,
    TransactionForm,
};
pub use coupon::{Coupon, CouponDraft, DiscountType};
pub use crew::{CrewDraft, CrewMember};
pub use event::{Contact, Event, EventCategory, EventStatus, Timezone};
pub use order::{Order, OrderCoupon, OrderItem, OrderStatus};
pub use session::{AuthRole, NameContext, Session, UserRole};
pub use ticket_category::{TicketCategory, TicketSchedule};
