//! Single authority for what page is shown and who is logged in.
//!
//! Navigation is two-phase. [`AppController::navigate`] records a pending
//! target under a fresh generation number; [`AppController::commit_navigation`]
//! applies it only if no newer navigation was requested in between. The
//! [`crate::shell::AppShell`] drives the delay between the two.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use domain::models::{
    AuthRole, BusinessListing, BuyerPrefill, Checkout, Coupon, CouponDraft, CrewDraft, CrewMember,
    Event, NameContext, Order, Session, TicketCategory, Transaction, TransactionForm, UserRole,
};
use domain::sample_data::{self, DASHBOARD_EVENT_ID};
use domain::services::{
    self, CouponBook, CouponUsageRow, CrewRoster, DateWindow, EventCatalog, EventQuery,
    TicketDraft, TicketSalesReport, TicketSelection,
};
use domain::DomainError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::pagination::PageSlice;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppError, AuthError};
use crate::flows::{
    AuthFlow, Cleanup, ConfirmationFlow, ConfirmationPrompt, OtpContext, PendingConfirmation,
    RoleSwitchFlow,
};
use crate::routes::{Page, Route};
use crate::storage::{load_json, store_json, MemoryStorage, SessionStorage, StorageKeys};
use crate::verifier::{CodeVerifier, DemoVerifier};

/// Record carried along with a navigation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NavPayload {
    #[default]
    None,
    Event(Box<Event>),
    Checkout(Box<Checkout>),
    Business(BusinessListing),
}

impl NavPayload {
    pub fn event(event: Event) -> Self {
        NavPayload::Event(Box::new(event))
    }

    pub fn checkout(checkout: Checkout) -> Self {
        NavPayload::Checkout(Box::new(checkout))
    }
}

/// Where to go once the user has signed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Redirect {
    pub page: Page,
    pub payload: NavPayload,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingNavigation {
    pub generation: u64,
    pub page: Page,
    pub payload: NavPayload,
}

/// Navbar and footer visibility for the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub show_navbar: bool,
    pub show_footer: bool,
    pub show_help_button: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardKind {
    /// Ticketing dashboard for creators and visitors.
    Events,
    /// Business matching dashboard for organizations.
    BusinessMatching,
}

pub struct AppController {
    config: Config,
    keys: StorageKeys,
    storage: Box<dyn SessionStorage>,
    verifier: Box<dyn CodeVerifier>,

    current_page: Page,
    current_path: String,
    history: Vec<String>,
    generation: u64,
    pending: Option<PendingNavigation>,

    catalog: EventCatalog,
    business_listings: Vec<BusinessListing>,
    coupon_books: HashMap<i64, CouponBook>,
    crew: CrewRoster,
    orders: Vec<Order>,
    selected_event: Option<Event>,
    selected_business: Option<BusinessListing>,
    event_being_edited: Option<Event>,
    checkout: Option<Checkout>,
    transaction: Option<Transaction>,

    session: Option<Session>,
    auth: AuthFlow,
    confirmation: ConfirmationFlow,
    role_switch: RoleSwitchFlow,
    post_login_redirect: Option<Redirect>,
}

impl AppController {
    pub fn new(
        config: Config,
        storage: Box<dyn SessionStorage>,
        verifier: Box<dyn CodeVerifier>,
    ) -> Self {
        Self {
            keys: StorageKeys::new(config.storage.key_prefix.clone()),
            config,
            storage,
            verifier,
            current_page: Page::Landing,
            current_path: Page::Landing.path(None),
            history: Vec::new(),
            generation: 0,
            pending: None,
            catalog: EventCatalog::new(sample_data::sample_events()),
            business_listings: sample_data::sample_business_listings(),
            coupon_books: HashMap::from([(
                DASHBOARD_EVENT_ID,
                CouponBook::new(DASHBOARD_EVENT_ID, sample_data::sample_coupons()),
            )]),
            crew: CrewRoster::default(),
            orders: sample_data::sample_orders(),
            selected_event: None,
            selected_business: None,
            event_being_edited: None,
            checkout: None,
            transaction: None,
            session: None,
            auth: AuthFlow::Closed,
            confirmation: ConfirmationFlow::Idle,
            role_switch: RoleSwitchFlow::Closed,
            post_login_redirect: None,
        }
    }

    /// Controller over sample data with in-memory storage and the demo verifier.
    pub fn with_config(config: Config) -> Self {
        let storage = match config.storage.quota_bytes {
            Some(quota) => MemoryStorage::with_quota(quota),
            None => MemoryStorage::new(),
        };
        let verifier = DemoVerifier::new(
            config.auth.otp_length,
            config.auth.organization_code_length,
        );
        Self::new(config, Box::new(storage), Box::new(verifier))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Requests a transition to `page`. Supersedes any pending navigation.
    pub fn navigate(&mut self, page: Page, payload: NavPayload) -> u64 {
        self.generation += 1;
        debug!(page = %page, generation = self.generation, "Navigation requested");
        self.pending = Some(PendingNavigation {
            generation: self.generation,
            page,
            payload,
        });
        self.generation
    }

    pub fn navigate_to(&mut self, page: Page) -> u64 {
        self.navigate(page, NavPayload::None)
    }

    pub fn pending_generation(&self) -> Option<u64> {
        self.pending.as_ref().map(|p| p.generation)
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn loading_message(&self) -> Option<String> {
        self.pending.as_ref().map(|p| p.page.loading_message())
    }

    /// Applies the pending navigation if it is still `generation`.
    ///
    /// Returns the page actually shown, which differs from the requested one
    /// when its required state is missing.
    pub fn commit_navigation(&mut self, generation: u64) -> Option<Page> {
        match self.pending.take() {
            Some(pending) if pending.generation == generation => {
                Some(self.apply_navigation(pending.page, pending.payload))
            }
            other => {
                debug!(generation, "Discarding superseded navigation");
                self.pending = other;
                None
            }
        }
    }

    /// Commits whatever is pending right away.
    pub fn flush_navigation(&mut self) -> Option<Page> {
        let generation = self.pending_generation()?;
        self.commit_navigation(generation)
    }

    fn apply_navigation(&mut self, page: Page, payload: NavPayload) -> Page {
        if page == Page::CreatorAuth && !matches!(self.auth, AuthFlow::OtpPage { .. }) {
            self.auth = AuthFlow::CreatorAuth;
        }

        let key = self.take_payload(page, payload);

        if !page.keeps_auth_open() {
            self.auth = AuthFlow::Closed;
        }

        let shown = self.guard(page);
        let path = if shown == page {
            page.path(key.as_deref())
        } else {
            shown.path(None)
        };

        if shown != page {
            info!(requested = %page, shown = %shown, "Required state missing, redirecting");
        }
        self.current_page = shown;
        self.current_path = path.clone();
        self.history.push(path);
        info!(page = %shown, path = %self.current_path, "Navigated");
        shown
    }

    /// Stores the carried record in memory and session storage.
    /// Returns the route key for detail paths.
    fn take_payload(&mut self, page: Page, payload: NavPayload) -> Option<String> {
        match (page, payload) {
            (Page::EventDetail, NavPayload::Event(event)) => {
                let key = event.route_key();
                self.persist(&self.keys.event(&key), event.as_ref());
                self.selected_event = Some(*event);
                Some(key)
            }
            (Page::CreateEventInfo, NavPayload::Event(event)) => {
                let key = event.route_key();
                self.persist(&self.keys.event(&key), event.as_ref());
                self.event_being_edited = Some(*event);
                Some(key)
            }
            (Page::Checkout, NavPayload::Checkout(checkout)) => {
                self.persist(&self.keys.checkout(), checkout.as_ref());
                self.checkout = Some(*checkout);
                None
            }
            (Page::BusinessDetail, NavPayload::Business(listing)) => {
                let key = listing.route_key();
                self.persist(&self.keys.business(&key), &listing);
                self.selected_business = Some(listing);
                Some(key)
            }
            (Page::TransactionSuccess | Page::TicketDisplay, _) => {
                if let Some(transaction) = self.transaction.clone() {
                    self.persist(&self.keys.transaction(), &transaction);
                }
                None
            }
            (_, NavPayload::None) => None,
            (page, _) => {
                debug!(page = %page, "Ignoring payload this page does not use");
                None
            }
        }
    }

    fn persist<T: Serialize>(&mut self, key: &str, value: &T) {
        if let Err(e) = store_json(self.storage.as_mut(), key, value) {
            warn!(key = %key, error = %e, "Failed to persist navigation data");
        }
    }

    fn restore<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match load_json(self.storage.as_ref(), key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to restore navigation data");
                None
            }
        }
    }

    /// Page actually shown for `page` given the state at hand.
    fn guard(&self, page: Page) -> Page {
        match page {
            Page::Dashboard if self.session.is_none() => Page::Landing,
            Page::EventDetail if self.selected_event.is_none() => Page::Landing,
            Page::Checkout if self.checkout.is_none() => Page::Landing,
            Page::PaymentLoading | Page::TransactionSuccess | Page::TicketDisplay
                if self.transaction.is_none() =>
            {
                Page::Landing
            }
            Page::BusinessDetail if self.selected_business.is_none() => Page::Business,
            Page::OtpInput if !matches!(self.auth, AuthFlow::OtpPage { .. }) => Page::Landing,
            // Login and signup are modals over the landing page.
            Page::Login | Page::Signup => Page::Landing,
            page => page,
        }
    }

    /// Rebuilds state from a path after back/forward navigation.
    ///
    /// Supersedes any pending navigation. Unreadable stored records keep the
    /// in-memory state.
    pub fn restore_from_path(&mut self, path: &str) -> Page {
        self.generation += 1;
        self.pending = None;

        let route = Route::parse(path);
        match &route {
            Route::EventDetail(key) => {
                if let Some(event) = self.stored_event(key) {
                    self.selected_event = Some(event);
                }
            }
            Route::EventEdit(key) => {
                if let Some(event) = self.stored_event(key) {
                    self.event_being_edited = Some(event);
                }
            }
            Route::Checkout => {
                if let Some(checkout) = self.restore(&self.keys.checkout()) {
                    self.checkout = Some(checkout);
                }
            }
            Route::TicketDisplay | Route::TransactionSuccess => {
                if let Some(transaction) = self.restore(&self.keys.transaction()) {
                    self.transaction = Some(transaction);
                }
            }
            Route::BusinessDetail(slug) => {
                let stored: Option<BusinessListing> = self.restore(&self.keys.business(slug));
                let listing = stored.or_else(|| {
                    self.business_listings
                        .iter()
                        .find(|b| b.route_key() == *slug)
                        .cloned()
                });
                if let Some(listing) = listing {
                    self.selected_business = Some(listing);
                }
            }
            _ => {}
        }

        let page = self.guard(route.page());
        self.current_page = page;
        self.current_path = if page == route.page() {
            path.to_string()
        } else {
            page.path(None)
        };
        info!(path = %path, page = %page, "Restored from path");
        page
    }

    fn stored_event(&self, key: &str) -> Option<Event> {
        self.restore(&self.keys.event(key))
            .or_else(|| self.catalog.find_by_route_key(key).cloned())
    }

    pub fn current_page(&self) -> Page {
        self.current_page
    }

    pub fn current_path(&self) -> &str {
        &self.current_path
    }

    /// Paths pushed by committed navigations, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn layout(&self) -> Layout {
        let page = self.current_page;
        // Creator auth and the full-page OTP step cover whatever page is below.
        let full_screen = matches!(page, Page::PaymentLoading | Page::Dashboard)
            || self.auth.full_page().is_some();
        let hide_footer = full_screen
            || matches!(
                page,
                Page::EventDetail | Page::Checkout | Page::TransactionSuccess
            );

        Layout {
            show_navbar: !full_screen,
            show_footer: !hide_footer,
            show_help_button: !full_screen,
        }
    }

    pub fn dashboard_kind(&self) -> Option<DashboardKind> {
        match self.session.as_ref()?.role {
            UserRole::Organization => Some(DashboardKind::BusinessMatching),
            UserRole::Creator | UserRole::Visitor => Some(DashboardKind::Events),
        }
    }

    // ------------------------------------------------------------------
    // Confirmation-gated navigation
    // ------------------------------------------------------------------

    /// Asks before leaving. `cleanup` runs only if the user confirms.
    pub fn navigate_with_confirmation(
        &mut self,
        page: Page,
        payload: NavPayload,
        cleanup: Option<Cleanup>,
    ) {
        let prompt = if page == Page::Checkout && self.current_page == Page::PaymentLoading {
            ConfirmationPrompt::cancel_payment()
        } else {
            ConfirmationPrompt::unsaved_changes()
        };
        self.open_confirmation(prompt, page, payload, cleanup);
    }

    fn open_confirmation(
        &mut self,
        prompt: ConfirmationPrompt,
        target: Page,
        payload: NavPayload,
        cleanup: Option<Cleanup>,
    ) {
        debug!(target = %target, kind = ?prompt.kind, "Confirmation requested");
        self.confirmation = ConfirmationFlow::Open(PendingConfirmation {
            prompt,
            target,
            payload,
            cleanup,
        });
    }

    pub fn confirmation_prompt(&self) -> Option<&ConfirmationPrompt> {
        self.confirmation.prompt()
    }

    /// Runs the cleanup and navigates. `None` when nothing was awaiting confirmation.
    pub fn confirm(&mut self) -> Option<u64> {
        let ConfirmationFlow::Open(pending) = std::mem::take(&mut self.confirmation) else {
            return None;
        };
        if let Some(cleanup) = pending.cleanup {
            cleanup(self);
        }
        Some(self.navigate(pending.target, pending.payload))
    }

    pub fn cancel_confirmation(&mut self) {
        if self.confirmation.is_open() {
            debug!("Confirmation declined");
        }
        self.confirmation = ConfirmationFlow::Idle;
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.session.is_some()
    }

    pub fn auth_flow(&self) -> &AuthFlow {
        &self.auth
    }

    pub fn role_switch_flow(&self) -> RoleSwitchFlow {
        self.role_switch
    }

    pub fn post_login_redirect(&self) -> Option<&Redirect> {
        self.post_login_redirect.as_ref()
    }

    /// Opens sign-in, at role selection unless `role` is known.
    /// Any previous redirect is replaced by `redirect`.
    pub fn open_auth(&mut self, role: Option<AuthRole>, redirect: Option<Redirect>) {
        self.post_login_redirect = redirect;
        match role {
            Some(role) => self.select_auth_role(role),
            None => self.auth = AuthFlow::SelectingRole,
        }
    }

    /// Creators get the full-page flow, everyone else the login modal.
    pub fn select_auth_role(&mut self, role: AuthRole) {
        debug!(role = %role, "Auth role selected");
        if role == AuthRole::EventCreator {
            self.auth = AuthFlow::CreatorAuth;
            self.navigate_to(Page::CreatorAuth);
        } else {
            self.auth = AuthFlow::Login { role };
        }
    }

    pub fn switch_to_signup(&mut self) -> Result<(), AuthError> {
        match self.auth {
            AuthFlow::Login { role } | AuthFlow::Signup { role } => {
                self.auth = AuthFlow::Signup { role };
                Ok(())
            }
            _ => Err(AuthError::NoActiveRole),
        }
    }

    pub fn switch_to_login(&mut self) -> Result<(), AuthError> {
        match self.auth {
            AuthFlow::Login { role } | AuthFlow::Signup { role } => {
                self.auth = AuthFlow::Login { role };
                Ok(())
            }
            _ => Err(AuthError::NoActiveRole),
        }
    }

    /// Login modal accepted the credentials.
    pub fn login_success(&mut self, email: Option<String>) -> Result<u64, AuthError> {
        let AuthFlow::Login { role } = self.auth else {
            return Err(AuthError::NoActiveRole);
        };
        Ok(self.sign_in(role.into(), None, email, NameContext::Verified))
    }

    /// Full-page creator login accepted the credentials.
    pub fn creator_login_success(&mut self, name: Option<String>) -> Result<u64, AuthError> {
        if self.auth != AuthFlow::CreatorAuth {
            return Err(AuthError::NoActiveRole);
        }
        Ok(self.sign_in(UserRole::Creator, name, None, NameContext::Login))
    }

    /// Signup accepted. Visitors verify in a modal, others on a full page.
    pub fn signup_success(&mut self, email: &str, name: Option<String>) -> Result<(), AuthError> {
        let role = match &self.auth {
            AuthFlow::Signup { role } | AuthFlow::Login { role } => *role,
            AuthFlow::CreatorAuth => AuthRole::EventCreator,
            _ => return Err(AuthError::NoActiveRole),
        };
        let context = OtpContext {
            email: email.trim().to_string(),
            name: name.filter(|n| !n.trim().is_empty()),
        };
        info!(role = %role, email = %context.email, "Signup accepted, awaiting OTP");

        self.auth = if role == AuthRole::EventVisitor {
            AuthFlow::OtpModal(context)
        } else {
            AuthFlow::OtpPage { role, context }
        };
        Ok(())
    }

    /// Checks the OTP and signs in with the role of the active step.
    pub fn verify_otp(&mut self, code: &str) -> Result<u64, AuthError> {
        let (role, context) = match &self.auth {
            AuthFlow::OtpModal(context) => (AuthRole::EventVisitor, context.clone()),
            AuthFlow::OtpPage { role, context } => (*role, context.clone()),
            _ => return Err(AuthError::NoPendingVerification),
        };
        if !self.verifier.verify_otp(&context.email, code) {
            warn!(email = %context.email, "OTP rejected");
            return Err(AuthError::InvalidCode);
        }
        Ok(self.sign_in(
            role.into(),
            context.name,
            Some(context.email),
            NameContext::Verified,
        ))
    }

    /// Returns the address the code is resent to.
    pub fn resend_otp(&self) -> Result<&str, AuthError> {
        let context = self
            .auth
            .otp_context()
            .ok_or(AuthError::NoPendingVerification)?;
        info!(email = %context.email, "Resending OTP");
        Ok(&context.email)
    }

    /// Leaves verification to enter a different email.
    pub fn change_otp_email(&mut self) -> Result<(), AuthError> {
        self.auth = match self.auth {
            AuthFlow::OtpModal(_) => AuthFlow::Signup {
                role: AuthRole::EventVisitor,
            },
            AuthFlow::OtpPage { .. } => AuthFlow::CreatorAuth,
            _ => return Err(AuthError::NoPendingVerification),
        };
        Ok(())
    }

    /// Closes every auth and role-switch modal and returns to landing.
    pub fn close_auth_flow(&mut self) -> u64 {
        self.auth = AuthFlow::Closed;
        self.role_switch = RoleSwitchFlow::Closed;
        self.post_login_redirect = None;
        self.navigate_to(Page::Landing)
    }

    fn sign_in(
        &mut self,
        role: UserRole,
        name: Option<String>,
        email: Option<String>,
        context: NameContext,
    ) -> u64 {
        let session = Session::start(role, name, email, context);
        info!(role = %role, name = %session.display_name, "Signed in");
        self.session = Some(session);
        self.auth = AuthFlow::Closed;

        match self.post_login_redirect.take() {
            Some(redirect) => self.navigate(redirect.page, redirect.payload),
            None if role.uses_dashboard() => self.navigate_to(Page::Dashboard),
            None => self.navigate_to(Page::Landing),
        }
    }

    /// Asks for confirmation, then clears the session and returns to landing.
    pub fn logout(&mut self) -> Result<(), AuthError> {
        if self.session.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        self.open_confirmation(
            ConfirmationPrompt::logout(),
            Page::Landing,
            NavPayload::None,
            Some(Box::new(|controller: &mut AppController| controller.clear_session())),
        );
        Ok(())
    }

    fn clear_session(&mut self) {
        info!("Signed out");
        self.session = None;
        self.auth = AuthFlow::Closed;
        self.role_switch = RoleSwitchFlow::Closed;
    }

    pub fn open_role_switch(&mut self) -> Result<(), AuthError> {
        if self.session.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        self.role_switch = RoleSwitchFlow::Choosing;
        Ok(())
    }

    pub fn close_role_switch(&mut self) {
        self.role_switch = RoleSwitchFlow::Closed;
    }

    /// Switches immediately, except to an organization which needs a code first.
    /// Returns the navigation generation when the switch committed.
    pub fn switch_role(&mut self, role: UserRole) -> Result<Option<u64>, AuthError> {
        if self.session.is_none() {
            return Err(AuthError::NotAuthenticated);
        }
        if role == UserRole::Organization {
            self.role_switch = RoleSwitchFlow::VerifyingOrganization;
            return Ok(None);
        }
        self.role_switch = RoleSwitchFlow::Closed;
        Ok(Some(self.commit_role_switch(role)))
    }

    pub fn verify_organization(&mut self, code: &str) -> Result<u64, AuthError> {
        if self.role_switch != RoleSwitchFlow::VerifyingOrganization {
            return Err(AuthError::NoPendingVerification);
        }
        if !self.verifier.verify_organization_code(code) {
            warn!("Organization code rejected");
            return Err(AuthError::InvalidCode);
        }
        self.role_switch = RoleSwitchFlow::Closed;
        Ok(self.commit_role_switch(UserRole::Organization))
    }

    pub fn close_organization_verification(&mut self) {
        if self.role_switch == RoleSwitchFlow::VerifyingOrganization {
            self.role_switch = RoleSwitchFlow::Closed;
        }
    }

    fn commit_role_switch(&mut self, role: UserRole) -> u64 {
        let email = self.session.as_ref().map(|s| s.email.clone());
        self.sign_in(role, None, email, NameContext::RoleSwitch)
    }

    // ------------------------------------------------------------------
    // Catalog
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }

    pub fn hero_events(&self) -> &[Event] {
        self.catalog.hero(self.config.catalog.hero_count)
    }

    pub fn featured_events(&self) -> &[Event] {
        self.catalog.featured(self.config.catalog.featured_count)
    }

    pub fn search_events(&self, query: &EventQuery) -> PageSlice<Event> {
        self.catalog.search(query, self.config.catalog.events_per_page)
    }

    pub fn business_listings(&self) -> &[BusinessListing] {
        &self.business_listings
    }

    pub fn add_event(&mut self, event: Event) {
        self.catalog.add(event);
    }

    /// Replaces the stored event and refreshes the selected and edited copies.
    pub fn update_event(&mut self, event: Event) -> Result<(), AppError> {
        self.catalog.update(event.clone())?;
        if self.selected_event.as_ref().map(|e| e.id) == Some(event.id) {
            self.selected_event = Some(event.clone());
        }
        if self.event_being_edited.as_ref().map(|e| e.id) == Some(event.id) {
            self.event_being_edited = Some(event);
        }
        Ok(())
    }

    pub fn set_event_for_editing(&mut self, event: Option<Event>) {
        self.event_being_edited = event;
    }

    pub fn event_being_edited(&self) -> Option<&Event> {
        self.event_being_edited.as_ref()
    }

    pub fn selected_event(&self) -> Option<&Event> {
        self.selected_event.as_ref()
    }

    pub fn selected_business(&self) -> Option<&BusinessListing> {
        self.selected_business.as_ref()
    }

    /// Opens the detail page of the event with slug or id `key`.
    pub fn open_event(&mut self, key: &str) -> Result<u64, AppError> {
        let event = self
            .catalog
            .find_by_route_key(key)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("event {}", key)))?;
        Ok(self.navigate(Page::EventDetail, NavPayload::event(event)))
    }

    pub fn open_business(&mut self, key: &str) -> Result<u64, AppError> {
        let listing = self
            .business_listings
            .iter()
            .find(|b| b.route_key() == key)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("business {}", key)))?;
        Ok(self.navigate(Page::BusinessDetail, NavPayload::Business(listing)))
    }

    // ------------------------------------------------------------------
    // Checkout
    // ------------------------------------------------------------------

    pub fn checkout(&self) -> Option<&Checkout> {
        self.checkout.as_ref()
    }

    pub fn transaction(&self) -> Option<&Transaction> {
        self.transaction.as_ref()
    }

    /// Builds a checkout for the selected event and heads to the checkout page.
    pub fn start_checkout(&mut self, selections: &[TicketSelection]) -> Result<u64, AppError> {
        let event = self
            .selected_event
            .as_ref()
            .ok_or_else(|| DomainError::NotFound("selected event".to_string()))?;
        let checkout = services::build_checkout(event, selections)?;
        Ok(self.navigate(Page::Checkout, NavPayload::checkout(checkout)))
    }

    pub fn apply_coupon(&mut self, code: &str, today: NaiveDate) -> Result<&Checkout, AppError> {
        let current = self
            .checkout
            .as_ref()
            .ok_or_else(|| DomainError::NotFound("checkout".to_string()))?;
        let event_id = current.event.id;
        let empty;
        let book = match self.coupon_books.get(&event_id) {
            Some(book) => book,
            None => {
                empty = CouponBook::new(event_id, Vec::new());
                &empty
            }
        };
        let applied = services::apply_coupon(current, book, &self.orders, code, today)?;
        Ok(self.checkout.insert(applied))
    }

    pub fn remove_coupon(&mut self) {
        if let Some(checkout) = self.checkout.as_mut() {
            *checkout = services::remove_coupon(checkout);
        }
    }

    /// Opens sign-in from checkout, coming back to the same cart afterwards.
    pub fn request_checkout_login(&mut self, role: Option<AuthRole>) {
        let payload = self
            .checkout
            .clone()
            .map(NavPayload::checkout)
            .unwrap_or_default();
        self.open_auth(
            role,
            Some(Redirect {
                page: Page::Checkout,
                payload,
            }),
        );
    }

    pub fn buyer_prefill(&self) -> Option<BuyerPrefill> {
        self.session.as_ref().map(|s| BuyerPrefill {
            full_name: s.display_name.clone(),
            email: s.email.clone(),
        })
    }

    /// Validates the buyer form, records the transaction and shows the payment screen.
    pub fn process_payment(
        &mut self,
        form: TransactionForm,
        checkout: &Checkout,
    ) -> Result<u64, AppError> {
        let transaction = services::create_transaction(checkout, form, Utc::now())?;
        self.transaction = Some(transaction);
        Ok(self.navigate_to(Page::PaymentLoading))
    }

    pub fn complete_payment(&mut self) -> Result<u64, AppError> {
        if self.transaction.is_none() {
            return Err(DomainError::NotFound("transaction".to_string()).into());
        }
        Ok(self.navigate_to(Page::TransactionSuccess))
    }

    /// Shows the e-tickets of the completed transaction.
    pub fn view_tickets(&mut self) -> Result<u64, AppError> {
        if self.transaction.is_none() {
            return Err(DomainError::NotFound("transaction".to_string()).into());
        }
        Ok(self.navigate_to(Page::TicketDisplay))
    }

    /// Asks before abandoning the payment screen for the checkout page.
    pub fn cancel_payment(&mut self) -> Result<(), AppError> {
        let checkout = self
            .transaction
            .as_ref()
            .map(|t| t.checkout.clone())
            .ok_or_else(|| DomainError::NotFound("transaction".to_string()))?;
        self.navigate_with_confirmation(Page::Checkout, NavPayload::checkout(checkout), None);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    fn managed_event(&self, event_id: i64) -> Result<&Event, AppError> {
        self.catalog
            .get(event_id)
            .ok_or_else(|| DomainError::NotFound(format!("event {}", event_id)).into())
    }

    /// Coupons authored for `event_id`; empty when none were ever saved.
    pub fn coupons(&self, event_id: i64) -> &[Coupon] {
        self.coupon_books
            .get(&event_id)
            .map(CouponBook::coupons)
            .unwrap_or_default()
    }

    /// Creates or edits a coupon of `event_id`. Saved codes are redeemable at checkout.
    pub fn save_coupon(&mut self, event_id: i64, draft: CouponDraft) -> Result<&Coupon, AppError> {
        self.managed_event(event_id)?;
        let book = self
            .coupon_books
            .entry(event_id)
            .or_insert_with(|| CouponBook::new(event_id, Vec::new()));
        Ok(book.save(draft)?)
    }

    pub fn delete_coupon(&mut self, event_id: i64, coupon_id: &str) -> Result<Coupon, AppError> {
        let book = self
            .coupon_books
            .get_mut(&event_id)
            .ok_or_else(|| DomainError::NotFound(format!("coupon {}", coupon_id)))?;
        Ok(book.delete(coupon_id)?)
    }

    /// Creates or edits a ticket category and writes the event back to the catalog.
    pub fn save_ticket(
        &mut self,
        event_id: i64,
        draft: TicketDraft,
    ) -> Result<TicketCategory, AppError> {
        let mut event = self.managed_event(event_id)?.clone();
        let category = services::save_ticket(&mut event, draft)?;
        self.update_event(event)?;
        Ok(category)
    }

    pub fn delete_ticket(
        &mut self,
        event_id: i64,
        ticket_id: &str,
    ) -> Result<TicketCategory, AppError> {
        let mut event = self.managed_event(event_id)?.clone();
        let removed = services::delete_ticket(&mut event, ticket_id)?;
        self.update_event(event)?;
        Ok(removed)
    }

    pub fn crew(&self, event_id: i64) -> Vec<&CrewMember> {
        self.crew.for_event(event_id)
    }

    pub fn add_crew(&mut self, event_id: i64, draft: CrewDraft) -> Result<&CrewMember, AppError> {
        let event = self
            .catalog
            .get(event_id)
            .ok_or_else(|| DomainError::NotFound(format!("event {}", event_id)))?;
        Ok(self.crew.add(event, draft)?)
    }

    pub fn remove_crew(&mut self, crew_id: &str) -> Result<CrewMember, AppError> {
        Ok(self.crew.remove(crew_id)?)
    }

    pub fn ticket_sales_report(&self, event_id: i64, search: Option<&str>) -> TicketSalesReport {
        services::ticket_sales_report(&self.orders, event_id, search)
    }

    pub fn coupon_usage_report(
        &self,
        event_id: i64,
        window: DateWindow,
        search: Option<&str>,
    ) -> Vec<CouponUsageRow> {
        services::coupon_usage_report(&self.orders, event_id, window, search)
    }
}

impl Default for AppController {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DisabledStorage;

    fn controller() -> AppController {
        AppController::default()
    }

    fn go(c: &mut AppController, page: Page, payload: NavPayload) -> Option<Page> {
        c.navigate(page, payload);
        c.flush_navigation()
    }

    fn event(c: &AppController, id: i64) -> Event {
        c.catalog().get(id).cloned().unwrap()
    }

    #[test]
    fn test_starts_on_landing() {
        let c = controller();
        assert_eq!(c.current_page(), Page::Landing);
        assert_eq!(c.current_path(), "/");
        assert!(!c.is_loading());
    }

    #[test]
    fn test_last_navigation_wins() {
        let mut c = controller();
        let first = c.navigate_to(Page::Events);
        let second = c.navigate_to(Page::Help);

        assert_eq!(c.loading_message().as_deref(), Some("Menuju help..."));
        assert_eq!(c.commit_navigation(first), None);
        assert_eq!(c.commit_navigation(second), Some(Page::Help));
        assert_eq!(c.current_page(), Page::Help);
        assert_eq!(c.history(), ["/help".to_string()]);
    }

    #[test]
    fn test_event_detail_persists_and_encodes() {
        let mut c = controller();
        let e = event(&c, 1);
        assert_eq!(go(&mut c, Page::EventDetail, NavPayload::event(e.clone())), Some(Page::EventDetail));
        assert_eq!(c.current_path(), "/events/detail/local-soundscape-depok");
        assert_eq!(c.selected_event(), Some(&e));
    }

    #[test]
    fn test_missing_state_redirects() {
        let mut c = controller();
        assert_eq!(go(&mut c, Page::Checkout, NavPayload::None), Some(Page::Landing));
        assert_eq!(c.current_path(), "/");
        assert_eq!(go(&mut c, Page::Dashboard, NavPayload::None), Some(Page::Landing));
        assert_eq!(go(&mut c, Page::EventDetail, NavPayload::None), Some(Page::Landing));
        assert_eq!(go(&mut c, Page::TicketDisplay, NavPayload::None), Some(Page::Landing));
        assert_eq!(go(&mut c, Page::OtpInput, NavPayload::None), Some(Page::Landing));
        assert_eq!(go(&mut c, Page::BusinessDetail, NavPayload::None), Some(Page::Business));
    }

    #[test]
    fn test_storage_failure_does_not_block_navigation() {
        let mut c = AppController::new(
            Config::default(),
            Box::new(DisabledStorage),
            Box::new(DemoVerifier::default()),
        );
        let e = event(&c, 2);
        assert_eq!(go(&mut c, Page::EventDetail, NavPayload::event(e)), Some(Page::EventDetail));
        assert_eq!(c.selected_event().map(|e| e.id), Some(2));
    }

    #[test]
    fn test_navigation_closes_auth_modals() {
        let mut c = controller();
        c.open_auth(None, None);
        assert_eq!(c.auth_flow(), &AuthFlow::SelectingRole);
        go(&mut c, Page::Events, NavPayload::None);
        assert_eq!(c.auth_flow(), &AuthFlow::Closed);
    }

    #[test]
    fn test_layout() {
        let mut c = controller();
        assert_eq!(
            c.layout(),
            Layout {
                show_navbar: true,
                show_footer: true,
                show_help_button: true
            }
        );

        let e = event(&c, 1);
        go(&mut c, Page::EventDetail, NavPayload::event(e));
        let layout = c.layout();
        assert!(layout.show_navbar);
        assert!(!layout.show_footer);

        c.select_auth_role(AuthRole::EventCreator);
        c.flush_navigation();
        assert_eq!(c.current_page(), Page::CreatorAuth);
        let layout = c.layout();
        assert!(!layout.show_navbar);
        assert!(!layout.show_footer);
    }

    #[test]
    fn test_confirmation_wording() {
        let mut c = controller();
        c.navigate_with_confirmation(Page::Landing, NavPayload::None, None);
        assert_eq!(
            c.confirmation_prompt().map(|p| p.title),
            Some("Konfirmasi Navigasi")
        );
        c.cancel_confirmation();
        assert!(c.confirmation_prompt().is_none());
        assert!(!c.is_loading());
    }

    #[test]
    fn test_confirm_runs_cleanup_then_navigates() {
        let mut c = controller();
        let e = event(&c, 1);
        c.navigate_with_confirmation(
            Page::Events,
            NavPayload::None,
            Some(Box::new(move |c: &mut AppController| {
                c.set_event_for_editing(Some(e));
            })),
        );
        let generation = c.confirm().unwrap();
        assert_eq!(c.event_being_edited().map(|e| e.id), Some(1));
        assert_eq!(c.commit_navigation(generation), Some(Page::Events));
        assert_eq!(c.confirm(), None);
    }

    #[test]
    fn test_logout_requires_session() {
        let mut c = controller();
        assert_eq!(c.logout(), Err(AuthError::NotAuthenticated));
    }

    #[test]
    fn test_update_event_refreshes_selection() {
        let mut c = controller();
        let mut e = event(&c, 1);
        go(&mut c, Page::EventDetail, NavPayload::event(e.clone()));
        c.set_event_for_editing(Some(e.clone()));

        e.name = "Local Soundscape Vol. 2".into();
        c.update_event(e).unwrap();
        assert_eq!(c.selected_event().unwrap().name, "Local Soundscape Vol. 2");
        assert_eq!(c.event_being_edited().unwrap().name, "Local Soundscape Vol. 2");
        assert_eq!(c.catalog().get(1).unwrap().name, "Local Soundscape Vol. 2");
    }

    #[test]
    fn test_hero_and_featured_follow_config() {
        let c = controller();
        assert_eq!(c.hero_events().len(), 3);
        assert_eq!(c.featured_events().len(), 6);
    }

    #[test]
    fn test_open_event_by_slug_or_id() {
        let mut c = controller();
        c.open_event("101").unwrap();
        assert_eq!(c.flush_navigation(), Some(Page::EventDetail));
        assert_eq!(c.current_path(), "/events/detail/jakarta-culinary-expo-2025");
        assert!(matches!(
            c.open_event("tidak-ada"),
            Err(AppError::Domain(DomainError::NotFound(_)))
        ));
    }

    #[test]
    fn test_editing_path_round_trips() {
        let mut c = controller();
        let e = event(&c, 101);
        go(&mut c, Page::CreateEventInfo, NavPayload::event(e));
        assert_eq!(c.current_path(), "/events/edit/jakarta-culinary-expo-2025");

        c.set_event_for_editing(None);
        assert_eq!(
            c.restore_from_path("/events/edit/jakarta-culinary-expo-2025"),
            Page::CreateEventInfo
        );
        assert_eq!(c.event_being_edited().map(|e| e.id), Some(101));
    }
}
