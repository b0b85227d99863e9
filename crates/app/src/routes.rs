//! Closed set of pages and their client-side paths.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Landing,
    Events,
    Business,
    Help,
    Login,
    Signup,
    OtpInput,
    CreatorAuth,
    Dashboard,
    EventDetail,
    Checkout,
    PaymentLoading,
    TransactionSuccess,
    TicketDisplay,
    CreateEventInfo,
    ArticlesPage,
    BusinessDetail,
    Home,
}

impl Page {
    pub const ALL: [Page; 18] = [
        Page::Landing,
        Page::Events,
        Page::Business,
        Page::Help,
        Page::Login,
        Page::Signup,
        Page::OtpInput,
        Page::CreatorAuth,
        Page::Dashboard,
        Page::EventDetail,
        Page::Checkout,
        Page::PaymentLoading,
        Page::TransactionSuccess,
        Page::TicketDisplay,
        Page::CreateEventInfo,
        Page::ArticlesPage,
        Page::BusinessDetail,
        Page::Home,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Landing => "landing",
            Page::Events => "events",
            Page::Business => "business",
            Page::Help => "help",
            Page::Login => "login",
            Page::Signup => "signup",
            Page::OtpInput => "otpInput",
            Page::CreatorAuth => "creatorAuth",
            Page::Dashboard => "dashboard",
            Page::EventDetail => "eventDetail",
            Page::Checkout => "checkout",
            Page::PaymentLoading => "paymentLoading",
            Page::TransactionSuccess => "transactionSuccess",
            Page::TicketDisplay => "ticketDisplay",
            Page::CreateEventInfo => "createEventInfo",
            Page::ArticlesPage => "articlesPage",
            Page::BusinessDetail => "businessDetail",
            Page::Home => "home",
        }
    }

    /// Navigating anywhere else closes the open sign-in modals.
    pub fn keeps_auth_open(&self) -> bool {
        matches!(
            self,
            Page::Login | Page::Signup | Page::OtpInput | Page::CreatorAuth | Page::PaymentLoading
        )
    }

    /// Text shown by the full-screen loader while navigating here.
    pub fn loading_message(&self) -> String {
        match self {
            Page::Landing => "Kembali ke Beranda...".to_string(),
            page => format!("Menuju {}...", page),
        }
    }

    /// Path for this page. `key` is the slug or id of the carried record, when any.
    pub fn path(&self, key: Option<&str>) -> String {
        match (self, key) {
            (Page::EventDetail, Some(key)) => format!("/events/detail/{}", urlencoding::encode(key)),
            (Page::CreateEventInfo, Some(key)) => {
                format!("/events/edit/{}", urlencoding::encode(key))
            }
            (Page::BusinessDetail, Some(key)) => {
                format!("/business-matching/{}", urlencoding::encode(key))
            }
            (Page::Events, _) => "/events".to_string(),
            (Page::Business, _) => "/business-matching".to_string(),
            (Page::Help, _) => "/help".to_string(),
            (Page::Dashboard, _) => "/dashboard".to_string(),
            (Page::Checkout, _) => "/checkout".to_string(),
            (Page::TicketDisplay, _) => "/tickets".to_string(),
            (Page::TransactionSuccess, _) => "/tickets/success".to_string(),
            (Page::CreateEventInfo, _) => "/create-event-info".to_string(),
            (Page::ArticlesPage, _) => "/articles".to_string(),
            (Page::Home, _) => "/home".to_string(),
            _ => "/".to_string(),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Page {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("Unknown page: {}", s))
    }
}

/// A path resolved back into a page, with the storage key it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Events,
    EventDetail(String),
    EventEdit(String),
    Checkout,
    TicketDisplay,
    TransactionSuccess,
    Business,
    BusinessDetail(String),
    Help,
    Articles,
    Dashboard,
    CreateEventInfo,
    Home,
}

impl Route {
    /// Parses a path or URL path component. Unknown paths resolve to landing.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();

        if let Some(key) = tail(path, "/events/detail/") {
            return Route::EventDetail(key);
        }
        if let Some(key) = tail(path, "/events/edit/") {
            return Route::EventEdit(key);
        }
        if let Some(slug) = tail(path, "/business-matching/") {
            return Route::BusinessDetail(slug);
        }

        match path.trim_end_matches('/') {
            "" => Route::Landing,
            "/events" => Route::Events,
            "/checkout" => Route::Checkout,
            "/tickets" => Route::TicketDisplay,
            "/tickets/success" => Route::TransactionSuccess,
            "/business-matching" => Route::Business,
            "/help" => Route::Help,
            "/articles" => Route::Articles,
            "/dashboard" => Route::Dashboard,
            "/create-event-info" => Route::CreateEventInfo,
            "/home" => Route::Home,
            _ => Route::Landing,
        }
    }

    pub fn page(&self) -> Page {
        match self {
            Route::Landing => Page::Landing,
            Route::Events => Page::Events,
            Route::EventDetail(_) => Page::EventDetail,
            Route::EventEdit(_) | Route::CreateEventInfo => Page::CreateEventInfo,
            Route::Checkout => Page::Checkout,
            Route::TicketDisplay => Page::TicketDisplay,
            Route::TransactionSuccess => Page::TransactionSuccess,
            Route::Business => Page::Business,
            Route::BusinessDetail(_) => Page::BusinessDetail,
            Route::Help => Page::Help,
            Route::Articles => Page::ArticlesPage,
            Route::Dashboard => Page::Dashboard,
            Route::Home => Page::Home,
        }
    }
}

/// Decoded remainder of `path` after `prefix`, without a trailing slash.
fn tail(path: &str, prefix: &str) -> Option<String> {
    let rest = path.strip_prefix(prefix)?.trim_end_matches('/');
    if rest.is_empty() {
        return None;
    }
    let decoded = urlencoding::decode(rest)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| rest.to_string());
    Some(decoded)
}
