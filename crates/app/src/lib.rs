pub mod check_in_desk;
pub mod config;
pub mod controller;
pub mod error;
pub mod flows;
pub mod logging;
pub mod routes;
pub mod shell;
pub mod storage;
pub mod verifier;
