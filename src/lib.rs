//! Client library for the Lockopener locksmith ordering service.
//!
//! Customers place orders and track them locally; staff manage them through
//! the admin endpoints. The `lockopener` binary is a thin CLI over this crate.

pub mod api;
pub mod config;
pub mod errors;
pub mod forms;
pub mod i18n;
pub mod logging;
pub mod poller;
pub mod registry;
pub mod schedule;
pub mod storage;
pub mod ui;
pub mod views;

pub use lockopener_common as common;
