//! Shared domain types for the Lockopener client.
//!
//! Everything here is plain data plus pure functions: no I/O, no clock reads.
//! The root `lockopener` crate layers storage, HTTP and presentation on top.

pub mod elapsed;
pub mod order;

pub use elapsed::{elapsed_seconds, format_elapsed, format_seconds};
pub use order::{Address, Consent, Customer, LocalOrder, Order, OrderStatus, short_number};
