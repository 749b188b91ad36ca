//! View models for the customer and staff screens.
//!
//! Each view loads its data through [`ApiClient`](crate::api::ApiClient) and
//! the local registry, and returns plain data for the CLI to render.

pub mod admin;
pub mod landing;
pub mod order_form;
pub mod order_success;
pub mod order_view;

pub use admin::{AdminBoard, AdminSession, AuthState, format_phone, map_url};
pub use landing::{TrackedOrderRow, TrackedOrders};
pub use order_form::submit_order;
pub use order_success::{OrderSuccess, SuccessPage};
pub use order_view::{OrderDetail, load_order_detail, load_public_status};

/// Where a view sends the user next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    OrderSuccess { order_id: String, view_token: String },
}
