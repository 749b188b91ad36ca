//! Plain-text rendering of views for the terminal.
//!
//! Everything here returns a `String` so commands can print it and tests can
//! inspect it (after stripping ANSI codes).

use chrono::{DateTime, Local, Utc};
use console::style;
use lockopener_common::{Order, OrderStatus, format_elapsed};

use crate::api::OrderList;
use crate::i18n::Messages;
use crate::ui::icons::{CLOCK, INBOX, LINK, PERSON, PHONE, PIN, SPARKLE};
use crate::views::{AdminBoard, OrderDetail, SuccessPage, TrackedOrderRow, format_phone, map_url};

pub fn status_label(status: OrderStatus) -> String {
    let text = status.as_str();
    match status {
        OrderStatus::Done => style(text).green().to_string(),
        OrderStatus::Cancelled => style(text).red().to_string(),
        OrderStatus::InProgress | OrderStatus::Assigned => style(text).yellow().to_string(),
        _ => style(text).cyan().to_string(),
    }
}

fn local_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn tracked_orders(rows: &[TrackedOrderRow], messages: &Messages) -> String {
    if rows.is_empty() {
        return format!("{}{}\n", INBOX, style(messages.no_tracked_orders).dim());
    }
    let mut out = String::new();
    for row in rows {
        out.push_str(&format!(
            "{} {}\n   {}{}\n   {}{}\n",
            style(&row.title).bold(),
            style(lockopener_common::short_number(&row.record.id)).dim(),
            CLOCK,
            row.elapsed,
            LINK,
            row.tracking_path(),
        ));
    }
    out
}

pub fn success_page(page: &SuccessPage, messages: &Messages) -> String {
    format!(
        "{}{} {}\n",
        SPARKLE,
        style(messages.order_submitted).green().bold(),
        style(&page.number).bold()
    )
}

pub fn order_detail(detail: &OrderDetail, now: DateTime<Utc>) -> String {
    let order = &detail.order;
    let mut out = format!(
        "{} {}\n   {}{}\n   {}{}\n   {}{}, {}\n   {}{} ({})\n",
        style(detail.number()).bold(),
        status_label(order.status),
        PERSON,
        order.client.name,
        PHONE,
        order.client.phone,
        PIN,
        order.address.street,
        order.address.city,
        CLOCK,
        detail.elapsed(now),
        local_time(order.created_at),
    );
    if let Some(eta) = &order.eta {
        out.push_str(&format!("   ETA: {}\n", eta));
    }
    if let Some(price) = order.final_price {
        out.push_str(&format!("   {:.2} PLN\n", price));
    }
    out
}

/// One order card on the staff board.
pub fn admin_card(order: &Order, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "{} {} {}\n   {}{}\n   {}{}\n   {}{}, {}\n   {}\n",
        style(order.number()).bold(),
        status_label(order.status),
        style(&order.id).dim(),
        PERSON,
        order.client.name,
        PHONE,
        format_phone(&order.client.phone),
        PIN,
        order.address.street,
        order.address.city,
        style(map_url(&order.address.street, &order.address.city)).dim().underlined(),
    );
    out.push_str(&format!(
        "   {}{}\n",
        CLOCK,
        format_elapsed(order.created_at, now)
    ));
    if let Some(tech) = &order.technician {
        out.push_str(&format!("   tech: {}\n", tech));
    }
    out
}

pub fn admin_board(board: &AdminBoard, now: DateTime<Utc>, messages: &Messages) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} ({})\n",
        style(messages.active_orders).bold().underlined(),
        board.active.len()
    ));
    if board.active.is_empty() {
        out.push_str(&format!("   {}{}\n", INBOX, style(messages.no_active_orders).dim()));
    }
    for order in &board.active {
        out.push_str(&admin_card(order, now));
    }
    out.push('\n');
    out.push_str(&format!(
        "{} ({})\n",
        style(messages.completed_orders).bold().underlined(),
        board.completed.len()
    ));
    if board.completed.is_empty() {
        out.push_str(&format!(
            "   {}{}\n",
            INBOX,
            style(messages.no_completed_orders).dim()
        ));
    }
    for order in &board.completed {
        out.push_str(&admin_card(order, now));
    }
    out
}

/// Result page of the admin listing; the count shows `shown/total` when
/// the backend reports a total.
pub fn order_list(list: &OrderList, now: DateTime<Utc>, messages: &Messages) -> String {
    let count = match list.total {
        Some(total) => format!("{}/{}", list.orders.len(), total),
        None => list.orders.len().to_string(),
    };
    let mut out = format!("{} ({})\n", style(messages.orders).bold().underlined(), count);
    if list.orders.is_empty() {
        out.push_str(&format!("   {}{}\n", INBOX, style(messages.no_orders).dim()));
    }
    for order in &list.orders {
        out.push_str(&admin_card(order, now));
    }
    out
}
