//! User-facing messages in Polish and English.
//!
//! Only the strings the client logic itself produces live here; backend
//! messages are shown verbatim.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Pl,
    En,
}

impl Lang {
    pub fn as_str(&self) -> &'static str {
        match self {
            Lang::Pl => "pl",
            Lang::En => "en",
        }
    }

    pub fn messages(&self) -> &'static Messages {
        match self {
            Lang::Pl => &PL,
            Lang::En => &EN,
        }
    }
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pl" => Ok(Lang::Pl),
            "en" => Ok(Lang::En),
            _ => Err(format!("Unsupported language: {} (expected pl or en)", s)),
        }
    }
}

pub struct Messages {
    // Order form
    pub create_order_failed: &'static str,
    pub field_required: &'static str,
    pub phone_invalid: &'static str,
    pub gdpr_required: &'static str,
    pub order_submitted: &'static str,

    // Order success / detail
    pub order_data_missing: &'static str,
    pub access_token_missing: &'static str,
    pub load_order_failed: &'static str,
    pub order_not_found: &'static str,

    // Tracked orders
    pub your_order: &'static str,
    pub your_order_number: &'static str,
    pub no_tracked_orders: &'static str,

    // Admin
    pub invalid_credentials: &'static str,
    pub connection_error: &'static str,
    pub session_expired: &'static str,
    pub update_status_failed: &'static str,
    pub delete_order_failed: &'static str,
    pub admin_create_failed: &'static str,
    pub admin_load_failed: &'static str,
    pub confirm_mark_done: &'static str,
    pub confirm_delete: &'static str,
    pub no_active_orders: &'static str,
    pub no_completed_orders: &'static str,
    pub active_orders: &'static str,
    pub completed_orders: &'static str,
    pub orders: &'static str,
    pub no_orders: &'static str,
    pub edit_order_failed: &'static str,
    pub nothing_to_update: &'static str,

    // Command output
    pub sending_order: &'static str,
    pub checking_status: &'static str,
    pub orders_not_checked: &'static str,
    pub loading_order: &'static str,
    pub stopped_tracking: &'static str,
    pub not_tracked: &'static str,
    pub ctrl_c_to_stop: &'static str,
    pub username_prompt: &'static str,
    pub password_prompt: &'static str,
    pub verifying_credentials: &'static str,
    pub logging_in: &'static str,
    pub logged_in_as: &'static str,
    pub admin_login_required: &'static str,
    pub token_login_required: &'static str,
    pub credentials_removed: &'static str,
    pub token_removed: &'static str,
    pub cancelled: &'static str,
    pub order_created: &'static str,
    pub order_marked_done: &'static str,
    pub order_deleted: &'static str,
    pub order_updated: &'static str,
    pub technician_assigned: &'static str,
    pub status_changed: &'static str,
    pub not_on_board: &'static str,
    pub browser_open_failed: &'static str,
    pub current_status: &'static str,
}

impl Messages {
    /// Row title on the tracked-orders list; numbered only when there are
    /// several orders.
    pub fn tracked_order_title(&self, position: usize, total: usize) -> String {
        if total <= 1 {
            self.your_order.to_string()
        } else {
            format!("{} {}", self.your_order_number, position)
        }
    }

    /// Warning printed after a sweep in which some lookups failed.
    pub fn unchecked_orders(&self, count: usize) -> String {
        format!("{}: {}", self.orders_not_checked, count)
    }

    /// `message` followed by the order id, e.g. `Order deleted: abc123`.
    pub fn for_order(&self, message: &str, id: &str) -> String {
        format!("{}: {}", message, id)
    }
}

pub static PL: Messages = Messages {
    create_order_failed: "Błąd podczas tworzenia zamówienia",
    field_required: "To pole jest wymagane",
    phone_invalid: "Nieprawidłowy numer telefonu",
    gdpr_required: "Wymagana jest zgoda na przetwarzanie danych osobowych (RODO)",
    order_submitted: "Zamówienie zostało złożone",

    order_data_missing: "Dane zamówienia nie zostały znalezione",
    access_token_missing: "Token dostępu nie został podany",
    load_order_failed: "Błąd ładowania zamówienia",
    order_not_found: "Zamówienie nie znalezione",

    your_order: "Twoje zamówienie",
    your_order_number: "Twoje zamówienie numer",
    no_tracked_orders: "Brak śledzonych zamówień",

    invalid_credentials: "Nieprawidłowy login lub hasło",
    connection_error: "Błąd połączenia z serwerem",
    session_expired: "Sesja wygasła, zaloguj się ponownie",
    update_status_failed: "Błąd aktualizacji statusu",
    delete_order_failed: "Błąd usuwania zamówienia",
    admin_create_failed: "Błąd tworzenia zamówienia",
    admin_load_failed: "Błąd ładowania zamówień",
    confirm_mark_done: "Oznaczyć zamówienie jako wykonane?",
    confirm_delete: "Czy na pewno chcesz usunąć to zamówienie?",
    no_active_orders: "Brak aktywnych zamówień",
    no_completed_orders: "Brak wykonanych zamówień",
    active_orders: "Aktywne zamówienia",
    completed_orders: "Wykonane zamówienia",
    orders: "Zamówienia",
    no_orders: "Brak zamówień",
    edit_order_failed: "Błąd edycji zamówienia",
    nothing_to_update: "Podaj co najmniej jedno pole do zmiany",

    sending_order: "Wysyłanie zamówienia...",
    checking_status: "Sprawdzanie statusu zamówień...",
    orders_not_checked: "Nie udało się sprawdzić zamówień (pozostają na liście)",
    loading_order: "Ładowanie zamówienia...",
    stopped_tracking: "Zamówienie nie jest już śledzone",
    not_tracked: "Zamówienie nie jest śledzone",
    ctrl_c_to_stop: "Ctrl+C, aby zakończyć",
    username_prompt: "Login",
    password_prompt: "Hasło",
    verifying_credentials: "Sprawdzanie danych logowania...",
    logging_in: "Logowanie...",
    logged_in_as: "Zalogowano jako",
    admin_login_required: "Nie zalogowano. Uruchom najpierw 'lockopener admin login'.",
    token_login_required: "Nie zalogowano. Uruchom najpierw 'lockopener auth login'.",
    credentials_removed: "Dane logowania administratora usunięte",
    token_removed: "Token usunięty",
    cancelled: "Anulowano.",
    order_created: "Zamówienie utworzone",
    order_marked_done: "Zamówienie oznaczone jako wykonane",
    order_deleted: "Zamówienie usunięte",
    order_updated: "Zamówienie zaktualizowane",
    technician_assigned: "Przypisano technika",
    status_changed: "Zmieniono status",
    not_on_board: "Zamówienia nie ma na liście",
    browser_open_failed: "Nie udało się otworzyć przeglądarki",
    current_status: "Status",
};

pub static EN: Messages = Messages {
    create_order_failed: "Error creating order",
    field_required: "This field is required",
    phone_invalid: "Invalid phone number",
    gdpr_required: "Consent to the processing of personal data (GDPR) is required",
    order_submitted: "Your order has been placed",

    order_data_missing: "Order data not found",
    access_token_missing: "Access token not provided",
    load_order_failed: "Error loading order",
    order_not_found: "Order not found",

    your_order: "Your order",
    your_order_number: "Your order number",
    no_tracked_orders: "No tracked orders",

    invalid_credentials: "Invalid username or password",
    connection_error: "Server connection error",
    session_expired: "Session expired, please log in again",
    update_status_failed: "Error updating status",
    delete_order_failed: "Error deleting order",
    admin_create_failed: "Error creating order",
    admin_load_failed: "Error loading orders",
    confirm_mark_done: "Mark the order as done?",
    confirm_delete: "Are you sure you want to delete this order?",
    no_active_orders: "No active orders",
    no_completed_orders: "No completed orders",
    active_orders: "Active orders",
    completed_orders: "Completed orders",
    orders: "Orders",
    no_orders: "No orders",
    edit_order_failed: "Error editing order",
    nothing_to_update: "Give at least one field to change",

    sending_order: "Sending order...",
    checking_status: "Checking order status...",
    orders_not_checked: "Orders that could not be checked (they stay on the list)",
    loading_order: "Loading order...",
    stopped_tracking: "Stopped tracking",
    not_tracked: "Order is not tracked",
    ctrl_c_to_stop: "Ctrl+C to stop",
    username_prompt: "Username",
    password_prompt: "Password",
    verifying_credentials: "Verifying credentials...",
    logging_in: "Logging in...",
    logged_in_as: "Logged in as",
    admin_login_required: "Not logged in. Run 'lockopener admin login' first.",
    token_login_required: "Not logged in. Run 'lockopener auth login' first.",
    credentials_removed: "Admin credentials removed",
    token_removed: "Token removed",
    cancelled: "Cancelled.",
    order_created: "Order created",
    order_marked_done: "Order marked as done",
    order_deleted: "Order deleted",
    order_updated: "Order updated",
    technician_assigned: "Technician assigned",
    status_changed: "Status changed",
    not_on_board: "Order is not on the board",
    browser_open_failed: "Failed to open browser",
    current_status: "Status",
};
