//! Order forms and their client-side validation.

use std::sync::LazyLock;

use lockopener_common::{Address, Consent, Customer, Order};
use regex::Regex;

use crate::api::{NewOrder, OrderPatch};
use crate::errors::ValidationErrors;
use crate::i18n::Messages;

pub const DEFAULT_CITY: &str = "Kraków";

// E.164-ish: optional +, no leading zero, 2 to 15 digits.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// The customer order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderForm {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub gdpr: bool,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            phone: String::new(),
            street: String::new(),
            city: DEFAULT_CITY.to_string(),
            gdpr: false,
        }
    }
}

impl OrderForm {
    pub fn validate(&self, messages: &Messages) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require(&mut errors, "name", &self.name, messages);
        if self.phone.trim().is_empty() {
            errors.push("phone", messages.field_required);
        } else if !is_valid_phone(self.phone.trim()) {
            errors.push("phone", messages.phone_invalid);
        }
        require(&mut errors, "street", &self.street, messages);
        require(&mut errors, "city", &self.city, messages);
        if !self.gdpr {
            errors.push("gdpr", messages.gdpr_required);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Validate and build the request body.
    pub fn into_new_order(self, messages: &Messages) -> Result<NewOrder, ValidationErrors> {
        self.validate(messages)?;
        Ok(NewOrder {
            client: Customer {
                name: self.name.trim().to_string(),
                phone: self.phone.trim().to_string(),
            },
            address: Address {
                street: self.street.trim().to_string(),
                city: self.city.trim().to_string(),
            },
            consent: Consent { gdpr: self.gdpr },
        })
    }
}

/// The staff-side "new order" form, used for phone-in orders.
///
/// Consent was given over the phone, so it is always sent as accepted, and a
/// blank city falls back to the configured default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminOrderForm {
    pub name: String,
    pub phone: String,
    pub street: String,
    pub city: Option<String>,
}

impl AdminOrderForm {
    pub fn validate(&self, messages: &Messages) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require(&mut errors, "name", &self.name, messages);
        require(&mut errors, "phone", &self.phone, messages);
        require(&mut errors, "street", &self.street, messages);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn into_new_order(
        self,
        default_city: &str,
        messages: &Messages,
    ) -> Result<NewOrder, ValidationErrors> {
        self.validate(messages)?;
        let city = self
            .city
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| default_city.to_string());
        Ok(NewOrder {
            client: Customer {
                name: self.name.trim().to_string(),
                phone: self.phone.trim().to_string(),
            },
            address: Address {
                street: self.street.trim().to_string(),
                city,
            },
            consent: Consent { gdpr: true },
        })
    }
}

/// Staff corrections to an existing order. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderEdit {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
}

impl OrderEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none() && self.street.is_none() && self.city.is_none()
    }

    pub fn validate(&self, messages: &Messages) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.is_empty() {
            errors.push("order", messages.nothing_to_update);
        }
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("street", &self.street),
            ("city", &self.city),
        ] {
            if let Some(value) = value {
                require(&mut errors, field, value, messages);
            }
        }
        let phone = self.phone.as_deref().map(str::trim).unwrap_or_default();
        if !phone.is_empty() && !is_valid_phone(phone) {
            errors.push("phone", messages.phone_invalid);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Build the update body. The backend replaces `client` and `address`
    /// as a whole, so untouched fields are filled in from `current`.
    pub fn merge(self, current: &Order) -> OrderPatch {
        let trimmed = |v: Option<String>| v.map(|v| v.trim().to_string());
        let (name, phone) = (trimmed(self.name), trimmed(self.phone));
        let (street, city) = (trimmed(self.street), trimmed(self.city));

        let client = (name.is_some() || phone.is_some()).then(|| Customer {
            name: name.unwrap_or_else(|| current.client.name.clone()),
            phone: phone.unwrap_or_else(|| current.client.phone.clone()),
        });
        let address = (street.is_some() || city.is_some()).then(|| Address {
            street: street.unwrap_or_else(|| current.address.street.clone()),
            city: city.unwrap_or_else(|| current.address.city.clone()),
        });
        OrderPatch { client, address }
    }
}

fn require(errors: &mut ValidationErrors, field: &'static str, value: &str, messages: &Messages) {
    if value.trim().is_empty() {
        errors.push(field, messages.field_required);
    }
}
