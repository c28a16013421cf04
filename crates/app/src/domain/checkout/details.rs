//! Customer details entered at checkout.

use crate::domain::{checkout::errors::CheckoutError, orders::data::OrderCustomer};

const MIN_PHONE_LENGTH: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

impl CustomerDetails {
    /// Checks the details in the order a customer would fix them: required fields,
    /// then email, then phone.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        let required = [&self.name, &self.email, &self.phone, &self.address];

        if required.iter().any(|field| field.trim().is_empty()) {
            return Err(CheckoutError::MissingFields);
        }

        if !is_valid_email(&self.email) {
            return Err(CheckoutError::InvalidEmail);
        }

        if !is_valid_phone(&self.phone) {
            return Err(CheckoutError::InvalidPhone);
        }

        Ok(())
    }

    pub(crate) fn into_customer(self) -> OrderCustomer {
        let notes = self.notes.trim();

        OrderCustomer {
            notes: (!notes.is_empty()).then(|| notes.to_string()),
            name: self.name,
            email: self.email,
            phone: self.phone,
            address: self.address,
        }
    }
}

/// `local@domain.tld`, with no whitespace and a single `@`.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.contains('@') {
        return false;
    }

    let last = domain.len().saturating_sub(1);

    domain
        .char_indices()
        .any(|(index, c)| c == '.' && index > 0 && index < last)
}

/// At least ten digits or `-+()` once spaces are removed.
fn is_valid_phone(phone: &str) -> bool {
    let mut length = 0;

    for c in phone.chars().filter(|c| !c.is_whitespace()) {
        if !(c.is_ascii_digit() || matches!(c, '-' | '+' | '(' | ')')) {
            return false;
        }

        length += 1;
    }

    length >= MIN_PHONE_LENGTH
}
