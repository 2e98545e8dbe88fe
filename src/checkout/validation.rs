//! Customer contact validation

use thiserror::Error;

/// Shortest accepted phone number, in digits.
pub const MIN_PHONE_DIGITS: usize = 9;

/// Longest accepted phone number, in digits.
pub const MAX_PHONE_DIGITS: usize = 10;

/// Problems with the customer name.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum NameError {
    /// Nothing but whitespace was entered.
    #[error("please enter your full name")]
    Missing,
}

/// Problems with the customer phone number.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PhoneError {
    /// Nothing but whitespace was entered.
    #[error("please enter your phone number")]
    Missing,

    /// The number is not 9 or 10 digits once spaces and hyphens are removed.
    #[error("please enter a valid phone number")]
    Invalid,
}

/// Field-level validation errors for the info stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    /// Name error, if any
    pub name: Option<NameError>,

    /// Phone error, if any
    pub phone: Option<PhoneError>,
}

impl ValidationErrors {
    /// Whether no field has an error.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.phone.is_none()
    }
}

/// Validated customer contact details.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomerDetails {
    name: String,
    phone: String,
}

impl CustomerDetails {
    /// Trimmed name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phone number, digits only
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// Validates a name: anything non-empty after trimming.
///
/// # Errors
///
/// Returns [`NameError::Missing`] for blank input.
pub fn validate_name(name: &str) -> Result<String, NameError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(NameError::Missing);
    }

    Ok(trimmed.to_string())
}

/// Validates a phone number and returns its digits.
///
/// Whitespace and hyphens are ignored; what remains must be 9 or 10 ASCII digits.
///
/// # Errors
///
/// - [`PhoneError::Missing`]: blank input.
/// - [`PhoneError::Invalid`]: wrong length or non-digit characters.
pub fn validate_phone(phone: &str) -> Result<String, PhoneError> {
    if phone.trim().is_empty() {
        return Err(PhoneError::Missing);
    }

    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();

    let valid_length = (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len());

    if valid_length && digits.chars().all(|c| c.is_ascii_digit()) {
        Ok(digits)
    } else {
        Err(PhoneError::Invalid)
    }
}

/// Validates both contact fields, collecting every field error.
///
/// # Errors
///
/// Returns the [`ValidationErrors`] for each field that failed.
pub fn validate_customer(name: &str, phone: &str) -> Result<CustomerDetails, ValidationErrors> {
    match (validate_name(name), validate_phone(phone)) {
        (Ok(name), Ok(phone)) => Ok(CustomerDetails { name, phone }),
        (name, phone) => Err(ValidationErrors {
            name: name.err(),
            phone: phone.err(),
        }),
    }
}
