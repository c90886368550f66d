//! Client-side field validation for the customer form.
//!
//! Rules run against the raw input: nothing is trimmed first, so `"  "` is a
//! non-empty (and valid) name. Each field reports at most one failure; the
//! checks for a field run in a fixed order and the first failure wins.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::customer::CustomerFields;

/// Maximum length of a customer name, in characters.
pub const NAME_MAX: usize = 100;
/// Maximum length of an email address, in characters.
pub const EMAIL_MAX: usize = 150;
/// Maximum length of a postal address, in characters.
pub const ADDRESS_MAX: usize = 255;

/// Text inputs that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Address,
}

impl Field {
    /// Every validated field, in display order.
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Address];

    /// Form label for the input.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Full Name *",
            Self::Email => "Email Address *",
            Self::Address => "Address",
        }
    }

    /// Read this field's current value out of `fields`.
    pub fn value(self, fields: &CustomerFields) -> &str {
        match self {
            Self::Name => fields.name.as_str(),
            Self::Email => fields.email.as_str(),
            Self::Address => fields.address.as_str(),
        }
    }
}

/// Why a field value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// A mandatory field was left empty.
    Required,
    /// The value is longer than `max` characters.
    TooLong { max: usize },
    /// The value contains characters or a shape the field does not allow.
    InvalidFormat,
}

impl FieldError {
    /// Inline message shown beneath `field`.
    pub fn message(self, field: Field) -> String {
        match (field, self) {
            (Field::Name, Self::Required) => "Name is required".to_owned(),
            (Field::Email, Self::Required) => "Email is required".to_owned(),
            (Field::Address, Self::Required) => "Address is required".to_owned(),
            (Field::Name, Self::TooLong { max }) => {
                format!("Name must not exceed {max} characters")
            }
            (Field::Email, Self::TooLong { max }) => {
                format!("Email must not exceed {max} characters")
            }
            (Field::Address, Self::TooLong { max }) => {
                format!("Address must not exceed {max} characters")
            }
            (Field::Name, Self::InvalidFormat) => "Name can only contain letters, spaces, \
                hyphens, apostrophes, and accented characters"
                .to_owned(),
            (Field::Email, Self::InvalidFormat) => "Please enter a valid email address".to_owned(),
            (Field::Address, Self::InvalidFormat) => "Address is not valid".to_owned(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "value is required"),
            Self::TooLong { max } => write!(f, "value must be at most {max} characters"),
            Self::InvalidFormat => write!(f, "value has an invalid format"),
        }
    }
}

impl std::error::Error for FieldError {}

/// Per-field failures currently attached to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failure recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    /// Whether `field` is in its invalid sub-state.
    pub fn is_invalid(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Inline message for `field`, if it is failing.
    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|error| error.message(field))
    }

    /// Iterate failures in field display order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.0.iter().map(|(field, error)| (*field, *error))
    }

    /// Record the outcome of validating `field`.
    pub fn record(&mut self, field: Field, outcome: Result<(), FieldError>) {
        match outcome {
            Ok(()) => {
                self.0.remove(&field);
            }
            Err(error) => {
                self.0.insert(field, error);
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self
            .iter()
            .map(|(field, error)| error.message(field))
            .collect::<Vec<_>>();
        f.write_str(&messages.join("; "))
    }
}

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    NAME_RE.get_or_init(|| {
        // Letters, whitespace, hyphen, apostrophe, and U+00C0..=U+017F.
        let pattern = r"^[a-zA-Z\s\-'\x{00C0}-\x{017F}]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn exceeds(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

/// Validate a customer name: required, at most [`NAME_MAX`] characters,
/// letters/whitespace/hyphens/apostrophes/accented letters only.
///
/// # Examples
/// ```
/// use frontend::domain::validation::{validate_name, FieldError};
///
/// assert!(validate_name("Anne-Marie O'Brien").is_ok());
/// assert_eq!(validate_name(""), Err(FieldError::Required));
/// assert_eq!(validate_name("R2D2"), Err(FieldError::InvalidFormat));
/// ```
pub fn validate_name(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if exceeds(value, NAME_MAX) {
        return Err(FieldError::TooLong { max: NAME_MAX });
    }
    if !name_regex().is_match(value) {
        return Err(FieldError::InvalidFormat);
    }
    Ok(())
}

/// Validate an email address: required, `local@domain.tld` shape, at most
/// [`EMAIL_MAX`] characters.
pub fn validate_email(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !email_regex().is_match(value) {
        return Err(FieldError::InvalidFormat);
    }
    if exceeds(value, EMAIL_MAX) {
        return Err(FieldError::TooLong { max: EMAIL_MAX });
    }
    Ok(())
}

/// Validate an optional postal address of at most [`ADDRESS_MAX`] characters.
pub fn validate_address(value: &str) -> Result<(), FieldError> {
    if exceeds(value, ADDRESS_MAX) {
        return Err(FieldError::TooLong { max: ADDRESS_MAX });
    }
    Ok(())
}

/// Run the rule set for a single field.
pub fn validate_field(field: Field, value: &str) -> Result<(), FieldError> {
    match field {
        Field::Name => validate_name(value),
        Field::Email => validate_email(value),
        Field::Address => validate_address(value),
    }
}

/// Validate every field of `fields`.
pub fn validate_fields(fields: &CustomerFields) -> FieldErrors {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        errors.record(field, validate_field(field, field.value(fields)));
    }
    errors
}
