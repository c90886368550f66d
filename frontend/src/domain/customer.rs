//! Customer record model.
//!
//! [`Customer`] mirrors what the customer service returns; [`CustomerFields`]
//! is the editable subset the form sends back on create and update.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Validation errors returned by [`CustomerId::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerIdValidationError {
    Empty,
    InvalidCharacters,
}

impl fmt::Display for CustomerIdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "customer id must not be empty"),
            Self::InvalidCharacters => write!(
                f,
                "customer id must not contain whitespace, slashes, or query characters",
            ),
        }
    }
}

impl std::error::Error for CustomerIdValidationError {}

/// Backend-assigned customer identifier.
///
/// The service hands out numeric identifiers, but the client treats them as
/// opaque text: they are only ever echoed back in request paths and routes.
/// Both JSON numbers and strings are accepted when decoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "CustomerIdDto", into = "String")]
pub struct CustomerId(String);

impl CustomerId {
    /// Validate and construct a [`CustomerId`].
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::CustomerId;
    ///
    /// let id = CustomerId::new("42").expect("valid id");
    /// assert_eq!(id.as_ref(), "42");
    /// assert!(CustomerId::new("4 2").is_err());
    /// ```
    pub fn new(id: impl Into<String>) -> Result<Self, CustomerIdValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CustomerIdValidationError::Empty);
        }
        // The id is spliced into `/edit/{id}` and `/delete/{id}` paths.
        if id
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#'))
        {
            return Err(CustomerIdValidationError::InvalidCharacters);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for CustomerId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<CustomerId> for String {
    fn from(value: CustomerId) -> Self {
        value.0
    }
}

impl TryFrom<String> for CustomerId {
    type Error = CustomerIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl std::str::FromStr for CustomerId {
    type Err = CustomerIdValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CustomerIdDto {
    Number(i64),
    Text(String),
}

impl TryFrom<CustomerIdDto> for CustomerId {
    type Error = CustomerIdValidationError;

    fn try_from(value: CustomerIdDto) -> Result<Self, Self::Error> {
        match value {
            CustomerIdDto::Number(number) => Self::new(number.to_string()),
            CustomerIdDto::Text(text) => Self::new(text),
        }
    }
}

/// A customer as returned by the customer service.
///
/// Missing or `null` `name`/`email` decode as empty strings. `status` stays optional so
/// views can tell "inactive" apart from "never set": the list shows an unset
/// status as inactive while the edit form treats it as active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Backend identifier, serialised as `customerId`.
    #[serde(rename = "customerId")]
    pub id: CustomerId,
    /// Full name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Contact email address.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// Optional postal address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Active flag, absent when the service never recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Customer {
    /// Whether the list view should render this customer as active.
    pub fn is_active(&self) -> bool {
        self.status == Some(true)
    }

    /// Address to display, skipping empty values.
    pub fn display_address(&self) -> Option<&str> {
        self.address.as_deref().filter(|address| !address.is_empty())
    }
}

/// Editable customer values bound to the form inputs.
///
/// ## Invariants
/// - `status` is always defined; new customers start active.
/// - Values are kept exactly as entered; nothing is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerFields {
    /// Full name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Postal address, empty when not provided.
    pub address: String,
    /// Active flag.
    pub status: bool,
}

impl Default for CustomerFields {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            address: String::new(),
            status: true,
        }
    }
}

impl From<&Customer> for CustomerFields {
    fn from(value: &Customer) -> Self {
        Self {
            name: value.name.clone(),
            email: value.email.clone(),
            address: value.address.clone().unwrap_or_default(),
            status: value.status.unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Serialisation and conversion coverage for customer records.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::numeric(json!({"customerId": 7, "name": "Ann", "email": "a@b.com"}), "7")]
    #[case::textual(json!({"customerId": "c-9", "name": "Ann", "email": "a@b.com"}), "c-9")]
    fn decodes_numeric_and_textual_ids(#[case] payload: serde_json::Value, #[case] id: &str) {
        let customer: Customer = serde_json::from_value(payload).expect("customer decodes");
        assert_eq!(customer.id.as_ref(), id);
    }

    #[rstest]
    #[case("")]
    #[case("4 2")]
    #[case("1/2")]
    #[case("1?x=2")]
    fn rejects_ids_that_cannot_live_in_a_path(#[case] raw: &str) {
        assert!(CustomerId::new(raw).is_err());
    }

    #[test]
    fn missing_optional_values_decode_as_unset() {
        let customer: Customer =
            serde_json::from_value(json!({"customerId": 1})).expect("customer decodes");
        assert_eq!(customer.name, "");
        assert_eq!(customer.email, "");
        assert!(customer.address.is_none());
        assert!(customer.status.is_none());
        assert!(!customer.is_active());
    }

    #[test]
    fn null_text_values_decode_as_empty() {
        let customer: Customer = serde_json::from_value(json!({
            "customerId": 1,
            "name": null,
            "email": null,
            "address": null,
            "status": null
        }))
        .expect("customer decodes");
        assert_eq!(customer.name, "");
        assert_eq!(customer.email, "");
        assert!(customer.address.is_none());
        assert!(customer.status.is_none());
    }

    #[test]
    fn fields_default_unset_status_to_active() {
        let customer: Customer = serde_json::from_value(json!({
            "customerId": 3,
            "name": "Ann",
            "email": "a@b.com",
            "address": null
        }))
        .expect("customer decodes");

        let fields = CustomerFields::from(&customer);
        assert!(fields.status);
        assert_eq!(fields.address, "");
    }

    #[test]
    fn fields_keep_an_explicit_inactive_status() {
        let customer = Customer {
            id: CustomerId::new("3").expect("valid id"),
            name: "Ann".to_owned(),
            email: "a@b.com".to_owned(),
            address: Some("1 Main St".to_owned()),
            status: Some(false),
        };
        let fields = CustomerFields::from(&customer);
        assert!(!fields.status);
        assert_eq!(fields.address, "1 Main St");
    }

    #[test]
    fn fields_serialise_with_the_wire_names() {
        let value = serde_json::to_value(CustomerFields::default()).expect("serialise");
        assert_eq!(
            value,
            json!({"name": "", "email": "", "address": "", "status": true})
        );
    }

    #[test]
    fn empty_address_is_not_displayed() {
        let customer = Customer {
            id: CustomerId::new("3").expect("valid id"),
            name: "Ann".to_owned(),
            email: "a@b.com".to_owned(),
            address: Some(String::new()),
            status: Some(true),
        };
        assert!(customer.display_address().is_none());
    }
}
