//! Driven port for the customer service's CRUD endpoints.
//!
//! Views only see records and transport errors; URL layout, HTTP methods, and
//! JSON encoding stay inside the outbound adapter.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerFields, CustomerId};

use super::define_port_error;

define_port_error! {
    /// Errors surfaced while calling the customer service.
    pub enum CustomerTransportError {
        /// The request never produced a response.
        Transport { message: String } =>
            "customer service request failed: {message}",
        /// The service answered with a non-success status.
        Status { status: u16, body: String } =>
            "customer service responded with status {status}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "customer service response decode failed: {message}",
    }
}

impl CustomerTransportError {
    /// Upstream error payload, when the service sent one.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::ports::CustomerTransportError;
    ///
    /// let err = CustomerTransportError::status(500_u16, "Error creating customer: duplicate email");
    /// assert_eq!(err.payload(), Some("Error creating customer: duplicate email"));
    /// assert_eq!(CustomerTransportError::transport("refused").payload(), None);
    /// ```
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } if !body.trim().is_empty() => Some(body.as_str()),
            _ => None,
        }
    }
}

/// Port for reading and mutating customers on the customer service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerTransport: Send + Sync {
    /// Fetch every customer, in the order the service returns them.
    async fn fetch_all(&self) -> Result<Vec<Customer>, CustomerTransportError>;

    /// Fetch one customer by identifier.
    async fn fetch_one(&self, id: &CustomerId) -> Result<Customer, CustomerTransportError>;

    /// Create a customer from the submitted values.
    ///
    /// Any success response means the customer exists. `None` is returned
    /// when the service acknowledged the create without a readable record.
    async fn create(
        &self,
        fields: &CustomerFields,
    ) -> Result<Option<Customer>, CustomerTransportError>;

    /// Replace every editable value of an existing customer.
    async fn update(
        &self,
        id: &CustomerId,
        fields: &CustomerFields,
    ) -> Result<Customer, CustomerTransportError>;

    /// Delete a customer.
    async fn delete(&self, id: &CustomerId) -> Result<(), CustomerTransportError>;
}
