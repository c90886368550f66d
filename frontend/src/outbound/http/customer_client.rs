//! Reqwest-backed customer service adapter.
//!
//! This adapter owns transport details only: endpoint layout, JSON encoding,
//! and mapping HTTP failures onto `CustomerTransportError`. No request timeout
//! is configured; a hung service leaves the calling view in its in-flight
//! state.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::ports::{CustomerTransport, CustomerTransportError};
use crate::domain::{Customer, CustomerFields, CustomerId};

/// Base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081";

const API_PREFIX: [&str; 2] = ["api", "customer"];

/// Customer service client rooted at one base URL.
#[derive(Debug, Clone)]
pub struct CustomerHttpTransport {
    client: Client,
    base_url: Url,
}

impl CustomerHttpTransport {
    /// Build an adapter for the service at `base_url`.
    /// ```rust,ignore
    /// let transport = CustomerHttpTransport::new(base_url)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL requests are issued against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CustomerTransportError> {
        build_endpoint(&self.base_url, segments)
    }

    async fn execute(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        body: Option<&CustomerFields>,
    ) -> Result<Vec<u8>, CustomerTransportError> {
        debug!(operation, %method, path = url.path(), "calling customer service");
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(fields) = body {
            request = request.json(fields);
        }

        let result = send(operation, request).await;
        if let Err(CustomerTransportError::Transport { message }) = &result {
            warn!(operation, error = %message, "customer service unreachable");
        }
        result
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        body: Option<&CustomerFields>,
    ) -> Result<T, CustomerTransportError> {
        let bytes = self.execute(operation, method, url, body).await?;
        decode_required(&bytes).inspect_err(|error| {
            warn!(operation, error = %error, "customer service payload rejected");
        })
    }
}

#[async_trait]
impl CustomerTransport for CustomerHttpTransport {
    async fn fetch_all(&self) -> Result<Vec<Customer>, CustomerTransportError> {
        let url = self.endpoint(&["getCustomers"])?;
        self.fetch("fetch_all", Method::GET, url, None).await
    }

    async fn fetch_one(&self, id: &CustomerId) -> Result<Customer, CustomerTransportError> {
        let url = self.endpoint(&["getCustomer", id.as_ref()])?;
        self.fetch("fetch_one", Method::GET, url, None).await
    }

    async fn create(
        &self,
        fields: &CustomerFields,
    ) -> Result<Option<Customer>, CustomerTransportError> {
        let url = self.endpoint(&["create"])?;
        let bytes = self
            .execute("create", Method::POST, url, Some(fields))
            .await?;
        Ok(decode_acknowledged("create", &bytes))
    }

    async fn update(
        &self,
        id: &CustomerId,
        fields: &CustomerFields,
    ) -> Result<Customer, CustomerTransportError> {
        let url = self.endpoint(&["update", id.as_ref()])?;
        let bytes = self
            .execute("update", Method::PUT, url, Some(fields))
            .await?;
        Ok(decode_acknowledged("update", &bytes)
            .unwrap_or_else(|| echo_saved(id.clone(), fields)))
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), CustomerTransportError> {
        let url = self.endpoint(&["delete", id.as_ref()])?;
        self.execute("delete", Method::DELETE, url, None)
            .await
            .map(drop)
    }
}

async fn send(
    operation: &'static str,
    request: RequestBuilder,
) -> Result<Vec<u8>, CustomerTransportError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        warn!(
            operation,
            status = status.as_u16(),
            body = %body_preview(body.as_ref()),
            "customer service rejected request"
        );
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn build_endpoint(base_url: &Url, segments: &[&str]) -> Result<Url, CustomerTransportError> {
    let mut url = base_url.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
        let mut path = url.path_segments_mut().map_err(|()| {
            CustomerTransportError::transport(format!(
                "base URL cannot carry a path: {base_url}"
            ))
        })?;
        path.pop_if_empty().extend(API_PREFIX).extend(segments);
    }
    Ok(url)
}

/// Decode a JSON body that must carry a value; `null` and empty bodies fail.
fn decode_required<T: DeserializeOwned>(body: &[u8]) -> Result<T, CustomerTransportError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(CustomerTransportError::decode("empty response body"));
    }
    let decoded: Option<T> = serde_json::from_slice(body).map_err(|error| {
        CustomerTransportError::decode(format!("invalid customer JSON payload: {error}"))
    })?;
    decoded.ok_or_else(|| CustomerTransportError::decode("response body was null"))
}

/// Read the record out of a successful create or update response.
///
/// The request already succeeded, so a body that is empty or not a customer
/// (the service may answer with plain text) yields `None` instead of an error.
fn decode_acknowledged(operation: &'static str, body: &[u8]) -> Option<Customer> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice::<Option<Customer>>(body) {
        Ok(customer) => customer,
        Err(error) => {
            debug!(
                operation,
                error = %error,
                body = %body_preview(body),
                "success response carried no customer record"
            );
            None
        }
    }
}

fn echo_saved(id: CustomerId, fields: &CustomerFields) -> Customer {
    Customer {
        id,
        name: fields.name.clone(),
        email: fields.email.clone(),
        address: Some(fields.address.clone()),
        status: Some(fields.status),
    }
}

fn map_transport_error(error: reqwest::Error) -> CustomerTransportError {
    CustomerTransportError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> CustomerTransportError {
    let text = String::from_utf8_lossy(body).trim().to_owned();
    CustomerTransportError::status(status.as_u16(), text)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
