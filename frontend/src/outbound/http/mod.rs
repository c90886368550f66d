//! Customer service HTTP adapter.
//!
//! This module provides the reqwest implementation of the
//! `CustomerTransport` port.

mod customer_client;

pub use customer_client::{CustomerHttpTransport, DEFAULT_API_BASE_URL};
