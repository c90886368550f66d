//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed client for the customer service REST API
//!
//! Adapters are thin translators between domain types and wire formats. They
//! contain no view logic.

pub mod http;
