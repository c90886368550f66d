//! Customer management frontend.
//!
//! Views for listing, creating, editing, and deleting customers held by a
//! remote customer service, organised as a hexagon: [`domain`] owns the view
//! state machines and ports, [`outbound`] talks HTTP to the service, and
//! [`inbound`] drives the views from the command line.

pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
