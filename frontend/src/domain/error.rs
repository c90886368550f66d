//! Failure taxonomy for the customer views.
//!
//! Every variant is handled where it happens (inline field messages,
//! notifications, navigation) before it is returned, so callers only use it to
//! decide how the flow ended.

use super::customer::CustomerId;
use super::ports::CustomerTransportError;
use super::validation::FieldErrors;

/// Why a view action did not complete.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// One or more fields failed client-side validation; nothing was sent.
    #[error("form has invalid fields: {0}")]
    Validation(FieldErrors),
    /// A request to the customer service failed.
    #[error(transparent)]
    Transport(#[from] CustomerTransportError),
    /// The customer being edited could not be loaded; the form was closed.
    #[error("customer {id} could not be loaded: {source}")]
    NotFoundOnLoad {
        id: CustomerId,
        source: CustomerTransportError,
    },
}
