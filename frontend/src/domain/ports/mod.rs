//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod customer_transport;
mod navigator;
mod notifier;

use std::sync::Arc;

#[cfg(test)]
pub use customer_transport::MockCustomerTransport;
pub use customer_transport::{CustomerTransport, CustomerTransportError};
#[cfg(test)]
pub use navigator::{MockConfirmationPrompt, MockNavigator};
pub use navigator::{ConfirmationPrompt, Navigator};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::Notifier;

/// Collaborators shared by the list and form views.
#[derive(Clone)]
pub struct ViewPorts {
    /// Customer service adapter.
    pub transport: Arc<dyn CustomerTransport>,
    /// Toast sink.
    pub notifier: Arc<dyn Notifier>,
    /// Route changer.
    pub navigator: Arc<dyn Navigator>,
}

impl ViewPorts {
    /// Build a strongly-typed view port bundle.
    pub fn new(
        transport: Arc<dyn CustomerTransport>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            transport,
            notifier,
            navigator,
        }
    }
}

impl std::fmt::Debug for ViewPorts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewPorts").finish_non_exhaustive()
    }
}
