//! Customer list state machine with per-record delete confirmation.
//!
//! The list is always rebuilt from the customer service: after a successful
//! delete it re-fetches instead of splicing the record out locally. Deletes
//! are tracked per record, so several may be in flight at once; each only
//! disables its own control.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use super::customer::{Customer, CustomerId};
use super::error::FlowError;
use super::navigation::Route;
use super::ports::{ConfirmationPrompt, CustomerTransportError, Navigator, Notifier, ViewPorts};

/// Whether the list has data to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Loaded,
}

/// What the list view should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListDisplay<'a> {
    /// Spinner with "Loading customers...".
    Loading,
    /// Loaded with no customers: offer the create shortcut.
    Empty,
    /// One card per customer, in service order.
    Cards(&'a [Customer]),
}

/// A confirmed delete whose request has not completed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteTicket {
    id: CustomerId,
}

impl DeleteTicket {
    /// Customer being deleted.
    pub fn id(&self) -> &CustomerId {
        &self.id
    }
}

/// How a delete action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user declined, or the record could not be deleted right now.
    Skipped,
    /// The customer was deleted and the list re-fetched.
    Deleted,
}

/// State of the customer list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerList {
    phase: ListPhase,
    customers: Vec<Customer>,
    deleting: BTreeSet<CustomerId>,
}

impl Default for CustomerList {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerList {
    /// A list that has not loaded yet.
    pub fn new() -> Self {
        Self {
            phase: ListPhase::Loading,
            customers: Vec::new(),
            deleting: BTreeSet::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    /// Customers from the last fetch, in service order.
    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Whether a delete for `id` is in flight.
    pub fn is_deleting(&self, id: &CustomerId) -> bool {
        self.deleting.contains(id)
    }

    /// Rendering branch for the current state.
    pub fn display(&self) -> ListDisplay<'_> {
        match self.phase {
            ListPhase::Loading => ListDisplay::Loading,
            ListPhase::Loaded if self.customers.is_empty() => ListDisplay::Empty,
            ListPhase::Loaded => ListDisplay::Cards(&self.customers),
        }
    }

    /// Enter [`ListPhase::Loading`] ahead of a fetch.
    pub fn begin_load(&mut self) {
        self.phase = ListPhase::Loading;
    }

    /// Apply the outcome of a fetch.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Transport`] after notifying when `result` is an
    /// error; the list is still marked loaded, with no customers.
    pub fn finish_load(
        &mut self,
        result: Result<Vec<Customer>, CustomerTransportError>,
        notifier: &dyn Notifier,
    ) -> Result<(), FlowError> {
        self.phase = ListPhase::Loaded;
        match result {
            Ok(customers) => {
                debug!(count = customers.len(), "customers loaded");
                self.customers = customers;
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "failed to fetch customers");
                self.customers.clear();
                notifier.error("Failed to fetch customers");
                Err(FlowError::Transport(error))
            }
        }
    }

    /// Fetch every customer.
    ///
    /// # Errors
    ///
    /// See [`CustomerList::finish_load`].
    pub async fn load(&mut self, ports: &ViewPorts) -> Result<(), FlowError> {
        self.begin_load();
        let result = ports.transport.fetch_all().await;
        self.finish_load(result, ports.notifier.as_ref())
    }

    /// Confirmation question asked before deleting `customer`.
    pub fn confirmation_message(customer: &Customer) -> String {
        format!("Are you sure you want to delete {}?", customer.name)
    }

    /// Ask for confirmation and, if given, mark `id` as deleting.
    ///
    /// Returns `None` without changing anything when the user declines, the
    /// record is not shown, or its delete is already in flight.
    pub fn request_delete(
        &mut self,
        id: &CustomerId,
        prompt: &dyn ConfirmationPrompt,
    ) -> Option<DeleteTicket> {
        if self.phase != ListPhase::Loaded || self.is_deleting(id) {
            debug!(customer_id = %id, "delete control unavailable");
            return None;
        }
        let customer = self.customers.iter().find(|customer| &customer.id == id)?;
        if !prompt.confirm(&Self::confirmation_message(customer)) {
            debug!(customer_id = %id, "delete declined");
            return None;
        }
        self.deleting.insert(id.clone());
        Some(DeleteTicket { id: id.clone() })
    }

    /// Apply the outcome of a delete request and clear its marker.
    ///
    /// On success the caller must re-fetch the list.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Transport`] after notifying when `result` is an
    /// error; the record stays in the list.
    pub fn finish_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), CustomerTransportError>,
        notifier: &dyn Notifier,
    ) -> Result<(), FlowError> {
        self.deleting.remove(&ticket.id);
        match result {
            Ok(()) => {
                info!(customer_id = %ticket.id, "customer deleted");
                notifier.success("Customer deleted successfully");
                Ok(())
            }
            Err(error) => {
                warn!(customer_id = %ticket.id, error = %error, "failed to delete customer");
                notifier.error("Failed to delete customer");
                Err(FlowError::Transport(error))
            }
        }
    }

    /// Confirm, delete, and re-fetch in one step.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Transport`] when the delete or the follow-up fetch
    /// fails; both are notified before returning.
    pub async fn delete(
        &mut self,
        id: &CustomerId,
        prompt: &dyn ConfirmationPrompt,
        ports: &ViewPorts,
    ) -> Result<DeleteOutcome, FlowError> {
        let Some(ticket) = self.request_delete(id, prompt) else {
            return Ok(DeleteOutcome::Skipped);
        };
        let result = ports.transport.delete(ticket.id()).await;
        self.finish_delete(ticket, result, ports.notifier.as_ref())?;
        self.load(ports).await?;
        Ok(DeleteOutcome::Deleted)
    }

    /// Open the edit form for `id`.
    pub fn edit(&self, id: &CustomerId, navigator: &dyn Navigator) {
        navigator.go_to(Route::Edit(id.clone()));
    }

    /// Open the create form (the empty-state shortcut).
    pub fn add(&self, navigator: &dyn Navigator) {
        navigator.go_to(Route::Create);
    }
}
