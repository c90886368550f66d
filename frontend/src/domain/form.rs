//! Create/edit form state machine.
//!
//! One [`CustomerForm`] drives both flows. In edit mode it starts in
//! [`FormPhase::InitialLoading`] until the existing customer arrives; both
//! modes then share the same validation and submit pipeline:
//!
//! ```text
//! InitialLoading --loaded--> Ready --begin_submit--> Submitting
//!       |                     ^  |                        |
//!       | load failed         |  | cancel                 | failed
//!       v                     |  v                        |
//!     Closed <----------------+-Closed <---- saved -------+
//! ```
//!
//! Each text field also carries an independent invalid sub-state that is
//! re-evaluated whenever its value changes and on every submit attempt.

use tracing::{debug, info, warn};

use super::customer::{Customer, CustomerFields, CustomerId};
use super::error::FlowError;
use super::navigation::Route;
use super::ports::{CustomerTransport, CustomerTransportError, Navigator, Notifier, ViewPorts};
use super::validation::{Field, FieldErrors, validate_field, validate_fields};

const FALLBACK_ERROR_PAYLOAD: &str = "An error occurred";

/// Whether the form creates a new customer or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(CustomerId),
}

/// Lifecycle of a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    /// Edit mode only: the existing customer is being fetched.
    InitialLoading,
    /// Inputs are interactive.
    Ready,
    /// A create or update request is in flight; inputs are disabled.
    Submitting,
    /// The form navigated away; every action is ignored.
    Closed,
}

/// A validated request ready to be sent to the customer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    /// Create a customer from these values.
    Create(CustomerFields),
    /// Replace the values of an existing customer.
    Update(CustomerId, CustomerFields),
}

impl SubmitRequest {
    /// Values carried by the request.
    pub fn fields(&self) -> &CustomerFields {
        match self {
            Self::Create(fields) | Self::Update(_, fields) => fields,
        }
    }

    /// Send the request through `transport`.
    ///
    /// Resolves to `None` when the service saved the customer without
    /// returning it.
    pub async fn send(
        &self,
        transport: &dyn CustomerTransport,
    ) -> Result<Option<Customer>, CustomerTransportError> {
        match self {
            Self::Create(fields) => transport.create(fields).await,
            Self::Update(id, fields) => transport.update(id, fields).await.map(Some),
        }
    }
}

/// Form state for creating or editing one customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerForm {
    mode: FormMode,
    phase: FormPhase,
    values: CustomerFields,
    errors: FieldErrors,
}

impl CustomerForm {
    /// Open a form. An identifier selects edit mode.
    ///
    /// # Examples
    /// ```
    /// use frontend::domain::{CustomerForm, CustomerId, FormPhase};
    ///
    /// let create = CustomerForm::new(None);
    /// assert_eq!(create.phase(), FormPhase::Ready);
    /// assert!(create.values().status);
    ///
    /// let edit = CustomerForm::new(Some(CustomerId::new("4").expect("valid id")));
    /// assert_eq!(edit.phase(), FormPhase::InitialLoading);
    /// ```
    pub fn new(id: Option<CustomerId>) -> Self {
        let (mode, phase) = match id {
            Some(id) => (FormMode::Edit(id), FormPhase::InitialLoading),
            None => (FormMode::Create, FormPhase::Ready),
        };
        Self {
            mode,
            phase,
            values: CustomerFields::default(),
            errors: FieldErrors::default(),
        }
    }

    /// Create or edit.
    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Values bound to the inputs.
    pub fn values(&self) -> &CustomerFields {
        &self.values
    }

    /// Fields currently in their invalid sub-state.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Heading for the form.
    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Customer",
            FormMode::Edit(_) => "Edit Customer",
        }
    }

    /// Text of the submit button.
    pub fn submit_label(&self) -> &'static str {
        match (self.phase, &self.mode) {
            (FormPhase::Submitting, _) => "Saving...",
            (_, FormMode::Create) => "Create Customer",
            (_, FormMode::Edit(_)) => "Update Customer",
        }
    }

    /// Text of the status toggle.
    pub fn status_text(&self) -> &'static str {
        if self.values.status {
            "Active"
        } else {
            "Inactive"
        }
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Ready
    }

    /// Replace a text field and re-validate it. Ignored unless the form is
    /// [`FormPhase::Ready`]; returns whether the value was applied.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> bool {
        if self.phase != FormPhase::Ready {
            debug!(?field, phase = ?self.phase, "ignoring input while form is not ready");
            return false;
        }
        let value = value.into();
        self.errors.record(field, validate_field(field, &value));
        match field {
            Field::Name => self.values.name = value,
            Field::Email => self.values.email = value,
            Field::Address => self.values.address = value,
        }
        true
    }

    /// Replace the name.
    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        self.set_field(Field::Name, name)
    }

    /// Replace the email address.
    pub fn set_email(&mut self, email: impl Into<String>) -> bool {
        self.set_field(Field::Email, email)
    }

    /// Replace the postal address.
    pub fn set_address(&mut self, address: impl Into<String>) -> bool {
        self.set_field(Field::Address, address)
    }

    /// Flip the active flag. Local only until the form is submitted.
    pub fn toggle_status(&mut self) -> bool {
        if self.phase != FormPhase::Ready {
            return false;
        }
        self.values.status = !self.values.status;
        true
    }

    /// Leave the form without saving.
    pub fn cancel(&mut self, navigator: &dyn Navigator) -> bool {
        if self.phase != FormPhase::Ready {
            return false;
        }
        self.phase = FormPhase::Closed;
        navigator.go_to(Route::List);
        true
    }

    /// Fetch the customer being edited and populate the inputs.
    ///
    /// No-op in create mode or once loading has finished.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFoundOnLoad`] after notifying and navigating
    /// back to the list when the customer cannot be fetched.
    pub async fn load(&mut self, ports: &ViewPorts) -> Result<(), FlowError> {
        let FormMode::Edit(id) = &self.mode else {
            return Ok(());
        };
        if self.phase != FormPhase::InitialLoading {
            return Ok(());
        }
        debug!(customer_id = %id, "loading customer for edit");
        let result = ports.transport.fetch_one(id).await;
        self.apply_loaded(result, ports.notifier.as_ref(), ports.navigator.as_ref())
    }

    /// Apply the outcome of the edit-mode fetch.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NotFoundOnLoad`] when `result` is an error; the
    /// form is closed and the user is sent back to the list.
    pub fn apply_loaded(
        &mut self,
        result: Result<Customer, CustomerTransportError>,
        notifier: &dyn Notifier,
        navigator: &dyn Navigator,
    ) -> Result<(), FlowError> {
        let FormMode::Edit(id) = &self.mode else {
            return Ok(());
        };
        if self.phase != FormPhase::InitialLoading {
            debug!(customer_id = %id, "discarding late customer load");
            return Ok(());
        }
        match result {
            Ok(customer) => {
                self.values = CustomerFields::from(&customer);
                self.errors = FieldErrors::default();
                self.phase = FormPhase::Ready;
                Ok(())
            }
            Err(source) => {
                warn!(customer_id = %id, error = %source, "failed to fetch customer");
                let id = id.clone();
                self.phase = FormPhase::Closed;
                notifier.error("Failed to fetch customer details");
                navigator.go_to(Route::List);
                Err(FlowError::NotFoundOnLoad { id, source })
            }
        }
    }

    /// Validate every field and, if all pass, move to
    /// [`FormPhase::Submitting`].
    ///
    /// Returns `Ok(None)` when the form is not accepting submissions (still
    /// loading, already submitting, or closed).
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Validation`] when any field fails; the failures
    /// are also recorded on the form for inline display.
    pub fn begin_submit(&mut self) -> Result<Option<SubmitRequest>, FlowError> {
        if self.phase != FormPhase::Ready {
            debug!(phase = ?self.phase, "ignoring submit while form is not ready");
            return Ok(None);
        }
        self.errors = validate_fields(&self.values);
        if !self.errors.is_empty() {
            return Err(FlowError::Validation(self.errors.clone()));
        }
        self.phase = FormPhase::Submitting;
        let fields = self.values.clone();
        Ok(Some(match &self.mode {
            FormMode::Create => SubmitRequest::Create(fields),
            FormMode::Edit(id) => SubmitRequest::Update(id.clone(), fields),
        }))
    }

    /// Apply the outcome of a create or update request.
    ///
    /// On success the form notifies, closes, and navigates to the list; the
    /// saved record is returned when the service sent one back. On failure it
    /// notifies with the upstream payload and returns to [`FormPhase::Ready`]
    /// with every entered value intact. Outcomes that arrive when no submit
    /// is in flight are discarded as `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Transport`] when `result` is an error.
    pub fn finish_submit(
        &mut self,
        result: Result<Option<Customer>, CustomerTransportError>,
        notifier: &dyn Notifier,
        navigator: &dyn Navigator,
    ) -> Result<Option<Customer>, FlowError> {
        if self.phase != FormPhase::Submitting {
            debug!(phase = ?self.phase, "discarding submit outcome");
            return Ok(None);
        }
        let verb = match self.mode {
            FormMode::Create => "create",
            FormMode::Edit(_) => "update",
        };
        match result {
            Ok(customer) => {
                match &customer {
                    Some(saved) => info!(customer_id = %saved.id, action = verb, "customer saved"),
                    None => info!(action = verb, "customer saved without a returned record"),
                }
                self.phase = FormPhase::Closed;
                notifier.success(match self.mode {
                    FormMode::Create => "Customer created successfully",
                    FormMode::Edit(_) => "Customer updated successfully",
                });
                navigator.go_to(Route::List);
                Ok(customer)
            }
            Err(error) => {
                warn!(error = %error, action = verb, "failed to save customer");
                self.phase = FormPhase::Ready;
                let payload = error.payload().unwrap_or(FALLBACK_ERROR_PAYLOAD);
                notifier.error(&format!("Failed to {verb} customer: {payload}"));
                Err(FlowError::Transport(error))
            }
        }
    }

    /// Validate, send, and apply the outcome in one step.
    ///
    /// Returns `Ok(None)` when the form was not accepting submissions or the
    /// service did not send the saved record back.
    ///
    /// # Errors
    ///
    /// See [`CustomerForm::begin_submit`] and [`CustomerForm::finish_submit`].
    pub async fn submit(&mut self, ports: &ViewPorts) -> Result<Option<Customer>, FlowError> {
        let Some(request) = self.begin_submit()? else {
            return Ok(None);
        };
        let result = request.send(ports.transport.as_ref()).await;
        self.finish_submit(result, ports.notifier.as_ref(), ports.navigator.as_ref())
    }
}

#[cfg(test)]
mod tests;
