//! Test utilities for the frontend crate.
//!
//! Deterministic doubles for the view ports, shared by unit tests (in `src/`)
//! and behaviour tests (in `tests/`). Compiled for tests and when the
//! `test-support` feature is enabled.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::ports::{
    ConfirmationPrompt, CustomerTransport, CustomerTransportError, Navigator, Notifier,
};
use crate::domain::{Customer, CustomerFields, CustomerId, Route};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One call observed by [`InMemoryCustomerTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    FetchAll,
    FetchOne(CustomerId),
    Create(CustomerFields),
    Update(CustomerId, CustomerFields),
    Delete(CustomerId),
}

/// Operation selector used to script failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportOperation {
    FetchAll,
    FetchOne,
    Create,
    Update,
    Delete,
}

impl TransportCall {
    const fn operation(&self) -> TransportOperation {
        match self {
            Self::FetchAll => TransportOperation::FetchAll,
            Self::FetchOne(_) => TransportOperation::FetchOne,
            Self::Create(_) => TransportOperation::Create,
            Self::Update(..) => TransportOperation::Update,
            Self::Delete(_) => TransportOperation::Delete,
        }
    }
}

#[derive(Debug, Default)]
struct StoreState {
    customers: Vec<Customer>,
    next_id: u64,
    failures: VecDeque<(TransportOperation, CustomerTransportError)>,
    calls: Vec<TransportCall>,
}

/// In-memory stand-in for the customer service.
///
/// Behaves like the real service (ids assigned on create, 404 for unknown
/// ids) and records every call. Failures can be queued per operation with
/// [`InMemoryCustomerTransport::fail_next`].
#[derive(Debug, Default)]
pub struct InMemoryCustomerTransport {
    state: Mutex<StoreState>,
}

impl InMemoryCustomerTransport {
    /// Start with `customers` already stored.
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        let next_id = customers
            .iter()
            .filter_map(|customer| customer.id.as_ref().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max + 1);
        Self {
            state: Mutex::new(StoreState {
                customers,
                next_id,
                ..StoreState::default()
            }),
        }
    }

    /// Make the next call to `operation` fail with `error`.
    pub fn fail_next(&self, operation: TransportOperation, error: CustomerTransportError) {
        lock(&self.state).failures.push_back((operation, error));
    }

    /// Every call received so far.
    pub fn calls(&self) -> Vec<TransportCall> {
        lock(&self.state).calls.clone()
    }

    /// Number of calls matching `operation`.
    pub fn count(&self, operation: TransportOperation) -> usize {
        lock(&self.state)
            .calls
            .iter()
            .filter(|call| call.operation() == operation)
            .count()
    }

    /// Customers currently stored.
    pub fn customers(&self) -> Vec<Customer> {
        lock(&self.state).customers.clone()
    }

    fn record(
        &self,
        call: TransportCall,
    ) -> Result<MutexGuard<'_, StoreState>, CustomerTransportError> {
        let mut state = lock(&self.state);
        let operation = call.operation();
        state.calls.push(call);
        let scripted = state
            .failures
            .iter()
            .position(|(candidate, _)| *candidate == operation);
        if let Some(error) = scripted.and_then(|index| state.failures.remove(index)) {
            return Err(error.1);
        }
        Ok(state)
    }
}

fn not_found() -> CustomerTransportError {
    CustomerTransportError::status(404_u16, "Customer not found")
}

fn customer_from(id: CustomerId, fields: &CustomerFields) -> Customer {
    Customer {
        id,
        name: fields.name.clone(),
        email: fields.email.clone(),
        address: Some(fields.address.clone()),
        status: Some(fields.status),
    }
}

#[async_trait]
impl CustomerTransport for InMemoryCustomerTransport {
    async fn fetch_all(&self) -> Result<Vec<Customer>, CustomerTransportError> {
        let state = self.record(TransportCall::FetchAll)?;
        Ok(state.customers.clone())
    }

    async fn fetch_one(&self, id: &CustomerId) -> Result<Customer, CustomerTransportError> {
        let state = self.record(TransportCall::FetchOne(id.clone()))?;
        state
            .customers
            .iter()
            .find(|customer| &customer.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create(
        &self,
        fields: &CustomerFields,
    ) -> Result<Option<Customer>, CustomerTransportError> {
        let mut state = self.record(TransportCall::Create(fields.clone()))?;
        let id = CustomerId::new(state.next_id.to_string())
            .map_err(|err| CustomerTransportError::decode(err.to_string()))?;
        state.next_id += 1;
        let customer = customer_from(id, fields);
        state.customers.push(customer.clone());
        Ok(Some(customer))
    }

    async fn update(
        &self,
        id: &CustomerId,
        fields: &CustomerFields,
    ) -> Result<Customer, CustomerTransportError> {
        let mut state = self.record(TransportCall::Update(id.clone(), fields.clone()))?;
        let slot = state
            .customers
            .iter_mut()
            .find(|customer| &customer.id == id)
            .ok_or_else(not_found)?;
        *slot = customer_from(id.clone(), fields);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), CustomerTransportError> {
        let mut state = self.record(TransportCall::Delete(id.clone()))?;
        let before = state.customers.len();
        state.customers.retain(|customer| &customer.id != id);
        if state.customers.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

/// Notifier that remembers every message.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Every notification, in order.
    pub fn events(&self) -> Vec<Notification> {
        lock(&self.events).clone()
    }

    /// Success messages, in order.
    pub fn successes(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Notification::Success(message) => Some(message),
                Notification::Error(_) => None,
            })
            .collect()
    }

    /// Error messages, in order.
    pub fn errors(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Notification::Error(message) => Some(message),
                Notification::Success(_) => None,
            })
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        lock(&self.events).push(Notification::Success(message.to_owned()));
    }

    fn error(&self, message: &str) {
        lock(&self.events).push(Notification::Error(message.to_owned()));
    }
}

/// Navigator that remembers every route change.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    routes: Mutex<Vec<Route>>,
}

impl RecordingNavigator {
    /// Every route visited, in order.
    pub fn routes(&self) -> Vec<Route> {
        lock(&self.routes).clone()
    }

    /// Most recent route, if any.
    pub fn last(&self) -> Option<Route> {
        lock(&self.routes).last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn go_to(&self, route: Route) {
        lock(&self.routes).push(route);
    }
}

/// Confirmation prompt with a fixed answer that records each question.
#[derive(Debug)]
pub struct ScriptedPrompt {
    answer: bool,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    /// Prompt that always answers `answer`.
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far.
    pub fn asked(&self) -> Vec<String> {
        lock(&self.asked).clone()
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        lock(&self.asked).push(message.to_owned());
        self.answer
    }
}

/// Build a customer with the given id, name, and an email derived from it.
///
/// # Panics
///
/// Panics when `id` is not a valid [`CustomerId`].
pub fn customer(id: &str, name: &str) -> Customer {
    let id = CustomerId::new(id).unwrap_or_else(|err| panic!("fixture id must be valid: {err}"));
    let local = name.to_lowercase().replace(' ', ".");
    Customer {
        id,
        name: name.to_owned(),
        email: format!("{local}@example.com"),
        address: None,
        status: Some(true),
    }
}
