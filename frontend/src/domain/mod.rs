//! Domain types and view state machines.
//!
//! Purpose: Model customer records, field validation, and the behaviour of
//! the list and form views independently of any transport or terminal. Views
//! talk to the outside world only through the traits in [`ports`].
//!
//! Public surface:
//! - Customer / CustomerId / CustomerFields (record shapes and identifiers).
//! - CustomerList (list view with per-record delete confirmation).
//! - CustomerForm (shared create/edit form with inline validation).
//! - Route (navigation targets and the header link set).
//! - ToastDispatcher (shared notification queue with auto-dismiss).
//! - FlowError (failure surfaced by a user action).

pub mod customer;
pub mod error;
pub mod form;
pub mod listing;
pub mod navigation;
pub mod notification;
pub mod ports;
pub mod validation;

pub use self::customer::{Customer, CustomerFields, CustomerId, CustomerIdValidationError};
pub use self::error::FlowError;
pub use self::form::{CustomerForm, FormMode, FormPhase, SubmitRequest};
pub use self::listing::{CustomerList, DeleteOutcome, DeleteTicket, ListDisplay, ListPhase};
pub use self::navigation::{HEADER_BRAND, HeaderLink, Route, RouteParseError, header_links};
pub use self::notification::{Toast, ToastDispatcher, ToastId, ToastLevel, ToastLifetimes};
pub use self::validation::{Field, FieldError, FieldErrors};
