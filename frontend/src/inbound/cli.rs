//! Command-line surface: one subcommand per view flow.
//!
//! Each command opens its view, drives it to completion through the domain
//! state machines, and renders the result to the supplied sink. Pending
//! notifications and the route the session ended on are always printed, even
//! when the flow failed.

use std::io::{self, Write};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use super::render;
use super::terminal::{PresetAnswer, SessionNavigator};
use crate::domain::ports::{ConfirmationPrompt, CustomerTransport, ViewPorts};
use crate::domain::{
    CustomerForm, CustomerId, CustomerList, DeleteOutcome, FlowError, Route, ToastDispatcher,
};

/// `customer-frontend` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "customer-frontend",
    about = "Browse, create, edit, and delete customers held by the customer service",
    version
)]
pub struct CliArgs {
    /// Customer service base URL. Overrides `CUSTOMER_FRONTEND_API_BASE_URL`.
    #[arg(long = "base-url", value_name = "url", global = true)]
    pub base_url: Option<String>,
    /// View flow to run.
    #[command(subcommand)]
    pub command: Command,
}

/// View flows exposed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Show every customer.
    List,
    /// Create a customer.
    Add(AddArgs),
    /// Edit an existing customer.
    Edit(EditArgs),
    /// Delete a customer after confirmation.
    Delete(DeleteArgs),
}

impl Command {
    /// Route the command's view is mounted at.
    pub fn route(&self) -> Route {
        match self {
            Self::List | Self::Delete(_) => Route::List,
            Self::Add(_) => Route::Create,
            Self::Edit(args) => Route::Edit(args.id.clone()),
        }
    }
}

/// Values for a new customer. Omitted text fields are left blank.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AddArgs {
    /// Full name.
    #[arg(long)]
    pub name: Option<String>,
    /// Email address.
    #[arg(long)]
    pub email: Option<String>,
    /// Postal address.
    #[arg(long)]
    pub address: Option<String>,
    /// Create the customer as inactive.
    #[arg(long)]
    pub inactive: bool,
}

/// Changes to an existing customer. Omitted fields keep their loaded value.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct EditArgs {
    /// Customer identifier.
    pub id: CustomerId,
    /// Replacement full name.
    #[arg(long)]
    pub name: Option<String>,
    /// Replacement email address.
    #[arg(long)]
    pub email: Option<String>,
    /// Replacement postal address.
    #[arg(long)]
    pub address: Option<String>,
    /// Flip the active flag.
    #[arg(long = "toggle-status")]
    pub toggle_status: bool,
}

/// Customer to delete.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct DeleteArgs {
    /// Customer identifier.
    pub id: CustomerId,
    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Why a command did not complete.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The view flow ended in failure; it has already been reported.
    #[error(transparent)]
    Flow(#[from] FlowError),
    /// The requested customer is not in the fetched list.
    #[error("customer {0} is not in the customer list")]
    UnknownCustomer(CustomerId),
    /// Rendering to the output sink failed.
    #[error("failed to write view output: {0}")]
    Output(#[from] io::Error),
}

/// Long-lived collaborators shared by every command.
#[derive(Clone)]
pub struct Session {
    transport: Arc<dyn CustomerTransport>,
    toasts: ToastDispatcher,
    prompt: Arc<dyn ConfirmationPrompt>,
}

impl Session {
    /// Bundle the transport, toast queue, and interactive prompt.
    pub fn new(
        transport: Arc<dyn CustomerTransport>,
        toasts: ToastDispatcher,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        Self {
            transport,
            toasts,
            prompt,
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("toasts", &self.toasts)
            .finish_non_exhaustive()
    }
}

/// Run `command` and render everything it produced to `out`.
///
/// # Errors
///
/// Returns [`CommandError`] when the flow failed or output could not be
/// written. Notifications and the final route are rendered first.
pub async fn run(
    command: &Command,
    session: &Session,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let navigator = Arc::new(SessionNavigator::starting_at(command.route()));
    let ports = ViewPorts::new(
        session.transport.clone(),
        Arc::new(session.toasts.clone()),
        navigator.clone(),
    );
    debug!(route = %command.route(), "running command");

    render::header(out)?;
    let outcome = match command {
        Command::List => list(&ports, out).await,
        Command::Add(args) => add(args, &ports, out).await,
        Command::Edit(args) => edit(args, &ports, out).await,
        Command::Delete(args) => {
            let preset = PresetAnswer(true);
            let prompt: &dyn ConfirmationPrompt = if args.yes {
                &preset
            } else {
                session.prompt.as_ref()
            };
            delete(&args.id, prompt, &ports, out).await
        }
    };

    render::toasts(out, &session.toasts.drain())?;
    render::route(out, &navigator.current())?;
    outcome
}

async fn list(ports: &ViewPorts, out: &mut dyn Write) -> Result<(), CommandError> {
    let mut view = CustomerList::new();
    render::list(out, &view)?;
    let loaded = view.load(ports).await;
    render::list(out, &view)?;
    loaded?;
    Ok(())
}

async fn add(args: &AddArgs, ports: &ViewPorts, out: &mut dyn Write) -> Result<(), CommandError> {
    let mut view = CustomerForm::new(None);
    apply_overrides(
        &mut view,
        args.name.as_deref(),
        args.email.as_deref(),
        args.address.as_deref(),
    );
    if args.inactive {
        view.toggle_status();
    }
    submit(&mut view, ports, out).await
}

async fn edit(args: &EditArgs, ports: &ViewPorts, out: &mut dyn Write) -> Result<(), CommandError> {
    let mut view = CustomerForm::new(Some(args.id.clone()));
    render::form(out, &view)?;
    view.load(ports).await?;
    apply_overrides(
        &mut view,
        args.name.as_deref(),
        args.email.as_deref(),
        args.address.as_deref(),
    );
    if args.toggle_status {
        view.toggle_status();
    }
    submit(&mut view, ports, out).await
}

fn apply_overrides(
    view: &mut CustomerForm,
    name: Option<&str>,
    email: Option<&str>,
    address: Option<&str>,
) {
    if let Some(name) = name {
        view.set_name(name);
    }
    if let Some(email) = email {
        view.set_email(email);
    }
    if let Some(address) = address {
        view.set_address(address);
    }
}

async fn submit(
    view: &mut CustomerForm,
    ports: &ViewPorts,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let outcome = view.submit(ports).await;
    if outcome.is_err() {
        render::form(out, view)?;
    }
    outcome?;
    Ok(())
}

async fn delete(
    id: &CustomerId,
    prompt: &dyn ConfirmationPrompt,
    ports: &ViewPorts,
    out: &mut dyn Write,
) -> Result<(), CommandError> {
    let mut view = CustomerList::new();
    let loaded = view.load(ports).await;
    render::list(out, &view)?;
    loaded?;

    if !view.customers().iter().any(|customer| &customer.id == id) {
        return Err(CommandError::UnknownCustomer(id.clone()));
    }
    let outcome = view.delete(id, prompt, ports).await;
    if !matches!(outcome, Ok(DeleteOutcome::Skipped)) {
        render::list(out, &view)?;
    }
    outcome?;
    Ok(())
}
