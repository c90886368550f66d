//! Plain-text rendering of the customer views.
//!
//! Renderers only read view state; they never call ports. Every function
//! writes complete lines to the supplied sink.

use std::io::{self, Write};

use crate::domain::validation::Field;
use crate::domain::{
    Customer, CustomerForm, CustomerList, FormPhase, HEADER_BRAND, ListDisplay, Route, Toast,
    ToastLevel, header_links,
};

/// Render the static application header.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn header(out: &mut dyn Write) -> io::Result<()> {
    let links = header_links()
        .iter()
        .map(|(link, route)| {
            if link.primary {
                format!("[{}] ({route})", link.label)
            } else {
                format!("{} ({route})", link.label)
            }
        })
        .collect::<Vec<_>>();
    writeln!(out, "{HEADER_BRAND}  |  {}", links.join("  |  "))?;
    writeln!(out)
}

/// Render the list view.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn list(out: &mut dyn Write, view: &CustomerList) -> io::Result<()> {
    let cards = match view.display() {
        ListDisplay::Loading => return writeln!(out, "Loading customers..."),
        ListDisplay::Empty => None,
        ListDisplay::Cards(cards) => Some(cards),
    };
    writeln!(out, "Customer Management")?;
    writeln!(out, "Manage your customer database")?;
    writeln!(out)?;
    let Some(cards) = cards else {
        writeln!(out, "No customers found")?;
        writeln!(out, "Get started by adding your first customer")?;
        return writeln!(out, "[Add Customer] ({})", Route::Create);
    };
    for customer in cards {
        card(out, customer, view.is_deleting(&customer.id))?;
    }
    Ok(())
}

fn card(out: &mut dyn Write, customer: &Customer, deleting: bool) -> io::Result<()> {
    let status = if customer.is_active() {
        "Active"
    } else {
        "Inactive"
    };
    writeln!(out, "#{} {} [{status}]", customer.id, customer.name)?;
    writeln!(out, "    {}", customer.email)?;
    if let Some(address) = customer.display_address() {
        writeln!(out, "    {address}")?;
    }
    let delete = if deleting { "Delete (deleting...)" } else { "Delete" };
    writeln!(
        out,
        "    Edit ({})  |  {delete}",
        Route::Edit(customer.id.clone())
    )?;
    writeln!(out)
}

/// Render the create/edit form with inline field messages.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn form(out: &mut dyn Write, view: &CustomerForm) -> io::Result<()> {
    match view.phase() {
        FormPhase::InitialLoading => return writeln!(out, "Loading customer details..."),
        FormPhase::Closed => return Ok(()),
        FormPhase::Ready | FormPhase::Submitting => {}
    }
    writeln!(out, "{}", view.title())?;
    for field in Field::ALL {
        writeln!(out, "{}: {}", field.label(), field.value(view.values()))?;
        if let Some(message) = view.errors().message(field) {
            writeln!(out, "    ! {message}")?;
        }
    }
    writeln!(out, "Status: {}", view.status_text())?;
    writeln!(out, "[{}]  [Cancel]", view.submit_label())?;
    writeln!(out)
}

/// Render pending notifications, oldest first.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn toasts(out: &mut dyn Write, toasts: &[Toast]) -> io::Result<()> {
    for toast in toasts {
        let tag = match toast.level {
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
        };
        writeln!(out, "[{tag}] {}", toast.message)?;
    }
    Ok(())
}

/// Render the route the session ended on.
///
/// # Errors
///
/// Returns any error raised by `out`.
pub fn route(out: &mut dyn Write, route: &Route) -> io::Result<()> {
    writeln!(out, "-> {route}")
}
