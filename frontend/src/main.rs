//! `customer-frontend` entry-point: loads settings, wires the HTTP transport
//! into the views, and runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use frontend::domain::ToastDispatcher;
use frontend::inbound::cli::{self, CliArgs, CommandError, Session};
use frontend::inbound::terminal::LinePrompt;
use frontend::outbound::http::CustomerHttpTransport;
use frontend::settings::FrontendSettings;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let settings = FrontendSettings::load_from_iter([OsString::from("customer-frontend")])
        .wrap_err("failed to load frontend settings")?;
    init_tracing(settings.json_logs);

    let base_url = settings.api_base_url(args.base_url.as_deref())?;
    info!(%base_url, "using customer service");
    let transport = CustomerHttpTransport::new(base_url).wrap_err("failed to build HTTP client")?;
    let session = Session::new(
        Arc::new(transport),
        ToastDispatcher::new(Arc::new(DefaultClock)),
        Arc::new(LinePrompt::stdio()),
    );

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to create Tokio runtime")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let outcome = runtime.block_on(cli::run(&args.command, &session, &mut out));
    out.flush().wrap_err("failed to flush output")?;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CommandError::Output(source)) => {
            Err(source).wrap_err("failed to write view output")
        }
        Err(failure) => {
            error!(error = %failure, "command failed");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = installed {
        warn!(error = %e, "tracing init failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_tracing_init_is_tolerated() {
        init_tracing(false);
        init_tracing(true);
    }
}
