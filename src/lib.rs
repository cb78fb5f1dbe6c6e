//! Masroofy is a web app for tracking personal income and expenses.
//!
//! This library provides a server that directly serves HTML pages. All
//! reads and writes go through an in-memory transaction cache; signing in
//! with an email additionally syncs that cache against a hosted document
//! store, with local state always applied first and remote writes made on
//! a best-effort basis.

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod aggregation;
mod auth;
mod dispatch;
mod endpoints;
mod export;
mod home;
mod html;
mod internal_server_error;
mod navigation;
mod not_found;
mod remote;
mod reports;
mod routing;
mod state;
mod timezone;
mod transaction;

pub use remote::{ConvexRemoteStore, RemoteFailureLog, RemoteStore};
pub use routing::build_router;
pub use state::AppState;

use crate::{internal_server_error::InternalServerError, not_found::NotFoundError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An empty string was used as a transaction name.
    #[error("Transaction name cannot be empty")]
    EmptyName,

    /// A negative or non-finite amount was used to create a transaction.
    ///
    /// Amounts are unsigned magnitudes; direction comes from the
    /// transaction type.
    #[error("{0} is not a valid amount, amounts must be zero or more")]
    InvalidAmount(f64),

    /// A CSV or PDF document could not be produced.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("could not encode the export document: {0}")]
    ExportFailed(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the
    /// transaction id is correct and that the transaction has not been
    /// deleted in the meantime.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<csv::Error> for Error {
    fn from(value: csv::Error) -> Self {
        Error::ExportFailed(value.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::EmptyName | Error::InvalidAmount(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()).into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}
