//! Finology is a backend for tracking personal finances.
//!
//! This library provides a JSON REST API for registering and logging in users,
//! recording manual expense entries and managing scheduled payment dues.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod app_state;
mod auth;
mod db;
mod digest;
pub mod endpoints;
mod logging;
mod manual_expense;
mod password;
mod payment_due;
mod routing;
mod user;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use db::initialize as initialize_db;
pub use digest::CredentialDigest;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::PasswordHash;
pub use routing::build_router;
pub use user::{User, UserID};

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
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body or path could not be parsed, or a required field
    /// was missing.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The request to list manual entries did not include a user ID.
    #[error("Missing user_id")]
    MissingUserId,

    /// The phone number is already registered to another user.
    #[error("Phone number already exists")]
    DuplicatePhoneNumber,

    /// The email address is already registered to another user.
    #[error("Email already exists")]
    DuplicateEmail,

    /// No user is registered with the given phone number.
    #[error("User not found")]
    UserNotFound,

    /// The password did not match the stored password hash.
    #[error("Invalid password")]
    InvalidPassword,

    /// The user has no manual expense entries.
    ///
    /// Clients rely on an empty result being reported as an error rather
    /// than an empty list.
    #[error("No entries found for this user")]
    NoEntriesFound,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to update a payment due that does not exist
    #[error("PaymentDue not found")]
    UpdateMissingPaymentDue,

    /// Tried to delete a payment due that does not exist
    #[error("PaymentDue not found")]
    DeleteMissingPaymentDue,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.phone_number_hash") =>
            {
                Error::DuplicatePhoneNumber
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.email_hash") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::InvalidRequest(rejection.body_text())
    }
}

impl Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidRequest(_)
            | Error::MissingUserId
            | Error::DuplicatePhoneNumber
            | Error::DuplicateEmail => StatusCode::BAD_REQUEST,
            Error::InvalidPassword => StatusCode::UNAUTHORIZED,
            Error::UserNotFound
            | Error::NoEntriesFound
            | Error::NotFound
            | Error::UpdateMissingPaymentDue
            | Error::DeleteMissingPaymentDue => StatusCode::NOT_FOUND,
            Error::HashingError(_) | Error::SqlError(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if status.is_server_error() {
            // Any errors that are not handled above are not intended to be shown to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "An internal error occurred. Please try again later.".to_owned()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
