//! This file defines the route for handling log-in requests.

use std::sync::Mutex;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use tokio::task;

use crate::{
    Error, UserID,
    app_state::lock_connection,
    auth::CredentialState,
    user::{User, get_user_by_phone_number},
};

/// The raw data entered by the user in the log-in form.
///
/// The phone number and password are stored as plain strings. There is no need for validation
/// here since they will be compared against the digests and hashes in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInData {
    pub phone_number: String,
    pub password: String,
}

/// The body of a successful log-in response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInResponse {
    pub message: String,
    pub username: String,
    pub user_id: UserID,
}

/// Check the phone number and password against the registered users.
///
/// The database lock is only held for the user lookup. The password is
/// checked on the blocking thread pool.
///
/// # Errors
///
/// This function will return an error in a few situations.
/// - [Error::UserNotFound]: the phone number does not belong to a registered user.
/// - [Error::InvalidPassword]: the password is not correct.
/// - [Error::HashingError]: the stored hash could not be read.
/// - [Error::DatabaseLockError] or [Error::SqlError] on storage failures.
pub async fn log_in(data: &LogInData, db_connection: &Mutex<Connection>) -> Result<User, Error> {
    let user = {
        let connection = lock_connection(db_connection)?;

        match get_user_by_phone_number(&data.phone_number, &connection) {
            Ok(user) => user,
            Err(Error::NotFound) => return Err(Error::UserNotFound),
            Err(error) => return Err(error),
        }
    };

    let password_hash = user.password_hash.clone();
    let raw_password = data.password.clone();
    let is_password_valid = task::spawn_blocking(move || password_hash.verify(&raw_password))
        .await
        .map_err(|error| Error::HashingError(format!("verification task failed: {error}")))?
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !is_password_valid {
        return Err(Error::InvalidPassword);
    }

    Ok(user)
}

/// Handler for log-in requests via the POST method.
///
/// On success, responds with the user's name and ID. The password hash is never returned.
pub async fn log_in_endpoint(
    State(state): State<CredentialState>,
    WithRejection(Json(data), _): WithRejection<Json<LogInData>, Error>,
) -> Response {
    match log_in(&data, &state.db_connection).await {
        Ok(user) => {
            tracing::info!("User {} logged in", user.id);

            (
                StatusCode::OK,
                Json(LogInResponse {
                    message: "Login successful!".to_owned(),
                    username: user.username,
                    user_id: user.id,
                }),
            )
                .into_response()
        }
        Err(error @ (Error::UserNotFound | Error::InvalidPassword)) => {
            tracing::warn!("Rejected log-in attempt: {error}");
            error.into_response()
        }
        Err(error) => {
            tracing::error!("Unhandled error while verifying credentials: {error}");
            error.into_response()
        }
    }
}
