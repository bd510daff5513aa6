//! Registration and log-in for users identified by their phone number.
//!
//! Phone numbers and emails are looked up by their [CredentialDigest](crate::CredentialDigest),
//! passwords are checked against a salted [PasswordHash](crate::PasswordHash).
//! Nothing is kept between calls, the user table is the only state.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod log_in;
mod sign_up;

pub use log_in::{LogInData, LogInResponse, log_in, log_in_endpoint};
pub use sign_up::{SignUpData, sign_up, sign_up_endpoint};

/// The state needed for registering and logging in users.
#[derive(Debug, Clone)]
pub struct CredentialState {
    /// The bcrypt cost used when hashing new passwords.
    pub hash_cost: u32,
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CredentialState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            hash_cost: state.hash_cost,
            db_connection: state.db_connection.clone(),
        }
    }
}
