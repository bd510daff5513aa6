//! Scheduled payments a user owes.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod list;

pub use create::create_payment_due_endpoint;
pub use db::{
    create_payment_due, create_payment_due_table, delete_payment_due, get_payment_due,
    get_payment_dues_by_user, update_payment_due,
};
pub use delete::delete_payment_due_endpoint;
pub use domain::{NewPaymentDue, PaymentDue, PaymentDueId, PaymentDueUpdate};
pub use edit::update_payment_due_endpoint;
pub use list::get_payment_dues_endpoint;

/// The state needed for the payment due endpoints.
#[derive(Debug, Clone)]
pub struct PaymentDueState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for PaymentDueState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
