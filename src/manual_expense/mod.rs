//! Manual expense entries recorded by users.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::AppState;

mod create;
mod db;
mod domain;
mod list;

pub use create::create_manual_expense_endpoint;
pub use db::{create_manual_expense, create_manual_expense_table, get_manual_expenses_by_user};
pub use domain::{ManualExpense, ManualExpenseId, NewManualExpense};
pub use list::{get_manual_expenses_endpoint, parse_user_id};

/// The state needed for creating and listing manual expenses.
#[derive(Debug, Clone)]
pub struct ManualExpenseState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ManualExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}
