//! Manual expense creation endpoint.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::{
    Error,
    app_state::lock_connection,
    manual_expense::{ManualExpenseState, NewManualExpense, create_manual_expense},
};

/// Record a manual expense.
///
/// The expense is stored as given: the user ID, amount and date are not checked.
pub async fn create_manual_expense_endpoint(
    State(state): State<ManualExpenseState>,
    WithRejection(Json(new_expense), _): WithRejection<Json<NewManualExpense>, Error>,
) -> Response {
    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_response(),
    };

    match create_manual_expense(new_expense, &connection) {
        Ok(expense) => {
            tracing::debug!(
                "Created manual expense {} for user {}",
                expense.id,
                expense.user_id
            );

            (
                StatusCode::CREATED,
                Json(json!({ "message": "Expense added successfully!" })),
            )
                .into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a manual expense: {error}");
            error.into_response()
        }
    }
}
