//! Payment due creation endpoint.

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
    payment_due::{NewPaymentDue, PaymentDueState, create_payment_due},
};

/// Create a payment due and respond with its ID.
pub async fn create_payment_due_endpoint(
    State(state): State<PaymentDueState>,
    WithRejection(Json(new_payment_due), _): WithRejection<Json<NewPaymentDue>, Error>,
) -> Response {
    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_response(),
    };

    match create_payment_due(new_payment_due, &connection) {
        Ok(payment_due) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "PaymentDue added successfully",
                "id": payment_due.id
            })),
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a payment due: {error}");
            error.into_response()
        }
    }
}
