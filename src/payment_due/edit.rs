//! Payment due update endpoint.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::{
    Error,
    app_state::lock_connection,
    payment_due::{PaymentDueId, PaymentDueState, PaymentDueUpdate, update_payment_due},
};

/// Update the fields given in the request body, keeping the others.
///
/// Any caller may update any payment due, ownership is not checked.
pub async fn update_payment_due_endpoint(
    State(state): State<PaymentDueState>,
    WithRejection(Path(payment_due_id), _): WithRejection<Path<PaymentDueId>, Error>,
    WithRejection(Json(update), _): WithRejection<Json<PaymentDueUpdate>, Error>,
) -> Response {
    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_response(),
    };

    match update_payment_due(payment_due_id, update, &connection) {
        Ok(_) => Json(json!({ "message": "PaymentDue updated successfully" })).into_response(),
        Err(Error::UpdateMissingPaymentDue) => Error::UpdateMissingPaymentDue.into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating payment due {payment_due_id}: {error}"
            );
            error.into_response()
        }
    }
}
