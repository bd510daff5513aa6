//! Endpoint for listing a user's payment dues.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use serde_json::json;

use crate::{
    Error, UserID,
    app_state::lock_connection,
    payment_due::{PaymentDueState, get_payment_dues_by_user},
};

/// List the payment dues of the user in the path.
///
/// Unlike manual expenses, a user with no payment dues gets an empty list.
pub async fn get_payment_dues_endpoint(
    State(state): State<PaymentDueState>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, Error>,
) -> Response {
    let user_id = UserID::new(user_id);

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_response(),
    };

    match get_payment_dues_by_user(user_id, &connection) {
        Ok(payment_dues) => Json(json!({ "payment_dues": payment_dues })).into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while listing payment dues for user {user_id}: {error}"
            );
            error.into_response()
        }
    }
}
