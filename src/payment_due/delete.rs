//! Payment due deletion endpoint.

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
    payment_due::{PaymentDueId, PaymentDueState, delete_payment_due},
};

/// Delete a payment due.
///
/// Any caller may delete any payment due, ownership is not checked.
pub async fn delete_payment_due_endpoint(
    State(state): State<PaymentDueState>,
    WithRejection(Path(payment_due_id), _): WithRejection<Path<PaymentDueId>, Error>,
) -> Response {
    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_response(),
    };

    match delete_payment_due(payment_due_id, &connection) {
        Ok(_) => Json(json!({ "message": "PaymentDue deleted successfully" })).into_response(),
        Err(Error::DeleteMissingPaymentDue) => Error::DeleteMissingPaymentDue.into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting payment due {payment_due_id}: {error}"
            );
            error.into_response()
        }
    }
}

#[cfg(test)]
mod delete_payment_due_endpoint_tests {
    use axum::{Router, routing::delete};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::Value;

    use crate::{
        AppState, Error, UserID,
        endpoints::{self, format_endpoint},
        payment_due::{
            NewPaymentDue, PaymentDueState, create_payment_due, create_payment_due_table,
            delete_payment_due_endpoint, get_payment_due,
        },
    };

    fn get_test_state() -> PaymentDueState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_payment_due_table(&connection).expect("Could not create payment due table");

        PaymentDueState {
            db_connection: AppState::new(connection, 4).db_connection,
        }
    }

    fn get_test_server(state: PaymentDueState) -> TestServer {
        let app = Router::new()
            .route(endpoints::PAYMENT_DUE, delete(delete_payment_due_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn delete_payment_due_succeeds() {
        let state = get_test_state();
        let payment_due = create_payment_due(
            NewPaymentDue {
                user_id: UserID::new(1),
                amount: 100.0,
                description: None,
                category: "Housing".to_owned(),
                date: "2024-09-01".to_owned(),
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test payment due");
        let server = get_test_server(state.clone());
        let path = format_endpoint(endpoints::PAYMENT_DUE, payment_due.id);

        let response = server.delete(&path).await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["message"],
            "PaymentDue deleted successfully"
        );
        assert_eq!(
            get_payment_due(payment_due.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );

        server.delete(&path).await.assert_status_not_found();
    }

    #[tokio::test]
    async fn delete_missing_payment_due_returns_not_found() {
        let server = get_test_server(get_test_state());

        let response = server
            .delete(&format_endpoint(endpoints::PAYMENT_DUE, 999999))
            .await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["error"], "PaymentDue not found");
    }
}
