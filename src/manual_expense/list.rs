//! Endpoint for listing a user's manual expenses.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{
    Error, UserID,
    app_state::lock_connection,
    manual_expense::{ManualExpenseState, get_manual_expenses_by_user},
};

/// Read the user ID from a request body that is a bare JSON scalar.
///
/// Clients send either a number or a string holding a number. Falsy values
/// (`null`, `false`, `0`, `""` and empty arrays or objects) count as missing.
///
/// # Errors
///
/// Returns [Error::MissingUserId] for falsy values and [Error::InvalidRequest]
/// for anything else that is not an integer.
pub fn parse_user_id(body: &Value) -> Result<UserID, Error> {
    match body {
        Value::Null | Value::Bool(false) => Err(Error::MissingUserId),
        Value::String(text) if text.is_empty() => Err(Error::MissingUserId),
        Value::Array(values) if values.is_empty() => Err(Error::MissingUserId),
        Value::Object(map) if map.is_empty() => Err(Error::MissingUserId),
        Value::Number(number) if number.as_f64() == Some(0.0) => Err(Error::MissingUserId),
        Value::Number(number) => number.as_i64().map(UserID::new).ok_or_else(|| {
            Error::InvalidRequest(format!("user_id must be an integer, got {number}"))
        }),
        Value::String(text) => text
            .trim()
            .parse()
            .map(UserID::new)
            .map_err(|_| Error::InvalidRequest(format!("user_id must be an integer, got {text:?}"))),
        other => Err(Error::InvalidRequest(format!(
            "user_id must be an integer, got {other}"
        ))),
    }
}

/// Read the user ID from the raw request body.
///
/// An empty body counts as a missing user ID.
fn parse_body(body: &[u8]) -> Result<UserID, Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::MissingUserId);
    }

    let value: Value = serde_json::from_slice(body)
        .map_err(|error| Error::InvalidRequest(format!("body is not valid JSON: {error}")))?;

    parse_user_id(&value)
}

/// List all manual expenses for the user ID in the request body.
///
/// A user with no expenses gets a 404 rather than an empty list.
pub async fn get_manual_expenses_endpoint(
    State(state): State<ManualExpenseState>,
    body: Bytes,
) -> Response {
    let user_id = match parse_body(&body) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_response(),
    };

    let connection = match lock_connection(&state.db_connection) {
        Ok(connection) => connection,
        Err(error) => return error.into_response(),
    };

    match get_manual_expenses_by_user(user_id, &connection) {
        Ok(expenses) if expenses.is_empty() => Error::NoEntriesFound.into_response(),
        Ok(expenses) => Json(expenses).into_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while listing manual expenses for user {user_id}: {error}"
            );
            error.into_response()
        }
    }
}


#[cfg(test)]
mod get_manual_expenses_endpoint_tests {
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{
        AppState, UserID, endpoints,
        manual_expense::{
            ManualExpense, ManualExpenseState, NewManualExpense, create_manual_expense,
            create_manual_expense_table, get_manual_expenses_endpoint,
        },
    };

    fn get_test_state() -> ManualExpenseState {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_manual_expense_table(&connection).expect("Could not create manual expense table");

        ManualExpenseState {
            db_connection: AppState::new(connection, 4).db_connection,
        }
    }

    fn get_test_server(state: ManualExpenseState) -> TestServer {
        let app = Router::new()
            .route(endpoints::GET_MANUAL_ENTRY, post(get_manual_expenses_endpoint))
            .with_state(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    fn insert_expense(state: &ManualExpenseState, user_id: i64, amount: f64) -> ManualExpense {
        create_manual_expense(
            NewManualExpense {
                user_id: UserID::new(user_id),
                amount,
                category: "Food".to_owned(),
                business: "Cafe".to_owned(),
                date: "today".to_owned(),
                description: None,
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test expense")
    }

    #[tokio::test]
    async fn returns_users_expenses() {
        let state = get_test_state();
        let want = vec![insert_expense(&state, 1, 1.0), insert_expense(&state, 1, 2.0)];
        insert_expense(&state, 2, 3.0);
        let server = get_test_server(state);

        let response = server.post(endpoints::GET_MANUAL_ENTRY).json(&json!(1)).await;

        response.assert_status_ok();
        assert_eq!(response.json::<Vec<ManualExpense>>(), want);
    }

    #[tokio::test]
    async fn expense_json_has_expected_fields() {
        let state = get_test_state();
        insert_expense(&state, 1, 1.0);
        let server = get_test_server(state);

        let response = server.post(endpoints::GET_MANUAL_ENTRY).json(&json!("1")).await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(
            body[0],
            json!({
                "id": 1,
                "user_id": 1,
                "amount": 1.0,
                "category": "Food",
                "business": "Cafe",
                "date": "today",
                "description": null
            })
        );
    }

    #[tokio::test]
    async fn no_expenses_returns_not_found() {
        let server = get_test_server(get_test_state());

        let response = server.post(endpoints::GET_MANUAL_ENTRY).json(&json!(1)).await;

        response.assert_status_not_found();
        assert_eq!(
            response.json::<Value>()["error"],
            "No entries found for this user"
        );
    }

    #[tokio::test]
    async fn empty_body_returns_bad_request() {
        let server = get_test_server(get_test_state());

        let response = server.post(endpoints::GET_MANUAL_ENTRY).await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "Missing user_id");
    }

    #[tokio::test]
    async fn malformed_body_returns_bad_request() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::GET_MANUAL_ENTRY)
            .text("{not json")
            .await;

        response.assert_status_bad_request();
        assert!(response.json::<Value>()["error"].is_string());
    }

    #[tokio::test]
    async fn missing_user_id_returns_bad_request() {
        let server = get_test_server(get_test_state());

        let response = server
            .post(endpoints::GET_MANUAL_ENTRY)
            .json(&json!(null))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["error"], "Missing user_id");
    }
}
