//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::{
    AppState, Error,
    auth::{log_in_endpoint, sign_up_endpoint},
    endpoints,
    manual_expense::{create_manual_expense_endpoint, get_manual_expenses_endpoint},
    payment_due::{
        create_payment_due_endpoint, delete_payment_due_endpoint, get_payment_dues_endpoint,
        update_payment_due_endpoint,
    },
};

/// The message returned by the root route.
pub const WELCOME_MESSAGE: &str = "Welcome to the Finology API Server!";

/// Return a router with all the app's routes.
///
/// Every route accepts cross-origin requests from any origin.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index))
        .route(endpoints::SIGN_UP, post(sign_up_endpoint))
        .route(endpoints::LOG_IN, post(log_in_endpoint))
        .route(endpoints::MANUAL_ENTRY, post(create_manual_expense_endpoint))
        .route(
            endpoints::GET_MANUAL_ENTRY,
            post(get_manual_expenses_endpoint),
        )
        .route(endpoints::PAYMENT_DUES, post(create_payment_due_endpoint))
        .route(
            endpoints::PAYMENT_DUE,
            get(get_payment_dues_endpoint)
                .put(update_payment_due_endpoint)
                .delete(delete_payment_due_endpoint),
        )
        .fallback(get_404_not_found)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The root path '/' greets the client.
async fn get_index() -> Response {
    (StatusCode::OK, Json(WELCOME_MESSAGE)).into_response()
}

async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}
