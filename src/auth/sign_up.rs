//! Registering new users.

use std::sync::Mutex;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::WithRejection;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::task;

use crate::{
    CredentialDigest, Error, PasswordHash,
    app_state::lock_connection,
    auth::CredentialState,
    user::{NewUser, User, create_user, email_hash_exists, phone_number_hash_exists},
};

/// The data a client sends to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpData {
    pub username: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

/// Register a new user.
///
/// The phone number is checked before the email, and both are checked
/// before the password is hashed so rejected requests are cheap. The
/// password is hashed on the blocking thread pool with the database lock
/// released.
///
/// # Errors
///
/// This function will return:
/// - [Error::DuplicatePhoneNumber] if the phone number is already registered,
/// - [Error::DuplicateEmail] if the email is already registered,
/// - [Error::HashingError] if the password could not be hashed,
/// - [Error::DatabaseLockError] or [Error::SqlError] on storage failures.
pub async fn sign_up(
    data: &SignUpData,
    hash_cost: u32,
    db_connection: &Mutex<Connection>,
) -> Result<User, Error> {
    let phone_number_hash = CredentialDigest::of(&data.phone_number);
    let email_hash = CredentialDigest::of(&data.email);

    {
        let connection = lock_connection(db_connection)?;

        if phone_number_hash_exists(&phone_number_hash, &connection)? {
            return Err(Error::DuplicatePhoneNumber);
        }

        if email_hash_exists(&email_hash, &connection)? {
            return Err(Error::DuplicateEmail);
        }
    }

    let raw_password = data.password.clone();
    let password_hash =
        task::spawn_blocking(move || PasswordHash::new(&raw_password, hash_cost))
            .await
            .map_err(|error| Error::HashingError(format!("hashing task failed: {error}")))??;

    // A concurrent sign up may have taken the phone number or email since the
    // check above, the unique constraints report that as the same error.
    let connection = lock_connection(db_connection)?;
    create_user(
        NewUser {
            username: data.username.clone(),
            password_hash,
            phone_number_hash,
            email_hash,
        },
        &connection,
    )
}

/// Handler for sign up requests via the POST method.
///
/// Responds with 201 on success. The response never echoes any of the
/// submitted credentials.
pub async fn sign_up_endpoint(
    State(state): State<CredentialState>,
    WithRejection(Json(data), _): WithRejection<Json<SignUpData>, Error>,
) -> Response {
    match sign_up(&data, state.hash_cost, &state.db_connection).await {
        Ok(user) => {
            tracing::info!("Registered user {}", user.id);

            (
                StatusCode::CREATED,
                Json(json!({ "message": "User created successfully!" })),
            )
                .into_response()
        }
        Err(error @ (Error::DuplicatePhoneNumber | Error::DuplicateEmail)) => {
            tracing::info!("Rejected sign up: {error}");
            error.into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while registering a user: {error}");
            error.into_response()
        }
    }
}

#[cfg(test)]
mod sign_up_tests {
    use std::sync::Mutex;

    use rusqlite::Connection;

    use crate::{
        CredentialDigest, Error,
        auth::{SignUpData, sign_up},
        user::{create_user_table, get_user_by_id},
    };

    fn get_db_connection() -> Mutex<Connection> {
        let connection =
            Connection::open_in_memory().expect("Could not open in-memory SQLite database");
        create_user_table(&connection).expect("Could not create user table");

        Mutex::new(connection)
    }

    fn sign_up_data(phone_number: &str, email: &str, password: &str) -> SignUpData {
        SignUpData {
            username: "a".to_owned(),
            phone_number: phone_number.to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }

    #[tokio::test]
    async fn sign_up_stores_digests_and_hash() {
        let db_connection = get_db_connection();

        let user = sign_up(&sign_up_data("555", "a@x.com", "p1"), 4, &db_connection).await.unwrap();

        let stored_user = get_user_by_id(user.id, &db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored_user.username, "a");
        assert_eq!(stored_user.phone_number_hash, CredentialDigest::of("555"));
        assert_eq!(stored_user.email_hash, CredentialDigest::of("a@x.com"));
        assert_ne!(stored_user.password_hash.as_ref(), "p1");
        assert!(stored_user.password_hash.verify("p1").unwrap());
    }

    #[tokio::test]
    async fn sign_up_fails_on_duplicate_phone_number() {
        let db_connection = get_db_connection();
        sign_up(&sign_up_data("555", "a@x.com", "p1"), 4, &db_connection).await.unwrap();

        let result = sign_up(&sign_up_data("555", "b@x.com", "p2"), 4, &db_connection).await;

        assert_eq!(result, Err(Error::DuplicatePhoneNumber));
    }

    #[tokio::test]
    async fn sign_up_reports_phone_before_email() {
        let db_connection = get_db_connection();
        sign_up(&sign_up_data("555", "a@x.com", "p1"), 4, &db_connection).await.unwrap();

        let result = sign_up(&sign_up_data("555", "a@x.com", "p1"), 4, &db_connection).await;

        assert_eq!(result, Err(Error::DuplicatePhoneNumber));
    }

    #[tokio::test]
    async fn rejected_sign_up_leaves_existing_user_unchanged() {
        let db_connection = get_db_connection();
        let user = sign_up(&sign_up_data("555", "a@x.com", "p1"), 4, &db_connection)
            .await
            .unwrap();

        let result = sign_up(&sign_up_data("555", "b@x.com", "p2"), 4, &db_connection).await;

        assert_eq!(result, Err(Error::DuplicatePhoneNumber));
        let stored_user = get_user_by_id(user.id, &db_connection.lock().unwrap()).unwrap();
        assert_eq!(stored_user, user);
        assert!(stored_user.password_hash.verify("p1").unwrap());
    }

    #[tokio::test]
    async fn sign_up_fails_on_duplicate_email() {
        let db_connection = get_db_connection();
        sign_up(&sign_up_data("555", "a@x.com", "p1"), 4, &db_connection).await.unwrap();

        let result = sign_up(&sign_up_data("556", "a@x.com", "p1"), 4, &db_connection).await;

        assert_eq!(result, Err(Error::DuplicateEmail));
    }

    #[tokio::test]
    async fn same_password_produces_different_hashes() {
        let db_connection = get_db_connection();

        let first = sign_up(&sign_up_data("555", "a@x.com", "p1"), 4, &db_connection)
            .await
            .unwrap();
        let second = sign_up(&sign_up_data("556", "b@x.com", "p1"), 4, &db_connection)
            .await
            .unwrap();

        assert_ne!(first.password_hash, second.password_hash);
    }

    #[tokio::test]
    async fn concurrent_sign_ups_release_lock_while_hashing() {
        let db_connection = get_db_connection();
        let first_data = sign_up_data("555", "a@x.com", "p1");
        let second_data = sign_up_data("556", "b@x.com", "p2");

        let (first, second) = tokio::join!(
            sign_up(&first_data, 4, &db_connection),
            sign_up(&second_data, 4, &db_connection),
        );

        assert_ne!(first.unwrap().id, second.unwrap().id);
    }

    #[tokio::test]
    async fn sign_up_fails_on_invalid_hash_cost() {
        let db_connection = get_db_connection();

        let result = sign_up(&sign_up_data("555", "a@x.com", "p1"), 0, &db_connection).await;

        assert!(matches!(result, Err(Error::HashingError(_))));
    }
}
