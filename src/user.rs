//! Code for creating the user table and fetching users from the database.

use std::fmt::Display;

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};

use crate::{CredentialDigest, Error, PasswordHash};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to better compile time
/// errors, and more flexible generics that can have distinct implementations for multiple ID types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct UserID(i64);

impl UserID {
    /// Create a new user ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Cast the user ID to a 64 bit integer.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
///
/// Only the username is stored in clear. The phone number and email are
/// stored as digests and the password as a salted hash.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// The user's ID in the application database.
    pub id: UserID,
    /// The user's display name, not necessarily unique.
    pub username: String,
    /// The user's password hash.
    pub password_hash: PasswordHash,
    /// The digest of the user's phone number.
    pub phone_number_hash: CredentialDigest,
    /// The digest of the user's email address.
    pub email_hash: CredentialDigest,
}

/// The fields needed to insert a new user.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub password_hash: PasswordHash,
    pub phone_number_hash: CredentialDigest,
    pub email_hash: CredentialDigest,
}

/// Create the user table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY,
                username TEXT NOT NULL,
                password TEXT NOT NULL,
                phone_number_hash TEXT NOT NULL UNIQUE,
                email_hash TEXT NOT NULL UNIQUE
                )",
        (),
    )?;

    Ok(())
}

/// Create and insert a new user into the database.
///
/// # Errors
///
/// Returns a:
/// - [Error::DuplicatePhoneNumber] if the phone number digest is already taken,
/// - [Error::DuplicateEmail] if the email digest is already taken,
/// - [Error::SqlError] if some other SQL related error occurred.
pub fn create_user(new_user: NewUser, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO user (username, password, phone_number_hash, email_hash)
        VALUES (?1, ?2, ?3, ?4)",
        (
            &new_user.username,
            new_user.password_hash.as_ref(),
            new_user.phone_number_hash.as_ref(),
            new_user.email_hash.as_ref(),
        ),
    )?;

    let id = UserID::new(connection.last_insert_rowid());

    Ok(User {
        id,
        username: new_user.username,
        password_hash: new_user.password_hash,
        phone_number_hash: new_user.phone_number_hash,
        email_hash: new_user.email_hash,
    })
}

/// Get the user from the database with an ID equal to `user_id`.
///
/// # Errors
///
/// This function will return an error if:
/// - `user_id` does not belong to a registered user.
/// - there was an error trying to access the store.
#[cfg(test)]
pub fn get_user_by_id(user_id: UserID, connection: &Connection) -> Result<User, Error> {
    connection
        .prepare(
            "SELECT id, username, password, phone_number_hash, email_hash
            FROM user WHERE id = :id",
        )?
        .query_row(&[(":id", &user_id.as_i64())], map_row)
        .map_err(|error| error.into())
}

/// Get the user whose phone number digest matches the digest of `phone_number`.
///
/// # Errors
///
/// Returns [Error::NotFound] if no user is registered with that phone number,
/// or [Error::SqlError] if some other SQL related error occurred.
pub fn get_user_by_phone_number(phone_number: &str, connection: &Connection) -> Result<User, Error> {
    let phone_number_hash = CredentialDigest::of(phone_number);

    connection
        .prepare(
            "SELECT id, username, password, phone_number_hash, email_hash
            FROM user WHERE phone_number_hash = :phone_number_hash",
        )?
        .query_row(
            &[(":phone_number_hash", phone_number_hash.as_ref())],
            map_row,
        )
        .map_err(|error| error.into())
}

/// Check whether a user is registered with the phone number digest.
pub fn phone_number_hash_exists(
    phone_number_hash: &CredentialDigest,
    connection: &Connection,
) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM user WHERE phone_number_hash = ?1)",
            (phone_number_hash.as_ref(),),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

/// Check whether a user is registered with the email digest.
pub fn email_hash_exists(
    email_hash: &CredentialDigest,
    connection: &Connection,
) -> Result<bool, Error> {
    connection
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM user WHERE email_hash = ?1)",
            (email_hash.as_ref(),),
            |row| row.get(0),
        )
        .map_err(|error| error.into())
}

fn map_row(row: &Row) -> Result<User, rusqlite::Error> {
    let raw_id = row.get(0)?;
    let username = row.get(1)?;
    let raw_password_hash: String = row.get(2)?;
    let raw_phone_number_hash: String = row.get(3)?;
    let raw_email_hash: String = row.get(4)?;

    Ok(User {
        id: UserID::new(raw_id),
        username,
        password_hash: PasswordHash::new_unchecked(&raw_password_hash),
        phone_number_hash: CredentialDigest::new_unchecked(&raw_phone_number_hash),
        email_hash: CredentialDigest::new_unchecked(&raw_email_hash),
    })
}
