//! Database operations for payment dues.

use rusqlite::{Connection, Row, Transaction, TransactionBehavior};

use crate::{
    Error, UserID,
    payment_due::{NewPaymentDue, PaymentDue, PaymentDueId, PaymentDueUpdate},
};

/// Create a payment due and return it with its generated ID.
pub fn create_payment_due(
    payment_due: NewPaymentDue,
    connection: &Connection,
) -> Result<PaymentDue, Error> {
    connection.execute(
        "INSERT INTO payment_due (user_id, amount, description, category, date)
        VALUES (?1, ?2, ?3, ?4, ?5);",
        (
            payment_due.user_id.as_i64(),
            payment_due.amount,
            &payment_due.description,
            &payment_due.category,
            &payment_due.date,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(PaymentDue {
        id,
        user_id: payment_due.user_id,
        amount: payment_due.amount,
        description: payment_due.description,
        category: payment_due.category,
        date: payment_due.date,
    })
}

/// Retrieve a single payment due by ID.
pub fn get_payment_due(id: PaymentDueId, connection: &Connection) -> Result<PaymentDue, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, description, category, date
            FROM payment_due WHERE id = :id;",
        )?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all payment dues for `user_id` in insertion order.
pub fn get_payment_dues_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<PaymentDue>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, description, category, date
            FROM payment_due WHERE user_id = :user_id ORDER BY id ASC;",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_payment_due| maybe_payment_due.map_err(|error| error.into()))
        .collect()
}

/// Apply a partial update to a payment due and return the stored result.
///
/// The read and the write happen in one transaction. Concurrent updates to the
/// same payment due are not detected, the last one to commit wins.
///
/// # Errors
///
/// Returns [Error::UpdateMissingPaymentDue] if there is no payment due with `id`.
pub fn update_payment_due(
    id: PaymentDueId,
    update: PaymentDueUpdate,
    connection: &Connection,
) -> Result<PaymentDue, Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let payment_due = match get_payment_due(id, &transaction) {
        Ok(payment_due) => payment_due.apply(update),
        Err(Error::NotFound) => return Err(Error::UpdateMissingPaymentDue),
        Err(error) => return Err(error),
    };

    transaction.execute(
        "UPDATE payment_due
        SET user_id = ?1, amount = ?2, description = ?3, category = ?4, date = ?5
        WHERE id = ?6",
        (
            payment_due.user_id.as_i64(),
            payment_due.amount,
            &payment_due.description,
            &payment_due.category,
            &payment_due.date,
            payment_due.id,
        ),
    )?;

    transaction.commit()?;

    Ok(payment_due)
}

/// Delete a payment due by ID. Returns an error if the payment due doesn't exist.
pub fn delete_payment_due(id: PaymentDueId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM payment_due WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingPaymentDue);
    }

    Ok(())
}

/// Initialize the payment due table.
pub fn create_payment_due_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS payment_due (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            description TEXT,
            category TEXT NOT NULL,
            date TEXT NOT NULL
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<PaymentDue, rusqlite::Error> {
    Ok(PaymentDue {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        amount: row.get(2)?,
        description: row.get(3)?,
        category: row.get(4)?,
        date: row.get(5)?,
    })
}
