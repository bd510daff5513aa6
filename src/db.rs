//! Schema migration for the application's database.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    manual_expense::create_manual_expense_table, payment_due::create_payment_due_table,
    user::create_user_table,
};

/// Create the tables for all domain models if they do not already exist.
///
/// This should be run once before the server starts handling requests. All
/// tables are created in a single exclusive transaction, so a failure leaves
/// the database untouched.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_user_table(&transaction)?;
    create_manual_expense_table(&transaction)?;
    create_payment_due_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
