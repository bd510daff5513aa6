//! Database operations for manual expenses.

use rusqlite::{Connection, Row};

use crate::{
    Error, UserID,
    manual_expense::{ManualExpense, NewManualExpense},
};

/// Create a manual expense and return it with its generated ID.
pub fn create_manual_expense(
    expense: NewManualExpense,
    connection: &Connection,
) -> Result<ManualExpense, Error> {
    connection.execute(
        "INSERT INTO manual_expense (user_id, amount, category, business, date, description)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
        (
            expense.user_id.as_i64(),
            expense.amount,
            &expense.category,
            &expense.business,
            &expense.date,
            &expense.description,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(ManualExpense {
        id,
        user_id: expense.user_id,
        amount: expense.amount,
        category: expense.category,
        business: expense.business,
        date: expense.date,
        description: expense.description,
    })
}

/// Retrieve all manual expenses for `user_id` in insertion order.
///
/// An empty vector is returned if the user has no expenses, callers decide
/// whether that is an error.
pub fn get_manual_expenses_by_user(
    user_id: UserID,
    connection: &Connection,
) -> Result<Vec<ManualExpense>, Error> {
    connection
        .prepare(
            "SELECT id, user_id, amount, category, business, date, description
            FROM manual_expense WHERE user_id = :user_id ORDER BY id ASC;",
        )?
        .query_map(&[(":user_id", &user_id.as_i64())], map_row)?
        .map(|maybe_expense| maybe_expense.map_err(|error| error.into()))
        .collect()
}

/// Initialize the manual expense table.
pub fn create_manual_expense_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS manual_expense (
            id INTEGER PRIMARY KEY,
            user_id INTEGER NOT NULL,
            amount REAL NOT NULL,
            category TEXT NOT NULL,
            business TEXT NOT NULL,
            date TEXT NOT NULL,
            description TEXT
        );",
        (),
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<ManualExpense, rusqlite::Error> {
    Ok(ManualExpense {
        id: row.get(0)?,
        user_id: UserID::new(row.get(1)?),
        amount: row.get(2)?,
        category: row.get(3)?,
        business: row.get(4)?,
        date: row.get(5)?,
        description: row.get(6)?,
    })
}
