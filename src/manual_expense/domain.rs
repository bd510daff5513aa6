//! Core manual expense domain types.

use serde::{Deserialize, Serialize};

use crate::UserID;

/// Database identifier for a manual expense.
pub type ManualExpenseId = i64;

/// An expense the user entered by hand.
///
/// `user_id` refers to a user but is not checked against the user table,
/// and `date` is kept exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualExpense {
    pub id: ManualExpenseId,
    pub user_id: UserID,
    pub amount: f64,
    pub category: String,
    pub business: String,
    pub date: String,
    pub description: Option<String>,
}

/// The data a client sends to record a manual expense.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewManualExpense {
    pub user_id: UserID,
    pub amount: f64,
    pub category: String,
    pub business: String,
    pub date: String,
    #[serde(default)]
    pub description: Option<String>,
}
