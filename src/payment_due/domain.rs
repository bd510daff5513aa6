//! Core payment due domain types.

use serde::{Deserialize, Deserializer, Serialize};

use crate::UserID;

/// Database identifier for a payment due.
pub type PaymentDueId = i64;

/// A payment the user has to make on a certain date.
///
/// `user_id` refers to a user but is not checked against the user table,
/// and `date` is kept exactly as the client sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDue {
    pub id: PaymentDueId,
    pub user_id: UserID,
    pub amount: f64,
    pub description: Option<String>,
    pub category: String,
    pub date: String,
}

/// The data a client sends to create a payment due.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPaymentDue {
    pub user_id: UserID,
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    pub date: String,
}

/// A partial update to a payment due.
///
/// Fields that are `None` keep their stored value. For `description`,
/// `Some(None)` clears the stored value, which is how an explicit JSON
/// `null` is read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentDueUpdate {
    pub user_id: Option<UserID>,
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub description: Option<Option<String>>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl PaymentDue {
    /// Overwrite the fields set in `update`, keeping the rest.
    pub fn apply(self, update: PaymentDueUpdate) -> Self {
        Self {
            id: self.id,
            user_id: update.user_id.unwrap_or(self.user_id),
            amount: update.amount.unwrap_or(self.amount),
            description: update.description.unwrap_or(self.description),
            category: update.category.unwrap_or(self.category),
            date: update.date.unwrap_or(self.date),
        }
    }
}

// Only called when the key is present, so `null` becomes `Some(None)`.
fn deserialize_present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod payment_due_update_tests {
    use serde_json::json;

    use crate::{
        UserID,
        payment_due::{PaymentDue, PaymentDueUpdate},
    };

    fn payment_due() -> PaymentDue {
        PaymentDue {
            id: 1,
            user_id: UserID::new(1),
            amount: 100.0,
            description: Some("Rent".to_owned()),
            category: "Housing".to_owned(),
            date: "2024-09-01".to_owned(),
        }
    }

    #[test]
    fn empty_update_keeps_everything() {
        let due = payment_due();

        assert_eq!(due.clone().apply(PaymentDueUpdate::default()), due);
    }

    #[test]
    fn update_overwrites_given_fields_only() {
        let update = PaymentDueUpdate {
            amount: Some(120.0),
            date: Some("2024-10-01".to_owned()),
            ..Default::default()
        };

        let got = payment_due().apply(update);

        assert_eq!(
            got,
            PaymentDue {
                amount: 120.0,
                date: "2024-10-01".to_owned(),
                ..payment_due()
            }
        );
    }

    #[test]
    fn absent_description_is_none() {
        let update: PaymentDueUpdate = serde_json::from_value(json!({ "amount": 5.0 })).unwrap();

        assert_eq!(update.description, None);
        assert_eq!(update.amount, Some(5.0));
    }

    #[test]
    fn null_description_clears_value() {
        let update: PaymentDueUpdate =
            serde_json::from_value(json!({ "description": null })).unwrap();

        assert_eq!(update.description, Some(None));
        assert_eq!(payment_due().apply(update).description, None);
    }

    #[test]
    fn null_required_field_is_treated_as_absent() {
        let update: PaymentDueUpdate =
            serde_json::from_value(json!({ "category": null })).unwrap();

        assert_eq!(payment_due().apply(update).category, "Housing");
    }
}
