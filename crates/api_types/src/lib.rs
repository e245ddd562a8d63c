use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Eur,
    Usd,
    Ron,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Expense,
    Income,
}

pub mod entry {
    use super::*;

    /// Amount as sent by a client: a JSON number or a decimal string.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum AmountInput {
        Number(serde_json::Number),
        Text(String),
    }

    impl AmountInput {
        /// Decimal text handed to the engine parser.
        pub fn as_text(&self) -> String {
            match self {
                Self::Number(number) => number.to_string(),
                Self::Text(text) => text.clone(),
            }
        }
    }

    /// Request body for `POST /expenses` and `POST /incomes`.
    ///
    /// Every field is optional on the wire so that a missing field is reported
    /// as a validation error rather than a decoding error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct EntryNew {
        #[serde(default)]
        pub date: Option<String>,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub amount: Option<AmountInput>,
    }

    /// An entry as stored: expenses negative, incomes positive.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct EntryView {
        pub id: i64,
        pub date: NaiveDate,
        pub category: String,
        pub amount: f64,
    }
}

pub mod category {
    use super::*;

    /// Request body for creating a category: either a bare JSON string or
    /// `{"name": ...}`.
    #[derive(Debug, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum CategoryNew {
        Bare(String),
        Named { name: String },
    }

    impl CategoryNew {
        pub fn name(&self) -> &str {
            match self {
                Self::Bare(name) | Self::Named { name } => name,
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreated {
        pub name: String,
    }

    /// Request body for `PATCH /categories/{name}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryRename {
        pub name: String,
    }

    /// `renamed` is false when the new name was already taken or equal to
    /// the old one.
    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryRenamed {
        pub renamed: bool,
        pub entries_rewritten: usize,
    }
}

pub mod ledger {
    use super::*;

    /// One row of the chronological ledger.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct LedgerRowView {
        pub id: i64,
        pub date: NaiveDate,
        pub category: String,
        pub amount: f64,
        pub kind: EntryKind,
        pub balance: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct CategoryTotalView {
        pub category: String,
        pub total: f64,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    pub struct Statistic {
        pub currency: Currency,
        pub income_total: f64,
        pub expense_total: f64,
        pub net_balance: f64,
    }
}

#[cfg(test)]
mod tests {
    use super::category::CategoryNew;
    use super::entry::{AmountInput, EntryNew};

    #[test]
    fn category_body_accepts_string_or_object() {
        let bare: CategoryNew = serde_json::from_str("\"Food\"").unwrap();
        assert_eq!(bare.name(), "Food");
        let named: CategoryNew = serde_json::from_str(r#"{"name":"Rent"}"#).unwrap();
        assert_eq!(named.name(), "Rent");
    }

    #[test]
    fn amount_accepts_number_or_string() {
        let body: EntryNew =
            serde_json::from_str(r#"{"date":"2024-01-01","category":"Food","amount":12.5}"#)
                .unwrap();
        assert_eq!(body.amount.unwrap().as_text(), "12.5");

        let body: EntryNew =
            serde_json::from_str(r#"{"date":"2024-01-01","category":"Food","amount":"7"}"#)
                .unwrap();
        assert_eq!(body.amount, Some(AmountInput::Text("7".to_string())));
    }

    #[test]
    fn missing_fields_decode_as_none() {
        let body: EntryNew = serde_json::from_str("{}").unwrap();
        assert!(body.date.is_none() && body.category.is_none() && body.amount.is_none());
    }
}
