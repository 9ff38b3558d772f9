//! The create/edit form and the checks it must pass before anything is sent.

use crate::error::ValidationError;
use crate::models::{Category, Expense, ExpensePayload};
use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+(\.\d{0,2})?$").expect("amount pattern is valid"))
}

/// Today's date in ISO form, UTC.
pub fn today() -> String {
    chrono::Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DraftField {
    Date,
    Category,
    Description,
    Amount,
}

/// Form state. Detached from the list: editing a draft never touches the
/// expense it was copied from.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    pub id: String,
    pub date: String,
    pub category: String,
    pub description: String,
    pub amount: String,
    pub is_editing: bool,
}

impl Default for Draft {
    fn default() -> Self {
        Self::blank(today())
    }
}

impl Draft {
    pub fn blank(date: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            date: date.into(),
            category: String::new(),
            description: String::new(),
            amount: String::new(),
            is_editing: false,
        }
    }

    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            date: expense.date.clone(),
            category: expense.category.to_string(),
            description: expense.description.clone(),
            amount: expense.amount.to_string(),
            is_editing: true,
        }
    }

    pub fn set(&mut self, field: DraftField, value: String) {
        match field {
            DraftField::Date => self.date = value,
            DraftField::Category => self.category = value,
            DraftField::Description => self.description = value,
            DraftField::Amount => self.amount = value,
        }
    }

    /// Validates the draft and decides which call it turns into.
    ///
    /// Checks run in a fixed order: presence, positivity, then the
    /// two-decimal pattern.
    pub fn plan(&self) -> Result<Submission, ValidationError> {
        let fields = [&self.date, &self.category, &self.description, &self.amount];
        if fields.iter().any(|value| value.trim().is_empty()) {
            return Err(ValidationError::MissingFields);
        }

        let amount = self.amount.as_str();
        // Text that is not a number at all falls through to the pattern check.
        if matches!(amount.trim().parse::<f64>(), Ok(value) if value <= 0.0) {
            return Err(ValidationError::NonPositiveAmount);
        }
        // The pattern sees the raw text, so padded amounts are rejected.
        if !amount_pattern().is_match(amount) {
            return Err(ValidationError::InvalidAmountFormat);
        }

        let category = self
            .category
            .parse::<Category>()
            .map_err(|_| ValidationError::UnknownCategory)?;
        let date = self.date.trim();
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?;

        let payload = ExpensePayload {
            date: date.to_string(),
            category,
            description: self.description.clone(),
            amount: amount.to_string(),
        };

        if self.is_editing {
            let id = self
                .id
                .parse::<i64>()
                .map_err(|_| ValidationError::MissingFields)?;
            Ok(Submission::Update { id, payload })
        } else {
            Ok(Submission::Create(payload))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(ExpensePayload),
    Update { id: i64, payload: ExpensePayload },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(amount: &str) -> Draft {
        Draft {
            category: "Food".into(),
            description: "Groceries".into(),
            amount: amount.into(),
            ..Draft::blank("2024-03-09")
        }
    }

    #[test]
    fn blank_draft_is_in_create_mode() {
        let draft = Draft::blank("2024-03-09");
        assert!(!draft.is_editing);
        assert!(draft.id.is_empty() && draft.category.is_empty());
        assert_eq!(Draft::default().date.len(), 10);
    }

    #[test]
    fn every_field_is_required() {
        for field in [
            DraftField::Date,
            DraftField::Category,
            DraftField::Description,
            DraftField::Amount,
        ] {
            let mut draft = filled("10");
            draft.set(field, "  ".into());
            assert_eq!(draft.plan(), Err(ValidationError::MissingFields), "{:?}", field);
        }
    }

    #[test]
    fn amount_must_be_positive() {
        assert_eq!(filled("0").plan(), Err(ValidationError::NonPositiveAmount));
        assert_eq!(filled("0.00").plan(), Err(ValidationError::NonPositiveAmount));
        assert_eq!(filled("-4").plan(), Err(ValidationError::NonPositiveAmount));
    }

    #[test]
    fn amount_allows_at_most_two_decimals() {
        assert_eq!(filled("12.345").plan(), Err(ValidationError::InvalidAmountFormat));
        assert_eq!(filled("abc").plan(), Err(ValidationError::InvalidAmountFormat));
        assert_eq!(filled(".5").plan(), Err(ValidationError::InvalidAmountFormat));
        assert_eq!(filled("1e3").plan(), Err(ValidationError::InvalidAmountFormat));

        for ok in ["12", "12.", "12.3", "12.34"] {
            assert!(filled(ok).plan().is_ok(), "{}", ok);
        }
    }

    #[test]
    fn whitespace_counts_as_missing_and_is_not_trimmed_from_amounts() {
        let mut draft = filled("10");
        draft.description = "   ".into();
        assert_eq!(draft.plan(), Err(ValidationError::MissingFields));

        assert_eq!(filled(" 12").plan(), Err(ValidationError::InvalidAmountFormat));
        assert_eq!(filled("12 ").plan(), Err(ValidationError::InvalidAmountFormat));
        assert_eq!(filled(" 0").plan(), Err(ValidationError::NonPositiveAmount));
    }

    #[test]
    fn category_and_date_must_be_well_formed() {
        let mut draft = filled("3");
        draft.category = "Rent".into();
        assert_eq!(draft.plan(), Err(ValidationError::UnknownCategory));

        let mut draft = filled("3");
        draft.date = "09/03/2024".into();
        assert_eq!(draft.plan(), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn create_mode_plans_a_create() {
        let plan = filled("5.50").plan().unwrap();
        assert_eq!(
            plan,
            Submission::Create(ExpensePayload {
                date: "2024-03-09".into(),
                category: Category::Food,
                description: "Groceries".into(),
                amount: "5.50".into(),
            })
        );
    }

    #[test]
    fn edit_mode_targets_the_copied_id() {
        let expense = Expense {
            id: 7,
            date: "2024-02-01".into(),
            category: Category::Utilities,
            description: "Power".into(),
            amount: "80.00".into(),
        };
        let mut draft = Draft::from_expense(&expense);
        assert_eq!(draft.id, "7");
        assert!(draft.is_editing);

        draft.set(DraftField::Description, "Electricity".into());
        match draft.plan().unwrap() {
            Submission::Update { id, payload } => {
                assert_eq!(id, 7);
                assert_eq!(payload.description, "Electricity");
            }
            other => panic!("expected update, got {:?}", other),
        }
        // The source expense is untouched.
        assert_eq!(expense.description, "Power");
    }
}
