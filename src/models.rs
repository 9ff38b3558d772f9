use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Transport,
    Entertainment,
    Utilities,
    Healthcare,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Transport,
        Category::Entertainment,
        Category::Utilities,
        Category::Healthcare,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Healthcare => "Healthcare",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownCategory;

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or(UnknownCategory)
    }
}

/// An expense as stored by the backend.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Expense {
    pub id: i64,
    pub date: String,
    pub category: Category,
    pub description: String,
    #[serde(deserialize_with = "decimal_string")]
    pub amount: String,
}

/// Body of create and update calls.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ExpensePayload {
    pub date: String,
    pub category: Category,
    pub description: String,
    pub amount: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegistrationRequest {
    pub username: String,
    pub password: String,
    pub password2: String,
}

#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access: String,
}

// Decimal fields come back as "12.50", but older backends emit bare numbers.
fn decimal_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Decimal::deserialize(deserializer)? {
        Decimal::Text(text) => text,
        Decimal::Number(number) => number.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_only_the_closed_set() {
        assert_eq!("Healthcare".parse::<Category>(), Ok(Category::Healthcare));
        assert_eq!("food".parse::<Category>(), Err(UnknownCategory));
        assert_eq!("".parse::<Category>(), Err(UnknownCategory));
    }

    #[test]
    fn expense_accepts_string_or_numeric_amount() {
        let list: Vec<Expense> = serde_json::from_str(
            r#"[
                {"id": 1, "date": "2024-05-01", "category": "Food", "description": "Lunch", "amount": "12.50", "user": 3},
                {"id": 2, "date": "2024-05-02", "category": "Other", "description": "Gift", "amount": 40}
            ]"#,
        )
        .unwrap();

        assert_eq!(list[0].amount, "12.50");
        assert_eq!(list[1].amount, "40");
        assert_eq!(list[1].category, Category::Other);
    }

    #[test]
    fn payload_serializes_category_as_label() {
        let payload = ExpensePayload {
            date: "2024-05-01".to_string(),
            category: Category::Transport,
            description: "Bus".to_string(),
            amount: "2.75".to_string(),
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["category"], "Transport");
        assert!(json.get("id").is_none());
    }
}
