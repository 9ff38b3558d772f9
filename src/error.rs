//! Error types for the expense tracker client.

use thiserror::Error;

/// Failure of a call against the remote API.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The server answered 401; the session has already been torn down.
    #[error("Unauthorized: session expired or missing")]
    Unauthorized,

    /// Any other non-2xx answer, with the raw response body.
    #[error("Request failed with status {status}")]
    Status { status: u16, body: String },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Messages the backend attached to `field`, e.g. `{"username": ["taken"]}`.
    ///
    /// Returns `None` when the error carries no JSON body or the field is absent.
    pub fn field_messages(&self, field: &str) -> Option<Vec<String>> {
        let Self::Status { body, .. } = self else {
            return None;
        };
        let json = serde_json::from_str::<serde_json::Value>(body).ok()?;
        match json.get(field)? {
            serde_json::Value::Array(items) => Some(
                items
                    .iter()
                    .map(|item| match item.as_str() {
                        Some(text) => text.to_string(),
                        None => item.to_string(),
                    })
                    .collect(),
            ),
            serde_json::Value::String(text) => Some(vec![text.clone()]),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(err: gloo_net::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// A draft that must not be sent. The display text is shown to the user as is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Please choose one of the listed categories.")]
    UnknownCategory,

    #[error("Please enter a valid date.")]
    InvalidDate,

    #[error("Amount must be greater than 0.")]
    NonPositiveAmount,

    #[error("Amount must be a valid number with up to 2 decimal places.")]
    InvalidAmountFormat,
}

pub type Result<T> = std::result::Result<T, ApiError>;
