//! Typed access to the expense backend.
//!
//! Every call goes through [`ApiClient::execute`], which is also where the
//! process-wide 401 rule lives: the observer fires once for the response and
//! the caller still gets the error back.

mod transport;

pub use transport::{GlooTransport, HttpRequest, HttpResponse, Method, Transport};

#[cfg(test)]
pub(crate) use transport::mock::MockTransport;

use crate::error::{ApiError, Result};
use crate::models::{Credentials, Expense, ExpensePayload, RegistrationRequest, TokenResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use yew::Callback;

#[derive(Clone)]
pub struct ApiClient<T: Transport = GlooTransport> {
    base_url: String,
    token: Option<String>,
    transport: T,
    on_unauthorized: Option<Callback<()>>,
}

// Lets the client travel in component props.
impl<T: Transport + PartialEq> PartialEq for ApiClient<T> {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url
            && self.token == other.token
            && self.transport == other.transport
            && self.on_unauthorized == other.on_unauthorized
    }
}

impl ApiClient<GlooTransport> {
    pub fn browser(base_url: impl Into<String>) -> Self {
        Self::new(base_url, GlooTransport)
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            transport,
            on_unauthorized: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Registers the observer notified on every 401 response.
    pub fn on_unauthorized(mut self, callback: Callback<()>) -> Self {
        self.on_unauthorized = Some(callback);
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse> {
        let request = HttpRequest {
            method,
            url: self.url(path),
            bearer: self.token.clone(),
            body,
        };
        log::debug!("{} {}", request.method, request.url);

        let response = self.transport.send(request).await?;
        if response.status == 401 {
            log::warn!("{} {} answered 401, dropping session", method, path);
            if let Some(callback) = &self.on_unauthorized {
                callback.emit(());
            }
            return Err(ApiError::Unauthorized);
        }
        if !response.is_success() {
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    async fn send_json<B, R>(&self, method: Method, path: &str, body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        let response = self.execute(method, path, Some(body)).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// `POST /token/` and returns the access token.
    pub async fn obtain_token(&self, credentials: &Credentials) -> Result<String> {
        let token: TokenResponse = self.send_json(Method::Post, "token/", credentials).await?;
        Ok(token.access)
    }

    pub async fn register(&self, request: &RegistrationRequest) -> Result<()> {
        let body = serde_json::to_value(request)?;
        self.execute(Method::Post, "register/", Some(body)).await?;
        Ok(())
    }

    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let response = self.execute(Method::Get, "expenses/", None).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    pub async fn create_expense(&self, payload: &ExpensePayload) -> Result<Expense> {
        self.send_json(Method::Post, "expenses/", payload).await
    }

    pub async fn update_expense(&self, id: i64, payload: &ExpensePayload) -> Result<Expense> {
        self.send_json(Method::Put, &format!("expenses/{}/", id), payload)
            .await
    }

    pub async fn delete_expense(&self, id: i64) -> Result<()> {
        self.execute(Method::Delete, &format!("expenses/{}/", id), None)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    const BASE: &str = "http://localhost:8000/api/";

    fn counting_observer() -> (Callback<()>, Rc<Cell<u32>>) {
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        (Callback::from(move |_| counter.set(counter.get() + 1)), hits)
    }

    #[test]
    fn authenticated_calls_carry_bearer_token() {
        let transport = MockTransport::default();
        transport.respond_json(200, json!([]));
        let client = ApiClient::new(BASE, transport.clone()).with_token(Some("tok".into()));

        let list = block_on(client.list_expenses()).unwrap();

        assert!(list.is_empty());
        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Get);
        assert_eq!(sent[0].url, "http://localhost:8000/api/expenses/");
        assert_eq!(sent[0].bearer.as_deref(), Some("tok"));
    }

    #[test]
    fn unauthorized_fires_observer_once_and_returns_error() {
        let transport = MockTransport::default();
        transport.respond(401, r#"{"detail": "Token expired"}"#);
        transport.respond(401, "");
        let (observer, hits) = counting_observer();
        let client = ApiClient::new(BASE, transport)
            .with_token(Some("stale".into()))
            .on_unauthorized(observer);

        let err = block_on(client.delete_expense(3)).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(hits.get(), 1);

        block_on(client.list_expenses()).unwrap_err();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn other_failures_do_not_touch_the_observer() {
        let transport = MockTransport::default();
        transport.respond(500, "boom");
        transport.fail("offline");
        let (observer, hits) = counting_observer();
        let client = ApiClient::new(BASE, transport).on_unauthorized(observer);

        assert_eq!(
            block_on(client.list_expenses()).unwrap_err(),
            ApiError::Status {
                status: 500,
                body: "boom".to_string()
            }
        );
        assert_eq!(
            block_on(client.list_expenses()).unwrap_err(),
            ApiError::Network("offline".to_string())
        );
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn obtain_token_reads_access_field() {
        let transport = MockTransport::default();
        transport.respond_json(200, json!({"access": "jwt", "refresh": "r"}));
        let client = ApiClient::new(BASE, transport.clone());

        let credentials = Credentials {
            username: "ana".into(),
            password: "pw".into(),
        };
        assert_eq!(block_on(client.obtain_token(&credentials)).unwrap(), "jwt");

        let sent = &transport.requests()[0];
        assert_eq!(sent.url, "http://localhost:8000/api/token/");
        assert_eq!(sent.bearer, None);
        assert_eq!(sent.body, Some(json!({"username": "ana", "password": "pw"})));
    }

    #[test]
    fn update_targets_the_expense_path() {
        let transport = MockTransport::default();
        transport.respond_json(
            200,
            json!({"id": 7, "date": "2024-01-02", "category": "Food", "description": "Dinner", "amount": "20.00"}),
        );
        let client = ApiClient::new(BASE, transport.clone()).with_token(Some("t".into()));
        let payload = ExpensePayload {
            date: "2024-01-02".into(),
            category: Category::Food,
            description: "Dinner".into(),
            amount: "20.00".into(),
        };

        let updated = block_on(client.update_expense(7, &payload)).unwrap();

        assert_eq!(updated.id, 7);
        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "http://localhost:8000/api/expenses/7/");
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let transport = MockTransport::default();
        transport.respond(200, "not json");
        let client = ApiClient::new(BASE, transport);

        assert!(matches!(
            block_on(client.list_expenses()),
            Err(ApiError::Decode(_))
        ));
    }
}
