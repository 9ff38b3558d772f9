//! Login and registration workflows behind the auth screen.

use crate::api::{ApiClient, Transport};
use crate::models::{Credentials, RegistrationRequest};
use crate::session::Session;
use std::rc::Rc;
use yew::Reducible;

pub const INVALID_CREDENTIALS: &str = "Invalid username or password.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const REGISTRATION_FAILED: &str = "Registration failed. Please try again.";
pub const LOGIN_AFTER_REGISTRATION_FAILED: &str = "Login failed after registration.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub password: String,
    pub password2: String,
    pub error: Option<String>,
    pub pending: bool,
}

impl AuthForm {
    /// Switches between login and register. Typed values carry over.
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.error = None;
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum AuthAction {
    ToggleMode,
    Username(String),
    Password(String),
    Password2(String),
    Started,
    Failed(String),
    Finished,
}

impl Reducible for AuthForm {
    type Action = AuthAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AuthAction::ToggleMode => next.toggle_mode(),
            AuthAction::Username(value) => next.username = value,
            AuthAction::Password(value) => next.password = value,
            AuthAction::Password2(value) => next.password2 = value,
            AuthAction::Started => {
                next.pending = true;
                next.error = None;
            }
            AuthAction::Failed(message) => {
                next.pending = false;
                next.error = Some(message);
            }
            AuthAction::Finished => {
                next.pending = false;
                next.error = None;
            }
        }
        Rc::new(next)
    }
}

/// Outcome of the register-then-login chain.
#[derive(Clone, Debug, PartialEq)]
pub enum Registration {
    /// No account was created; the message is shown as is.
    Rejected(String),
    /// The account exists server-side but the follow-up login failed.
    CreatedLoginFailed,
    LoggedIn(Session),
}

impl Registration {
    pub fn account_created(&self) -> bool {
        !matches!(self, Registration::Rejected(_))
    }

    pub fn login_succeeded(&self) -> bool {
        matches!(self, Registration::LoggedIn(_))
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Registration::Rejected(message) => Some(message),
            Registration::CreatedLoginFailed => Some(LOGIN_AFTER_REGISTRATION_FAILED),
            Registration::LoggedIn(_) => None,
        }
    }
}

/// Exchanges credentials for a token. The session carries the username
/// exactly as typed.
pub async fn login<T: Transport>(
    client: &ApiClient<T>,
    username: &str,
    password: &str,
) -> Result<Session, String> {
    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    match client.obtain_token(&credentials).await {
        Ok(token) => {
            log::info!("logged in as {}", username);
            Ok(Session::new(token, username))
        }
        Err(err) => {
            log::info!("login failed: {}", err);
            Err(INVALID_CREDENTIALS.to_string())
        }
    }
}

pub async fn register<T: Transport>(
    client: &ApiClient<T>,
    username: &str,
    password: &str,
    password2: &str,
) -> Registration {
    if password != password2 {
        return Registration::Rejected(PASSWORD_MISMATCH.to_string());
    }

    let request = RegistrationRequest {
        username: username.to_string(),
        password: password.to_string(),
        password2: password2.to_string(),
    };
    if let Err(err) = client.register(&request).await {
        log::info!("registration rejected: {}", err);
        let message = ["username", "password"]
            .into_iter()
            .find_map(|field| err.field_messages(field))
            .map(|messages| messages.join(" "))
            .unwrap_or_else(|| REGISTRATION_FAILED.to_string());
        return Registration::Rejected(message);
    }

    log::info!("account {} created", username);
    match login(client, username, password).await {
        Ok(session) => Registration::LoggedIn(session),
        Err(_) => Registration::CreatedLoginFailed,
    }
}
