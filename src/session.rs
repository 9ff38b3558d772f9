//! Session lifecycle: restored from storage at start, set on successful
//! auth, cleared on logout or on any 401.

use crate::config::{TOKEN_KEY, USERNAME_KEY};
use crate::storage::{KeyValueStore, LocalStorage};
use yew::Callback;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Name shown in the header greeting.
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or("User")
    }
}

/// Mirrors a [`Session`] into durable storage.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionStore<S = LocalStorage> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads the persisted session. The token is not validated; an expired
    /// one surfaces as a 401 on first use.
    pub fn restore(&self) -> Session {
        let read = |key: &str| self.store.get(key).filter(|value| !value.is_empty());
        Session {
            token: read(TOKEN_KEY),
            username: read(USERNAME_KEY),
        }
    }

    pub fn save(&self, session: &Session) {
        match &session.token {
            Some(token) => self.store.set(TOKEN_KEY, token),
            None => self.store.remove(TOKEN_KEY),
        }
        match &session.username {
            Some(username) => self.store.set(USERNAME_KEY, username),
            None => self.store.remove(USERNAME_KEY),
        }
    }

    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USERNAME_KEY);
    }
}

impl<S: KeyValueStore + Clone + 'static> SessionStore<S> {
    /// The logout hook: wipes storage, then lets `reset` drop the in-memory
    /// session. The same callback serves the header button and the 401 observer.
    pub fn logout_callback(&self, reset: Callback<()>) -> Callback<()> {
        let sessions = self.clone();
        Callback::from(move |_| {
            sessions.clear();
            reset.emit(());
            log::info!("session cleared");
        })
    }
}

/// What the shell hands to everything rendered beneath it.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionContext {
    pub session: Session,
    pub logout: Callback<()>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, MockTransport};
    use crate::storage::memory::MemoryStore;
    use futures::executor::block_on;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn restore_reads_both_keys() {
        let store = MemoryStore::with(&[("token", "abc"), ("username", "ana")]);
        let session = SessionStore::new(store).restore();
        assert_eq!(session, Session::new("abc", "ana"));
        assert!(session.is_authenticated());
    }

    #[test]
    fn restore_treats_empty_values_as_absent() {
        let store = MemoryStore::with(&[("token", ""), ("username", "ana")]);
        let session = SessionStore::new(store).restore();
        assert!(!session.is_authenticated());
        assert_eq!(session.display_name(), "ana");
    }

    #[test]
    fn save_then_clear_round_trips_through_storage() {
        let store = MemoryStore::default();
        let sessions = SessionStore::new(store.clone());

        sessions.save(&Session::new("tok", "bo"));
        assert_eq!(store.get("token").as_deref(), Some("tok"));
        assert_eq!(store.get("username").as_deref(), Some("bo"));

        sessions.clear();
        assert_eq!(store.len(), 0);
        // Clearing an already empty store is a no-op.
        sessions.clear();
        assert_eq!(sessions.restore(), Session::default());
    }

    #[test]
    fn display_name_defaults_to_user() {
        assert_eq!(Session::default().display_name(), "User");
    }

    #[test]
    fn unauthorized_response_wipes_the_stored_session() {
        let store = MemoryStore::with(&[("token", "stale"), ("username", "ana")]);
        let sessions = SessionStore::new(store.clone());
        let resets = Rc::new(Cell::new(0));
        let logout = {
            let resets = resets.clone();
            sessions.logout_callback(Callback::from(move |_| resets.set(resets.get() + 1)))
        };

        let transport = MockTransport::default();
        transport.respond(401, r#"{"detail": "Given token not valid"}"#);
        let client = ApiClient::new("http://api/", transport)
            .with_token(sessions.restore().token)
            .on_unauthorized(logout);

        let err = block_on(client.list_expenses()).unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(store.len(), 0);
        assert_eq!(resets.get(), 1);
        assert_eq!(sessions.restore(), Session::default());
    }
}
