//! Durable key-value storage backing the session.

/// Minimal string store. Writes are best effort: a browser with storage
/// disabled simply forgets.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("could not persist '{}' to local storage", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            if storage.remove_item(key).is_err() {
                log::warn!("could not remove '{}' from local storage", key);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use super::KeyValueStore;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Shared in-memory store; clones see the same entries.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        entries: Rc<RefCell<HashMap<String, String>>>,
    }

    impl MemoryStore {
        pub fn with(entries: &[(&str, &str)]) -> Self {
            let store = Self::default();
            for (key, value) in entries {
                store.set(key, value);
            }
            store
        }

        pub fn len(&self) -> usize {
            self.entries.borrow().len()
        }
    }

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        fn set(&self, key: &str, value: &str) {
            self.entries
                .borrow_mut()
                .insert(key.to_string(), value.to_string());
        }

        fn remove(&self, key: &str) {
            self.entries.borrow_mut().remove(key);
        }
    }
}
