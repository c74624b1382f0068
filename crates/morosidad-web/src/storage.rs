#![forbid(unsafe_code)]

//! `window.sessionStorage` as a [`TransientStore`].

use morosidad_core::{HandoffError, TransientStore};
use web_sys::Storage;

use crate::dom;

pub struct SessionStore {
    storage: Storage,
}

impl SessionStore {
    pub fn open() -> Result<Self, HandoffError> {
        let window = dom::window().map_err(|err| HandoffError::Store(dom::describe(&err)))?;
        let storage = window
            .session_storage()
            .map_err(|err| HandoffError::Store(dom::describe(&err)))?
            .ok_or_else(|| HandoffError::Store("sessionStorage is disabled".into()))?;
        Ok(Self { storage })
    }
}

impl TransientStore for SessionStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, HandoffError> {
        self.storage
            .get_item(key)
            .map_err(|err| HandoffError::Store(dom::describe(&err)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), HandoffError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| HandoffError::Store(dom::describe(&err)))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), HandoffError> {
        self.storage
            .remove_item(key)
            .map_err(|err| HandoffError::Store(dom::describe(&err)))
    }
}
