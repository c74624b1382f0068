#![forbid(unsafe_code)]

//! Consume-once handoff of a pre-filled profile between pages.
//!
//! Another page writes a JSON profile into the browser's session storage and
//! navigates to the form. The form takes it exactly once: the entry is
//! removed before it is decoded, so a malformed entry cannot fire twice
//! either.

use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("transient store unavailable: {0}")]
    Store(String),
    #[error("malformed handoff entry under {key:?}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode handoff entry: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Key/value string store with session lifetime.
///
/// Implemented over `window.sessionStorage` in the browser and by
/// [`MemoryStore`] for tests.
pub trait TransientStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, HandoffError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), HandoffError>;
    fn remove_item(&mut self, key: &str) -> Result<(), HandoffError>;
}

/// In-memory [`TransientStore`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl TransientStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, HandoffError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), HandoffError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), HandoffError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Typed consume-once slot under a fixed store key.
#[derive(Debug, Clone)]
pub struct HandoffSlot<T> {
    key: String,
    _payload: PhantomData<fn() -> T>,
}

impl<T> HandoffSlot<T> {
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            _payload: PhantomData,
        }
    }
}

impl<T: Serialize> HandoffSlot<T> {
    /// Write a payload for the next page load to consume.
    pub fn offer<S: TransientStore + ?Sized>(
        &self,
        store: &mut S,
        payload: &T,
    ) -> Result<(), HandoffError> {
        let encoded = serde_json::to_string(payload).map_err(HandoffError::Encode)?;
        store.set_item(&self.key, &encoded)
    }
}

impl<T: DeserializeOwned> HandoffSlot<T> {
    /// Remove and decode the pending payload, if any.
    pub fn take<S: TransientStore + ?Sized>(&self, store: &mut S) -> Result<Option<T>, HandoffError> {
        let Some(raw) = store.get_item(&self.key)? else {
            return Ok(None);
        };
        store.remove_item(&self.key)?;
        tracing::info!(key = %self.key, bytes = raw.len(), "handoff entry consumed");
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| HandoffError::Malformed {
                key: self.key.clone(),
                source,
            })
    }
}

/// Field-id → value mapping written by the demo page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefilledProfile {
    values: BTreeMap<String, serde_json::Value>,
}

impl PrefilledProfile {
    pub fn insert(&mut self, id: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.values.insert(id.into(), value.into());
    }

    /// Element id and input text for every scalar entry.
    ///
    /// Nested arrays and objects have no input representation and are
    /// skipped.
    #[must_use]
    pub fn field_values(&self) -> Vec<(String, String)> {
        self.values
            .iter()
            .filter_map(|(id, value)| input_text(value).map(|text| (id.clone(), text)))
            .collect()
    }
}

/// Render a JSON scalar the way an input displays it (`4500.0` → `4500`).
fn input_text(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Some(int.to_string())
            } else if let Some(int) = number.as_u64() {
                Some(int.to_string())
            } else {
                let float = number.as_f64()?;
                if float.fract() == 0.0 && float.abs() < 1e15 {
                    Some(format!("{}", float as i64))
                } else {
                    Some(float.to_string())
                }
            }
        }
        Value::Array(_) | Value::Object(_) => None,
    }
}
