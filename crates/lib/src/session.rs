//! # Session Store
//!
//! Per-session key-value state. A session keeps the history of completions for the
//! task on screen and remembers which task was rendered last, so navigation to
//! another task can clear the history.

use crate::{
    constants::{ACTIVE_TASK_KEY, HISTORY_KEY_PREFIX},
    errors::PromptError,
    tasks::TaskKind,
    types::Credential,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

/// The state of one user session.
#[derive(Debug, Default)]
pub struct SessionStore {
    values: HashMap<String, Value>,
    credential: Option<Credential>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored value for `key`, storing `default` first when the key is absent.
    pub fn get_or_init<T>(&mut self, key: &str, default: T) -> Result<T, PromptError>
    where
        T: Serialize + DeserializeOwned,
    {
        if !self.values.contains_key(key) {
            self.values
                .insert(key.to_string(), serde_json::to_value(default)?);
        }
        let value = self.values[key].clone();
        Ok(serde_json::from_value(value)?)
    }

    /// Stores `value` under `key`, replacing whatever was there.
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<(), PromptError> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    /// Records `task` as the active task and reports whether it differs from the previous one.
    ///
    /// The very first call in a session counts as a change.
    pub fn check_page_change(&mut self, task: TaskKind) -> Result<bool, PromptError> {
        let previous: String = self.get_or_init(ACTIVE_TASK_KEY, String::new())?;
        self.set(ACTIVE_TASK_KEY, task.id())?;
        let changed = previous != task.id();
        if changed {
            debug!(from = %previous, to = %task, "Active task changed");
        }
        Ok(changed)
    }

    pub fn active_task(&self) -> Option<&str> {
        self.values.get(ACTIVE_TASK_KEY).and_then(Value::as_str)
    }

    pub fn history(&self, task: TaskKind) -> Vec<String> {
        self.values
            .get(&history_key(task))
            .and_then(|value| serde_json::from_value(value.clone()).ok())
            .unwrap_or_default()
    }

    pub fn push_history(&mut self, task: TaskKind, response: String) -> Result<(), PromptError> {
        let key = history_key(task);
        let mut history: Vec<String> = self.get_or_init(&key, Vec::new())?;
        history.push(response);
        self.set(&key, history)
    }

    pub fn reset_history(&mut self, task: TaskKind) -> Result<(), PromptError> {
        self.set(&history_key(task), Vec::<String>::new())
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// Replaces the stored credential. A blank value clears it.
    pub fn set_credential(&mut self, value: &str) {
        self.credential = Credential::new(value);
    }
}

pub fn history_key(task: TaskKind) -> String {
    format!("{HISTORY_KEY_PREFIX}{}", task.id())
}

/// A session shared between the requests of one user. Only one render runs at a time.
pub type SharedSession = Arc<Mutex<SessionStore>>;

/// All live sessions of the process, keyed by a random id.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SharedSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(SessionStore::new())));
        id
    }

    pub async fn get(&self, id: &Uuid) -> Option<SharedSession> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Drops a session and everything it holds. Returns `false` for an unknown id.
    ///
    /// A render already holding the session's lock finishes on its own copy.
    pub async fn remove(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            debug!(session_id = %id, "Removed session");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
