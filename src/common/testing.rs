use crate::usecases::single_sign_out::{SessionDestroyer, SessionIndexStore};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Store(String, String),
    Find(String),
    Delete(String),
    Destroy(String),
}

/// In-memory stand-in for the redis-backed session stores. Records every
/// collaborator call in order.
#[derive(Default)]
pub struct MemoryStore {
    indexes: Mutex<HashMap<String, String>>,
    sessions: Mutex<HashSet<String>>,
    calls: Mutex<Vec<Call>>,
    fail_stores: bool,
    fail_lookups: bool,
    fail_deletes: bool,
    fail_destroys: bool,
}

impl MemoryStore {
    pub fn failing_stores() -> Self {
        Self {
            fail_stores: true,
            ..Default::default()
        }
    }

    pub fn failing_lookups() -> Self {
        Self {
            fail_lookups: true,
            ..Default::default()
        }
    }

    pub fn failing_deletes() -> Self {
        Self {
            fail_deletes: true,
            ..Default::default()
        }
    }

    pub fn failing_destroys() -> Self {
        Self {
            fail_destroys: true,
            ..Default::default()
        }
    }

    pub fn insert_mapping(&self, session_index: &str, session_id: &str) {
        self.indexes
            .lock()
            .unwrap()
            .insert(session_index.to_owned(), session_id.to_owned());
    }

    pub fn insert_session(&self, session_id: &str) {
        self.sessions.lock().unwrap().insert(session_id.to_owned());
    }

    pub fn mapping(&self, session_index: &str) -> Option<String> {
        self.indexes.lock().unwrap().get(session_index).cloned()
    }

    pub fn has_session(&self, session_id: &str) -> bool {
        self.sessions.lock().unwrap().contains(session_id)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SessionIndexStore for MemoryStore {
    async fn store_session_index(
        &self,
        session_index: &str,
        session_id: &str,
    ) -> anyhow::Result<()> {
        self.record(Call::Store(session_index.to_owned(), session_id.to_owned()));
        if self.fail_stores {
            anyhow::bail!("store unavailable");
        }
        self.insert_mapping(session_index, session_id);
        Ok(())
    }

    async fn find_session_id(&self, session_index: &str) -> anyhow::Result<Option<String>> {
        self.record(Call::Find(session_index.to_owned()));
        if self.fail_lookups {
            anyhow::bail!("store unavailable");
        }
        Ok(self.mapping(session_index))
    }

    async fn delete_index(&self, session_index: &str) -> anyhow::Result<()> {
        self.record(Call::Delete(session_index.to_owned()));
        if self.fail_deletes {
            anyhow::bail!("store unavailable");
        }
        self.indexes.lock().unwrap().remove(session_index);
        Ok(())
    }
}

#[async_trait]
impl SessionDestroyer for MemoryStore {
    async fn destroy_by_id(&self, session_id: &str) -> anyhow::Result<bool> {
        self.record(Call::Destroy(session_id.to_owned()));
        if self.fail_destroys {
            anyhow::bail!("session store unavailable");
        }
        Ok(self.sessions.lock().unwrap().remove(session_id))
    }
}
