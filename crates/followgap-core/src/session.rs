use std::{fs, path::PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;

/// On-disk envelope around the provider's serialized session state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedSession {
    pub saved_at: String,
    pub state: Value,
}

/// Persists one provider session between runs so collection can skip login.
///
/// Lifecycle: saved after a successful login, loaded on later runs, discarded
/// when the provider rejects it mid-operation so the next run
/// re-authenticates from scratch.
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the saved provider state, or `None` if no session is persisted.
    pub fn load(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let saved: SavedSession = serde_json::from_str(&contents)?;
        Ok(Some(saved.state))
    }

    pub fn save(&self, state: &Value) -> Result<()> {
        let saved = SavedSession {
            saved_at: chrono::Utc::now().to_rfc3339(),
            state: state.clone(),
        };
        fs::write(&self.path, serde_json::to_string(&saved)?)?;
        Ok(())
    }

    /// Remove the persisted session, if any.
    pub fn discard(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tmp(prefix: &str) -> PathBuf {
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let pid = std::process::id();
        PathBuf::from(format!("/tmp/{prefix}-{pid}-{ts}.json"))
    }

    #[test]
    fn load_returns_none_without_a_saved_session() {
        let store = SessionStore::new(tmp("followgap-session-missing"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_returns_the_state_blob() {
        let store = SessionStore::new(tmp("followgap-session"));
        let state = serde_json::json!({"cookie": "sessionid=abc", "account_id": 9});

        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));

        store.discard().unwrap();
    }

    #[test]
    fn discard_removes_the_file_and_is_idempotent() {
        let store = SessionStore::new(tmp("followgap-session"));
        store.save(&serde_json::json!({})).unwrap();

        store.discard().unwrap();
        assert!(store.load().unwrap().is_none());
        store.discard().unwrap();
    }
}
