//! Browsing session identity and typed JSON access.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{SessionStorage, StorageError};

/// Key under which the session record itself is kept.
pub const SESSION_INFO_KEY: &str = "__session";

/// A unique session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    /// Create a new session ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a new random session ID.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::Rng;

        let bytes: [u8; 18] = rand::thread_rng().gen();
        Self(format!("sess_{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// Get the session ID as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Typed JSON helpers available on every [`SessionStorage`].
pub trait JsonStorageExt: SessionStorage {
    /// Read and deserialize the value under `key`.
    ///
    /// A present but malformed value is an error, distinct from absence.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.get_item(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` and store it under `key`.
    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.set_item(key, &raw)
    }

    /// Check if a key is present.
    fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_item(key)?.is_some())
    }
}

impl<S: SessionStorage + ?Sized> JsonStorageExt for S {}

/// Metadata recorded when a session starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// The session ID.
    pub id: SessionId,
    /// When the session started.
    pub started_at: DateTime<Utc>,
}

impl Session {
    /// Resume the session recorded in `storage`, or start a new one.
    ///
    /// An unreadable record is replaced rather than reported.
    pub fn resume_or_start<S: SessionStorage + ?Sized>(storage: &S) -> Result<Self, StorageError> {
        match storage.get_json::<Session>(SESSION_INFO_KEY) {
            Ok(Some(session)) => {
                tracing::debug!(session_id = %session.id, "resumed session");
                return Ok(session);
            }
            Ok(None) => {}
            Err(StorageError::SerializeError(e)) => {
                tracing::warn!(error = %e, "session record unreadable, starting a new session");
            }
            Err(e) => return Err(e),
        }

        let session = Session {
            id: SessionId::generate(),
            started_at: Utc::now(),
        };
        storage.set_json(SESSION_INFO_KEY, &session)?;
        tracing::debug!(session_id = %session.id, "started session");
        Ok(session)
    }

    /// End the session: every value stored during it is dropped.
    pub fn end<S: SessionStorage + ?Sized>(self, storage: &S) -> Result<(), StorageError> {
        storage.clear()?;
        tracing::debug!(session_id = %self.id, "ended session");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStorage;

    #[test]
    fn test_session_id_generation() {
        let id1 = SessionId::generate();
        let id2 = SessionId::generate();

        assert!(id1.as_str().starts_with("sess_"));
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_session_id_serialization() {
        let id = SessionId::new("serialize-me");
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, r#""serialize-me""#);

        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn test_json_roundtrip_and_malformed() {
        let store = MemoryStorage::new();
        store.set_json("ids", &vec![1, 2, 3]).unwrap();
        assert_eq!(store.get_json::<Vec<i64>>("ids").unwrap(), Some(vec![1, 2, 3]));
        assert!(store.exists("ids").unwrap());

        store.set_item("ids", "not json").unwrap();
        assert!(store.get_json::<Vec<i64>>("ids").is_err());
        assert_eq!(store.get_json::<Vec<i64>>("missing").unwrap(), None);
    }

    #[test]
    fn test_resume_returns_same_session() {
        let store = MemoryStorage::new();
        let first = Session::resume_or_start(&store).unwrap();
        let second = Session::resume_or_start(&store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_corrupt_record_starts_fresh() {
        let store = MemoryStorage::with_item(SESSION_INFO_KEY, "garbage");
        let session = Session::resume_or_start(&store).unwrap();
        assert_eq!(store.get_json::<Session>(SESSION_INFO_KEY).unwrap(), Some(session));
    }

    #[test]
    fn test_end_clears_everything() {
        let store = MemoryStorage::new();
        let session = Session::resume_or_start(&store).unwrap();
        store.set_item("cartItems", "[]").unwrap();

        session.end(&store).unwrap();
        assert!(store.keys().unwrap().is_empty());
    }
}
