//! Session-scoped storage for the catalog browser.
//!
//! Provides a small `sessionStorage`-like abstraction with synchronous
//! writes, plus typed JSON helpers and a session record.
//!
//! # Example
//!
//! ```rust,ignore
//! use catalog_session::{JsonStorageExt, MemoryStorage, Session};
//!
//! let storage = MemoryStorage::new();
//! let session = Session::resume_or_start(&storage)?;
//!
//! storage.set_json("cartItems", &vec![1, 2, 3])?;
//! let ids: Option<Vec<i64>> = storage.get_json("cartItems")?;
//!
//! // Ending the session drops everything stored during it.
//! session.end(&storage)?;
//! ```

mod error;
mod session;
mod storage;

pub use error::StorageError;
pub use session::{JsonStorageExt, Session, SessionId, SESSION_INFO_KEY};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        FileStorage, JsonStorageExt, MemoryStorage, Session, SessionId, SessionStorage,
        StorageError,
    };
}
