//! Client-side state for the blog applications.
//!
//! This crate provides the stateful half of the client:
//! - [`SessionStore`]: bearer token and profile, persisted across restarts
//! - [`ArticleCache`]: last fetched article page, detail, and taxonomy
//! - [`Storage`]: the durable key/value store both are mirrored into
//! - [`RememberedLogin`]: obfuscated "remember me" credentials
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use blogdeck_client::{BlogClient, Flavor, LoginRequest};
//! use blogdeck_session::{FileStorage, SessionStore};
//!
//! let storage = Arc::new(FileStorage::open("storage-site.json")?);
//! let session = Arc::new(SessionStore::restore(Flavor::Site, storage));
//! let client = BlogClient::builder()
//!     .base_url("http://localhost:8080/api")
//!     .auth(session.clone())
//!     .build()?;
//!
//! session.login(&client, &LoginRequest::password("bob", "hunter2")).await?;
//! ```

mod articles;
mod error;
pub mod obfuscate;
mod remember;
mod session;
mod storage;

pub use articles::{ArticleCache, ArticleListState};
pub use error::{Error, ObfuscateError, Result, StorageError};
pub use obfuscate::{DEFAULT_KEY, Obfuscator};
pub use remember::{LEGACY_PASSWORD_KEYS, Remembered, RememberedLogin};
pub use session::{Session, SessionKeys, SessionStore};
pub use storage::{FileStorage, MemoryStorage, Storage};
