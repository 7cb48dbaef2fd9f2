//! HTTP client SDK for the blog site and its admin console.
//!
//! Every backend response is wrapped in a `{code, message, data}` envelope.
//! [`BlogClient`] attaches the session's bearer token, unwraps the envelope,
//! and reports both transport failures and envelope failures to a
//! [`Notifier`] before returning them as [`Error`].
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use blogdeck_client::{BlogClient, Flavor, PageQuery, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = BlogClient::builder()
//!     .base_url("http://localhost:8080/api")
//!     .flavor(Flavor::Site)
//!     .build()?;
//!
//! for category in client.categories().list().await? {
//!     println!("{}", category.name);
//! }
//!
//! let hits = client.articles().search("rust", PageQuery::new(1, 10)).await?;
//! println!("{} matches", hits.total);
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Articles**: list, detail, search, CRUD, likes, views, audit
//! - **Categories** / **Tags**: CRUD and per-category/per-tag article lists
//! - **Comments**: list, post, reply, like, delete, audit
//! - **Users**: login, register, profile, password flows, console management
//! - **Uploads**: multipart upload, records
//! - **Settings**, **Dashboard**, **Captcha**, **Weather**

pub mod api;
pub mod client;
pub mod envelope;
pub mod error;
pub mod hooks;
pub mod types;

pub use api::UploadKind;
pub use client::{BlogClient, ClientBuilder, LOGIN_PATH};
pub use envelope::{Envelope, SUCCESS_CODE};
pub use error::{Error, Result};
pub use hooks::{
    Anonymous, AuthContext, Flavor, LogNavigator, Navigator, Notice, NoticeLevel, Notifier,
    TracingNotifier,
};
pub use types::*;
