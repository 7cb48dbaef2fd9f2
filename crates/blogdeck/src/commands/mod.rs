//! CLI command handlers.

pub mod articles;
pub mod auth;
pub mod navigate;
pub mod secret;
pub mod site;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use blogdeck_client::{BlogClient, Flavor};
use blogdeck_config::Settings;
use blogdeck_session::{FileStorage, SessionStore, Storage};

use crate::output::{ConsoleNavigator, ConsoleNotifier};

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Resolved configuration.
    pub settings: Settings,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    pub fn flavor(&self) -> Flavor {
        self.settings.flavor
    }

    /// Open the storage file for the active flavor.
    pub fn storage(&self) -> Result<Arc<dyn Storage>> {
        let path = &self.settings.storage_path;
        let storage = FileStorage::open(path)
            .with_context(|| format!("failed to open storage at {}", path.display()))?;
        Ok(Arc::new(storage))
    }

    /// Session restored from storage.
    pub fn session(&self, storage: Arc<dyn Storage>) -> Arc<SessionStore> {
        Arc::new(SessionStore::restore(self.flavor(), storage))
    }

    /// Gateway bound to `session`, reporting to the terminal.
    pub fn client(&self, session: &Arc<SessionStore>) -> Result<BlogClient> {
        let client = BlogClient::builder()
            .base_url(&self.settings.base_url)
            .timeout(self.settings.timeout)
            .flavor(self.flavor())
            .auth(session.clone())
            .notifier(Arc::new(ConsoleNotifier))
            .navigator(Arc::new(ConsoleNavigator))
            .build()
            .context("failed to create client")?;
        Ok(client)
    }

    /// Storage, session, and client in one go.
    pub fn connect(&self) -> Result<(Arc<SessionStore>, BlogClient)> {
        let session = self.session(self.storage()?);
        let client = self.client(&session)?;
        Ok((session, client))
    }
}
