//! "Remember me" credentials for the login form.
//!
//! The username is stored as-is; the password only ever in obfuscated form.

use std::sync::Arc;

use blogdeck_client::Flavor;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::obfuscate::Obfuscator;
use crate::storage::Storage;

/// Keys from older releases that held the password in plain text.
pub const LEGACY_PASSWORD_KEYS: [&str; 2] = ["rememberedPassword", "admin_rememberedPassword"];

/// Credentials recalled from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Remembered {
    pub username: String,
    pub password: String,
}

/// Remembered credentials for one application.
pub struct RememberedLogin {
    storage: Arc<dyn Storage>,
    obfuscator: Obfuscator,
    prefix: &'static str,
}

impl RememberedLogin {
    pub fn new(flavor: Flavor, storage: Arc<dyn Storage>) -> Self {
        Self::with_obfuscator(flavor, storage, Obfuscator::default())
    }

    pub fn with_obfuscator(flavor: Flavor, storage: Arc<dyn Storage>, obfuscator: Obfuscator) -> Self {
        let prefix = match flavor {
            Flavor::Site => "",
            Flavor::Console => "admin_",
        };
        Self {
            storage,
            obfuscator,
            prefix,
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Store credentials for the next login.
    pub fn remember(&self, username: &str, password: &str) -> Result<(), StorageError> {
        self.storage.set_item(&self.key("rememberedUsername"), username)?;
        self.storage.set_item(
            &self.key("rememberedEncryptedPassword"),
            &self.obfuscator.encode(password),
        )?;
        self.storage.set_item(&self.key("rememberMe"), "true")?;
        debug!(username, "Remembered login");
        Ok(())
    }

    /// Stored credentials, if "remember me" is on.
    ///
    /// A password that no longer decodes is dropped; the username is still
    /// returned with an empty password.
    pub fn recall(&self) -> Option<Remembered> {
        if self.storage.get_item(&self.key("rememberMe")).as_deref() != Some("true") {
            return None;
        }
        let username = self.storage.get_item(&self.key("rememberedUsername"))?;
        let password = match self.storage.get_item(&self.key("rememberedEncryptedPassword")) {
            Some(token) => self.obfuscator.decode(&token).unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable remembered password");
                String::new()
            }),
            None => String::new(),
        };
        Some(Remembered { username, password })
    }

    /// Drop remembered credentials.
    pub fn forget(&self) -> Result<(), StorageError> {
        for name in ["rememberedUsername", "rememberedEncryptedPassword", "rememberMe"] {
            self.storage.remove_item(&self.key(name))?;
        }
        Ok(())
    }

    /// Remove plain-text passwords left by older releases.
    pub fn cleanup_legacy(&self) -> Result<(), StorageError> {
        for key in LEGACY_PASSWORD_KEYS {
            if self.storage.get_item(key).is_some() {
                self.storage.remove_item(key)?;
                debug!(key, "Removed legacy plain-text password");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn login(flavor: Flavor) -> (Arc<MemoryStorage>, RememberedLogin) {
        let storage = Arc::new(MemoryStorage::new());
        (storage.clone(), RememberedLogin::new(flavor, storage))
    }

    #[test]
    fn test_remember_and_recall() {
        let (storage, remembered) = login(Flavor::Site);
        assert!(remembered.recall().is_none());

        remembered.remember("bob", "hunter2").unwrap();
        assert_eq!(
            storage.get_item("rememberedEncryptedPassword").as_deref(),
            Some("JTA1JTBDJTJDJTE4JTBBJTE1YQ==")
        );
        assert_eq!(
            remembered.recall(),
            Some(Remembered {
                username: "bob".into(),
                password: "hunter2".into(),
            })
        );
    }

    #[test]
    fn test_console_keys_are_prefixed() {
        let (storage, remembered) = login(Flavor::Console);
        remembered.remember("admin", "admin123").unwrap();

        assert_eq!(storage.get_item("admin_rememberMe").as_deref(), Some("true"));
        assert!(storage.get_item("rememberMe").is_none());
    }

    #[test]
    fn test_recall_requires_flag() {
        let (storage, remembered) = login(Flavor::Site);
        remembered.remember("bob", "hunter2").unwrap();
        storage.set_item("rememberMe", "false").unwrap();
        assert!(remembered.recall().is_none());
    }

    #[test]
    fn test_unreadable_password() {
        let (storage, remembered) = login(Flavor::Site);
        remembered.remember("bob", "hunter2").unwrap();
        storage.set_item("rememberedEncryptedPassword", "###").unwrap();

        let recalled = remembered.recall().unwrap();
        assert_eq!(recalled.username, "bob");
        assert!(recalled.password.is_empty());
    }

    #[test]
    fn test_forget() {
        let (storage, remembered) = login(Flavor::Site);
        remembered.remember("bob", "hunter2").unwrap();
        remembered.forget().unwrap();
        assert!(remembered.recall().is_none());
        assert!(storage.keys().is_empty());
    }

    #[test]
    fn test_cleanup_legacy() {
        let (storage, remembered) = login(Flavor::Site);
        storage.set_item("rememberedPassword", "plain").unwrap();
        storage.set_item("admin_rememberedPassword", "plain").unwrap();
        storage.set_item("token", "abc").unwrap();

        remembered.cleanup_legacy().unwrap();
        assert_eq!(storage.keys(), vec!["token".to_string()]);
    }
}
