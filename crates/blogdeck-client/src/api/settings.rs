//! Settings API.

use crate::client::BlogClient;
use crate::error::Result;
use crate::types::Setting;

/// Settings API client.
pub struct SettingsApi {
    client: BlogClient,
}

impl SettingsApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// List all settings.
    pub async fn list(&self) -> Result<Vec<Setting>> {
        self.client.get("settings/list").await
    }

    /// Get one setting by key.
    pub async fn get(&self, key: &str) -> Result<Setting> {
        self.client.get(&format!("settings/{}", key)).await
    }

    /// Update a setting.
    pub async fn update(&self, setting: &Setting) -> Result<Setting> {
        self.client.put("settings", setting).await
    }
}
