//! Captcha API.

use serde_json::json;

use crate::client::BlogClient;
use crate::error::Result;
use crate::types::ImageCaptcha;

/// Captcha API client.
pub struct CaptchaApi {
    client: BlogClient,
}

impl CaptchaApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// Email a one-time login/registration code.
    pub async fn send_email(&self, email: &str) -> Result<serde_json::Value> {
        self.client
            .post("captcha/send", &json!({ "email": email }))
            .await
    }

    /// Fetch an image captcha challenge.
    pub async fn image(&self) -> Result<ImageCaptcha> {
        self.client.get("captcha/image").await
    }
}
