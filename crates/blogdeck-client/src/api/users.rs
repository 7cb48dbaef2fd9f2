//! Users API.

use serde::Serialize;
use serde_json::json;

use crate::client::BlogClient;
use crate::error::Result;
use crate::types::{
    Availability, ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse,
    RecordPage, RegisterRequest, User, UserQuery,
};

#[derive(Serialize)]
struct IdQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
}

/// Users API client.
pub struct UsersApi {
    client: BlogClient,
}

impl UsersApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// Site login.
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.client.post("user/login", request).await
    }

    /// Console login; the backend additionally requires the admin role.
    pub async fn admin_login(&self, request: &LoginRequest) -> Result<LoginResponse> {
        self.client.post("user/admin-login", request).await
    }

    /// Register a new account.
    pub async fn register(&self, request: &RegisterRequest) -> Result<User> {
        self.client.post("user/register", request).await
    }

    /// Tell the backend the token is no longer in use.
    pub async fn logout(&self) -> Result<Option<String>> {
        self.client.post_empty("user/logout").await
    }

    /// Profile of a user (the token's owner when `id` is `None`).
    pub async fn info(&self, id: Option<i64>) -> Result<User> {
        self.client.get_with_query("user/info", &IdQuery { id }).await
    }

    /// Update a profile.
    pub async fn update_info(&self, user: &User) -> Result<User> {
        self.client.put("user/info", user).await
    }

    /// Paged user list (console).
    pub async fn list(&self, query: &UserQuery) -> Result<RecordPage<User>> {
        self.client.get_with_query("user/list", query).await
    }

    /// Create a user (console).
    pub async fn create(&self, user: &User) -> Result<User> {
        self.client.post("user", user).await
    }

    /// Delete a user (console).
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("user/{}", id)).await
    }

    /// Enable or disable a user (console).
    pub async fn update_status(&self, id: i64, status: i32) -> Result<()> {
        self.client
            .put(&format!("user/{}/status", id), &json!({ "status": status }))
            .await
    }

    /// Change the signed-in user's password.
    pub async fn change_password(&self, request: &ChangePasswordRequest) -> Result<Option<String>> {
        self.client.post("user/change-password", request).await
    }

    /// Whether a username is already taken.
    pub async fn check_username(&self, username: &str) -> Result<bool> {
        let availability: Availability = self
            .client
            .get_with_query("user/check-username", &[("username", username)])
            .await?;
        Ok(availability.exists)
    }

    /// Whether an email is already registered.
    pub async fn check_email(&self, email: &str) -> Result<bool> {
        let availability: Availability = self
            .client
            .get_with_query("user/check-email", &[("email", email)])
            .await?;
        Ok(availability.exists)
    }

    /// Email a password reset code.
    pub async fn send_reset_code(&self, email: &str) -> Result<Option<String>> {
        self.client
            .post("user/forgot-password/send-code", &json!({ "email": email }))
            .await
    }

    /// Reset a password with an emailed code.
    pub async fn reset_password(&self, request: &ForgotPasswordRequest) -> Result<Option<String>> {
        self.client.post("user/forgot-password/reset", request).await
    }
}
