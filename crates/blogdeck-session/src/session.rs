//! Authenticated-session store.
//!
//! Holds the bearer token and the signed-in user's profile, mirrored into
//! [`Storage`] on every change so that a restart picks the session back up.
//! The store doubles as the client's [`AuthContext`]: the gateway reads the
//! token from it and invalidates it when the backend says the session expired.

use std::sync::Arc;

use blogdeck_client::{AuthContext, BlogClient, Flavor, LoginRequest, RegisterRequest, User};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result, StorageError};
use crate::storage::Storage;

// ─────────────────────────────────────────────────────────────────────────────
// Storage keys
// ─────────────────────────────────────────────────────────────────────────────

/// Storage keys a flavor persists its session under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKeys {
    pub token: &'static str,
    pub user_info: &'static str,
}

impl SessionKeys {
    /// The site and the console keep separate sessions side by side.
    pub fn for_flavor(flavor: Flavor) -> Self {
        match flavor {
            Flavor::Site => Self {
                token: "token",
                user_info: "userInfo",
            },
            Flavor::Console => Self {
                token: "admin_token",
                user_info: "admin_userInfo",
            },
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Point-in-time view of the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Bearer token, empty when signed out.
    pub token: String,
    /// Profile of the signed-in user.
    pub user_info: Option<User>,
}

impl Session {
    /// A token is present.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    /// Both a token and a profile are present.
    pub fn is_login(&self) -> bool {
        self.has_token() && self.user_info.is_some()
    }

    /// The profile belongs to an administrator.
    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().is_some_and(User::is_admin)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SessionStore
// ─────────────────────────────────────────────────────────────────────────────

/// Session state backed by durable storage.
pub struct SessionStore {
    flavor: Flavor,
    keys: SessionKeys,
    storage: Arc<dyn Storage>,
    state: RwLock<Session>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("SessionStore")
            .field("flavor", &self.flavor)
            .field("has_token", &state.has_token())
            .field("user", &state.user_info.as_ref().map(|u| u.username.as_str()))
            .finish()
    }
}

impl SessionStore {
    /// Load whatever session `storage` holds for `flavor`.
    ///
    /// A stored profile that no longer parses is discarded rather than
    /// failing startup.
    pub fn restore(flavor: Flavor, storage: Arc<dyn Storage>) -> Self {
        let keys = SessionKeys::for_flavor(flavor);
        let token = storage.get_item(keys.token).unwrap_or_default();
        let user_info = storage
            .get_item(keys.user_info)
            .and_then(|raw| match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    warn!(key = keys.user_info, error = %e, "Discarding unreadable stored profile");
                    None
                }
            });

        debug!(
            %flavor,
            has_token = !token.is_empty(),
            has_profile = user_info.is_some(),
            "Session restored"
        );

        Self {
            flavor,
            keys,
            storage,
            state: RwLock::new(Session { token, user_info }),
        }
    }

    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.read().clone()
    }

    pub fn token(&self) -> String {
        self.state.read().token.clone()
    }

    pub fn user_info(&self) -> Option<User> {
        self.state.read().user_info.clone()
    }

    pub fn is_login(&self) -> bool {
        self.state.read().is_login()
    }

    pub fn is_admin(&self) -> bool {
        self.state.read().is_admin()
    }

    /// Persist the token, then replace it in memory.
    pub fn set_token(&self, token: &str) -> std::result::Result<(), StorageError> {
        self.storage.set_item(self.keys.token, token)?;
        self.state.write().token = token.to_string();
        Ok(())
    }

    /// Persist the profile, then replace it in memory.
    pub fn set_user_info(&self, user: User) -> std::result::Result<(), StorageError> {
        let raw = serde_json::to_string(&user)?;
        self.storage.set_item(self.keys.user_info, &raw)?;
        self.state.write().user_info = Some(user);
        Ok(())
    }

    /// Write token and profile together. If the profile cannot be stored
    /// the previous token is put back.
    fn store_credentials(&self, token: &str, user: &User) -> std::result::Result<(), StorageError> {
        let raw = serde_json::to_string(user)?;
        let previous = self.storage.get_item(self.keys.token);
        self.storage.set_item(self.keys.token, token)?;

        if let Err(e) = self.storage.set_item(self.keys.user_info, &raw) {
            let rollback = match &previous {
                Some(previous) => self.storage.set_item(self.keys.token, previous),
                None => self.storage.remove_item(self.keys.token),
            };
            if let Err(rollback) = rollback {
                warn!(error = %rollback, "Failed to restore previous token");
            }
            return Err(e);
        }
        Ok(())
    }

    /// Sign in with the flavor's login endpoint and persist the result.
    ///
    /// On failure the session is left untouched.
    pub async fn login(&self, client: &BlogClient, request: &LoginRequest) -> Result<Session> {
        let users = client.users();
        let response = match self.flavor {
            Flavor::Site => users.login(request).await?,
            Flavor::Console => users.admin_login(request).await?,
        };

        self.store_credentials(&response.token, &response.user_info)?;
        info!(flavor = %self.flavor, username = %response.user_info.username, "Signed in");
        {
            let mut state = self.state.write();
            state.token = response.token;
            state.user_info = Some(response.user_info);
        }

        Ok(self.session())
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, client: &BlogClient, request: &RegisterRequest) -> Result<User> {
        let user = client.users().register(request).await?;
        info!(username = %user.username, "Registered account");
        Ok(user)
    }

    /// Re-fetch the signed-in user's profile and persist it.
    ///
    /// The console addresses the profile by the stored user id; the site
    /// relies on the token alone.
    pub async fn refresh_profile(&self, client: &BlogClient) -> Result<User> {
        if !self.state.read().has_token() {
            return Err(Error::NotSignedIn);
        }

        let id = match self.flavor {
            Flavor::Site => None,
            Flavor::Console => self.state.read().user_info.as_ref().and_then(|u| u.id),
        };

        let user = client.users().info(id).await?;
        self.set_user_info(user.clone())?;
        debug!(username = %user.username, "Profile refreshed");
        Ok(user)
    }

    /// Clear the session from memory and storage.
    ///
    /// Always succeeds; storage failures are logged.
    pub fn logout(&self) {
        {
            let mut state = self.state.write();
            state.token.clear();
            state.user_info = None;
        }

        for key in [self.keys.token, self.keys.user_info] {
            if let Err(e) = self.storage.remove_item(key) {
                warn!(key, error = %e, "Failed to remove session key");
            }
        }
        debug!(flavor = %self.flavor, "Session cleared");
    }
}

impl AuthContext for SessionStore {
    fn bearer_token(&self) -> Option<String> {
        let state = self.state.read();
        state.has_token().then(|| state.token.clone())
    }

    fn invalidate(&self) {
        self.logout();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn store(flavor: Flavor) -> (Arc<MemoryStorage>, SessionStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::restore(flavor, storage.clone());
        (storage, store)
    }

    fn bob() -> User {
        User {
            id: Some(7),
            username: "bob".into(),
            role: Some(0),
            ..Default::default()
        }
    }

    /// Memory storage that refuses to write the profile keys.
    #[derive(Default)]
    struct ProfileWritesFail(MemoryStorage);

    impl Storage for ProfileWritesFail {
        fn get_item(&self, key: &str) -> Option<String> {
            self.0.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> std::result::Result<(), StorageError> {
            if key.ends_with("userInfo") {
                return Err(StorageError::Io {
                    path: "storage.json".into(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.0.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> std::result::Result<(), StorageError> {
            self.0.remove_item(key)
        }

        fn keys(&self) -> Vec<String> {
            self.0.keys()
        }
    }

    fn client_for(server: &MockServer, session: Arc<SessionStore>, flavor: Flavor) -> BlogClient {
        BlogClient::builder()
            .base_url(format!("{}/api", server.uri()))
            .flavor(flavor)
            .auth(session)
            .build()
            .unwrap()
    }

    #[test]
    fn test_restore_empty() {
        let (_, store) = store(Flavor::Site);
        assert_eq!(store.session(), Session::default());
        assert!(!store.is_login());
        assert!(store.bearer_token().is_none());
    }

    #[test]
    fn test_restore_existing() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("token", "abc").unwrap();
        storage
            .set_item("userInfo", &json!({"id": 7, "username": "bob"}).to_string())
            .unwrap();

        let store = SessionStore::restore(Flavor::Site, storage);
        assert_eq!(store.token(), "abc");
        assert_eq!(store.user_info().unwrap().username, "bob");
        assert!(store.is_login());
    }

    #[test]
    fn test_restore_ignores_other_flavor() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("token", "site-token").unwrap();

        let store = SessionStore::restore(Flavor::Console, storage);
        assert!(store.token().is_empty());
    }

    #[test]
    fn test_restore_null_and_corrupt_profile() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set_item("token", "abc").unwrap();
        storage.set_item("userInfo", "null").unwrap();
        let store = SessionStore::restore(Flavor::Site, storage.clone());
        assert!(store.user_info().is_none());
        assert!(!store.is_login());

        storage.set_item("userInfo", "{broken").unwrap();
        let store = SessionStore::restore(Flavor::Site, storage);
        assert!(store.user_info().is_none());
        assert_eq!(store.token(), "abc");
    }

    #[test]
    fn test_token_without_profile_is_not_login() {
        let (_, store) = store(Flavor::Site);
        store.set_token("abc").unwrap();
        assert!(!store.is_login());
        assert_eq!(store.bearer_token().as_deref(), Some("abc"));
    }

    #[test]
    fn test_set_persists() {
        let (storage, store) = store(Flavor::Console);
        store.set_token("t1").unwrap();
        store.set_user_info(bob()).unwrap();

        assert_eq!(storage.get_item("admin_token").as_deref(), Some("t1"));
        let raw = storage.get_item("admin_userInfo").unwrap();
        let user: User = serde_json::from_str(&raw).unwrap();
        assert_eq!(user.username, "bob");
    }

    #[test]
    fn test_logout_idempotent() {
        let (storage, store) = store(Flavor::Site);
        store.set_token("abc").unwrap();
        store.set_user_info(bob()).unwrap();

        store.logout();
        assert_eq!(store.session(), Session::default());
        assert!(storage.keys().is_empty());

        store.logout();
        assert_eq!(store.session(), Session::default());
    }

    #[test]
    fn test_invalidate_clears_session() {
        let (_, store) = store(Flavor::Site);
        store.set_token("abc").unwrap();
        store.invalidate();
        assert!(store.bearer_token().is_none());
    }

    #[test]
    fn test_is_admin() {
        let (_, store) = store(Flavor::Console);
        store.set_user_info(bob()).unwrap();
        assert!(!store.is_admin());

        store
            .set_user_info(User {
                username: "carol".into(),
                role: Some(1),
                ..Default::default()
            })
            .unwrap();
        assert!(store.is_admin());
    }

    #[tokio::test]
    async fn test_site_login_persists() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/login"))
            .and(body_json(json!({"username": "bob", "password": "pw"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"token": "abc", "userInfo": {"id": 7, "username": "bob", "role": 0}}
            })))
            .mount(&server)
            .await;

        let storage = Arc::new(MemoryStorage::new());
        let store = Arc::new(SessionStore::restore(Flavor::Site, storage.clone()));
        let client = client_for(&server, store.clone(), Flavor::Site);

        let session = store
            .login(&client, &LoginRequest::password("bob", "pw"))
            .await
            .unwrap();
        assert_eq!(session.token, "abc");
        assert!(session.is_login());
        assert!(!session.is_admin());
        assert_eq!(storage.get_item("token").as_deref(), Some("abc"));

        // A restart sees the same session.
        let reloaded = SessionStore::restore(Flavor::Site, storage);
        assert_eq!(reloaded.session(), session);
    }

    #[tokio::test]
    async fn test_login_storage_failure_keeps_previous_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"token": "fresh", "userInfo": {"id": 7, "username": "bob", "role": 0}}
            })))
            .mount(&server)
            .await;

        let storage = Arc::new(ProfileWritesFail::default());
        storage.set_item("token", "old").unwrap();
        let store = Arc::new(SessionStore::restore(Flavor::Site, storage.clone()));
        let client = client_for(&server, store.clone(), Flavor::Site);

        let err = store
            .login(&client, &LoginRequest::password("bob", "pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Io { .. })));

        assert_eq!(store.token(), "old");
        assert!(store.user_info().is_none());
        assert_eq!(storage.get_item("token").as_deref(), Some("old"));
        assert!(storage.get_item("userInfo").is_none());
    }

    #[test]
    fn test_set_user_info_failure_keeps_memory() {
        let storage = Arc::new(ProfileWritesFail::default());
        let store = SessionStore::restore(Flavor::Console, storage);
        assert!(store.set_user_info(bob()).is_err());
        assert!(store.user_info().is_none());
    }

    #[tokio::test]
    async fn test_console_login_uses_admin_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/admin-login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"token": "root-token", "userInfo": {"id": 1, "username": "admin", "role": 1}}
            })))
            .mount(&server)
            .await;

        let (storage, store) = store(Flavor::Console);
        let store = Arc::new(store);
        let client = client_for(&server, store.clone(), Flavor::Console);

        let session = store
            .login(&client, &LoginRequest::password("admin", "pw"))
            .await
            .unwrap();
        assert!(session.is_admin());
        assert_eq!(storage.get_item("admin_token").as_deref(), Some("root-token"));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/user/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 500,
                "message": "Wrong username or password"
            })))
            .mount(&server)
            .await;

        let (storage, store) = store(Flavor::Site);
        let store = Arc::new(store);
        let client = client_for(&server, store.clone(), Flavor::Site);

        let err = store
            .login(&client, &LoginRequest::password("bob", "bad"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Client(_)));
        assert!(!store.is_login());
        assert!(storage.keys().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_profile_requires_token() {
        let server = MockServer::start().await;
        let (_, store) = store(Flavor::Site);
        let store = Arc::new(store);
        let client = client_for(&server, store.clone(), Flavor::Site);

        let err = store.refresh_profile(&client).await.unwrap_err();
        assert!(matches!(err, Error::NotSignedIn));
    }

    #[tokio::test]
    async fn test_console_refresh_passes_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/info"))
            .and(query_param("id", "7"))
            .and(header("authorization", "Bearer abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"id": 7, "username": "bob", "nickname": "Bobby"}
            })))
            .mount(&server)
            .await;

        let (storage, store) = store(Flavor::Console);
        store.set_token("abc").unwrap();
        store.set_user_info(bob()).unwrap();
        let store = Arc::new(store);
        let client = client_for(&server, store.clone(), Flavor::Console);

        let user = store.refresh_profile(&client).await.unwrap();
        assert_eq!(user.display_name(), "Bobby");
        assert!(storage.get_item("admin_userInfo").unwrap().contains("Bobby"));
    }

    #[tokio::test]
    async fn test_expired_session_cleared_by_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user/info"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 401,
                "message": "Token expired"
            })))
            .mount(&server)
            .await;

        let (storage, store) = store(Flavor::Site);
        store.set_token("stale").unwrap();
        store.set_user_info(bob()).unwrap();
        let store = Arc::new(store);
        let client = client_for(&server, store.clone(), Flavor::Site);

        assert!(store.refresh_profile(&client).await.is_err());
        assert!(!store.is_login());
        assert!(storage.get_item("token").is_none());
    }
}
