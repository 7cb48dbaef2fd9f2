//! Main client implementation (the HTTP gateway).

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{
    ArticlesApi, CaptchaApi, CategoriesApi, CommentsApi, DashboardApi, SettingsApi, TagsApi,
    UploadsApi, UsersApi, WeatherApi,
};
use crate::envelope::{Envelope, UNAUTHORIZED_CODE};
use crate::error::{Error, Result};
use crate::hooks::{
    Anonymous, AuthContext, Flavor, LogNavigator, Navigator, Notice, Notifier, TracingNotifier,
};

/// Default timeout for requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the login screen both applications redirect to.
pub const LOGIN_PATH: &str = "/login";

/// Shown by the site when a request never got a response.
const SITE_NETWORK_ERROR: &str = "Network request failed";

/// Shown by the console when a request never got a response.
const CONSOLE_NETWORK_ERROR: &str = "Network error";

/// Shown by the console when the backend answers HTTP 401.
const CONSOLE_SESSION_EXPIRED: &str = "Login expired, please sign in again";

/// Blog backend API client.
///
/// Every call goes through one gateway that attaches the bearer token,
/// unwraps the response envelope, and reports failures to the
/// [`Notifier`] before returning them.
///
/// # Example
///
/// ```no_run
/// use blogdeck_client::{BlogClient, ArticleQuery};
///
/// # async fn example() -> blogdeck_client::Result<()> {
/// let client = BlogClient::builder()
///     .base_url("http://localhost:8080/api")
///     .build()?;
///
/// let page = client.articles().list(&ArticleQuery::default()).await?;
/// println!("{} articles", page.total);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BlogClient {
    /// Inner shared state.
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL; every endpoint path is joined onto it.
    pub(crate) base_url: Url,
    /// Request timeout.
    pub(crate) timeout: Duration,
    /// Which application's error handling to follow.
    pub(crate) flavor: Flavor,
    pub(crate) auth: Arc<dyn AuthContext>,
    pub(crate) notifier: Arc<dyn Notifier>,
    pub(crate) navigator: Arc<dyn Navigator>,
}

impl BlogClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Which application this client behaves as.
    pub fn flavor(&self) -> Flavor {
        self.inner.flavor
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Access the articles API.
    pub fn articles(&self) -> ArticlesApi {
        ArticlesApi::new(self.clone())
    }

    /// Access the categories API.
    pub fn categories(&self) -> CategoriesApi {
        CategoriesApi::new(self.clone())
    }

    /// Access the tags API.
    pub fn tags(&self) -> TagsApi {
        TagsApi::new(self.clone())
    }

    /// Access the comments API.
    pub fn comments(&self) -> CommentsApi {
        CommentsApi::new(self.clone())
    }

    /// Access the users API.
    pub fn users(&self) -> UsersApi {
        UsersApi::new(self.clone())
    }

    /// Access the captcha API.
    pub fn captcha(&self) -> CaptchaApi {
        CaptchaApi::new(self.clone())
    }

    /// Access the uploads API.
    pub fn uploads(&self) -> UploadsApi {
        UploadsApi::new(self.clone())
    }

    /// Access the settings API.
    pub fn settings(&self) -> SettingsApi {
        SettingsApi::new(self.clone())
    }

    /// Access the dashboard API.
    pub fn dashboard(&self) -> DashboardApi {
        DashboardApi::new(self.clone())
    }

    /// Access the weather proxy API.
    pub fn weather(&self) -> WeatherApi {
        WeatherApi::new(self.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal HTTP methods
    // ─────────────────────────────────────────────────────────────────────────

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner.base_url.join(path).map_err(Error::from)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        Ok(self.inner.http.request(method, url))
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::GET, path)?;
        self.execute(path, request).await
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::GET, path)?.query(query);
        self.execute(path, request).await
    }

    /// Make a POST request with a JSON body.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.json(body);
        self.execute(path, request).await
    }

    /// Make a POST request without a body.
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::POST, path)?;
        self.execute(path, request).await
    }

    /// Make a POST request whose parameters travel in the query string.
    pub(crate) async fn post_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::POST, path)?.query(query);
        self.execute(path, request).await
    }

    /// Make a multipart POST request.
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let request = self.request(Method::POST, path)?.multipart(form);
        self.execute(path, request).await
    }

    /// Make a PUT request.
    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let request = self.request(Method::PUT, path)?.json(body);
        self.execute(path, request).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let request = self.request(Method::DELETE, path)?;
        self.execute(path, request).await
    }

    /// Attach the bearer token when the session holds a non-empty one.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.inner.auth.bearer_token() {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    /// Send a request and run it through both error layers.
    async fn execute<T: DeserializeOwned>(&self, path: &str, request: RequestBuilder) -> Result<T> {
        let request = self.authorize(request).timeout(self.inner.timeout);
        tracing::debug!(path = %path, flavor = %self.inner.flavor, "Sending request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Request failed without a response");
                self.notify_network_error(&e);
                return Err(Error::Http(e));
            }
        };

        if !response.status().is_success() {
            return Err(self.handle_status_failure(path, response).await);
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Response body could not be read");
                self.notify_network_error(&e);
                return Err(Error::Http(e));
            }
        };

        self.handle_envelope(path, Envelope::from_body(&body))
    }

    /// Envelope layer: anything other than code 200 is an application failure.
    fn handle_envelope<T: DeserializeOwned>(&self, path: &str, envelope: Envelope) -> Result<T> {
        if envelope.is_success() {
            return envelope.into_data();
        }

        let message = envelope.failure_message();
        tracing::warn!(path = %path, code = envelope.code, message = %message, "Envelope reported failure");
        self.inner.notifier.notify(Notice::error(message.clone()));

        // The site treats an envelope 401 as an expired session.
        if self.inner.flavor == Flavor::Site && envelope.code == UNAUTHORIZED_CODE {
            self.expire_session();
        }

        Err(Error::Api {
            code: envelope.code,
            message,
        })
    }

    /// HTTP layer: non-2xx status.
    async fn handle_status_failure(&self, path: &str, response: Response) -> Error {
        let status = response.status().as_u16();
        let message = response
            .json::<Envelope>()
            .await
            .ok()
            .and_then(|env| env.message)
            .filter(|m| !m.is_empty());
        tracing::warn!(path = %path, status, "HTTP request returned failure status");

        let generic = format!("Request failed with status code {}", status);
        match self.inner.flavor {
            // The console treats an HTTP 401 as an expired session.
            Flavor::Console if status == 401 => {
                self.expire_session();
                self.inner
                    .notifier
                    .notify(Notice::error(CONSOLE_SESSION_EXPIRED));
            }
            Flavor::Console => {
                let text = message.clone().unwrap_or(generic);
                self.inner.notifier.notify(Notice::error(text));
            }
            Flavor::Site => {
                self.inner.notifier.notify(Notice::error(generic));
            }
        }

        Error::Status { status, message }
    }

    fn notify_network_error(&self, error: &reqwest::Error) {
        let text = match self.inner.flavor {
            Flavor::Site => SITE_NETWORK_ERROR,
            Flavor::Console => CONSOLE_NETWORK_ERROR,
        };
        tracing::debug!(error = %error, "Reporting network failure");
        self.inner.notifier.notify(Notice::error(text));
    }

    fn expire_session(&self) {
        tracing::info!("Backend rejected the session, logging out");
        self.inner.auth.invalidate();
        self.inner.navigator.redirect(LOGIN_PATH);
    }
}

/// Builder for creating a BlogClient.
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
    flavor: Flavor,
    auth: Arc<dyn AuthContext>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .field("flavor", &self.flavor)
            .finish_non_exhaustive()
    }
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
            flavor: Flavor::default(),
            auth: Arc::new(Anonymous),
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(LogNavigator),
        }
    }

    /// Set the base URL of the API (including any path prefix such as `/api`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Select which application's behavior the gateway follows.
    pub fn flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Set the token source / session owner.
    pub fn auth(mut self, auth: Arc<dyn AuthContext>) -> Self {
        self.auth = auth;
        self
    }

    /// Set where user notifications go.
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Set the navigator used to reach the login screen.
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<BlogClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| Error::Config("base_url is required".to_string()))?;

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("blogdeck-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()?;

        Ok(BlogClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
                flavor: self.flavor,
                auth: self.auth,
                notifier: self.notifier,
                navigator: self.navigator,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_base_url() {
        let result = ClientBuilder::new().build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:8080/api")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");

        let client = ClientBuilder::new()
            .base_url("http://localhost:8080/api/")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
    }

    #[test]
    fn test_url_building() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:8080/api")
            .build()
            .unwrap();

        let url = client.url("article/list").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/article/list");

        let url = client.url("/comment/7/list").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/comment/7/list");
    }

    #[test]
    fn test_builder_defaults_to_site() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:8080/api")
            .build()
            .unwrap();
        assert_eq!(client.flavor(), Flavor::Site);
    }
}
