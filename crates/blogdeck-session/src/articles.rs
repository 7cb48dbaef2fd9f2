//! Article listing cache.
//!
//! Keeps the most recently fetched page, detail, and taxonomy so views can
//! render without re-fetching. A failed fetch leaves the previous contents
//! in place; the loading flag is cleared whether the fetch succeeds, fails,
//! or is cancelled.

use blogdeck_client::{Article, ArticleQuery, BlogClient, Category, PageQuery, PageResult, Tag};
use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;

/// Snapshot of the cache contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleListState {
    pub items: Vec<Article>,
    pub total: u64,
    pub loading: bool,
    pub detail: Option<Article>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
}

/// Cache of article data fetched through a [`BlogClient`].
#[derive(Debug, Default)]
pub struct ArticleCache {
    state: RwLock<ArticleListState>,
}

/// Clears the loading flag when dropped.
struct Loading<'a>(&'a RwLock<ArticleListState>);

impl<'a> Loading<'a> {
    fn start(state: &'a RwLock<ArticleListState>) -> Self {
        state.write().loading = true;
        Self(state)
    }
}

impl Drop for Loading<'_> {
    fn drop(&mut self) {
        self.0.write().loading = false;
    }
}

impl ArticleCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> ArticleListState {
        self.state.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().loading
    }

    /// Fetch a page of published articles and replace the cached list.
    pub async fn fetch_list(
        &self,
        client: &BlogClient,
        query: &ArticleQuery,
    ) -> Result<PageResult<Article>> {
        let _loading = Loading::start(&self.state);
        let page = client.articles().list(query).await?;
        self.store_page(&page);
        Ok(page)
    }

    /// Search articles and replace the cached list with the hits.
    pub async fn search(
        &self,
        client: &BlogClient,
        keyword: &str,
        page: PageQuery,
    ) -> Result<PageResult<Article>> {
        let _loading = Loading::start(&self.state);
        let hits = client.articles().search(keyword, page).await?;
        self.store_page(&hits);
        Ok(hits)
    }

    /// Fetch a single article and cache it as the current detail.
    pub async fn fetch_detail(&self, client: &BlogClient, id: i64) -> Result<Article> {
        let _loading = Loading::start(&self.state);
        let article = client.articles().get(id).await?;
        self.state.write().detail = Some(article.clone());
        debug!(id, title = %article.title, "Cached article detail");
        Ok(article)
    }

    pub fn set_categories(&self, categories: Vec<Category>) {
        self.state.write().categories = categories;
    }

    pub fn set_tags(&self, tags: Vec<Tag>) {
        self.state.write().tags = tags;
    }

    fn store_page(&self, page: &PageResult<Article>) {
        let mut state = self.state.write();
        state.items = page.list.clone();
        state.total = page.total;
        debug!(items = state.items.len(), total = state.total, "Cached article page");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> BlogClient {
        BlogClient::builder()
            .base_url(format!("{}/api", server.uri()))
            .build()
            .unwrap()
    }

    fn page_body(titles: &[&str], total: u64) -> serde_json::Value {
        let list: Vec<_> = titles
            .iter()
            .enumerate()
            .map(|(i, t)| json!({"id": i as i64 + 1, "title": t}))
            .collect();
        json!({"code": 200, "data": {"list": list, "total": total}})
    }

    #[test]
    fn test_new_cache_is_empty() {
        let cache = ArticleCache::new();
        assert_eq!(cache.snapshot(), ArticleListState::default());
        assert!(!cache.is_loading());
    }

    #[tokio::test]
    async fn test_fetch_list_replaces_items() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/article/list"))
            .and(query_param("pageNum", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["a", "b"], 12)))
            .mount(&server)
            .await;

        let cache = ArticleCache::new();
        let query = ArticleQuery {
            page_num: Some(1),
            page_size: Some(10),
            ..Default::default()
        };
        let page = cache.fetch_list(&client_for(&server), &query).await.unwrap();

        assert_eq!(page.list.len(), 2);
        let state = cache.snapshot();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.total, 12);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/article/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["kept"], 1)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/article/list"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let cache = ArticleCache::new();
        cache
            .fetch_list(&client, &ArticleQuery::default())
            .await
            .unwrap();
        assert!(cache.fetch_list(&client, &ArticleQuery::default()).await.is_err());

        let state = cache.snapshot();
        assert_eq!(state.items[0].title, "kept");
        assert_eq!(state.total, 1);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_envelope_failure_keeps_previous_state() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/article/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["one", "two"], 7)))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/article/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 500,
                "message": "Database unavailable"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let cache = ArticleCache::new();
        cache
            .fetch_list(&client, &ArticleQuery::default())
            .await
            .unwrap();
        let before = cache.snapshot();

        let err = cache
            .fetch_list(&client, &ArticleQuery::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Database unavailable"));

        let state = cache.snapshot();
        assert_eq!(state, before);
        assert_eq!(state.total, 7);
        assert_eq!(state.items[1].title, "two");
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_search_and_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/article/search"))
            .and(query_param("keyword", "rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&["Rust tips"], 1)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/article/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"id": 3, "title": "Detail", "content": "body"}
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let cache = ArticleCache::new();

        let hits = cache.search(&client, "rust", PageQuery::new(1, 10)).await.unwrap();
        assert_eq!(hits.total, 1);
        assert_eq!(cache.snapshot().items[0].title, "Rust tips");

        let article = cache.fetch_detail(&client, 3).await.unwrap();
        assert_eq!(article.title, "Detail");
        let state = cache.snapshot();
        assert_eq!(state.detail.unwrap().id, Some(3));
        assert_eq!(state.items.len(), 1);
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn test_failed_detail_keeps_previous_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/article/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 404,
                "message": "Article not found"
            })))
            .mount(&server)
            .await;

        let cache = ArticleCache::new();
        assert!(cache.fetch_detail(&client_for(&server), 9).await.is_err());
        assert!(cache.snapshot().detail.is_none());
        assert!(!cache.is_loading());
    }

    #[test]
    fn test_set_taxonomy() {
        let cache = ArticleCache::new();
        cache.set_categories(vec![Category {
            id: Some(1),
            name: "Tech".into(),
            ..Default::default()
        }]);
        cache.set_tags(vec![Tag {
            id: Some(2),
            name: "rust".into(),
            ..Default::default()
        }]);

        let state = cache.snapshot();
        assert_eq!(state.categories[0].name, "Tech");
        assert_eq!(state.tags[0].name, "rust");
    }
}
