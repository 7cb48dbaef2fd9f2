//! Articles API.

use crate::client::BlogClient;
use crate::error::Result;
use crate::types::{Article, ArticleQuery, AuditDecision, PageQuery, PageResult, SearchQuery};

/// Articles API client.
pub struct ArticlesApi {
    client: BlogClient,
}

impl ArticlesApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// List published articles.
    pub async fn list(&self, query: &ArticleQuery) -> Result<PageResult<Article>> {
        self.client.get_with_query("article/list", query).await
    }

    /// List every article regardless of status (console).
    pub async fn admin_list(&self, query: &ArticleQuery) -> Result<PageResult<Article>> {
        self.client.get_with_query("article/admin/list", query).await
    }

    /// List the signed-in user's own articles.
    pub async fn mine(&self, query: &ArticleQuery) -> Result<PageResult<Article>> {
        self.client.get_with_query("article/user/list", query).await
    }

    /// Get an article by ID.
    pub async fn get(&self, id: i64) -> Result<Article> {
        self.client.get(&format!("article/{}", id)).await
    }

    /// Get one of the signed-in user's articles, including unpublished ones.
    pub async fn get_own(&self, id: i64) -> Result<Article> {
        self.client.get(&format!("article/user/{}", id)).await
    }

    /// Full-text search.
    pub async fn search(&self, keyword: &str, page: PageQuery) -> Result<PageResult<Article>> {
        let query = SearchQuery {
            keyword: keyword.to_string(),
            page,
        };
        self.client.get_with_query("article/search", &query).await
    }

    /// Create an article.
    pub async fn create(&self, article: &Article) -> Result<Article> {
        self.client.post("article", article).await
    }

    /// Update an article (console).
    pub async fn update(&self, article: &Article) -> Result<Article> {
        self.client.put("article", article).await
    }

    /// Update one of the signed-in user's articles.
    pub async fn update_own(&self, article: &Article) -> Result<Article> {
        self.client.put("article/user", article).await
    }

    /// Delete an article.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("article/{}", id)).await
    }

    /// Like an article.
    pub async fn like(&self, id: i64) -> Result<()> {
        self.client.post_empty(&format!("article/{}/like", id)).await
    }

    /// Count a view.
    pub async fn increase_view(&self, id: i64) -> Result<()> {
        self.client.post_empty(&format!("article/{}/view", id)).await
    }

    /// Articles waiting for audit.
    pub async fn audit_list(&self, page: PageQuery) -> Result<PageResult<Article>> {
        self.client.get_with_query("article/audit/list", &page).await
    }

    /// Approve or reject an article.
    pub async fn audit(&self, id: i64, decision: &AuditDecision) -> Result<()> {
        self.client
            .post_with_query(&format!("article/{}/audit", id), decision)
            .await
    }

    /// Resubmit a rejected article for audit.
    pub async fn resubmit(&self, id: i64) -> Result<()> {
        self.client
            .post_empty(&format!("article/{}/resubmit", id))
            .await
    }
}
