//! Comments API.

use serde_json::json;

use crate::client::BlogClient;
use crate::error::Result;
use crate::types::{
    Comment, CommentQuery, CreateCommentRequest, PageQuery, PageResult, ReplyCommentRequest,
};

/// Comments API client.
pub struct CommentsApi {
    client: BlogClient,
}

impl CommentsApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// All comments across articles (console).
    pub async fn list_all(&self, query: &CommentQuery) -> Result<PageResult<Comment>> {
        self.client.get_with_query("comment/list", query).await
    }

    /// Comments on one article.
    pub async fn for_article(&self, article_id: i64, page: PageQuery) -> Result<PageResult<Comment>> {
        self.client
            .get_with_query(&format!("comment/{}/list", article_id), &page)
            .await
    }

    /// Post a top-level comment.
    pub async fn add(&self, request: &CreateCommentRequest) -> Result<Comment> {
        self.client.post("comment", request).await
    }

    /// Reply to a comment.
    pub async fn reply(&self, request: &ReplyCommentRequest) -> Result<Comment> {
        self.client.post("comment/reply", request).await
    }

    /// Delete a comment.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("comment/{}", id)).await
    }

    /// Like a comment.
    pub async fn like(&self, id: i64) -> Result<()> {
        self.client.post_empty(&format!("comment/{}/like", id)).await
    }

    /// Set a comment's audit status.
    pub async fn audit(&self, id: i64, status: i32) -> Result<()> {
        self.client
            .put(&format!("comment/{}/audit", id), &json!({ "status": status }))
            .await
    }
}
