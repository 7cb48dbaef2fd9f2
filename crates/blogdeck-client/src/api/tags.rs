//! Tags API.

use crate::client::BlogClient;
use crate::error::Result;
use crate::types::{Article, PageQuery, PageResult, Tag};

/// Tags API client.
pub struct TagsApi {
    client: BlogClient,
}

impl TagsApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// List all tags.
    pub async fn list(&self) -> Result<Vec<Tag>> {
        self.client.get("tag/list").await
    }

    /// Get a tag by ID.
    pub async fn get(&self, id: i64) -> Result<Tag> {
        self.client.get(&format!("tag/{}", id)).await
    }

    /// Create a tag.
    pub async fn create(&self, tag: &Tag) -> Result<Tag> {
        self.client.post("tag", tag).await
    }

    /// Update a tag.
    pub async fn update(&self, tag: &Tag) -> Result<Tag> {
        self.client.put("tag", tag).await
    }

    /// Delete a tag.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("tag/{}", id)).await
    }

    /// Articles carrying a tag.
    pub async fn articles(&self, tag_id: i64, page: PageQuery) -> Result<PageResult<Article>> {
        self.client
            .get_with_query(&format!("tag/{}/articles", tag_id), &page)
            .await
    }
}
