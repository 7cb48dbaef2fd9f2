//! Categories API.

use crate::client::BlogClient;
use crate::error::Result;
use crate::types::{Article, Category, PageQuery, PageResult};

/// Categories API client.
pub struct CategoriesApi {
    client: BlogClient,
}

impl CategoriesApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    /// List all categories.
    pub async fn list(&self) -> Result<Vec<Category>> {
        self.client.get("category/list").await
    }

    /// Get a category by ID.
    pub async fn get(&self, id: i64) -> Result<Category> {
        self.client.get(&format!("category/{}", id)).await
    }

    /// Create a category.
    pub async fn create(&self, category: &Category) -> Result<Category> {
        self.client.post("category", category).await
    }

    /// Update a category.
    pub async fn update(&self, category: &Category) -> Result<Category> {
        self.client.put("category", category).await
    }

    /// Delete a category.
    pub async fn delete(&self, id: i64) -> Result<()> {
        self.client.delete(&format!("category/{}", id)).await
    }

    /// Articles in a category.
    pub async fn articles(&self, category_id: i64, page: PageQuery) -> Result<PageResult<Article>> {
        self.client
            .get_with_query(&format!("category/{}/articles", category_id), &page)
            .await
    }
}
