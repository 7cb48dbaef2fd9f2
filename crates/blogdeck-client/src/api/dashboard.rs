//! Dashboard API.

use crate::client::BlogClient;
use crate::error::Result;
use crate::types::{Article, CategoryStat, Comment, DashboardStats, VisitTrend};

/// Dashboard API client.
pub struct DashboardApi {
    client: BlogClient,
}

impl DashboardApi {
    pub(crate) fn new(client: BlogClient) -> Self {
        Self { client }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        self.client.get("dashboard/stats").await
    }

    pub async fn recent_articles(&self) -> Result<Vec<Article>> {
        self.client.get("dashboard/recent-articles").await
    }

    pub async fn recent_comments(&self) -> Result<Vec<Comment>> {
        self.client.get("dashboard/recent-comments").await
    }

    pub async fn visit_trend(&self) -> Result<VisitTrend> {
        self.client.get("dashboard/visit-trend").await
    }

    pub async fn category_stats(&self) -> Result<Vec<CategoryStat>> {
        self.client.get("dashboard/category-stats").await
    }
}
