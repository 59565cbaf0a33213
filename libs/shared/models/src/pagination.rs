use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paginated envelope shape emitted by the backend list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedEnvelope {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

fn default_page() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    /// Recompute the derived fields from raw backend counts.
    ///
    /// `limit == 0` is guarded to a page size of 1.
    pub fn from_counts(page: u32, limit: u32, total: u64) -> Self {
        let per_page = if limit == 0 { 1 } else { limit };
        let total_pages = total.div_ceil(per_page as u64) as u32;

        Self {
            current_page: page,
            per_page,
            total,
            total_pages,
            has_next_page: page < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// Client-side shape of a paginated listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Common query parameters for list endpoints.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub q: Option<String>,
}

impl ListParams {
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn search(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn sort(mut self, by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(by.into());
        self.sort_order = Some(order);
        self
    }

    /// Serialize into query pairs, applying the `createdAt` descending
    /// default when no sort was requested.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();

        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(q) = &self.q {
            pairs.push(("q".to_string(), q.clone()));
        }

        let sort_by = self.sort_by.clone().unwrap_or_else(|| "createdAt".to_string());
        let sort_order = self.sort_order.unwrap_or(SortOrder::Desc);
        pairs.push(("sortBy".to_string(), sort_by));
        pairs.push(("sortOrder".to_string(), sort_order.as_str().to_string()));

        pairs
    }
}
