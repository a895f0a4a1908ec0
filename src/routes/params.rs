use serde::Deserialize;
use utoipa::ToSchema;

/// Catalog pages are a fixed size; clients only choose the page number.
pub const PAGE_SIZE: i64 = 20;

#[derive(Debug, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let offset = (page - 1) * PAGE_SIZE;
        (page, offset)
    }
}
