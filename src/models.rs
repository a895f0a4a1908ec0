use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Catalog item. `price` is a JSON number on the wire, never a string, and
/// `created_at` serializes to RFC 3339.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

/// One (user, product) pair. The `wishlists` table enforces uniqueness of
/// the pair, so a user can hold at most one entry per product.
#[derive(Debug, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WishlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub created_at: DateTime<Utc>,
}
