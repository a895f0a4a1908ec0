use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;

/// `product_id` is optional so a missing field surfaces as a 422 with
/// field-level detail instead of a bare deserialization rejection.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddToWishlistRequest {
    pub product_id: Option<i64>,
}

/// One wishlist entry with its product joined in.
#[derive(Debug, Serialize, ToSchema)]
pub struct WishlistItem {
    pub id: i64,
    pub product: Product,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct WishlistList {
    #[schema(value_type = Vec<WishlistItem>)]
    pub items: Vec<WishlistItem>,
}
