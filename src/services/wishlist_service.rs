use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::{
    audit::log_audit,
    dto::wishlist::WishlistItem,
    error::{AppError, AppResult},
    models::{Product, WishlistEntry},
    state::AppState,
};

/// Joined row shape for the wishlist listing. Product columns are aliased
/// to keep them distinct from the entry's own id/created_at.
#[derive(FromRow)]
struct WishlistRow {
    id: i64,
    created_at: DateTime<Utc>,
    product_id: i64,
    product_name: String,
    product_description: Option<String>,
    product_price: f64,
    product_created_at: DateTime<Utc>,
}

impl WishlistRow {
    fn into_item(self) -> WishlistItem {
        WishlistItem {
            id: self.id,
            created_at: self.created_at,
            product: Product {
                id: self.product_id,
                name: self.product_name,
                description: self.product_description,
                price: self.product_price,
                created_at: self.product_created_at,
            },
        }
    }
}

/// All entries for the user with their products joined in, newest first.
pub async fn list_wishlist(state: &AppState, user_id: i64) -> AppResult<Vec<WishlistItem>> {
    let rows: Vec<WishlistRow> = sqlx::query_as(
        r#"
        SELECT w.id,
               w.created_at,
               p.id AS product_id,
               p.name AS product_name,
               p.description AS product_description,
               p.price AS product_price,
               p.created_at AS product_created_at
        FROM wishlists w
        JOIN products p ON p.id = w.product_id
        WHERE w.user_id = $1
        ORDER BY w.created_at DESC, w.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(&state.pool)
    .await?;

    Ok(rows.into_iter().map(WishlistRow::into_item).collect())
}

/// Create-if-absent. The unique index on (user_id, product_id) arbitrates
/// concurrent duplicate adds: the losing insert returns no row and the
/// surviving entry is fetched instead, so both callers observe success.
pub async fn add_to_wishlist(
    state: &AppState,
    user_id: i64,
    product_id: i64,
) -> AppResult<WishlistEntry> {
    let product_exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM products WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&state.pool)
        .await?;

    if product_exists.is_none() {
        return Err(AppError::validation(
            "product_id",
            "The selected product_id is invalid.",
        ));
    }

    let inserted: Option<WishlistEntry> = sqlx::query_as(
        r#"
        INSERT INTO wishlists (user_id, product_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, product_id) DO NOTHING
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_optional(&state.pool)
    .await?;

    let entry = match inserted {
        Some(entry) => entry,
        None => {
            sqlx::query_as("SELECT * FROM wishlists WHERE user_id = $1 AND product_id = $2")
                .bind(user_id)
                .bind(product_id)
                .fetch_one(&state.pool)
                .await?
        }
    };

    if let Err(err) = log_audit(
        &state.pool,
        Some(user_id),
        "wishlist_add",
        Some("wishlists"),
        Some(serde_json::json!({ "product_id": product_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(entry)
}

/// Delete the matching entry if present. Absence is not an error here;
/// the route layer turns `false` into a 404.
pub async fn remove_from_wishlist(
    state: &AppState,
    user_id: i64,
    product_id: i64,
) -> AppResult<bool> {
    let result = sqlx::query("DELETE FROM wishlists WHERE user_id = $1 AND product_id = $2")
        .bind(user_id)
        .bind(product_id)
        .execute(&state.pool)
        .await?;

    let deleted = result.rows_affected() > 0;

    if deleted {
        if let Err(err) = log_audit(
            &state.pool,
            Some(user_id),
            "wishlist_remove",
            Some("wishlists"),
            Some(serde_json::json!({ "product_id": product_id })),
        )
        .await
        {
            tracing::warn!(error = %err, "audit log failed");
        }
    }

    Ok(deleted)
}
