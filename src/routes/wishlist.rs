use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use crate::{
    dto::wishlist::{AddToWishlistRequest, WishlistList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::WishlistEntry,
    response::{ApiResponse, Meta},
    services::wishlist_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_wishlist).post(add_to_wishlist))
        .route("/{product_id}", delete(remove_from_wishlist))
}

#[utoipa::path(
    get,
    path = "/api/wishlist",
    responses(
        (status = 200, description = "List wishlist entries", body = ApiResponse<WishlistList>),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn list_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<WishlistList>>> {
    let items = wishlist_service::list_wishlist(&state, user.user_id).await?;
    let data = WishlistList { items };
    Ok(Json(ApiResponse::success("OK", data, Some(Meta::empty()))))
}

#[utoipa::path(
    post,
    path = "/api/wishlist",
    request_body = AddToWishlistRequest,
    responses(
        (status = 201, description = "Added to wishlist", body = ApiResponse<WishlistEntry>),
        (status = 422, description = "Missing or unknown product_id"),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn add_to_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<AddToWishlistRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<WishlistEntry>>)> {
    let product_id = payload.product_id.ok_or_else(|| {
        AppError::validation("product_id", "The product_id field is required.")
    })?;

    let entry = wishlist_service::add_to_wishlist(&state, user.user_id, product_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Product added to wishlist",
            entry,
            Some(Meta::empty()),
        )),
    ))
}

#[utoipa::path(
    delete,
    path = "/api/wishlist/{product_id}",
    params(
        ("product_id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Removed from wishlist", body = ApiResponse<serde_json::Value>),
        (status = 404, description = "No entry for this product"),
        (status = 401, description = "Unauthenticated")
    ),
    security(("bearer_auth" = [])),
    tag = "Wishlist"
)]
pub async fn remove_from_wishlist(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let deleted = wishlist_service::remove_from_wishlist(&state, user.user_id, product_id).await?;

    if !deleted {
        return Err(AppError::NotFound);
    }

    Ok(Json(ApiResponse::success(
        "Product removed from wishlist",
        serde_json::json!({}),
        Some(Meta::empty()),
    )))
}
