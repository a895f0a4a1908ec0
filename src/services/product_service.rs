use chrono::Utc;
use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, QuerySelect};

use crate::{
    dto::products::ProductList,
    entity::products::{Column, Entity as Products, Model as ProductModel},
    error::{AppError, AppResult},
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{PAGE_SIZE, Pagination},
    state::AppState,
};

/// Catalog page in store order (id ascending), fixed page size.
pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, offset) = pagination.normalize();
    let finder = Products::find().order_by_asc(Column::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let items = finder
        .limit(PAGE_SIZE as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(product_from_entity)
        .collect();

    let meta = Meta::new(page, PAGE_SIZE, total);
    let data = ProductList { items };
    Ok(ApiResponse::success("Products", data, Some(meta)))
}

pub async fn get_product(state: &AppState, id: i64) -> AppResult<ApiResponse<Product>> {
    let result = Products::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(product_from_entity);
    let result = match result {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Product", result, None))
}

fn product_from_entity(model: ProductModel) -> Product {
    Product {
        id: model.id,
        name: model.name,
        description: model.description,
        price: model.price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
