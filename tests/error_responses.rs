use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum_wishlist_api::error::AppError;

#[test]
fn not_found_maps_to_404() {
    let response = AppError::NotFound.into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn unauthorized_maps_to_401() {
    let response = AppError::Unauthorized("no token".into()).into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn validation_maps_to_422() {
    let response =
        AppError::validation("product_id", "The selected product_id is invalid.").into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[test]
fn bad_request_maps_to_400() {
    let response = AppError::BadRequest("nope".into()).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
