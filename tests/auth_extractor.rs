use axum::extract::FromRequestParts;
use axum::http::Request;
use axum_wishlist_api::{error::AppError, middleware::auth::AuthUser};

fn parts_for(request: Request<()>) -> axum::http::request::Parts {
    let (parts, _) = request.into_parts();
    parts
}

#[tokio::test]
async fn missing_authorization_header_is_unauthorized() {
    let request = Request::builder().uri("/api/wishlist").body(()).unwrap();
    let mut parts = parts_for(request);

    let err = AuthUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let request = Request::builder()
        .uri("/api/wishlist")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(())
        .unwrap();
    let mut parts = parts_for(request);

    let err = AuthUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    unsafe { std::env::set_var("JWT_SECRET", "extractor-test-secret") };

    let request = Request::builder()
        .uri("/api/wishlist")
        .header("authorization", "Bearer not-a-jwt")
        .body(())
        .unwrap();
    let mut parts = parts_for(request);

    let err = AuthUser::from_request_parts(&mut parts, &())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}
