use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum_wishlist_api::{
    db::{create_orm_conn, create_pool, run_migrations},
    dto::auth::{LoginRequest, RegisterRequest},
    entity::{
        AuditLogs, Wishlists, audit_logs,
        products::ActiveModel as ProductActive,
        users::ActiveModel as UserActive, wishlists,
    },
    error::AppError,
    routes::{create_api_router, params::Pagination},
    services::{auth_service, product_service, wishlist_service},
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    Statement,
};
use tower::ServiceExt;

// Integration flow: catalog listing, idempotent wishlist add (including a
// concurrent duplicate pair), validation, removal, auth round trip, and the
// 401 wall in front of the wishlist endpoints.
#[tokio::test]
async fn wishlist_add_list_remove_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url =
        match std::env::var("TEST_DATABASE_URL").or_else(|_| std::env::var("DATABASE_URL")) {
            Ok(url) => url,
            Err(_) => {
                eprintln!(
                    "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
                );
                return Ok(());
            }
        };

    unsafe { std::env::set_var("JWT_SECRET", "wishlist-flow-test-secret") };

    let state = setup_state(&database_url).await?;

    // Seed a user directly; register/login get their own round trip below.
    let user = UserActive {
        id: NotSet,
        name: Set("Wishlist Tester".into()),
        email: Set("tester@example.com".into()),
        password_hash: Set("dummy".into()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    let mut product_ids = Vec::new();
    for i in 0..5 {
        let product = ProductActive {
            id: NotSet,
            name: Set(format!("Test Widget {i}")),
            description: Set(Some(format!("Widget number {i} for testing"))),
            price: Set(10.5 + i as f64 * 1.25),
            created_at: NotSet,
        }
        .insert(&state.orm)
        .await?;
        product_ids.push(product.id);
    }

    // Catalog page: all 5 products, fixed-size page, floats and timestamps
    // serialized the way clients expect.
    let listing =
        product_service::list_products(&state, Pagination { page: Some(1) }).await?;
    let listing_value = serde_json::to_value(&listing)?;
    let data = listing_value["data"].as_array().expect("data array");
    assert_eq!(data.len(), 5);
    assert_eq!(listing_value["meta"]["total"], 5);
    for item in data {
        assert!(item["id"].is_i64());
        assert!(item["name"].is_string());
        assert!(item["description"].is_string());
        assert!(item["price"].is_f64(), "price must be a JSON number");
        let created_at = item["created_at"].as_str().expect("created_at string");
        chrono::DateTime::parse_from_rfc3339(created_at).expect("created_at must be RFC 3339");
    }

    // Single product fetch, and a miss.
    let fetched = product_service::get_product(&state, product_ids[0]).await?;
    assert_eq!(fetched.data.unwrap().id, product_ids[0]);
    let missing = product_service::get_product(&state, 999_999).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    // First add creates the entry, second add returns it unchanged.
    let entry = wishlist_service::add_to_wishlist(&state, user.id, product_ids[0]).await?;
    let again = wishlist_service::add_to_wishlist(&state, user.id, product_ids[0]).await?;
    assert_eq!(entry.id, again.id);
    assert_eq!(count_entries(&state, user.id, product_ids[0]).await?, 1);

    // Concurrent duplicate adds: both succeed, one row survives.
    let (first, second) = tokio::join!(
        wishlist_service::add_to_wishlist(&state, user.id, product_ids[1]),
        wishlist_service::add_to_wishlist(&state, user.id, product_ids[1]),
    );
    let first = first?;
    let second = second?;
    assert_eq!(first.id, second.id);
    assert_eq!(count_entries(&state, user.id, product_ids[1]).await?, 1);

    // Unknown product fails validation before any mutation.
    let invalid = wishlist_service::add_to_wishlist(&state, user.id, 999_999).await;
    assert!(matches!(
        invalid,
        Err(AppError::Validation { ref field, .. }) if field == "product_id"
    ));

    // Listing reflects the current set, newest first, products populated.
    wishlist_service::add_to_wishlist(&state, user.id, product_ids[2]).await?;
    let items = wishlist_service::list_wishlist(&state, user.id).await?;
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].product.id, product_ids[2]);
    for item in &items {
        assert!(!item.product.name.is_empty());
    }

    // Remove deletes exactly once; a second remove reports nothing deleted.
    assert!(wishlist_service::remove_from_wishlist(&state, user.id, product_ids[2]).await?);
    assert_eq!(wishlist_service::list_wishlist(&state, user.id).await?.len(), 2);
    assert!(!wishlist_service::remove_from_wishlist(&state, user.id, product_ids[2]).await?);

    // Wishlist activity leaves an audit trail.
    let add_audits = AuditLogs::find()
        .filter(audit_logs::Column::Action.eq("wishlist_add"))
        .count(&state.orm)
        .await?;
    assert!(add_audits >= 3);
    let remove_audits = AuditLogs::find()
        .filter(audit_logs::Column::Action.eq("wishlist_remove"))
        .count(&state.orm)
        .await?;
    assert_eq!(remove_audits, 1);

    // Register hands back a working token; login does too.
    let registered = auth_service::register_user(
        &state.pool,
        RegisterRequest {
            name: "Flow User".into(),
            email: "flow@example.com".into(),
            password: "password".into(),
        },
    )
    .await?;
    let token = registered.data.unwrap().token;
    assert!(!token.is_empty());

    let logged_in = auth_service::login_user(
        &state.pool,
        LoginRequest {
            email: "flow@example.com".into(),
            password: "password".into(),
        },
    )
    .await?;
    assert!(!logged_in.data.unwrap().token.is_empty());

    // The register token opens the wishlist endpoints over HTTP.
    let app = create_api_router().with_state(state.clone());
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/wishlist")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::OK);

    // Without a token every wishlist verb is a 401, payload or not.
    let response = app
        .clone()
        .oneshot(Request::builder().uri("/wishlist").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/wishlist")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(format!(
                    r#"{{"product_id":{}}}"#,
                    product_ids[0]
                )))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/wishlist/{}", product_ids[0]))
                .body(Body::empty())?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    // Clean tables between runs
    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE wishlists, audit_logs, products, users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState { pool, orm })
}

async fn count_entries(state: &AppState, user_id: i64, product_id: i64) -> anyhow::Result<u64> {
    let count = Wishlists::find()
        .filter(wishlists::Column::UserId.eq(user_id))
        .filter(wishlists::Column::ProductId.eq(product_id))
        .count(&state.orm)
        .await?;
    Ok(count)
}
