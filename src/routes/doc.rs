use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest, TokenResponse},
        products::ProductList,
        wishlist::{AddToWishlistRequest, WishlistItem, WishlistList},
    },
    models::{Product, User, WishlistEntry},
    response::{ApiResponse, Meta},
    routes::{auth, health, params, products as product_routes, wishlist},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        product_routes::list_products,
        product_routes::get_product,
        wishlist::list_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist
    ),
    components(
        schemas(
            User,
            Product,
            WishlistEntry,
            WishlistItem,
            WishlistList,
            AddToWishlistRequest,
            ProductList,
            RegisterRequest,
            LoginRequest,
            TokenResponse,
            params::Pagination,
            Meta,
            ApiResponse<Product>,
            ApiResponse<ProductList>,
            ApiResponse<WishlistList>,
            ApiResponse<WishlistEntry>,
            ApiResponse<TokenResponse>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Products", description = "Product catalog endpoints"),
        (name = "Wishlist", description = "Per-user wishlist endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
