use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum_wishlist_api::{config::AppConfig, db::create_pool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    sqlx::migrate!("./migrations").run(&pool).await?;

    let user_id = ensure_user(&pool, "Demo User", "user@example.com", "user123").await?;
    seed_products(&pool).await?;

    println!("Seed completed. User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> anyhow::Result<i64> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let row: Option<(i64,)> = sqlx::query_as(
        r#"
        INSERT INTO users (name, email, password_hash)
        VALUES ($1, $2, $3)
        ON CONFLICT (email) DO NOTHING
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .fetch_optional(pool)
    .await?;

    // If user already exists, fetch id
    let user_id = match row {
        Some((id,)) => id,
        None => {
            let existing: (i64,) = sqlx::query_as("SELECT id FROM users WHERE email = $1")
                .bind(email)
                .fetch_one(pool)
                .await?;
            existing.0
        }
    };

    println!("Ensured user {email}");
    Ok(user_id)
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let products = vec![
        ("Axum Hoodie", "Warm hoodie for Rustaceans", 55.00),
        ("Ferris Mug", "Coffee tastes better with Ferris", 12.50),
        ("Rust Sticker Pack", "Decorate your laptop", 5.99),
        ("E-book: Async Rust", "Learn async Rust patterns", 25.00),
    ];

    for (name, desc, price) in products {
        sqlx::query(
            r#"
            INSERT INTO products (name, description, price)
            VALUES ($1, $2, $3)
            ON CONFLICT (name) DO NOTHING
            "#,
        )
        .bind(name)
        .bind(desc)
        .bind(price)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}
