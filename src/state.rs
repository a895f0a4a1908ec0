use crate::db::{DbPool, OrmConn};

/// Shared handles cloned into every handler. The wishlist and auth services
/// run raw sqlx queries against `pool`; the product catalog goes through
/// SeaORM via `orm`.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
}
