pub mod audit_logs;
pub mod products;
pub mod users;
pub mod wishlists;

pub use audit_logs::Entity as AuditLogs;
pub use products::Entity as Products;
pub use users::Entity as Users;
pub use wishlists::Entity as Wishlists;
