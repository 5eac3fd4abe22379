/// Business logic services
pub mod accounts;
pub mod auth;
pub mod catalog;
pub mod links;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use links::Links;
