// Modules principaux
pub mod api;
pub mod core;
pub mod domain;
pub mod infrastructure;

// Ré-exports pour faciliter l'utilisation
pub use infrastructure::config::AppConfig;
pub use infrastructure::database::Database;
pub use infrastructure::error::{AppError, AppResult};
pub use infrastructure::storage::ImageStorage;

// Version de l'application
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = "Portfolio Backend";
