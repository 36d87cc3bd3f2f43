pub mod about;
pub mod expositions;
pub mod images;
pub mod textes;
pub mod travaux;
pub mod users;

pub use about::{AboutRepository, SectionAboutRepository};
pub use expositions::ExpositionRepository;
pub use images::ImageRepository;
pub use textes::TexteRepository;
pub use travaux::{SectionTravauxRepository, TravauxRepository};
pub use users::UserRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use super::error::AppResult;

/// Gestion de la connexion à la base de données
#[derive(Debug, Clone)]
pub struct Database {
    pub pool: PgPool,
}

impl Database {
    /// Ouvre le pool de connexions PostgreSQL
    pub async fn new(database_url: &str, max_connections: u32) -> AppResult<Self> {
        info!("Connexion à la base de données PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        info!("Connexion établie");
        Ok(Self { pool })
    }

    /// Applique les migrations embarquées dans le binaire
    pub async fn migrate(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                super::error::AppError::InfrastructureError(format!("Migration échouée: {}", e))
            })?;
        info!("Migrations appliquées");
        Ok(())
    }
}
