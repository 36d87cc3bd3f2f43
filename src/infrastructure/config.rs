use std::env;

use serde::Deserialize;
use tracing::warn;

use super::error::{AppError, AppResult};

/// Configuration complète de l'application, chargée une fois au démarrage
/// puis immuable pour la durée du processus.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub storage: StorageConfig,
    pub security: SecurityConfig,
    /// Compte superAdmin créé au premier démarrage si la table est vide
    pub bootstrap: Option<BootstrapConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Seule origine autorisée à interroger l'API (avec credentials)
    pub origin: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Répertoire local où sont écrites les images
    pub path: String,
    /// Route HTTP sous laquelle le répertoire est servi
    pub route: String,
    /// Base absolue utilisée pour générer les URLs publiques
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BootstrapConfig {
    pub name: String,
    pub email: String,
    pub password: String,
}

fn default_workers() -> usize {
    2
}

fn default_max_connections() -> u32 {
    5
}

fn default_session_ttl_hours() -> i64 {
    8
}

impl AppConfig {
    /// Charge la configuration depuis les fichiers et variables d'environnement.
    ///
    /// Ordre des sources: `config/base.toml`, puis `config/{RUN_MODE}.toml`,
    /// puis les variables `APP_*` (par exemple `APP_DATABASE__URL`).
    /// `DATABASE_URL` est également honorée directement.
    pub fn load() -> AppResult<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let settings = config::Config::builder()
            .add_source(config::File::with_name("config/base"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let mut cfg: AppConfig = settings.try_deserialize()?;

        if let Ok(url) = env::var("DATABASE_URL") {
            cfg.database.url = url;
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Valide les paramètres critiques. Une URL de base de données vide est
    /// un défaut de configuration: on refuse de démarrer plutôt que de
    /// laisser la connexion échouer plus loin.
    fn validate(&self) -> AppResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "DATABASE_URL manquante ou vide".to_string(),
            ));
        }

        if self.cors.origin.trim().is_empty() {
            return Err(AppError::ConfigurationError(
                "Origine CORS manquante (cors.origin)".to_string(),
            ));
        }

        if self.security.jwt_secret.is_empty() {
            return Err(AppError::ConfigurationError(
                "Secret JWT manquant (security.jwt_secret)".to_string(),
            ));
        }

        if self.security.jwt_secret.len() < 32 {
            warn!("JWT secret trop court (< 32 caractères) - risque de sécurité");
        }

        if self.server.port == 0 {
            return Err(AppError::ConfigurationError("Port invalide: 0".to_string()));
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                workers: 2,
            },
            database: DatabaseConfig {
                url: "postgres://localhost/portfolio".to_string(),
                max_connections: 5,
            },
            cors: CorsConfig {
                origin: "http://localhost:5173".to_string(),
            },
            storage: StorageConfig {
                path: "public/images".to_string(),
                route: "/images".to_string(),
                base_url: "http://localhost:3000".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: "un-secret-suffisamment-long-pour-les-tests".to_string(),
                session_ttl_hours: 8,
            },
            bootstrap: None,
        }
    }

    #[test]
    fn empty_database_url_fails_validation() {
        let mut cfg = sample();
        cfg.database.url = "".to_string();
        assert!(cfg.validate().is_err());

        cfg.database.url = "   ".to_string();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn valid_config_passes() {
        assert!(sample().validate().is_ok());
        assert_eq!(sample().bind_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn empty_cors_origin_fails_validation() {
        let mut cfg = sample();
        cfg.cors.origin = String::new();
        assert!(cfg.validate().is_err());
    }
}
