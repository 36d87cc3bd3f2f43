use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use sqlx::Error as SqlxError;
use validator::ValidationErrors;

use crate::domain::document::DocumentError;

/// Type de résultat standard pour l'application
pub type AppResult<T> = Result<T, AppError>;

/// Erreurs principales de l'application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Erreur d'authentification (401 Unauthorized)
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Permissions insuffisantes (403 Forbidden)
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Ressource non trouvée (404 Not Found)
    #[error("{0} not found")]
    NotFound(String),

    /// Conflit de ressources (409 Conflict)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Données invalides (422 Unprocessable Entity)
    #[error("Validation failed: {0}")]
    ValidationError(ValidationErrors),

    /// Requête mal formée (400 Bad Request)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Type de média non supporté (415 Unsupported Media Type)
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Payload trop lourd (413 Payload Too Large)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Erreur interne du serveur (500 Internal Server Error)
    #[error("Internal server error: {0}")]
    InternalError(String),

    /// Erreur de base de données (500 Internal Server Error)
    #[error("Database error: {0}")]
    DatabaseError(#[source] SqlxError),

    /// Erreur d'infrastructure (stockage, système de fichiers) (500)
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),

    /// Erreur de configuration (500 Internal Server Error)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AppError {
    /// Convertit l'erreur en code HTTP approprié
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::InternalError(_)
            | AppError::DatabaseError(_)
            | AppError::InfrastructureError(_)
            | AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message destiné au client (les détails techniques restent dans les logs)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized(_) => {
                "Authentification requise. Veuillez vous connecter.".to_string()
            }
            AppError::Forbidden(_) => {
                "Vous n'avez pas les permissions nécessaires pour cette action.".to_string()
            }
            AppError::NotFound(resource) => format!("{} non trouvé", resource),
            AppError::Conflict(message) => message.clone(),
            AppError::ValidationError(errors) => {
                let mut messages = Vec::new();
                for field_errors in errors.field_errors().values() {
                    for error in field_errors.iter() {
                        if let Some(msg) = error.message.as_ref() {
                            messages.push(msg.to_string());
                        }
                    }
                }
                if messages.is_empty() {
                    "Données invalides. Veuillez vérifier le format des champs.".to_string()
                } else {
                    messages.join("; ")
                }
            }
            AppError::BadRequest(message) => message.clone(),
            AppError::UnsupportedMediaType(_) => {
                "Type de fichier non supporté. Formats acceptés: jpg, png, gif, webp.".to_string()
            }
            AppError::PayloadTooLarge(message) => message.clone(),
            AppError::InternalError(_)
            | AppError::DatabaseError(_)
            | AppError::InfrastructureError(_)
            | AppError::ConfigurationError(_) => {
                "Une erreur interne est survenue.".to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.status().is_server_error() {
            tracing::error!(error = %self, "erreur serveur");
        }
        HttpResponse::build(self.status()).json(ErrorResponse {
            error: self.user_message(),
            code: self.status().as_u16(),
        })
    }
}

/// Structure de réponse d'erreur standardisée
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: u16,
}

// Implémentations From pour les conversions automatiques

impl From<SqlxError> for AppError {
    fn from(error: SqlxError) -> Self {
        // Spécialiser certains types d'erreurs SQL
        match &error {
            SqlxError::RowNotFound => AppError::NotFound("Ressource".to_string()),
            SqlxError::Database(db_error) => match db_error.code().as_deref() {
                // violation d'unicité
                Some("23505") => AppError::Conflict("Cette ressource existe déjà".to_string()),
                // violation de clé étrangère
                Some("23503") => {
                    AppError::BadRequest("La ressource référencée n'existe pas".to_string())
                }
                // violation de contrainte CHECK
                Some("23514") => {
                    AppError::BadRequest("Valeur hors du domaine autorisé".to_string())
                }
                _ => AppError::DatabaseError(error),
            },
            _ => AppError::DatabaseError(error),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

impl From<DocumentError> for AppError {
    fn from(error: DocumentError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        AppError::InfrastructureError(format!("IO error: {}", error))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(error: config::ConfigError) -> Self {
        AppError::ConfigurationError(error.to_string())
    }
}

impl From<argon2::password_hash::Error> for AppError {
    fn from(error: argon2::password_hash::Error) -> Self {
        AppError::InternalError(format!("Erreur de hashage: {}", error))
    }
}

// Helper functions pour créer des erreurs courantes

pub fn not_found<T: Into<String>>(resource: T) -> AppError {
    AppError::NotFound(resource.into())
}

pub fn unauthorized<T: Into<String>>(message: T) -> AppError {
    AppError::Unauthorized(message.into())
}

pub fn forbidden<T: Into<String>>(message: T) -> AppError {
    AppError::Forbidden(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_variants() {
        assert_eq!(unauthorized("x").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden("x").status(), StatusCode::FORBIDDEN);
        assert_eq!(not_found("Texte").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::Conflict("Email déjà utilisé".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let error: AppError = SqlxError::RowNotFound.into();
        assert_eq!(error.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_surface_field_messages() {
        use validator::Validate;

        #[derive(Validate)]
        struct Probe {
            #[validate(length(min = 1, message = "Le titre est obligatoire"))]
            title: String,
        }

        let errors = Probe { title: String::new() }.validate().unwrap_err();
        let error: AppError = errors.into();
        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(error.user_message().contains("Le titre est obligatoire"));
    }
}
