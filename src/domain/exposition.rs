use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::image::Image;

/// Exposition de la galerie
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Exposition {
    pub id: Uuid,
    /// Titre
    pub title: String,
    /// Sous-titre
    pub subtitle: String,
    /// Contenu riche de la page exposition
    pub content: Value,
    /// Date de création, figée après la création
    pub created_at: DateTime<Utc>,
}

/// Exposition accompagnée de ses images, triées par ordre d'affichage
#[derive(Debug, Clone, Serialize)]
pub struct ExpositionDetail {
    #[serde(flatten)]
    pub exposition: Exposition,
    pub images: Vec<Image>,
}

/// Données pour créer une exposition
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewExposition {
    #[validate(length(min = 1, message = "Le titre est obligatoire"))]
    pub title: String,

    #[validate(length(min = 1, message = "Le sous-titre est obligatoire"))]
    pub subtitle: String,

    pub content: Option<Value>,
}

/// Données pour mettre à jour une exposition.
///
/// `created_at` n'apparaît volontairement pas : la date de création ne se
/// modifie jamais après coup.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ExpositionUpdate {
    #[validate(length(min = 1, message = "Le titre est obligatoire"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Le sous-titre est obligatoire"))]
    pub subtitle: Option<String>,

    pub content: Option<Value>,
}
