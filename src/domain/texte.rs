use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Texte libre du site (page éditoriale)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Texte {
    pub id: Uuid,
    /// Titre
    pub title: String,
    /// Sous-titre
    pub subtitle: String,
    /// Contenu riche (document de l'éditeur)
    pub content: Value,
}

/// Données pour créer un texte
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTexte {
    #[validate(length(min = 1, message = "Le titre est obligatoire"))]
    pub title: String,

    #[validate(length(min = 1, message = "Le sous-titre est obligatoire"))]
    pub subtitle: String,

    pub content: Option<Value>,
}

/// Données pour mettre à jour un texte
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TexteUpdate {
    #[validate(length(min = 1, message = "Le titre est obligatoire"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Le sous-titre est obligatoire"))]
    pub subtitle: Option<String>,

    pub content: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_are_required() {
        let texte = NewTexte {
            title: String::new(),
            subtitle: String::new(),
            content: None,
        };
        let errors = texte.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("subtitle"));
    }
}
