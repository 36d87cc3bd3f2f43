use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::image::Image;

/// Travail présenté sur le site
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Travaux {
    pub id: Uuid,
    /// Titre
    pub title: String,
    /// Sous-titre
    pub subtitle: String,
    /// Date de création, figée après la création
    pub created_at: DateTime<Utc>,
}

/// Section d'un travail (quatre emplacements numérotés sur la page)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SectionTravaux {
    pub id: Uuid,
    /// Contenu riche de la section
    pub content: Value,
    /// Emplacement de la section sur la page (1 à 4)
    pub section: i16,
    /// Travail auquel la section est rattachée
    pub travaux_id: Option<Uuid>,
}

/// Section d'un travail avec son image éventuelle
#[derive(Debug, Clone, Serialize)]
pub struct SectionTravauxDetail {
    #[serde(flatten)]
    pub section: SectionTravaux,
    pub image: Option<Image>,
}

/// Travail accompagné de ses sections
#[derive(Debug, Clone, Serialize)]
pub struct TravauxDetail {
    #[serde(flatten)]
    pub travaux: Travaux,
    pub sections: Vec<SectionTravauxDetail>,
}

/// Données pour créer un travail
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewTravaux {
    #[validate(length(min = 1, message = "Le titre est obligatoire"))]
    pub title: String,

    #[validate(length(min = 1, message = "Le sous-titre est obligatoire"))]
    pub subtitle: String,
}

/// Données pour mettre à jour un travail
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TravauxUpdate {
    #[validate(length(min = 1, message = "Le titre est obligatoire"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Le sous-titre est obligatoire"))]
    pub subtitle: Option<String>,
}

/// Données pour créer une section de travail
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSectionTravaux {
    pub content: Option<Value>,

    /// Emplacement visé, entre 1 et 4
    #[validate(range(min = 1, max = 4, message = "La section doit être comprise entre 1 et 4"))]
    pub section: i16,

    pub travaux_id: Option<Uuid>,
}

/// Données pour mettre à jour une section de travail
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SectionTravauxUpdate {
    pub content: Option<Value>,

    #[validate(range(min = 1, max = 4, message = "La section doit être comprise entre 1 et 4"))]
    pub section: Option<i16>,

    /// `Some(None)` détache la section de son travail
    #[serde(default, with = "double_option")]
    pub travaux_id: Option<Option<Uuid>>,
}

/// Distingue un champ absent (`None`) d'un champ explicitement nul
/// (`Some(None)`) dans les mises à jour partielles.
pub(crate) mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_outside_range_is_rejected() {
        for bad in [0i16, 5, -1] {
            let section = NewSectionTravaux {
                content: None,
                section: bad,
                travaux_id: None,
            };
            assert!(section.validate().is_err(), "section {bad} devrait être rejetée");
        }
        for good in 1i16..=4 {
            let section = NewSectionTravaux {
                content: None,
                section: good,
                travaux_id: None,
            };
            assert!(section.validate().is_ok());
        }
    }

    #[test]
    fn update_distinguishes_absent_from_null() {
        let update: SectionTravauxUpdate = serde_json::from_str(r#"{"section": 2}"#).unwrap();
        assert_eq!(update.travaux_id, None);

        let update: SectionTravauxUpdate =
            serde_json::from_str(r#"{"travaux_id": null}"#).unwrap();
        assert_eq!(update.travaux_id, Some(None));
    }
}
