use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;
use validator::Validate;

/// Rattachement d'une image à son propriétaire.
///
/// Une image est liée à au plus UN des quatre parents possibles. Le schéma
/// conserve quatre clés étrangères nullables (avec une contrainte CHECK qui
/// interdit d'en renseigner plus d'une), mais le domaine n'expose qu'une
/// seule variante taguée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum ImageOwner {
    Exposition(Uuid),
    SectionTravaux(Uuid),
    SectionAbout(Uuid),
    About(Uuid),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("L'image est rattachée à plusieurs propriétaires à la fois")]
pub struct MultipleOwners;

impl ImageOwner {
    /// Colonne de la table `images` portant ce rattachement.
    pub fn column(&self) -> &'static str {
        match self {
            ImageOwner::Exposition(_) => "exposition_id",
            ImageOwner::SectionTravaux(_) => "section_travaux_id",
            ImageOwner::SectionAbout(_) => "section_about_id",
            ImageOwner::About(_) => "about_id",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            ImageOwner::Exposition(id)
            | ImageOwner::SectionTravaux(id)
            | ImageOwner::SectionAbout(id)
            | ImageOwner::About(id) => *id,
        }
    }

    /// Reconstruit le rattachement depuis les quatre colonnes nullables.
    ///
    /// Invariant: au plus un propriétaire. Une ligne qui en porte plusieurs
    /// (la contrainte CHECK a été contournée) est rejetée.
    pub fn from_columns(
        exposition_id: Option<Uuid>,
        section_travaux_id: Option<Uuid>,
        section_about_id: Option<Uuid>,
        about_id: Option<Uuid>,
    ) -> Result<Option<Self>, MultipleOwners> {
        let owners = [
            exposition_id.map(ImageOwner::Exposition),
            section_travaux_id.map(ImageOwner::SectionTravaux),
            section_about_id.map(ImageOwner::SectionAbout),
            about_id.map(ImageOwner::About),
        ];

        let mut found = None;
        for owner in owners.into_iter().flatten() {
            if found.is_some() {
                return Err(MultipleOwners);
            }
            found = Some(owner);
        }
        Ok(found)
    }

    /// Éclate un rattachement optionnel en valeurs pour les quatre colonnes.
    pub fn to_columns(
        owner: Option<ImageOwner>,
    ) -> (Option<Uuid>, Option<Uuid>, Option<Uuid>, Option<Uuid>) {
        match owner {
            Some(ImageOwner::Exposition(id)) => (Some(id), None, None, None),
            Some(ImageOwner::SectionTravaux(id)) => (None, Some(id), None, None),
            Some(ImageOwner::SectionAbout(id)) => (None, None, Some(id), None),
            Some(ImageOwner::About(id)) => (None, None, None, Some(id)),
            None => (None, None, None, None),
        }
    }
}

/// Image téléversée dans la galerie
#[derive(Debug, Clone, Serialize)]
pub struct Image {
    pub id: Uuid,
    /// Nom du fichier stocké (UUID + extension)
    pub filename: String,
    /// Extension du fichier (jpg, png, gif, webp)
    pub extension: String,
    /// Type MIME détecté à l'upload
    pub mime_type: String,
    /// Taille du fichier en octets
    pub filesize: i64,
    /// Ordre d'affichage dans le carrousel (>= 1 si renseigné)
    #[serde(rename = "order")]
    pub order_index: Option<i32>,
    /// Propriétaire de l'image, au plus un
    pub owner: Option<ImageOwner>,
    pub created_at: DateTime<Utc>,
}

impl FromRow<'_, PgRow> for Image {
    fn from_row(row: &PgRow) -> Result<Self, sqlx::Error> {
        let owner = ImageOwner::from_columns(
            row.try_get("exposition_id")?,
            row.try_get("section_travaux_id")?,
            row.try_get("section_about_id")?,
            row.try_get("about_id")?,
        )
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: "exposition_id".to_string(),
            source: Box::new(e),
        })?;

        Ok(Image {
            id: row.try_get("id")?,
            filename: row.try_get("filename")?,
            extension: row.try_get("extension")?,
            mime_type: row.try_get("mime_type")?,
            filesize: row.try_get("filesize")?,
            order_index: row.try_get("order_index")?,
            owner,
            created_at: row.try_get("created_at")?,
        })
    }
}

/// Métadonnées d'un fichier écrit par le service de stockage
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub filename: String,
    pub extension: String,
    pub mime_type: String,
    pub filesize: i64,
}

/// Modification du rattachement d'une image.
///
/// `none` détache l'image de son propriétaire actuel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum ImageOwnerPatch {
    Exposition(Uuid),
    SectionTravaux(Uuid),
    SectionAbout(Uuid),
    About(Uuid),
    None,
}

impl ImageOwnerPatch {
    pub fn into_owner(self) -> Option<ImageOwner> {
        match self {
            ImageOwnerPatch::Exposition(id) => Some(ImageOwner::Exposition(id)),
            ImageOwnerPatch::SectionTravaux(id) => Some(ImageOwner::SectionTravaux(id)),
            ImageOwnerPatch::SectionAbout(id) => Some(ImageOwner::SectionAbout(id)),
            ImageOwnerPatch::About(id) => Some(ImageOwner::About(id)),
            ImageOwnerPatch::None => None,
        }
    }
}

/// Données pour mettre à jour une image
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ImageUpdate {
    /// Ordre d'affichage de l'image dans le carrousel
    #[serde(rename = "order")]
    #[validate(range(min = 1, message = "L'ordre d'affichage doit être supérieur ou égal à 1"))]
    pub order_index: Option<i32>,

    pub owner: Option<ImageOwnerPatch>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_most_one_owner() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert_eq!(ImageOwner::from_columns(None, None, None, None), Ok(None));
        assert_eq!(
            ImageOwner::from_columns(Some(a), None, None, None),
            Ok(Some(ImageOwner::Exposition(a)))
        );
        assert_eq!(
            ImageOwner::from_columns(None, None, None, Some(b)),
            Ok(Some(ImageOwner::About(b)))
        );
        assert_eq!(
            ImageOwner::from_columns(Some(a), Some(b), None, None),
            Err(MultipleOwners)
        );
        assert_eq!(
            ImageOwner::from_columns(None, Some(a), None, Some(b)),
            Err(MultipleOwners)
        );
    }

    #[test]
    fn owner_columns_round_trip() {
        let id = Uuid::new_v4();
        for owner in [
            ImageOwner::Exposition(id),
            ImageOwner::SectionTravaux(id),
            ImageOwner::SectionAbout(id),
            ImageOwner::About(id),
        ] {
            let (e, st, sa, ab) = ImageOwner::to_columns(Some(owner));
            assert_eq!(ImageOwner::from_columns(e, st, sa, ab), Ok(Some(owner)));
        }
        assert_eq!(
            ImageOwner::to_columns(None),
            (None, None, None, None)
        );
    }

    #[test]
    fn owner_serde_is_tagged() {
        let id = Uuid::new_v4();
        let json = serde_json::to_value(ImageOwner::SectionTravaux(id)).unwrap();
        assert_eq!(json["type"], "sectionTravaux");
        assert_eq!(json["id"], serde_json::json!(id));

        let patch: ImageOwnerPatch = serde_json::from_str(r#"{"type": "none"}"#).unwrap();
        assert_eq!(patch.into_owner(), None);
    }

    #[test]
    fn order_zero_is_rejected() {
        let update = ImageUpdate {
            order_index: Some(0),
            owner: None,
        };
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("order_index"));

        let update = ImageUpdate {
            order_index: Some(1),
            owner: None,
        };
        assert!(update.validate().is_ok());
    }
}
