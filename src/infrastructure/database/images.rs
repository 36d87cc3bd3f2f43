use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::domain::image::{Image, ImageOwner, ImageUpdate, StoredFile};
use crate::infrastructure::error::{not_found, AppResult};

const IMAGE_COLUMNS: &str = "id, filename, extension, mime_type, filesize, order_index, \
                             exposition_id, section_travaux_id, section_about_id, about_id, created_at";

/// Repository pour les images de la galerie.
///
/// Le rattachement d'une image à son propriétaire passe exclusivement par
/// cette table: chaque écriture est un unique UPDATE, il n'existe donc pas
/// d'état intermédiaire où une relation ne serait renseignée que d'un côté.
#[derive(Clone)]
pub struct ImageRepository {
    pool: PgPool,
}

impl ImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Enregistre les métadonnées d'un fichier fraîchement stocké
    pub async fn create(
        &self,
        file: &StoredFile,
        order_index: Option<i32>,
        owner: Option<ImageOwner>,
    ) -> AppResult<Image> {
        let (exposition_id, section_travaux_id, section_about_id, about_id) =
            ImageOwner::to_columns(owner);

        let image = sqlx::query_as::<_, Image>(&format!(
            "INSERT INTO images (filename, extension, mime_type, filesize, order_index, \
                                 exposition_id, section_travaux_id, section_about_id, about_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(&file.filename)
        .bind(&file.extension)
        .bind(&file.mime_type)
        .bind(file.filesize)
        .bind(order_index)
        .bind(exposition_id)
        .bind(section_travaux_id)
        .bind(section_about_id)
        .bind(about_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(image)
    }

    pub async fn list(&self) -> AppResult<Vec<Image>> {
        let images = sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images \
             ORDER BY order_index ASC NULLS LAST, created_at ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Image> {
        let image = sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Image"))?;

        Ok(image)
    }

    /// Met à jour l'ordre d'affichage et/ou le rattachement d'une image.
    ///
    /// Les cinq colonnes concernées sont réécrites en un seul UPDATE.
    pub async fn update(&self, id: Uuid, update: &ImageUpdate) -> AppResult<Image> {
        update.validate()?;

        let image = self.get_by_id(id).await?;

        let order_index = update.order_index.or(image.order_index);
        let owner = match update.owner {
            Some(patch) => patch.into_owner(),
            None => image.owner,
        };
        let (exposition_id, section_travaux_id, section_about_id, about_id) =
            ImageOwner::to_columns(owner);

        let updated = sqlx::query_as::<_, Image>(&format!(
            "UPDATE images SET order_index = $2, exposition_id = $3, \
                               section_travaux_id = $4, section_about_id = $5, about_id = $6 \
             WHERE id = $1 \
             RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(id)
        .bind(order_index)
        .bind(exposition_id)
        .bind(section_travaux_id)
        .bind(section_about_id)
        .bind(about_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Supprime une image et retourne ses métadonnées (pour effacer le fichier)
    pub async fn delete(&self, id: Uuid) -> AppResult<Image> {
        let image = sqlx::query_as::<_, Image>(&format!(
            "DELETE FROM images WHERE id = $1 RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Image"))?;

        Ok(image)
    }

    /// Images d'une exposition, triées par ordre d'affichage
    pub async fn find_for_exposition(&self, exposition_id: Uuid) -> AppResult<Vec<Image>> {
        let images = sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE exposition_id = $1 \
             ORDER BY order_index ASC NULLS LAST, created_at ASC"
        ))
        .bind(exposition_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    pub async fn find_for_section_travaux(&self, section_id: Uuid) -> AppResult<Option<Image>> {
        self.find_single("section_travaux_id", section_id).await
    }

    pub async fn find_for_section_about(&self, section_id: Uuid) -> AppResult<Option<Image>> {
        self.find_single("section_about_id", section_id).await
    }

    pub async fn find_for_about(&self, about_id: Uuid) -> AppResult<Option<Image>> {
        self.find_single("about_id", about_id).await
    }

    async fn find_single(&self, column: &'static str, id: Uuid) -> AppResult<Option<Image>> {
        let image = sqlx::query_as::<_, Image>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE {column} = $1 \
             ORDER BY created_at ASC LIMIT 1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }
}
