use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::domain::document;
use crate::domain::exposition::{Exposition, ExpositionUpdate, NewExposition};
use crate::infrastructure::error::{not_found, AppResult};

const EXPOSITION_COLUMNS: &str = "id, title, subtitle, content, created_at";

/// Repository pour les expositions
#[derive(Clone)]
pub struct ExpositionRepository {
    pool: PgPool,
}

impl ExpositionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_exposition: &NewExposition) -> AppResult<Exposition> {
        new_exposition.validate()?;

        let content = match &new_exposition.content {
            Some(value) => {
                document::ensure_document(value)?;
                value.clone()
            }
            None => document::empty_document(),
        };

        let exposition = sqlx::query_as::<_, Exposition>(&format!(
            "INSERT INTO expositions (title, subtitle, content) \
             VALUES ($1, $2, $3) \
             RETURNING {EXPOSITION_COLUMNS}"
        ))
        .bind(&new_exposition.title)
        .bind(&new_exposition.subtitle)
        .bind(&content)
        .fetch_one(&self.pool)
        .await?;

        Ok(exposition)
    }

    /// Liste les expositions, les plus récentes en premier
    pub async fn list(&self) -> AppResult<Vec<Exposition>> {
        let expositions = sqlx::query_as::<_, Exposition>(&format!(
            "SELECT {EXPOSITION_COLUMNS} FROM expositions ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(expositions)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Exposition> {
        let exposition = sqlx::query_as::<_, Exposition>(&format!(
            "SELECT {EXPOSITION_COLUMNS} FROM expositions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Exposition"))?;

        Ok(exposition)
    }

    /// Met à jour une exposition. `created_at` n'est jamais réécrit.
    pub async fn update(&self, id: Uuid, update: &ExpositionUpdate) -> AppResult<Exposition> {
        update.validate()?;

        let mut exposition = self.get_by_id(id).await?;

        if let Some(title) = &update.title {
            exposition.title = title.clone();
        }
        if let Some(subtitle) = &update.subtitle {
            exposition.subtitle = subtitle.clone();
        }
        if let Some(content) = &update.content {
            document::ensure_document(content)?;
            exposition.content = content.clone();
        }

        let updated = sqlx::query_as::<_, Exposition>(&format!(
            "UPDATE expositions SET title = $2, subtitle = $3, content = $4 \
             WHERE id = $1 \
             RETURNING {EXPOSITION_COLUMNS}"
        ))
        .bind(id)
        .bind(&exposition.title)
        .bind(&exposition.subtitle)
        .bind(&exposition.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM expositions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Exposition"));
        }

        Ok(())
    }
}
