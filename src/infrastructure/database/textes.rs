use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::domain::document;
use crate::domain::texte::{NewTexte, Texte, TexteUpdate};
use crate::infrastructure::error::{not_found, AppResult};

/// Repository pour les textes libres du site
#[derive(Clone)]
pub struct TexteRepository {
    pool: PgPool,
}

impl TexteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_texte: &NewTexte) -> AppResult<Texte> {
        new_texte.validate()?;

        let content = match &new_texte.content {
            Some(value) => {
                document::ensure_document(value)?;
                value.clone()
            }
            None => document::empty_document(),
        };

        let texte = sqlx::query_as::<_, Texte>(
            "INSERT INTO textes (title, subtitle, content) \
             VALUES ($1, $2, $3) \
             RETURNING id, title, subtitle, content",
        )
        .bind(&new_texte.title)
        .bind(&new_texte.subtitle)
        .bind(&content)
        .fetch_one(&self.pool)
        .await?;

        Ok(texte)
    }

    pub async fn list(&self) -> AppResult<Vec<Texte>> {
        let textes = sqlx::query_as::<_, Texte>(
            "SELECT id, title, subtitle, content FROM textes ORDER BY title",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(textes)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Texte> {
        let texte = sqlx::query_as::<_, Texte>(
            "SELECT id, title, subtitle, content FROM textes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Texte"))?;

        Ok(texte)
    }

    pub async fn update(&self, id: Uuid, update: &TexteUpdate) -> AppResult<Texte> {
        update.validate()?;

        let mut texte = self.get_by_id(id).await?;

        if let Some(title) = &update.title {
            texte.title = title.clone();
        }
        if let Some(subtitle) = &update.subtitle {
            texte.subtitle = subtitle.clone();
        }
        if let Some(content) = &update.content {
            document::ensure_document(content)?;
            texte.content = content.clone();
        }

        let updated = sqlx::query_as::<_, Texte>(
            "UPDATE textes SET title = $2, subtitle = $3, content = $4 \
             WHERE id = $1 \
             RETURNING id, title, subtitle, content",
        )
        .bind(id)
        .bind(&texte.title)
        .bind(&texte.subtitle)
        .bind(&texte.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM textes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Texte"));
        }

        Ok(())
    }
}
