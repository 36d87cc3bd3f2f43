use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::domain::about::{About, NewSectionAbout, SectionAbout, SectionAboutUpdate};
use crate::domain::document;
use crate::infrastructure::error::{not_found, AppResult};

const SECTION_COLUMNS: &str = "id, kind, content, about_id";

/// Repository pour la page à propos
#[derive(Clone)]
pub struct AboutRepository {
    pool: PgPool,
}

impl AboutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self) -> AppResult<About> {
        let about = sqlx::query_as::<_, About>(
            "INSERT INTO about DEFAULT VALUES RETURNING id, created_at",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(about)
    }

    pub async fn list(&self) -> AppResult<Vec<About>> {
        let about = sqlx::query_as::<_, About>(
            "SELECT id, created_at FROM about ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(about)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<About> {
        let about = sqlx::query_as::<_, About>(
            "SELECT id, created_at FROM about WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Page à propos"))?;

        Ok(about)
    }

    /// Supprime la page; ses sections partent en cascade
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM about WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Page à propos"));
        }

        Ok(())
    }
}

/// Repository pour les sections de la page à propos
#[derive(Clone)]
pub struct SectionAboutRepository {
    pool: PgPool,
}

impl SectionAboutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_section: &NewSectionAbout) -> AppResult<SectionAbout> {
        new_section.validate()?;

        let content = match &new_section.content {
            Some(value) => {
                document::ensure_document(value)?;
                value.clone()
            }
            None => document::empty_document(),
        };

        let section = sqlx::query_as::<_, SectionAbout>(&format!(
            "INSERT INTO sections_about (kind, content, about_id) \
             VALUES ($1, $2, $3) \
             RETURNING {SECTION_COLUMNS}"
        ))
        .bind(new_section.kind)
        .bind(&content)
        .bind(new_section.about_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(section)
    }

    pub async fn list(&self) -> AppResult<Vec<SectionAbout>> {
        let sections = sqlx::query_as::<_, SectionAbout>(&format!(
            "SELECT {SECTION_COLUMNS} FROM sections_about ORDER BY kind"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<SectionAbout> {
        let section = sqlx::query_as::<_, SectionAbout>(&format!(
            "SELECT {SECTION_COLUMNS} FROM sections_about WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Section"))?;

        Ok(section)
    }

    pub async fn list_by_about(&self, about_id: Uuid) -> AppResult<Vec<SectionAbout>> {
        let sections = sqlx::query_as::<_, SectionAbout>(&format!(
            "SELECT {SECTION_COLUMNS} FROM sections_about WHERE about_id = $1 ORDER BY kind"
        ))
        .bind(about_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    pub async fn update(&self, id: Uuid, update: &SectionAboutUpdate) -> AppResult<SectionAbout> {
        update.validate()?;

        let mut section = self.get_by_id(id).await?;

        if let Some(kind) = update.kind {
            section.kind = kind;
        }
        if let Some(content) = &update.content {
            document::ensure_document(content)?;
            section.content = content.clone();
        }
        if let Some(about_id) = update.about_id {
            section.about_id = about_id;
        }

        let updated = sqlx::query_as::<_, SectionAbout>(&format!(
            "UPDATE sections_about SET kind = $2, content = $3, about_id = $4 \
             WHERE id = $1 \
             RETURNING {SECTION_COLUMNS}"
        ))
        .bind(id)
        .bind(section.kind)
        .bind(&section.content)
        .bind(section.about_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sections_about WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Section"));
        }

        Ok(())
    }
}
