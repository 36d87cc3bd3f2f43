use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::domain::document;
use crate::domain::travaux::{
    NewSectionTravaux, NewTravaux, SectionTravaux, SectionTravauxUpdate, Travaux, TravauxUpdate,
};
use crate::infrastructure::error::{not_found, AppResult};

const TRAVAUX_COLUMNS: &str = "id, title, subtitle, created_at";
const SECTION_COLUMNS: &str = "id, content, section, travaux_id";

/// Repository pour les travaux
#[derive(Clone)]
pub struct TravauxRepository {
    pool: PgPool,
}

impl TravauxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_travaux: &NewTravaux) -> AppResult<Travaux> {
        new_travaux.validate()?;

        let travaux = sqlx::query_as::<_, Travaux>(&format!(
            "INSERT INTO travaux (title, subtitle) VALUES ($1, $2) RETURNING {TRAVAUX_COLUMNS}"
        ))
        .bind(&new_travaux.title)
        .bind(&new_travaux.subtitle)
        .fetch_one(&self.pool)
        .await?;

        Ok(travaux)
    }

    pub async fn list(&self) -> AppResult<Vec<Travaux>> {
        let travaux = sqlx::query_as::<_, Travaux>(&format!(
            "SELECT {TRAVAUX_COLUMNS} FROM travaux ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(travaux)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Travaux> {
        let travaux = sqlx::query_as::<_, Travaux>(&format!(
            "SELECT {TRAVAUX_COLUMNS} FROM travaux WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Travail"))?;

        Ok(travaux)
    }

    /// Met à jour un travail. `created_at` n'est jamais réécrit.
    pub async fn update(&self, id: Uuid, update: &TravauxUpdate) -> AppResult<Travaux> {
        update.validate()?;

        let mut travaux = self.get_by_id(id).await?;

        if let Some(title) = &update.title {
            travaux.title = title.clone();
        }
        if let Some(subtitle) = &update.subtitle {
            travaux.subtitle = subtitle.clone();
        }

        let updated = sqlx::query_as::<_, Travaux>(&format!(
            "UPDATE travaux SET title = $2, subtitle = $3 WHERE id = $1 \
             RETURNING {TRAVAUX_COLUMNS}"
        ))
        .bind(id)
        .bind(&travaux.title)
        .bind(&travaux.subtitle)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Supprime un travail; ses sections partent en cascade
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM travaux WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Travail"));
        }

        Ok(())
    }
}

/// Repository pour les sections d'un travail
#[derive(Clone)]
pub struct SectionTravauxRepository {
    pool: PgPool,
}

impl SectionTravauxRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_section: &NewSectionTravaux) -> AppResult<SectionTravaux> {
        new_section.validate()?;

        let content = match &new_section.content {
            Some(value) => {
                document::ensure_document(value)?;
                value.clone()
            }
            None => document::empty_document(),
        };

        let section = sqlx::query_as::<_, SectionTravaux>(&format!(
            "INSERT INTO sections_travaux (content, section, travaux_id) \
             VALUES ($1, $2, $3) \
             RETURNING {SECTION_COLUMNS}"
        ))
        .bind(&content)
        .bind(new_section.section)
        .bind(new_section.travaux_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(section)
    }

    pub async fn list(&self) -> AppResult<Vec<SectionTravaux>> {
        let sections = sqlx::query_as::<_, SectionTravaux>(&format!(
            "SELECT {SECTION_COLUMNS} FROM sections_travaux ORDER BY section"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<SectionTravaux> {
        let section = sqlx::query_as::<_, SectionTravaux>(&format!(
            "SELECT {SECTION_COLUMNS} FROM sections_travaux WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| not_found("Section"))?;

        Ok(section)
    }

    /// Sections d'un travail, dans l'ordre des emplacements
    pub async fn list_by_travaux(&self, travaux_id: Uuid) -> AppResult<Vec<SectionTravaux>> {
        let sections = sqlx::query_as::<_, SectionTravaux>(&format!(
            "SELECT {SECTION_COLUMNS} FROM sections_travaux WHERE travaux_id = $1 \
             ORDER BY section"
        ))
        .bind(travaux_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    pub async fn update(&self, id: Uuid, update: &SectionTravauxUpdate) -> AppResult<SectionTravaux> {
        update.validate()?;

        let mut section = self.get_by_id(id).await?;

        if let Some(content) = &update.content {
            document::ensure_document(content)?;
            section.content = content.clone();
        }
        if let Some(number) = update.section {
            section.section = number;
        }
        if let Some(travaux_id) = update.travaux_id {
            section.travaux_id = travaux_id;
        }

        let updated = sqlx::query_as::<_, SectionTravaux>(&format!(
            "UPDATE sections_travaux SET content = $2, section = $3, travaux_id = $4 \
             WHERE id = $1 \
             RETURNING {SECTION_COLUMNS}"
        ))
        .bind(id)
        .bind(&section.content)
        .bind(section.section)
        .bind(section.travaux_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM sections_travaux WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found("Section"));
        }

        Ok(())
    }
}
