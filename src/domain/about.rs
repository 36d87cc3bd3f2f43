use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::image::Image;
use super::travaux::double_option;

/// Page à propos du site (entité quasi-singleton)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct About {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Page à propos avec son image d'en-tête et ses sections
#[derive(Debug, Clone, Serialize)]
pub struct AboutDetail {
    #[serde(flatten)]
    pub about: About,
    /// Première image de la page à propos
    pub image: Option<Image>,
    pub sections: Vec<SectionAboutDetail>,
}

/// Section visée de la page à propos
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionAboutKind {
    /// Biographie
    #[serde(rename = "bio")]
    Bio,
    /// Processus de création
    #[serde(rename = "process")]
    Process,
    /// Démarche artistique
    #[serde(rename = "démarcheArtistique")]
    DemarcheArtistique,
}

impl SectionAboutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionAboutKind::Bio => "bio",
            SectionAboutKind::Process => "process",
            SectionAboutKind::DemarcheArtistique => "démarcheArtistique",
        }
    }
}

impl fmt::Display for SectionAboutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("type de section inconnu: {0}")]
pub struct ParseSectionAboutKindError(String);

impl FromStr for SectionAboutKind {
    type Err = ParseSectionAboutKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bio" => Ok(SectionAboutKind::Bio),
            "process" => Ok(SectionAboutKind::Process),
            "démarcheArtistique" => Ok(SectionAboutKind::DemarcheArtistique),
            other => Err(ParseSectionAboutKindError(other.to_string())),
        }
    }
}

// Stocké en colonne TEXT, comme le rôle utilisateur.
impl sqlx::Type<sqlx::Postgres> for SectionAboutKind {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for SectionAboutKind {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode(self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for SectionAboutKind {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        s.parse().map_err(Into::into)
    }
}

/// Section de la page à propos
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SectionAbout {
    pub id: Uuid,
    /// Section visée (bio, process, démarche artistique)
    #[serde(rename = "type")]
    pub kind: SectionAboutKind,
    /// Contenu riche de la section
    pub content: Value,
    /// Page à propos à laquelle la section est rattachée
    pub about_id: Option<Uuid>,
}

/// Section de la page à propos avec son image éventuelle
#[derive(Debug, Clone, Serialize)]
pub struct SectionAboutDetail {
    #[serde(flatten)]
    pub section: SectionAbout,
    pub image: Option<Image>,
}

/// Données pour créer une section de la page à propos
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSectionAbout {
    /// Section visée
    #[serde(rename = "type")]
    pub kind: SectionAboutKind,

    pub content: Option<Value>,

    pub about_id: Option<Uuid>,
}

/// Données pour mettre à jour une section de la page à propos
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SectionAboutUpdate {
    #[serde(rename = "type")]
    pub kind: Option<SectionAboutKind>,

    pub content: Option<Value>,

    /// `Some(None)` détache la section de la page à propos
    #[serde(default, with = "double_option")]
    pub about_id: Option<Option<Uuid>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trip() {
        for kind in [
            SectionAboutKind::Bio,
            SectionAboutKind::Process,
            SectionAboutKind::DemarcheArtistique,
        ] {
            assert_eq!(kind.as_str().parse::<SectionAboutKind>().unwrap(), kind);
        }
        assert!("biographie".parse::<SectionAboutKind>().is_err());
    }

    #[test]
    fn unknown_kind_is_rejected_at_deserialization() {
        let result: Result<NewSectionAbout, _> =
            serde_json::from_str(r#"{"type": "autre"}"#);
        assert!(result.is_err());

        let section: NewSectionAbout =
            serde_json::from_str(r#"{"type": "démarcheArtistique"}"#).unwrap();
        assert_eq!(section.kind, SectionAboutKind::DemarcheArtistique);
    }
}
