use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Rôle d'un utilisateur du back-office
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Administrateur standard
    #[serde(rename = "admin")]
    Admin,
    /// Super administrateur (gestion des comptes et de la page à propos)
    #[serde(rename = "superAdmin")]
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::SuperAdmin => "superAdmin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("rôle inconnu: {0}")]
pub struct ParseRoleError(String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "superAdmin" => Ok(Role::SuperAdmin),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}

// Le rôle est stocké en colonne TEXT, pas en type énuméré Postgres.
impl sqlx::Type<sqlx::Postgres> for Role {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <&str as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <&str as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

impl<'q> sqlx::Encode<'q, sqlx::Postgres> for Role {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as sqlx::Encode<'q, sqlx::Postgres>>::encode(self.as_str(), buf)
    }
}

impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Role {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<'r, sqlx::Postgres>>::decode(value)?;
        s.parse().map_err(Into::into)
    }
}

/// Représente un utilisateur du back-office
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    /// Identifiant unique de l'utilisateur (UUID)
    pub id: Uuid,
    /// Nom complet de l'utilisateur
    pub name: String,
    /// Email de l'utilisateur (unique) - utilisé pour la connexion
    pub email: String,
    /// Hash du mot de passe (stocké sécurisé, jamais exposé dans les APIs)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Date de création du compte
    pub created_at: DateTime<Utc>,
    /// Rôle de l'utilisateur
    pub role: Role,
}

/// Données requises pour créer un nouvel utilisateur
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(length(min = 1, message = "Le nom est obligatoire"))]
    pub name: String,

    #[validate(email(message = "Format d'email invalide"))]
    pub email: String,

    #[validate(length(min = 8, message = "Le mot de passe doit contenir au moins 8 caractères"))]
    pub password: String,

    /// Rôle attribué au compte (admin par défaut)
    #[serde(default)]
    pub role: Role,
}

/// Données pour mettre à jour un utilisateur (tous les champs optionnels)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UserUpdate {
    #[validate(length(min = 1, message = "Le nom est obligatoire"))]
    pub name: Option<String>,

    #[validate(email(message = "Format d'email invalide"))]
    pub email: Option<String>,

    #[validate(length(min = 8, message = "Le mot de passe doit contenir au moins 8 caractères"))]
    pub password: Option<String>,

    pub role: Option<Role>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("superAdmin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert!("root".parse::<Role>().is_err());
        assert_eq!(Role::SuperAdmin.as_str(), "superAdmin");
    }

    #[test]
    fn role_serde_uses_camel_case() {
        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"superAdmin\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn new_user_requires_email_and_password() {
        let user = NewUser {
            name: "Paul".to_string(),
            email: "pas-un-email".to_string(),
            password: "court".to_string(),
            role: Role::default(),
        };
        let errors = user.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn default_role_is_admin() {
        let user: NewUser = serde_json::from_str(
            r#"{"name": "Paul", "email": "paul@example.com", "password": "motdepasse"}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Admin);
    }
}
