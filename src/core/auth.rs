//! Authentification: hashage des mots de passe, émission et vérification
//! des jetons de session.
//!
//! Le jeton JWT transporte l'identité et le rôle; c'est lui qui constitue
//! la « session » lue par les prédicats d'accès.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::domain::user::{NewUser, Role, User};
use crate::infrastructure::config::BootstrapConfig;
use crate::infrastructure::database::UserRepository;
use crate::infrastructure::error::{unauthorized, AppResult};

/// Session de l'acteur authentifié, reconstruite à chaque requête depuis le
/// jeton porté par l'en-tête Authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Claims du jeton de session
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identifiant de l'utilisateur
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    /// Expiration (timestamp)
    pub exp: usize,
    /// Émission (timestamp)
    pub iat: usize,
}

/// Hash un mot de passe avec Argon2
pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2.hash_password(password.as_bytes(), &salt)?.to_string();
    Ok(hash)
}

/// Vérifie un mot de passe contre un hash stocké
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Émet un jeton de session pour un utilisateur
pub fn create_session_token(user: &User, secret: &str, ttl_hours: i64) -> AppResult<String> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(ttl_hours);

    let claims = SessionClaims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role,
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| crate::infrastructure::error::AppError::InternalError(format!(
        "Émission du jeton impossible: {}",
        e
    )))
}

/// Vérifie un jeton (signature et expiration) et reconstruit la session
pub fn verify_session_token(token: &str, secret: &str) -> AppResult<Session> {
    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| unauthorized("Jeton de session invalide ou expiré"))?;

    Ok(Session {
        user_id: data.claims.sub,
        email: data.claims.email,
        role: data.claims.role,
    })
}

/// Crée le premier compte superAdmin si la table des utilisateurs est vide.
///
/// Équivalent du parcours d'initialisation du back-office: sans compte,
/// aucune opération réservée ne serait jamais possible.
pub async fn bootstrap_super_admin(
    users: &UserRepository,
    bootstrap: &BootstrapConfig,
) -> AppResult<()> {
    if users.count().await? > 0 {
        return Ok(());
    }

    let first_user = NewUser {
        name: bootstrap.name.clone(),
        email: bootstrap.email.clone(),
        password: bootstrap.password.clone(),
        role: Role::SuperAdmin,
    };

    let user = users.create(&first_user).await?;
    info!(email = %user.email, "Compte superAdmin initial créé");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    const SECRET: &str = "secret-de-test-suffisamment-long-0123456789";

    fn sample_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Paul".to_string(),
            email: "paul@example.com".to_string(),
            password_hash: String::new(),
            created_at: Utc::now(),
            role,
        }
    }

    #[test]
    fn password_hash_and_verify() {
        let hash = hash_password("motdepasse123").unwrap();
        assert_ne!(hash, "motdepasse123");
        assert!(verify_password("motdepasse123", &hash));
        assert!(!verify_password("autre", &hash));
        assert!(!verify_password("motdepasse123", "pas-un-hash"));
    }

    #[test]
    fn session_token_round_trip() {
        let user = sample_user(Role::SuperAdmin);
        let token = create_session_token(&user, SECRET, 2).unwrap();

        let session = verify_session_token(&token, SECRET).unwrap();
        assert_eq!(session.user_id, user.id);
        assert_eq!(session.email, user.email);
        assert_eq!(session.role, Role::SuperAdmin);
    }

    #[test]
    fn token_with_wrong_secret_is_rejected() {
        let user = sample_user(Role::Admin);
        let token = create_session_token(&user, SECRET, 2).unwrap();

        assert!(verify_session_token(&token, "un-autre-secret").is_err());
        assert!(verify_session_token("pas.un.jeton", SECRET).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let user = sample_user(Role::Admin);
        // TTL négatif: le jeton est déjà expiré à l'émission
        let token = create_session_token(&user, SECRET, -1).unwrap();
        assert!(verify_session_token(&token, SECRET).is_err());
    }
}
