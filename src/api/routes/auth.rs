use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::CurrentSession;
use crate::core::auth::create_session_token;
use crate::domain::user::{Role, User};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::database::{Database, UserRepository};
use crate::infrastructure::error::AppResult;

/// Requête pour la connexion
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Format d'email invalide"))]
    pub email: String,
    pub password: String,
}

/// Réponse d'authentification réussie
#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Profil public de l'utilisateur (exclut le hash du mot de passe)
#[derive(Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Endpoint de connexion (email/mot de passe)
#[post("/auth/login")]
pub async fn login(
    credentials: web::Json<LoginRequest>,
    db: web::Data<Database>,
    config: web::Data<AppConfig>,
) -> AppResult<HttpResponse> {
    credentials.validate()?;

    let users = UserRepository::new(db.pool.clone());
    let user = users
        .authenticate(&credentials.email, &credentials.password)
        .await?;

    let ttl_hours = config.security.session_ttl_hours;
    let access_token = create_session_token(&user, &config.security.jwt_secret, ttl_hours)?;

    let response = AuthResponse {
        user: user.into(),
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: ttl_hours * 3600,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// Profil de la session courante
#[get("/auth/me")]
pub async fn me(
    session: CurrentSession,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    let users = UserRepository::new(db.pool.clone());
    let user = users.get_by_id(session.0.user_id).await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
