//! Extracteurs de session.
//!
//! `CurrentSession` exige un jeton valide (401 sinon); `MaybeSession`
//! accepte les requêtes anonymes et tolère un jeton invalide, qui est
//! simplement ignoré comme chez un visiteur non connecté.

use std::future::{ready, Ready};

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use tracing::debug;

use crate::core::auth::{verify_session_token, Session};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::error::{unauthorized, AppError};

fn session_from_request(req: &HttpRequest) -> Option<Session> {
    let config = req.app_data::<web::Data<AppConfig>>()?;

    let header = req.headers().get("Authorization")?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;

    match verify_session_token(token, &config.security.jwt_secret) {
        Ok(session) => Some(session),
        Err(e) => {
            debug!(error = %e, "Jeton de session ignoré");
            None
        }
    }
}

/// Session obligatoire
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl FromRequest for CurrentSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            session_from_request(req)
                .map(CurrentSession)
                .ok_or_else(|| unauthorized("Authentification requise")),
        )
    }
}

/// Session optionnelle (routes ouvertes aux visiteurs anonymes)
#[derive(Debug, Clone)]
pub struct MaybeSession(pub Option<Session>);

impl MaybeSession {
    pub fn as_ref(&self) -> Option<&Session> {
        self.0.as_ref()
    }
}

impl FromRequest for MaybeSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(MaybeSession(session_from_request(req))))
    }
}
