use actix_web::{delete, get, patch, post, web, HttpResponse};
use uuid::Uuid;

use crate::api::extractors::MaybeSession;
use crate::core::access::{Operation, TEXTE_ACCESS};
use crate::domain::texte::{NewTexte, TexteUpdate};
use crate::infrastructure::database::{Database, TexteRepository};
use crate::infrastructure::error::AppResult;

#[get("/textes")]
pub async fn list_textes(
    session: MaybeSession,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TEXTE_ACCESS.require(Operation::Query, session.as_ref())?;

    let textes = TexteRepository::new(db.pool.clone()).list().await?;
    Ok(HttpResponse::Ok().json(textes))
}

#[get("/textes/{id}")]
pub async fn get_texte(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TEXTE_ACCESS.require(Operation::Query, session.as_ref())?;

    let texte = TexteRepository::new(db.pool.clone())
        .get_by_id(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(texte))
}

#[post("/textes")]
pub async fn create_texte(
    session: MaybeSession,
    new_texte: web::Json<NewTexte>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TEXTE_ACCESS.require(Operation::Create, session.as_ref())?;

    let texte = TexteRepository::new(db.pool.clone())
        .create(&new_texte)
        .await?;

    Ok(HttpResponse::Created().json(texte))
}

#[patch("/textes/{id}")]
pub async fn update_texte(
    session: MaybeSession,
    path: web::Path<Uuid>,
    update: web::Json<TexteUpdate>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TEXTE_ACCESS.require(Operation::Update, session.as_ref())?;

    let texte = TexteRepository::new(db.pool.clone())
        .update(path.into_inner(), &update)
        .await?;

    Ok(HttpResponse::Ok().json(texte))
}

#[delete("/textes/{id}")]
pub async fn delete_texte(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TEXTE_ACCESS.require(Operation::Delete, session.as_ref())?;

    TexteRepository::new(db.pool.clone())
        .delete(path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
