use actix_web::{delete, get, patch, post, web, HttpResponse};
use uuid::Uuid;

use crate::api::extractors::MaybeSession;
use crate::core::access::{Operation, EXPOSITION_ACCESS};
use crate::domain::exposition::{ExpositionDetail, ExpositionUpdate, NewExposition};
use crate::infrastructure::database::{Database, ExpositionRepository, ImageRepository};
use crate::infrastructure::error::AppResult;

#[get("/expositions")]
pub async fn list_expositions(
    session: MaybeSession,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    EXPOSITION_ACCESS.require(Operation::Query, session.as_ref())?;

    let expositions = ExpositionRepository::new(db.pool.clone()).list().await?;
    Ok(HttpResponse::Ok().json(expositions))
}

/// Détail d'une exposition avec son carrousel d'images
#[get("/expositions/{id}")]
pub async fn get_exposition(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    EXPOSITION_ACCESS.require(Operation::Query, session.as_ref())?;

    let id = path.into_inner();
    let exposition = ExpositionRepository::new(db.pool.clone())
        .get_by_id(id)
        .await?;
    let images = ImageRepository::new(db.pool.clone())
        .find_for_exposition(id)
        .await?;

    Ok(HttpResponse::Ok().json(ExpositionDetail { exposition, images }))
}

#[post("/expositions")]
pub async fn create_exposition(
    session: MaybeSession,
    new_exposition: web::Json<NewExposition>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    EXPOSITION_ACCESS.require(Operation::Create, session.as_ref())?;

    let exposition = ExpositionRepository::new(db.pool.clone())
        .create(&new_exposition)
        .await?;

    Ok(HttpResponse::Created().json(exposition))
}

#[patch("/expositions/{id}")]
pub async fn update_exposition(
    session: MaybeSession,
    path: web::Path<Uuid>,
    update: web::Json<ExpositionUpdate>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    EXPOSITION_ACCESS.require(Operation::Update, session.as_ref())?;

    let exposition = ExpositionRepository::new(db.pool.clone())
        .update(path.into_inner(), &update)
        .await?;

    Ok(HttpResponse::Ok().json(exposition))
}

#[delete("/expositions/{id}")]
pub async fn delete_exposition(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    EXPOSITION_ACCESS.require(Operation::Delete, session.as_ref())?;

    ExpositionRepository::new(db.pool.clone())
        .delete(path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
