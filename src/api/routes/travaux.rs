use actix_web::{delete, get, patch, post, web, HttpResponse};
use uuid::Uuid;

use crate::api::extractors::MaybeSession;
use crate::core::access::{Operation, SECTION_TRAVAUX_ACCESS, TRAVAUX_ACCESS};
use crate::domain::travaux::{
    NewSectionTravaux, NewTravaux, SectionTravauxDetail, SectionTravauxUpdate, TravauxDetail,
    TravauxUpdate,
};
use crate::infrastructure::database::{
    Database, ImageRepository, SectionTravauxRepository, TravauxRepository,
};
use crate::infrastructure::error::AppResult;

#[get("/travaux")]
pub async fn list_travaux(
    session: MaybeSession,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TRAVAUX_ACCESS.require(Operation::Query, session.as_ref())?;

    let travaux = TravauxRepository::new(db.pool.clone()).list().await?;
    Ok(HttpResponse::Ok().json(travaux))
}

/// Détail d'un travail avec ses sections et leurs images
#[get("/travaux/{id}")]
pub async fn get_travaux(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TRAVAUX_ACCESS.require(Operation::Query, session.as_ref())?;

    let id = path.into_inner();
    let travaux = TravauxRepository::new(db.pool.clone()).get_by_id(id).await?;

    let sections = SectionTravauxRepository::new(db.pool.clone())
        .list_by_travaux(id)
        .await?;

    let images = ImageRepository::new(db.pool.clone());
    let mut details = Vec::with_capacity(sections.len());
    for section in sections {
        let image = images.find_for_section_travaux(section.id).await?;
        details.push(SectionTravauxDetail { section, image });
    }

    Ok(HttpResponse::Ok().json(TravauxDetail {
        travaux,
        sections: details,
    }))
}

#[post("/travaux")]
pub async fn create_travaux(
    session: MaybeSession,
    new_travaux: web::Json<NewTravaux>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TRAVAUX_ACCESS.require(Operation::Create, session.as_ref())?;

    let travaux = TravauxRepository::new(db.pool.clone())
        .create(&new_travaux)
        .await?;

    Ok(HttpResponse::Created().json(travaux))
}

#[patch("/travaux/{id}")]
pub async fn update_travaux(
    session: MaybeSession,
    path: web::Path<Uuid>,
    update: web::Json<TravauxUpdate>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TRAVAUX_ACCESS.require(Operation::Update, session.as_ref())?;

    let travaux = TravauxRepository::new(db.pool.clone())
        .update(path.into_inner(), &update)
        .await?;

    Ok(HttpResponse::Ok().json(travaux))
}

#[delete("/travaux/{id}")]
pub async fn delete_travaux(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    TRAVAUX_ACCESS.require(Operation::Delete, session.as_ref())?;

    TravauxRepository::new(db.pool.clone())
        .delete(path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/sections-travaux")]
pub async fn list_sections(
    session: MaybeSession,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_TRAVAUX_ACCESS.require(Operation::Query, session.as_ref())?;

    let sections = SectionTravauxRepository::new(db.pool.clone()).list().await?;
    Ok(HttpResponse::Ok().json(sections))
}

#[get("/sections-travaux/{id}")]
pub async fn get_section(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_TRAVAUX_ACCESS.require(Operation::Query, session.as_ref())?;

    let section = SectionTravauxRepository::new(db.pool.clone())
        .get_by_id(path.into_inner())
        .await?;
    let image = ImageRepository::new(db.pool.clone())
        .find_for_section_travaux(section.id)
        .await?;

    Ok(HttpResponse::Ok().json(SectionTravauxDetail { section, image }))
}

#[post("/sections-travaux")]
pub async fn create_section(
    session: MaybeSession,
    new_section: web::Json<NewSectionTravaux>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_TRAVAUX_ACCESS.require(Operation::Create, session.as_ref())?;

    let section = SectionTravauxRepository::new(db.pool.clone())
        .create(&new_section)
        .await?;

    Ok(HttpResponse::Created().json(section))
}

#[patch("/sections-travaux/{id}")]
pub async fn update_section(
    session: MaybeSession,
    path: web::Path<Uuid>,
    update: web::Json<SectionTravauxUpdate>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_TRAVAUX_ACCESS.require(Operation::Update, session.as_ref())?;

    let section = SectionTravauxRepository::new(db.pool.clone())
        .update(path.into_inner(), &update)
        .await?;

    Ok(HttpResponse::Ok().json(section))
}

#[delete("/sections-travaux/{id}")]
pub async fn delete_section(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_TRAVAUX_ACCESS.require(Operation::Delete, session.as_ref())?;

    SectionTravauxRepository::new(db.pool.clone())
        .delete(path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
