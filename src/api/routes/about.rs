use actix_web::{delete, get, patch, post, web, HttpResponse};
use uuid::Uuid;

use crate::api::extractors::MaybeSession;
use crate::core::access::{Operation, ABOUT_ACCESS, SECTION_ABOUT_ACCESS};
use crate::domain::about::{AboutDetail, NewSectionAbout, SectionAboutDetail, SectionAboutUpdate};
use crate::infrastructure::database::{
    AboutRepository, Database, ImageRepository, SectionAboutRepository,
};
use crate::infrastructure::error::AppResult;

#[get("/about")]
pub async fn list_about(
    session: MaybeSession,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    ABOUT_ACCESS.require(Operation::Query, session.as_ref())?;

    let about = AboutRepository::new(db.pool.clone()).list().await?;
    Ok(HttpResponse::Ok().json(about))
}

/// Détail de la page à propos: image d'en-tête et sections
#[get("/about/{id}")]
pub async fn get_about(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    ABOUT_ACCESS.require(Operation::Query, session.as_ref())?;

    let id = path.into_inner();
    let about = AboutRepository::new(db.pool.clone()).get_by_id(id).await?;

    let images = ImageRepository::new(db.pool.clone());
    let image = images.find_for_about(id).await?;

    let sections = SectionAboutRepository::new(db.pool.clone())
        .list_by_about(id)
        .await?;

    let mut details = Vec::with_capacity(sections.len());
    for section in sections {
        let image = images.find_for_section_about(section.id).await?;
        details.push(SectionAboutDetail { section, image });
    }

    Ok(HttpResponse::Ok().json(AboutDetail {
        about,
        image,
        sections: details,
    }))
}

#[post("/about")]
pub async fn create_about(
    session: MaybeSession,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    ABOUT_ACCESS.require(Operation::Create, session.as_ref())?;

    let about = AboutRepository::new(db.pool.clone()).create().await?;
    Ok(HttpResponse::Created().json(about))
}

/// La page à propos ne porte aucun champ propre: la « modification »
/// consiste à rattacher image et sections, et reste soumise à la règle
/// d'accès update de l'entité.
#[patch("/about/{id}")]
pub async fn update_about(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    ABOUT_ACCESS.require(Operation::Update, session.as_ref())?;

    let about = AboutRepository::new(db.pool.clone())
        .get_by_id(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(about))
}

#[delete("/about/{id}")]
pub async fn delete_about(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    ABOUT_ACCESS.require(Operation::Delete, session.as_ref())?;

    AboutRepository::new(db.pool.clone())
        .delete(path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

#[get("/sections-about")]
pub async fn list_sections(
    session: MaybeSession,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_ABOUT_ACCESS.require(Operation::Query, session.as_ref())?;

    let sections = SectionAboutRepository::new(db.pool.clone()).list().await?;
    Ok(HttpResponse::Ok().json(sections))
}

#[get("/sections-about/{id}")]
pub async fn get_section(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_ABOUT_ACCESS.require(Operation::Query, session.as_ref())?;

    let section = SectionAboutRepository::new(db.pool.clone())
        .get_by_id(path.into_inner())
        .await?;
    let image = ImageRepository::new(db.pool.clone())
        .find_for_section_about(section.id)
        .await?;

    Ok(HttpResponse::Ok().json(SectionAboutDetail { section, image }))
}

#[post("/sections-about")]
pub async fn create_section(
    session: MaybeSession,
    new_section: web::Json<NewSectionAbout>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_ABOUT_ACCESS.require(Operation::Create, session.as_ref())?;

    let section = SectionAboutRepository::new(db.pool.clone())
        .create(&new_section)
        .await?;

    Ok(HttpResponse::Created().json(section))
}

#[patch("/sections-about/{id}")]
pub async fn update_section(
    session: MaybeSession,
    path: web::Path<Uuid>,
    update: web::Json<SectionAboutUpdate>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_ABOUT_ACCESS.require(Operation::Update, session.as_ref())?;

    let section = SectionAboutRepository::new(db.pool.clone())
        .update(path.into_inner(), &update)
        .await?;

    Ok(HttpResponse::Ok().json(section))
}

#[delete("/sections-about/{id}")]
pub async fn delete_section(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    SECTION_ABOUT_ACCESS.require(Operation::Delete, session.as_ref())?;

    SectionAboutRepository::new(db.pool.clone())
        .delete(path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
