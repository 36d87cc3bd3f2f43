use actix_multipart::Multipart;
use actix_web::{delete, get, patch, post, web, HttpResponse};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::MaybeSession;
use crate::core::access::{Operation, IMAGE_ACCESS};
use crate::domain::image::{Image, ImageUpdate};
use crate::infrastructure::database::{Database, ImageRepository};
use crate::infrastructure::error::{AppError, AppResult};
use crate::infrastructure::storage::ImageStorage;

/// Taille maximale d'une image téléversée (10 Mo)
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Image enrichie de son URL publique
#[derive(Serialize)]
pub struct ImageResponse {
    #[serde(flatten)]
    pub image: Image,
    pub url: String,
}

impl ImageResponse {
    fn new(image: Image, storage: &ImageStorage) -> Self {
        let url = storage.public_url(&image.filename);
        Self { image, url }
    }
}

/// Paramètres optionnels de l'upload
#[derive(Debug, Deserialize, Validate)]
pub struct UploadParams {
    /// Ordre d'affichage de l'image dans le carrousel
    #[validate(range(min = 1, message = "L'ordre d'affichage doit être supérieur ou égal à 1"))]
    pub order: Option<i32>,
}

#[get("/images")]
pub async fn list_images(
    session: MaybeSession,
    db: web::Data<Database>,
    storage: web::Data<ImageStorage>,
) -> AppResult<HttpResponse> {
    IMAGE_ACCESS.require(Operation::Query, session.as_ref())?;

    let images = ImageRepository::new(db.pool.clone()).list().await?;
    let images: Vec<ImageResponse> = images
        .into_iter()
        .map(|image| ImageResponse::new(image, &storage))
        .collect();

    Ok(HttpResponse::Ok().json(images))
}

#[get("/images/{id}")]
pub async fn get_image(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
    storage: web::Data<ImageStorage>,
) -> AppResult<HttpResponse> {
    IMAGE_ACCESS.require(Operation::Query, session.as_ref())?;

    let image = ImageRepository::new(db.pool.clone())
        .get_by_id(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ImageResponse::new(image, &storage)))
}

/// Téléversement d'une image (multipart).
///
/// Le fichier est identifié par ses octets magiques, écrit sous un nom
/// généré, puis ses métadonnées sont enregistrées. Le rattachement à une
/// exposition ou une section se fait ensuite via PATCH /images/{id}.
#[post("/images/upload")]
pub async fn upload_image(
    session: MaybeSession,
    payload: Multipart,
    query: web::Query<UploadParams>,
    db: web::Data<Database>,
    storage: web::Data<ImageStorage>,
) -> AppResult<HttpResponse> {
    IMAGE_ACCESS.require(Operation::Create, session.as_ref())?;
    query.validate()?;

    let content = read_upload(payload).await?;
    let stored = storage.save(&content).await?;

    info!(filename = %stored.filename, size = stored.filesize, "Image téléversée");

    let image = ImageRepository::new(db.pool.clone())
        .create(&stored, query.order, None)
        .await?;

    Ok(HttpResponse::Created().json(ImageResponse::new(image, &storage)))
}

#[patch("/images/{id}")]
pub async fn update_image(
    session: MaybeSession,
    path: web::Path<Uuid>,
    update: web::Json<ImageUpdate>,
    db: web::Data<Database>,
    storage: web::Data<ImageStorage>,
) -> AppResult<HttpResponse> {
    IMAGE_ACCESS.require(Operation::Update, session.as_ref())?;

    let image = ImageRepository::new(db.pool.clone())
        .update(path.into_inner(), &update)
        .await?;

    Ok(HttpResponse::Ok().json(ImageResponse::new(image, &storage)))
}

/// Supprime l'image et son fichier sur disque
#[delete("/images/{id}")]
pub async fn delete_image(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
    storage: web::Data<ImageStorage>,
) -> AppResult<HttpResponse> {
    IMAGE_ACCESS.require(Operation::Delete, session.as_ref())?;

    let image = ImageRepository::new(db.pool.clone())
        .delete(path.into_inner())
        .await?;

    storage.delete(&image.filename).await;

    Ok(HttpResponse::NoContent().finish())
}

/// Lit le premier champ de la requête multipart, borné en taille
async fn read_upload(mut payload: Multipart) -> AppResult<Vec<u8>> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(format!("Multipart invalide: {}", e)))?
    {
        let mut buffer = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::BadRequest(format!("Multipart invalide: {}", e)))?
        {
            if buffer.len() + chunk.len() > MAX_IMAGE_BYTES {
                return Err(AppError::PayloadTooLarge(format!(
                    "Image trop volumineuse (max {} Mo)",
                    MAX_IMAGE_BYTES / (1024 * 1024)
                )));
            }
            buffer.extend_from_slice(&chunk);
        }

        if !buffer.is_empty() {
            return Ok(buffer);
        }
    }

    Err(AppError::BadRequest(
        "Aucun fichier fourni dans la requête".to_string(),
    ))
}
