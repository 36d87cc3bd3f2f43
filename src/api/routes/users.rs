use actix_web::{delete, get, patch, post, web, HttpResponse};
use uuid::Uuid;

use crate::api::extractors::MaybeSession;
use crate::api::routes::auth::UserResponse;
use crate::core::access::{Operation, USER_ACCESS};
use crate::domain::user::{NewUser, UserUpdate};
use crate::infrastructure::database::{Database, UserRepository};
use crate::infrastructure::error::AppResult;

#[get("/users")]
pub async fn list_users(
    session: MaybeSession,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    USER_ACCESS.require(Operation::Query, session.as_ref())?;

    let users = UserRepository::new(db.pool.clone()).list().await?;
    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(HttpResponse::Ok().json(users))
}

#[get("/users/{id}")]
pub async fn get_user(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    USER_ACCESS.require(Operation::Query, session.as_ref())?;

    let user = UserRepository::new(db.pool.clone())
        .get_by_id(path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[post("/users")]
pub async fn create_user(
    session: MaybeSession,
    new_user: web::Json<NewUser>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    USER_ACCESS.require(Operation::Create, session.as_ref())?;

    let user = UserRepository::new(db.pool.clone())
        .create(&new_user)
        .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

#[patch("/users/{id}")]
pub async fn update_user(
    session: MaybeSession,
    path: web::Path<Uuid>,
    update: web::Json<UserUpdate>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    USER_ACCESS.require(Operation::Update, session.as_ref())?;

    let user = UserRepository::new(db.pool.clone())
        .update(path.into_inner(), &update)
        .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("/users/{id}")]
pub async fn delete_user(
    session: MaybeSession,
    path: web::Path<Uuid>,
    db: web::Data<Database>,
) -> AppResult<HttpResponse> {
    USER_ACCESS.require(Operation::Delete, session.as_ref())?;

    UserRepository::new(db.pool.clone())
        .delete(path.into_inner())
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
