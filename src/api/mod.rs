pub mod extractors;
pub mod routes;

use actix_web::web;

/// Configure toutes les routes de l'API
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Authentification
            .service(routes::auth::login)
            .service(routes::auth::me)
            // Utilisateurs
            .service(routes::users::list_users)
            .service(routes::users::get_user)
            .service(routes::users::create_user)
            .service(routes::users::update_user)
            .service(routes::users::delete_user)
            // Textes
            .service(routes::textes::list_textes)
            .service(routes::textes::get_texte)
            .service(routes::textes::create_texte)
            .service(routes::textes::update_texte)
            .service(routes::textes::delete_texte)
            // Images
            .service(routes::images::list_images)
            .service(routes::images::get_image)
            .service(routes::images::upload_image)
            .service(routes::images::update_image)
            .service(routes::images::delete_image)
            // Expositions
            .service(routes::expositions::list_expositions)
            .service(routes::expositions::get_exposition)
            .service(routes::expositions::create_exposition)
            .service(routes::expositions::update_exposition)
            .service(routes::expositions::delete_exposition)
            // Travaux et leurs sections
            .service(routes::travaux::list_travaux)
            .service(routes::travaux::get_travaux)
            .service(routes::travaux::create_travaux)
            .service(routes::travaux::update_travaux)
            .service(routes::travaux::delete_travaux)
            .service(routes::travaux::list_sections)
            .service(routes::travaux::get_section)
            .service(routes::travaux::create_section)
            .service(routes::travaux::update_section)
            .service(routes::travaux::delete_section)
            // Page à propos et ses sections
            .service(routes::about::list_about)
            .service(routes::about::get_about)
            .service(routes::about::create_about)
            .service(routes::about::update_about)
            .service(routes::about::delete_about)
            .service(routes::about::list_sections)
            .service(routes::about::get_section)
            .service(routes::about::create_section)
            .service(routes::about::update_section)
            .service(routes::about::delete_section),
    );

    // Endpoint de santé pour monitoring
    cfg.service(web::resource("/health").route(web::get().to(health_check)));
}

async fn health_check() -> impl actix_web::Responder {
    actix_web::HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
