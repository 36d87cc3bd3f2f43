use actix_cors::Cors;
use actix_web::{http::header, middleware, web, App, HttpServer};
use std::env;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_backend::api;
use portfolio_backend::core::auth::bootstrap_super_admin;
use portfolio_backend::infrastructure::database::UserRepository;
use portfolio_backend::{AppConfig, Database, ImageStorage};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    setup_tracing();
    info!("Démarrage du backend portfolio");

    // Chargement de la configuration
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("{e}"))?;
    info!(
        "Configuration chargée (mode: {})",
        env::var("RUN_MODE").unwrap_or_else(|_| "development".into())
    );

    // Initialisation des services
    let db = Database::new(&config.database.url, config.database.max_connections)
        .await
        .map_err(|e| anyhow::anyhow!("Connexion à la base impossible: {e}"))?;
    db.migrate().await.map_err(|e| anyhow::anyhow!("{e}"))?;

    let storage = ImageStorage::new(&config.storage).map_err(|e| anyhow::anyhow!("{e}"))?;

    // Premier compte superAdmin si la base est vide
    if let Some(bootstrap) = &config.bootstrap {
        let users = UserRepository::new(db.pool.clone());
        bootstrap_super_admin(&users, bootstrap)
            .await
            .map_err(|e| anyhow::anyhow!("Bootstrap du premier compte impossible: {e}"))?;
    }

    let bind_addr = config.bind_addr();
    let workers = config.server.workers;
    let cors_origin = config.cors.origin.clone();
    let static_route = storage.route().to_string();
    let static_root = storage.root().to_path_buf();

    let db_data = web::Data::new(db);
    let storage_data = web::Data::new(storage);
    let config_data = web::Data::new(config);

    // Configuration du serveur Actix-Web
    let server = HttpServer::new(move || {
        // L'API n'accepte que l'origine du front, avec credentials
        let cors = Cors::default()
            .allowed_origin(&cors_origin)
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(db_data.clone())
            .app_data(storage_data.clone())
            .app_data(config_data.clone())
            .configure(api::config)
            // Les images (et le logo) sont servies telles quelles
            .service(actix_files::Files::new(&static_route, &static_root))
    })
    .bind(&bind_addr)?
    .workers(workers)
    .shutdown_timeout(10);

    info!("Backend démarré sur http://{}", bind_addr);

    server.run().await?;
    Ok(())
}

/// Configure le tracing pour le logging structuré
fn setup_tracing() {
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".into());

    let subscriber = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    );

    if log_format == "json" {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().flatten_event(true))
            .init();
    } else {
        subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_line_number(true)
                    .with_file(true),
            )
            .init();
    }
}
