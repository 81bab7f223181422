use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

use lexiquest_server::{
    app_state::AppState, config::Config, handlers, middleware::RequestIdMiddleware,
};

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers(vec![header::HeaderName::from_static("x-request-id")])
            .max_age(3600),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    config.log_provider_status();

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let allowed_origin = config.cors_allowed_origin.clone();

    let state = match AppState::new(config).await {
        Ok(state) => Arc::new(state),
        Err(e) => {
            log::error!("Failed to initialise application state: {}", e);
            return Err(std::io::Error::other(e.to_string()));
        }
    };

    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors(allowed_origin.as_deref()))
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(handlers::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
