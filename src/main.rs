mod config;
mod error;
mod model;
mod web;

use actix_web::{middleware::Logger, App, HttpServer, web::Data};
use dotenv::dotenv;
use log::{info, error};

use config::Settings;
use model::AnalyzerManager;
use web::routes;

// App state structure
struct AppState {
    analyzers: AnalyzerManager,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting sentiment web application");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Build the configured polarity analyzer
    let analyzers = match AnalyzerManager::new(&settings).await {
        Ok(manager) => {
            info!("Sentiment analyzer initialized: {}", manager.analyzer.name());
            manager
        },
        Err(e) => {
            error!("Failed to initialize sentiment analyzer: {:#}", e);
            std::process::exit(1);
        }
    };

    let app_state = Data::new(AppState { analyzers });
    let max_payload_bytes = settings.max_payload_bytes;

    info!("Listening on {}:{}", settings.host, settings.port);

    // Start web server
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(app_state.clone())
            .app_data(routes::json_config(max_payload_bytes))
            .configure(routes::configure)
    })
    .bind((settings.host.as_str(), settings.port))?
    .run()
    .await
}
