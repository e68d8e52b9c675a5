use actix_web::web;
use crate::error::ApiError;
use crate::web::handlers;

// JSON extractor settings for request bodies: size cap plus JSON error payloads.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::from(err).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/analyze")
            .route(web::post().to(handlers::analyze))
    )
    .route("/health", web::get().to(handlers::health_check));
}
