use actix_web::{web, HttpResponse, Responder};
use log::{debug, error, info};

use crate::error::ApiError;
use crate::model::Sentiment;
use crate::web::models::{AnalyzeRequest, AnalyzeResponse, HealthResponse};
use crate::AppState;

// Health check endpoint
pub async fn health_check(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        analyzer: data.analyzers.analyzer.name().to_string(),
    })
}

// Sentiment analysis endpoint
pub async fn analyze(
    data: web::Data<AppState>,
    req: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let AnalyzeRequest { text } = req.into_inner();
    debug!("Analyze request text: {:?}", text);

    let polarity = match data.analyzers.analyzer.polarity(&text).await {
        Ok(polarity) => polarity,
        Err(e) => {
            error!("Analyzer error: {}", e);
            return Err(ApiError::Analyzer(e));
        }
    };

    let sentiment = Sentiment::from_polarity(polarity);
    info!("Analyzed {} characters: {:?} ({})", text.len(), sentiment, polarity);

    Ok(HttpResponse::Ok().json(AnalyzeResponse {
        text,
        sentiment,
        polarity,
    }))
}
