use std::time::Duration;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use serde_json::{json, Value};

use super::{validate_polarity, AnalyzerError, PolarityAnalyzer};

// A wrapper for an external sentiment server's polarity API
pub struct RemoteAnalyzer {
    server_url: String,
    client: Client,
}

impl RemoteAnalyzer {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, AnalyzerError> {
        info!("Using sentiment server at: {} (timeout {:?})", server_url, timeout);

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl PolarityAnalyzer for RemoteAnalyzer {
    async fn polarity(&self, text: &str) -> Result<f64, AnalyzerError> {
        let url = format!("{}/polarity", self.server_url);
        debug!("Requesting polarity from {} for {} characters", url, text.len());

        let response = self.client.post(&url)
            .json(&json!({ "text": text }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Status { status: status.as_u16(), body });
        }

        let response_json: Value = response
            .json()
            .await
            .map_err(|e| AnalyzerError::Malformed(e.to_string()))?;
        debug!("Response JSON: {}", response_json);

        let polarity = response_json
            .get("polarity")
            .and_then(|polarity| polarity.as_f64())
            .ok_or_else(|| AnalyzerError::Malformed(format!("missing numeric polarity in {}", response_json)))?;

        validate_polarity(polarity)
    }

    fn name(&self) -> &str {
        "remote"
    }
}
