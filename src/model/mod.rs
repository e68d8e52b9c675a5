pub mod lexicon;
pub mod remote;

use std::sync::Arc;
use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Backend, Settings};
use lexicon::{Lexicon, LexiconAnalyzer};
use remote::RemoteAnalyzer;

pub const POSITIVE_THRESHOLD: f64 = 0.1;
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Request to sentiment server failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Sentiment server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed analyzer response: {0}")]
    Malformed(String),

    #[error("Polarity {0} is outside [-1.0, 1.0]")]
    OutOfRange(f64),
}

// Anything that can turn text into a polarity in [-1.0, 1.0].
#[async_trait]
pub trait PolarityAnalyzer: Send + Sync {
    async fn polarity(&self, text: &str) -> Result<f64, AnalyzerError>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    // Both thresholds are exclusive: 0.1 and -0.1 are neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }
}

pub fn validate_polarity(polarity: f64) -> Result<f64, AnalyzerError> {
    if polarity.is_finite() && (-1.0..=1.0).contains(&polarity) {
        Ok(polarity)
    } else {
        Err(AnalyzerError::OutOfRange(polarity))
    }
}

// Holds the configured analyzer for the lifetime of the process
pub struct AnalyzerManager {
    pub analyzer: Arc<dyn PolarityAnalyzer>,
}

impl AnalyzerManager {
    pub async fn new(settings: &Settings) -> Result<Self> {
        let analyzer: Arc<dyn PolarityAnalyzer> = match settings.backend {
            Backend::Lexicon => {
                let lexicon = match &settings.lexicon_path {
                    Some(path) => {
                        info!("Loading lexicon overrides from {}", path.display());
                        Lexicon::builtin().extended_from_file(path).await?
                    }
                    None => Lexicon::builtin(),
                };
                info!("Lexicon analyzer ready with {} scored words", lexicon.len());
                Arc::new(LexiconAnalyzer::new(lexicon))
            }
            Backend::Remote => Arc::new(RemoteAnalyzer::new(&settings.server_url, settings.timeout)?),
        };

        Ok(Self::with_analyzer(analyzer))
    }

    pub fn with_analyzer(analyzer: Arc<dyn PolarityAnalyzer>) -> Self {
        Self { analyzer }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn above_positive_threshold_is_positive() {
        for p in [0.1000001, 0.25, 0.5, 1.0] {
            assert_eq!(Sentiment::from_polarity(p), Sentiment::Positive, "polarity {}", p);
        }
    }

    #[test]
    fn below_negative_threshold_is_negative() {
        for p in [-0.1000001, -0.3, -0.8, -1.0] {
            assert_eq!(Sentiment::from_polarity(p), Sentiment::Negative, "polarity {}", p);
        }
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(Sentiment::from_polarity(0.1), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(-0.1), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_polarity(0.05), Sentiment::Neutral);
    }

    #[test]
    fn labels_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Sentiment::Positive).unwrap(), "\"positive\"");
        assert_eq!(serde_json::to_string(&Sentiment::Neutral).unwrap(), "\"neutral\"");
    }

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        assert_eq!(validate_polarity(-1.0).unwrap(), -1.0);
        assert!(validate_polarity(1.01).is_err());
        assert!(validate_polarity(f64::NAN).is_err());
        assert!(validate_polarity(f64::INFINITY).is_err());
    }

    #[actix_web::test]
    async fn manager_defaults_to_lexicon() {
        let manager = AnalyzerManager::new(&Settings::default()).await.unwrap();
        assert_eq!(manager.analyzer.name(), "lexicon");
    }
}
