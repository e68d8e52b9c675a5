use std::collections::HashMap;
use std::path::Path;
use async_trait::async_trait;
use log::debug;
use thiserror::Error;

use super::{validate_polarity, AnalyzerError, PolarityAnalyzer};

const NEGATION_FACTOR: f64 = -0.5;
// Upper bound on stacked intensifiers
const MAX_INTENSITY: f64 = 4.0;
// Plain tokens allowed between a modifier and the word it modifies
const MODIFIER_REACH: usize = 2;

const BUILTIN_WORDS: &[(&str, f64)] = &[
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("beautiful", 0.85),
    ("best", 1.0),
    ("better", 0.5),
    ("brilliant", 0.9),
    ("calm", 0.3),
    ("cheerful", 0.8),
    ("comfortable", 0.4),
    ("cool", 0.35),
    ("delighted", 0.7),
    ("delightful", 1.0),
    ("enjoy", 0.4),
    ("enjoyed", 0.4),
    ("excellent", 1.0),
    ("excited", 0.4),
    ("fantastic", 0.4),
    ("fine", 0.4),
    ("fun", 0.3),
    ("glad", 0.5),
    ("good", 0.7),
    ("grateful", 0.5),
    ("great", 0.8),
    ("happy", 0.8),
    ("helpful", 0.5),
    ("impressive", 1.0),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("nice", 0.6),
    ("perfect", 1.0),
    ("pleasant", 0.7),
    ("pleased", 0.5),
    ("positive", 0.2),
    ("recommend", 0.4),
    ("relaxed", 0.3),
    ("satisfied", 0.5),
    ("superb", 1.0),
    ("thank", 0.3),
    ("thanks", 0.3),
    ("useful", 0.3),
    ("win", 0.8),
    ("wonderful", 1.0),
    ("worth", 0.3),
    ("angry", -0.5),
    ("annoyed", -0.4),
    ("annoying", -0.8),
    ("anxious", -0.25),
    ("awful", -1.0),
    ("bad", -0.7),
    ("boring", -1.0),
    ("broken", -0.4),
    ("disappointed", -0.75),
    ("disappointing", -0.6),
    ("disgusting", -1.0),
    ("dull", -0.3),
    ("exhausted", -0.4),
    ("fail", -0.5),
    ("failed", -0.5),
    ("frustrated", -0.7),
    ("frustrating", -0.4),
    ("hate", -0.8),
    ("hated", -0.9),
    ("horrible", -1.0),
    ("lonely", -0.5),
    ("miserable", -1.0),
    ("negative", -0.3),
    ("poor", -0.4),
    ("sad", -0.5),
    ("scared", -0.5),
    ("sick", -0.7),
    ("stressed", -0.5),
    ("stupid", -0.8),
    ("terrible", -1.0),
    ("tired", -0.4),
    ("ugly", -0.7),
    ("unhappy", -0.6),
    ("upset", -0.5),
    ("useless", -0.5),
    ("worse", -0.4),
    ("worst", -1.0),
    ("wrong", -0.5),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("highly", 1.3),
    ("incredibly", 1.4),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.2),
    ("totally", 1.3),
    ("truly", 1.3),
    ("very", 1.3),
    ("barely", 0.5),
    ("fairly", 0.8),
    ("quite", 0.9),
    ("slightly", 0.5),
    ("somewhat", 0.7),
];

const NEGATORS: &[&str] = &["cannot", "neither", "never", "no", "nor", "not", "nothing"];

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse lexicon file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Lexicon entry {word:?} has polarity {polarity} outside [-1.0, 1.0]")]
    OutOfRange { word: String, polarity: f64 },
}

// Word -> polarity table used by LexiconAnalyzer
#[derive(Debug, Clone)]
pub struct Lexicon {
    words: HashMap<String, f64>,
}

impl Lexicon {
    pub fn builtin() -> Self {
        Self {
            words: BUILTIN_WORDS
                .iter()
                .map(|(word, polarity)| (word.to_string(), *polarity))
                .collect(),
        }
    }

    // Merges `{"word": polarity}` entries from a JSON file, replacing builtin values.
    pub async fn extended_from_file(mut self, path: &Path) -> Result<Self, LexiconError> {
        let content = tokio::fs::read_to_string(path).await?;
        let entries: HashMap<String, f64> = serde_json::from_str(&content)?;
        self.extend(entries)?;
        Ok(self)
    }

    pub fn extend(&mut self, entries: HashMap<String, f64>) -> Result<(), LexiconError> {
        for (word, polarity) in entries {
            if !polarity.is_finite() || !(-1.0..=1.0).contains(&polarity) {
                return Err(LexiconError::OutOfRange { word, polarity });
            }
            self.words.insert(normalize(&word), polarity);
        }
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}

pub struct LexiconAnalyzer {
    lexicon: Lexicon,
}

impl LexiconAnalyzer {
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    // Mean polarity of the scored words, each adjusted by any pending
    // intensifier and negation. Text with no scored words is 0.0.
    pub fn score(&self, text: &str) -> f64 {
        let mut scores = Vec::new();
        let mut intensity = 1.0;
        let mut negated = false;
        let mut plain_run = 0;

        for token in tokenize(text) {
            if let Some(polarity) = self.lexicon.get(&token) {
                let mut adjusted = (polarity * intensity).clamp(-1.0, 1.0);
                if negated {
                    adjusted *= NEGATION_FACTOR;
                }
                scores.push(adjusted);
                intensity = 1.0;
                negated = false;
                plain_run = 0;
            } else if is_negator(&token) {
                negated = true;
                plain_run = 0;
            } else if let Some(factor) = intensifier(&token) {
                intensity = (intensity * factor).min(MAX_INTENSITY);
                plain_run = 0;
            } else {
                plain_run += 1;
                if plain_run >= MODIFIER_REACH {
                    intensity = 1.0;
                    negated = false;
                }
            }
        }

        if scores.is_empty() {
            return 0.0;
        }
        let mean = scores.iter().sum::<f64>() / scores.len() as f64;
        mean.clamp(-1.0, 1.0)
    }
}

#[async_trait]
impl PolarityAnalyzer for LexiconAnalyzer {
    async fn polarity(&self, text: &str) -> Result<f64, AnalyzerError> {
        let polarity = self.score(text);
        debug!("Lexicon polarity {} for {} characters", polarity, text.len());
        validate_polarity(polarity)
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase().replace('\u{2019}', "'")
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|raw| normalize(raw).trim_matches('\'').to_string())
        .filter(|token| !token.is_empty())
}

fn is_negator(token: &str) -> bool {
    token.ends_with("n't") || NEGATORS.contains(&token)
}

fn intensifier(token: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(word, _)| *word == token)
        .map(|(_, factor)| *factor)
}
